use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::amount::has_credit_marker;
use crate::profile::{DateStyle, LineShape, ProfileError, StatementProfile};
use crate::year::LineDate;

const AMOUNT: &str = r"[\d,]+\.\d{2}";
const RATE: &str = r"[\d,]+\.\d+";

fn date_pattern(style: DateStyle) -> &'static str {
    match style {
        DateStyle::DayMonthName => r"\d{1,2}\s+[a-z]{3}",
        DateStyle::DayMonthYearSlash => r"\d{1,2}/\d{1,2}/\d{4}",
    }
}

/// Regexes for one shape, tried in order. A single-amount row is tried with
/// a posting date first, then without, so a one-date row whose description
/// starts like a date (`05 MAR 10 PCS WIDGETS`) still matches.
fn shape_patterns(shape: LineShape, style: DateStyle, currency: &str) -> Vec<String> {
    let d = date_pattern(style);
    let ccy = regex::escape(currency);
    match shape {
        LineShape::Domestic => vec![format!(
            r"(?i)^(?P<date>{d})\s+(?P<desc>.+?)\s+{ccy}\s+(?P<amount>{AMOUNT})(?:\s*(?P<amount_cr>cr))?\s+-\s+(?P<balance>{AMOUNT})(?:\s*(?P<balance_cr>cr))?\s*$"
        )],
        LineShape::ForeignCurrency => vec![format!(
            r"(?i)^(?P<date>{d})\s+(?P<currency>[a-z]{{3}})\s+(?P<fx_amount>{AMOUNT})\s+(?P<fx_rate>{RATE})\s+(?P<amount>{AMOUNT})(?:\s*(?P<amount_cr>cr))?\s*$"
        )],
        LineShape::SingleAmount => {
            let tail = format!(r"(?P<desc>.+?)\s+(?P<amount>{AMOUNT})(?:\s*(?P<amount_cr>cr))?\s*$");
            vec![
                format!(r"(?i)^(?P<posted>{d})\s+(?P<date>{d})\s+{tail}"),
                format!(r"(?i)^(?P<date>{d})\s+{tail}"),
            ]
        }
    }
}

fn abbr_month_to_num(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" => Some(1), "feb" => Some(2), "mar" => Some(3), "apr" => Some(4),
        "may" => Some(5), "jun" => Some(6), "jul" => Some(7), "aug" => Some(8),
        "sep" => Some(9), "oct" => Some(10), "nov" => Some(11), "dec" => Some(12),
        _ => None,
    }
}

/// Parse a transaction date token in the profile's style. Day/month pairs
/// that can never exist (31 FEB) are rejected; 29 FEB is accepted here and
/// checked again once the year is known.
pub fn parse_line_date(raw: &str, style: DateStyle) -> Option<LineDate> {
    match style {
        DateStyle::DayMonthName => {
            let mut parts = raw.split_whitespace();
            let day: u32 = parts.next()?.parse().ok()?;
            let month = abbr_month_to_num(parts.next()?)?;
            // 2000 is a leap year, so this only rules out impossible pairs.
            NaiveDate::from_ymd_opt(2000, month, day)?;
            Some(LineDate::DayMonth { day, month })
        }
        DateStyle::DayMonthYearSlash => NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
            .ok()
            .map(LineDate::Full),
    }
}

/// Raw foreign-currency fields of an FX line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FxFields<'a> {
    pub currency: &'a str,
    pub amount: &'a str,
    pub rate: &'a str,
}

/// Fields pulled from a recognized transaction line, still as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub shape: LineShape,
    pub date: LineDate,
    /// The line's own free text; FX lines have none.
    pub description: Option<&'a str>,
    pub amount: &'a str,
    pub amount_credit: bool,
    pub balance: Option<&'a str>,
    pub balance_credit: bool,
    pub fx: Option<FxFields<'a>>,
}

impl LineMatch<'_> {
    pub fn has_credit_marker(&self) -> bool {
        self.amount_credit || self.balance_credit
    }
}

/// The profile's line shapes, compiled, in priority order.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    style: DateStyle,
    shapes: Vec<(LineShape, Regex)>,
}

impl LineMatcher {
    pub fn new(profile: &StatementProfile) -> Result<Self, ProfileError> {
        let mut shapes = Vec::new();
        for &shape in &profile.shapes {
            for pattern in shape_patterns(shape, profile.date_style, &profile.currency) {
                shapes.push((shape, Regex::new(&pattern)?));
            }
        }
        Ok(Self { style: profile.date_style, shapes })
    }

    /// The first pattern whose date parses wins.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<LineMatch<'a>> {
        self.shapes.iter().find_map(|(shape, re)| {
            let caps = re.captures(line)?;
            self.extract(*shape, &caps)
        })
    }

    fn extract<'a>(&self, shape: LineShape, caps: &Captures<'a>) -> Option<LineMatch<'a>> {
        let text = |name: &str| caps.name(name).map(|m| m.as_str());
        let date = parse_line_date(text("date")?, self.style)?;
        let amount = text("amount")?;

        let fx = match shape {
            LineShape::ForeignCurrency => Some(FxFields {
                currency: text("currency")?,
                amount: text("fx_amount")?,
                rate: text("fx_rate")?,
            }),
            _ => None,
        };

        Some(LineMatch {
            shape,
            date,
            description: text("desc").map(str::trim),
            amount,
            amount_credit: text("amount_cr").is_some() || has_credit_marker(amount),
            balance: text("balance"),
            balance_credit: text("balance_cr").is_some(),
            fx,
        })
    }
}
