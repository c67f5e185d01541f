use std::sync::OnceLock;

use chrono::NaiveDate;
use folio_core::{Boundary, StatementPeriod};
use regex::Regex;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_labeled_date,
    r"(?i)^\s*(from|to)\s*:?\s*(\d{1,2}(?:st|nd|rd|th)?\s+[a-z]{3,9}\.?,?\s+\d{4})\s*$");
re!(re_ordinal,
    r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b");
re!(re_slash_range,
    r"(?i)(\d{1,2}\s*/\s*\d{1,2}\s*/\s*\d{4})\s*to\s*(\d{1,2}\s*/\s*\d{1,2}\s*/\s*\d{4})");
re!(re_named_range,
    r"(?i)(\d{1,2}(?:st|nd|rd|th)?\s+[a-z]{3,9}\s+\d{4})\s*(?:to|-)\s*(\d{1,2}(?:st|nd|rd|th)?\s+[a-z]{3,9}\s+\d{4})");

// ── Date helpers ──────────────────────────────────────────────────────────────

/// Parse `11th Jul 2025`, `11 July 2025`, `1st aug. 2025`. Unparseable input
/// is `None`, never an error.
pub fn parse_full_date(text: &str) -> Option<NaiveDate> {
    let stripped = re_ordinal().replace_all(text.trim(), "$1");
    let clean = stripped
        .split_whitespace()
        .map(|w| w.trim_end_matches([',', '.']))
        .collect::<Vec<_>>()
        .join(" ");
    ["%d %b %Y", "%d %B %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&clean, fmt).ok())
}

/// Parse `15/08/2025` (day first). Spaces around the slashes are tolerated.
pub fn parse_slash_date(text: &str) -> Option<NaiveDate> {
    let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    NaiveDate::parse_from_str(&clean, "%d/%m/%Y").ok()
}

/// A line that is nothing but a From/To marker, in English or Arabic.
/// PDF extraction often reverses right-to-left text, so the reversed
/// renderings are accepted too.
pub fn marker_token(line: &str) -> Option<Boundary> {
    let token = line.trim().trim_matches(':').trim().to_lowercase();
    match token.as_str() {
        "from" | "من" | "نم" => Some(Boundary::From),
        "to" | "الى" | "إلى" | "ىلإ" | "ىلا" => Some(Boundary::To),
        _ => None,
    }
}

// ── Period lines ──────────────────────────────────────────────────────────────

/// A line that carries statement period information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodLine {
    /// `From: 11th Jul 2025`. `date` is `None` when the text after the marker
    /// is not a real date; the line is still consumed.
    Labeled { boundary: Boundary, date: Option<NaiveDate> },
    /// A bare `From` / `To` with the date expected on a later line.
    Marker(Boundary),
    /// A bare date arriving while a marker is pending.
    PendingDate(NaiveDate),
    /// `Statement Period: 15/08/2025 TO 14/09/2025`; either side may be
    /// missing if the label line carried no readable range.
    Range { from: Option<NaiveDate>, to: Option<NaiveDate> },
}

/// Remembers the statement period and any marker still waiting for its date.
#[derive(Debug, Clone, Default)]
pub struct PeriodTracker {
    period: StatementPeriod,
    pending: Option<Boundary>,
}

impl PeriodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> StatementPeriod {
        self.period
    }

    pub fn pending(&self) -> Option<Boundary> {
        self.pending
    }

    /// Decide whether `line` is a period line. `line_lower` is the lowercased
    /// line and `labels` the lowercased range labels.
    pub fn classify(&self, line: &str, line_lower: &str, labels: &[String]) -> Option<PeriodLine> {
        if let Some(c) = re_labeled_date().captures(line) {
            let boundary = match c.get(1)?.as_str().to_lowercase().as_str() {
                "from" => Boundary::From,
                _ => Boundary::To,
            };
            let date = parse_full_date(c.get(2)?.as_str());
            return Some(PeriodLine::Labeled { boundary, date });
        }

        if let Some(boundary) = marker_token(line) {
            return Some(PeriodLine::Marker(boundary));
        }

        if self.pending.is_some() {
            if let Some(date) = parse_full_date(line) {
                return Some(PeriodLine::PendingDate(date));
            }
        }

        if labels.iter().any(|l| line_lower.contains(l.as_str())) {
            let (from, to) = parse_range(line);
            return Some(PeriodLine::Range { from, to });
        }

        None
    }

    pub fn apply(&mut self, event: PeriodLine) {
        match event {
            PeriodLine::Labeled { boundary, date } => {
                if let Some(date) = date {
                    self.record(boundary, date);
                }
                self.pending = None;
            }
            PeriodLine::Marker(boundary) => {
                if self.period.is_set(boundary) {
                    tracing::debug!("Ignoring '{boundary}' marker, boundary already resolved");
                } else {
                    self.pending = Some(boundary);
                }
            }
            PeriodLine::PendingDate(date) => {
                if let Some(boundary) = self.pending.take() {
                    self.record(boundary, date);
                }
            }
            PeriodLine::Range { from, to } => {
                if let Some(d) = from {
                    self.record(Boundary::From, d);
                }
                if let Some(d) = to {
                    self.record(Boundary::To, d);
                }
                self.pending = None;
            }
        }
    }

    /// Drop a pending marker whose date never showed up.
    pub fn abandon_pending(&mut self) {
        if let Some(boundary) = self.pending.take() {
            tracing::debug!("Abandoning pending '{boundary}' marker");
        }
    }

    fn record(&mut self, boundary: Boundary, date: NaiveDate) {
        if !self.period.set(boundary, date) && self.period.get(boundary) != Some(date) {
            tracing::debug!(
                "Ignoring later '{boundary}' date {date}, keeping {:?}",
                self.period.get(boundary)
            );
        }
    }
}

fn parse_range(line: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    if let Some(c) = re_slash_range().captures(line) {
        let from = c.get(1).and_then(|m| parse_slash_date(m.as_str()));
        let to = c.get(2).and_then(|m| parse_slash_date(m.as_str()));
        return (from, to);
    }
    if let Some(c) = re_named_range().captures(line) {
        let from = c.get(1).and_then(|m| parse_full_date(m.as_str()));
        let to = c.get(2).and_then(|m| parse_full_date(m.as_str()));
        return (from, to);
    }
    (None, None)
}
