use folio_core::{
    Boundary, ForeignExchange, Money, Side, StatementPeriod, StatementTransaction,
};
use folio_pdf::{Page, TextFileSource};
use rust_decimal::Decimal;

use crate::amount::normalize_amount;
use crate::buffer::DescriptionBuffer;
use crate::filter::LineFilter;
use crate::matcher::{LineMatch, LineMatcher};
use crate::period::{PeriodLine, PeriodTracker};
use crate::profile::{ProfileError, StatementProfile};
use crate::year::{self, LineDate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Year for day/month dates when the statement period never shows up.
    /// Defaults to the current year.
    pub default_year: Option<i32>,
}

/// What a single line means. Produced by [`StatementParser::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Boilerplate,
    Period(PeriodLine),
    Transaction(LineMatch<'a>),
    Unclassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    AwaitingRangeDate(Boundary),
}

/// A transaction read off a line whose date may still lack a year.
#[derive(Debug, Clone)]
struct Draft {
    date: LineDate,
    description: String,
    amount: Decimal,
    side: Side,
    balance: Option<Decimal>,
    fx: Option<ForeignExchange>,
    page: usize,
}

/// Mutable state of one parse. Built fresh for every call.
#[derive(Debug, Default)]
pub struct ParserState {
    tracker: PeriodTracker,
    buffer: DescriptionBuffer,
    drafts: Vec<Draft>,
    page: usize,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan_state(&self) -> ScanState {
        match self.tracker.pending() {
            Some(boundary) => ScanState::AwaitingRangeDate(boundary),
            None => ScanState::Scanning,
        }
    }

    pub fn period(&self) -> StatementPeriod {
        self.tracker.period()
    }

    pub fn buffered_lines(&self) -> usize {
        self.buffer.len()
    }

    /// Drafts assembled so far.
    pub fn transaction_count(&self) -> usize {
        self.drafts.len()
    }

    fn start_page(&mut self, number: usize) {
        if !self.buffer.is_empty() {
            tracing::debug!(
                "Dropping {} unattached line(s) at end of page {}",
                self.buffer.len(),
                self.page
            );
        }
        self.buffer.clear();
        self.page = number;
    }
}

/// Transactions and period read from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub transactions: Vec<StatementTransaction>,
    pub period: StatementPeriod,
}

/// A compiled institution profile. Immutable, so one parser can serve any
/// number of parses, concurrently if need be.
#[derive(Debug, Clone)]
pub struct StatementParser {
    profile: StatementProfile,
    filter: LineFilter,
    matcher: LineMatcher,
    drop_hints: Vec<String>,
    credit_keywords: Vec<String>,
    period_labels: Vec<String>,
    options: ParseOptions,
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl StatementParser {
    pub fn new(profile: StatementProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        Ok(Self {
            filter: LineFilter::new(&profile.skip_keywords),
            matcher: LineMatcher::new(&profile)?,
            drop_hints: lowercase_all(&profile.drop_hints),
            credit_keywords: lowercase_all(&profile.credit_keywords),
            period_labels: lowercase_all(&profile.period_labels),
            options: ParseOptions::default(),
            profile,
        })
    }

    pub fn builtin(id: &str) -> Result<Self, ProfileError> {
        Self::new(StatementProfile::builtin(id)?)
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn profile(&self) -> &StatementProfile {
        &self.profile
    }

    /// Classify one trimmed, non-empty line against the current state.
    /// Order: boilerplate, period information, transaction shapes.
    pub fn classify<'a>(&self, state: &ParserState, line: &'a str) -> LineClass<'a> {
        let lower = line.to_lowercase();
        if self.filter.is_boilerplate(&lower) {
            return LineClass::Boilerplate;
        }
        if let Some(p) = state.tracker.classify(line, &lower, &self.period_labels) {
            return LineClass::Period(p);
        }
        match self.matcher.match_line(line) {
            Some(m) => LineClass::Transaction(m),
            None => LineClass::Unclassified,
        }
    }

    /// Run the state machine over one line.
    pub fn step(&self, state: &mut ParserState, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        match self.classify(state, line) {
            LineClass::Boilerplate => {}
            LineClass::Period(p) => state.tracker.apply(p),
            LineClass::Transaction(m) => {
                state.tracker.abandon_pending();
                let draft = self.assemble(state, m);
                state.drafts.push(draft);
            }
            LineClass::Unclassified => state.buffer.push(line),
        }
    }

    fn assemble(&self, state: &mut ParserState, m: LineMatch<'_>) -> Draft {
        let prefix = state.buffer.take(&self.drop_hints);
        let description = [prefix.as_deref(), m.description]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let lower = description.to_lowercase();
        let keyword_credit = self.credit_keywords.iter().any(|k| lower.contains(k.as_str()));
        let side = if m.has_credit_marker() || keyword_credit {
            Side::Credit
        } else {
            Side::Debit
        };

        let fx = m.fx.map(|f| ForeignExchange {
            fx_currency: f.currency.to_uppercase(),
            fx_amount: normalize_amount(f.amount),
            fx_rate: normalize_amount(f.rate),
        });

        Draft {
            date: m.date,
            description,
            amount: normalize_amount(m.amount),
            side,
            balance: m.balance.map(normalize_amount),
            fx,
            page: state.page,
        }
    }

    /// Resolve years and build the final records.
    pub fn finish(&self, state: ParserState) -> Extraction {
        let period = state.tracker.period();
        let fallback = year::fallback_year(&period, self.options.default_year);
        if period.range().is_none() && !state.drafts.is_empty() {
            tracing::debug!("Statement period incomplete ({period:?}), fallback year {fallback}");
        }

        let mut transactions = Vec::with_capacity(state.drafts.len());
        for draft in state.drafts {
            let Some(date) = year::resolve(draft.date, &period, fallback) else {
                tracing::warn!(
                    "Dropping transaction on page {} with impossible date {:?}: {}",
                    draft.page,
                    draft.date,
                    draft.description
                );
                continue;
            };
            if let Some(range) = period.range() {
                if !range.contains(date) {
                    tracing::debug!("Transaction date {date} outside statement period {range}");
                }
            }

            let mut tx = StatementTransaction::new(
                date,
                draft.description,
                Money::from_decimal(draft.amount),
                draft.side,
                self.profile.bank.as_str(),
                self.profile.card_type,
            );
            if let Some(balance) = draft.balance {
                tx = tx.with_balance(Money::from_decimal(balance));
            }
            if let Some(fx) = draft.fx {
                tx = tx.with_fx(fx);
            }
            transactions.push(tx);
        }

        tracing::info!(
            "Parsed {} transaction(s) for {} (from {:?} to {:?})",
            transactions.len(),
            self.profile.bank,
            period.from_date,
            period.to_date
        );
        Extraction { transactions, period }
    }

    /// Walk all pages in order, lines in order.
    pub fn parse_pages(&self, pages: &[Page]) -> Extraction {
        let mut state = ParserState::new();
        for page in pages {
            state.start_page(page.number);
            for line in page.text.lines() {
                self.step(&mut state, line);
            }
        }
        self.finish(state)
    }

    /// Convenience for already-extracted text; form feeds separate pages.
    pub fn parse_text(&self, text: &str) -> Extraction {
        self.parse_pages(&TextFileSource::split_pages(text))
    }
}
