use rust_decimal::Decimal;
use std::str::FromStr;

/// Whether a raw amount token ends with a credit indicator (`CR`, any case).
pub fn has_credit_marker(raw: &str) -> bool {
    let t = raw.trim_end();
    t.len() >= 2
        && t.get(t.len() - 2..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case("cr"))
}

/// Turn a printed amount such as `1,234.56CR` into a decimal.
///
/// Grouping commas, whitespace and a trailing credit indicator are removed.
/// Empty or unparseable input yields zero: a bad amount degrades the record,
/// it never aborts the parse.
pub fn normalize_amount(raw: &str) -> Decimal {
    let mut clean: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if has_credit_marker(&clean) {
        clean.truncate(clean.len() - 2);
    }
    Decimal::from_str(&clean).unwrap_or(Decimal::ZERO)
}
