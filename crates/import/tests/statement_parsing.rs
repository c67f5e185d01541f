use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use folio_core::{Money, Side, TotalsSummarizer};
use folio_import::{
    normalize_amount, parse_document, ErrorReport, ParseOptions, ParsedStatement,
    StatementParser, StatementProfile,
};
use folio_pdf::{DocumentError, MockSource, TextFileSource};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(s: &str) -> Money {
    Money::from_decimal(Decimal::from_str(s).unwrap())
}

/// Two pages of an Emirates Islamic card statement as text extraction
/// produces them: bare period markers (one in Arabic) with their dates a few
/// lines further down, boilerplate interleaved, a column header and a
/// wrapped description.
const EI_PAGES: [&str; 2] = [
    "Emirates Islamic Credit Card Statement
From
Primary Card No 4567 XXXX XXXX 1234
15th Dec 2024
Minimum Payment Due AED 250.00
Card Limit AED 20,000.00
Posting Date Transaction Date Description Amount (AED)
16 DEC 15 DEC CARREFOUR CITY CENTRE DEIRA 245.50
PURCHASE AT
SOME STORE DUBAI ARE
20 DEC 19 DEC POS 1,234.56
",
    "ىلإ
Cashback earned this month 12.00
14th Jan 2025
03 JAN 02 JAN PAYMENT RECEIVED - THANK YOU 2,000.00
05 JAN 05 JAN AMAZON.AE REFUND 99.00CR
14 AUG 14 AUG LATE POSTED ITEM 10.00
Profit/Other Charges 0.00
",
];

fn ei_parser() -> StatementParser {
    StatementParser::builtin("emirates_islamic").unwrap()
}

fn parse_ei() -> ParsedStatement {
    parse_document(
        &MockSource::with_pages(EI_PAGES),
        Path::new("ei.pdf"),
        Some("secret"),
        &ei_parser(),
        &TotalsSummarizer,
    )
    .unwrap()
}

// ── Emirates Islamic ──────────────────────────────────────────────────────────

#[test]
fn ei_period_resolved_across_pages() {
    let parsed = parse_ei();
    assert_eq!(parsed.from_date, Some(date(2024, 12, 15)));
    assert_eq!(parsed.to_date, Some(date(2025, 1, 14)));
}

#[test]
fn ei_transactions() {
    let parsed = parse_ei();
    let t = &parsed.transactions;
    assert_eq!(t.len(), 5);

    // The title and column header were buffered, then discarded together.
    assert_eq!(t[0].description, "CARREFOUR CITY CENTRE DEIRA");
    assert_eq!(t[0].transaction_date, date(2024, 12, 15));
    assert_eq!(t[0].debit, money("245.50"));

    assert_eq!(t[1].description, "PURCHASE AT SOME STORE DUBAI ARE POS");
    assert_eq!(t[1].amount, money("1234.56"));
    assert_eq!(t[1].transaction_date, date(2024, 12, 19));

    assert_eq!(t[2].side(), Side::Credit);
    assert_eq!(t[2].transaction_date, date(2025, 1, 2));
    assert_eq!(t[3].side(), Side::Credit);
    assert_eq!(t[3].credit, money("99.00"));
    assert_eq!(t[4].side(), Side::Debit);
    assert_eq!(t[4].transaction_date, date(2024, 8, 14));
}

#[test]
fn boilerplate_never_leaks() {
    let parsed = parse_ei();
    for t in &parsed.transactions {
        let low = t.description.to_lowercase();
        assert!(!low.contains("minimum payment due"), "{}", t.description);
        assert!(!low.contains("cashback"), "{}", t.description);
        assert!(!low.contains("card limit"), "{}", t.description);
    }
}

#[test]
fn debit_credit_invariant_holds() {
    for t in parse_ei().transactions {
        match t.side() {
            Side::Debit => {
                assert!(t.credit.is_zero());
                assert_eq!(t.debit, t.amount);
            }
            Side::Credit => {
                assert!(t.debit.is_zero());
                assert_eq!(t.credit, t.amount);
            }
        }
        assert!(t.debit.is_zero() != t.credit.is_zero());
    }
}

#[test]
fn summary_matches_transactions() {
    let parsed = parse_ei();
    assert_eq!(parsed.summary.count, parsed.transactions.len());
    assert_eq!(parsed.summary.total_credit, money("2099.00"));
    assert_eq!(parsed.summary.total_debit, money("1490.06"));
}

// ── Year resolution ───────────────────────────────────────────────────────────

#[test]
fn year_rolls_back_across_new_year() {
    let text = "From: 15th Dec 2024\nTo: 14th Jan 2025\n14 AUG 14 AUG STORE 10.00\n";
    let out = ei_parser().parse_text(text);
    assert_eq!(out.transactions[0].transaction_date, date(2024, 8, 14));
}

#[test]
fn year_kept_within_one_year() {
    let text = "From: 1st Jul 2025\nTo: 31st Jul 2025\n14 JUL 14 JUL STORE 10.00\n";
    let out = ei_parser().parse_text(text);
    assert_eq!(out.transactions[0].transaction_date, date(2025, 7, 14));
}

#[test]
fn default_year_applies_without_period() {
    let parser = ei_parser().with_options(ParseOptions { default_year: Some(2019) });
    let out = parser.parse_text("14 JUL 14 JUL STORE 10.00\n");
    assert_eq!(out.transactions[0].transaction_date, date(2019, 7, 14));
}

// ── Period markers ────────────────────────────────────────────────────────────

#[test]
fn bare_marker_skips_boilerplate_and_noise() {
    let text = "To\nMinimum Payment Due 250.00\nCustomer Name\n14th Jan 2025\n";
    let out = ei_parser().parse_text(text);
    assert_eq!(out.period.to_date, Some(date(2025, 1, 14)));
}

#[test]
fn marker_with_colon_and_arabic_from() {
    let text = "من\n15th Dec 2024\nTo:\n14 January 2025\n";
    let out = ei_parser().parse_text(text);
    assert_eq!(out.period.from_date, Some(date(2024, 12, 15)));
    assert_eq!(out.period.to_date, Some(date(2025, 1, 14)));
}

// ── RAKBANK ───────────────────────────────────────────────────────────────────

const RAK_TEXT: &str = "YOUR CREDIT CARD STATEMENT
Statement Period: 15/08/2025 TO 14/09/2025
Opening Balance AED 1,000.00
20/08/2025 CARREFOUR MOE AED 250.00 - 1,250.00
AMAZON.COM
SEATTLE WA
21/08/2025 USD 100.00 3.6725 367.25
02/09/2025 CREDIT CARD PAYMENT AED 1,000.00 - 617.25
PRODUCT NAME TITANIUM
Page[1 of 2]\x0cCard Number 5555 XXXX XXXX 1234
10/09/2025 NETFLIX AED 39.00 - 656.25
12/09/2025 TALABAT REFUND AED 20.00 CR - 636.25
Closing Balance AED 636.25
";

#[test]
fn rakbank_statement() {
    let parser = StatementParser::builtin("rakbank").unwrap();
    let out = parser.parse_text(RAK_TEXT);

    assert_eq!(out.period.from_date, Some(date(2025, 8, 15)));
    assert_eq!(out.period.to_date, Some(date(2025, 9, 14)));

    let t = &out.transactions;
    assert_eq!(t.len(), 5);

    assert_eq!(t[0].description, "CARREFOUR MOE");
    assert_eq!(t[0].balance, Some(money("1250.00")));
    assert_eq!(t[0].side(), Side::Debit);

    assert_eq!(t[1].description, "AMAZON.COM SEATTLE WA");
    assert_eq!(t[1].debit, money("367.25"));
    let fx = t[1].fx.as_ref().unwrap();
    assert_eq!(fx.fx_currency, "USD");
    assert_eq!(fx.fx_rate, Decimal::from_str("3.6725").unwrap());

    assert_eq!(t[2].side(), Side::Credit);
    assert_eq!(t[2].transaction_date, date(2025, 9, 2));

    // The next page's card-number header is discarded, not attached.
    assert_eq!(t[3].description, "NETFLIX");
    assert_eq!(t[4].side(), Side::Credit);
    assert_eq!(t[4].credit, money("20.00"));
}

#[test]
fn rakbank_json_output_shape() {
    let parser = StatementParser::builtin("rakbank").unwrap();
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(RAK_TEXT.as_bytes()).unwrap();

    let parsed =
        parse_document(&TextFileSource, file.path(), None, &parser, &TotalsSummarizer).unwrap();
    let v = serde_json::to_value(&parsed).unwrap();

    assert_eq!(v["bank"], "RAKBANK");
    assert_eq!(v["card_type"], "credit");
    assert_eq!(v["from_date"], "2025-08-15");
    assert_eq!(v["to_date"], "2025-09-14");
    assert_eq!(v["transactions"][0]["transaction_date"], "2025-08-20");
    assert!(v["transactions"][0]["amount"].is_number());
    assert!(v["summary"]["total_debit"].is_number());
    assert_eq!(v["summary"]["count"], 5);
}

// ── Custom profile ────────────────────────────────────────────────────────────

#[test]
fn toml_profile_drives_the_engine() {
    let profile = StatementProfile::from_toml(
        r#"
        id = "acme"
        bank = "ACME Bank"
        card_type = "debit"
        currency = "USD"
        date_style = "day_month_name"
        shapes = ["single_amount"]
        skip_keywords = ["previous balance"]
        credit_keywords = ["deposit"]
        "#,
    )
    .unwrap();
    let parser = StatementParser::new(profile).unwrap();
    let out = parser.parse_text(
        "From: 1st Mar 2024\nTo: 31st Mar 2024\nPrevious Balance 12.00\n05 MAR PAYROLL DEPOSIT 3,000.00\n06 MAR COFFEE 4.50\n",
    );
    assert_eq!(out.transactions.len(), 2);
    assert_eq!(out.transactions[0].side(), Side::Credit);
    assert_eq!(out.transactions[0].bank, "ACME Bank");
    assert_eq!(out.transactions[1].transaction_date, date(2024, 3, 6));
}

#[test]
fn one_date_rows_with_numeric_descriptions() {
    let profile = StatementProfile::from_toml(
        r#"
        id = "acme"
        bank = "ACME Bank"
        card_type = "debit"
        currency = "USD"
        date_style = "day_month_name"
        shapes = ["single_amount"]
        "#,
    )
    .unwrap();
    let out = StatementParser::new(profile).unwrap().parse_text(
        "From: 1st Mar 2024\nTo: 31st Mar 2024\n05 MAR 10 PCS WIDGETS 10.00\n06 MAR COFFEE 4.50\n",
    );
    let t = &out.transactions;
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].description, "10 PCS WIDGETS");
    assert_eq!(t[0].transaction_date, date(2024, 3, 5));
    assert_eq!(t[1].description, "COFFEE");
    assert_eq!(t[1].transaction_date, date(2024, 3, 6));
}

#[test]
fn ei_row_with_hours_in_merchant_name() {
    let out = ei_parser().parse_text("From: 1st Jul 2025\nTo: 31st Jul 2025\n20 JUL 24 HRS PHARMACY 10.00\n");
    assert_eq!(out.transactions.len(), 1);
    assert_eq!(out.transactions[0].description, "24 HRS PHARMACY");
    assert_eq!(out.transactions[0].transaction_date, date(2025, 7, 20));
}

// ── Failures and degraded input ───────────────────────────────────────────────

#[test]
fn document_failure_is_the_result() {
    let err = parse_document(
        &MockSource::wrong_password(),
        Path::new("ei.pdf"),
        Some("wrong"),
        &ei_parser(),
        &TotalsSummarizer,
    )
    .unwrap_err();
    assert!(matches!(err, DocumentError::IncorrectPassword));
    let v = serde_json::to_value(ErrorReport::from(&err)).unwrap();
    assert_eq!(v, serde_json::json!({ "error": "Incorrect password" }));
    assert!(v.get("transactions").is_none());
}

#[test]
fn amount_cleaning() {
    assert_eq!(normalize_amount("1,234.56CR"), Decimal::from_str("1234.56").unwrap());
    assert_eq!(normalize_amount(""), Decimal::ZERO);
    assert_eq!(normalize_amount("n/a"), Decimal::ZERO);
}

#[test]
fn repeated_parses_are_identical() {
    let a = parse_ei();
    let b = parse_ei();
    assert_eq!(a, b);
}
