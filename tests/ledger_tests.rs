// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use farmbook::engine::DateRange;
use farmbook::engine::ledger::{account_balance, account_ledger};
use farmbook::models::{InvoiceItem, Transaction, TransactionType};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: &str, date: &str, kind: TransactionType, account: &str, amount: &str) -> Transaction {
    let mut t = Transaction::new(day(date), kind, account, dec(amount)).unwrap();
    t.id = id.to_string();
    t
}

fn range(from: &str, to: &str) -> DateRange {
    DateRange::new(day(from), day(to)).unwrap()
}

#[test]
fn sale_then_receipt_nets_to_zero() {
    let txs = vec![
        tx("t1", "2025-01-02", TransactionType::Sale, "c1", "100"),
        tx("t2", "2025-01-03", TransactionType::Receipt, "c1", "100"),
    ];
    let view = account_ledger(&txs, Some("c1"), range("2025-01-01", "2025-01-31"));
    assert_eq!(view.opening_balance, Decimal::ZERO);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].debit, dec("100"));
    assert_eq!(view.rows[0].balance, dec("100"));
    assert_eq!(view.rows[1].credit, dec("100"));
    assert_eq!(view.closing_balance(), Decimal::ZERO);
}

#[test]
fn opening_folds_everything_before_the_range() {
    let txs = vec![
        tx("t1", "2024-12-01", TransactionType::Sale, "c1", "300"),
        tx("t2", "2024-12-15", TransactionType::Receipt, "c1", "120"),
        tx("t3", "2024-12-20", TransactionType::Sale, "other", "999"),
        tx("t4", "2025-01-05", TransactionType::Sale, "c1", "50"),
    ];
    let view = account_ledger(&txs, Some("c1"), range("2025-01-01", "2025-01-31"));
    assert_eq!(view.opening_balance, dec("180"));
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.closing_balance(), dec("230"));
}

#[test]
fn adjacent_ranges_chain_closing_into_opening() {
    let txs = vec![
        tx("t1", "2025-01-01", TransactionType::Purchase, "v1", "500"),
        tx("t2", "2025-01-08", TransactionType::Payment, "v1", "200"),
        tx("t3", "2025-01-10", TransactionType::Purchase, "v1", "75"),
        tx("t4", "2025-01-11", TransactionType::Payment, "v1", "375"),
        tx("t5", "2025-01-25", TransactionType::Purchase, "v1", "40"),
    ];
    let first = range("2025-01-01", "2025-01-10");
    let second = first.next_adjacent().unwrap();
    assert_eq!(second.start, day("2025-01-11"));
    assert_eq!(second.end, day("2025-01-20"));

    let a = account_ledger(&txs, Some("v1"), first);
    let b = account_ledger(&txs, Some("v1"), second);
    assert_eq!(a.closing_balance(), dec("-375"));
    assert_eq!(b.opening_balance, a.closing_balance());
    assert_eq!(b.closing_balance(), Decimal::ZERO);
}

#[test]
fn no_account_selected_gives_empty_view() {
    let txs = vec![tx("t1", "2025-01-02", TransactionType::Sale, "c1", "10")];
    let r = range("2025-01-01", "2025-01-31");
    assert_eq!(account_ledger(&txs, None, r).rows.len(), 0);
    let view = account_ledger(&txs, Some(""), r);
    assert!(view.rows.is_empty());
    assert_eq!(view.opening_balance, Decimal::ZERO);
}

#[test]
fn same_day_rows_keep_store_order() {
    let txs = vec![
        tx("a", "2025-01-05", TransactionType::Sale, "c1", "10"),
        tx("b", "2025-01-05", TransactionType::Receipt, "c1", "4"),
        tx("early", "2025-01-02", TransactionType::Sale, "c1", "1"),
    ];
    let view = account_ledger(&txs, Some("c1"), range("2025-01-01", "2025-01-31"));
    let ids: Vec<&str> = view.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["early", "a", "b"]);
    assert_eq!(view.rows[2].balance, dec("7"));
}

#[test]
fn end_day_is_inclusive() {
    let txs = vec![
        tx("t1", "2025-01-31", TransactionType::Sale, "c1", "25"),
        tx("t2", "2025-02-01", TransactionType::Sale, "c1", "25"),
    ];
    let view = account_ledger(&txs, Some("c1"), range("2025-01-01", "2025-01-31"));
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id, "t1");
}

#[test]
fn balance_uses_ledger_polarity() {
    let txs = vec![
        tx("t1", "2025-01-01", TransactionType::Deposit, "owner", "1000"),
        tx("t2", "2025-01-02", TransactionType::Withdrawal, "owner", "250"),
    ];
    assert_eq!(account_balance(&txs, "owner"), dec("-750"));
    assert_eq!(account_balance(&txs, "missing"), Decimal::ZERO);
}

#[test]
fn inverted_range_is_rejected() {
    assert!(DateRange::new(day("2025-02-01"), day("2025-01-01")).is_err());
}

#[test]
fn rows_without_notes_describe_their_items() {
    let items = vec![
        InvoiceItem::new("Eggs", dec("30"), dec("12")).unwrap(),
        InvoiceItem::new("Trays", dec("2"), dec("50")).unwrap(),
    ];
    let invoice =
        Transaction::with_items(day("2025-01-04"), TransactionType::Sale, "c1", items).unwrap();
    let noted = tx("t2", "2025-01-05", TransactionType::Receipt, "c1", "100")
        .with_notes(Some("Cash at gate".into()));
    let bare = tx("t3", "2025-01-06", TransactionType::Receipt, "c1", "10");

    let view = account_ledger(
        &[invoice, noted, bare],
        Some("c1"),
        range("2025-01-01", "2025-01-31"),
    );
    assert_eq!(view.rows[0].description(), "Eggs, Trays");
    assert_eq!(view.rows[1].description(), "Cash at gate");
    assert_eq!(view.rows[2].description(), "");
}
