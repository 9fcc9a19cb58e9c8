// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use farmbook::engine::DateRange;
use farmbook::engine::cashflow::{
    TREND_DAYS, TREND_SMA_PERIOD, cash_in_hand, cash_summary, daily_performance, daily_trend, sma,
};
use farmbook::models::{EggCollection, Transaction, TransactionType};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(date: &str, kind: TransactionType, amount: i64) -> Transaction {
    Transaction::new(day(date), kind, "acct", Decimal::from(amount)).unwrap()
}

#[test]
fn sma_is_left_truncated() {
    let values: Vec<Decimal> = (1..=30).map(Decimal::from).collect();
    let out = sma(&values, 5);
    assert_eq!(out.len(), 30);
    assert_eq!(out[0], Decimal::from(1));
    assert_eq!(out[1], "1.5".parse::<Decimal>().unwrap());
    assert_eq!(out[4], Decimal::from(3));
    assert_eq!(out[29], Decimal::from(28));
}

#[test]
fn sma_handles_degenerate_inputs() {
    assert!(sma(&[], 5).is_empty());
    let values = vec![Decimal::from(4), Decimal::from(8)];
    assert_eq!(sma(&values, 0), values);
}

#[test]
fn withdrawals_are_reported_apart() {
    let txs = vec![
        tx("2024-12-31", TransactionType::Deposit, 1000),
        tx("2025-01-01", TransactionType::Sale, 200),
        tx("2025-01-01", TransactionType::Receipt, 50),
        tx("2025-01-01", TransactionType::Expense, 30),
        tx("2025-01-01", TransactionType::Purchase, 70),
        tx("2025-01-01", TransactionType::Payment, 10),
        tx("2025-01-01", TransactionType::Withdrawal, 100),
        tx("2025-01-02", TransactionType::Sale, 5),
    ];
    let summary = cash_summary(&txs, DateRange::day(day("2025-01-01")));
    assert_eq!(summary.opening, Decimal::from(1000));
    assert_eq!(summary.cash_in, Decimal::from(250));
    assert_eq!(summary.cash_out, Decimal::from(110));
    assert_eq!(summary.withdrawn, Decimal::from(100));
    assert_eq!(summary.closing, Decimal::from(1040));
    assert_eq!(cash_in_hand(&txs), Decimal::from(1045));
}

#[test]
fn trend_covers_thirty_days_and_counts_withdrawals_as_expense() {
    let end = day("2025-03-31");
    let txs = vec![
        tx("2025-03-31", TransactionType::Sale, 100),
        tx("2025-03-31", TransactionType::Withdrawal, 40),
        tx("2025-03-02", TransactionType::Expense, 10),
        tx("2025-03-01", TransactionType::Sale, 999),
    ];
    let trend = daily_trend(&txs, end, TREND_DAYS, TREND_SMA_PERIOD);
    assert_eq!(trend.len(), 30);
    assert_eq!(trend[0].date, day("2025-03-02"));
    assert_eq!(trend[0].expense, Decimal::from(10));
    assert_eq!(trend[0].expense_ma, Decimal::from(10));
    assert_eq!(trend[0].income, Decimal::ZERO);

    let last = trend.last().unwrap();
    assert_eq!(last.date, end);
    assert_eq!(last.income, Decimal::from(100));
    assert_eq!(last.expense, Decimal::from(40));
    assert_eq!(last.income_ma, Decimal::from(20));
}

#[test]
fn performance_is_one_point_per_day() {
    let collections = vec![
        EggCollection::new(day("2025-01-07"), 120, 3).unwrap(),
        EggCollection::new(day("2025-01-07"), 30, 0).unwrap(),
    ];
    let txs = vec![
        tx("2025-01-07", TransactionType::Sale, 80),
        tx("2025-01-07", TransactionType::Receipt, 500),
    ];
    let perf = daily_performance(&collections, &txs, day("2025-01-07"), 7);
    assert_eq!(perf.len(), 7);
    assert_eq!(perf[0].date, day("2025-01-01"));
    assert_eq!(perf[6].collected, 150);
    assert_eq!(perf[6].revenue, Decimal::from(80));
    assert_eq!(perf[0].revenue, Decimal::ZERO);
}
