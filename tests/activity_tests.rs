// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use farmbook::engine::activity::{
    LOOKBACK_DAYS, classify_customers, insight_snapshot, window_start,
};
use farmbook::models::{Account, AccountType, EggCollection, Transaction, TransactionType};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn account(id: &str, name: &str, kind: AccountType) -> Account {
    let mut a = Account::new(name, kind).unwrap();
    a.id = id.to_string();
    a
}

fn sale(date: &str, account: &str, amount: i64) -> Transaction {
    Transaction::new(day(date), TransactionType::Sale, account, Decimal::from(amount)).unwrap()
}

fn fixture() -> (Vec<Account>, Vec<Transaction>) {
    let mut archived = account("c3", "Gone", AccountType::Customer);
    archived.archived = true;
    let accounts = vec![
        account("c1", "Ali", AccountType::Customer),
        account("c2", "Bilal", AccountType::Customer),
        archived,
        account("v1", "Feed Co", AccountType::Vendor),
        account("c4", "Dawood", AccountType::Customer),
    ];
    let txs = vec![
        sale("2025-03-01", "c1", 300),
        sale("2025-01-15", "c1", 50),
        sale("2025-02-28", "c2", 200),
        sale("2025-03-10", "c3", 100),
        Transaction::new(day("2025-03-20"), TransactionType::Receipt, "c2", Decimal::from(200))
            .unwrap(),
    ];
    (accounts, txs)
}

#[test]
fn window_boundary_is_inclusive() {
    let today = day("2025-03-31");
    let start = window_start(today, LOOKBACK_DAYS);
    assert_eq!(start, day("2025-03-01"));

    let (accounts, txs) = fixture();
    let customers = classify_customers(&accounts, &txs, start);
    let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ali", "Bilal", "Dawood"]);

    assert!(customers[0].active);
    assert_eq!(customers[0].last_sale, Some(day("2025-03-01")));
    // A receipt inside the window does not count as a purchase.
    assert!(!customers[1].active);
    assert_eq!(customers[1].last_sale, Some(day("2025-02-28")));
    assert!(!customers[2].active);
    assert_eq!(customers[2].last_sale, None);
}

#[test]
fn snapshot_summarises_the_lookback() {
    let (accounts, txs) = fixture();
    let collections = vec![
        EggCollection::new(day("2025-03-01"), 100, 2).unwrap(),
        EggCollection::new(day("2025-03-15"), 200, 3).unwrap(),
        EggCollection::new(day("2025-03-31"), 300, 5).unwrap(),
        EggCollection::new(day("2025-02-27"), 1000, 100).unwrap(),
    ];
    let snap = insight_snapshot(&accounts, &txs, &collections, day("2025-03-31"));
    assert_eq!(snap.since, day("2025-03-01"));
    assert_eq!(snap.total_collected, 600);
    assert_eq!(snap.total_wasted, 10);
    assert_eq!(snap.avg_daily_collection, Decimal::from(200));
    assert_eq!(snap.waste_rate_pct.round_dp(2), "1.67".parse::<Decimal>().unwrap());
    // The archived customer's sale still counts towards revenue.
    assert_eq!(snap.total_revenue, Decimal::from(400));
    assert_eq!(snap.active_customers, 1);
    assert_eq!(snap.inactive_customers, ["Bilal", "Dawood"]);
}

#[test]
fn snapshot_with_no_data_avoids_division_by_zero() {
    let snap = insight_snapshot(&[], &[], &[], day("2025-03-31"));
    assert_eq!(snap.avg_daily_collection, Decimal::ZERO);
    assert_eq!(snap.waste_rate_pct, Decimal::ZERO);
    assert!(snap.inactive_customers.is_empty());
}
