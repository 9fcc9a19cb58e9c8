// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, AccountType, EggCollection, Transaction, TransactionType};

/// Lookback used for customer activity and the insight snapshot.
pub const LOOKBACK_DAYS: u64 = 30;

/// First day inside a lookback of `days` days ending at `today`.
pub fn window_start(today: NaiveDate, days: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerActivity {
    pub account_id: String,
    pub name: String,
    pub last_sale: Option<NaiveDate>,
    pub active: bool,
}

fn last_sale(transactions: &[Transaction], account_id: &str) -> Option<NaiveDate> {
    transactions
        .iter()
        .filter(|t| t.account_id == account_id && t.r#type == TransactionType::Sale)
        .map(|t| t.date)
        .max()
}

/// Classifies every non-archived customer. A customer is active when its most
/// recent sale falls on or after the window start.
pub fn classify_customers(
    accounts: &[Account],
    transactions: &[Transaction],
    window_start: NaiveDate,
) -> Vec<CustomerActivity> {
    accounts
        .iter()
        .filter(|a| a.r#type == AccountType::Customer && !a.archived)
        .map(|a| {
            let last_sale = last_sale(transactions, &a.id);
            CustomerActivity {
                account_id: a.id.clone(),
                name: a.name.clone(),
                last_sale,
                active: last_sale.is_some_and(|d| d >= window_start),
            }
        })
        .collect()
}

/// Numeric snapshot handed to the insight service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSnapshot {
    pub since: NaiveDate,
    pub total_collected: i64,
    pub total_wasted: i64,
    pub avg_daily_collection: Decimal,
    pub waste_rate_pct: Decimal,
    pub total_revenue: Decimal,
    pub active_customers: usize,
    pub inactive_customers: Vec<String>,
}

pub fn insight_snapshot(
    accounts: &[Account],
    transactions: &[Transaction],
    collections: &[EggCollection],
    today: NaiveDate,
) -> InsightSnapshot {
    let since = window_start(today, LOOKBACK_DAYS);

    let recent: Vec<&EggCollection> = collections.iter().filter(|c| c.date >= since).collect();
    let total_collected: i64 = recent.iter().map(|c| c.collected).sum();
    let total_wasted: i64 = recent.iter().map(|c| c.wasted).sum();
    let avg_daily_collection =
        Decimal::from(total_collected) / Decimal::from(recent.len().max(1));
    let waste_rate_pct = Decimal::from(total_wasted) / Decimal::from(total_collected.max(1))
        * Decimal::ONE_HUNDRED;

    let total_revenue = transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Sale && t.date >= since)
        .map(|t| t.amount)
        .sum();

    let customers = classify_customers(accounts, transactions, since);
    let active_customers = customers.iter().filter(|c| c.active).count();
    let inactive_customers = customers
        .into_iter()
        .filter(|c| !c.active)
        .map(|c| c.name)
        .collect();

    InsightSnapshot {
        since,
        total_collected,
        total_wasted,
        avg_daily_collection,
        waste_rate_pct,
        total_revenue,
        active_customers,
        inactive_customers,
    }
}
