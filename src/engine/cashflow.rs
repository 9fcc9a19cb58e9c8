// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::DateRange;
use super::polarity::{CashDirection, cash_direction, cash_effect};
use crate::models::{EggCollection, Transaction, TransactionType};

/// Trailing window of the dashboard trend chart, in days.
pub const TREND_DAYS: u64 = 30;
/// Smoothing window of the trend chart, in days.
pub const TREND_SMA_PERIOD: usize = 5;
/// Window of the report's performance chart, in days.
pub const PERFORMANCE_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CashSummary {
    pub opening: Decimal,
    #[serde(rename = "in")]
    pub cash_in: Decimal,
    #[serde(rename = "out")]
    pub cash_out: Decimal,
    pub withdrawn: Decimal,
    pub closing: Decimal,
}

/// Global cash position over `range`: everything before the range folds into
/// the opening figure, withdrawals are kept apart from operating outflow.
pub fn cash_summary(transactions: &[Transaction], range: DateRange) -> CashSummary {
    let mut summary = CashSummary::default();
    for t in transactions {
        if range.is_before(t.date) {
            summary.opening += cash_effect(t.r#type, t.amount);
        } else if range.contains(t.date) {
            match cash_direction(t.r#type) {
                CashDirection::Inflow => summary.cash_in += t.amount,
                CashDirection::Outflow => summary.cash_out += t.amount,
                CashDirection::Withdrawal => summary.withdrawn += t.amount,
            }
        }
    }
    summary.closing = summary.opening + summary.cash_in - summary.cash_out - summary.withdrawn;
    summary
}

pub fn cash_in_hand(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(|t| cash_effect(t.r#type, t.amount))
        .sum()
}

/// Simple moving average, left-truncated at the start of the series: point
/// `i` averages `values[max(0, i + 1 - period)..=i]`.
pub fn sma(values: &[Decimal], period: usize) -> Vec<Decimal> {
    let period = period.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(period);
            let window = &values[start..=i];
            let total: Decimal = window.iter().sum();
            total / Decimal::from(window.len())
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub income_ma: Decimal,
    pub expense_ma: Decimal,
}

fn days_of(range: DateRange) -> Vec<NaiveDate> {
    range.start.iter_days().take_while(|d| *d <= range.end).collect()
}

/// Per-day income and expense for the `days` days ending at `end`, each
/// smoothed with a `period`-day SMA. Expense includes withdrawals.
pub fn daily_trend(
    transactions: &[Transaction],
    end: NaiveDate,
    days: u64,
    period: usize,
) -> Vec<TrendPoint> {
    let range = DateRange::trailing(end, days);
    let mut per_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = days_of(range)
        .into_iter()
        .map(|d| (d, (Decimal::ZERO, Decimal::ZERO)))
        .collect();

    for t in transactions.iter().filter(|t| range.contains(t.date)) {
        if let Some(entry) = per_day.get_mut(&t.date) {
            match cash_direction(t.r#type) {
                CashDirection::Inflow => entry.0 += t.amount,
                CashDirection::Outflow | CashDirection::Withdrawal => entry.1 += t.amount,
            }
        }
    }

    let incomes: Vec<Decimal> = per_day.values().map(|v| v.0).collect();
    let expenses: Vec<Decimal> = per_day.values().map(|v| v.1).collect();
    let income_ma = sma(&incomes, period);
    let expense_ma = sma(&expenses, period);

    per_day
        .keys()
        .enumerate()
        .map(|(i, date)| TrendPoint {
            date: *date,
            income: incomes[i],
            expense: expenses[i],
            income_ma: income_ma[i],
            expense_ma: expense_ma[i],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub collected: i64,
    pub revenue: Decimal,
}

/// Eggs collected and sales revenue per day for the `days` days ending at `end`.
pub fn daily_performance(
    collections: &[EggCollection],
    transactions: &[Transaction],
    end: NaiveDate,
    days: u64,
) -> Vec<DailyPerformance> {
    let range = DateRange::trailing(end, days);
    days_of(range)
        .into_iter()
        .map(|date| DailyPerformance {
            date,
            collected: collections
                .iter()
                .filter(|c| c.date == date)
                .map(|c| c.collected)
                .sum(),
            revenue: transactions
                .iter()
                .filter(|t| t.r#type == TransactionType::Sale && t.date == date)
                .map(|t| t.amount)
                .sum(),
        })
        .collect()
}

