// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::DateRange;
use super::cashflow::{
    CashSummary, DailyPerformance, PERFORMANCE_DAYS, TREND_DAYS, TREND_SMA_PERIOD, TrendPoint,
    cash_summary, daily_performance, daily_trend,
};
use super::inventory::{EggStock, FeedStock, egg_stock, feed_on_hand, feed_stock};
use crate::models::{FarmData, TransactionType};

/// Everything an export collaborator needs for one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub range: DateRange,
    pub eggs: EggStock,
    pub feed: FeedStock,
    pub cash: CashSummary,
    pub sales_revenue: Decimal,
    pub performance: Vec<DailyPerformance>,
}

pub fn build_report(data: &FarmData, range: DateRange) -> ReportSnapshot {
    let sales_revenue = data
        .transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Sale && range.contains(t.date))
        .map(|t| t.amount)
        .sum();
    ReportSnapshot {
        range,
        eggs: egg_stock(&data.egg_collections, &data.transactions, range),
        feed: feed_stock(&data.feed_transactions, range),
        cash: cash_summary(&data.transactions, range),
        sales_revenue,
        performance: daily_performance(
            &data.egg_collections,
            &data.transactions,
            range.end,
            PERFORMANCE_DAYS,
        ),
    }
}

/// Single-day view shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub day: NaiveDate,
    pub eggs: EggStock,
    pub feed: FeedStock,
    pub feed_on_hand: Decimal,
    pub cash: CashSummary,
    pub trend: Vec<TrendPoint>,
}

pub fn build_dashboard(data: &FarmData, day: NaiveDate) -> DashboardSnapshot {
    let today = DateRange::day(day);
    DashboardSnapshot {
        day,
        eggs: egg_stock(&data.egg_collections, &data.transactions, today),
        feed: feed_stock(&data.feed_transactions, today),
        feed_on_hand: feed_on_hand(&data.feed_transactions),
        cash: cash_summary(&data.transactions, today),
        trend: daily_trend(&data.transactions, day, TREND_DAYS, TREND_SMA_PERIOD),
    }
}

impl ReportSnapshot {
    /// Plain-text summary in the shape of the share message.
    pub fn share_text(&self, farm_name: &str, currency: &str) -> String {
        let money = |d: Decimal| crate::utils::fmt_money(&d, currency);
        let mut out = format!(
            "*{} Report ({} to {})*\n\n",
            farm_name, self.range.start, self.range.end
        );
        out.push_str(&format!(
            "*Egg Production*\nOpening: {}\nCollected: {}\nWasted: {}\nSold: {}\nClosing Stock: {}\n\n",
            self.eggs.opening, self.eggs.collected, self.eggs.wasted, self.eggs.sold, self.eggs.closing
        ));
        out.push_str(&format!(
            "*Feed & Nutrition*\nPurchased: {}kg\nConsumed: {}kg\nInventory: {}kg\n\n",
            self.feed.purchased, self.feed.consumed, self.feed.closing
        ));
        out.push_str(&format!(
            "*Cash Flow*\nOpening Cash: {}\nCash In: {}\nCash Out: {}\nWithdrawals: {}\nClosing Cash: {}",
            money(self.cash.opening),
            money(self.cash.cash_in),
            money(self.cash.cash_out),
            money(self.cash.withdrawn),
            money(self.cash.closing)
        ));
        out
    }

    /// `(metric, value)` pairs in report order, used by the table and CSV writers.
    pub fn lines(&self, currency: &str) -> Vec<(String, String)> {
        let money = |d: Decimal| crate::utils::fmt_money(&d, currency);
        let qty = |d: Decimal| crate::utils::fmt_qty(&d);
        vec![
            ("Egg opening stock".into(), qty(self.eggs.opening)),
            ("Eggs collected".into(), qty(self.eggs.collected)),
            ("Eggs wasted".into(), qty(self.eggs.wasted)),
            ("Eggs sold".into(), qty(self.eggs.sold)),
            ("Egg closing stock".into(), qty(self.eggs.closing)),
            ("Feed opening (kg)".into(), qty(self.feed.opening)),
            ("Feed purchased (kg)".into(), qty(self.feed.purchased)),
            ("Feed consumed (kg)".into(), qty(self.feed.consumed)),
            ("Feed wasted (kg)".into(), qty(self.feed.wasted)),
            ("Feed closing (kg)".into(), qty(self.feed.closing)),
            ("Opening cash".into(), money(self.cash.opening)),
            ("Cash in".into(), money(self.cash.cash_in)),
            ("Cash out".into(), money(self.cash.cash_out)),
            ("Withdrawals".into(), money(self.cash.withdrawn)),
            ("Closing cash".into(), money(self.cash.closing)),
            ("Sales revenue".into(), money(self.sales_revenue)),
        ]
    }
}
