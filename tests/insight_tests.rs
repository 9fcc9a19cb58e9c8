// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use farmbook::engine::activity::InsightSnapshot;
use farmbook::insight::{FAILURE_TEXT, InsightService, build_prompt, request_insight};
use rust_decimal::Decimal;

struct Canned(&'static str);

impl InsightService for Canned {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Offline;

impl InsightService for Offline {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("connection refused"))
    }
}

struct Broken;

impl InsightService for Broken {
    fn generate(&self, _prompt: &str) -> Result<String> {
        panic!("worker blew up")
    }
}

fn snapshot(inactive: Vec<String>) -> InsightSnapshot {
    InsightSnapshot {
        since: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        total_collected: 600,
        total_wasted: 10,
        avg_daily_collection: Decimal::from(200),
        waste_rate_pct: Decimal::from(10) / Decimal::from(6),
        total_revenue: "4500.5".parse().unwrap(),
        active_customers: 3,
        inactive_customers: inactive,
    }
}

#[test]
fn prompt_carries_the_numbers() {
    let prompt = build_prompt(&snapshot(vec!["Bilal".into(), "Dawood".into()]), "PKR");
    assert!(prompt.contains("Total Eggs Collected: 600"));
    assert!(prompt.contains("Average Daily Collection: 200"));
    assert!(prompt.contains("Wastage Rate: 1.67%"));
    assert!(prompt.contains("Total Revenue: PKR4500.50"));
    assert!(prompt.contains("Total Active Customers: 3"));
    assert!(prompt.contains("Bilal, Dawood"));
}

#[test]
fn prompt_says_none_without_inactive_customers() {
    let prompt = build_prompt(&snapshot(vec![]), "PKR");
    assert!(prompt.contains("(No Purchase in 30 days): None"));
}

#[test]
fn successful_request_returns_service_text() {
    let pending = request_insight(Canned("All good"), "prompt".into());
    assert_eq!(pending.wait(), "All good");
}

#[test]
fn failures_collapse_to_fixed_message() {
    assert_eq!(
        request_insight(Offline, "prompt".into()).wait(),
        FAILURE_TEXT
    );
    assert_eq!(request_insight(Broken, "prompt".into()).wait(), FAILURE_TEXT);
}
