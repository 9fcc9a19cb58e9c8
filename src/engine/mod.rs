// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure projections over the record collections. Nothing here mutates the
//! store; every figure is re-derived from the full history on each call.

pub mod activity;
pub mod cashflow;
pub mod inventory;
pub mod ledger;
pub mod polarity;
pub mod report;

use anyhow::{Result, anyhow};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// A closed range of calendar days. Both ends are inclusive, so the end day
/// counts through its last second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(anyhow!("Range end {} is before start {}", end, start));
        }
        Ok(Self { start, end })
    }

    pub fn day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The `days` calendar days ending at `end`.
    pub fn trailing(end: NaiveDate, days: u64) -> Self {
        let start = end
            .checked_sub_days(Days::new(days.saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn is_before(&self, date: NaiveDate) -> bool {
        date < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The range of the same length that starts the day after this one ends.
    pub fn next_adjacent(&self) -> Option<Self> {
        let len = (self.end - self.start).num_days() as u64;
        let start = self.end.succ_opt()?;
        let end = start.checked_add_days(Days::new(len))?;
        Some(Self { start, end })
    }
}
