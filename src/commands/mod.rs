// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod cash;
pub mod dashboard;
pub mod data;
pub mod eggs;
pub mod feed;
pub mod insight;
pub mod invoices;
pub mod ledger;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

use crate::utils::{parse_date, today};

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.trim())
        .ok_or_else(|| anyhow!("Missing required argument '{}'", id))
}

/// A trimmed optional argument; blank counts as absent.
pub(crate) fn optional<'a>(m: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub(crate) fn date_or_today(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match optional(m, "date") {
        Some(d) => parse_date(d),
        None => Ok(today()),
    }
}
