// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Months, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use regex::Regex;
use rust_decimal::Decimal;

use crate::engine::DateRange;
use crate::models::{Account, InvoiceItem};
use crate::store::{Persist, Store};

const UA: &str = concat!(
    "farmbook/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/farmbook)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `--from`/`--to` pair. Missing `to` means today; missing `from` goes back
/// `default_months` from `to`.
pub fn parse_range(
    from: Option<&String>,
    to: Option<&String>,
    default_months: u32,
) -> Result<DateRange> {
    let end = match to {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let start = match from {
        Some(s) => parse_date(s)?,
        None => end
            .checked_sub_months(Months::new(default_months))
            .unwrap_or(end),
    };
    DateRange::new(start, end)
}

const ITEM_PATTERN: &str =
    r"^\s*(?P<desc>.+?)\s*:\s*(?P<qty>\d+(?:\.\d+)?)\s*@\s*(?P<price>\d+(?:\.\d+)?)\s*$";

/// Parses a line item written as `description:quantity@unit_price`,
/// e.g. `Eggs:30@12.5`. The description may itself contain `:`; the last one
/// separates it from the quantity.
pub fn parse_item(s: &str) -> Result<InvoiceItem> {
    let re = Regex::new(ITEM_PATTERN)?;
    let caps = re
        .captures(s)
        .ok_or_else(|| anyhow!("Invalid item '{}', expected description:quantity@price", s))?;
    let quantity = parse_decimal(&caps["qty"])?;
    let unit_price = parse_decimal(&caps["price"])?;
    Ok(InvoiceItem::new(caps["desc"].to_string(), quantity, unit_price)?)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{}{:.2}", ccy, d.round_dp(2))
}

pub fn fmt_qty(d: &Decimal) -> String {
    d.normalize().to_string()
}

/// Resolves an account by name, falling back to an id match.
pub fn resolve_account<'a, P: Persist>(store: &'a Store<P>, name_or_id: &str) -> Result<&'a Account> {
    store
        .find_account(name_or_id)
        .or_else(|| store.account(name_or_id.trim()))
        .with_context(|| format!("Account '{}' not found", name_or_id.trim()))
}

/// Display name for a possibly dangling account reference.
pub fn account_label<P: Persist>(store: &Store<P>, id: &str) -> String {
    store
        .account_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
