// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::{date_or_today, optional, required};
use crate::engine::inventory::feed_on_hand;
use crate::models::{AccountType, FeedTransaction, FeedType};
use crate::store::{Persist, Store};
use crate::utils::{
    account_label, fmt_money, fmt_qty, maybe_print_json, parse_decimal, pretty_table,
    resolve_account,
};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            if store.delete_feed_transaction(id)? {
                println!("Removed feed entry {}", id);
            } else {
                println!("No feed entry with id {}", id);
            }
        }
        Some(("stock", _)) => {
            println!(
                "Current feed stock: {} kg",
                fmt_qty(&feed_on_hand(&store.data().feed_transactions))
            );
        }
        _ => {}
    }
    Ok(())
}

fn add<P: Persist>(store: &mut Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub)?;
    let kind = required(sub, "type")?.parse::<FeedType>()?;
    let quantity = parse_decimal(required(sub, "quantity")?)?;
    let cost = optional(sub, "cost").map(parse_decimal).transpose()?;
    let vendor_id = match optional(sub, "vendor") {
        Some(v) => {
            let vendor = resolve_account(store, v)?;
            if vendor.r#type != AccountType::Vendor {
                bail!("Account '{}' is a {}, not a Vendor", vendor.name, vendor.r#type);
            }
            Some(vendor.id.clone())
        }
        None => None,
    };
    if kind != FeedType::Purchase && (cost.is_some() || vendor_id.is_some()) {
        bail!("--cost and --vendor only apply to a Purchase");
    }

    let mut entry = FeedTransaction::new(date, kind, quantity)?.with_purchase(cost, vendor_id);
    entry.notes = optional(sub, "note").map(str::to_string);
    let recorded = store.record_feed(entry)?;
    println!(
        "Recorded feed {} of {} kg on {} (id: {})",
        kind,
        fmt_qty(&quantity),
        date,
        recorded.feed_id
    );
    if let Some(tx_id) = recorded.transaction_id {
        println!("Added Purchase to the ledger (id: {})", tx_id);
    }
    Ok(())
}

fn list<P: Persist>(store: &Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let entries: Vec<&FeedTransaction> = store.data().feed_transactions.iter().rev().collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        let ccy = &store.settings().currency;
        let rows = entries
            .iter()
            .map(|f| {
                vec![
                    f.id.clone(),
                    f.date.to_string(),
                    f.r#type.to_string(),
                    fmt_qty(&f.quantity),
                    f.cost.map(|c| fmt_money(&c, ccy)).unwrap_or_default(),
                    f.vendor_id
                        .as_deref()
                        .map(|v| account_label(store, v))
                        .unwrap_or_default(),
                    f.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Qty (kg)", "Cost", "Vendor", "Note"],
                rows
            )
        );
    }
    Ok(())
}
