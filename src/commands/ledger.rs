// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use super::optional;
use crate::engine::ledger::{LedgerView, account_ledger};
use crate::store::{Persist, Store};
use crate::utils::{fmt_money, maybe_print_json, parse_range, pretty_table, resolve_account};

pub fn handle<P: Persist>(store: &Store<P>, m: &clap::ArgMatches) -> Result<()> {
    let range = parse_range(
        m.get_one::<String>("from"),
        m.get_one::<String>("to"),
        1,
    )?;
    let account = optional(m, "account")
        .map(|a| resolve_account(store, a))
        .transpose()?;
    let view = account_ledger(
        &store.data().transactions,
        account.map(|a| a.id.as_str()),
        range,
    );

    if let Some(path) = optional(m, "csv") {
        write_csv(&view, Path::new(path))?;
        println!("Wrote {} ledger rows to {}", view.rows.len(), path);
        return Ok(());
    }
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &view)? {
        return Ok(());
    }

    let ccy = &store.settings().currency;
    let Some(account) = account else {
        println!("Select an account with --account to view its ledger");
        return Ok(());
    };
    let dash_or = |d: Decimal| {
        if d > Decimal::ZERO {
            fmt_money(&d, ccy)
        } else {
            "-".to_string()
        }
    };

    println!(
        "{} - Ledger for {} ({} to {})",
        store.settings().farm_name,
        account.name,
        range.start,
        range.end
    );
    let mut rows = vec![vec![
        range.start.to_string(),
        "Opening Balance".to_string(),
        String::new(),
        String::new(),
        fmt_money(&view.opening_balance, ccy),
    ]];
    rows.extend(view.rows.iter().map(|r| {
        let detail = r.description();
        let description = if detail.is_empty() {
            r.r#type.to_string()
        } else {
            format!("{} - {}", r.r#type, detail)
        };
        vec![
            r.date.to_string(),
            description,
            dash_or(r.debit),
            dash_or(r.credit),
            fmt_money(&r.balance, ccy),
        ]
    }));
    rows.push(vec![
        range.end.to_string(),
        "Closing Balance".to_string(),
        fmt_money(&view.total_debit(), ccy),
        fmt_money(&view.total_credit(), ccy),
        fmt_money(&view.closing_balance(), ccy),
    ]);
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Debit", "Credit", "Balance"], rows)
    );
    Ok(())
}

pub fn write_csv(view: &LedgerView, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create CSV {}", path.display()))?;
    wtr.write_record(["date", "id", "type", "description", "debit", "credit", "balance"])?;
    for r in &view.rows {
        wtr.write_record([
            r.date.to_string(),
            r.id.clone(),
            r.r#type.to_string(),
            r.description(),
            r.debit.to_string(),
            r.credit.to_string(),
            r.balance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
