// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use super::{date_or_today, optional, required};
use crate::models::{Transaction, TransactionType};
use crate::store::{Persist, Store};
use crate::utils::{
    account_label, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table,
    resolve_account,
};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            if store.delete_transaction(id)? {
                println!("Removed transaction {}", id);
            } else {
                println!("No transaction with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add<P: Persist>(store: &mut Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub)?;
    let kind = required(sub, "type")?.parse::<TransactionType>()?;
    let account = resolve_account(store, required(sub, "account")?)?;
    let (account_id, account_name) = (account.id.clone(), account.name.clone());
    let amount = parse_decimal(required(sub, "amount")?)?;
    let notes = optional(sub, "note").map(str::to_string);

    let tx = Transaction::new(date, kind, account_id, amount)?.with_notes(notes);
    let id = store.add_transaction(tx)?;
    println!(
        "Recorded {} of {} on {} (acct: {}, id: {})",
        kind,
        fmt_money(&amount, &store.settings().currency),
        date,
        account_name,
        id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub account: String,
    pub amount: String,
    pub items: usize,
    pub note: String,
}

/// Newest first; same-day entries keep reverse store order.
pub fn query_rows<P: Persist>(
    store: &Store<P>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let account_id = match optional(sub, "account") {
        Some(a) => Some(resolve_account(store, a)?.id.clone()),
        None => None,
    };
    let kind = optional(sub, "type")
        .map(str::parse::<TransactionType>)
        .transpose()?;
    let from = optional(sub, "from").map(parse_date).transpose()?;
    let to = optional(sub, "to").map(parse_date).transpose()?;

    let mut matched: Vec<&Transaction> = store
        .data()
        .transactions
        .iter()
        .filter(|t| account_id.as_deref().is_none_or(|a| t.account_id == a))
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| from.is_none_or(|f| t.date >= f))
        .filter(|t| to.is_none_or(|e| t.date <= e))
        .collect();
    matched.reverse();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }

    let ccy = &store.settings().currency;
    Ok(matched
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            account: account_label(store, &t.account_id),
            amount: fmt_money(&t.amount, ccy),
            items: t.items.len(),
            note: t.notes.clone().unwrap_or_default(),
        })
        .collect())
}

fn list<P: Persist>(store: &Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.account.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Account", "Amount", "Note"], rows)
        );
    }
    Ok(())
}
