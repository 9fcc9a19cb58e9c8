// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use super::{date_or_today, optional, required};
use crate::models::{InvoiceItem, Transaction, TransactionType};
use crate::store::{Persist, Store};
use crate::utils::{
    account_label, fmt_money, fmt_qty, maybe_print_json, parse_item, pretty_table,
    resolve_account,
};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<P: Persist>(store: &mut Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub)?;
    let account = resolve_account(store, required(sub, "account")?)?;
    let (account_id, account_name) = (account.id.clone(), account.name.clone());
    let items = sub
        .get_many::<String>("item")
        .into_iter()
        .flatten()
        .map(|s| parse_item(s))
        .collect::<Result<Vec<InvoiceItem>>>()?;
    let notes = optional(sub, "note").map(str::to_string);

    let tx = Transaction::with_items(date, TransactionType::Sale, account_id, items)?
        .with_notes(notes);
    let amount = tx.amount;
    let units = tx.units();
    let id = store.add_transaction(tx)?;
    println!(
        "Invoice #{} saved: {} units, {} to {}",
        id.to_uppercase(),
        fmt_qty(&units),
        fmt_money(&amount, &store.settings().currency),
        account_name
    );
    Ok(())
}

#[derive(Serialize)]
struct InvoiceRow<'a> {
    id: &'a str,
    date: String,
    customer: String,
    items: &'a [InvoiceItem],
    amount: String,
}

fn list<P: Persist>(store: &Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = &store.settings().currency;
    let mut invoices: Vec<&Transaction> = store
        .data()
        .transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Sale)
        .collect();
    invoices.reverse();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        invoices.truncate(*limit);
    }

    let data: Vec<InvoiceRow> = invoices
        .iter()
        .map(|t| InvoiceRow {
            id: &t.id,
            date: t.date.to_string(),
            customer: account_label(store, &t.account_id),
            items: &t.items,
            amount: fmt_money(&t.amount, ccy),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                let items = r
                    .items
                    .iter()
                    .map(|i| format!("{} x{} @{}", i.description, fmt_qty(&i.quantity), i.unit_price))
                    .collect::<Vec<_>>()
                    .join("; ");
                vec![
                    r.id.to_uppercase(),
                    r.date.clone(),
                    r.customer.clone(),
                    items,
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Invoice", "Date", "Customer", "Items", "Amount"], rows)
        );
    }
    Ok(())
}
