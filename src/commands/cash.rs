// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use super::{date_or_today, optional, required};
use crate::engine::cashflow::cash_in_hand;
use crate::models::{Transaction, TransactionType};
use crate::store::{Persist, Store};
use crate::utils::{account_label, fmt_money, maybe_print_json, parse_decimal, pretty_table, resolve_account};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => movement(store, sub, TransactionType::Deposit)?,
        Some(("withdraw", sub)) => movement(store, sub, TransactionType::Withdrawal)?,
        Some(("balance", sub)) => balance(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn movement<P: Persist>(
    store: &mut Store<P>,
    sub: &clap::ArgMatches,
    kind: TransactionType,
) -> Result<()> {
    let date = date_or_today(sub)?;
    let account_id = resolve_account(store, required(sub, "account")?)?.id.clone();
    let amount = parse_decimal(required(sub, "amount")?)?;
    let default_note = match kind {
        TransactionType::Deposit => "Manual Deposit",
        _ => "Manual Withdrawal",
    };
    let notes = optional(sub, "note").unwrap_or(default_note).to_string();

    let tx = Transaction::new(date, kind, account_id, amount)?.with_notes(Some(notes));
    store.add_transaction(tx)?;
    let ccy = &store.settings().currency;
    println!(
        "{} of {} recorded. Cash in hand: {}",
        kind,
        fmt_money(&amount, ccy),
        fmt_money(&cash_in_hand(&store.data().transactions), ccy)
    );
    Ok(())
}

fn balance<P: Persist>(store: &Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = &store.settings().currency;
    let total = cash_in_hand(&store.data().transactions);
    let history: Vec<_> = store
        .data()
        .transactions
        .iter()
        .rev()
        .filter(|t| matches!(t.r#type, TransactionType::Deposit | TransactionType::Withdrawal))
        .collect();

    let payload = json!({ "cash_in_hand": total, "history": history });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        println!("Cash in hand: {}", fmt_money(&total, ccy));
        let rows = history
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.r#type.to_string(),
                    account_label(store, &t.account_id),
                    fmt_money(&t.amount, ccy),
                    t.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Account", "Amount", "Note"], rows)
        );
    }
    Ok(())
}
