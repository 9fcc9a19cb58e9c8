// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{optional, required};
use crate::engine::ledger::account_balance;
use crate::models::{Account, AccountCategory, AccountType};
use crate::store::{Persist, Store};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, resolve_account};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("archive", sub)) => set_archived(store, sub, true)?,
        Some(("unarchive", sub)) => set_archived(store, sub, false)?,
        Some(("rm", sub)) => {
            let account = resolve_account(store, required(sub, "account")?)?;
            let (id, name) = (account.id.clone(), account.name.clone());
            store.delete_account(&id)?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

/// Applies the optional contact and employee fields shared by add and edit.
fn apply_fields(account: &mut Account, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(c) = optional(sub, "category") {
        account.category = Some(c.parse::<AccountCategory>()?);
    }
    if let Some(p) = optional(sub, "phone") {
        account.phone = p.to_string();
    }
    if let Some(a) = optional(sub, "address") {
        account.address = a.to_string();
    }
    if let Some(s) = optional(sub, "salary") {
        account.salary = Some(parse_decimal(s)?);
    }
    if let Some(d) = optional(sub, "joining_date") {
        account.joining_date = Some(parse_date(d)?);
    }
    Ok(())
}

fn add<P: Persist>(store: &mut Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?;
    let typ = required(sub, "type")?.parse::<AccountType>()?;
    if store.find_account(name).is_some() {
        anyhow::bail!("Account '{}' already exists", name);
    }
    let mut account = Account::new(name, typ)?;
    apply_fields(&mut account, sub)?;
    store.add_account(account)?;
    println!("Added account '{}' ({})", name, typ);
    Ok(())
}

fn edit<P: Persist>(store: &mut Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let mut account = resolve_account(store, required(sub, "account")?)?.clone();
    if let Some(n) = optional(sub, "name") {
        account.name = n.to_string();
    }
    if let Some(t) = optional(sub, "type") {
        account.r#type = t.parse::<AccountType>()?;
    }
    apply_fields(&mut account, sub)?;
    let name = account.name.clone();
    store.update_account(account)?;
    println!("Updated account '{}'", name);
    Ok(())
}

fn set_archived<P: Persist>(
    store: &mut Store<P>,
    sub: &clap::ArgMatches,
    archived: bool,
) -> Result<()> {
    let account = resolve_account(store, required(sub, "account")?)?;
    let (id, name) = (account.id.clone(), account.name.clone());
    store.set_archived(&id, archived)?;
    let verb = if archived { "Archived" } else { "Restored" };
    println!("{} account '{}'", verb, name);
    Ok(())
}

fn list<P: Persist>(store: &Store<P>, sub: &clap::ArgMatches) -> Result<()> {
    let show_all = sub.get_flag("all");
    let ccy = &store.settings().currency;
    let mut accounts: Vec<&Account> = store
        .data()
        .accounts
        .iter()
        .filter(|a| show_all || !a.archived)
        .collect();
    accounts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        let rows = accounts
            .iter()
            .map(|a| {
                let mut name = a.name.clone();
                if a.archived {
                    name.push_str(" (archived)");
                }
                vec![
                    name,
                    a.r#type.to_string(),
                    a.category.map(|c| c.to_string()).unwrap_or_default(),
                    a.phone.clone(),
                    fmt_money(&account_balance(&store.data().transactions, &a.id), ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Type", "Category", "Phone", "Balance"], rows)
        );
    }
    Ok(())
}
