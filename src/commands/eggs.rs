// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{date_or_today, optional, required};
use crate::models::EggCollection;
use crate::store::{Persist, Store};
use crate::utils::{maybe_print_json, parse_date, pretty_table};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let date = date_or_today(sub)?;
            let collected = *sub.get_one::<i64>("collected").unwrap_or(&0);
            let wasted = *sub.get_one::<i64>("wasted").unwrap_or(&0);
            let mut entry = EggCollection::new(date, collected, wasted)?;
            entry.notes = optional(sub, "note").map(str::to_string);
            let id = store.add_egg_collection(entry)?;
            println!(
                "Recorded {} collected, {} wasted on {} (id: {})",
                collected, wasted, date, id
            );
        }
        Some(("list", sub)) => {
            let from = optional(sub, "from").map(parse_date).transpose()?;
            let to = optional(sub, "to").map(parse_date).transpose()?;
            let mut entries: Vec<&EggCollection> = store
                .data()
                .egg_collections
                .iter()
                .filter(|c| from.is_none_or(|f| c.date >= f) && to.is_none_or(|e| c.date <= e))
                .collect();
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
                let rows = entries
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.date.to_string(),
                            c.collected.to_string(),
                            c.wasted.to_string(),
                            c.notes.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Date", "Collected", "Wasted", "Note"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            if store.delete_egg_collection(id)? {
                println!("Removed egg collection {}", id);
            } else {
                println!("No egg collection with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
