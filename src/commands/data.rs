// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

use super::required;
use crate::store::{Persist, Store};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("export", sub)) => {
            let out = required(sub, "out")?;
            let body = store.export_json()?;
            std::fs::write(out, body).with_context(|| format!("Write {}", out))?;
            println!("Exported farm data to {}", out);
        }
        Some(("import", sub)) => {
            let path = required(sub, "path")?;
            let body =
                std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
            store.import_json(&body)?;
            let d = store.data();
            println!(
                "Imported {} accounts, {} transactions, {} egg collections, {} feed entries from {}",
                d.accounts.len(),
                d.transactions.len(),
                d.egg_collections.len(),
                d.feed_transactions.len(),
                path
            );
        }
        Some(("reset", sub)) => {
            if !sub.get_flag("yes") {
                bail!("Refusing to wipe all data without --yes");
            }
            store.reset()?;
            println!("All farm data cleared");
        }
        _ => {}
    }
    Ok(())
}
