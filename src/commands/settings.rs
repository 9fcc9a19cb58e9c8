// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::optional;
use crate::models::Theme;
use crate::store::{Persist, SettingsPatch, Store};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle<P: Persist>(store: &mut Store<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = store.settings();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
                let rows = vec![
                    vec!["Farm name".to_string(), s.farm_name.clone()],
                    vec!["Currency".to_string(), s.currency.clone()],
                    vec!["Theme".to_string(), s.theme.to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let patch = SettingsPatch {
                currency: optional(sub, "currency").map(str::to_string),
                farm_name: optional(sub, "farm_name").map(str::to_string),
                theme: optional(sub, "theme").map(str::parse::<Theme>).transpose()?,
            };
            store.update_settings(patch)?;
            println!("Settings updated");
        }
        _ => {}
    }
    Ok(())
}
