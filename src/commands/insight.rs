// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::engine::activity::insight_snapshot;
use crate::insight::{FAILURE_TEXT, GeminiClient, build_prompt, request_insight};
use crate::store::{Persist, Store};
use crate::utils::today;

pub fn handle<P: Persist>(store: &Store<P>, m: &clap::ArgMatches) -> Result<()> {
    let data = store.data();
    let snapshot = insight_snapshot(
        &data.accounts,
        &data.transactions,
        &data.egg_collections,
        today(),
    );
    let prompt = build_prompt(&snapshot, &data.settings.currency);
    if m.get_flag("prompt_only") {
        println!("{}", prompt);
        return Ok(());
    }

    let text = match GeminiClient::from_env() {
        Ok(client) => {
            println!("Analyzing the last 30 days...");
            request_insight(client, prompt).wait()
        }
        Err(err) => {
            tracing::warn!("{:#}", err);
            FAILURE_TEXT.to_string()
        }
    };
    println!("{}", text);
    Ok(())
}
