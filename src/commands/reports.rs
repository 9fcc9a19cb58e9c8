// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::Path;

use super::optional;
use crate::engine::report::{ReportSnapshot, build_report};
use crate::store::{Persist, Store};
use crate::utils::{fmt_money, maybe_print_json, parse_range, pretty_table};

pub fn handle<P: Persist>(store: &Store<P>, m: &clap::ArgMatches) -> Result<()> {
    let range = parse_range(m.get_one::<String>("from"), m.get_one::<String>("to"), 1)?;
    let report = build_report(store.data(), range);
    let settings = store.settings();

    if let Some(path) = optional(m, "csv") {
        write_csv(&report, &settings.currency, Path::new(path))?;
        println!("Wrote report to {}", path);
        return Ok(());
    }
    if m.get_flag("share") {
        println!("{}", report.share_text(&settings.farm_name, &settings.currency));
        return Ok(());
    }
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!(
        "{} - Performance Report ({} to {})",
        settings.farm_name, range.start, range.end
    );
    let rows = report
        .lines(&settings.currency)
        .into_iter()
        .map(|(k, v)| vec![k, v])
        .collect();
    println!("{}", pretty_table(&["Report Item", "Value"], rows));

    let perf = report
        .performance
        .iter()
        .map(|p| {
            vec![
                p.date.format("%a %d %b").to_string(),
                p.collected.to_string(),
                fmt_money(&p.revenue, &settings.currency),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Day", "Eggs Collected", "Revenue"], perf)
    );
    Ok(())
}

pub fn write_csv(report: &ReportSnapshot, currency: &str, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create CSV {}", path.display()))?;
    wtr.write_record(["metric", "value"])?;
    wtr.write_record(["Period start".to_string(), report.range.start.to_string()])?;
    wtr.write_record(["Period end".to_string(), report.range.end.to_string()])?;
    for (metric, value) in report.lines(currency) {
        wtr.write_record([metric, value])?;
    }
    wtr.flush()?;
    Ok(())
}
