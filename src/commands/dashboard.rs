// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use super::date_or_today;
use crate::engine::report::build_dashboard;
use crate::store::{Persist, Store};
use crate::utils::{fmt_money, fmt_qty, maybe_print_json, pretty_table};

pub fn handle<P: Persist>(store: &Store<P>, m: &clap::ArgMatches) -> Result<()> {
    let day = date_or_today(m)?;
    let snap = build_dashboard(store.data(), day);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &snap)? {
        return Ok(());
    }

    let ccy = &store.settings().currency;
    let money = |d: Decimal| fmt_money(&d, ccy);
    println!("{} - {}", store.settings().farm_name, day);
    let rows = vec![
        vec![
            "Eggs".to_string(),
            fmt_qty(&snap.eggs.opening),
            format!("+{} / -{} wasted", fmt_qty(&snap.eggs.collected), fmt_qty(&snap.eggs.wasted)),
            format!("-{} sold", fmt_qty(&snap.eggs.sold)),
            fmt_qty(&snap.eggs.closing),
        ],
        vec![
            "Feed (kg)".to_string(),
            fmt_qty(&snap.feed.opening),
            format!("+{} purchased", fmt_qty(&snap.feed.purchased)),
            format!(
                "-{} consumed / -{} wasted",
                fmt_qty(&snap.feed.consumed),
                fmt_qty(&snap.feed.wasted)
            ),
            fmt_qty(&snap.feed.closing),
        ],
        vec![
            "Cash".to_string(),
            money(snap.cash.opening),
            format!("+{}", money(snap.cash.cash_in)),
            format!(
                "-{} / -{} withdrawn",
                money(snap.cash.cash_out),
                money(snap.cash.withdrawn)
            ),
            money(snap.cash.closing),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["", "Opening", "In", "Out", "Closing"], rows)
    );
    println!("Feed on hand: {} kg", fmt_qty(&snap.feed_on_hand));

    let trend = snap
        .trend
        .iter()
        .map(|p| {
            vec![
                p.date.format("%d %b").to_string(),
                money(p.income),
                money(p.income_ma.round_dp(2)),
                money(p.expense),
                money(p.expense_ma.round_dp(2)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Day", "Income", "Income (5d)", "Expense", "Expense (5d)"], trend)
    );
    Ok(())
}
