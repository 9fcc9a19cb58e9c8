// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"))
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("Date YYYY-MM-DD (default today)")
}

fn note_arg() -> Arg {
    Arg::new("note").long("note")
}

fn account_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("category")
            .long("category")
            .help("Income|Expense|General"),
    )
    .arg(Arg::new("phone").long("phone"))
    .arg(Arg::new("address").long("address"))
    .arg(
        Arg::new("salary")
            .long("salary")
            .help("Monthly salary (employees)"),
    )
    .arg(
        Arg::new("joining_date")
            .long("joining-date")
            .help("Joining date YYYY-MM-DD (employees)"),
    )
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Customers, vendors, employees, utilities and owners")
        .subcommand_required(true)
        .subcommand(account_fields(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("Customer|Vendor|Employee|Utility|Owner"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("list").arg(
                Arg::new("all")
                    .long("all")
                    .action(ArgAction::SetTrue)
                    .help("Include archived accounts"),
            ),
        ))
        .subcommand(account_fields(
            Command::new("edit")
                .arg(Arg::new("account").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("type").long("type")),
        ))
        .subcommand(Command::new("archive").arg(Arg::new("account").required(true)))
        .subcommand(Command::new("unarchive").arg(Arg::new("account").required(true)))
        .subcommand(Command::new("rm").arg(Arg::new("account").required(true)))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Ledger entries")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(date_arg())
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("Sale|Payment|Receipt|Expense|Purchase|Deposit|Withdrawal"),
                )
                .arg(Arg::new("account").long("account").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(note_arg()),
        )
        .subcommand(json_flags(range_args(
            Command::new("list")
                .arg(Arg::new("account").long("account"))
                .arg(Arg::new("type").long("type"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )))
        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
}

fn invoice_cmd() -> Command {
    Command::new("invoice")
        .about("Sales invoices with line items")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(date_arg())
                .arg(Arg::new("account").long("account").required(true))
                .arg(
                    Arg::new("item")
                        .long("item")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("description:quantity@unit_price, repeatable"),
                )
                .arg(note_arg()),
        )
        .subcommand(json_flags(
            Command::new("list").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
        ))
}

fn egg_cmd() -> Command {
    Command::new("egg")
        .about("Daily egg collection")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(date_arg())
                .arg(
                    Arg::new("collected")
                        .long("collected")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("wasted")
                        .long("wasted")
                        .default_value("0")
                        .value_parser(value_parser!(i64)),
                )
                .arg(note_arg()),
        )
        .subcommand(json_flags(range_args(Command::new("list"))))
        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
}

fn feed_cmd() -> Command {
    Command::new("feed")
        .about("Feed inventory")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(date_arg())
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("Purchase|Consume|Waste"),
                )
                .arg(
                    Arg::new("quantity")
                        .long("quantity")
                        .required(true)
                        .help("Quantity in kg"),
                )
                .arg(Arg::new("cost").long("cost").help("Total cost (purchase)"))
                .arg(Arg::new("vendor").long("vendor").help("Vendor account (purchase)"))
                .arg(note_arg()),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
        .subcommand(Command::new("stock").about("Current feed on hand"))
}

fn cash_cmd() -> Command {
    let movement = |name: &'static str| {
        Command::new(name)
            .arg(date_arg())
            .arg(Arg::new("account").long("account").required(true))
            .arg(Arg::new("amount").long("amount").required(true))
            .arg(note_arg())
    };
    Command::new("cash")
        .about("Owner deposits, withdrawals and cash in hand")
        .subcommand_required(true)
        .subcommand(movement("deposit"))
        .subcommand(movement("withdraw"))
        .subcommand(json_flags(Command::new("balance")))
}

fn ledger_cmd() -> Command {
    json_flags(range_args(
        Command::new("ledger")
            .about("Running balance for one account")
            .arg(Arg::new("account").long("account"))
            .arg(Arg::new("csv").long("csv").help("Write rows to a CSV file")),
    ))
}

fn report_cmd() -> Command {
    json_flags(range_args(
        Command::new("report")
            .about("Eggs, feed and cash for a date range")
            .arg(
                Arg::new("share")
                    .long("share")
                    .action(ArgAction::SetTrue)
                    .help("Print the plain-text share message"),
            )
            .arg(Arg::new("csv").long("csv").help("Write the report to a CSV file")),
    ))
}

fn data_cmd() -> Command {
    Command::new("data")
        .about("Backup, restore and reset")
        .subcommand_required(true)
        .subcommand(Command::new("export").arg(Arg::new("out").long("out").required(true)))
        .subcommand(Command::new("import").arg(Arg::new("path").long("path").required(true)))
        .subcommand(
            Command::new("reset").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm wiping all data"),
            ),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .subcommand_required(true)
        .subcommand(json_flags(Command::new("show")))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("farm_name").long("farm-name"))
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .help("stained-glass|minimal"),
                ),
        )
}

pub fn build_cli() -> Command {
    Command::new("farmbook")
        .version(clap::crate_version!())
        .about("Egg production, feed inventory, ledgers and cash flow for a poultry farm")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(invoice_cmd())
        .subcommand(egg_cmd())
        .subcommand(feed_cmd())
        .subcommand(cash_cmd())
        .subcommand(ledger_cmd())
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Today's opening and closing figures with the 30-day trend")
                .arg(date_arg()),
        ))
        .subcommand(report_cmd())
        .subcommand(
            Command::new("insight")
                .about("Ask the insight service for a 30-day summary")
                .arg(
                    Arg::new("prompt_only")
                        .long("prompt-only")
                        .action(ArgAction::SetTrue)
                        .help("Print the prompt without calling the service"),
                ),
        )
        .subcommand(data_cmd())
        .subcommand(settings_cmd())
}
