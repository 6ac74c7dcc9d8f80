// Copyright (c) AlphaVelocity.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("opsledger")
        .about("Agency fund, transaction, and ad-spend ledger")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database and seed collections"))
        .subcommand(
            Command::new("fund")
                .about("Manage cash funds")
                .subcommand(json_flags(Command::new("list").about("List funds and balances")))
                .subcommand(
                    Command::new("add")
                        .about("Add a fund")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").default_value("0")),
                )
                .subcommand(
                    Command::new("transfer")
                        .about("Move money between two funds")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect fund transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense against a fund")
                        .arg(Arg::new("fund").long("fund").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").default_value("Other"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Correct a transaction (reverses the old balance effect)")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("fund").long("fund"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete transactions, rolling balances back")
                        .arg(Arg::new("ids").num_args(1..).required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("fund").long("fund"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("ad")
                .about("Ad-spend ledger: clients, accounts, campaigns")
                .subcommand(
                    Command::new("client")
                        .about("Manage ad clients")
                        .subcommand(
                            Command::new("add")
                                .about("Add a client")
                                .arg(Arg::new("name").long("name").required(true)),
                        )
                        .subcommand(json_flags(Command::new("list").about("List clients"))),
                )
                .subcommand(
                    Command::new("deposit")
                        .about("Credit a client's ad balance from a BDT deposit")
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(Arg::new("amount-bdt").long("amount-bdt").required(true))
                        .arg(Arg::new("rate").long("rate").required(true).help("BDT per USD")),
                )
                .subcommand(
                    Command::new("account")
                        .about("Manage platform ad accounts")
                        .subcommand(
                            Command::new("add")
                                .about("Add an ad account")
                                .arg(Arg::new("name").long("name").required(true))
                                .arg(
                                    Arg::new("platform")
                                        .long("platform")
                                        .required(true)
                                        .help("facebook|google|tiktok"),
                                ),
                        )
                        .subcommand(json_flags(Command::new("list").about("List ad accounts"))),
                )
                .subcommand(
                    Command::new("recharge")
                        .about("Top up an ad account")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("amount-usd").long("amount-usd").required(true))
                        .arg(Arg::new("cost-bdt").long("cost-bdt").required(true)),
                )
                .subcommand(
                    Command::new("campaign")
                        .about("Manage ad campaigns")
                        .subcommand(
                            Command::new("request")
                                .about("File a new ad request (pending)")
                                .arg(Arg::new("name").long("name").required(true))
                                .arg(Arg::new("client").long("client").required(true))
                                .arg(Arg::new("platform").long("platform").required(true))
                                .arg(Arg::new("budget").long("budget").required(true))
                                .arg(Arg::new("audience").long("audience").default_value("")),
                        )
                        .subcommand(
                            Command::new("complete")
                                .about("Settle a campaign against an ad account")
                                .arg(Arg::new("id").long("id").required(true))
                                .arg(Arg::new("spend").long("spend").required(true))
                                .arg(Arg::new("account").long("account").required(true)),
                        )
                        .subcommand(
                            Command::new("cancel")
                                .about("Cancel a pending or running campaign")
                                .arg(Arg::new("id").long("id").required(true)),
                        )
                        .subcommand(json_flags(
                            Command::new("list")
                                .about("List campaigns")
                                .arg(Arg::new("status").long("status")),
                        )),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Read-only reports over the ledger collections")
                .subcommand(json_flags(Command::new("balances").about("Fund balances")))
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income/expense totals")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .default_value("12"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expenses by category for one month")
                        .arg(Arg::new("month").long("month").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("ad-profit").about("Profit breakdown for completed campaigns"),
                ))
                .subcommand(json_flags(
                    Command::new("ad-summary").about("Ad-spend dashboard totals"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export collections")
                .subcommand(
                    Command::new("transactions")
                        .about("Export the transaction log")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check cross-collection invariants"))
}
