// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::commands::{fund_named, load_finance, save_finance};
use crate::models::Fund;
use crate::utils::{fmt_usd, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("transfer", sub)) => transfer(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let book = load_finance(conn)?;
    let (rows, total) = crate::report::fund_balances(&book.funds);
    if !crate::utils::maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let mut data: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| vec![r.name, fmt_usd(r.balance)])
            .collect();
        data.push(vec!["TOTAL".into(), fmt_usd(total)]);
        println!("{}", pretty_table(&["Fund", "Balance"], data));
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    let mut book = load_finance(conn)?;
    if book.funds.iter().any(|f| &f.name == name) {
        anyhow::bail!("Fund '{}' already exists", name);
    }
    book.funds.push(Fund {
        id: crate::utils::new_id(),
        name: name.clone(),
        balance,
    });
    save_finance(conn, &book)?;
    println!("Added fund '{}' with balance {}", name, fmt_usd(balance));
    Ok(())
}

fn transfer(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = sub.get_one::<String>("from").unwrap();
    let to = sub.get_one::<String>("to").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;

    let mut book = load_finance(conn)?;
    let from_id = fund_named(&book.funds, from)?.id.clone();
    let to_id = fund_named(&book.funds, to)?.id.clone();
    book.transfer_funds(&from_id, &to_id, amount, Utc::now())?;
    save_finance(conn, &book)?;
    println!("Transferred {} from '{}' to '{}'", fmt_usd(amount), from, to);
    Ok(())
}
