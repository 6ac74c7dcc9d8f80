// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

use crate::commands::load_finance;
use crate::models::Transaction;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let book = load_finance(conn)?;
    let mut txs: Vec<&Transaction> = book.transactions.iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date));
    let fund_name = |id: &str| {
        book.funds
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.clone())
            .unwrap_or_default()
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "fund", "type", "description", "category", "amount"])?;
            for t in txs {
                wtr.write_record([
                    t.date.format("%Y-%m-%d").to_string(),
                    fund_name(&t.fund_id),
                    t.r#type.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    t.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in txs {
                items.push(json!({
                    "date": t.date.format("%Y-%m-%d").to_string(),
                    "fund": fund_name(&t.fund_id),
                    "type": t.r#type.to_string(),
                    "description": t.description,
                    "category": t.category,
                    "amount": t.amount.to_string(),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
