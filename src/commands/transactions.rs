// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::{fund_named, load_finance, save_finance};
use crate::models::{Transaction, TxType};
use crate::utils::{fmt_usd, maybe_print_json, parse_date_utc, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fund_name = sub.get_one::<String>("fund").unwrap();
    let r#type: TxType = sub
        .get_one::<String>("type")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().clone();
    let category = sub.get_one::<String>("category").unwrap().clone();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date_utc(d)?,
        None => Utc::now(),
    };

    let mut book = load_finance(conn)?;
    let fund_id = fund_named(&book.funds, fund_name)?.id.clone();
    let tx = Transaction {
        id: crate::utils::new_id(),
        r#type,
        description: description.clone(),
        amount,
        category,
        date,
        fund_id,
    };
    let id = tx.id.clone();
    book.apply_transaction(tx)?;
    save_finance(conn, &book)?;
    println!(
        "Recorded {} {} '{}' against '{}' (id {})",
        r#type,
        fmt_usd(amount),
        description,
        fund_name,
        id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut book = load_finance(conn)?;
    let existing = book
        .transactions
        .iter()
        .find(|t| &t.id == id)
        .with_context(|| format!("Transaction '{}' not found", id))?
        .clone();

    let mut updated = existing;
    if let Some(fund_name) = sub.get_one::<String>("fund") {
        updated.fund_id = fund_named(&book.funds, fund_name)?.id.clone();
    }
    if let Some(t) = sub.get_one::<String>("type") {
        updated.r#type = t.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        updated.amount = parse_decimal(a)?;
    }
    if let Some(d) = sub.get_one::<String>("description") {
        updated.description = d.clone();
    }
    if let Some(c) = sub.get_one::<String>("category") {
        updated.category = c.clone();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        updated.date = parse_date_utc(d)?;
    }

    book.edit_transaction(updated)?;
    save_finance(conn, &book)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<String> = sub
        .get_many::<String>("ids")
        .unwrap()
        .cloned()
        .collect();
    let mut book = load_finance(conn)?;
    let removed = book.delete_transactions(&ids);
    save_finance(conn, &book)?;
    println!("Deleted {} transaction(s), balances rolled back", removed);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub description: String,
    pub category: String,
    pub fund: String,
    pub amount: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let book = load_finance(conn)?;
    let month = sub.get_one::<String>("month");
    let fund_name = sub.get_one::<String>("fund");
    let type_filter: Option<TxType> = match sub.get_one::<String>("type") {
        Some(t) => Some(t.parse().map_err(anyhow::Error::msg)?),
        None => None,
    };
    let fund_id = match fund_name {
        Some(name) => Some(fund_named(&book.funds, name)?.id.clone()),
        None => None,
    };

    let mut txs: Vec<&Transaction> = book
        .transactions
        .iter()
        .filter(|t| month.is_none_or(|m| &t.date.format("%Y-%m").to_string() == m))
        .filter(|t| fund_id.as_ref().is_none_or(|id| &t.fund_id == id))
        .filter(|t| type_filter.is_none_or(|ty| t.r#type == ty))
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    let rows: Vec<TransactionRow> = txs
        .iter()
        .map(|t| {
            let sign = match t.r#type {
                TxType::Income => "+",
                TxType::Expense => "-",
            };
            TransactionRow {
                id: t.id.clone(),
                date: t.date.format("%Y-%m-%d").to_string(),
                r#type: t.r#type.to_string(),
                description: t.description.clone(),
                category: t.category.clone(),
                fund: book
                    .funds
                    .iter()
                    .find(|f| f.id == t.fund_id)
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| "N/A".into()),
                amount: format!("{}{}", sign, fmt_usd(t.amount)),
            }
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id, r.date, r.r#type, r.description, r.category, r.fund, r.amount,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Description", "Category", "Fund", "Amount"],
                data,
            )
        );
    }
    Ok(())
}
