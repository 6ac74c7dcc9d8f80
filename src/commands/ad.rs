// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::{account_named, client_named, load_ad, save_ad};
use crate::models::{AdAccount, AdPlatform, CampaignStatus, Client};
use crate::utils::{fmt_bdt, fmt_usd, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("client", sub)) => client(conn, sub)?,
        Some(("deposit", sub)) => deposit(conn, sub)?,
        Some(("account", sub)) => account(conn, sub)?,
        Some(("recharge", sub)) => recharge(conn, sub)?,
        Some(("campaign", sub)) => campaign(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn client(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut book = load_ad(conn)?;
            if book.clients.iter().any(|c| &c.name == name) {
                anyhow::bail!("Client '{}' already exists", name);
            }
            book.clients.push(Client {
                id: crate::utils::new_id(),
                name: name.clone(),
                ad_balance_usd: Decimal::ZERO,
                avg_deposit_rate: Decimal::ZERO,
            });
            save_ad(conn, &book)?;
            println!("Added client '{}'", name);
        }
        Some(("list", sub)) => {
            let book = load_ad(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &book.clients)? {
                let data: Vec<Vec<String>> = book
                    .clients
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            fmt_usd(c.ad_balance_usd),
                            c.avg_deposit_rate.round_dp(2).to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Client", "Ad Balance", "Deposit Rate"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn deposit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let client_name = sub.get_one::<String>("client").unwrap();
    let amount_bdt = parse_decimal(sub.get_one::<String>("amount-bdt").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;

    let mut book = load_ad(conn)?;
    let client_id = client_named(&book.clients, client_name)?.id.clone();
    let record = book.add_deposit(&client_id, amount_bdt, rate, Utc::now())?;
    save_ad(conn, &book)?;
    println!(
        "Deposited {} at {}/USD for '{}' => {} credited",
        fmt_bdt(amount_bdt),
        rate,
        client_name,
        fmt_usd(record.amount_usd)
    );
    Ok(())
}

fn account(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let platform: AdPlatform = sub
                .get_one::<String>("platform")
                .unwrap()
                .parse()
                .map_err(anyhow::Error::msg)?;
            let mut book = load_ad(conn)?;
            if book.accounts.iter().any(|a| &a.name == name) {
                anyhow::bail!("Ad account '{}' already exists", name);
            }
            book.accounts.push(AdAccount {
                id: crate::utils::new_id(),
                name: name.clone(),
                platform_id: platform,
                balance_usd: Decimal::ZERO,
                avg_cost_per_usd: Decimal::ZERO,
            });
            save_ad(conn, &book)?;
            println!("Added ad account '{}' ({})", name, platform);
        }
        Some(("list", sub)) => {
            let book = load_ad(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &book.accounts)? {
                let data: Vec<Vec<String>> = book
                    .accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.name.clone(),
                            a.platform_id.to_string(),
                            fmt_usd(a.balance_usd),
                            a.avg_cost_per_usd.round_dp(2).to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Account", "Platform", "Balance", "Cost Rate"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn recharge(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account_name = sub.get_one::<String>("account").unwrap();
    let amount_usd = parse_decimal(sub.get_one::<String>("amount-usd").unwrap())?;
    let cost_bdt = parse_decimal(sub.get_one::<String>("cost-bdt").unwrap())?;

    let mut book = load_ad(conn)?;
    let account_id = account_named(&book.accounts, account_name)?.id.clone();
    let rate = book.recharge_account(&account_id, amount_usd, cost_bdt)?;
    save_ad(conn, &book)?;
    println!(
        "Recharged '{}' with {} for {} (cost rate {}/USD)",
        account_name,
        fmt_usd(amount_usd),
        fmt_bdt(cost_bdt),
        rate.round_dp(2)
    );
    Ok(())
}

fn campaign(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("request", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let client_name = sub.get_one::<String>("client").unwrap();
            let platform: AdPlatform = sub
                .get_one::<String>("platform")
                .unwrap()
                .parse()
                .map_err(anyhow::Error::msg)?;
            let budget = parse_decimal(sub.get_one::<String>("budget").unwrap())?;
            let audience = sub.get_one::<String>("audience").unwrap();

            let mut book = load_ad(conn)?;
            let client_id = client_named(&book.clients, client_name)?.id.clone();
            let id = book
                .request_campaign(name, &client_id, platform, budget, audience, Utc::now())?
                .id
                .clone();
            save_ad(conn, &book)?;
            println!("Filed ad request '{}' (id {})", name, id);
        }
        Some(("complete", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let spend = parse_decimal(sub.get_one::<String>("spend").unwrap())?;
            let account_name = sub.get_one::<String>("account").unwrap();

            let mut book = load_ad(conn)?;
            let account_id = account_named(&book.accounts, account_name)?.id.clone();
            let profit = book.complete_campaign(id, spend, &account_id, Utc::now())?;
            save_ad(conn, &book)?;
            println!(
                "Campaign {} completed: spend {}, profit {}",
                id,
                fmt_usd(spend),
                fmt_bdt(profit)
            );
        }
        Some(("cancel", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut book = load_ad(conn)?;
            book.cancel_campaign(id)?;
            save_ad(conn, &book)?;
            println!("Campaign {} cancelled", id);
        }
        Some(("list", sub)) => list_campaigns(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct CampaignRow {
    id: String,
    name: String,
    client: String,
    platform: String,
    status: String,
    #[serde(rename = "budgetUSD")]
    budget: String,
    #[serde(rename = "spendUSD")]
    spend: String,
    #[serde(rename = "profitBDT")]
    profit: String,
}

fn list_campaigns(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let book = load_ad(conn)?;
    let status_filter: Option<CampaignStatus> = match sub.get_one::<String>("status") {
        Some(s) => Some(s.parse().map_err(anyhow::Error::msg)?),
        None => None,
    };
    let rows: Vec<CampaignRow> = book
        .campaigns
        .iter()
        .filter(|c| status_filter.is_none_or(|s| c.status == s))
        .map(|c| CampaignRow {
            id: c.id.clone(),
            name: c.name.clone(),
            client: book
                .clients
                .iter()
                .find(|cl| cl.id == c.client_id)
                .map(|cl| cl.name.clone())
                .unwrap_or_else(|| "N/A".into()),
            platform: c.platform_id.to_string(),
            status: c.status.to_string(),
            budget: fmt_usd(c.budget_usd),
            spend: c.actual_spend_usd.map(fmt_usd).unwrap_or_default(),
            profit: c.profit.map(fmt_bdt).unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id, r.name, r.client, r.platform, r.status, r.budget, r.spend, r.profit,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Client", "Platform", "Status", "Budget", "Spend", "Profit"],
                data,
            )
        );
    }
    Ok(())
}
