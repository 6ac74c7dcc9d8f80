// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::{load_ad, load_finance};
use crate::report;
use crate::utils::{fmt_bdt, fmt_usd, maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("ad-profit", sub)) => ad_profit(conn, sub)?,
        Some(("ad-summary", sub)) => ad_summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let book = load_finance(conn)?;
    let (rows, total) = report::fund_balances(&book.funds);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let mut data: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| vec![r.name, fmt_usd(r.balance)])
            .collect();
        data.push(vec!["TOTAL".into(), fmt_usd(total)]);
        println!("{}", pretty_table(&["Fund", "Balance"], data));
    }
    Ok(())
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let book = load_finance(conn)?;
    let rows = report::monthly_cashflow(&book.transactions, months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.month,
                    format!("{:.2}", r.income),
                    format!("{:.2}", r.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let book = load_finance(conn)?;
    let items = report::spend_by_category(&book.transactions, &month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data: Vec<Vec<String>> = items
            .into_iter()
            .map(|(cat, amt)| vec![cat, format!("{:.2}", amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn ad_profit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let book = load_ad(conn)?;
    let (rows, total) = report::campaign_profit(&book.campaigns, &book.clients, &book.accounts);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let mut data: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.campaign,
                    r.completed_at,
                    fmt_usd(r.spend_usd),
                    fmt_bdt(r.revenue_bdt),
                    fmt_bdt(r.cost_bdt),
                    fmt_bdt(r.profit_bdt),
                ]
            })
            .collect();
        data.push(vec![
            "TOTAL".into(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            fmt_bdt(total),
        ]);
        println!(
            "{}",
            pretty_table(
                &["Campaign", "Completed", "Spend", "Revenue", "Cost", "Profit"],
                data,
            )
        );
    }
    Ok(())
}

fn ad_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let book = load_ad(conn)?;
    let summary = report::ad_summary(&book.clients, &book.accounts, &book.campaigns);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        let data = vec![
            vec![
                "Client ad balance".into(),
                fmt_usd(summary.client_balance_usd),
            ],
            vec![
                "Ad account balance".into(),
                fmt_usd(summary.account_balance_usd),
            ],
            vec!["Pending campaigns".into(), summary.pending_campaigns.to_string()],
            vec!["Running campaigns".into(), summary.running_campaigns.to_string()],
            vec![
                "Completed campaigns".into(),
                summary.completed_campaigns.to_string(),
            ],
            vec![
                "Cancelled campaigns".into(),
                summary.cancelled_campaigns.to_string(),
            ],
            vec!["Total profit".into(), fmt_bdt(summary.total_profit_bdt)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}
