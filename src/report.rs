// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregations over the ledger collections. Nothing here
//! mutates; running a report twice over the same snapshot yields the same
//! output. Campaigns without derived completion fields are excluded from
//! profit aggregates, never treated as an error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{
    AdAccount, Campaign, CampaignStatus, Client, Fund, Transaction, TxType,
};

#[derive(Debug, Serialize)]
pub struct FundBalanceRow {
    pub name: String,
    pub balance: Decimal,
}

pub fn fund_balances(funds: &[Fund]) -> (Vec<FundBalanceRow>, Decimal) {
    let mut rows: Vec<FundBalanceRow> = funds
        .iter()
        .map(|f| FundBalanceRow {
            name: f.name.clone(),
            balance: f.balance,
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    let total = rows.iter().map(|r| r.balance).sum();
    (rows, total)
}

#[derive(Debug, Serialize)]
pub struct CashflowRow {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Per-month income/expense totals, most recent first.
pub fn monthly_cashflow(transactions: &[Transaction], months: usize) -> Vec<CashflowRow> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let month = tx.date.format("%Y-%m").to_string();
        let entry = map.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.r#type {
            TxType::Income => entry.0 += tx.amount,
            TxType::Expense => entry.1 += tx.amount,
        }
    }
    map.into_iter()
        .rev()
        .take(months)
        .map(|(month, (income, expense))| CashflowRow {
            month,
            income,
            expense,
        })
        .collect()
}

/// Expense totals by category for one YYYY-MM month, largest first.
pub fn spend_by_category(transactions: &[Transaction], month: &str) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in transactions {
        if tx.r#type == TxType::Expense && tx.date.format("%Y-%m").to_string() == month {
            *agg.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount;
        }
    }
    let mut items: Vec<(String, Decimal)> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

#[derive(Debug, Serialize)]
pub struct ProfitRow {
    pub campaign: String,
    pub completed_at: String,
    #[serde(rename = "spendUSD")]
    pub spend_usd: Decimal,
    #[serde(rename = "revenueBDT")]
    pub revenue_bdt: Decimal,
    #[serde(rename = "costBDT")]
    pub cost_bdt: Decimal,
    #[serde(rename = "profitBDT")]
    pub profit_bdt: Decimal,
}

/// Profit breakdown for completed campaigns. Revenue and cost are recomputed
/// from the current client/account rates for display; the stored `profit`
/// field is authoritative. Dangling client or account references contribute
/// zero.
pub fn campaign_profit(
    campaigns: &[Campaign],
    clients: &[Client],
    accounts: &[AdAccount],
) -> (Vec<ProfitRow>, Decimal) {
    let mut rows = Vec::new();
    let mut total = Decimal::ZERO;
    for c in campaigns {
        if c.status != CampaignStatus::Completed {
            continue;
        }
        let (Some(spend), Some(profit)) = (c.actual_spend_usd, c.profit) else {
            continue;
        };
        let client_rate = clients
            .iter()
            .find(|cl| cl.id == c.client_id)
            .map(|cl| cl.avg_deposit_rate)
            .unwrap_or(Decimal::ZERO);
        let cost_rate = c
            .ad_account_id
            .as_deref()
            .and_then(|id| accounts.iter().find(|a| a.id == id))
            .map(|a| a.avg_cost_per_usd)
            .unwrap_or(Decimal::ZERO);
        total += profit;
        rows.push(ProfitRow {
            campaign: c.name.clone(),
            completed_at: c
                .completed_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            spend_usd: spend,
            revenue_bdt: spend * client_rate,
            cost_bdt: spend * cost_rate,
            profit_bdt: profit,
        });
    }
    rows.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    (rows, total)
}

#[derive(Debug, Serialize)]
pub struct AdSummary {
    #[serde(rename = "clientBalanceUSD")]
    pub client_balance_usd: Decimal,
    #[serde(rename = "accountBalanceUSD")]
    pub account_balance_usd: Decimal,
    pub pending_campaigns: usize,
    pub running_campaigns: usize,
    pub completed_campaigns: usize,
    pub cancelled_campaigns: usize,
    #[serde(rename = "totalProfitBDT")]
    pub total_profit_bdt: Decimal,
}

/// Dashboard totals across the ad-spend collections.
pub fn ad_summary(
    clients: &[Client],
    accounts: &[AdAccount],
    campaigns: &[Campaign],
) -> AdSummary {
    let count = |status: CampaignStatus| campaigns.iter().filter(|c| c.status == status).count();
    AdSummary {
        client_balance_usd: clients.iter().map(|c| c.ad_balance_usd).sum(),
        account_balance_usd: accounts.iter().map(|a| a.balance_usd).sum(),
        pending_campaigns: count(CampaignStatus::Pending),
        running_campaigns: count(CampaignStatus::Running),
        completed_campaigns: count(CampaignStatus::Completed),
        cancelled_campaigns: count(CampaignStatus::Cancelled),
        total_profit_bdt: campaigns.iter().filter_map(|c| c.profit).sum(),
    }
}
