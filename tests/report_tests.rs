// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use opsledger::models::{
    AdAccount, AdPlatform, Campaign, CampaignStatus, Client, Fund, Transaction, TxType,
};
use opsledger::report;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: &str, ty: TxType, amount: &str, category: &str, ymd: (i32, u32, u32)) -> Transaction {
    Transaction {
        id: id.into(),
        r#type: ty,
        description: "test".into(),
        amount: d(amount),
        category: category.into(),
        date: Utc.with_ymd_and_hms(ymd.0, ymd.1, ymd.2, 0, 0, 0).unwrap(),
        fund_id: "f1".into(),
    }
}

fn completed_campaign(id: &str, spend: &str, profit: &str) -> Campaign {
    Campaign {
        id: id.into(),
        name: format!("Campaign {}", id),
        client_id: "c1".into(),
        platform_id: AdPlatform::Facebook,
        status: CampaignStatus::Completed,
        budget_usd: d(spend),
        audience_details: String::new(),
        actual_spend_usd: Some(d(spend)),
        ad_account_id: Some("acc1".into()),
        profit: Some(d(profit)),
        created_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
        completed_at: Some(Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()),
    }
}

fn pending_campaign(id: &str) -> Campaign {
    Campaign {
        id: id.into(),
        name: format!("Campaign {}", id),
        client_id: "c1".into(),
        platform_id: AdPlatform::Facebook,
        status: CampaignStatus::Pending,
        budget_usd: d("100"),
        audience_details: String::new(),
        actual_spend_usd: None,
        ad_account_id: None,
        profit: None,
        created_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
        completed_at: None,
    }
}

#[test]
fn cashflow_groups_by_month_most_recent_first() {
    let txs = vec![
        tx("t1", TxType::Income, "100", "Other", (2025, 7, 10)),
        tx("t2", TxType::Expense, "30", "Software", (2025, 7, 20)),
        tx("t3", TxType::Income, "50", "Other", (2025, 8, 1)),
    ];
    let rows = report::monthly_cashflow(&txs, 12);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, "2025-08");
    assert_eq!(rows[0].income, d("50"));
    assert_eq!(rows[0].expense, d("0"));
    assert_eq!(rows[1].month, "2025-07");
    assert_eq!(rows[1].income, d("100"));
    assert_eq!(rows[1].expense, d("30"));
}

#[test]
fn cashflow_respects_month_limit() {
    let txs = vec![
        tx("t1", TxType::Income, "1", "Other", (2025, 5, 1)),
        tx("t2", TxType::Income, "2", "Other", (2025, 6, 1)),
        tx("t3", TxType::Income, "3", "Other", (2025, 7, 1)),
    ];
    let rows = report::monthly_cashflow(&txs, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, "2025-07");
    assert_eq!(rows[1].month, "2025-06");
}

#[test]
fn spend_by_category_sums_expenses_only() {
    let txs = vec![
        tx("t1", TxType::Expense, "30", "Software", (2025, 7, 5)),
        tx("t2", TxType::Expense, "20", "Software", (2025, 7, 6)),
        tx("t3", TxType::Expense, "90", "Salaries", (2025, 7, 7)),
        tx("t4", TxType::Income, "500", "Software", (2025, 7, 8)),
        tx("t5", TxType::Expense, "10", "Software", (2025, 8, 1)),
    ];
    let items = report::spend_by_category(&txs, "2025-07");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], ("Salaries".to_string(), d("90")));
    assert_eq!(items[1], ("Software".to_string(), d("50")));
}

#[test]
fn campaign_profit_skips_open_campaigns() {
    let clients = vec![Client {
        id: "c1".into(),
        name: "Acme".into(),
        ad_balance_usd: d("0"),
        avg_deposit_rate: d("130"),
    }];
    let accounts = vec![AdAccount {
        id: "acc1".into(),
        name: "FB".into(),
        platform_id: AdPlatform::Facebook,
        balance_usd: d("0"),
        avg_cost_per_usd: d("122"),
    }];
    let campaigns = vec![
        completed_campaign("cmp1", "800", "6400"),
        pending_campaign("cmp2"),
    ];

    let (rows, total) = report::campaign_profit(&campaigns, &clients, &accounts);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].spend_usd, d("800"));
    assert_eq!(rows[0].revenue_bdt, d("104000"));
    assert_eq!(rows[0].cost_bdt, d("97600"));
    assert_eq!(rows[0].profit_bdt, d("6400"));
    assert_eq!(total, d("6400"));
}

#[test]
fn campaign_profit_tolerates_dangling_references() {
    let campaigns = vec![completed_campaign("cmp1", "800", "6400")];
    let (rows, total) = report::campaign_profit(&campaigns, &[], &[]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].revenue_bdt, d("0"));
    assert_eq!(rows[0].cost_bdt, d("0"));
    assert_eq!(total, d("6400"));
}

#[test]
fn ad_summary_counts_and_totals() {
    let clients = vec![
        Client {
            id: "c1".into(),
            name: "Acme".into(),
            ad_balance_usd: d("120.50"),
            avg_deposit_rate: d("130"),
        },
        Client {
            id: "c2".into(),
            name: "Globex".into(),
            ad_balance_usd: d("-20"),
            avg_deposit_rate: d("128"),
        },
    ];
    let accounts = vec![AdAccount {
        id: "acc1".into(),
        name: "FB".into(),
        platform_id: AdPlatform::Facebook,
        balance_usd: d("300"),
        avg_cost_per_usd: d("122"),
    }];
    let campaigns = vec![
        completed_campaign("cmp1", "800", "6400"),
        pending_campaign("cmp2"),
    ];

    let s = report::ad_summary(&clients, &accounts, &campaigns);
    assert_eq!(s.client_balance_usd, d("100.50"));
    assert_eq!(s.account_balance_usd, d("300"));
    assert_eq!(s.pending_campaigns, 1);
    assert_eq!(s.completed_campaigns, 1);
    assert_eq!(s.running_campaigns, 0);
    assert_eq!(s.cancelled_campaigns, 0);
    assert_eq!(s.total_profit_bdt, d("6400"));
}

#[test]
fn reports_are_idempotent_over_unchanged_collections() {
    let funds = vec![Fund {
        id: "f1".into(),
        name: "Main".into(),
        balance: d("100"),
    }];
    let txs = vec![
        tx("t1", TxType::Income, "100", "Other", (2025, 7, 10)),
        tx("t2", TxType::Expense, "30", "Software", (2025, 7, 20)),
    ];

    let first = serde_json::to_value(report::fund_balances(&funds).0).unwrap();
    let second = serde_json::to_value(report::fund_balances(&funds).0).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_value(report::monthly_cashflow(&txs, 12)).unwrap();
    let second = serde_json::to_value(report::monthly_cashflow(&txs, 12)).unwrap();
    assert_eq!(first, second);
}
