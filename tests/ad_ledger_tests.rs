// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use opsledger::ledger::LedgerError;
use opsledger::ledger::adspend::AdBook;
use opsledger::models::{
    AdAccount, AdPlatform, AdTxType, Campaign, CampaignStatus, Client,
};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 9, 30, 0).unwrap()
}

fn client(id: &str, name: &str, balance: &str, rate: &str) -> Client {
    Client {
        id: id.into(),
        name: name.into(),
        ad_balance_usd: d(balance),
        avg_deposit_rate: d(rate),
    }
}

fn account(id: &str, name: &str, platform: AdPlatform, balance: &str, rate: &str) -> AdAccount {
    AdAccount {
        id: id.into(),
        name: name.into(),
        platform_id: platform,
        balance_usd: d(balance),
        avg_cost_per_usd: d(rate),
    }
}

fn campaign(id: &str, client_id: &str, platform: AdPlatform, budget: &str) -> Campaign {
    Campaign {
        id: id.into(),
        name: format!("Campaign {}", id),
        client_id: client_id.into(),
        platform_id: platform,
        status: CampaignStatus::Pending,
        budget_usd: d(budget),
        audience_details: String::new(),
        actual_spend_usd: None,
        ad_account_id: None,
        profit: None,
        created_at: now(),
        completed_at: None,
    }
}

fn setup() -> AdBook {
    AdBook::new(
        vec![client("c1", "Acme", "0", "150")],
        vec![
            account("acc1", "FB Main", AdPlatform::Facebook, "2000", "122"),
            account("acc2", "Google Main", AdPlatform::Google, "500", "120"),
        ],
        vec![campaign("cmp1", "c1", AdPlatform::Facebook, "1000")],
        vec![],
    )
}

#[test]
fn deposit_converts_and_credits() {
    let mut book = setup();
    let record = book.add_deposit("c1", d("15000"), d("120"), now()).unwrap();

    assert_eq!(book.clients[0].ad_balance_usd, d("125.00"));
    assert_eq!(book.clients[0].avg_deposit_rate, d("120"));

    assert_eq!(record.r#type, AdTxType::Deposit);
    assert_eq!(record.amount_usd, d("125.00"));
    assert_eq!(record.amount_bdt, Some(d("15000")));
    assert_eq!(record.rate_per_usd, Some(d("120")));
    assert_eq!(record.campaign_id, None);
    assert_eq!(book.transactions.len(), 1);
}

#[test]
fn deposit_rounds_usd_to_two_places() {
    let mut book = setup();
    // 10000 / 130 = 76.923... => 76.92
    let record = book.add_deposit("c1", d("10000"), d("130"), now()).unwrap();
    assert_eq!(record.amount_usd, d("76.92"));
    assert_eq!(book.clients[0].ad_balance_usd, d("76.92"));
}

#[test]
fn deposit_rejects_nonpositive_inputs_without_mutation() {
    let mut book = setup();
    for (bdt, rate) in [("0", "120"), ("-100", "120"), ("100", "0"), ("100", "-1")] {
        let err = book.add_deposit("c1", d(bdt), d(rate), now()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
    assert_eq!(book.clients[0].ad_balance_usd, d("0"));
    assert_eq!(book.clients[0].avg_deposit_rate, d("150"));
    assert!(book.transactions.is_empty());
}

#[test]
fn deposit_rejects_unknown_client() {
    let mut book = setup();
    let err = book
        .add_deposit("nobody", d("100"), d("120"), now())
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::MissingReference { entity: "client", .. }
    ));
    assert!(book.transactions.is_empty());
}

#[test]
fn recharge_credits_and_sets_cost_rate() {
    let mut book = setup();
    let rate = book.recharge_account("acc1", d("1000"), d("125000")).unwrap();
    assert_eq!(rate, d("125"));
    assert_eq!(book.accounts[0].balance_usd, d("3000"));
    assert_eq!(book.accounts[0].avg_cost_per_usd, d("125"));
}

#[test]
fn recharge_rejects_nonpositive_inputs_without_mutation() {
    let mut book = setup();
    for (usd, bdt) in [("0", "100"), ("100", "0"), ("-1", "100")] {
        let err = book.recharge_account("acc1", d(usd), d(bdt)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
    assert_eq!(book.accounts[0].balance_usd, d("2000"));
    assert_eq!(book.accounts[0].avg_cost_per_usd, d("122"));
}

#[test]
fn complete_campaign_applies_all_four_effects() {
    let mut book = setup();
    book.clients[0].ad_balance_usd = d("1000");
    book.clients[0].avg_deposit_rate = d("130");

    let profit = book
        .complete_campaign("cmp1", d("800"), "acc1", now())
        .unwrap();
    // 800*130 - 800*122 = 6400 BDT
    assert_eq!(profit, d("6400"));

    let c = &book.campaigns[0];
    assert_eq!(c.status, CampaignStatus::Completed);
    assert_eq!(c.actual_spend_usd, Some(d("800")));
    assert_eq!(c.ad_account_id.as_deref(), Some("acc1"));
    assert_eq!(c.profit, Some(d("6400")));
    assert_eq!(c.completed_at, Some(now()));

    assert_eq!(book.clients[0].ad_balance_usd, d("200"));
    assert_eq!(book.accounts[0].balance_usd, d("1200"));

    assert_eq!(book.transactions.len(), 1);
    let spend = &book.transactions[0];
    assert_eq!(spend.r#type, AdTxType::Spend);
    assert_eq!(spend.client_id, "c1");
    assert_eq!(spend.amount_usd, d("800"));
    assert_eq!(spend.campaign_id.as_deref(), Some("cmp1"));
    assert_eq!(spend.amount_bdt, None);
    assert_eq!(spend.rate_per_usd, None);
}

#[test]
fn complete_allows_client_overspend_by_default() {
    let mut book = setup();
    book.clients[0].ad_balance_usd = d("100");
    book.complete_campaign("cmp1", d("800"), "acc1", now())
        .unwrap();
    assert_eq!(book.clients[0].ad_balance_usd, d("-700"));
}

#[test]
fn complete_policy_blocks_overspend_when_disabled() {
    let mut book = setup();
    book.client_overdraft = false;
    book.clients[0].ad_balance_usd = d("100");
    let err = book
        .complete_campaign("cmp1", d("800"), "acc1", now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    assert_eq!(book.campaigns[0].status, CampaignStatus::Pending);
    assert_eq!(book.clients[0].ad_balance_usd, d("100"));
    assert_eq!(book.accounts[0].balance_usd, d("2000"));
    assert!(book.transactions.is_empty());
}

#[test]
fn complete_rejects_platform_mismatch_without_mutation() {
    let mut book = setup();
    // acc2 is a Google account; cmp1 targets Facebook.
    let err = book
        .complete_campaign("cmp1", d("100"), "acc2", now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidReference { .. }));
    assert_eq!(book.campaigns[0].status, CampaignStatus::Pending);
    assert_eq!(book.accounts[1].balance_usd, d("500"));
    assert!(book.transactions.is_empty());
}

#[test]
fn complete_rejects_unknown_account_and_campaign() {
    let mut book = setup();
    let err = book
        .complete_campaign("cmp1", d("100"), "ghost", now())
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::MissingReference {
            entity: "ad account",
            ..
        }
    ));
    let err = book
        .complete_campaign("ghost", d("100"), "acc1", now())
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::MissingReference {
            entity: "campaign",
            ..
        }
    ));
    assert!(book.transactions.is_empty());
}

#[test]
fn complete_rejects_nonpositive_spend() {
    let mut book = setup();
    let err = book
        .complete_campaign("cmp1", d("0"), "acc1", now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(book.campaigns[0].status, CampaignStatus::Pending);
}

#[test]
fn completed_campaign_is_terminal() {
    let mut book = setup();
    book.complete_campaign("cmp1", d("100"), "acc1", now())
        .unwrap();
    let err = book
        .complete_campaign("cmp1", d("100"), "acc1", now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidState { .. }));
    // exactly one spend record for the one completion
    assert_eq!(book.transactions.len(), 1);
}

#[test]
fn running_campaign_can_complete() {
    let mut book = setup();
    book.campaigns[0].status = CampaignStatus::Running;
    book.complete_campaign("cmp1", d("100"), "acc1", now())
        .unwrap();
    assert_eq!(book.campaigns[0].status, CampaignStatus::Completed);
}

#[test]
fn cancel_transitions_open_campaigns_only() {
    let mut book = setup();
    book.cancel_campaign("cmp1").unwrap();
    assert_eq!(book.campaigns[0].status, CampaignStatus::Cancelled);
    // no balance side effects, no transaction log entry
    assert_eq!(book.clients[0].ad_balance_usd, d("0"));
    assert!(book.transactions.is_empty());

    let err = book.cancel_campaign("cmp1").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidState { .. }));
    let err = book.complete_campaign("cmp1", d("100"), "acc1", now()).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidState { .. }));
}

#[test]
fn request_campaign_starts_pending() {
    let mut book = setup();
    let id = book
        .request_campaign("Launch", "c1", AdPlatform::Google, d("500"), "", now())
        .unwrap()
        .id
        .clone();
    let c = book.campaigns.iter().find(|c| c.id == id).unwrap();
    assert_eq!(c.status, CampaignStatus::Pending);
    assert_eq!(c.budget_usd, d("500"));
    assert!(c.actual_spend_usd.is_none());
    assert!(c.profit.is_none());
}

#[test]
fn request_rejects_unknown_client_and_bad_budget() {
    let mut book = setup();
    let err = book
        .request_campaign("X", "nobody", AdPlatform::Google, d("500"), "", now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::MissingReference { .. }));
    let err = book
        .request_campaign("X", "c1", AdPlatform::Google, d("0"), "", now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(book.campaigns.len(), 1);
}
