// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::{load_ad, load_finance};
use crate::models::{AdTxType, CampaignStatus};
use crate::utils::pretty_table;

/// Cross-collection invariant checks. The ledger cannot create these
/// inconsistencies itself; they surface hand-edited stores or collections
/// written by older versions.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    let finance = load_finance(conn)?;
    for t in &finance.transactions {
        if !finance.funds.iter().any(|f| f.id == t.fund_id) {
            rows.push(vec!["tx_unknown_fund".into(), t.id.clone()]);
        }
    }

    let ad = load_ad(conn)?;
    for c in &ad.campaigns {
        if c.status == CampaignStatus::Completed {
            if c.actual_spend_usd.is_none()
                || c.ad_account_id.is_none()
                || c.profit.is_none()
                || c.completed_at.is_none()
            {
                rows.push(vec!["campaign_missing_completion_fields".into(), c.id.clone()]);
            }
            let has_spend = ad.transactions.iter().any(|t| {
                t.r#type == AdTxType::Spend && t.campaign_id.as_deref() == Some(c.id.as_str())
            });
            if !has_spend {
                rows.push(vec!["campaign_missing_spend_record".into(), c.id.clone()]);
            }
        } else if c.actual_spend_usd.is_some() || c.profit.is_some() || c.completed_at.is_some() {
            rows.push(vec!["campaign_stray_completion_fields".into(), c.id.clone()]);
        }
        if !ad.clients.iter().any(|cl| cl.id == c.client_id) {
            rows.push(vec!["campaign_unknown_client".into(), c.id.clone()]);
        }
    }
    for t in &ad.transactions {
        if !ad.clients.iter().any(|cl| cl.id == t.client_id) {
            rows.push(vec!["ad_tx_unknown_client".into(), t.id.clone()]);
        }
        match t.r#type {
            AdTxType::Deposit => {
                if t.amount_bdt.is_none() || t.rate_per_usd.is_none() {
                    rows.push(vec!["deposit_missing_bdt_or_rate".into(), t.id.clone()]);
                }
            }
            AdTxType::Spend => {
                let known = t
                    .campaign_id
                    .as_ref()
                    .is_some_and(|id| ad.campaigns.iter().any(|c| &c.id == id));
                if !known {
                    rows.push(vec!["spend_unknown_campaign".into(), t.id.clone()]);
                }
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Record"], rows));
    }
    Ok(())
}
