// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::LedgerError;
use crate::models::{
    AdAccount, AdPlatform, AdTxType, Campaign, CampaignStatus, Client, ClientAdTransaction,
};

/// In-memory snapshot of the ad-spend ledger: clients, platform accounts,
/// campaigns, and the append-only client transaction log. Multi-entity
/// operations validate everything up front and then commit all writes from
/// the same snapshot, so a failure never leaves a partial update behind.
#[derive(Debug, Clone, Default)]
pub struct AdBook {
    pub clients: Vec<Client>,
    pub accounts: Vec<AdAccount>,
    pub campaigns: Vec<Campaign>,
    pub transactions: Vec<ClientAdTransaction>,
    /// When true (the default), completing a campaign may push the client's
    /// ad balance negative; an overspent deposit is visible, not blocked.
    pub client_overdraft: bool,
}

impl AdBook {
    pub fn new(
        clients: Vec<Client>,
        accounts: Vec<AdAccount>,
        campaigns: Vec<Campaign>,
        transactions: Vec<ClientAdTransaction>,
    ) -> Self {
        AdBook {
            clients,
            accounts,
            campaigns,
            transactions,
            client_overdraft: true,
        }
    }

    fn client_index(&self, id: &str) -> Result<usize, LedgerError> {
        self.clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::MissingReference {
                entity: "client",
                id: id.to_string(),
            })
    }

    fn account_index(&self, id: &str) -> Result<usize, LedgerError> {
        self.accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| LedgerError::MissingReference {
                entity: "ad account",
                id: id.to_string(),
            })
    }

    /// Convert a BDT deposit into USD credit on the client's ad balance.
    ///
    /// `amount_usd = amount_bdt / rate`, rounded half-away-from-zero to two
    /// places; the rate itself is kept at full precision on the record.
    /// `avg_deposit_rate` is overwritten with the deposit rate.
    pub fn add_deposit(
        &mut self,
        client_id: &str,
        amount_bdt: Decimal,
        rate: Decimal,
        now: DateTime<Utc>,
    ) -> Result<ClientAdTransaction, LedgerError> {
        if amount_bdt <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("amountBDT", amount_bdt));
        }
        if rate <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("rate", rate));
        }
        let idx = self.client_index(client_id)?;

        let amount_usd =
            (amount_bdt / rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let client = &mut self.clients[idx];
        client.ad_balance_usd += amount_usd;
        client.avg_deposit_rate = rate;

        let record = ClientAdTransaction {
            id: crate::utils::new_id(),
            client_id: client_id.to_string(),
            r#type: AdTxType::Deposit,
            amount_usd,
            amount_bdt: Some(amount_bdt),
            rate_per_usd: Some(rate),
            campaign_id: None,
            transaction_date: now,
        };
        self.transactions.push(record.clone());
        Ok(record)
    }

    /// Top up a platform account. The effective cost rate is
    /// `cost_bdt / amount_usd`, kept at full precision; `avg_cost_per_usd`
    /// is overwritten with it. Returns the computed rate.
    pub fn recharge_account(
        &mut self,
        account_id: &str,
        amount_usd: Decimal,
        cost_bdt: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if amount_usd <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("amountUSD", amount_usd));
        }
        if cost_bdt <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("costBDT", cost_bdt));
        }
        let idx = self.account_index(account_id)?;

        let rate = cost_bdt / amount_usd;
        let account = &mut self.accounts[idx];
        account.balance_usd += amount_usd;
        account.avg_cost_per_usd = rate;
        Ok(rate)
    }

    /// Create a new ad request in `pending` state. No balance effects.
    pub fn request_campaign(
        &mut self,
        name: &str,
        client_id: &str,
        platform: AdPlatform,
        budget_usd: Decimal,
        audience_details: &str,
        now: DateTime<Utc>,
    ) -> Result<&Campaign, LedgerError> {
        if budget_usd <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("budgetUSD", budget_usd));
        }
        self.client_index(client_id)?;
        self.campaigns.push(Campaign {
            id: crate::utils::new_id(),
            name: name.to_string(),
            client_id: client_id.to_string(),
            platform_id: platform,
            status: CampaignStatus::Pending,
            budget_usd,
            audience_details: audience_details.to_string(),
            actual_spend_usd: None,
            ad_account_id: None,
            profit: None,
            created_at: now,
            completed_at: None,
        });
        Ok(self.campaigns.last().unwrap())
    }

    /// Settle a campaign against a platform account: one logical transaction
    /// across campaign, client, account, and the transaction log.
    ///
    /// profit (BDT) = spend × client deposit rate − spend × account cost
    /// rate. The campaign moves to `completed` with its four derived fields
    /// set together; client and account balances each drop by `spend`; a
    /// spend record linking the campaign is appended. Returns the profit.
    pub fn complete_campaign(
        &mut self,
        campaign_id: &str,
        spend_usd: Decimal,
        ad_account_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Decimal, LedgerError> {
        let campaign_idx = self
            .campaigns
            .iter()
            .position(|c| c.id == campaign_id)
            .ok_or_else(|| LedgerError::MissingReference {
                entity: "campaign",
                id: campaign_id.to_string(),
            })?;
        if !self.campaigns[campaign_idx].is_open() {
            return Err(LedgerError::InvalidState {
                id: campaign_id.to_string(),
                status: self.campaigns[campaign_idx].status.to_string(),
            });
        }
        if spend_usd <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("spendUSD", spend_usd));
        }
        let owner_id = self.campaigns[campaign_idx].client_id.clone();
        let client_idx = self.client_index(&owner_id)?;
        let account_idx = self.account_index(ad_account_id)?;
        if self.accounts[account_idx].platform_id != self.campaigns[campaign_idx].platform_id {
            return Err(LedgerError::InvalidReference {
                entity: "ad account",
                id: ad_account_id.to_string(),
            });
        }
        if !self.client_overdraft && self.clients[client_idx].ad_balance_usd < spend_usd {
            return Err(LedgerError::InsufficientBalance {
                name: self.clients[client_idx].name.clone(),
                have: self.clients[client_idx].ad_balance_usd,
                need: spend_usd,
            });
        }

        // Validation done; every write below comes from this one snapshot.
        let client_rate = self.clients[client_idx].avg_deposit_rate;
        let cost_rate = self.accounts[account_idx].avg_cost_per_usd;
        let profit = spend_usd * client_rate - spend_usd * cost_rate;

        let campaign = &mut self.campaigns[campaign_idx];
        campaign.status = CampaignStatus::Completed;
        campaign.actual_spend_usd = Some(spend_usd);
        campaign.ad_account_id = Some(ad_account_id.to_string());
        campaign.profit = Some(profit);
        campaign.completed_at = Some(now);

        let client_id = self.clients[client_idx].id.clone();
        self.clients[client_idx].ad_balance_usd -= spend_usd;
        self.accounts[account_idx].balance_usd -= spend_usd;

        self.transactions.push(ClientAdTransaction {
            id: crate::utils::new_id(),
            client_id,
            r#type: AdTxType::Spend,
            amount_usd: spend_usd,
            amount_bdt: None,
            rate_per_usd: None,
            campaign_id: Some(campaign_id.to_string()),
            transaction_date: now,
        });
        Ok(profit)
    }

    /// Drop an open campaign: pending/running → cancelled, no balance
    /// effects.
    pub fn cancel_campaign(&mut self, campaign_id: &str) -> Result<(), LedgerError> {
        let campaign = self
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign_id)
            .ok_or_else(|| LedgerError::MissingReference {
                entity: "campaign",
                id: campaign_id.to_string(),
            })?;
        if !campaign.is_open() {
            return Err(LedgerError::InvalidState {
                id: campaign_id.to_string(),
                status: campaign.status.to_string(),
            });
        }
        campaign.status = CampaignStatus::Cancelled;
        Ok(())
    }
}
