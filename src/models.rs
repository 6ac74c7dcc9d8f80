// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named cash pool mutated only by the finance ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxType::Income => write!(f, "income"),
            TxType::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TxType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// Immutable income/expense record. Amount is always stored positive; the
/// sign of the balance effect is derived from `r#type`. Corrections are
/// delete-then-recreate, never in-place edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub r#type: TxType,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: DateTime<Utc>,
    pub fund_id: String,
}

/// A customer holding a prepaid USD ad balance.
///
/// `avg_deposit_rate` is the last-observed BDT-per-USD rate, not a weighted
/// average; the ledger preserves the overwrite semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(rename = "adBalanceUSD")]
    pub ad_balance_usd: Decimal,
    pub avg_deposit_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPlatform {
    Facebook,
    Google,
    Tiktok,
}

impl std::fmt::Display for AdPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdPlatform::Facebook => write!(f, "facebook"),
            AdPlatform::Google => write!(f, "google"),
            AdPlatform::Tiktok => write!(f, "tiktok"),
        }
    }
}

impl std::str::FromStr for AdPlatform {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(AdPlatform::Facebook),
            "google" => Ok(AdPlatform::Google),
            "tiktok" => Ok(AdPlatform::Tiktok),
            other => Err(format!("unknown ad platform '{}'", other)),
        }
    }
}

/// A platform ad account with a spendable USD balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdAccount {
    pub id: String,
    pub name: String,
    pub platform_id: AdPlatform,
    #[serde(rename = "balanceUSD")]
    pub balance_usd: Decimal,
    #[serde(rename = "avgCostPerUSD")]
    pub avg_cost_per_usd: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdTxType {
    Deposit,
    Spend,
}

/// Immutable record of a client deposit (BDT converted into USD credit) or a
/// campaign spend (USD debit). Deposits carry both currency amounts and the
/// conversion rate; spends carry the campaign they settle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAdTransaction {
    pub id: String,
    pub client_id: String,
    pub r#type: AdTxType,
    #[serde(rename = "amountUSD")]
    pub amount_usd: Decimal,
    #[serde(rename = "amountBDT", skip_serializing_if = "Option::is_none")]
    pub amount_bdt: Option<Decimal>,
    #[serde(rename = "ratePerUSD", skip_serializing_if = "Option::is_none")]
    pub rate_per_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    pub transaction_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Pending,
    Running,
    Completed,
    Cancelled,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Pending => write!(f, "pending"),
            CampaignStatus::Running => write!(f, "running"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(CampaignStatus::Pending),
            "running" => Ok(CampaignStatus::Running),
            "completed" => Ok(CampaignStatus::Completed),
            "cancelled" => Ok(CampaignStatus::Cancelled),
            other => Err(format!("unknown campaign status '{}'", other)),
        }
    }
}

/// An ad request through its lifecycle: pending → running → completed, or
/// pending/running → cancelled. The four derived fields (`actual_spend_usd`,
/// `ad_account_id`, `profit`, `completed_at`) are set together, exactly once,
/// on the transition to completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub client_id: String,
    pub platform_id: AdPlatform,
    pub status: CampaignStatus,
    #[serde(rename = "budgetUSD")]
    pub budget_usd: Decimal,
    #[serde(default)]
    pub audience_details: String,
    #[serde(rename = "actualSpendUSD", skip_serializing_if = "Option::is_none")]
    pub actual_spend_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_account_id: Option<String>,
    /// Realized margin in BDT, from the deposit/cost rate spread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            CampaignStatus::Pending | CampaignStatus::Running
        )
    }
}
