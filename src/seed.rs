// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Default seed data used when a collection has never been written.

use rust_decimal::Decimal;

use crate::models::{AdAccount, Campaign, Client, ClientAdTransaction, Fund, Transaction};

pub fn default_funds() -> Vec<Fund> {
    ["Main Account", "Tax Fund", "Savings"]
        .into_iter()
        .map(|name| Fund {
            id: crate::utils::new_id(),
            name: name.to_string(),
            balance: Decimal::ZERO,
        })
        .collect()
}

pub fn default_transactions() -> Vec<Transaction> {
    Vec::new()
}

pub fn default_clients() -> Vec<Client> {
    Vec::new()
}

pub fn default_accounts() -> Vec<AdAccount> {
    Vec::new()
}

pub fn default_campaigns() -> Vec<Campaign> {
    Vec::new()
}

pub fn default_ad_transactions() -> Vec<ClientAdTransaction> {
    Vec::new()
}
