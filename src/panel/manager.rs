// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use ethers::contract::builders::ContractCall;
use ethers::providers::Middleware;
use ethers::types::{Address, TxHash, U256, U64};

use super::contracts::{OrbitContract, Target};
use super::input::{self, Level};
use super::transaction::TxState;
use super::Error;
use crate::config::Contracts;

/// Current on-chain admin values of the selected contract.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PanelView {
    pub target: Target,
    pub address: Address,
    pub level: Level,
    pub pool_wallet: Address,
    pub level_price: U256,
    pub owner: Address,
}

/// A mined and successful write.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Confirmation {
    pub hash: TxHash,
    /// Values read back after confirmation, `None` when that read failed.
    pub view: Option<PanelView>,
}

/// Reads and writes the admin settings of one Orbit contract at a time.
///
/// Each of the two write controls carries its own `TxState`; a control that
/// is submitted or pending refuses another submission.
pub struct ContractPanel<M> {
    client: Arc<M>,
    contracts: Contracts,
    contract: OrbitContract<M>,
    target: Target,
    level: Level,
    confirmations: usize,
    price_tx: TxState,
    pool_wallet_tx: TxState,
}

impl<M: Middleware + 'static> ContractPanel<M> {
    pub fn new(client: Arc<M>, contracts: Contracts, target: Target) -> Result<Self, Error> {
        let contract = OrbitContract::new(Self::resolve(&contracts, target)?, client.clone());

        Ok(Self {
            client,
            contracts,
            contract,
            target,
            level: Level::default(),
            confirmations: 1,
            price_tx: TxState::Idle,
            pool_wallet_tx: TxState::Idle,
        })
    }

    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    fn resolve(contracts: &Contracts, target: Target) -> Result<Address, Error> {
        contracts
            .address(target)
            .ok_or_else(|| Error::Validation(format!("no address configured for {}", target)))
    }

    pub fn select(&mut self, target: Target) -> Result<(), Error> {
        let address = Self::resolve(&self.contracts, target)?;

        self.contract = OrbitContract::new(address, self.client.clone());
        self.target = target;

        tracing::debug!("selected {} at {:?}", target, address);

        Ok(())
    }

    pub fn select_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn price_tx(&self) -> &TxState {
        &self.price_tx
    }

    pub fn pool_wallet_tx(&self) -> &TxState {
        &self.pool_wallet_tx
    }

    pub async fn pool_wallet(&self) -> Result<Address, Error> {
        self.contract
            .pool_wallet()
            .call()
            .await
            .map_err(|err| Error::ChainCall(err.to_string()))
    }

    pub async fn level_price(&self) -> Result<U256, Error> {
        self.contract
            .level_price_usd(self.level.into())
            .call()
            .await
            .map_err(|err| Error::ChainCall(err.to_string()))
    }

    pub async fn owner(&self) -> Result<Address, Error> {
        self.contract
            .owner()
            .call()
            .await
            .map_err(|err| Error::ChainCall(err.to_string()))
    }

    pub async fn refresh(&self) -> Result<PanelView, Error> {
        let pool_wallet = self.pool_wallet().await?;
        let level_price = self.level_price().await?;
        let owner = self.owner().await?;

        Ok(PanelView {
            target: self.target,
            address: self.address(),
            level: self.level,
            pool_wallet,
            level_price,
            owner,
        })
    }

    /// Sets the USD price of the selected level. `raw` is a decimal amount.
    pub async fn submit_level_price(&mut self, raw: &str) -> Result<Confirmation, Error> {
        if self.price_tx.is_busy() {
            return Err(Error::Busy);
        }

        let price = input::parse_price(raw)?;
        let call = self.contract.set_level_price_usd(self.level.into(), price);

        tracing::info!(
            "setting {} level {} price to {} USD",
            self.target,
            self.level,
            raw.trim()
        );

        let hash = execute(&mut self.price_tx, call, self.confirmations).await?;

        Ok(self.reread(hash).await)
    }

    pub async fn submit_pool_wallet(&mut self, raw: &str) -> Result<Confirmation, Error> {
        if self.pool_wallet_tx.is_busy() {
            return Err(Error::Busy);
        }

        let wallet = input::parse_pool_wallet(raw)?;
        let call = self.contract.update_pool_wallet(wallet);

        tracing::info!("updating {} pool wallet to {:?}", self.target, wallet);

        let hash = execute(&mut self.pool_wallet_tx, call, self.confirmations).await?;

        Ok(self.reread(hash).await)
    }

    // The write already settled, so a failed read is only logged
    async fn reread(&self, hash: TxHash) -> Confirmation {
        let view = match self.refresh().await {
            Ok(view) => Some(view),
            Err(err) => {
                tracing::warn!(
                    "transaction {:?} confirmed but re-reading {} failed: {}",
                    hash,
                    self.target,
                    err
                );
                None
            }
        };

        Confirmation { hash, view }
    }
}

async fn execute<M: Middleware + 'static>(
    state: &mut TxState,
    call: ContractCall<M, ()>,
    confirmations: usize,
) -> Result<TxHash, Error> {
    state.submit()?;

    let pending = match call.send().await {
        Ok(pending) => pending,
        Err(err) => return Err(settle_failed(state, err.to_string())),
    };

    let hash = pending.tx_hash();
    state.pending(hash)?;

    tracing::info!("transaction pending: {:?}", hash);

    let failure = match pending.confirmations(confirmations).await {
        Ok(Some(receipt)) if receipt.status == Some(U64::one()) => {
            state.confirm()?;

            tracing::info!("transaction confirmed: {:?}", hash);

            return Ok(hash);
        }
        Ok(Some(_)) => "transaction reverted".to_string(),
        Ok(None) => "transaction dropped".to_string(),
        Err(err) => err.to_string(),
    };

    Err(settle_failed(state, failure))
}

fn settle_failed(state: &mut TxState, reason: String) -> Error {
    tracing::warn!("transaction failed: {}", reason);

    match state.fail(reason.clone()) {
        Ok(()) => Error::ChainCall(reason),
        Err(err) => err.into(),
    }
}
