// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::panel::display::short_address;

/// Wallet session shared by the whole process.
pub static SESSION: Lazy<WalletSession> = Lazy::new(WalletSession::default);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("wallet {address:?} is not the admin wallet")]
    NotAdmin { address: Address },

    #[error("no admin wallet connected")]
    Disconnected,
}

/// Holds the connected admin wallet, if any. Only the configured admin
/// address can ever be connected.
#[derive(Default)]
pub struct WalletSession {
    wallet: RwLock<Option<LocalWallet>>,
}

impl WalletSession {
    pub fn connect(&self, private_key: &str, admin: Address, chain_id: u64) -> Result<Address, Error> {
        let wallet = private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|err| Error::InvalidKey(err.to_string()))?
            .with_chain_id(chain_id);
        let address = wallet.address();

        // Address equality is on raw bytes, so checksum casing never matters
        if address != admin {
            tracing::warn!("refused wallet {}: not the admin wallet", short_address(address));

            self.disconnect();
            return Err(Error::NotAdmin { address });
        }

        *self.wallet.write() = Some(wallet);

        tracing::info!("admin wallet connected: {}", short_address(address));

        Ok(address)
    }

    pub fn disconnect(&self) {
        if let Some(wallet) = self.wallet.write().take() {
            tracing::info!("wallet disconnected: {}", short_address(wallet.address()));
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.wallet.read().as_ref().map(Signer::address)
    }

    pub fn wallet(&self) -> Result<LocalWallet, Error> {
        self.wallet.read().clone().ok_or(Error::Disconnected)
    }
}
