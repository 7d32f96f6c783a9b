// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

mod defaults;

pub mod logger;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File, FileFormat};
use ethers::types::Address;
use serde::Deserialize;
use url::Url;

use crate::panel::contracts::Target;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub chain: Chain,
    #[serde(default)]
    pub admin: Admin,
    #[serde(default)]
    pub contracts: Contracts,
    #[serde(default)]
    pub client: Client,
}

impl Config {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(false))
    }

    #[cfg(test)]
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::build(File::from_str(source, FileFormat::Toml))
    }

    fn build<F>(file: File<F, FileFormat>) -> Result<Self, ConfigError>
    where
        File<F, FileFormat>: config::Source + Send + Sync + 'static,
    {
        let s = config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("orbit_admin")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[derive(Deserialize)]
pub struct Server {
    #[serde(default = "defaults::server_log_level")]
    pub log_level: String,

    #[serde(default = "defaults::server_inet")]
    pub inet: SocketAddr,

    #[serde(default)]
    pub path_prefix: String,

    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            log_level: defaults::server_log_level(),
            inet: defaults::server_inet(),
            path_prefix: String::new(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct Store {
    #[serde(default = "defaults::store_path")]
    pub path: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: defaults::store_path(),
        }
    }
}

#[derive(Deserialize)]
pub struct Chain {
    #[serde(default = "defaults::chain_rpc_url")]
    pub rpc_url: Url,

    #[serde(default = "defaults::chain_id")]
    pub chain_id: u64,

    #[serde(default = "defaults::chain_confirmations")]
    pub confirmations: usize,
}

impl Default for Chain {
    fn default() -> Self {
        Self {
            rpc_url: defaults::chain_rpc_url(),
            chain_id: defaults::chain_id(),
            confirmations: defaults::chain_confirmations(),
        }
    }
}

/// The wallet allowed into the portal. The private key is only needed for
/// `contract` commands and is best supplied through the environment.
#[derive(Deserialize, Default)]
pub struct Admin {
    pub address: Option<Address>,
    pub private_key: Option<String>,
}

#[derive(Deserialize, Default, Clone, Copy)]
pub struct Contracts {
    pub orbit_a: Option<Address>,
    pub orbit_b: Option<Address>,
}

impl Contracts {
    pub fn address(&self, target: Target) -> Option<Address> {
        match target {
            Target::OrbitA => self.orbit_a,
            Target::OrbitB => self.orbit_b,
        }
    }
}

#[derive(Deserialize)]
pub struct Client {
    #[serde(default = "defaults::client_api_url")]
    pub api_url: Url,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            api_url: defaults::client_api_url(),
        }
    }
}
