// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use url::Url;

pub fn server_log_level() -> String {
    "info".to_string()
}

pub fn server_inet() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 4000))
}

pub fn store_path() -> PathBuf {
    PathBuf::from("./data/announcements.json")
}

// Polygon Amoy testnet
pub fn chain_rpc_url() -> Url {
    Url::parse("https://rpc-amoy.polygon.technology").expect("invalid default rpc url")
}

pub fn chain_id() -> u64 {
    80002
}

pub fn chain_confirmations() -> usize {
    1
}

pub fn client_api_url() -> Url {
    Url::parse("http://127.0.0.1:4000").expect("invalid default api url")
}
