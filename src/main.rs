// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

#![deny(rust_2018_idioms)]

mod client;
mod commands;
mod config;
mod panel;
mod responder;
mod store;
mod wallet;

use std::path::PathBuf;

use clap::ArgMatches;

use crate::config::logger::ConfigLogger;
use crate::config::Config;

struct AppArgs {
    config: PathBuf,
    matches: ArgMatches,
}

fn make_app_args() -> AppArgs {
    let matches = commands::build().get_matches();

    // Generate owned app arguments
    AppArgs {
        config: matches
            .get_one::<String>("config")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./orbit-admin.toml")),
        matches,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = make_app_args();
    let conf = Config::new(&args.config)?;

    // Initialize shared logger
    ConfigLogger::init(&conf.server.log_level)?;

    tracing::debug!("loaded configuration from {:?}", args.config);

    match args.matches.subcommand() {
        Some(("announcements", matches)) => commands::announcements::run(&conf, matches).await,
        Some(("contract", matches)) => commands::contract::run(&conf, matches).await,
        _ => {
            tracing::info!("starting up");

            responder::manager::run(&conf).await?;

            tracing::info!("shutting down server");
            Ok(())
        }
    }
}
