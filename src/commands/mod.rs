// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod announcements;
pub mod contract;

use clap::{Arg, Command};

pub fn build() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .default_value("./orbit-admin.toml")
                .global(true),
        )
        .subcommand(Command::new("serve").about("Serve the announcement API (default)"))
        .subcommand(announcements::command())
        .subcommand(contract::command())
}
