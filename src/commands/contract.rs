// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::types::Address;

use crate::config::Config;
use crate::panel::display::{format_price, full_address, short_address};
use crate::panel::input::Level;
use crate::panel::contracts::TARGETS;
use crate::panel::{ContractPanel, PanelView, Target};
use crate::wallet::SESSION;

pub fn command() -> Command {
    Command::new("contract")
        .about("Read and update the admin settings of the Orbit contracts")
        .arg(
            Arg::new("contract")
                .short('t')
                .long("contract")
                .help("Contract to operate on")
                .value_parser(["orbit-a", "orbit-b"])
                .default_value("orbit-a")
                .global(true),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .help("Price level, 1 to 10")
                .default_value("1")
                .global(true),
        )
        .subcommand(
            Command::new("read")
                .about("Show pool wallet, level price and owner (default)")
                .arg(
                    Arg::new("all")
                        .short('a')
                        .long("all")
                        .help("Read both Orbit contracts")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("set-level-price")
                .about("Set the USD price of a level")
                .arg(Arg::new("price").required(true).help("New price in USD, e.g. 10.00")),
        )
        .subcommand(
            Command::new("update-pool-wallet")
                .about("Point the contract at a new pool wallet")
                .arg(Arg::new("wallet").required(true).help("0x-prefixed address")),
        )
}

fn print_view(view: &PanelView, admin: Option<Address>) {
    let owner_note = match admin {
        Some(admin) if admin == view.owner => " (connected admin)",
        Some(_) => " (not the connected wallet)",
        None => "",
    };

    println!("{} ({})", view.target, full_address(view.address));
    println!(
        "  level {} price:  {} USD",
        view.level,
        format_price(view.level_price)
    );
    println!("  pool wallet:    {}", full_address(view.pool_wallet));
    println!("  owner:          {}{}", short_address(view.owner), owner_note);
}

pub async fn run(conf: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
    let target: Target = matches
        .get_one::<String>("contract")
        .map(String::as_str)
        .unwrap_or("orbit-a")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let level: Level = matches
        .get_one::<String>("level")
        .map(String::as_str)
        .unwrap_or("1")
        .parse()?;

    let admin = conf
        .admin
        .address
        .context("admin.address is not configured")?;
    let private_key = conf
        .admin
        .private_key
        .as_deref()
        .context("admin.private_key is not configured")?;

    SESSION.connect(private_key, admin, conf.chain.chain_id)?;

    let result = execute(conf, target, level, matches).await;

    SESSION.disconnect();

    result
}

async fn execute(
    conf: &Config,
    target: Target,
    level: Level,
    matches: &ArgMatches,
) -> anyhow::Result<()> {
    let wallet = SESSION.wallet()?;
    let provider = Provider::<Http>::try_from(conf.chain.rpc_url.as_str())?;
    let client = Arc::new(SignerMiddleware::new(provider, wallet));

    let mut panel =
        ContractPanel::new(client, conf.contracts, target)?.with_confirmations(conf.chain.confirmations);
    panel.select_level(level);

    let view = match matches.subcommand() {
        Some(("set-level-price", sub)) => {
            let price = sub
                .get_one::<String>("price")
                .context("missing argument: price")?;

            let confirmation = panel.submit_level_price(price).await?;
            println!("price update {}", panel.price_tx());
            confirmation.view
        }
        Some(("update-pool-wallet", sub)) => {
            let wallet = sub
                .get_one::<String>("wallet")
                .context("missing argument: wallet")?;

            let confirmation = panel.submit_pool_wallet(wallet).await?;
            println!("pool wallet update {}", panel.pool_wallet_tx());
            confirmation.view
        }
        Some(("read", sub)) if sub.get_flag("all") => {
            for target in TARGETS {
                panel.select(target)?;
                print_view(&panel.refresh().await?, SESSION.address());
            }

            return Ok(());
        }
        _ => {
            tracing::debug!("reading {} at {:?}", panel.target(), panel.address());

            Some(panel.refresh().await?)
        }
    };

    match view {
        Some(view) => print_view(&view, SESSION.address()),
        None => println!("updated values could not be read back, run `contract read` to check"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_args_are_global() {
        let matches = command()
            .try_get_matches_from(["contract", "set-level-price", "12.5", "-t", "orbit-b", "-l", "3"])
            .unwrap();

        assert_eq!(
            matches.get_one::<String>("contract").map(String::as_str),
            Some("orbit-b")
        );
        assert_eq!(
            matches.get_one::<String>("level").map(String::as_str),
            Some("3")
        );
    }

    #[test]
    fn read_all_flag() {
        let matches = command()
            .try_get_matches_from(["contract", "read", "--all"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "read");
        assert!(sub.get_flag("all"));
    }

    #[test]
    fn unknown_contract_is_rejected() {
        assert!(command()
            .try_get_matches_from(["contract", "-t", "orbit-c", "read"])
            .is_err());
    }
}
