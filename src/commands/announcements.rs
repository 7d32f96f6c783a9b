// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::client::AnnouncementClient;
use crate::config::Config;
use crate::store::{Announcement, AnnouncementDraft, AnnouncementPatch};

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Announcement id")
}

pub fn command() -> Command {
    Command::new("announcements")
        .about("Manage announcements through the portal API")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list").about("List announcements").arg(
                Arg::new("visible-only")
                    .long("visible-only")
                    .action(ArgAction::SetTrue)
                    .help("Skip hidden announcements"),
            ),
        )
        .subcommand(
            Command::new("create")
                .about("Create an announcement")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("body").long("body").required(true)),
        )
        .subcommand(
            Command::new("update")
                .about("Change the title and/or body of an announcement")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("body").long("body")),
        )
        .subcommand(
            Command::new("hide")
                .about("Hide an announcement")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Show a hidden announcement")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip the visibility of an announcement")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete an announcement")
                .arg(id_arg()),
        )
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.get_one::<String>(name).map(String::as_str)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    value(matches, name).with_context(|| format!("missing argument: {}", name))
}

fn print_row(announcement: &Announcement) {
    println!(
        "{}  {}  {:<7}  {}",
        announcement.id,
        announcement.created_at,
        if announcement.is_hidden { "hidden" } else { "visible" },
        announcement.title
    );
}

pub async fn run(conf: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
    let client = AnnouncementClient::new(&conf.client.api_url)?;

    tracing::debug!("using announcement api at {}", conf.client.api_url);

    match matches.subcommand() {
        Some(("list", sub)) => {
            let visible_only = sub.get_flag("visible-only");
            let announcements: Vec<Announcement> = client
                .list()
                .await?
                .into_iter()
                .filter(|announcement| !visible_only || !announcement.is_hidden)
                .collect();

            if announcements.is_empty() {
                println!("no announcements");
            }
            announcements.iter().for_each(print_row);
        }
        Some(("create", sub)) => {
            let draft = AnnouncementDraft::new(required(sub, "title")?, required(sub, "body")?);

            print_row(&client.create(&draft).await?);
        }
        Some(("update", sub)) => {
            let patch = AnnouncementPatch {
                title: value(sub, "title").map(str::to_string),
                body: value(sub, "body").map(str::to_string),
                is_hidden: None,
            };

            print_row(&client.update(required(sub, "id")?, &patch).await?);
        }
        Some(("hide", sub)) => print_row(&client.set_hidden(required(sub, "id")?, true).await?),
        Some(("show", sub)) => print_row(&client.set_hidden(required(sub, "id")?, false).await?),
        Some(("toggle", sub)) => {
            let id = required(sub, "id")?;
            let announcements = client.list().await?;
            let announcement = announcements
                .iter()
                .find(|announcement| announcement.id == id)
                .with_context(|| format!("announcement not found: {}", id))?;

            print_row(&client.toggle_visibility(announcement).await?);
        }
        Some(("delete", sub)) => {
            let id = required(sub, "id")?;

            client.delete(id).await?;
            println!("deleted {}", id);
        }
        _ => anyhow::bail!("unknown announcements command"),
    }

    Ok(())
}
