// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Deserializer, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::errors::Error;

const REQUIRED_FIELDS: &str = "Title and body are required";

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Body of a create request. Both fields are optional on the wire so that a
/// missing field is reported as a validation failure rather than a decode one.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct AnnouncementDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

impl AnnouncementDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    pub(super) fn validate(self) -> Result<(String, String), Error> {
        match (self.title, self.body) {
            (Some(title), Some(body)) if !title.is_empty() && !body.is_empty() => {
                Ok((title, body))
            }
            _ => Err(Error::Validation(REQUIRED_FIELDS)),
        }
    }
}

impl AnnouncementPatch {
    pub fn hidden(is_hidden: bool) -> Self {
        Self {
            is_hidden: Some(is_hidden),
            ..Self::default()
        }
    }

    pub(super) fn validate(&self) -> Result<(), Error> {
        let empty_title = self.title.as_deref().map_or(false, str::is_empty);
        let empty_body = self.body.as_deref().map_or(false, str::is_empty);

        if empty_title || empty_body {
            return Err(Error::Validation(REQUIRED_FIELDS));
        }

        Ok(())
    }
}

impl Announcement {
    pub(super) fn apply(&mut self, patch: AnnouncementPatch, updated_at: String) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(is_hidden) = patch.is_hidden {
            self.is_hidden = is_hidden;
        }

        self.updated_at = updated_at;
    }
}

/// ISO-8601 in UTC with milliseconds, the format existing data files carry.
/// Only four digit years fit it.
pub(super) fn timestamp(at: OffsetDateTime) -> Result<String, Error> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );

    if !(0..=9999).contains(&at.year()) {
        return Err(Error::Timestamp(format!("year {} out of range", at.year())));
    }

    at.to_offset(UtcOffset::UTC)
        .format(&format)
        .map_err(|err| Error::Timestamp(err.to_string()))
}

/// Next id: the creation time in milliseconds, bumped past the largest id
/// already in the store so ids stay unique and increasing.
pub(super) fn next_id(existing: &[Announcement], now: OffsetDateTime) -> String {
    let now_ms = now.unix_timestamp_nanos() / 1_000_000;
    let last = existing
        .iter()
        .filter_map(|announcement| announcement.id.parse::<i128>().ok())
        .max();

    match last {
        Some(last) if last >= now_ms => (last + 1).to_string(),
        _ => now_ms.to_string(),
    }
}

fn deserialize_id<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(de)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
