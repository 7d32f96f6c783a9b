// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tokio::fs;
use tokio::sync::Mutex;

use super::announcement::{next_id, timestamp};
use super::{Announcement, AnnouncementDraft, AnnouncementPatch, Error};

/// Announcements kept as one pretty-printed JSON array on disk.
///
/// Every mutation reads the whole file, transforms it in memory and replaces
/// the file. Mutations from this process are serialized by `writer`; another
/// process writing the same file is still last-writer-wins.
pub struct AnnouncementStore {
    path: PathBuf,
    writer: Mutex<()>,
}

impl AnnouncementStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Result<Vec<Announcement>, Error> {
        self.read_all().await
    }

    pub async fn find(&self, id: &str) -> Result<Announcement, Error> {
        self.read_all()
            .await?
            .into_iter()
            .find(|announcement| announcement.id == id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    pub async fn create(&self, draft: AnnouncementDraft) -> Result<Announcement, Error> {
        let (title, body) = draft.validate()?;

        let _guard = self.writer.lock().await;
        let mut announcements = self.read_all().await?;

        let now = OffsetDateTime::now_utc();
        let created_at = timestamp(now)?;
        let announcement = Announcement {
            id: next_id(&announcements, now),
            title,
            body,
            updated_at: created_at.clone(),
            created_at,
            is_hidden: false,
        };

        announcements.push(announcement.clone());
        self.write_all(&announcements).await?;

        tracing::info!("created announcement: {}", announcement.id);

        Ok(announcement)
    }

    pub async fn update(&self, id: &str, patch: AnnouncementPatch) -> Result<Announcement, Error> {
        let _guard = self.writer.lock().await;
        let mut announcements = self.read_all().await?;

        let announcement = announcements
            .iter_mut()
            .find(|announcement| announcement.id == id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })?;

        patch.validate()?;
        announcement.apply(patch, timestamp(OffsetDateTime::now_utc())?);
        let updated = announcement.clone();

        self.write_all(&announcements).await?;

        tracing::info!("updated announcement: {}", id);

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let _guard = self.writer.lock().await;
        let mut announcements = self.read_all().await?;

        let count = announcements.len();
        announcements.retain(|announcement| announcement.id != id);

        if announcements.len() == count {
            return Err(Error::NotFound { id: id.to_string() });
        }

        self.write_all(&announcements).await?;

        tracing::info!("deleted announcement: {}", id);

        Ok(())
    }

    async fn ensure_dir(&self) -> Result<(), Error> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(fs::create_dir_all(dir).await?),
            _ => Ok(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Announcement>, Error> {
        self.ensure_dir().await?;

        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&data)?)
    }

    async fn write_all(&self, announcements: &[Announcement]) -> Result<(), Error> {
        self.ensure_dir().await?;

        let data = serde_json::to_vec_pretty(announcements)?;

        // Swap in a complete file so concurrent readers never see a partial one
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, data).await?;
        fs::rename(&staging, &self.path).await?;

        tracing::debug!(
            "wrote {} announcements to: {:?}",
            announcements.len(),
            self.path
        );

        Ok(())
    }
}
