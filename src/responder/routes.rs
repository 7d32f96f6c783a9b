// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use poem::{
    handler,
    http::StatusCode,
    web::{Data, Json, Path},
    IntoResponse, Response,
};
use serde::Serialize;

use crate::store::{Announcement, AnnouncementDraft, AnnouncementPatch, AnnouncementStore, Error};

const INVALID_BODY: &str = "Invalid request body";

#[derive(Serialize)]
pub(crate) struct Deleted {
    success: bool,
}

fn decoded<T>(body: poem::Result<Json<T>>) -> Result<T, Error> {
    body.map(|Json(value)| value).map_err(|err| {
        tracing::debug!("undecodable request body: {}", err);

        Error::Validation(INVALID_BODY)
    })
}

fn logged(action: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| {
        if err.is_internal() {
            tracing::error!("failed to {} announcements: {}", action, err);
        } else {
            tracing::debug!("rejected {} request: {}", action, err);
        }

        err
    }
}

#[handler]
pub(crate) async fn list(
    store: Data<&Arc<AnnouncementStore>>,
) -> poem::Result<Json<Vec<Announcement>>> {
    let announcements = store.list().await.map_err(logged("fetch"))?;

    Ok(Json(announcements))
}

#[handler]
pub(crate) async fn create(
    store: Data<&Arc<AnnouncementStore>>,
    draft: poem::Result<Json<AnnouncementDraft>>,
) -> poem::Result<Response> {
    let draft = decoded(draft)?;
    let announcement = store.create(draft).await.map_err(logged("create"))?;

    Ok(Json(announcement)
        .with_status(StatusCode::CREATED)
        .into_response())
}

#[handler]
pub(crate) async fn update(
    store: Data<&Arc<AnnouncementStore>>,
    Path(id): Path<String>,
    patch: poem::Result<Json<AnnouncementPatch>>,
) -> poem::Result<Json<Announcement>> {
    // An unknown id is reported before a bad body
    let patch = match decoded(patch) {
        Ok(patch) => patch,
        Err(err) => {
            store.find(&id).await.map_err(logged("update"))?;
            return Err(err.into());
        }
    };

    let announcement = store.update(&id, patch).await.map_err(logged("update"))?;

    Ok(Json(announcement))
}

#[handler]
pub(crate) async fn delete(
    store: Data<&Arc<AnnouncementStore>>,
    Path(id): Path<String>,
) -> poem::Result<Json<Deleted>> {
    store.delete(&id).await.map_err(logged("delete"))?;

    Ok(Json(Deleted { success: true }))
}
