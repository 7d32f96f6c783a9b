// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(&'static str),
    #[error("announcement not found: {id}")]
    NotFound { id: String },
    #[error("io error: {error}")]
    Io {
        #[from]
        #[source]
        error: ::std::io::Error,
    },
    #[error("malformed announcement file: {error}")]
    Decode {
        #[from]
        #[source]
        error: serde_json::Error,
    },
    #[error("cannot format timestamp: {0}")]
    Timestamp(String),
}

impl Error {
    /// Failures on the server side, as opposed to a bad request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::Decode { .. } | Error::Timestamp(_)
        )
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response {
        // Storage details stay in the logs
        let message = match self {
            Error::Validation(message) => *message,
            Error::NotFound { .. } => "Announcement not found",
            _ => "Failed to access announcements",
        };

        Json(ErrorBody { error: message })
            .with_status(self.status())
            .into_response()
    }
}
