// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::transaction::InvalidTransition;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("a transaction is already in flight")]
    Busy,

    #[error("contract call failed: {0}")]
    ChainCall(String),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}
