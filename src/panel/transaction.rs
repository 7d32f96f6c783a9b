// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use ethers::types::TxHash;

/// Lifecycle of one write submitted from the panel.
///
/// `Idle -> Submitted -> Pending -> Confirmed`, with `Failed` reachable from
/// `Submitted` (the wallet or provider rejected it before a hash existed) and
/// from `Pending` (dropped or reverted). There is no retry: a new submission
/// starts over from a settled state.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TxState {
    #[default]
    Idle,
    Submitted,
    Pending {
        hash: TxHash,
    },
    Confirmed {
        hash: TxHash,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("cannot {event} a transaction that is {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub event: &'static str,
}

impl TxState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxState::Idle => "idle",
            TxState::Submitted => "submitted",
            TxState::Pending { .. } => "pending",
            TxState::Confirmed { .. } => "confirmed",
            TxState::Failed { .. } => "failed",
        }
    }

    /// Busy states keep the submit control disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, TxState::Submitted | TxState::Pending { .. })
    }

    pub fn submit(&mut self) -> Result<(), InvalidTransition> {
        if self.is_busy() {
            return Err(self.invalid("submit"));
        }

        *self = TxState::Submitted;
        Ok(())
    }

    pub fn pending(&mut self, hash: TxHash) -> Result<(), InvalidTransition> {
        match self {
            TxState::Submitted => {
                *self = TxState::Pending { hash };
                Ok(())
            }
            _ => Err(self.invalid("track")),
        }
    }

    pub fn confirm(&mut self) -> Result<(), InvalidTransition> {
        match self {
            TxState::Pending { hash } => {
                let hash = *hash;
                *self = TxState::Confirmed { hash };
                Ok(())
            }
            _ => Err(self.invalid("confirm")),
        }
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), InvalidTransition> {
        if !self.is_busy() {
            return Err(self.invalid("fail"));
        }

        *self = TxState::Failed {
            reason: reason.into(),
        };
        Ok(())
    }

    fn invalid(&self, event: &'static str) -> InvalidTransition {
        InvalidTransition {
            from: self.as_str(),
            event,
        }
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxState::Pending { hash } | TxState::Confirmed { hash } => {
                write!(f, "{} ({:?})", self.as_str(), hash)
            }
            TxState::Failed { reason } => write!(f, "failed: {}", reason),
            _ => f.write_str(self.as_str()),
        }
    }
}
