// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod announcement;
pub mod errors;
pub mod manager;

pub use announcement::{Announcement, AnnouncementDraft, AnnouncementPatch};
pub use errors::Error;
pub use manager::AnnouncementStore;
