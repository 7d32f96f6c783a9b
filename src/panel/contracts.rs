// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use ethers::prelude::abigen;

// Both Orbit deployments expose the same admin surface
abigen!(
    OrbitContract,
    r#"[
        function setLevelPriceUSD(uint256 level, uint256 priceUSD) external
        function updatePoolWallet(address newWallet) external
        function poolWallet() external view returns (address)
        function levelPriceUSD(uint256 level) external view returns (uint256)
        function owner() external view returns (address)
    ]"#
);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    OrbitA,
    OrbitB,
}

pub const TARGETS: [Target; 2] = [Target::OrbitA, Target::OrbitB];

impl Target {
    pub fn label(&self) -> &'static str {
        match self {
            Target::OrbitA => "Orbit A",
            Target::OrbitB => "Orbit B",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "orbit-a" | "orbita" | "a" => Ok(Target::OrbitA),
            "orbit-b" | "orbitb" | "b" => Ok(Target::OrbitB),
            other => Err(format!("unknown contract: {}", other)),
        }
    }
}
