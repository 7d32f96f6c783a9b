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

use ethers::types::{Address, U256};
use ethers::utils::parse_ether;
use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::Error;

pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 10;

const PRICE_DECIMALS: usize = 18;

static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("invalid address pattern"));

/// A price tier, 1 through 10.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Level(u8);

impl Level {
    pub fn new(level: u8) -> Result<Self, Error> {
        if (LEVEL_MIN..=LEVEL_MAX).contains(&level) {
            Ok(Level(level))
        } else {
            Err(Error::Validation(format!(
                "level must be between {} and {}",
                LEVEL_MIN, LEVEL_MAX
            )))
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level(LEVEL_MIN)
    }
}

impl From<Level> for U256 {
    fn from(level: Level) -> Self {
        U256::from(level.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let level = value
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::Validation(format!("invalid level: {}", value)))?;

        Level::new(level)
    }
}

/// Parses a USD amount into the contracts' 18-decimal fixed point.
pub fn parse_price(raw: &str) -> Result<U256, Error> {
    let raw = raw.trim();
    let invalid = || Error::Validation("Please enter a valid price".to_string());

    let value: f64 = raw.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }

    let decimals = raw.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    if decimals > PRICE_DECIMALS {
        return Err(invalid());
    }

    let price = parse_ether(raw).map_err(|_| invalid())?;
    if price.is_zero() {
        return Err(invalid());
    }

    Ok(price)
}

pub fn parse_pool_wallet(raw: &str) -> Result<Address, Error> {
    let raw = raw.trim();
    let invalid = || Error::Validation("Please enter a valid wallet address".to_string());

    if !ADDRESS_PATTERN.is_match(raw) {
        return Err(invalid());
    }

    raw.parse::<Address>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_bounded() {
        assert_eq!(Level::default(), Level::new(1).unwrap());
        assert_eq!("10".parse::<Level>().unwrap(), Level::new(10).unwrap());
        assert!("0".parse::<Level>().is_err());
        assert!("11".parse::<Level>().is_err());
        assert!("two".parse::<Level>().is_err());
        assert_eq!(U256::from(Level::new(3).unwrap()), U256::from(3));
    }

    #[test]
    fn prices_scale_to_wei() {
        let one = U256::exp10(18);

        assert_eq!(parse_price("10").unwrap(), one * 10);
        assert_eq!(parse_price(" 12.5 ").unwrap(), one * 125 / 10);
        assert_eq!(parse_price("0.01").unwrap(), one / 100);
    }

    #[test]
    fn rejects_non_positive_prices() {
        for raw in ["", "0", "0.0", "-1", "abc", "NaN", "inf"] {
            assert!(parse_price(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn rejects_too_precise_prices() {
        assert!(parse_price("0.0000000000000000001").is_err());
        assert!(parse_price("10.0000000000000000001").is_err());
        assert_eq!(
            parse_price("0.000000000000000001").unwrap(),
            U256::from(1)
        );
    }

    #[test]
    fn validates_wallet_pattern() {
        let address = parse_pool_wallet("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap();
        assert_eq!(
            address,
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf".parse::<Address>().unwrap()
        );

        for raw in [
            "",
            "7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bd",
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdff",
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdg",
        ] {
            assert!(parse_pool_wallet(raw).is_err(), "accepted {:?}", raw);
        }
    }
}
