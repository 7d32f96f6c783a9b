// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use ethers::types::{Address, U256};
use ethers::utils::{format_ether, to_checksum};

/// `0x1234...abcd`, the way addresses are shown in the dashboard header.
pub fn short_address(address: Address) -> String {
    let full = to_checksum(&address, None);

    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

pub fn full_address(address: Address) -> String {
    to_checksum(&address, None)
}

/// Renders an 18-decimal fixed-point price in USD, without trailing zeros.
pub fn format_price(value: U256) -> String {
    let formatted = format_ether(value);

    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => format!("{}.0", formatted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_checksummed() {
        let address: Address = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf".parse().unwrap();

        assert_eq!(short_address(address), "0x7E5F...5Bdf");
        assert_eq!(
            full_address(address),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn formats_prices() {
        let one = U256::exp10(18);

        assert_eq!(format_price(one * 10), "10.0");
        assert_eq!(format_price(one * 25 / 10), "2.5");
        assert_eq!(format_price(U256::from(1)), "0.000000000000000001");
        assert_eq!(format_price(U256::zero()), "0.0");
    }
}
