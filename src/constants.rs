//! Gas defaults and unit helpers

/// Gas limit applied to claim and transfer calls unless overridden.
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Default gas price in gwei.
pub const DEFAULT_GAS_PRICE_GWEI: u64 = 20;

/// Wei per gwei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Convert a gwei amount to wei.
pub fn gwei_to_wei(gwei: u64) -> u128 {
    gwei as u128 * WEI_PER_GWEI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gwei_to_wei() {
        assert_eq!(gwei_to_wei(20), 20_000_000_000);
        assert_eq!(gwei_to_wei(0), 0);
        assert_eq!(gwei_to_wei(1), WEI_PER_GWEI);
    }

    #[test]
    fn test_default_gas_price_is_nonzero() {
        assert!(gwei_to_wei(DEFAULT_GAS_PRICE_GWEI) > 0);
    }
}
