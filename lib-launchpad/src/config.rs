//! Launchpad Configuration
//!
//! Fixed at construction, immutable thereafter; the Rust analogue of the
//! original deployment's constructor parameters.

use lib_types::{Address, Amount, Bps};
use serde::{Deserialize, Serialize};

use lib_crypto::{address_from_public_key, PUBLIC_KEY_BYTES};

use crate::curve::MAX_BPS;
use crate::errors::{LaunchpadError, LaunchpadResult};

/// Immutable launchpad parameters.
///
/// Construction validates every invariant once; afterwards the config is
/// shared read-only by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchpadConfig {
    signer_public_key: Vec<u8>,
    signer_address: Address,
    /// Global trading fee in basis points, charged on the base-asset side
    pub trading_fee_bps: Bps,
    /// External liquidity-pool router identity
    pub router: Address,
    /// Structured-message type fingerprint, agreed with the signer service
    pub create_type_fingerprint: [u8; 32],
    /// Pool-initialization fingerprint for deterministic pool derivation
    pub pool_init_fingerprint: [u8; 32],
    /// Virtual base-asset reserve seeded into every new market
    pub initial_virtual_base: Amount,
    /// Token allocation sold through the bonding curve
    pub curve_allocation: Amount,
    /// Token allocation reserved for the graduation handoff
    pub graduation_allocation: Amount,
}

impl LaunchpadConfig {
    /// Validate and freeze the launchpad parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        signer_public_key: Vec<u8>,
        trading_fee_bps: Bps,
        router: Address,
        create_type_fingerprint: [u8; 32],
        pool_init_fingerprint: [u8; 32],
        initial_virtual_base: Amount,
        curve_allocation: Amount,
        graduation_allocation: Amount,
    ) -> LaunchpadResult<Self> {
        if signer_public_key.len() != PUBLIC_KEY_BYTES {
            return Err(LaunchpadError::InvalidConfig(format!(
                "signer public key must be {} bytes, got {}",
                PUBLIC_KEY_BYTES,
                signer_public_key.len()
            )));
        }
        if trading_fee_bps > MAX_BPS {
            return Err(LaunchpadError::InvalidConfig(format!(
                "trading fee {} exceeds {} bps",
                trading_fee_bps, MAX_BPS
            )));
        }
        if router.is_zero() {
            return Err(LaunchpadError::InvalidConfig(
                "router address cannot be zero".to_string(),
            ));
        }
        if initial_virtual_base == 0 {
            return Err(LaunchpadError::InvalidConfig(
                "initial virtual base reserve cannot be zero".to_string(),
            ));
        }
        if curve_allocation == 0 || graduation_allocation == 0 {
            return Err(LaunchpadError::InvalidConfig(
                "token allocations cannot be zero".to_string(),
            ));
        }
        // the fixed total supply must fit the Amount width
        if curve_allocation.checked_add(graduation_allocation).is_none() {
            return Err(LaunchpadError::InvalidConfig(
                "total supply overflows".to_string(),
            ));
        }

        let signer_address = Address::new(address_from_public_key(&signer_public_key));

        Ok(Self {
            signer_public_key,
            signer_address,
            trading_fee_bps,
            router,
            create_type_fingerprint,
            pool_init_fingerprint,
            initial_virtual_base,
            curve_allocation,
            graduation_allocation,
        })
    }

    /// The trusted signer's public key bytes
    pub fn signer_public_key(&self) -> &[u8] {
        &self.signer_public_key
    }

    /// The address derived from the trusted signer's public key
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Fixed total supply of every issued token
    pub fn total_supply(&self) -> Amount {
        // checked at construction
        self.curve_allocation + self.graduation_allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_crypto::SignerKeypair;

    fn config_with(f: impl FnOnce(&mut ConfigArgs)) -> LaunchpadResult<LaunchpadConfig> {
        let signer = SignerKeypair::generate(Some(&[1u8; 32]));
        let mut args = ConfigArgs {
            signer_public_key: signer.public_key().to_vec(),
            trading_fee_bps: 300,
            router: Address::new([9u8; 32]),
            initial_virtual_base: 500,
            curve_allocation: 1_000,
            graduation_allocation: 1_000,
        };
        f(&mut args);
        LaunchpadConfig::new(
            args.signer_public_key,
            args.trading_fee_bps,
            args.router,
            [0xaa; 32],
            [0xbb; 32],
            args.initial_virtual_base,
            args.curve_allocation,
            args.graduation_allocation,
        )
    }

    struct ConfigArgs {
        signer_public_key: Vec<u8>,
        trading_fee_bps: Bps,
        router: Address,
        initial_virtual_base: Amount,
        curve_allocation: Amount,
        graduation_allocation: Amount,
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(|_| {}).unwrap();
        assert_eq!(config.trading_fee_bps, 300);
        assert_eq!(config.total_supply(), 2_000);
        assert!(!config.signer_address().is_zero());
    }

    #[test]
    fn test_fee_above_max_rejected() {
        assert!(matches!(
            config_with(|a| a.trading_fee_bps = 10_001),
            Err(LaunchpadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_router_rejected() {
        assert!(matches!(
            config_with(|a| a.router = Address::zero()),
            Err(LaunchpadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_reserves_rejected() {
        assert!(config_with(|a| a.initial_virtual_base = 0).is_err());
        assert!(config_with(|a| a.curve_allocation = 0).is_err());
        assert!(config_with(|a| a.graduation_allocation = 0).is_err());
    }

    #[test]
    fn test_supply_overflow_rejected() {
        assert!(config_with(|a| {
            a.curve_allocation = Amount::MAX;
            a.graduation_allocation = 1;
        })
        .is_err());
    }

    #[test]
    fn test_bad_key_length_rejected() {
        assert!(matches!(
            config_with(|a| a.signer_public_key = vec![0u8; 31]),
            Err(LaunchpadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_signer_address_matches_keypair() {
        let signer = SignerKeypair::generate(Some(&[1u8; 32]));
        let config = config_with(|_| {}).unwrap();
        assert_eq!(config.signer_address(), Address::new(signer.address()));
    }
}
