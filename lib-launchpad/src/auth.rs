//! Authorization Verifier
//!
//! Validates a signed creation request against the trusted signer, the
//! request deadline, and the creator's current nonce. Verification is
//! read-only: the nonce is consumed later, in the same commit step that
//! registers the market, so a creation that fails after verification
//! leaves the nonce untouched by construction.

use lib_types::Timestamp;

use crate::config::LaunchpadConfig;
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::nonces::NonceRegistry;
use crate::request::CreateTokenRequest;

/// Check expiry, signature, and nonce for a creation request.
///
/// Order matters and is part of the interface: an expired request fails
/// with `Expired` even when its signature is valid, and a forged
/// signature fails before the nonce is inspected.
pub fn verify_create_request(
    config: &LaunchpadConfig,
    nonces: &NonceRegistry,
    request: &CreateTokenRequest,
    signature: &[u8],
    now: Timestamp,
) -> LaunchpadResult<()> {
    if now > request.expiry {
        return Err(LaunchpadError::Expired {
            expiry: request.expiry,
            now,
        });
    }

    let digest = request.digest(&config.create_type_fingerprint);
    match lib_crypto::verify_detached(&digest, signature, config.signer_public_key()) {
        Ok(true) => {}
        // malformed signatures and failed verification are the same to us
        _ => return Err(LaunchpadError::InvalidSignature),
    }

    let expected = nonces.current(&request.creator);
    if request.nonce != expected {
        return Err(LaunchpadError::NonceMismatch {
            expected,
            got: request.nonce,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_crypto::SignerKeypair;
    use lib_types::Address;

    fn setup() -> (SignerKeypair, LaunchpadConfig, NonceRegistry) {
        let signer = SignerKeypair::generate(Some(&[1u8; 32]));
        let config = LaunchpadConfig::new(
            signer.public_key().to_vec(),
            300,
            Address::new([9u8; 32]),
            [0xaa; 32],
            [0xbb; 32],
            500,
            1_000,
            1_000,
        )
        .unwrap();
        (signer, config, NonceRegistry::new())
    }

    fn request() -> CreateTokenRequest {
        CreateTokenRequest {
            name: "Test Token".to_string(),
            symbol: "TEST".to_string(),
            expiry: 2_000,
            creator: Address::new([1u8; 32]),
            nonce: 0,
            creation_fee: 100,
            immediate_buy: 0,
            wallet_cap: 10_000,
            dev_lockup: false,
        }
    }

    fn sign(signer: &SignerKeypair, config: &LaunchpadConfig, r: &CreateTokenRequest) -> Vec<u8> {
        signer.sign(&r.digest(&config.create_type_fingerprint))
    }

    #[test]
    fn test_valid_request_passes() {
        let (signer, config, nonces) = setup();
        let r = request();
        let sig = sign(&signer, &config, &r);
        assert!(verify_create_request(&config, &nonces, &r, &sig, 1_000).is_ok());
    }

    #[test]
    fn test_expired_fails_even_with_valid_signature() {
        let (signer, config, nonces) = setup();
        let r = request();
        let sig = sign(&signer, &config, &r);
        assert_eq!(
            verify_create_request(&config, &nonces, &r, &sig, 2_001),
            Err(LaunchpadError::Expired {
                expiry: 2_000,
                now: 2_001
            })
        );
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let (signer, config, nonces) = setup();
        let r = request();
        let sig = sign(&signer, &config, &r);
        assert!(verify_create_request(&config, &nonces, &r, &sig, 2_000).is_ok());
    }

    #[test]
    fn test_untrusted_signer_rejected() {
        let (_, config, nonces) = setup();
        let imposter = SignerKeypair::generate(Some(&[2u8; 32]));
        let r = request();
        let sig = sign(&imposter, &config, &r);
        assert_eq!(
            verify_create_request(&config, &nonces, &r, &sig, 1_000),
            Err(LaunchpadError::InvalidSignature)
        );
    }

    #[test]
    fn test_field_substitution_rejected() {
        let (signer, config, nonces) = setup();
        let r = request();
        let sig = sign(&signer, &config, &r);

        // same signature, tampered fee
        let mut tampered = r.clone();
        tampered.creation_fee = 0;
        assert_eq!(
            verify_create_request(&config, &nonces, &tampered, &sig, 1_000),
            Err(LaunchpadError::InvalidSignature)
        );
    }

    #[test]
    fn test_malformed_signature_rejected() {
        let (_, config, nonces) = setup();
        let r = request();
        assert_eq!(
            verify_create_request(&config, &nonces, &r, &[0u8; 7], 1_000),
            Err(LaunchpadError::InvalidSignature)
        );
    }

    #[test]
    fn test_stale_nonce_rejected() {
        let (signer, config, mut nonces) = setup();
        let r = request();
        let sig = sign(&signer, &config, &r);

        nonces.consume(&r.creator, 0).unwrap();
        assert_eq!(
            verify_create_request(&config, &nonces, &r, &sig, 1_000),
            Err(LaunchpadError::NonceMismatch {
                expected: 1,
                got: 0
            })
        );
    }
}
