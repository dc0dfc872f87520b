//! # Relayed addLockSig
//!
//! The sender signs `(Id, hashlock, timelock)` off-chain under its chain's
//! scheme; a relayer with no authority submits it. Each test runs once per
//! scheme with freshly generated keys.

#[cfg(test)]
mod tests {
    use shared_types::{Hashlock, HtlcId};
    use train_htlc::{Asset, CommitRequest, HtlcApi, HtlcError, Routing};
    use train_signatures::{
        AddLockMessage, Eip712Domain, SchemeDomains, SignatureError, SignatureScheme,
    };

    use crate::fixtures::{Chain, TestSigner, ALL_SCHEMES, GENESIS};

    /// Chain with a pre-HTLC committed by `signer`.
    async fn committed(domains: SchemeDomains, signer: &TestSigner, id: HtlcId) -> Chain {
        let chain = Chain::new(domains);
        let sender = signer.address();
        chain.escrow.credit(sender, Asset::Native, 1_000).unwrap();
        chain
            .service
            .commit(
                sender,
                CommitRequest {
                    id,
                    src_receiver: shared_types::Address::new([0xEEu8; 32]),
                    amount: 1_000,
                    asset: Asset::Native,
                    timelock: GENESIS + 1_000,
                    routing: Routing::default(),
                },
            )
            .await
            .unwrap();
        chain
    }

    fn message(id: HtlcId) -> AddLockMessage {
        AddLockMessage::new(id, Hashlock::from_secret(&[0x5Cu8; 32]), GENESIS + 2_400)
    }

    #[tokio::test]
    async fn test_relayed_add_lock_every_scheme() {
        for scheme in ALL_SCHEMES {
            let signer = TestSigner::random(scheme);
            let id = HtlcId::new([0x10u8; 32]);
            let domains = SchemeDomains::default();
            let chain = committed(domains.clone(), &signer, id).await;

            let msg = message(id);
            let signature = signer.sign(&domains, &msg);
            let record = chain
                .service
                .add_lock_sig(msg, scheme, signature)
                .await
                .unwrap_or_else(|e| panic!("{scheme}: {e}"));

            assert_eq!(record.hashlock, msg.hashlock, "{scheme}");
            assert_eq!(record.timelock, msg.timelock, "{scheme}");
            assert_eq!(record.sender, signer.address(), "{scheme}");
        }
    }

    #[tokio::test]
    async fn test_any_changed_field_invalidates() {
        for scheme in ALL_SCHEMES {
            let signer = TestSigner::random(scheme);
            let id = HtlcId::new([0x11u8; 32]);
            let domains = SchemeDomains::default();
            let chain = committed(domains.clone(), &signer, id).await;

            let signed = message(id);
            let signature = signer.sign(&domains, &signed);

            let mut later = signed;
            later.timelock += 1;
            let mut other_lock = signed;
            other_lock.hashlock = Hashlock::from_secret(&[0x5Du8; 32]);

            for tampered in [later, other_lock] {
                let err = chain
                    .service
                    .add_lock_sig(tampered, scheme, signature.clone())
                    .await
                    .unwrap_err();
                assert!(matches!(err, HtlcError::InvalidSignature(_)), "{scheme}: {err}");
            }

            // Untampered still goes through afterwards
            chain
                .service
                .add_lock_sig(signed, scheme, signature)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_signature_from_non_sender_rejected() {
        for scheme in ALL_SCHEMES {
            let sender = TestSigner::random(scheme);
            let stranger = TestSigner::random(scheme);
            let id = HtlcId::new([0x12u8; 32]);
            let domains = SchemeDomains::default();
            let chain = committed(domains.clone(), &sender, id).await;

            let msg = message(id);
            let err = chain
                .service
                .add_lock_sig(msg, scheme, stranger.sign(&domains, &msg))
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    HtlcError::InvalidSignature(SignatureError::SignerMismatch { .. })
                ),
                "{scheme}: {err}"
            );
        }
    }

    #[tokio::test]
    async fn test_signature_under_wrong_scheme_rejected() {
        let signer = TestSigner::random(SignatureScheme::OffchainMessage);
        let id = HtlcId::new([0x13u8; 32]);
        let domains = SchemeDomains::default();
        let chain = committed(domains.clone(), &signer, id).await;

        let msg = message(id);
        let signature = signer.sign(&domains, &msg);

        // Same ed25519 key, other ed25519 encoding
        let err = chain
            .service
            .add_lock_sig(msg, SignatureScheme::IntentBcs, signature.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::InvalidSignature(_)));

        let err = chain
            .service
            .add_lock_sig(msg, SignatureScheme::Eip712, signature)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HtlcError::InvalidSignature(SignatureError::SchemeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_eip712_domain_binds_chain() {
        let signer = TestSigner::random(SignatureScheme::Eip712);
        let id = HtlcId::new([0x14u8; 32]);
        let verifier_domains = SchemeDomains {
            eip712: Eip712Domain {
                chain_id: 11_155_111,
                ..Eip712Domain::default()
            },
            ..SchemeDomains::default()
        };
        let chain = committed(verifier_domains, &signer, id).await;

        let msg = message(id);
        let signed_for_mainnet = signer.sign(&SchemeDomains::default(), &msg);
        let err = chain
            .service
            .add_lock_sig(msg, SignatureScheme::Eip712, signed_for_mainnet)
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::InvalidSignature(_)));
    }

    #[tokio::test]
    async fn test_state_guards_run_before_signature() {
        let signer = TestSigner::random(SignatureScheme::Snip12);
        let id = HtlcId::new([0x15u8; 32]);
        let domains = SchemeDomains::default();
        let chain = committed(domains.clone(), &signer, id).await;

        let msg = message(id);
        let signature = signer.sign(&domains, &msg);
        chain
            .service
            .add_lock_sig(msg, SignatureScheme::Snip12, signature.clone())
            .await
            .unwrap();

        let err = chain
            .service
            .add_lock_sig(msg, SignatureScheme::Snip12, signature)
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::HashlockAlreadySet));

        let missing = message(HtlcId::new([0x99u8; 32]));
        let err = chain
            .service
            .add_lock_sig(missing, SignatureScheme::Snip12, signer.sign(&domains, &missing))
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::NotFound(_)));
    }
}
