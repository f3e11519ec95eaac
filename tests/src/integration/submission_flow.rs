//! # Submission Flow
//!
//! A document is composed with a signer sequence prefilled from the catalog,
//! encoded, and written through a wallet-bound session:
//!
//! 1. Catalog + directory prefill the sequence (cs-05)
//! 2. The sequence yields a `DocumentSubmission`
//! 3. The wallet handshake binds an identity (cs-01)
//! 4. The gateway encodes (cs-02) and invokes `send_document` (cs-03)
//! 5. Follow-up `sign_document` / `decline_document` use the same session

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use cs_01_identity_binder::{IdentityBinder, MockEnvironment, MockWallet};
    use cs_02_transaction_encoder::EncodeError;
    use cs_03_ledger_gateway::{GatewayConfig, GatewayError, LedgerGateway, MockLedgerRpc, Session};
    use cs_05_signer_sequence::{
        InMemoryDirectory, SequenceError, SignerSequence, SignerUser, StaticCatalog,
    };
    use shared_types::{encode_short_string, Felt};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn address(tail: &str) -> String {
        format!("0x{:0>64}", tail)
    }

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new(vec![
            SignerUser::new("u1", "Alice Young", "alice@corp.com", "HR").with_address(address("a1")),
            SignerUser::new("u2", "Bora Demir", "bora@corp.com", "Employee")
                .with_address(address("b2")),
            SignerUser::new("u3", "Cem Oz", "cem@corp.com", "Management")
                .with_address(address("c3")),
        ])
    }

    struct Harness {
        gateway: LedgerGateway<MockLedgerRpc>,
        session: Session,
        wallet: Arc<MockWallet>,
    }

    fn harness() -> Harness {
        let wallet = Arc::new(MockWallet::approving(address("5e11e2")));
        let environment = Arc::new(MockEnvironment::with_wallet(Arc::clone(&wallet)));
        let session = Session::new(IdentityBinder::new(environment));
        let gateway =
            LedgerGateway::new(GatewayConfig::for_testing(), Arc::new(MockLedgerRpc::new()))
                .unwrap();
        Harness {
            gateway,
            session,
            wallet,
        }
    }

    // =========================================================================
    // TESTS
    // =========================================================================

    #[tokio::test]
    async fn test_prefilled_sequence_is_submitted_in_order() {
        let mut h = harness();
        let mut sequence = SignerSequence::new();
        let added = sequence
            .prefill_from_catalog("employment_contract", &StaticCatalog::standard(), &directory())
            .unwrap();
        assert_eq!(added, 3);

        // Management signs first after a manual reorder.
        sequence.reorder(2, 0).unwrap();
        let submission = sequence
            .to_submission("Contract 2026", "employment_contract", "QmContract")
            .unwrap();

        h.session.connect().await.unwrap();
        let tx = h.gateway.submit(&mut h.session, &submission).await.unwrap();
        assert_eq!(tx.transaction_hash, Felt::from(0x1000u64));

        let calls = h.wallet.mock_signer().unwrap().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].entrypoint, "send_document");
        assert_eq!(calls[0].contract_address, h.gateway.contract_address());

        let calldata = &calls[0].calldata;
        assert_eq!(calldata.len(), 7);
        assert_eq!(calldata[0], encode_short_string("Contract 2026").unwrap());
        assert_eq!(calldata[2], Felt::from(3u64));
        assert_eq!(
            &calldata[3..6],
            &[Felt::from(0xc3u64), Felt::from(0xa1u64), Felt::from(0xb2u64)]
        );
        assert_eq!(calldata[6], encode_short_string("QmContract").unwrap());
    }

    #[tokio::test]
    async fn test_sign_and_decline_share_the_bound_identity() {
        let mut h = harness();
        h.session.connect().await.unwrap();

        let signed = h.gateway.sign(&mut h.session, "0x2a").await.unwrap();
        let declined = h.gateway.decline(&mut h.session, "43").await.unwrap();
        assert_ne!(signed, declined);

        let calls = h.wallet.mock_signer().unwrap().calls();
        assert_eq!(calls[0].entrypoint, "sign_document");
        assert_eq!(calls[0].calldata, vec![Felt::from(42u64)]);
        assert_eq!(calls[1].entrypoint, "decline_document");
        assert_eq!(calls[1].calldata, vec![Felt::from(43u64)]);
        assert_eq!(h.wallet.enable_calls(), 1);
    }

    #[tokio::test]
    async fn test_account_switch_routes_writes_to_new_signer() {
        let mut h = harness();
        h.session.connect().await.unwrap();
        h.gateway.sign(&mut h.session, "1").await.unwrap();
        let first_signer = h.wallet.mock_signer().unwrap();

        h.wallet.switch_account(address("beef"));
        h.session.disconnect();
        h.session.connect().await.unwrap();
        h.gateway.sign(&mut h.session, "2").await.unwrap();

        assert_eq!(first_signer.calls().len(), 1);
        assert_eq!(h.wallet.mock_signer().unwrap().calls().len(), 1);
        assert_eq!(
            h.session.binder().account_address().unwrap().to_string(),
            address("beef")
        );
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_wallet() {
        let mut h = harness();
        h.session.connect().await.unwrap();

        let mut sequence = SignerSequence::new();
        sequence
            .add(SignerUser::new("u9", "No Wallet", "n@corp.com", "IT"))
            .unwrap();
        assert!(matches!(
            sequence.to_submission("T", "nda", "h"),
            Err(SequenceError::MissingAddress { .. })
        ));

        let empty = SignerSequence::new().to_submission("T", "nda", "h").unwrap();
        let err = h.gateway.submit(&mut h.session, &empty).await.unwrap_err();
        assert!(matches!(err, GatewayError::Encoding(EncodeError::NoSigners)));
        assert!(err.is_input_error());
        assert!(h.wallet.mock_signer().unwrap().calls().is_empty());
    }

    #[tokio::test]
    async fn test_unbound_session_is_rejected() {
        let mut h = harness();
        let err = h.gateway.sign(&mut h.session, "1").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotBound));
        assert_eq!(h.wallet.enable_calls(), 0);
    }

    #[tokio::test]
    async fn test_wallet_rejection_is_a_ledger_error() {
        let mut h = harness();
        h.session.connect().await.unwrap();
        h.wallet.mock_signer().unwrap().reject_with("user closed the popup");

        let err = h.gateway.sign(&mut h.session, "9").await.unwrap_err();
        assert!(matches!(err, GatewayError::SigningFailed(_)));
        assert!(err.is_ledger_error());
    }

    #[test]
    fn test_deadlines_do_not_affect_submission() {
        let mut sequence = SignerSequence::new();
        sequence
            .prefill_from_catalog("onboarding", &StaticCatalog::standard(), &directory())
            .unwrap();
        let before = sequence.to_submission("T", "onboarding", "h").unwrap();

        sequence
            .set_deadline("u2", NaiveDate::from_ymd_opt(2026, 12, 31))
            .unwrap();
        let after = sequence.to_submission("T", "onboarding", "h").unwrap();
        assert_eq!(before, after);
    }
}
