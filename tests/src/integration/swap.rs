//! # Two-Leg Swap Flows
//!
//! A user commits on the source chain, a solver locks on the destination
//! chain under the user's hashlock, the user attaches the same hashlock on
//! the source, and the secret revealed on one side redeems the other.
//!
//! The chains share nothing but the secret. Each has its own store,
//! ledger and clock.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{Address, HtlcId};
    use train_htlc::{
        new_secret_pair, Asset, ClaimState, CommitRequest, HtlcApi, HtlcError, LockRequest,
        RecordStore, Routing,
    };
    use train_signatures::SchemeDomains;

    use crate::fixtures::{Chain, GENESIS};

    fn user() -> Address {
        Address::new([0x0Au8; 32])
    }

    fn solver() -> Address {
        Address::new([0x5Eu8; 32])
    }

    fn routing() -> Routing {
        Routing {
            dst_chain: "STARKNET_SEPOLIA".into(),
            dst_asset: "ETH".into(),
            dst_address: "0x05ee".into(),
            src_asset: "ETH".into(),
            hops: Vec::new(),
        }
    }

    struct Swap {
        source: Chain,
        destination: Chain,
        src_id: HtlcId,
        dst_id: HtlcId,
    }

    fn funded_chains() -> (Chain, Chain) {
        let source = Chain::new(SchemeDomains::default());
        let destination = Chain::new(SchemeDomains::default());
        source.escrow.credit(user(), Asset::Native, 5_000).unwrap();
        destination.escrow.credit(solver(), Asset::Native, 5_000).unwrap();
        (source, destination)
    }

    /// Commit on the source and return the swap handles.
    async fn start_swap() -> Swap {
        let (source, destination) = funded_chains();
        let src_id = HtlcId::new([0x01u8; 32]);
        let dst_id = HtlcId::new([0x02u8; 32]);

        let req = CommitRequest {
            id: src_id,
            src_receiver: solver(),
            amount: 1_000,
            asset: Asset::Native,
            timelock: GENESIS + 7_200,
            routing: routing(),
        };
        source.service.commit(user(), req).await.unwrap();

        Swap {
            source,
            destination,
            src_id,
            dst_id,
        }
    }

    #[tokio::test]
    async fn test_full_swap_secret_crosses_chains() {
        let swap = start_swap().await;
        let (secret, hashlock) = new_secret_pair();

        // Solver locks on the destination with a shorter timelock and a reward
        let dst = swap
            .destination
            .service
            .lock(
                solver(),
                LockRequest {
                    id: swap.dst_id,
                    hashlock,
                    src_receiver: user(),
                    amount: 990,
                    asset: Asset::Native,
                    timelock: GENESIS + 3_600,
                    reward: 10,
                    reward_timelock: GENESIS + 1_800,
                    routing: Routing::default(),
                },
            )
            .await
            .unwrap();

        // User attaches the same hashlock on the source
        let src = swap
            .source
            .service
            .add_lock(user(), swap.src_id, hashlock, GENESIS + 7_200)
            .await
            .unwrap();
        swap.source
            .service
            .latest_timelock_ordering(&src, &dst)
            .unwrap();

        // User redeems on the destination, revealing the secret
        let redeemed = swap
            .destination
            .service
            .redeem(swap.dst_id, secret)
            .await
            .unwrap();
        assert_eq!(redeemed.claim_state, ClaimState::Redeemed);
        assert_eq!(swap.destination.escrow.balance_of(&user(), &Asset::Native), 990);
        assert_eq!(
            swap.destination.escrow.balance_of(&solver(), &Asset::Native),
            5_000 - 990
        );

        // Solver reads the secret from the destination record
        let published = swap
            .destination
            .service
            .get_details(swap.dst_id)
            .await
            .unwrap()
            .secret;
        let secret = train_htlc::SecureSecret::new(published);
        swap.source
            .service
            .redeem(swap.src_id, secret)
            .await
            .unwrap();

        assert_eq!(swap.source.escrow.balance_of(&solver(), &Asset::Native), 1_000);
        assert_eq!(swap.source.escrow.custody_of(&Asset::Native), 0);
        assert_eq!(swap.destination.escrow.custody_of(&Asset::Native), 0);
    }

    #[tokio::test]
    async fn test_abandoned_swap_refunds_both_legs() {
        let swap = start_swap().await;
        let (_secret, hashlock) = new_secret_pair();

        swap.destination
            .service
            .lock(
                solver(),
                LockRequest {
                    id: swap.dst_id,
                    hashlock,
                    src_receiver: user(),
                    amount: 990,
                    asset: Asset::Native,
                    timelock: GENESIS + 3_600,
                    reward: 0,
                    reward_timelock: 0,
                    routing: Routing::default(),
                },
            )
            .await
            .unwrap();

        // Destination expires first
        swap.destination.clock.set_time(GENESIS + 3_601);
        swap.source.clock.set_time(GENESIS + 3_601);
        swap.destination.service.refund(swap.dst_id).await.unwrap();
        assert!(matches!(
            swap.source.service.refund(swap.src_id).await,
            Err(HtlcError::NotPassedTimelock { .. })
        ));

        swap.source.clock.set_time(GENESIS + 7_201);
        swap.source.service.refund(swap.src_id).await.unwrap();

        assert_eq!(swap.source.escrow.balance_of(&user(), &Asset::Native), 5_000);
        assert_eq!(
            swap.destination.escrow.balance_of(&solver(), &Asset::Native),
            5_000
        );
    }

    #[tokio::test]
    async fn test_destination_outliving_source_is_flagged() {
        let swap = start_swap().await;
        let (_secret, hashlock) = new_secret_pair();

        let src = swap
            .source
            .service
            .add_lock(user(), swap.src_id, hashlock, GENESIS + 1_200)
            .await
            .unwrap();
        let dst = swap
            .destination
            .service
            .lock(
                solver(),
                LockRequest {
                    id: swap.dst_id,
                    hashlock,
                    src_receiver: user(),
                    amount: 990,
                    asset: Asset::Native,
                    timelock: GENESIS + 3_600,
                    reward: 0,
                    reward_timelock: 0,
                    routing: Routing::default(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            swap.source.service.latest_timelock_ordering(&src, &dst),
            Err(HtlcError::InvalidTimelockOrdering { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_redeems_pay_once() {
        let (source, _destination) = funded_chains();
        let (secret, hashlock) = new_secret_pair();
        let id = HtlcId::new([0x77u8; 32]);

        source
            .service
            .lock(
                user(),
                LockRequest {
                    id,
                    hashlock,
                    src_receiver: solver(),
                    amount: 1_000,
                    asset: Asset::Native,
                    timelock: GENESIS + 3_600,
                    reward: 0,
                    reward_timelock: 0,
                    routing: Routing::default(),
                },
            )
            .await
            .unwrap();

        let service = Arc::new(source.service);
        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = service.clone();
            let secret = secret.clone();
            handles.push(tokio::spawn(async move { service.redeem(id, secret).await }));
        }

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(HtlcError::AlreadyClaimed(ClaimState::Redeemed)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(source.escrow.balance_of(&solver(), &Asset::Native), 1_000);
        assert_eq!(source.escrow.custody_of(&Asset::Native), 0);
    }

    #[tokio::test]
    async fn test_independent_ids_do_not_interfere() {
        let (source, _destination) = funded_chains();
        let service = Arc::new(source.service);

        let mut handles = Vec::new();
        for i in 0..8u8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .commit(
                        user(),
                        CommitRequest {
                            id: HtlcId::new([0x90 + i; 32]),
                            src_receiver: solver(),
                            amount: 100,
                            asset: Asset::Native,
                            timelock: GENESIS + 1_000,
                            routing: Routing::default(),
                        },
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.store().len(), 8);
        assert_eq!(source.escrow.custody_of(&Asset::Native), 800);
        assert_eq!(source.escrow.balance_of(&user(), &Asset::Native), 4_200);
    }
}
