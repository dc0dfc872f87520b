//! # Memo Observer
//!
//! A UTXO chain has no contract storage, so its leg of a swap is visible
//! only as OP_RETURN memos. The observer decodes those outputs, follows
//! the swap by commit id, and takes the secret out of the redeem memo to
//! redeem the matching leg on an account chain.

#[cfg(test)]
mod tests {
    use shared_types::{Address, HtlcId};
    use train_htlc::{
        new_secret_pair, Asset, ClaimState, HtlcApi, LockRequest, Routing, SecureSecret,
    };
    use train_memo::events::REDEEM_COMMIT_ID_LEN;
    use train_memo::{
        build_op_return_script, decode_script, encode_event, is_csv_time_based,
        seconds_to_sequence, sequence_to_seconds, MemoEvent,
    };
    use train_signatures::SchemeDomains;

    use crate::fixtures::{Chain, GENESIS};

    fn op_return(event: &MemoEvent) -> Vec<u8> {
        build_op_return_script(&encode_event(event).unwrap()).unwrap()
    }

    fn prefix(id: &HtlcId) -> [u8; REDEEM_COMMIT_ID_LEN] {
        let mut out = [0u8; REDEEM_COMMIT_ID_LEN];
        out.copy_from_slice(&id.as_bytes()[..REDEEM_COMMIT_ID_LEN]);
        out
    }

    #[tokio::test]
    async fn test_secret_from_redeem_memo_unlocks_account_leg() {
        let btc_commit = HtlcId::new([0xB7u8; 32]);
        let evm_id = HtlcId::new([0xE7u8; 32]);
        let (secret, hashlock) = new_secret_pair();

        // Account chain: solver locks for the user
        let evm = Chain::new(SchemeDomains::default());
        let solver = Address::new([0x5Eu8; 32]);
        let user = Address::new([0x0Au8; 32]);
        evm.escrow.credit(solver, Asset::Native, 2_000).unwrap();
        evm.service
            .lock(
                solver,
                LockRequest {
                    id: evm_id,
                    hashlock,
                    src_receiver: user,
                    amount: 2_000,
                    asset: Asset::Native,
                    timelock: GENESIS + 3_600,
                    reward: 0,
                    reward_timelock: 0,
                    routing: Routing::default(),
                },
            )
            .await
            .unwrap();

        // UTXO chain: the transactions the observer sees
        let outputs = vec![
            op_return(&MemoEvent::CommitLog {
                commit_id: btc_commit,
                timelock: GENESIS + 7_200,
                dst_chain: "ETH".into(),
                dst_address: [0xE7u8; 20],
                dst_asset: "ETH".into(),
                src_receiver: "tb1qsolver".into(),
            }),
            op_return(&MemoEvent::AddLock {
                commit_id: btc_commit,
                hashlock,
                timelock: GENESIS + 7_200,
            }),
            // Unrelated OP_RETURN traffic
            vec![0x6a, 0x04, b'o', b'r', b'd', b'i'],
            op_return(&MemoEvent::Redeem {
                commit_id_prefix: prefix(&btc_commit),
                hashlock,
                secret: *secret.as_bytes(),
            }),
        ];

        let events: Vec<MemoEvent> = outputs
            .iter()
            .flat_map(|script| decode_script(script).unwrap())
            .collect();
        let kinds: Vec<&str> = events.iter().map(MemoEvent::kind).collect();
        assert_eq!(kinds, vec!["commitLog", "addLock", "unknown", "redeem"]);

        // Follow the swap: redeem memo matched by prefix, secret checked against the hashlock
        let revealed = events
            .iter()
            .find_map(|event| match event {
                MemoEvent::Redeem {
                    hashlock: memo_lock,
                    secret,
                    ..
                } if event.redeem_matches(&btc_commit) && *memo_lock == hashlock => {
                    Some(*secret)
                }
                _ => None,
            })
            .expect("redeem memo for the commit");
        assert!(hashlock.matches(&revealed));

        let record = evm
            .service
            .redeem(evm_id, SecureSecret::new(revealed))
            .await
            .unwrap();
        assert_eq!(record.claim_state, ClaimState::Redeemed);
        assert_eq!(evm.escrow.balance_of(&user, &Asset::Native), 2_000);
    }

    #[test]
    fn test_lock_memo_carries_csv_delay() {
        let (_secret, hashlock) = new_secret_pair();
        let delay = 3_600u64;
        let event = MemoEvent::Lock {
            lock_id: HtlcId::new([0x4Cu8; 32]),
            hashlock,
            delay_csv_seconds: delay,
            dst_chain: "BTC".into(),
            dst_asset: "BTC".into(),
        };

        let decoded = decode_script(&op_return(&event)).unwrap();
        assert_eq!(decoded, vec![event]);

        // nSequence carries the delay in whole 512 s units
        let sequence = seconds_to_sequence(delay).unwrap();
        assert!(is_csv_time_based(sequence));
        assert_eq!(sequence_to_seconds(sequence), 7 * 512);
    }

    #[test]
    fn test_multiple_memos_in_one_output() {
        let refund = encode_event(&MemoEvent::Refund {
            commit_id: HtlcId::new([0x01u8; 32]),
        })
        .unwrap();
        let add_lock = encode_event(&MemoEvent::AddLock {
            commit_id: HtlcId::new([0x01u8; 32]),
            hashlock: shared_types::Hashlock::new([0x02u8; 32]),
            timelock: GENESIS,
        })
        .unwrap();

        let mut script = vec![0x6a, refund.len() as u8];
        script.extend_from_slice(&refund);
        script.push(add_lock.len() as u8);
        script.extend_from_slice(&add_lock);

        let events = decode_script(&script).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "refund");
        assert_eq!(events[1].kind(), "addLock");
    }
}
