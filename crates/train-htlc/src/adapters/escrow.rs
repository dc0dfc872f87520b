//! In-memory funds custody.
//!
//! Models an account-model ledger: per-owner balances, per-owner token
//! allowances toward the HTLC contract, and one custody balance per asset.

use crate::domain::{Asset, EscrowError, Payout};
use crate::ports::outbound::FundsEscrow;
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Default)]
struct Ledger {
    balances: HashMap<(Address, Asset), u128>,
    allowances: HashMap<(Address, Asset), u128>,
    custody: HashMap<Asset, u128>,
}

/// In-memory `FundsEscrow`.
#[derive(Default)]
pub struct InMemoryEscrow {
    ledger: RwLock<Ledger>,
}

impl InMemoryEscrow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` to `owner` (test and simulation funding).
    pub fn credit(&self, owner: Address, asset: Asset, amount: u128) -> Result<(), EscrowError> {
        let mut ledger = self.ledger.write();
        let balance = ledger.balances.entry((owner, asset)).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(EscrowError::Overflow)?;
        Ok(())
    }

    /// Set `owner`'s allowance toward the contract.
    pub fn approve(&self, owner: Address, asset: Asset, amount: u128) {
        self.ledger.write().allowances.insert((owner, asset), amount);
    }

    pub fn balance_of(&self, owner: &Address, asset: &Asset) -> u128 {
        self.ledger
            .read()
            .balances
            .get(&(*owner, *asset))
            .copied()
            .unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, asset: &Asset) -> u128 {
        self.ledger
            .read()
            .allowances
            .get(&(*owner, *asset))
            .copied()
            .unwrap_or(0)
    }

    /// Held in custody for `asset`.
    pub fn custody_of(&self, asset: &Asset) -> u128 {
        self.ledger.read().custody.get(asset).copied().unwrap_or(0)
    }
}

impl FundsEscrow for InMemoryEscrow {
    fn escrow(&self, from: &Address, asset: &Asset, amount: u128) -> Result<(), EscrowError> {
        let mut ledger = self.ledger.write();
        let key = (*from, *asset);

        let available = ledger.balances.get(&key).copied().unwrap_or(0);
        if available < amount {
            return Err(EscrowError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let allowed = ledger.allowances.get(&key).copied().unwrap_or(0);
        if asset.requires_allowance() && allowed < amount {
            return Err(EscrowError::InsufficientAllowance {
                required: amount,
                allowed,
            });
        }

        let held = ledger.custody.get(asset).copied().unwrap_or(0);
        let new_custody = held.checked_add(amount).ok_or(EscrowError::Overflow)?;

        ledger.balances.insert(key, available - amount);
        if asset.requires_allowance() {
            ledger.allowances.insert(key, allowed - amount);
        }
        ledger.custody.insert(*asset, new_custody);

        debug!("[train-htlc] escrowed {} of {:?} from {}", amount, asset, from.short());
        Ok(())
    }

    fn release(&self, asset: &Asset, payouts: &[Payout]) -> Result<(), EscrowError> {
        let mut ledger = self.ledger.write();

        let total = payouts
            .iter()
            .try_fold(0u128, |acc, p| acc.checked_add(p.amount))
            .ok_or(EscrowError::Overflow)?;
        let held = ledger.custody.get(asset).copied().unwrap_or(0);
        if held < total {
            return Err(EscrowError::CustodyShortfall {
                required: total,
                held,
            });
        }

        // Check every credit fits before applying any of them
        let mut credited: HashMap<Address, u128> = HashMap::new();
        for payout in payouts.iter().filter(|p| p.amount > 0) {
            let current = match credited.get(&payout.to) {
                Some(v) => *v,
                None => ledger
                    .balances
                    .get(&(payout.to, *asset))
                    .copied()
                    .unwrap_or(0),
            };
            let next = current
                .checked_add(payout.amount)
                .ok_or(EscrowError::Overflow)?;
            credited.insert(payout.to, next);
        }

        for (to, balance) in credited {
            ledger.balances.insert((to, *asset), balance);
        }
        ledger.custody.insert(*asset, held - total);

        info!("[train-htlc] released {} of {:?} in {} payout(s)", total, asset, payouts.len());
        Ok(())
    }
}
