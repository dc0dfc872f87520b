//! # Domain Value Objects
//!
//! Immutable value types for the HTLC state machine.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Terminal disposition of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimState {
    /// Funds escrowed, awaiting redeem or refund.
    #[default]
    Open,
    /// Secret revealed, funds paid to the receiver (and reward split).
    Redeemed,
    /// Timelock passed, funds returned to the sender.
    Refunded,
}

impl ClaimState {
    /// Only Open moves, and only to a terminal state.
    pub fn can_transition_to(&self, next: ClaimState) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Redeemed) | (Self::Open, Self::Refunded)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redeemed | Self::Refunded)
    }
}

/// Escrowed asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The ledger's native coin. No allowance step.
    Native,
    /// A token contract. Escrow needs a prior allowance.
    Token(Address),
}

impl Asset {
    /// Whether escrow needs an allowance toward the contract.
    pub fn requires_allowance(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

/// One leg of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub to: Address,
    pub amount: u128,
}

impl Payout {
    pub fn new(to: Address, amount: u128) -> Self {
        Self { to, amount }
    }
}

/// Intermediate hop of a multi-hop route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub chain: String,
    pub asset: String,
    pub address: String,
}

/// Off-chain routing metadata. Opaque to the state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routing {
    pub dst_chain: String,
    pub dst_asset: String,
    pub dst_address: String,
    pub src_asset: String,
    #[serde(default)]
    pub hops: Vec<Hop>,
}

impl Routing {
    /// Build from the parallel hop arrays contracts take as arguments.
    ///
    /// Returns `None` if the arrays differ in length.
    pub fn with_hop_arrays(
        mut self,
        chains: Vec<String>,
        assets: Vec<String>,
        addresses: Vec<String>,
    ) -> Option<Self> {
        if chains.len() != assets.len() || chains.len() != addresses.len() {
            return None;
        }
        self.hops = chains
            .into_iter()
            .zip(assets)
            .zip(addresses)
            .map(|((chain, asset), address)| Hop {
                chain,
                asset,
                address,
            })
            .collect();
        Some(self)
    }
}
