//! # Integration Flows
//!
//! - `swap`: two independent chains joined by one secret
//! - `signed_add_lock`: relayed `addLockSig` for every scheme
//! - `memo_observer`: secret recovery from OP_RETURN memos

pub mod memo_observer;
pub mod signed_add_lock;
pub mod swap;
