//! In-memory record store.
//!
//! Implements `RecordStore` over a `HashMap` guarded by one `RwLock`. The
//! write lock is held across the whole transition, so same-id transitions
//! serialize and readers never see a half-applied one.

use crate::domain::{HtlcError, HtlcRecord, StoreError};
use crate::ports::outbound::RecordStore;
use parking_lot::RwLock;
use shared_types::HtlcId;
use std::collections::HashMap;
use tracing::debug;

/// In-memory `RecordStore`.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<HtlcId, HtlcRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, id: &HtlcId) -> Option<HtlcRecord> {
        self.records.read().get(id).cloned()
    }

    fn contains(&self, id: &HtlcId) -> bool {
        self.records.read().contains_key(id)
    }

    fn transition<F>(&self, id: &HtlcId, f: F) -> Result<HtlcRecord, HtlcError>
    where
        F: FnOnce(Option<&HtlcRecord>) -> Result<HtlcRecord, HtlcError>,
    {
        let mut records = self.records.write();
        let next = f(records.get(id))?;

        if next.id != *id {
            return Err(StoreError::IdMismatch {
                expected: *id,
                actual: next.id,
            }
            .into());
        }

        debug!("[train-htlc] store write {} ({:?})", id.short(), next.claim_state);
        records.insert(*id, next.clone());
        Ok(next)
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }

    fn ids(&self) -> Vec<HtlcId> {
        let mut ids: Vec<HtlcId> = self.records.read().keys().copied().collect();
        ids.sort();
        ids
    }
}
