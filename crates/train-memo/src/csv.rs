//! BIP-68 relative lock-time (CSV) sequence helpers.

use crate::errors::MemoError;

/// Sequence flag selecting 512-second units instead of blocks.
pub const SEQUENCE_TYPE_FLAG: u32 = 1 << 22;
/// Mask for the lock value.
pub const SEQUENCE_VALUE_MASK: u32 = 0x0000_ffff;
/// Seconds per time-based unit.
pub const SEQUENCE_GRANULARITY_SECS: u64 = 512;

pub fn is_csv_time_based(sequence: u32) -> bool {
    sequence & SEQUENCE_TYPE_FLAG != 0
}

/// Delay encoded by a time-based sequence.
pub fn sequence_to_seconds(sequence: u32) -> u64 {
    u64::from(sequence & SEQUENCE_VALUE_MASK) * SEQUENCE_GRANULARITY_SECS
}

/// Time-based sequence for `seconds`, truncated to whole 512 s units.
///
/// Delays shorter than one unit are rejected.
pub fn seconds_to_sequence(seconds: u64) -> Result<u32, MemoError> {
    let units = seconds / SEQUENCE_GRANULARITY_SECS;
    if units == 0 || units > u64::from(SEQUENCE_VALUE_MASK) {
        return Err(MemoError::CsvOutOfRange(seconds));
    }
    Ok(units as u32 | SEQUENCE_TYPE_FLAG)
}
