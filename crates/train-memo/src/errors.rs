//! Memo codec errors.

use thiserror::Error;

/// Errors from encoding, decoding and script parsing.
///
/// `decode_event` never returns these; it folds them into
/// `MemoEvent::Unknown` so the raw payload survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    /// Payload length is not one of the event sizes.
    #[error("Unknown payload length: {0}")]
    UnknownLength(usize),

    /// Integer does not fit its field width.
    #[error("Field {field} value {value} exceeds {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        bits: u32,
    },

    /// ASCII field longer than its slot.
    #[error("Field {field} is {actual} bytes, slot holds {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// ASCII field with a byte outside 0x20..=0x7e (trailing NULs excepted).
    #[error("Field {field} is not printable ASCII")]
    NonPrintable { field: &'static str },

    /// `Unknown` has no wire layout.
    #[error("Cannot encode an unknown event")]
    EncodeUnknown,

    /// Script does not start with OP_RETURN.
    #[error("Script is not an OP_RETURN output")]
    NotOpReturn,

    /// OP_RETURN script carries no push.
    #[error("OP_RETURN carries no push data")]
    NoPushData,

    /// Push length runs past the end of the script.
    #[error("Truncated push at offset {offset}: need {needed} bytes, {available} left")]
    TruncatedPush {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Non-push opcode after OP_RETURN.
    #[error("Unexpected opcode 0x{opcode:02x} at offset {offset}")]
    UnexpectedOpcode { opcode: u8, offset: usize },

    /// Payload too large for a single push.
    #[error("Payload of {0} bytes does not fit one push")]
    PayloadTooLarge(usize),

    /// CSV delay not representable as BIP-68 time units.
    #[error("CSV delay of {0} seconds is out of range")]
    CsvOutOfRange(u64),

    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
