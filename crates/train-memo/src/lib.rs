//! # Train Memo Codec
//!
//! Chains without contract storage publish Train events as fixed-length
//! payloads inside OP_RETURN outputs. This crate turns those bytes back
//! into typed events for observers, and builds them for senders.
//!
//! - `script`: OP_RETURN push-data extraction and script building
//! - `codec`: length-dispatched payload decoding and encoding
//! - `events`: the `MemoEvent` union and layout constants
//! - `csv`: BIP-68 sequence conversions for CSV delays
//!
//! Decoding never guesses. A payload that fits no layout becomes
//! `MemoEvent::Unknown` carrying its raw hex.

pub mod codec;
pub mod csv;
pub mod errors;
pub mod events;
pub mod script;

pub use codec::{decode_event, decode_event_hex, encode_event, try_decode_event};
pub use csv::{is_csv_time_based, seconds_to_sequence, sequence_to_seconds};
pub use errors::MemoError;
pub use events::MemoEvent;
pub use script::{
    build_op_return_script, decode_script, decode_script_hex, extract_all_push_data,
    extract_push_data,
};
