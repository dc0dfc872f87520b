//! # Event Codec
//!
//! Length-dispatched decoding of memo payloads and the matching encoder.
//! Each layout is read with explicit field widths; integers are big-endian.

use crate::errors::MemoError;
use crate::events::*;
use shared_types::{Hashlock, HtlcId};
use tracing::debug;

/// Decode one payload.
///
/// Never fails: a payload that matches no layout, or whose fields are
/// malformed, comes back as `MemoEvent::Unknown` with the raw bytes.
pub fn decode_event(payload: &[u8]) -> MemoEvent {
    match try_decode_event(payload) {
        Ok(event) => {
            debug!("[train-memo] decoded {} ({} bytes)", event.kind(), payload.len());
            event
        }
        Err(e) => {
            debug!("[train-memo] unknown payload ({} bytes): {}", payload.len(), e);
            MemoEvent::Unknown {
                raw_hex: hex::encode(payload),
                note: e.to_string(),
            }
        }
    }
}

/// Decode a hex payload (`0x` optional).
pub fn decode_event_hex(payload_hex: &str) -> Result<MemoEvent, MemoError> {
    let payload = hex::decode(payload_hex.trim().trim_start_matches("0x"))
        .map_err(|e| MemoError::InvalidHex(e.to_string()))?;
    Ok(decode_event(&payload))
}

/// Strict decode, reporting why a payload is not an event.
pub fn try_decode_event(payload: &[u8]) -> Result<MemoEvent, MemoError> {
    let mut r = Reader::new(payload);

    let event = match payload.len() {
        REFUND_LEN => MemoEvent::Refund {
            commit_id: HtlcId::new(r.array()?),
        },
        ADD_LOCK_LEN => MemoEvent::AddLock {
            commit_id: HtlcId::new(r.array()?),
            hashlock: Hashlock::new(r.array()?),
            timelock: r.uint_be(TIMELOCK_BITS)?,
        },
        LOCK_LEN => MemoEvent::Lock {
            lock_id: HtlcId::new(r.array()?),
            hashlock: Hashlock::new(r.array()?),
            delay_csv_seconds: r.uint_be(CSV_DELAY_BITS)?,
            dst_chain: r.ascii("dst_chain", TICKER_LEN)?,
            dst_asset: r.ascii("dst_asset", TICKER_LEN)?,
        },
        COMMIT_LOG_LEN => MemoEvent::CommitLog {
            commit_id: HtlcId::new(r.array()?),
            timelock: r.uint_be(TIMELOCK_BITS)?,
            dst_chain: r.ascii("dst_chain", TICKER_LEN)?,
            dst_address: r.array()?,
            dst_asset: r.ascii("dst_asset", TICKER_LEN)?,
            src_receiver: r.ascii("src_receiver", SRC_RECEIVER_LEN)?,
        },
        REDEEM_LEN => MemoEvent::Redeem {
            commit_id_prefix: r.array()?,
            hashlock: Hashlock::new(r.array()?),
            secret: r.array()?,
        },
        other => return Err(MemoError::UnknownLength(other)),
    };

    Ok(event)
}

/// Encode an event into its fixed-length payload.
///
/// Values that do not fit their slot are errors, never truncated.
pub fn encode_event(event: &MemoEvent) -> Result<Vec<u8>, MemoError> {
    let mut w = Writer::with_capacity(event.payload_len().unwrap_or(0));

    match event {
        MemoEvent::Refund { commit_id } => {
            w.bytes(commit_id.as_bytes());
        }
        MemoEvent::AddLock {
            commit_id,
            hashlock,
            timelock,
        } => {
            w.bytes(commit_id.as_bytes());
            w.bytes(hashlock.as_bytes());
            w.uint_be("timelock", *timelock, TIMELOCK_BITS)?;
        }
        MemoEvent::Lock {
            lock_id,
            hashlock,
            delay_csv_seconds,
            dst_chain,
            dst_asset,
        } => {
            w.bytes(lock_id.as_bytes());
            w.bytes(hashlock.as_bytes());
            w.uint_be("delay_csv_seconds", *delay_csv_seconds, CSV_DELAY_BITS)?;
            w.ascii("dst_chain", dst_chain, TICKER_LEN)?;
            w.ascii("dst_asset", dst_asset, TICKER_LEN)?;
        }
        MemoEvent::CommitLog {
            commit_id,
            timelock,
            dst_chain,
            dst_address,
            dst_asset,
            src_receiver,
        } => {
            w.bytes(commit_id.as_bytes());
            w.uint_be("timelock", *timelock, TIMELOCK_BITS)?;
            w.ascii("dst_chain", dst_chain, TICKER_LEN)?;
            w.bytes(dst_address);
            w.ascii("dst_asset", dst_asset, TICKER_LEN)?;
            w.ascii("src_receiver", src_receiver, SRC_RECEIVER_LEN)?;
        }
        MemoEvent::Redeem {
            commit_id_prefix,
            hashlock,
            secret,
        } => {
            w.bytes(commit_id_prefix);
            w.bytes(hashlock.as_bytes());
            w.bytes(secret);
        }
        MemoEvent::Unknown { .. } => return Err(MemoError::EncodeUnknown),
    }

    Ok(w.finish())
}

fn is_printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

fn max_for_bits(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], MemoError> {
        let available = self.buf.len() - self.pos;
        if n > available {
            return Err(MemoError::TruncatedPush {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], MemoError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn uint_be(&mut self, bits: u32) -> Result<u64, MemoError> {
        let bytes = self.take((bits / 8) as usize)?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    /// Fixed ASCII slot with trailing NULs stripped.
    fn ascii(&mut self, field: &'static str, len: usize) -> Result<String, MemoError> {
        let raw = self.take(len)?;
        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        let text = &raw[..end];
        if !text.iter().copied().all(is_printable) {
            return Err(MemoError::NonPrintable { field });
        }
        Ok(text.iter().map(|b| char::from(*b)).collect())
    }
}

struct Writer {
    out: Vec<u8>,
}

impl Writer {
    fn with_capacity(n: usize) -> Self {
        Self {
            out: Vec::with_capacity(n),
        }
    }

    fn bytes(&mut self, b: &[u8]) {
        self.out.extend_from_slice(b);
    }

    fn uint_be(&mut self, field: &'static str, value: u64, bits: u32) -> Result<(), MemoError> {
        if value > max_for_bits(bits) {
            return Err(MemoError::FieldOverflow { field, value, bits });
        }
        let width = (bits / 8) as usize;
        self.out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
        Ok(())
    }

    /// NUL-padded ASCII slot.
    fn ascii(&mut self, field: &'static str, value: &str, len: usize) -> Result<(), MemoError> {
        let bytes = value.as_bytes();
        if bytes.len() > len {
            return Err(MemoError::FieldTooLong {
                field,
                max: len,
                actual: bytes.len(),
            });
        }
        if !bytes.iter().copied().all(is_printable) {
            return Err(MemoError::NonPrintable { field });
        }
        self.out.extend_from_slice(bytes);
        self.out.resize(self.out.len() + len - bytes.len(), 0);
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.out
    }
}
