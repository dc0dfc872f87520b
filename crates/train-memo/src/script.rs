//! # OP_RETURN Scripts
//!
//! Pulls memo payloads out of a scriptPubKey and builds the output script
//! that carries one.

use crate::codec::decode_event;
use crate::errors::MemoError;
use crate::events::MemoEvent;
use tracing::{debug, warn};

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_RETURN: u8 = 0x6a;

/// Largest direct push opcode.
const MAX_DIRECT_PUSH: u8 = 0x4b;

/// Largest OP_RETURN payload relayed by default policy.
pub const MAX_STANDARD_PAYLOAD: usize = 80;

/// Every push after the leading OP_RETURN, in order.
pub fn extract_all_push_data(script: &[u8]) -> Result<Vec<Vec<u8>>, MemoError> {
    if script.first() != Some(&OP_RETURN) {
        return Err(MemoError::NotOpReturn);
    }

    let mut pushes = Vec::new();
    let mut pos = 1;

    while pos < script.len() {
        let opcode = script[pos];
        let offset = pos;
        pos += 1;

        let len = match opcode {
            OP_0 => 0,
            1..=MAX_DIRECT_PUSH => usize::from(opcode),
            OP_PUSHDATA1 => read_len(script, &mut pos, 1, offset)?,
            OP_PUSHDATA2 => read_len(script, &mut pos, 2, offset)?,
            OP_PUSHDATA4 => read_len(script, &mut pos, 4, offset)?,
            _ => return Err(MemoError::UnexpectedOpcode { opcode, offset }),
        };

        let available = script.len() - pos;
        if len > available {
            return Err(MemoError::TruncatedPush {
                offset,
                needed: len,
                available,
            });
        }
        pushes.push(script[pos..pos + len].to_vec());
        pos += len;
    }

    debug!("[train-memo] {} push(es) in {}-byte script", pushes.len(), script.len());
    Ok(pushes)
}

/// First push after OP_RETURN.
pub fn extract_push_data(script: &[u8]) -> Result<Vec<u8>, MemoError> {
    extract_all_push_data(script)?
        .into_iter()
        .next()
        .ok_or(MemoError::NoPushData)
}

/// Extract every push and decode each as a memo event.
pub fn decode_script(script: &[u8]) -> Result<Vec<MemoEvent>, MemoError> {
    Ok(extract_all_push_data(script)?
        .iter()
        .map(|p| decode_event(p))
        .collect())
}

/// Hex form of `decode_script` (`0x` optional).
pub fn decode_script_hex(script_hex: &str) -> Result<Vec<MemoEvent>, MemoError> {
    let script = hex::decode(script_hex.trim().trim_start_matches("0x"))
        .map_err(|e| MemoError::InvalidHex(e.to_string()))?;
    decode_script(&script)
}

/// `OP_RETURN <payload>` with the smallest push encoding.
pub fn build_op_return_script(payload: &[u8]) -> Result<Vec<u8>, MemoError> {
    let len = payload.len();
    if len > usize::from(u16::MAX) {
        return Err(MemoError::PayloadTooLarge(len));
    }
    if len > MAX_STANDARD_PAYLOAD {
        warn!(
            "[train-memo] {}-byte OP_RETURN payload exceeds the {}-byte relay limit",
            len, MAX_STANDARD_PAYLOAD
        );
    }

    let mut script = Vec::with_capacity(len + 4);
    script.push(OP_RETURN);
    match len {
        0 => script.push(OP_0),
        1..=0x4b => script.push(len as u8),
        0x4c..=0xff => {
            script.push(OP_PUSHDATA1);
            script.push(len as u8);
        }
        _ => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(len as u16).to_le_bytes());
        }
    }
    script.extend_from_slice(payload);
    Ok(script)
}

/// Little-endian push length of `width` bytes.
fn read_len(
    script: &[u8],
    pos: &mut usize,
    width: usize,
    offset: usize,
) -> Result<usize, MemoError> {
    let available = script.len() - *pos;
    if width > available {
        return Err(MemoError::TruncatedPush {
            offset,
            needed: width,
            available,
        });
    }
    let len = script[*pos..*pos + width]
        .iter()
        .rev()
        .fold(0usize, |acc, b| (acc << 8) | usize::from(*b));
    *pos += width;
    Ok(len)
}
