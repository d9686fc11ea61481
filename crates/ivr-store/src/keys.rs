//! Key encoding utilities for `RocksDB`.
//!
//! Numeric ids are stored big-endian so iteration order matches id order.

use ivr_core::{ReservationCode, SeatKey, TrainNumber};

const SEP: u8 = 0;

/// Key for a numeric id (complaints, refunds, emergency sequences).
#[must_use]
pub fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

/// Decode a numeric id key.
#[must_use]
pub fn decode_id(key: &[u8]) -> Option<u64> {
    key.try_into().ok().map(u64::from_be_bytes)
}

/// Journey key from a reservation code.
#[must_use]
pub fn journey_key(code: &ReservationCode) -> Vec<u8> {
    code.as_str().as_bytes().to_vec()
}

/// Schedule key from a train number.
#[must_use]
pub fn schedule_key(train_number: &TrainNumber) -> Vec<u8> {
    train_number.as_str().as_bytes().to_vec()
}

/// Seat availability key.
///
/// Format: `train || 0x00 || YYYY-MM-DD || 0x00 || class`
#[must_use]
pub fn seat_key(key: &SeatKey) -> Vec<u8> {
    let date = key.date.format("%Y-%m-%d").to_string();
    let mut out =
        Vec::with_capacity(key.train_number.as_str().len() + date.len() + key.class.len() + 2);
    out.extend_from_slice(key.train_number.as_str().as_bytes());
    out.push(SEP);
    out.extend_from_slice(date.as_bytes());
    out.push(SEP);
    out.extend_from_slice(key.class.as_bytes());
    out
}

/// Prefix for every index entry of one reservation code.
///
/// Complaint codes are free text (the unknown sentinel included), so the
/// prefix is terminated to keep `"123"` from matching `"1234"`.
#[must_use]
pub fn reservation_prefix(code: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(code.len() + 1);
    out.extend_from_slice(code.as_bytes());
    out.push(SEP);
    out
}

/// Index key: `code || 0x00 || id (8 bytes BE)`.
#[must_use]
pub fn reservation_index_key(code: &str, id: u64) -> Vec<u8> {
    let mut out = reservation_prefix(code);
    out.extend_from_slice(&id_key(id));
    out
}

/// Extract the trailing id from a reservation index key.
#[must_use]
pub fn id_from_index_key(key: &[u8]) -> Option<u64> {
    let start = key.len().checked_sub(8)?;
    decode_id(&key[start..])
}
