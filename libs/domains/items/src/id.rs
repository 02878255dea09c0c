//! Item identifiers derived from random UUIDs.
//!
//! The id is the first six hex digits of a v4 UUID read as a number, cut to
//! at most eight decimal digits. Six hex digits never exceed 16_777_215.
//! Ids are not unique; callers handle collisions on insert.

use uuid::Uuid;

/// Hex characters of the UUID used for the id.
const HEX_PREFIX_LEN: usize = 6;
const MAX_DECIMAL_DIGITS: u32 = 8;

/// Fresh identifier from a random v4 UUID.
pub fn generate_id() -> i64 {
    id_from_uuid(&Uuid::new_v4())
}

/// Deterministic part of [`generate_id`].
pub fn id_from_uuid(uuid: &Uuid) -> i64 {
    // Two hex characters per byte.
    let prefix = uuid.as_bytes()[..HEX_PREFIX_LEN / 2]
        .iter()
        .fold(0i64, |acc, byte| (acc << 8) | i64::from(*byte));

    truncate_decimal_digits(prefix, MAX_DECIMAL_DIGITS)
}

/// Keep the leading `digits` decimal digits of a non-negative number.
fn truncate_decimal_digits(mut value: i64, digits: u32) -> i64 {
    let limit = 10i64.pow(digits);
    while value >= limit {
        value /= 10;
    }
    value
}
