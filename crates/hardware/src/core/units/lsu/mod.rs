//! Load/Store Unit.
//!
//! Effective address generation, load extension and store data masking.
//! Loads access memory in the execute stage; stores only compute their
//! address and data there and write memory when they commit.
//!
//! - [`ordering`]: the conservative store-to-load ordering rule.

/// Store-to-load ordering.
pub mod ordering;

use crate::core::pipeline::signals::MemWidth;
use crate::isa::kind::InstKind;

/// Effective address `base + offset`.
#[inline]
pub const fn effective_address(base: u64, offset: i64) -> u64 {
    base.wrapping_add_signed(offset)
}

/// Extends a raw little-endian value read for `kind` to 64 bits.
pub const fn extend_load(kind: InstKind, width: MemWidth, raw: u64) -> u64 {
    let raw = raw & width.mask();
    if !kind.is_signed_load() {
        return raw;
    }
    match width {
        MemWidth::Byte => raw as u8 as i8 as i64 as u64,
        MemWidth::Half => raw as u16 as i16 as i64 as u64,
        MemWidth::Word => raw as u32 as i32 as i64 as u64,
        MemWidth::Double => raw,
    }
}

/// Truncates store data to the access width.
#[inline]
pub const fn store_data(width: MemWidth, value: u64) -> u64 {
    value & width.mask()
}
