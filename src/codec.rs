//! Register word decoding for the SMA Modbus profile
//!
//! SMA inverters pack every 32-bit quantity into two consecutive 16-bit
//! holding registers, most-significant register first (big-endian word and
//! byte order). Each encoding reserves one bit pattern as a "not available"
//! sentinel: a channel that is not wired or not applicable reports the
//! sentinel instead of a measurement, which is a valid reading and must not
//! be confused with a transport failure.

use serde::{Deserialize, Serialize};

/// How a 32-bit quantity is packed into two registers, and which bit
/// pattern means "not available".
///
/// The SMA profile uses exactly these two encodings for the analog
/// measurements this service reads; the enum is deliberately closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingKind {
    /// Unsigned 32-bit integer; sentinel is all bits set (0xFFFF_FFFF)
    UInt32,
    /// Two's-complement signed 32-bit integer; sentinel is the minimum
    /// representable value (-2^31)
    Int32,
}

impl EncodingKind {
    /// Number of 16-bit registers one value of this encoding occupies
    pub const fn register_count(self) -> u16 {
        2
    }
}

/// Decode two big-endian register words into a scaled physical value.
///
/// `words[0]` carries the high 16 bits, `words[1]` the low 16 bits. Returns
/// `None` when the combined 32-bit pattern is the encoding's "not available"
/// sentinel, otherwise the raw integer multiplied by `scale`.
pub fn decode(words: [u16; 2], kind: EncodingKind, scale: f64) -> Option<f64> {
    let bits = (u32::from(words[0]) << 16) | u32::from(words[1]);

    match kind {
        EncodingKind::UInt32 => {
            if bits == u32::MAX {
                None
            } else {
                Some(f64::from(bits) * scale)
            }
        }
        EncodingKind::Int32 => {
            let raw = bits as i32;
            if raw == i32::MIN {
                None
            } else {
                Some(f64::from(raw) * scale)
            }
        }
    }
}
