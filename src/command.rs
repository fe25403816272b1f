//! Directional command bit-flags.
//!
//! Each direction is an independent power of two so a single `u8` can hold
//! any combination, e.g. `LEFT | UP` for a diagonal.  `RESET` (no bits)
//! means the stick is centred and no gesture is asserting a direction.

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of directional commands.
    ///
    /// Serialised as the raw byte; unknown bits are dropped on the way in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(from = "u8", into = "u8")]
    pub struct Command: u8 {
        const LEFT  = 0x01;
        const RIGHT = 0x02;
        const UP    = 0x04;
        const DOWN  = 0x08;
    }
}

impl Command {
    /// No direction asserted.
    pub const RESET: Self = Self::empty();

    /// Every known flag, in display order.
    pub const ALL: [Self; 4] = [Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN];

    #[inline]
    pub const fn is_reset(self) -> bool {
        self.is_empty()
    }

    /// Render as `RESET` or `LEFT|UP` style text without allocating.
    pub fn names(self) -> heapless::String<24> {
        let mut out = heapless::String::new();
        if self.is_reset() {
            // Fits: capacity 24 > "RESET".
            let _ = out.push_str("RESET");
            return out;
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                let _ = out.push('|');
            }
            let _ = out.push_str(name);
        }
        out
    }
}

impl From<u8> for Command {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<Command> for u8 {
    fn from(c: Command) -> Self {
        c.bits()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.names().as_str())
    }
}
