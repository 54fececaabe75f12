//! Packed 16-bit plug type codes
//!
//! A code carries the type bits of a taxonomy node in its low bits, the command
//! flag above them and the two direction bits at the top:
//!
//! ```text
//!  15 14 | 13  | 12 ..................... 0
//!  IN OUT| CMD | type (nested category slots)
//! ```
//!
//! Only the compiler knows how the type bits are split into levels; this crate
//! just offers the flag arithmetic that runtime consumers of the codes need.
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the type field in the reference layout
pub const TYPE_BITS: u32 = 13;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodeError {
    #[error("'{0}' is not a valid plug type code")]
    Invalid(String),
    #[error("{0} does not fit into 16 bits")]
    OutOfRange(u64),
}

/// Endpoint direction encoded in the top two bits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(u16);

impl Code {
    pub const UNKNOWN: Code = Code(0);
    pub const OUT: Code = Code(1 << 14);
    pub const IN: Code = Code(2 << 14);
    pub const DIRECTION_MASK: Code = Code(3 << 14);
    pub const CMD: Code = Code(1 << TYPE_BITS);
    pub const TYPE_MASK: Code = Code((1 << TYPE_BITS) - 1);

    pub const fn new(bits: u16) -> Self {
        Code(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Type bits only, direction and command flags stripped
    pub const fn type_code(self) -> Code {
        Code(self.0 & Self::TYPE_MASK.0)
    }

    pub const fn masked(self, mask: Code) -> Code {
        Code(self.0 & mask.0)
    }

    pub fn direction(self) -> Option<Direction> {
        match self.masked(Self::DIRECTION_MASK) {
            Self::IN => Some(Direction::In),
            Self::OUT => Some(Direction::Out),
            _ => None,
        }
    }

    pub fn is_input(self) -> bool {
        self.direction() == Some(Direction::In)
    }

    pub fn is_output(self) -> bool {
        self.direction() == Some(Direction::Out)
    }

    pub const fn is_command(self) -> bool {
        self.0 & Self::CMD.0 != 0
    }

    /// Same type with the given direction, replacing any previous direction
    pub const fn with_direction(self, direction: Direction) -> Code {
        let flag = match direction {
            Direction::In => Self::IN,
            Direction::Out => Self::OUT,
        };
        Code((self.0 & !Self::DIRECTION_MASK.0) | flag.0)
    }

    pub const fn with_command(self) -> Code {
        Code(self.0 | Self::CMD.0)
    }

    /// Mask covering `offset` up through the most significant type bit
    pub const fn category_mask(offset: u32, type_bits: u32) -> Code {
        let width = type_bits - offset;
        Code((((1u32 << width) - 1) << offset) as u16)
    }
}

impl BitOr for Code {
    type Output = Code;

    fn bitor(self, rhs: Code) -> Code {
        Code(self.0 | rhs.0)
    }
}

impl BitAnd for Code {
    type Output = Code;

    fn bitand(self, rhs: Code) -> Code {
        Code(self.0 & rhs.0)
    }
}

impl From<u16> for Code {
    fn from(bits: u16) -> Self {
        Code(bits)
    }
}

impl From<Code> for u16 {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Accepts `0x`-prefixed hex or plain decimal
impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        }
        .map_err(|_| CodeError::Invalid(s.to_string()))?;
        u16::try_from(value)
            .map(Code)
            .map_err(|_| CodeError::OutOfRange(value))
    }
}
