use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Behavioural flags of a taxonomy node, written as `"CMD | TOGGLE"` in schema files.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeFlags: u8 {
        /// Values may arrive as explicit commands (set, step, toggle)
        const CMD = 1 << 0;

        /// A toggle variant of the usage exists next to the plain one
        const TOGGLE = 1 << 1;

        /// All descendants are interchangeable when checking wiring
        const COMPATIBLE = 1 << 2;
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        TypeFlags::empty()
    }
}
