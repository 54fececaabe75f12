mod allocator;
mod table;

pub use allocator::{allocate, AllocateError};
pub use table::{AllocatedLevel, AllocatedNode, CodeTable, Variant, FLAG_CONSTANTS};
