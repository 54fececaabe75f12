//! Compiler for the plug type taxonomy
//!
//! A [`schema::Schema`] is allocated into packed 16-bit codes
//! ([`codes::allocate`]), folded into decision tables ([`compile::compile`])
//! and finally rendered ([`render`]) and written ([`writer`]).
pub mod codes;
pub mod compile;
pub mod constants;
pub mod helpers;
pub mod render;
pub mod schema;
pub mod writer;

pub use plugcode::{Code, Direction};
