//! The per-tick systems, in the order [`crate::engine`] runs them.

pub mod contact;
pub mod demographics;
pub mod movement;
