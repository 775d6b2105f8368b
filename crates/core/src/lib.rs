//! Pure domain logic for the Cookbook platform.
//!
//! No I/O lives here: everything in this crate is deterministic and unit
//! testable without a database or HTTP stack.

pub mod constants;
pub mod error;
pub mod pagination;
pub mod shopping_list;
pub mod short_link;
pub mod types;
pub mod validation;
