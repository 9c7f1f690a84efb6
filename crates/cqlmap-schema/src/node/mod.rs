//! Schema objects handed to the store-facing executor.
//!
//! These are structured descriptions only; rendering them as DDL text is the
//! executor's job.

mod column;
mod index;
mod table;
mod user_type;

pub use column::*;
pub use index::*;
pub use table::*;
pub use user_type::*;
