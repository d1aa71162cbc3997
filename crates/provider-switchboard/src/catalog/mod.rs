//! Model catalog: logical roles and the per-provider model id tables.

pub mod apply;
pub mod default;
pub mod types;

pub use apply::*;
pub use default::*;
pub use types::*;
