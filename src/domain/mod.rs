//! Domain types for the analytics router.
//!
//! Commands, verbs and the handler kinds they resolve to.

mod command;
mod handler_kind;

pub use command::*;
pub use handler_kind::*;
