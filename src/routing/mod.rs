//! Command routing.
//!
//! - Table: the declarative list of routes
//! - Resolver: compiles the table and maps (verb, command) to a handler kind
//! - Dispatcher: runs the resolved handler and serializes its output

mod dispatcher;
mod resolver;
mod table;

pub use dispatcher::*;
pub use resolver::*;
pub use table::*;
