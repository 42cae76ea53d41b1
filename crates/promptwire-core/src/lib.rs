//! # Promptwire Core
//!
//! The relay core: [`parser`] turns a templated curl-style command string
//! into a [`promptwire_protocols::RequestDescriptor`]; [`dispatch`] executes
//! the descriptor as a buffered or streaming HTTP POST.

pub mod dispatch;
pub mod parser;

pub use dispatch::Dispatcher;
pub use parser::{parse, parse_deferred, MESSAGE_PLACEHOLDER, SCHEMA_PLACEHOLDER};
