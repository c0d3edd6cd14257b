//! Command interpreter for the HBNB console.
//!
//! A console line is written in one of two grammars:
//!
//! - **Verb form**: `show State 1234`, `update User 1234 first_name "Betty"`
//! - **Dotted form**: `State.show("1234")`, `User.update("1234", {"age": 30})`
//!
//! Both grammars produce the same [`Request`], so a command behaves the same
//! whichever way it was typed. The [`Dispatcher`] executes requests against
//! an injected [`Storage`](hbnb_store::Storage) and writes results and
//! diagnostics to an injected writer.
//!
//! # Modules
//!
//! - [`request`]: Normalized command representation
//! - [`parser`]: Line classification and the verb-form grammar
//! - [`dotted`]: The dotted-form grammar and its argument bodies
//! - [`dispatcher`]: Execution against the store
//! - [`error`]: User-facing diagnostics
//! - [`help`]: Help topics

pub mod dispatcher;
pub mod dotted;
pub mod error;
pub mod help;
pub mod parser;
pub mod request;

pub use dispatcher::{Dispatcher, Flow};
pub use error::ShellError;
pub use parser::parse_line;
pub use request::{Line, Request, Updates, Verb};
