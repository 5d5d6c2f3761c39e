//! Resumable, push-fed streaming JSON reader.
//!
//! Input arrives in arbitrary-sized chunks via [`Parser::feed`]. Each call to
//! [`Parser::parse`] consumes whatever is buffered and either suspends with
//! [`ParseStatus::Pending`] (all state preserved, feed more and call again),
//! reports a terminal [`ParseError`], or — once the producer has called
//! [`Parser::close`] — completes with [`ParseStatus::Complete`].
//!
//! Internally a greedy DFA scanner turns characters into tokens and a
//! table-driven shift/reduce automaton turns tokens into structural events
//! delivered to an [`EventSink`]. [`TreeBuilder`] is the bundled sink that
//! materializes a [`Node`] tree.
//!
//! Because the scanner is greedy, a trailing one-character token can only be
//! flushed after closure, so drivers keep calling [`Parser::parse`] after
//! [`Parser::close`] until the result is no longer `Pending`:
//!
//! ```
//! use jsonbaud::{ParseStatus, Parser, TreeBuilder};
//!
//! let mut parser = Parser::new();
//! let mut tree = TreeBuilder::new();
//!
//! parser.feed("[null, tr");
//! assert_eq!(parser.parse(&mut tree).unwrap(), ParseStatus::Pending);
//!
//! parser.feed("ue]");
//! parser.close();
//! let status = loop {
//!     match parser.parse(&mut tree).unwrap() {
//!         ParseStatus::Pending => continue,
//!         done => break done,
//!     }
//! };
//! assert_eq!(status, ParseStatus::Complete);
//!
//! let root = tree.into_root().unwrap();
//! assert_eq!(root.to_string(), "[null, true]");
//! ```
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod event;
mod parser;
mod scanner;
mod source;
mod tree;

pub mod chunk_utils;

pub use error::{ErrorKind, ParseError};
pub use event::{EventSink, ScalarKind};
pub use parser::{ParseStatus, Parser};
pub use tree::{Node, TreeBuilder};

#[cfg(test)]
mod tests;
