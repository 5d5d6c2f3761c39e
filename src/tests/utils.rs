//! Shared test plumbing: an event recorder and chunk-feeding drivers.

use alloc::{borrow::ToOwned, string::String, vec::Vec};

use crate::{EventSink, Node, ParseError, ParseStatus, Parser, ScalarKind, TreeBuilder};

/// A recorded structural event.
#[derive(Debug, Clone, PartialEq)]
pub enum Ev {
    ObjectStart,
    Key(String),
    ObjectValue(String, ScalarKind),
    ObjectEnd,
    ArrayStart,
    ArrayValue(String, ScalarKind),
    ArrayEnd,
}

/// Sink that records every event in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Ev>,
}

impl EventSink for Recorder {
    fn object_start(&mut self) {
        self.events.push(Ev::ObjectStart);
    }

    fn key(&mut self, name: &str) {
        self.events.push(Ev::Key(name.to_owned()));
    }

    fn object_value(&mut self, text: &str, kind: ScalarKind) {
        self.events.push(Ev::ObjectValue(text.to_owned(), kind));
    }

    fn object_end(&mut self) {
        self.events.push(Ev::ObjectEnd);
    }

    fn array_start(&mut self) {
        self.events.push(Ev::ArrayStart);
    }

    fn array_value(&mut self, text: &str, kind: ScalarKind) {
        self.events.push(Ev::ArrayValue(text.to_owned(), kind));
    }

    fn array_end(&mut self) {
        self.events.push(Ev::ArrayEnd);
    }
}

/// Feeds `chunks` in order, closes, and keeps calling `parse` until the
/// document completes.
pub fn drive<K: EventSink>(chunks: &[&str], sink: &mut K) -> Result<(), ParseError> {
    let mut parser = Parser::new();
    for chunk in chunks {
        parser.feed(chunk);
        match parser.parse(sink)? {
            ParseStatus::Pending => {}
            ParseStatus::Complete => unreachable!("completion requires closure"),
        }
    }
    parser.close();
    loop {
        match parser.parse(sink)? {
            ParseStatus::Pending => {}
            ParseStatus::Complete => return Ok(()),
        }
    }
}

/// Feeds `chunks` and materializes the document tree.
pub fn tree_of(chunks: &[&str]) -> Result<Node, ParseError> {
    let mut tree = TreeBuilder::new();
    drive(chunks, &mut tree)?;
    Ok(tree.into_root().unwrap_or(Node::Null))
}

/// Event sequence produced for `chunks`; the parse must succeed.
pub fn events_of(chunks: &[&str]) -> Vec<Ev> {
    let mut recorder = Recorder::default();
    drive(chunks, &mut recorder).unwrap();
    recorder.events
}

/// Feeds `chunks` expecting a terminal failure; panics on completion.
pub fn error_of(chunks: &[&str]) -> ParseError {
    let mut parser = Parser::new();
    for chunk in chunks {
        parser.feed(chunk);
        match parser.parse(&mut ()) {
            Ok(ParseStatus::Pending) => {}
            Ok(ParseStatus::Complete) => panic!("completion requires closure"),
            Err(err) => return err,
        }
    }
    parser.close();
    loop {
        match parser.parse(&mut ()) {
            Ok(ParseStatus::Pending) => {}
            Ok(ParseStatus::Complete) => panic!("expected an error, parse completed"),
            Err(err) => return err,
        }
    }
}
