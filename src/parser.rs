//! The table-driven shift/reduce parser.
//!
//! The automaton is plain constant data: a 38-state matrix over 18 columns,
//! nine goto columns for the nonterminals followed by nine action columns
//! for the terminals (terminal columns reuse the scanner's token numbering,
//! 9–17). The driver below is a small loop over that matrix; structural
//! events fire as a side effect of shifting into the marker states.
//!
//! The grammar, reconstructed from the table (nonterminal ids on the left):
//!
//! ```text
//! 0 document     : '{' members '}' | '[' elements ']'
//! 1 members      : ε | member-list
//! 2 member-list  : member member-tail
//! 3 member-tail  : ε | ',' member-list
//! 4 member       : string sep value
//! 5 value        : literal | string | document
//! 6 elements     : ε | element-list
//! 7 element-list : value element-tail
//! 8 element-tail : ε | ',' element-list
//! ```
//!
//! `sep` is `:` or `,`: historically this reader separated keys from their
//! values with a comma, and inputs in that form are still accepted alongside
//! the conventional colon.

use alloc::vec::Vec;

use crate::{
    error::{ErrorKind, ParseError},
    event::{EventSink, ScalarKind},
    scanner::{Scan, Scanner, Token},
};

/// Successful outcomes of [`Parser::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// A whole document was recognized and the input is exhausted.
    Complete,
    /// All buffered input was consumed without reaching a decision. Parser
    /// and scanner state are preserved; feed more input (or close and call
    /// again) to make progress.
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Err,
    /// Consume the terminal (or, in a goto column, the freshly reduced
    /// nonterminal) and move to the given state.
    Shift(u8),
    /// Pop `pops` symbol/state pairs and replace them with nonterminal
    /// `sym`.
    Reduce { sym: u8, pops: u8 },
}

const E: Cell = Cell::Err;

const fn s(next: u8) -> Cell {
    Cell::Shift(next)
}

const fn r(sym: u8, pops: u8) -> Cell {
    Cell::Reduce { sym, pops }
}

/// The start symbol; reducing to it with an empty stack under `End`
/// lookahead accepts the input.
const DOCUMENT: usize = 0;

/// The parse table. Rows are automaton states; columns 0–8 are gotos for
/// the nonterminals of the grammar above, columns 9–17 are actions for the
/// terminals `{ } [ ] , string : literal end`.
#[rustfmt::skip]
const PT: [[Cell; 18]; 38] = [
    //          doc      mbrs     mlist    mtail    mbr      val      elts     elist    etail     {        }        [        ]        ,        str      :       lit       end
    /*  0 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       s(1),    E,       s(19),   E,       E,       E,       E,       E,       E      ],
    /*  1 */ [E,       s(12),   s(14),   E,       s(15),   E,       E,       E,       E,       E,       r(1, 0), E,       E,       E,       s(2),    E,       E,       E      ],
    /*  2 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(3),    E,       s(3),    E,       E      ],
    /*  3 */ [s(20),   E,       E,       E,       E,       s(21),   E,       E,       E,       s(10),   E,       s(6),    E,       E,       s(5),    E,       s(4),    E      ],
    /*  4 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(5, 1), E,       E,       r(5, 1), E,       E,       E,       E      ],
    /*  5 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(5, 1), E,       E,       r(5, 1), E,       E,       E,       E      ],
    /*  6 */ [s(26),   E,       E,       E,       E,       s(27),   s(22),   s(24),   E,       s(11),   E,       s(9),    r(6, 0), E,       s(8),    E,       s(7),    E      ],
    /*  7 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(5, 1), r(5, 1), E,       E,       E,       E      ],
    /*  8 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(5, 1), r(5, 1), E,       E,       E,       E      ],
    /*  9 */ [s(26),   E,       E,       E,       E,       s(27),   s(35),   s(24),   E,       s(11),   E,       s(9),    r(6, 0), E,       s(8),    E,       s(7),    E      ],
    /* 10 */ [E,       s(31),   s(14),   E,       s(15),   E,       E,       E,       E,       E,       r(1, 0), E,       E,       E,       s(2),    E,       E,       E      ],
    /* 11 */ [E,       s(33),   s(14),   E,       s(15),   E,       E,       E,       E,       E,       r(1, 0), E,       E,       E,       s(2),    E,       E,       E      ],
    /* 12 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(13),   E,       E,       E,       E,       E,       E,       E      ],
    /* 13 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(0, 3)],
    /* 14 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(1, 1), E,       E,       E,       E,       E,       E,       E      ],
    /* 15 */ [E,       E,       E,       s(17),   E,       E,       E,       E,       E,       E,       r(3, 0), E,       E,       s(16),   E,       E,       E,       E      ],
    /* 16 */ [E,       E,       s(18),   E,       s(15),   E,       E,       E,       E,       E,       E,       E,       E,       E,       s(2),    E,       E,       E      ],
    /* 17 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(2, 2), E,       E,       E,       E,       E,       E,       E      ],
    /* 18 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(3, 2), E,       E,       E,       E,       E,       E,       E      ],
    /* 19 */ [s(26),   E,       E,       E,       E,       s(27),   s(25),   s(24),   E,       s(11),   E,       s(9),    r(6, 0), E,       s(8),    E,       s(7),    E      ],
    /* 20 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(5, 1), E,       E,       r(5, 1), E,       E,       E,       E      ],
    /* 21 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(4, 3), E,       E,       r(4, 3), E,       E,       E,       E      ],
    /* 22 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(23),   E,       E,       E,       E,       E      ],
    /* 23 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(0, 3), E,       E,       r(0, 3), E,       E,       E,       E      ],
    /* 24 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(6, 1), E,       E,       E,       E,       E      ],
    /* 25 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(37),   E,       E,       E,       E,       E      ],
    /* 26 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(5, 1), r(5, 1), E,       E,       E,       E      ],
    /* 27 */ [E,       E,       E,       E,       E,       E,       E,       E,       s(28),   E,       E,       E,       r(8, 0), s(29),   E,       E,       E,       E      ],
    /* 28 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(7, 2), E,       E,       E,       E,       E      ],
    /* 29 */ [s(26),   E,       E,       E,       E,       s(27),   E,       s(30),   E,       s(11),   E,       s(9),    E,       E,       s(8),    E,       s(7),    E      ],
    /* 30 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(8, 2), E,       E,       E,       E,       E      ],
    /* 31 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(32),   E,       E,       E,       E,       E,       E,       E      ],
    /* 32 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(0, 3), E,       E,       r(0, 3), E,       E,       E,       E      ],
    /* 33 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(34),   E,       E,       E,       E,       E,       E,       E      ],
    /* 34 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(0, 3), r(0, 3), E,       E,       E,       E      ],
    /* 35 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       s(36),   E,       E,       E,       E,       E      ],
    /* 36 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(0, 3), r(0, 3), E,       E,       E,       E      ],
    /* 37 */ [E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       E,       r(0, 3)],
];

/// Column index of a terminal, shared with the scanner's token numbering.
fn column(token: &Token) -> usize {
    match token {
        Token::LBrace => 9,
        Token::RBrace => 10,
        Token::LBracket => 11,
        Token::RBracket => 12,
        Token::Comma => 13,
        Token::Str(_) => 14,
        Token::Colon => 15,
        Token::Other(_) => 16,
        Token::End => 17,
    }
}

/// The incremental parser.
///
/// Feed input with [`feed`](Parser::feed), announce the end of it with
/// [`close`](Parser::close), and drive with [`parse`](Parser::parse) until
/// the result is no longer [`ParseStatus::Pending`]. Structural events are
/// delivered to the [`EventSink`] passed to each `parse` call.
///
/// The parser is single-shot: after an error it stays failed and every
/// later call returns the same error.
#[derive(Debug, Default)]
pub struct Parser {
    scanner: Scanner,
    state: usize,
    /// Interleaved symbol and state ids, so a reduce of length k pops 2k
    /// entries.
    stack: Vec<usize>,
    error: Option<ParseError>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
            state: 0,
            stack: Vec::new(),
            error: None,
        }
    }

    /// Appends a chunk of input.
    pub fn feed(&mut self, text: &str) {
        self.scanner.feed(text);
    }

    /// Announces that no further input will arrive.
    pub fn close(&mut self) {
        self.scanner.close();
    }

    /// Consumes buffered input, firing events on `sink` as structure is
    /// recognized.
    ///
    /// Returns [`ParseStatus::Pending`] whenever the decision needs input
    /// that has not arrived yet — including right after [`close`], since the
    /// greedy scanner may still hold a flushed-but-unconsumed token; loop
    /// until [`ParseStatus::Complete`] or an error.
    ///
    /// # Errors
    ///
    /// Lexical errors, syntax errors (including trailing input after a
    /// complete document) and a premature end of input. The first error is
    /// latched and returned by every subsequent call.
    ///
    /// # Panics
    ///
    /// Panics if the constant parse table violates its own invariants
    /// (stack underflow, missing goto, spurious reduction to the start
    /// symbol). This indicates a bug in the table, never bad input.
    pub fn parse<K: EventSink>(&mut self, sink: &mut K) -> Result<ParseStatus, ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        match self.drive(sink) {
            Ok(status) => Ok(status),
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn drive<K: EventSink>(&mut self, sink: &mut K) -> Result<ParseStatus, ParseError> {
        let mut token = match self.scanner.next_token()? {
            Scan::Pending => return Ok(ParseStatus::Pending),
            Scan::Token(token) => token,
        };

        loop {
            match PT[self.state][column(&token)] {
                Cell::Err => return Err(self.reject(&token)),
                Cell::Shift(next) => {
                    self.stack.push(column(&token));
                    self.state = next as usize;
                    self.stack.push(self.state);
                    Self::semantics(self.state, &token, sink);
                    token = match self.scanner.next_token()? {
                        Scan::Pending => return Ok(ParseStatus::Pending),
                        // The stream may drain right after a shift; whether
                        // that is acceptance or a premature end is decided
                        // on the next call, when `End` meets the table.
                        Scan::Token(Token::End) => return Ok(ParseStatus::Pending),
                        Scan::Token(token) => token,
                    };
                }
                Cell::Reduce { sym, pops } => {
                    let sym = sym as usize;
                    let pops = 2 * pops as usize;
                    assert!(
                        self.stack.len() >= pops,
                        "parse table: stack underflow on reduce to {sym}"
                    );
                    self.stack.truncate(self.stack.len() - pops);
                    match self.stack.last() {
                        None => {
                            assert!(
                                sym == DOCUMENT && token == Token::End,
                                "parse table: emptied the stack away from acceptance"
                            );
                            return Ok(ParseStatus::Complete);
                        }
                        Some(&top) => {
                            self.stack.push(sym);
                            let Cell::Shift(goto) = PT[top][sym] else {
                                panic!("parse table: no goto for nonterminal {sym} in state {top}");
                            };
                            self.state = goto as usize;
                            self.stack.push(self.state);
                        }
                    }
                }
            }
        }
    }

    fn reject(&self, token: &Token) -> ParseError {
        let (line, column) = self.scanner.position();
        let kind = if matches!(token, Token::End) {
            ErrorKind::UnexpectedEndOfInput
        } else {
            ErrorKind::UnexpectedToken(token.describe())
        };
        ParseError { kind, line, column }
    }

    /// Fires the event attached to a freshly entered state. The emitting
    /// states are fixed properties of the table.
    fn semantics<K: EventSink>(state: usize, token: &Token, sink: &mut K) {
        match state {
            1 | 10 | 11 => sink.object_start(),
            2 => {
                if let Token::Str(name) = token {
                    sink.key(name);
                }
            }
            4 | 5 => Self::scalar(token, |text, kind| sink.object_value(text, kind)),
            13 | 32 | 34 => sink.object_end(),
            6 | 9 | 19 => sink.array_start(),
            7 | 8 => Self::scalar(token, |text, kind| sink.array_value(text, kind)),
            23 | 36 | 37 => sink.array_end(),
            _ => {}
        }
    }

    fn scalar(token: &Token, deliver: impl FnOnce(&str, ScalarKind)) {
        match token {
            Token::Str(text) => deliver(text, ScalarKind::String),
            Token::Other(text) => deliver(text, ScalarKind::Literal),
            _ => {}
        }
    }
}
