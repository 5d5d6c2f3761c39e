//! The incremental scanner.
//!
//! Scanning is greedy and resumable. If the buffered input runs out in the
//! middle of a token, [`Scanner::next_token`] does not fail; it returns
//! [`Scan::Pending`] and picks up exactly where it left off once more input
//! has been fed. For example, with `{ "hell` buffered, two calls yield
//! `{` and then `Pending`; after `o" : 12` arrives, three calls yield
//! `"hello"`, `:` and `Pending` again.
//!
//! Greediness means a token is only committed once a character that cannot
//! extend it is seen, or once the producer closes the stream: `1` could
//! still grow into `1.2e+3`. The scanner therefore remembers the last
//! accepting DFA state it passed through and, when it overshoots, returns
//! the accepted prefix and pushes the excess characters back into the
//! source.

use alloc::{string::String, vec::Vec};

use crate::{
    error::{ErrorKind, ParseError},
    source::{CharSource, Next},
};

/// Tokens delivered to the parser.
///
/// `Str` carries the decoded string body (quotes stripped, escapes
/// replaced); `Other` carries the raw lexeme of a keyword or number
/// literal. `End` is reported once a closed stream has fully drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Str(String),
    Other(String),
    End,
}

impl Token {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::Comma => "','",
            Token::Colon => "':'",
            Token::Str(_) => "string literal",
            Token::Other(_) => "literal",
            Token::End => "end of input",
        }
    }
}

/// Outcome of one scan attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scan {
    /// A complete token, or [`Token::End`] once the closed stream drains.
    Token(Token),
    /// Out of input without reaching a decision. All scanner state is
    /// preserved; feed more input (or close the source) and call again.
    Pending,
}

/// Character categories labelling the DFA arcs.
///
/// The letters singled out are exactly the ones occurring in `false`,
/// `true` and `null`; classification is case-insensitive. Inside a string
/// only `"` and `\` are special (`NoSpecial` covers the rest), and the
/// character following a backslash is always `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    A,
    E,
    F,
    L,
    N,
    R,
    S,
    T,
    U,
    Punct,     // { } [ ] , :
    Digit,     // 1-9
    Dot,
    Sign,      // + -
    Backslash,
    Quote,
    NoSpecial, // any char except " and \, inside a string
    Any,
    Blank,     // space \t \r \n \f
    Zero,
}

/// Lexing context; the same character classifies differently inside a
/// string or right after a backslash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Default,
    InString,
    AfterBackslash,
}

/// Terminal attached to an accepting DFA state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    No,
    Other,
    Str,
    Punct,
}

const __: i8 = -1;

/// The scanner DFA. Rows are states, columns follow [`Class`].
#[rustfmt::skip]
const DFA: [[i8; 19]; 28] = [
    //            A   E   F   L   N   R   S   T   U  {}  1-9  .  +-   \   " [^"\] any  bl   0
    /* start  */ [__, __, 16, __,  7, __, __, 11, __, 15,  2, 22, 27, __,  1, __, __,  0, 21],
    /* str    */ [__, __, __, __, __, __, __, __, __, __, __, __, __,  5,  4,  3, __, __, __],
    /* int    */ [__, 24, __, __, __, __, __, __, __, __,  2, 23, __, __,  1, __, __, __,  2],
    /* strchr */ [__, __, __, __, __, __, __, __, __, __, __, __, __,  5,  4,  3, __, __, __],
    /* STR    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* esc    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,  6, __, __],
    /* escchr */ [__, __, __, __, __, __, __, __, __, __, __, __, __,  5,  4,  3, __, __, __],
    /* n      */ [__, __, __, __, __, __, __, __,  8, __, __, __, __, __, __, __, __, __, __],
    /* nu     */ [__, __, __,  9, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* nul    */ [__, __, __, 10, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* NULL   */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* t      */ [__, __, __, __, __, 12, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* tr     */ [__, __, __, __, __, __, __, __, 13, __, __, __, __, __, __, __, __, __, __],
    /* tru    */ [__, 14, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* TRUE   */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* PUNCT  */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* f      */ [17, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* fa     */ [__, __, __, 18, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* fal    */ [__, __, __, __, __, __, 19, __, __, __, __, __, __, __, __, __, __, __, __],
    /* fals   */ [__, 20, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* FALSE  */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* ZERO   */ [__, __, __, __, __, __, __, __, __, __, __, 23, __, __, __, __, __, __, __],
    /* dot    */ [__, __, __, __, __, __, __, __, __, __, 23, __, __, __, __, __, __, __, 23],
    /* frac   */ [__, 24, __, __, __, __, __, __, __, __, 23, __, __, __, __, __, __, __, 23],
    /* e      */ [__, __, __, __, __, __, __, __, __, __, 26, __, 25, __, __, __, __, __, __],
    /* esign  */ [__, __, __, __, __, __, __, __, __, __, 26, __, __, __, __, __, __, __, __],
    /* EXP    */ [__, __, __, __, __, __, __, __, __, __, 26, __, __, __, __, __, __, __, 26],
    /* sign   */ [__, __, __, __, __, __, __, __, __, __,  2, 22, __, __, __, __, __, __, 21],
];

/// Terminal accepted by each DFA state, [`Accept::No`] for non-accepting
/// states. The scanner remembers the most recent accepting state as its
/// fallback when a longer match fails.
const ACCEPT: [Accept; 28] = [
    Accept::No,
    Accept::No,
    Accept::Other,
    Accept::No,
    Accept::Str,
    Accept::No,
    Accept::No,
    Accept::No,
    Accept::No,
    Accept::No,
    Accept::Other,
    Accept::No,
    Accept::No,
    Accept::No,
    Accept::Other,
    Accept::Punct,
    Accept::No,
    Accept::No,
    Accept::No,
    Accept::No,
    Accept::Other,
    Accept::Other,
    Accept::No,
    Accept::Other,
    Accept::No,
    Accept::No,
    Accept::Other,
    Accept::No,
];

/// The incremental scanner: a DFA over [`Class`] with greedy token
/// recognition and look-ahead rollback.
#[derive(Debug)]
pub(crate) struct Scanner {
    source: CharSource,
    state: usize,
    last_final: Option<usize>,
    lexeme: Vec<char>,
    /// Characters consumed past the last accepting state. They sit at the
    /// tail of `lexeme` and are pushed back when the token is flushed.
    overshoot: usize,
    context: Context,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            source: CharSource::new(),
            state: 0,
            last_final: None,
            lexeme: Vec::new(),
            overshoot: 0,
            context: Context::Default,
        }
    }

    /// Appends a chunk of input.
    pub(crate) fn feed(&mut self, text: &str) {
        self.source.push(text);
    }

    /// Announces that no further input will arrive. Required before the
    /// scanner can flush a trailing accepting state or report
    /// [`Token::End`].
    pub(crate) fn close(&mut self) {
        self.source.close();
    }

    pub(crate) fn position(&self) -> (usize, usize) {
        (self.source.line(), self.source.column())
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Fails when the DFA dies with no accepted prefix to fall back on, or
    /// when the closed stream ends inside an unfinished token.
    pub(crate) fn next_token(&mut self) -> Result<Scan, ParseError> {
        loop {
            let c = match self.source.next() {
                Next::Char(c) => c,
                Next::Pending => return Ok(Scan::Pending),
                Next::End => {
                    return if let Some(fin) = self.last_final {
                        Ok(Scan::Token(self.flush(fin)))
                    } else if self.lexeme.is_empty() {
                        Ok(Scan::Token(Token::End))
                    } else {
                        self.reset();
                        Err(self.fail(ErrorKind::UnterminatedToken))
                    };
                }
            };

            let class = self.classify(c);
            if class != Class::Blank {
                self.lexeme.push(c);
                self.overshoot += 1;
            }

            let next = DFA[self.state][class as usize];
            if next == __ {
                return if let Some(fin) = self.last_final {
                    Ok(Scan::Token(self.flush(fin)))
                } else {
                    self.reset();
                    Err(self.fail(ErrorKind::InvalidCharacter(c)))
                };
            }
            self.state = next as usize;
            if ACCEPT[self.state] != Accept::No {
                self.last_final = Some(self.state);
                self.overshoot = 0;
            }
        }
    }

    /// Emits the terminal of the last accepting state, pushes the overshoot
    /// back into the source and rearms the DFA.
    fn flush(&mut self, fin: usize) -> Token {
        let kept = self.lexeme.len() - self.overshoot;
        let token = match ACCEPT[fin] {
            Accept::Str => Token::Str(postprocess(&self.lexeme[..kept])),
            Accept::Other => Token::Other(self.lexeme[..kept].iter().collect()),
            Accept::Punct => punctuation(self.lexeme[0]),
            Accept::No => unreachable!("accepting state carries no terminal"),
        };
        if self.overshoot > 0 {
            self.source.unget(&self.lexeme[kept..]);
        }
        self.last_final = None;
        self.reset();
        token
    }

    fn reset(&mut self) {
        self.state = 0;
        self.context = Context::Default;
        self.lexeme.clear();
        self.overshoot = 0;
    }

    fn fail(&self, kind: ErrorKind) -> ParseError {
        let (line, column) = self.position();
        ParseError { kind, line, column }
    }

    /// Maps a character to its class under the current context. Quote and
    /// backslash transitions move the context; the context is rearmed to
    /// [`Context::Default`] whenever a token is flushed, so pushed-back
    /// characters reclassify consistently on re-consumption.
    fn classify(&mut self, c: char) -> Class {
        match self.context {
            Context::InString => match c {
                '\\' => {
                    self.context = Context::AfterBackslash;
                    Class::Backslash
                }
                '"' => {
                    self.context = Context::Default;
                    Class::Quote
                }
                _ => Class::NoSpecial,
            },
            Context::AfterBackslash => {
                self.context = Context::InString;
                Class::Any
            }
            Context::Default => match c {
                '"' => {
                    self.context = Context::InString;
                    Class::Quote
                }
                '0' => Class::Zero,
                '1'..='9' => Class::Digit,
                '.' => Class::Dot,
                'e' | 'E' => Class::E,
                '+' | '-' => Class::Sign,
                '{' | '}' | '[' | ']' | ',' | ':' => Class::Punct,
                ' ' | '\t' | '\r' | '\n' | '\u{000C}' => Class::Blank,
                'a' | 'A' => Class::A,
                'f' | 'F' => Class::F,
                'l' | 'L' => Class::L,
                'n' | 'N' => Class::N,
                'r' | 'R' => Class::R,
                's' | 'S' => Class::S,
                't' | 'T' => Class::T,
                'u' | 'U' => Class::U,
                _ => Class::Any,
            },
        }
    }
}

fn punctuation(c: char) -> Token {
    match c {
        '{' => Token::LBrace,
        '}' => Token::RBrace,
        '[' => Token::LBracket,
        ']' => Token::RBracket,
        ':' => Token::Colon,
        ',' => Token::Comma,
        other => unreachable!("{other:?} is not punctuation"),
    }
}

/// Decodes the body of a string lexeme: strips the surrounding quotes and
/// replaces the escape sequences `\\ \/ \" \t \n \r \f \b` and `\uHHHH`.
///
/// A `\uHHHH` with fewer than four hex digits before the closing quote is
/// left as a literal `u` followed by whatever did appear. Surrogate halves
/// are decoded independently, never paired; since they are not scalar
/// values they surface as U+FFFD. Any other escaped character stands for
/// itself.
fn postprocess(lexeme: &[char]) -> String {
    let end = lexeme.len() - 1; // closing quote
    let mut out = String::with_capacity(end);
    let mut i = 1;
    while i < end {
        let c = lexeme[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }
        // An escape never ends the string body, so lexeme[i + 1] exists.
        i += 1;
        match lexeme[i] {
            c @ ('\\' | '/' | '"') => out.push(c),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{000C}'),
            'b' => out.push('\u{0008}'),
            'u' => {
                let code = if i + 4 < end {
                    hex4(&lexeme[i + 1..i + 5])
                } else {
                    None
                };
                match code {
                    Some(code) => {
                        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                        i += 4;
                    }
                    None => out.push('u'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    out
}

fn hex4(digits: &[char]) -> Option<u32> {
    digits[..4]
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}
