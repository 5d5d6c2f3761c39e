use thiserror::Error;

/// A terminal parse failure, with the position the reader had reached when
/// the failure was detected.
///
/// Positions are 1-based and refer to the furthest character pulled from the
/// input; characters re-read from the pushback buffer do not advance them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// What went wrong, independent of position.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// The failure taxonomy.
///
/// Lexical and syntactic failures and a premature end of input all surface
/// through the same [`ParseError`] channel. Violations of the internal table
/// invariants (stack underflow, missing goto) are bugs in the constant
/// tables, not input errors, and panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The scanner hit a dead state with no accepted prefix to fall back on.
    #[error("lexical error: invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input was closed in the middle of a token that had not yet
    /// reached an accepting state (e.g. an unterminated string).
    #[error("lexical error: unterminated token at end of input")]
    UnterminatedToken,
    /// The parse table has no action for the current token, or a complete
    /// document is followed by trailing non-whitespace input.
    #[error("syntax error: unexpected {0}")]
    UnexpectedToken(&'static str),
    /// The input was closed mid-derivation.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
