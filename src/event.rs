//! Structural events emitted by the parser.
//!
//! The parser does not build anything itself; it reports document structure
//! to an [`EventSink`] as it shifts through the grammar. All methods have
//! no-op defaults, so a sink implements only what it cares about. Events
//! arrive strictly in document order.

/// Distinguishes how a scalar was spelled in the source.
///
/// A quoted literal always carries [`ScalarKind::String`], a bare keyword or
/// number literal carries [`ScalarKind::Literal`], so `"true"` and `true`
/// are never conflated downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// A quoted string literal; the text is the decoded string body.
    String,
    /// A bare `true` / `false` / `null` or number literal; the text is the
    /// raw lexeme.
    Literal,
}

/// Receiver for the parser's structural events.
///
/// `object_value` fires for a scalar sitting in a key/value slot,
/// `array_value` for a scalar element; composite values are reported through
/// the corresponding start/end pairs instead.
pub trait EventSink {
    /// `{` opened an object.
    fn object_start(&mut self) {}

    /// A key inside the current object completed.
    fn key(&mut self, _name: &str) {}

    /// A scalar value completed inside the current object.
    fn object_value(&mut self, _text: &str, _kind: ScalarKind) {}

    /// `}` closed the current object.
    fn object_end(&mut self) {}

    /// `[` opened an array.
    fn array_start(&mut self) {}

    /// A scalar element completed inside the current array.
    fn array_value(&mut self, _text: &str, _kind: ScalarKind) {}

    /// `]` closed the current array.
    fn array_end(&mut self) {}
}

/// The all-no-op sink, for validation-only parsing.
impl EventSink for () {}
