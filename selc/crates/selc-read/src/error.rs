//! Reader error types.
//!
//! Every reader failure aborts the whole top-level read; nothing is
//! retried. The messages here are the reader's public error surface, so
//! they stay stable.

use thiserror::Error;

/// An error raised while reading a form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// End of input inside a form, string, or other construct.
    #[error("EOF while reading")]
    Eof,

    /// End of input while reading a character literal (or the character
    /// after `#`).
    #[error("EOF while reading character")]
    EofCharacter,

    /// End of input inside a regex literal.
    #[error("EOF while reading regex")]
    EofRegex,

    /// A token matched none of the numeric grammars.
    #[error("Invalid number format [{0}]")]
    InvalidNumber(String),

    /// A ratio literal with a zero denominator.
    #[error("Divide by zero")]
    DivideByZero,

    /// A malformed `\xHH` or `\uHHHH` escape.
    #[error("Invalid unicode escape: \\{kind}{digits}")]
    InvalidUnicodeEscape { kind: char, digits: String },

    /// An escape character outside the supported set.
    #[error("Unsupported escape character: \\{0}")]
    InvalidEscape(char),

    /// A character literal that is neither a single character, a named
    /// character, nor a unicode form.
    #[error("Unknown character literal: \\{0}")]
    UnknownCharLiteral(String),

    /// A symbol or keyword token violating the lexical constraints.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A closing delimiter with no matching opener.
    #[error("Unmatched delimiter {0}")]
    UnmatchedDelimiter(char),

    /// A map literal with an odd number of forms.
    #[error("Map literal must contain an even number of forms")]
    OddMapForms,

    /// `#(...)` inside `#(...)`.
    #[error("nested #()s are not allowed")]
    NestedFnLiteral,

    /// An argument literal form other than `%`, `%&` or `%N`.
    #[error("arg literal must be %, %& or %integer")]
    InvalidArgLiteral,

    /// An argument literal registered while no `#(...)` is being read.
    #[error("arg literal not in #()")]
    ArgLiteralOutsideFn,

    /// An auto-gensym encountered with no active syntax-quote.
    #[error("Gensym literal not in syntax-quote")]
    GensymOutsideSyntaxQuote,

    /// `~@form` outside a collection position of a syntax-quote.
    #[error("splice not in list")]
    SpliceNotInList,

    /// A macro character after `#` with no dispatch parser.
    #[error("No dispatch macro for {0}")]
    UnknownDispatch(char),

    /// The `#<` form.
    #[error("Unreadable form")]
    UnreadableForm,

    /// A `^` metadata form that is not a symbol, keyword, string or map.
    #[error("Metadata must be Symbol, Keyword, String or Map")]
    InvalidMetadata,

    /// A `^` target that does not accept metadata.
    #[error("Metadata can only be applied to symbols and collections")]
    MetadataNotSupported,

    /// The form after `#` did not read as a symbol.
    #[error("Reader tag must be a symbol")]
    InvalidTag,

    /// A tag symbol with no registered parser. `registered` is the
    /// comma-separated list of known tags.
    #[error("Could not find tag parser for {tag} in ({registered})")]
    UnknownTag { tag: String, registered: String },

    /// A tag handler rejected its argument (wrong type, out-of-range
    /// timestamp, malformed UUID, ...).
    #[error("{0}")]
    Tag(String),

    /// A regex literal whose pattern failed to compile.
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(String),
}

/// Result alias for reader operations.
pub type ReadResult<T> = std::result::Result<T, ReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_number_display() {
        let err = ReadError::InvalidNumber("+-1".to_string());
        assert_eq!(err.to_string(), "Invalid number format [+-1]");
    }

    #[test]
    fn test_unmatched_delimiter_display() {
        let err = ReadError::UnmatchedDelimiter(')');
        assert_eq!(err.to_string(), "Unmatched delimiter )");
    }

    #[test]
    fn test_unknown_tag_display() {
        let err = ReadError::UnknownTag {
            tag: "card".to_string(),
            registered: "inst, queue, uuid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not find tag parser for card in (inst, queue, uuid)"
        );
    }

    #[test]
    fn test_unicode_escape_display() {
        let err = ReadError::InvalidUnicodeEscape {
            kind: 'u',
            digits: "12g4".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid unicode escape: \\u12g4");
    }
}
