use thiserror::Error;

use crate::api::InvalidValue;
use crate::model::ValueKind;
use crate::schema::SchemaError;
use crate::tokens::Token;

mod convert;
mod engine;
mod interface;
mod printer;

pub(crate) use self::convert::*;
pub(crate) use self::engine::*;
pub use self::interface::*;
pub(crate) use self::printer::*;


/// Error for a command line that does not fit the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token matches no binding and no positional slot is available.
    #[error("An unknown argument was encountered: '{0}'.")]
    UnknownArgument(String),
    /// A value could not be converted to its field's kind.
    #[error("The argument '{argument}' does not match the expected type '{expected}'.")]
    InvalidArgumentType {
        #[allow(missing_docs)]
        argument: String,
        #[allow(missing_docs)]
        expected: ValueKind,
    },
    /// A required binding (listed by its display names) was absent.
    #[error("A required argument '{0}' is missing.")]
    MissingRequiredArgument(String),
    /// In strict order mode, a binding appeared before its turn.
    #[error("Incorrect argument order. Expected arguments: {expected}, but received '{received}'.")]
    IncorrectArgumentOrder {
        #[allow(missing_docs)]
        expected: String,
        #[allow(missing_docs)]
        received: String,
    },
    /// A non-boolean binding was given without a value.
    #[error("No value was supplied for the argument '{0}'.")]
    MissingValue(String),
}

/// Umbrella error for the controller API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The struct declarations are invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The command line does not fit the schema.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A value could not be moved into its field.
    #[error(transparent)]
    Value(#[from] InvalidValue),
}

/// A [`ParseError`] together with the index of the token it was raised at.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParseFailure {
    pub(crate) offset: usize,
    pub(crate) error: ParseError,
}

impl ParseFailure {
    pub(crate) fn new(offset: usize, error: ParseError) -> Self {
        Self { offset, error }
    }
}

/// The command line around a failure, rendered with a caret under the offending token.
///
/// ```text
/// -n = John --unknown
///           ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<Token>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[Token]) -> Self {
        Self {
            offset,
            tokens: tokens.to_vec(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut projection = String::default();
        let mut caret = None;

        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                projection.push(' ');
            }

            if i == self.offset {
                caret.replace(projection.chars().count());
            }

            projection.push_str(&token.to_string());
        }

        // Failures past the last token (ex: a missing required argument) point at the end.
        let caret = caret.unwrap_or_else(|| projection.chars().count());
        write!(f, "{projection}\n{:caret$}^", "")
    }
}
