use crate::constant::DEFAULT_SEPARATOR;
use crate::schema::SchemaError;
use std::fmt::{Display, Formatter};

/// The semantic type of a bound field.
///
/// The converter uses this to decide how a raw token becomes a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text, assigned verbatim.
    Str,
    /// A boolean, read from the `true/1/yes/y` and `false/0/no/n` vocabulary.
    Bool,
    /// A 16-bit signed integer.
    I16,
    /// A 32-bit signed integer.
    I32,
    /// A 64-bit signed integer.
    I64,
    /// A 32-bit float.
    F32,
    /// A 64-bit float.
    F64,
    /// Any `FromStr` type (ex: an enum), carried as text and parsed at assignment.
    Choice,
    /// A nested group of fields (a sub-command).
    Command,
}

impl ValueKind {
    /// Whether a field of this kind holds a value (every kind except [`ValueKind::Command`]).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, ValueKind::Command)
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Str => "string",
            ValueKind::Bool => "bool",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Choice => "choice",
            ValueKind::Command => "command",
        };
        write!(f, "{name}")
    }
}

/// A converted field value, ready to be assigned into a target.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text (also used to carry [`ValueKind::Choice`] values).
    Str(String),
    #[allow(missing_docs)]
    Bool(bool),
    #[allow(missing_docs)]
    I16(i16),
    #[allow(missing_docs)]
    I32(i32),
    #[allow(missing_docs)]
    I64(i64),
    #[allow(missing_docs)]
    F32(f32),
    #[allow(missing_docs)]
    F64(f64),
}

impl Value {
    /// The kind this value was converted as.
    /// Choice values report [`ValueKind::Str`].
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Bool(_) => ValueKind::Bool,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::I16(value) => write!(f, "{value}"),
            Value::I32(value) => write!(f, "{value}"),
            Value::I64(value) => write!(f, "{value}"),
            Value::F32(value) => write!(f, "{value}"),
            Value::F64(value) => write!(f, "{value}"),
        }
    }
}

/// The character splitting a key from its value (ex: `=` in `--name=value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator(char);

impl Separator {
    /// Create a separator.
    ///
    /// The null character, whitespace and the quote character `"` are rejected, since the tokenizer gives those their own meaning.
    ///
    /// ```
    /// use argbind_builder::{SchemaError, Separator};
    ///
    /// assert_eq!(Separator::new(':').unwrap().value(), ':');
    /// assert_eq!(Separator::new('\0'), Err(SchemaError::NullSeparator));
    /// ```
    pub fn new(separator: char) -> Result<Self, SchemaError> {
        if separator == '\0' {
            Err(SchemaError::NullSeparator)
        } else if separator.is_whitespace() || separator == '"' {
            Err(SchemaError::InvalidSeparator(separator))
        } else {
            Ok(Separator(separator))
        }
    }

    /// The separator character.
    pub fn value(&self) -> char {
        self.0
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator(DEFAULT_SEPARATOR)
    }
}

impl Display for Separator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
