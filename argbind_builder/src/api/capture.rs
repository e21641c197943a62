use thiserror::Error;

use crate::model::{Value, ValueKind};
use crate::prelude::FieldValue;

/// Failure to move a [`Value`] into a field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidValue {
    /// The value text could not be parsed into the field type (ex: an unknown enum variant).
    #[error("cannot convert '{value}' to {type_name}.")]
    InvalidConversion {
        #[allow(missing_docs)]
        value: String,
        #[allow(missing_docs)]
        type_name: &'static str,
    },
    /// The value kind does not fit the field type.
    #[error("cannot assign a {kind} value to {type_name}.")]
    Mismatch {
        #[allow(missing_docs)]
        kind: ValueKind,
        #[allow(missing_docs)]
        type_name: &'static str,
    },
    /// The target has no value field at this slot.
    #[error("no bindable field at slot {0}.")]
    UnknownSlot(usize),
}

macro_rules! impl_field_value {
    ($type:ty, $kind:ident) => {
        impl FieldValue for $type {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_value(value: Value) -> Result<Self, InvalidValue> {
                match value {
                    Value::$kind(inner) => Ok(inner),
                    other => Err(InvalidValue::Mismatch {
                        kind: other.kind(),
                        type_name: std::any::type_name::<$type>(),
                    }),
                }
            }

            fn to_value(&self) -> Option<Value> {
                Some(Value::$kind(self.clone()))
            }
        }
    };
}

impl_field_value!(String, Str);
impl_field_value!(bool, Bool);
impl_field_value!(i16, I16);
impl_field_value!(i32, I32);
impl_field_value!(i64, I64);
impl_field_value!(f32, F32);
impl_field_value!(f64, F64);

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn from_value(value: Value) -> Result<Self, InvalidValue> {
        T::from_value(value).map(Some)
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }
}

/// Bind a `FromStr + Display` type (typically an enum) as a [`ValueKind::Choice`] field.
///
/// ```
/// use argbind_builder::{choice_value, prelude::*, Value};
/// use std::fmt::{Display, Formatter};
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Fast,
///     Slow,
/// }
///
/// impl FromStr for Mode {
///     type Err = String;
///
///     fn from_str(value: &str) -> Result<Self, Self::Err> {
///         match value.to_lowercase().as_str() {
///             "fast" => Ok(Mode::Fast),
///             "slow" => Ok(Mode::Slow),
///             _ => Err(format!("unknown mode: {value}")),
///         }
///     }
/// }
///
/// impl Display for Mode {
///     fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
///         match self {
///             Mode::Fast => write!(f, "fast"),
///             Mode::Slow => write!(f, "slow"),
///         }
///     }
/// }
///
/// choice_value!(Mode);
///
/// assert_eq!(Mode::from_value(Value::Str("Fast".to_string())), Ok(Mode::Fast));
/// assert!(Mode::from_value(Value::Str("medium".to_string())).is_err());
/// ```
#[macro_export]
macro_rules! choice_value {
    ($type:ty) => {
        impl $crate::prelude::FieldValue for $type {
            const KIND: $crate::ValueKind = $crate::ValueKind::Choice;

            fn from_value(value: $crate::Value) -> ::std::result::Result<Self, $crate::InvalidValue> {
                match value {
                    $crate::Value::Str(text) => {
                        match <$type as ::std::str::FromStr>::from_str(&text) {
                            ::std::result::Result::Ok(inner) => ::std::result::Result::Ok(inner),
                            ::std::result::Result::Err(_) => {
                                ::std::result::Result::Err($crate::InvalidValue::InvalidConversion {
                                    value: text,
                                    type_name: ::std::any::type_name::<$type>(),
                                })
                            }
                        }
                    }
                    other => ::std::result::Result::Err($crate::InvalidValue::Mismatch {
                        kind: other.kind(),
                        type_name: ::std::any::type_name::<$type>(),
                    }),
                }
            }

            fn to_value(&self) -> ::std::option::Option<$crate::Value> {
                ::std::option::Option::Some($crate::Value::Str(self.to_string()))
            }
        }
    };
}
