//! Traits which, typically, may be imported without concern: `use argbind::prelude::*`.
use crate::api::{FieldSpec, InvalidValue};
use crate::model::{Value, ValueKind};
use crate::schema::{Schema, SchemaError};

/// Behaviour to move a field between its Rust type and a converted [`Value`].
// Needs to be imported in order to bind a custom type (see `choice_value!` for `FromStr` enums).
pub trait FieldValue: Sized {
    /// The kind the converter produces for this type.
    const KIND: ValueKind;

    /// Take ownership of a converted value.
    fn from_value(value: Value) -> Result<Self, InvalidValue>;

    /// The current value, or `None` when unset.
    fn to_value(&self) -> Option<Value>;
}

/// Slot-addressed access to the fields of a bindable struct.
///
/// Slots are the positions of the bound fields within their struct, matching the order of [`Arguments::fields`].
/// This trait is object safe so that the engine may walk nested structs without knowing their types.
pub trait Target {
    /// Assign a converted value into the field at `slot`.
    fn assign(&mut self, slot: usize, value: Value) -> Result<(), InvalidValue>;

    /// Read the current value of the field at `slot`.
    fn value(&self, slot: usize) -> Option<Value>;

    /// Create (default) the nested struct at `slot` and return it.
    fn enter(&mut self, slot: usize) -> Option<&mut dyn Target>;

    /// Return the nested struct at `slot`, only if it was created.
    fn nested(&mut self, slot: usize) -> Option<&mut dyn Target>;
}

/// A bindable struct: its field declarations plus a cached, validated schema.
///
/// Typically implemented via `#[derive(Arguments)]`.
pub trait Arguments: Target + Default {
    /// The declared fields of this struct, in slot order.
    fn fields() -> Vec<FieldSpec>;

    /// The extracted schema for this struct.
    ///
    /// Implementations cache the extraction, so repeated calls observe the same schema.
    fn schema() -> Result<&'static Schema, SchemaError>;
}
