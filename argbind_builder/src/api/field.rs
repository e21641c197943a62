use crate::api::Executor;
use crate::model::ValueKind;

/// The declaration of one bindable field.
///
/// A struct implementing [`Arguments`](crate::prelude::Arguments) lists these in slot order.
///
/// ```
/// use argbind_builder::{FieldSpec, ValueKind};
///
/// let name = FieldSpec::new("name", ValueKind::Str)
///     .short("-n")
///     .long("--name")
///     .description("The name to greet.")
///     .required(true);
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) field: String,
    pub(crate) short: Option<String>,
    pub(crate) long: Option<String>,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) invert_boolean: bool,
    pub(crate) kind: ValueKind,
    pub(crate) executors: Vec<Executor>,
    pub(crate) children: Vec<FieldSpec>,
}

impl FieldSpec {
    /// Declare a value field.
    pub fn new(field: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            field: field.into(),
            short: None,
            long: None,
            description: String::default(),
            required: false,
            invert_boolean: false,
            kind,
            executors: Vec::default(),
            children: Vec::default(),
        }
    }

    /// Declare a command field, whose nested struct declares `children`.
    pub fn command(field: impl Into<String>, children: Vec<FieldSpec>) -> Self {
        Self {
            children,
            ..Self::new(field, ValueKind::Command)
        }
    }

    /// Set the short name (ex: `-n`).
    pub fn short(mut self, name: impl Into<String>) -> Self {
        self.short.replace(name.into());
        self
    }

    /// Set the long name (ex: `--name`).
    /// Without either a short or long name, the long name defaults to `--` plus the lowercased field name.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long.replace(name.into());
        self
    }

    /// Set the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require this field to be present on the command line.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Invert the meaning of a boolean field: present means `false`, absent means `true`.
    pub fn invert_boolean(mut self, invert: bool) -> Self {
        self.invert_boolean = invert;
        self
    }

    /// Append an executor to this field's chain.
    pub fn executor(mut self, executor: Executor) -> Self {
        self.executors.push(executor);
        self
    }
}
