use std::collections::HashSet;
use thiserror::Error;

use crate::api::{Executor, FieldSpec};
use crate::constant::{HELP_LONG, HELP_SHORT, LONG_PREFIX};
use crate::model::{Separator, ValueKind};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for an invalid declaration, detected at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The struct carries no controller configuration.
    #[error("The target class '{0}' must be decorated with the arguments attribute.")]
    MissingController(String),
    /// The separator was configured as the null character.
    #[error("The separator cannot be the null character.")]
    NullSeparator,
    /// The separator was configured as a character the tokenizer reserves.
    #[error("The separator cannot be '{0}'.")]
    InvalidSeparator(char),
    /// Two fields of the same level share a name.
    #[error("The argument name '{name}' is declared more than once in '{level}'.")]
    DuplicateName {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        level: String,
    },
    /// An executor's input does not fit the field it is attached to.
    #[error("The executor on '{field}' expects a {found} input, but the field is a {expected}.")]
    ExecutorMismatch {
        #[allow(missing_docs)]
        field: String,
        #[allow(missing_docs)]
        expected: ValueKind,
        #[allow(missing_docs)]
        found: ValueKind,
    },
}

/// Program level configuration, required on the root struct.
///
/// ```
/// use argbind_builder::{ControllerConfig, Separator};
///
/// let config = ControllerConfig::default()
///     .name("app")
///     .respect_order(true)
///     .separator(Separator::new(':').unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub(crate) name: Option<String>,
    pub(crate) auto_help: bool,
    pub(crate) respect_order: bool,
    pub(crate) separator: Separator,
    pub(crate) execute_when_parsing: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            name: None,
            auto_help: true,
            respect_order: false,
            separator: Separator::default(),
            execute_when_parsing: false,
        }
    }
}

impl ControllerConfig {
    /// The program name shown in usage (defaults to the struct name).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name.replace(name.into());
        self
    }

    /// Recognize `-h`/`--help` (on by default).
    pub fn auto_help(mut self, auto_help: bool) -> Self {
        self.auto_help = auto_help;
        self
    }

    /// Require arguments to appear in declaration order (off by default).
    pub fn respect_order(mut self, respect_order: bool) -> Self {
        self.respect_order = respect_order;
        self
    }

    /// The key/value separator (`=` by default).
    pub fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Run executors as each field is bound, rather than only via an explicit execute (off by default).
    pub fn execute_when_parsing(mut self, execute_when_parsing: bool) -> Self {
        self.execute_when_parsing = execute_when_parsing;
        self
    }
}

/// Index of a [`Binding`] within its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

/// One bound field, as extracted from its [`FieldSpec`].
#[derive(Debug)]
pub struct Binding {
    field: String,
    slot: usize,
    short: Option<String>,
    long: Option<String>,
    description: String,
    required: bool,
    invert_boolean: bool,
    kind: ValueKind,
    executors: Vec<Executor>,
    parent: Option<BindingId>,
    children: Vec<BindingId>,
}

impl Binding {
    /// The struct field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The slot of the field within its struct.
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[allow(missing_docs)]
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    #[allow(missing_docs)]
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    #[allow(missing_docs)]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[allow(missing_docs)]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[allow(missing_docs)]
    pub fn invert_boolean(&self) -> bool {
        self.invert_boolean
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether this binding owns a nested level of bindings.
    pub fn is_command(&self) -> bool {
        self.kind == ValueKind::Command
    }

    #[allow(missing_docs)]
    pub fn executors(&self) -> &[Executor] {
        &self.executors
    }

    /// The command binding this binding is nested under.
    pub fn parent(&self) -> Option<BindingId> {
        self.parent
    }

    /// The bindings nested under this command (empty for a value binding).
    pub fn children(&self) -> &[BindingId] {
        &self.children
    }

    /// Whether `token` names this binding.
    ///
    /// Anything from the first `separator` onward is ignored, so both `-n` and `-n=John` match a binding named `-n`.
    pub fn matches(&self, token: &str, separator: Separator) -> bool {
        let key = match token.split_once(separator.value()) {
            Some((key, _)) => key,
            None => token,
        };

        !key.is_empty()
            && (self.short.as_deref() == Some(key) || self.long.as_deref() == Some(key))
    }

    /// The names as listed in usage and errors (ex: `-n, --name`).
    pub fn display_names(&self) -> String {
        match (&self.short, &self.long) {
            (Some(short), Some(long)) => format!("{short}, {long}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.field.clone(),
        }
    }

    /// The name used to address this binding in a usage header, preferring the long name.
    pub fn primary_name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or(&self.field)
    }
}

/// The validated binding tree of a struct.
///
/// Bindings live in an arena indexed by [`BindingId`]; parent and child links are ids rather than references.
#[derive(Debug)]
pub struct Schema {
    type_name: String,
    config: ControllerConfig,
    bindings: Vec<Binding>,
    roots: Vec<BindingId>,
}

impl Schema {
    /// Validate the `fields` of the struct `type_name` and build its binding tree.
    ///
    /// ```
    /// use argbind_builder::{ControllerConfig, FieldSpec, Schema, SchemaError, ValueKind};
    ///
    /// let fields = vec![FieldSpec::new("verbose", ValueKind::Bool).short("-v")];
    /// let schema = Schema::extract("App", Some(ControllerConfig::default()), fields.clone()).unwrap();
    /// assert_eq!(schema.roots().len(), 1);
    ///
    /// assert_eq!(
    ///     Schema::extract("App", None, fields).unwrap_err(),
    ///     SchemaError::MissingController("App".to_string())
    /// );
    /// ```
    pub fn extract(
        type_name: impl Into<String>,
        config: Option<ControllerConfig>,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let type_name = type_name.into();
        let config = match config {
            Some(config) => config,
            None => return Err(SchemaError::MissingController(type_name)),
        };
        let mut bindings = Vec::default();
        let roots = extract_level(
            &mut bindings,
            fields,
            None,
            config.name.as_deref().unwrap_or(&type_name),
            config.auto_help,
        )?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Extracted '{type_name}' with {} bindings ({} at the root).",
                bindings.len(),
                roots.len()
            );
        }

        Ok(Self {
            type_name,
            config,
            bindings,
            roots,
        })
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The program name shown in usage.
    pub fn program(&self) -> &str {
        self.config.name.as_deref().unwrap_or(&self.type_name)
    }

    #[allow(missing_docs)]
    pub fn separator(&self) -> Separator {
        self.config.separator
    }

    /// The top level bindings, in declaration order.
    pub fn roots(&self) -> &[BindingId] {
        &self.roots
    }

    /// The bindings of the level owned by `owner` (`None` for the root level).
    pub fn level(&self, owner: Option<BindingId>) -> &[BindingId] {
        match owner {
            Some(id) => self.binding(id).children(),
            None => self.roots(),
        }
    }

    /// Look up a binding of this schema.
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0]
    }

    /// Every binding, in depth-first declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Whether `token` names any binding at any level.
    pub fn matches_any(&self, token: &str) -> bool {
        let separator = self.separator();
        self.bindings
            .iter()
            .any(|binding| binding.matches(token, separator))
    }

    /// The command path of `owner` from the program down (ex: `app start`).
    pub fn qualified_name(&self, owner: Option<BindingId>) -> String {
        let mut names = Vec::default();
        let mut current = owner;

        while let Some(id) = current {
            let binding = self.binding(id);
            names.push(binding.primary_name());
            current = binding.parent();
        }

        names.push(self.program());
        names.reverse();
        names.join(" ")
    }
}

fn extract_level(
    bindings: &mut Vec<Binding>,
    fields: Vec<FieldSpec>,
    parent: Option<BindingId>,
    level: &str,
    auto_help: bool,
) -> Result<Vec<BindingId>, SchemaError> {
    let mut seen: HashSet<String> = HashSet::default();

    if auto_help {
        seen.insert(HELP_SHORT.to_string());
        seen.insert(HELP_LONG.to_string());
    }

    let mut ids = Vec::with_capacity(fields.len());

    for (slot, spec) in fields.into_iter().enumerate() {
        let FieldSpec {
            field,
            short,
            long,
            description,
            required,
            invert_boolean,
            kind,
            executors,
            children,
        } = spec;
        let long = match (&short, long) {
            (None, None) => Some(format!("{LONG_PREFIX}{}", field.to_lowercase())),
            (_, long) => long,
        };

        for name in short.iter().chain(long.iter()) {
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateName {
                    name: name.clone(),
                    level: level.to_string(),
                });
            }
        }

        for executor in &executors {
            if let Some(found) = executor.kind() {
                if found != kind {
                    return Err(SchemaError::ExecutorMismatch {
                        field,
                        expected: kind,
                        found,
                    });
                }
            }
        }

        let id = BindingId(bindings.len());
        bindings.push(Binding {
            field,
            slot,
            short,
            long,
            description,
            required,
            invert_boolean,
            kind,
            executors,
            parent,
            children: Vec::default(),
        });

        if kind == ValueKind::Command {
            let nested = format!("{level} {}", bindings[id.0].primary_name());
            let child_ids = extract_level(bindings, children, Some(id), &nested, auto_help)?;
            bindings[id.0].children = child_ids;
        }

        ids.push(id);
    }

    Ok(ids)
}


#[cfg(test)]
mod tests {
    use super::util::*;
    use super::*;
    use rstest::rstest;

    #[test]
    fn extract() {
        // Setup
        let config = ControllerConfig::default().name("app");

        // Execute
        let schema = Schema::extract("Sample", Some(config), sample_fields()).unwrap();

        // Verify
        assert_eq!(schema.program(), "app");
        assert_eq!(schema.roots().len(), 3);
        assert_eq!(schema.bindings().count(), 5);

        let name = schema.binding(schema.roots()[0]);
        assert_eq!(name.field(), "name");
        assert_eq!(name.slot(), 0);
        assert_eq!(name.display_names(), "-n, --name");
        assert!(name.is_required());
        assert_eq!(name.parent(), None);

        let start = schema.binding(schema.roots()[2]);
        assert!(start.is_command());
        assert_eq!(start.slot(), 2);
        assert_eq!(start.children().len(), 2);

        let port = schema.binding(start.children()[1]);
        assert_eq!(port.slot(), 1);
        assert_eq!(port.kind(), ValueKind::I32);
        assert_eq!(port.parent(), Some(schema.roots()[2]));
        assert_eq!(schema.level(Some(schema.roots()[2])), start.children());
    }

    #[test]
    fn extract_idempotent() {
        // Execute
        let first = sample_schema(ControllerConfig::default());
        let second = sample_schema(ControllerConfig::default());

        // Verify
        let left: Vec<String> = first.bindings().map(|b| b.display_names()).collect();
        let right: Vec<String> = second.bindings().map(|b| b.display_names()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn extract_missing_controller() {
        assert_eq!(
            Schema::extract("Sample", None, sample_fields()).unwrap_err(),
            SchemaError::MissingController("Sample".to_string())
        );
    }

    #[rstest]
    #[case("Verbose", "--verbose")]
    #[case("dry_run", "--dry_run")]
    fn extract_default_long(#[case] field: &str, #[case] expected: &str) {
        // Setup
        let fields = vec![FieldSpec::new(field, ValueKind::Bool)];

        // Execute
        let schema = Schema::extract("Sample", Some(ControllerConfig::default()), fields).unwrap();

        // Verify
        let binding = schema.binding(schema.roots()[0]);
        assert_eq!(binding.long(), Some(expected));
        assert_eq!(binding.short(), None);
    }

    #[rstest]
    #[case(vec![
        FieldSpec::new("a", ValueKind::Str).short("-x"),
        FieldSpec::new("b", ValueKind::Str).short("-x"),
    ], "-x", "Sample")]
    #[case(vec![
        FieldSpec::new("a", ValueKind::Str).long("--same"),
        FieldSpec::new("same", ValueKind::Str),
    ], "--same", "Sample")]
    #[case(vec![
        FieldSpec::new("a", ValueKind::Str).short("-h"),
    ], "-h", "Sample")]
    #[case(vec![
        FieldSpec::command("run", vec![
            FieldSpec::new("a", ValueKind::Str).short("-a"),
            FieldSpec::new("b", ValueKind::Str).short("-a"),
        ]),
    ], "-a", "Sample --run")]
    fn extract_duplicate(
        #[case] fields: Vec<FieldSpec>,
        #[case] name: &str,
        #[case] level: &str,
    ) {
        assert_eq!(
            Schema::extract("Sample", Some(ControllerConfig::default()), fields).unwrap_err(),
            SchemaError::DuplicateName {
                name: name.to_string(),
                level: level.to_string(),
            }
        );
    }

    #[test]
    fn extract_duplicate_across_levels() {
        // Setup
        let fields = vec![
            FieldSpec::new("a", ValueKind::Str).short("-a"),
            FieldSpec::command("run", vec![FieldSpec::new("a", ValueKind::Str).short("-a")]),
        ];

        // Execute
        let result = Schema::extract("Sample", Some(ControllerConfig::default()), fields);

        // Verify
        assert!(result.is_ok());
    }

    #[test]
    fn extract_help_name_without_auto_help() {
        // Setup
        let fields = vec![FieldSpec::new("height", ValueKind::I32).short("-h")];
        let config = ControllerConfig::default().auto_help(false);

        // Execute
        let result = Schema::extract("Sample", Some(config), fields);

        // Verify
        assert!(result.is_ok());
    }

    #[rstest]
    #[case(FieldSpec::new("a", ValueKind::Str).executor(Executor::inspect(|_: i32| {})), ValueKind::Str, ValueKind::I32)]
    #[case(FieldSpec::command("a", vec![]).executor(Executor::inspect(|_: bool| {})), ValueKind::Command, ValueKind::Bool)]
    fn extract_executor_mismatch(
        #[case] field: FieldSpec,
        #[case] expected: ValueKind,
        #[case] found: ValueKind,
    ) {
        assert_eq!(
            Schema::extract("Sample", Some(ControllerConfig::default()), vec![field]).unwrap_err(),
            SchemaError::ExecutorMismatch {
                field: "a".to_string(),
                expected,
                found,
            }
        );
    }

    #[test]
    fn extract_executor_call_on_command() {
        // Setup
        let field = FieldSpec::command("a", vec![]).executor(Executor::call(|| {}));

        // Execute
        let result = Schema::extract("Sample", Some(ControllerConfig::default()), vec![field]);

        // Verify
        assert!(result.is_ok());
    }

    #[rstest]
    #[case("-n", true)]
    #[case("--name", true)]
    #[case("-n=John", true)]
    #[case("--name=", true)]
    #[case("-name", false)]
    #[case("=John", false)]
    #[case("", false)]
    #[case("John", false)]
    fn binding_matches(#[case] token: &str, #[case] expected: bool) {
        // Setup
        let schema = sample_schema(ControllerConfig::default());
        let binding = schema.binding(schema.roots()[0]);

        // Execute
        let result = binding.matches(token, Separator::default());

        // Verify
        assert_eq!(result, expected);
    }

    #[test]
    fn binding_matches_custom_separator() {
        // Setup
        let schema = sample_schema(ControllerConfig::default());
        let binding = schema.binding(schema.roots()[0]);
        let separator = Separator::new(':').unwrap();

        // Execute & Verify
        assert!(binding.matches("-n:John", separator));
        assert!(!binding.matches("-n=John", separator));
    }

    #[test]
    fn qualified_name() {
        // Setup
        let schema = sample_schema(ControllerConfig::default().name("app"));
        let start = schema.roots()[2];

        // Execute & Verify
        assert_eq!(schema.qualified_name(None), "app");
        assert_eq!(schema.qualified_name(Some(start)), "app start");
    }

    #[test]
    fn matches_any() {
        let schema = sample_schema(ControllerConfig::default());
        assert!(schema.matches_any("-u"));
        assert!(schema.matches_any("start"));
        assert!(!schema.matches_any("-z"));
    }
}
