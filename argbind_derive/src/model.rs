use proc_macro2::TokenStream as TokenStream2;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub(crate) struct DeriveValue {
    pub(crate) tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The raw contents of one `#[arguments(..)]` or `#[argument(..)]` attribute.
/// Pairs keep their declaration order (executor chains depend on it).
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct IntermediateAttributes {
    pub(crate) singletons: HashSet<String>,
    pub(crate) pairs: Vec<(String, DeriveValue)>,
}

impl IntermediateAttributes {
    pub(crate) fn first(&self, key: &str) -> Option<&DeriveValue> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutorStyle {
    Execute,
    Inspect,
    Map,
    Transform,
}

impl ExecutorStyle {
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        match key {
            "execute" => Some(ExecutorStyle::Execute),
            "inspect" => Some(ExecutorStyle::Inspect),
            "map" => Some(ExecutorStyle::Map),
            "transform" => Some(ExecutorStyle::Transform),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveExecutor {
    pub(crate) style: ExecutorStyle,
    pub(crate) function: DeriveValue,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveParameter {
    pub(crate) field_name: syn::Ident,
    pub(crate) field_type: DeriveValue,
    pub(crate) short: Option<DeriveValue>,
    pub(crate) long: Option<DeriveValue>,
    pub(crate) description: Option<DeriveValue>,
    pub(crate) required: bool,
    pub(crate) invert_boolean: bool,
    /// The nested struct type, for a command field.
    pub(crate) command: Option<DeriveValue>,
    pub(crate) executors: Vec<DeriveExecutor>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DeriveController {
    pub(crate) name: Option<DeriveValue>,
    pub(crate) auto_help: Option<DeriveValue>,
    pub(crate) respect_order: Option<DeriveValue>,
    pub(crate) separator: Option<DeriveValue>,
    pub(crate) execute_when_parsing: Option<DeriveValue>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveArguments {
    pub(crate) struct_name: syn::Ident,
    pub(crate) controller: Option<DeriveController>,
    pub(crate) parameters: Vec<DeriveParameter>,
}
