use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::api::InvalidValue;
use crate::model::{Value, ValueKind};
use crate::prelude::{FieldValue, Target};
use crate::schema::Binding;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Callback = dyn Fn(Option<Value>) -> Option<Value> + Send + Sync;

/// A callback attached to a field, run after the field is bound.
///
/// Executors on the same field form a chain and run in declaration order.
#[derive(Clone)]
pub struct Executor {
    kind: Option<ValueKind>,
    write_back: bool,
    callback: Arc<Callback>,
}

impl Executor {
    /// Run a callback which takes no input.
    /// This is the only executor style allowed on a command field.
    pub fn call<R, F>(function: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            kind: None,
            write_back: false,
            callback: Arc::new(move |_| {
                function();
                None
            }),
        }
    }

    /// Run a callback on the bound value, ignoring any result.
    pub fn inspect<T, F>(function: F) -> Self
    where
        T: FieldValue,
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            kind: Some(T::KIND),
            write_back: false,
            callback: Arc::new(move |value| {
                if let Some(input) = value.and_then(|v| T::from_value(v).ok()) {
                    function(input);
                }
                None
            }),
        }
    }

    /// Run a callback on the bound value, recording its result.
    pub fn map<T, R, F>(function: F) -> Self
    where
        T: FieldValue,
        R: FieldValue,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            kind: Some(T::KIND),
            write_back: false,
            callback: Arc::new(move |value| {
                value
                    .and_then(|v| T::from_value(v).ok())
                    .and_then(|input| function(input).to_value())
            }),
        }
    }

    /// Run a callback on the bound value, and assign its result back into the field.
    pub fn transform<T, F>(function: F) -> Self
    where
        T: FieldValue,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            kind: Some(T::KIND),
            write_back: true,
            callback: Arc::new(move |value| {
                value
                    .and_then(|v| T::from_value(v).ok())
                    .and_then(|input| function(input).to_value())
            }),
        }
    }

    /// The kind of input this executor expects, or `None` for a [`Executor::call`].
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    /// Whether the result is assigned back into the field.
    pub fn writes_back(&self) -> bool {
        self.write_back
    }

    fn invoke(&self, value: Option<Value>) -> Option<Value> {
        (self.callback)(value)
    }
}

impl Debug for Executor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("kind", &self.kind)
            .field("write_back", &self.write_back)
            .finish_non_exhaustive()
    }
}

/// The record of one executor invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// The display names of the field the executor is attached to (ex: `-n, --name`).
    pub binding: String,
    /// The executor's result, if it produced one.
    pub result: Option<Value>,
}

/// Run the executor chain of `binding` against its field in `target`.
///
/// Each executor observes the field as left by the previous one, so a [`Executor::transform`] feeds the rest of the chain.
/// Value executors are skipped while the field is unset.
pub(crate) fn run_chain(
    binding: &Binding,
    target: &mut dyn Target,
) -> Result<Vec<Execution>, InvalidValue> {
    let mut executions = Vec::default();

    for executor in binding.executors() {
        let input = match executor.kind() {
            Some(_) => match target.value(binding.slot()) {
                Some(value) => Some(value),
                None => continue,
            },
            None => None,
        };
        let result = executor.invoke(input);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Executed {executor:?} on '{}', resulting in {result:?}.",
                binding.display_names()
            );
        }

        if executor.writes_back() {
            if let Some(value) = &result {
                target.assign(binding.slot(), value.clone())?;
            }
        }

        executions.push(Execution {
            binding: binding.display_names(),
            result,
        });
    }

    Ok(executions)
}
