use std::marker::PhantomData;

use crate::api::{run_chain, Execution, InvalidValue};
use crate::constant::DEFAULT_TOTAL_WIDTH;
use crate::parser::{
    terminal_width, ConsoleInterface, Engine, Error, ErrorContext, Flow, ParseFailure, Printer,
    UserInterface,
};
use crate::prelude::{Arguments, Target};
use crate::schema::{BindingId, Schema, SchemaError};
use crate::tokens::{tokenize, tokenize_args, Token};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The result of a successful parse.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Every token was bound and every requirement met.
    Parsed(T),
    /// Help was requested; parsing stopped early.
    Help {
        /// The usage text of the level help was requested at.
        usage: String,
        /// The fields bound before the help token.
        partial: T,
    },
}

impl<T> Outcome<T> {
    /// Whether help was requested instead of a complete parse.
    pub fn help_displayed(&self) -> bool {
        matches!(self, Outcome::Help { .. })
    }

    /// The usage text, if help was requested.
    pub fn usage(&self) -> Option<&str> {
        match self {
            Outcome::Parsed(_) => None,
            Outcome::Help { usage, .. } => Some(usage.as_str()),
        }
    }

    /// The bound struct, complete or partial.
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Parsed(target) => target,
            Outcome::Help { partial, .. } => partial,
        }
    }

    /// The bound struct, only if the parse was complete.
    pub fn parsed(self) -> Option<T> {
        match self {
            Outcome::Parsed(target) => Some(target),
            Outcome::Help { .. } => None,
        }
    }
}

/// Binds command lines onto the struct `T`.
///
/// ```ignore
/// use argbind::*;
///
/// #[derive(Default, Arguments)]
/// #[arguments(name = "greeter")]
/// struct Greeter {
///     #[argument(short = "-n", long = "--name", required)]
///     name: Option<String>,
/// }
///
/// let controller: Controller<Greeter> = Controller::new().unwrap();
/// let greeter = controller.parse(&["-n", "John"]).unwrap().into_inner();
/// assert_eq!(greeter.name, Some("John".to_string()));
/// ```
pub struct Controller<T: Arguments> {
    schema: &'static Schema,
    user_interface: Box<dyn UserInterface>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Arguments> Controller<T> {
    /// Create a controller reporting to the console.
    ///
    /// Fails when `T`'s declarations are invalid (ex: [`SchemaError::MissingController`]).
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Create a controller reporting to a custom interface (see [`Controller::parse_or_report`]).
    pub fn with_interface(user_interface: Box<dyn UserInterface>) -> Result<Self, SchemaError> {
        let schema = T::schema()?;
        Ok(Self {
            schema,
            user_interface,
            _phantom: PhantomData,
        })
    }

    /// The extracted schema of `T`.
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Parse an argument vector, typically `std::env::args().skip(1).collect::<Vec<_>>()`.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<Outcome<T>, Error> {
        let tokens = tokenize_args(args, self.schema.separator());
        self.parse_tokens(&tokens)
    }

    /// Parse a single, unsplit command line.
    pub fn parse_line(&self, line: &str) -> Result<Outcome<T>, Error> {
        let tokens = tokenize(line, self.schema.separator());
        self.parse_tokens(&tokens)
    }

    /// Parse pre-built tokens.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<Outcome<T>, Error> {
        self.run(tokens, DEFAULT_TOTAL_WIDTH)
            .map_err(|failure| Error::Parse(failure.error))
    }

    /// Parse an argument vector, reporting any help text or error through the user interface.
    ///
    /// Returns `None` when the command line is invalid (the error has already been reported).
    pub fn parse_or_report<S: AsRef<str>>(&self, args: &[S]) -> Option<Outcome<T>> {
        let tokens = tokenize_args(args, self.schema.separator());
        self.report(&tokens)
    }

    /// Parse a single, unsplit command line, reporting as [`Controller::parse_or_report`] does.
    pub fn parse_line_or_report(&self, line: &str) -> Option<Outcome<T>> {
        let tokens = tokenize(line, self.schema.separator());
        self.report(&tokens)
    }

    fn report(&self, tokens: &[Token]) -> Option<Outcome<T>> {
        match self.run(tokens, terminal_width()) {
            Ok(outcome) => {
                if let Outcome::Help { usage, .. } = &outcome {
                    self.user_interface.print(usage.clone());
                }

                Some(outcome)
            }
            Err(ParseFailure { offset, error }) => {
                self.user_interface.print_error(Error::Parse(error));
                self.user_interface
                    .print_error_context(ErrorContext::new(offset, tokens));
                None
            }
        }
    }

    /// The usage text of the whole program.
    pub fn usage(&self) -> String {
        Printer::new(self.schema, DEFAULT_TOTAL_WIDTH).render(None)
    }

    /// Run the executors of every bound field of `target`, recursing into entered commands.
    ///
    /// Returns one [`Execution`] per executor invocation, in declaration order.
    pub fn execute(&self, target: &mut T) -> Result<Vec<Execution>, Error> {
        let mut executions = Vec::default();
        execute_level(self.schema, None, target, &mut executions)?;
        Ok(executions)
    }

    fn run(&self, tokens: &[Token], total_width: usize) -> Result<Outcome<T>, ParseFailure> {
        let mut target = T::default();
        let flow = Engine::new(self.schema, tokens).parse(&mut target)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parse finished with {flow:?}.");
        }

        match flow {
            Flow::Complete => Ok(Outcome::Parsed(target)),
            Flow::Help(owner) => Ok(Outcome::Help {
                usage: Printer::new(self.schema, total_width).render(owner),
                partial: target,
            }),
        }
    }
}

fn execute_level(
    schema: &Schema,
    owner: Option<BindingId>,
    target: &mut dyn Target,
    executions: &mut Vec<Execution>,
) -> Result<(), InvalidValue> {
    for id in schema.level(owner) {
        let binding = schema.binding(*id);

        if binding.is_command() {
            let entered = match target.nested(binding.slot()) {
                Some(nested) => {
                    execute_level(schema, Some(*id), nested, executions)?;
                    true
                }
                None => false,
            };

            if entered {
                executions.extend(run_chain(binding, target)?);
            }
        } else if target.value(binding.slot()).is_some() {
            executions.extend(run_chain(binding, target)?);
        }
    }

    Ok(())
}
