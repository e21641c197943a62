//! Derive Api for `argbind` configuration.
//!
//! ### Getting Started
//! Instrument a struct `S` with `#[derive(Default, Arguments)]` and the `#[arguments(..)]` attribute.
//! This implements [Target](../prelude/trait.Target.html) and [Arguments](../prelude/trait.Arguments.html) for `S`, which is all a [Controller](../struct.Controller.html) needs.
//!
//! ```no_run
#![doc = include_str!("../demos/greeter.rs")]
//! ```
//!
//! ### Struct Configuration
//! * `#[arguments]` marks `S` as a root (the defaults apply).
//! Without it, `Controller::<S>::new()` fails with [MissingController](../enum.SchemaError.html#variant.MissingController).
//! Nested command structs needn't carry it.
//! * `#[arguments(name = "..")]` sets the program name of the usage header.
//! * `#[arguments(auto_help = false)]` disables the `-h, --help` argument.
//! * `#[arguments(respect_order)]` requires the arguments in declaration order.
//! * `#[arguments(separator = ':')]` changes the name/value separator from `=`.
//! * `#[arguments(execute_when_parsing)]` runs the executors while parsing.
//!
//! ### Field Configuration
//! Only fields instrumented with `#[argument(..)]` are bound; all other fields keep their default.
//! ```ignore
//! #[derive(Default, Arguments)]
//! #[arguments(name = "app")]
//! struct Parameters {
//!     #[argument(short = "-n", long = "--name", description = "The name.", required)]
//!     name: Option<String>,
//!     // the above generates:
//!     //  FieldSpec::new("name", <Option<String> as FieldValue>::KIND)
//!     //      .short("-n").long("--name").description("The name.").required(true)
//!
//!     #[argument(invert_boolean)]
//!     colour: bool,
//!     // the above generates:
//!     //  FieldSpec::new("colour", <bool as FieldValue>::KIND).invert_boolean(true)
//!     // `--colour` is its long name; passing it sets `false`.
//!
//!     #[argument(inspect = show, transform = double)]
//!     count: i32,
//!     // the above generates:
//!     //  FieldSpec::new("count", <i32 as FieldValue>::KIND)
//!     //      .executor(Executor::inspect(show)).executor(Executor::transform(double))
//!
//!     #[argument(long = "start", command, execute = started)]
//!     start: Option<Start>,
//!     // the above generates:
//!     //  FieldSpec::command("start", <Start as Arguments>::fields())
//!     //      .long("start").executor(Executor::call(started))
//!     // assumes: `Start` is instrumented with `#[derive(Default, Arguments)]`
//!
//!     cache: Vec<u8>,
//!     // not bound
//! }
//! ```
//!
//! The derive rejects unknown keys, generic structs, `command` fields not typed `Option<..>`, and `command` fields combined with `invert_boolean` or a value executor.

pub use argbind_derive::*;
