//! `argbind` binds command lines onto plain Rust structs.
//!
//! Declare the command line as a struct: each bound field names its flags, whether it is required, and how to describe it.
//! `argbind` then tokenizes the command line, matches the tokens against those declarations, converts each value to the field's type, and assigns it.
//! A field whose type is itself a bindable struct becomes a *command*: its name on the command line enters the nested struct, whose own fields follow.
//!
//! `argbind` aims to keep the following properties:
//! * *Declarative*: the struct is the command line.
//! The user should not write any matching or `&str -> T` conversion code.
//! * *Typed errors*: every failure (unknown argument, missing required argument, invalid value, misplaced argument) is an [`Error`] value, never a panic.
//! * *Help wins*: `-h`/`--help` anywhere in the command line produces usage text, even when required arguments are missing.
//! * *Validated once*: the declarations of a struct are checked and cached the first time it is used, and shared by every subsequent parse.
//!
//! # Usage
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/greeter.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ greeter -h
//! usage: greeter [options]
//!
//! Required arguments:
//!  -n, --name      The name to greet.
//!
//! Optional arguments:
//!  -c, --count     How many times to greet.
//!  -q, --quiet     Only print the greeting.
//!  --mood          One of 'happy' or 'grumpy'.
//!  start           Start the greeting service.
//!      -u, --url   Where to listen.
//!      [-p]        The port to listen on.
//!  -h, --help      Show this help message and exit.
//!
//! $ greeter -n=John -c 2 -q
//! Hello, John!
//! Hello, John!
//!
//! $ greeter -c 2
//! A required argument '-n, --name' is missing.
//! -c 2
//!     ^
//!
//! $ greeter -n John -c 2.5
//! The argument '-c' does not match the expected type 'i16'.
//! -n John -c 2.5
//!         ^
//! ```
//!
//! # Builder Api
//! The derive Api is a front-end for the builder types in this crate.
//! A bindable struct implements [`Target`](./prelude/trait.Target.html) (slot addressed field access) and [`Arguments`](./prelude/trait.Arguments.html) (the field declarations plus a cached [`Schema`]).
//!
//! Each field is declared via a [`FieldSpec`]:
//! * [`FieldSpec::new`] declares a value field of some [`ValueKind`].
//! * [`FieldSpec::command`] declares a nested command from the child declarations.
//! * `short`, `long`, `description`, `required`, and `invert_boolean` configure the field.
//! When neither name is given, the long name defaults to `--` followed by the lowercased field name.
//! * `executor` attaches an [`Executor`] to the field.
//!
//! The program level configuration is a [`ControllerConfig`]; a struct without one fails with [`SchemaError::MissingController`].
//!
//! ### Values
//! Fields of type `String`, `bool`, `i16`, `i32`, `i64`, `f32`, and `f64` (each optionally wrapped in `Option`) bind out of the box.
//! Any type implementing both [`std::str::FromStr`] and [`std::fmt::Display`] binds via [`choice_value!`].
//!
//! Conversion rules:
//! * `bool` flags need no value; `-v` sets `true` (or `false` when `invert_boolean`).
//! An explicit value may be any of `true/false`, `1/0`, `yes/no`, `y/n` (case insensitive).
//! * Integers accept integral floating point input (`42.0`), but reject fractions (`42.5`) and values outside the width of the field.
//! * Strings are taken verbatim, including the empty string (`--name=`).
//!
//! ### Executors
//! Executors are callbacks run on a bound field, in declaration order:
//! * [`Executor::call`] runs a zero argument function (the only executor allowed on a command).
//! * [`Executor::inspect`] receives the bound value.
//! * [`Executor::map`] receives the bound value and records its result.
//! * [`Executor::transform`] receives the bound value and assigns its result back into the field.
//!
//! Executors run either during the parse (`execute_when_parsing`) or afterwards via [`Controller::execute`].
//!
//! ### Ordering
//! By default, arguments may appear in any order, and a plain value binds to the next unassigned field of its level.
//! With `respect_order`, arguments must appear in declaration order, and a misplaced argument fails with [`ParseError::IncorrectArgumentOrder`].
//!
//! ```no_run
#![doc = include_str!("../demos/ordered.rs")]
//! ```

pub mod derive;

pub use argbind_builder::*;
