//! Derive module for `argbind`.
//! See [documentation root](https://docs.rs/argbind/latest/argbind/index.html) for full details.
extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveArguments;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `argbind::prelude::Target` and `argbind::prelude::Arguments` for a struct.
///
/// The struct level `#[arguments(..)]` attribute marks it as a command line controller:
/// * `name = ".."` sets the program name shown in the usage (defaults to the struct name).
/// * `auto_help` / `auto_help = false` controls the `-h, --help` argument (on by default).
/// * `respect_order` binds arguments strictly in declaration order.
/// * `separator = ':'` changes the name/value separator (defaults to `=`).
/// * `execute_when_parsing` runs executors as part of parsing.
///
/// Only fields with an `#[argument(..)]` attribute are bound:
/// * `short = "-n"` and `long = "--name"` set the names (`long` defaults to `--field`).
/// * `description = ".."` is shown in the usage.
/// * `required` fails the parse when the argument is missing.
/// * `invert_boolean` flips the meaning of a `bool` flag.
/// * `command` binds a nested `Option<Struct>` (which must itself derive `Arguments`).
/// * `execute = f`, `inspect = f`, `map = f`, `transform = f` attach executors, in order.
#[proc_macro_derive(Arguments, attributes(arguments, argument))]
pub fn arguments(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveArguments::try_from(ast) {
        Ok(arguments) => TokenStream2::from(arguments).into(),
        Err(error) => error.to_compile_error().into(),
    }
}

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains(&$sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
