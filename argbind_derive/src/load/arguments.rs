use crate::load::parameter::is_bound;
use crate::load::unknown_error;
use crate::model::{DeriveArguments, DeriveController, DeriveParameter, DeriveValue, IntermediateAttributes};
use quote::quote;

const ARGUMENTS: &str = "arguments";
const SWITCHES: [&str; 3] = ["auto_help", "respect_order", "execute_when_parsing"];
const PAIRS: [&str; 2] = ["name", "separator"];

impl TryFrom<syn::DeriveInput> for DeriveArguments {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        if !value.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &value.generics,
                "Invalid - `#[derive(Arguments)]` does not support generic structs.",
            ));
        }

        let mut controller = None;

        for attribute in &value.attrs {
            if attribute.path().is_ident(ARGUMENTS) {
                let attributes = IntermediateAttributes::try_from(attribute)?;
                controller = Some(load_controller(&value.ident, attributes)?);
            }
        }

        let parameters = match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => fields
                .named
                .iter()
                .filter(|field| is_bound(field))
                .map(DeriveParameter::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            syn::Data::Struct(_) => Vec::default(),
            _ => {
                return Err(syn::Error::new(
                    value.ident.span(),
                    "Invalid - `#[derive(Arguments)]` only applies to structs.",
                ));
            }
        };

        Ok(DeriveArguments {
            struct_name: value.ident,
            controller,
            parameters,
        })
    }
}

fn load_controller(
    struct_name: &syn::Ident,
    attributes: IntermediateAttributes,
) -> Result<DeriveController, syn::Error> {
    for singleton in &attributes.singletons {
        if !SWITCHES.contains(&singleton.as_str()) {
            return Err(unknown_error(struct_name.span(), ARGUMENTS, singleton));
        }
    }

    for (key, _) in &attributes.pairs {
        if !SWITCHES.contains(&key.as_str()) && !PAIRS.contains(&key.as_str()) {
            return Err(unknown_error(struct_name.span(), ARGUMENTS, key));
        }
    }

    // `#[arguments(respect_order)]` reads as `respect_order = true`.
    let switch = |key: &str| -> Option<DeriveValue> {
        match attributes.first(key) {
            Some(value) => Some(value.clone()),
            None if attributes.singletons.contains(key) => Some(DeriveValue {
                tokens: quote! { true },
            }),
            None => None,
        }
    };

    Ok(DeriveController {
        name: attributes.first("name").cloned(),
        auto_help: switch("auto_help"),
        respect_order: switch("respect_order"),
        separator: attributes.first("separator").cloned(),
        execute_when_parsing: switch("execute_when_parsing"),
    })
}
