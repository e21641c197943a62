use crate::load::{incompatible_error, unknown_error};
use crate::model::{
    DeriveExecutor, DeriveParameter, DeriveValue, ExecutorStyle, IntermediateAttributes,
};
use quote::ToTokens;

pub(crate) const ARGUMENT: &str = "argument";
const SINGLETONS: [&str; 3] = ["required", "invert_boolean", "command"];
const PAIRS: [&str; 3] = ["short", "long", "description"];

impl TryFrom<&syn::Field> for DeriveParameter {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = match &value.ident {
            Some(ident) => ident.clone(),
            None => {
                return Err(syn::Error::new_spanned(
                    value,
                    "Invalid - only named fields may be bound.",
                ));
            }
        };
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident(ARGUMENT) {
                attributes = IntermediateAttributes::try_from(attribute)?;
            }
        }

        for singleton in &attributes.singletons {
            if !SINGLETONS.contains(&singleton.as_str()) {
                return Err(unknown_error(field_name.span(), ARGUMENT, singleton));
            }
        }

        let mut executors = Vec::default();

        for (key, function) in &attributes.pairs {
            match ExecutorStyle::from_key(key) {
                Some(style) => executors.push(DeriveExecutor {
                    style,
                    function: function.clone(),
                }),
                None if PAIRS.contains(&key.as_str()) => {}
                None => return Err(unknown_error(field_name.span(), ARGUMENT, key)),
            }
        }

        let required = attributes.singletons.contains("required");
        let invert_boolean = attributes.singletons.contains("invert_boolean");
        let explicit_command = attributes.singletons.contains("command");
        let command = if explicit_command {
            disallow(
                &field_name,
                "#[argument(command)]",
                &[(&invert_boolean, "#[argument(invert_boolean)]")],
            )?;

            if let Some(executor) = executors
                .iter()
                .find(|executor| executor.style != ExecutorStyle::Execute)
            {
                return Err(incompatible_error(
                    &field_name,
                    "#[argument(command)]",
                    format!("#[argument({:?} = ..)]", executor.style).to_lowercase(),
                ));
            }

            match option_inner(&value.ty) {
                Some(inner) => Some(DeriveValue {
                    tokens: inner.to_token_stream(),
                }),
                None => {
                    return Err(syn::Error::new(
                        field_name.span(),
                        format!(
                            "Invalid - `#[argument(command)]` field must be `Option<..>`, found `{}`.",
                            value.ty.to_token_stream()
                        ),
                    ));
                }
            }
        } else {
            None
        };

        Ok(DeriveParameter {
            field_name,
            field_type: DeriveValue {
                tokens: value.ty.to_token_stream(),
            },
            short: attributes.first("short").cloned(),
            long: attributes.first("long").cloned(),
            description: attributes.first("description").cloned(),
            required,
            invert_boolean,
            command,
            executors,
        })
    }
}

/// Whether the field carries an `#[argument]` attribute at all.
pub(crate) fn is_bound(field: &syn::Field) -> bool {
    field
        .attrs
        .iter()
        .any(|attribute| attribute.path().is_ident(ARGUMENT))
}

fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let segment = match ty {
        syn::Type::Path(path) => path.path.segments.last()?,
        _ => return None,
    };

    if segment.ident != "Option" {
        return None;
    }

    match &segment.arguments {
        syn::PathArguments::AngleBracketed(arguments) if arguments.args.len() == 1 => {
            match arguments.args.first() {
                Some(syn::GenericArgument::Type(inner)) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

fn disallow(
    field_name: &syn::Ident,
    antecedent: &str,
    condition_names: &[(&bool, &str)],
) -> Result<(), syn::Error> {
    for (condition, name) in condition_names {
        if **condition {
            return Err(incompatible_error(field_name, antecedent, *name));
        }
    }

    Ok(())
}
