use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;
use std::collections::HashSet;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        // A bare `#[argument]` carries no keys.
        if let syn::Meta::Path(_) = value.meta {
            return Ok(Self::default());
        }

        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
        let expressions = value.parse_args_with(attributes_parser)?;
        let mut singletons = HashSet::default();
        let mut pairs = Vec::default();

        for expression in expressions {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    pairs.push((
                        left.to_string(),
                        DeriveValue {
                            tokens: assignment.right.to_token_stream(),
                        },
                    ));
                }
                syn::Expr::Path(path) => match path.path.get_ident() {
                    Some(ident) => {
                        singletons.insert(ident.to_string());
                    }
                    None => {
                        return Err(syn::Error::new_spanned(
                            &path,
                            format!(
                                "Invalid - expected a plain key, found `{}`.",
                                path.to_token_stream()
                            ),
                        ));
                    }
                },
                _ => {
                    return Err(syn::Error::new_spanned(
                        &expression,
                        format!(
                            "Invalid - unparseable attribute `{}`.",
                            expression.to_token_stream()
                        ),
                    ));
                }
            };
        }

        Ok(Self { singletons, pairs })
    }
}
