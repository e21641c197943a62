use crate::model::{DeriveExecutor, DeriveParameter, ExecutorStyle};
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;

impl From<&DeriveExecutor> for TokenStream2 {
    fn from(value: &DeriveExecutor) -> Self {
        let function = &value.function.tokens;

        match value.style {
            ExecutorStyle::Execute => quote! { ::argbind::Executor::call(#function) },
            ExecutorStyle::Inspect => quote! { ::argbind::Executor::inspect(#function) },
            ExecutorStyle::Map => quote! { ::argbind::Executor::map(#function) },
            ExecutorStyle::Transform => quote! { ::argbind::Executor::transform(#function) },
        }
    }
}

impl DeriveParameter {
    /// The `FieldSpec` expression declaring this field.
    pub(crate) fn field_spec(&self) -> TokenStream2 {
        let field_name = self.field_name.to_string();
        let mut spec = match &self.command {
            Some(inner) => {
                let inner = &inner.tokens;
                quote! {
                    ::argbind::FieldSpec::command(#field_name, <#inner as ::argbind::prelude::Arguments>::fields())
                }
            }
            None => {
                let field_type = &self.field_type.tokens;
                quote! {
                    ::argbind::FieldSpec::new(#field_name, <#field_type as ::argbind::prelude::FieldValue>::KIND)
                }
            }
        };

        if let Some(short) = &self.short {
            let short = &short.tokens;
            spec = quote! { #spec.short(#short) };
        }

        if let Some(long) = &self.long {
            let long = &long.tokens;
            spec = quote! { #spec.long(#long) };
        }

        if let Some(description) = &self.description {
            let description = &description.tokens;
            spec = quote! { #spec.description(#description) };
        }

        if self.required {
            spec = quote! { #spec.required(true) };
        }

        if self.invert_boolean {
            spec = quote! { #spec.invert_boolean(true) };
        }

        for executor in &self.executors {
            let executor = TokenStream2::from(executor);
            spec = quote! { #spec.executor(#executor) };
        }

        spec
    }

    /// The `Target::assign` match arm, for a leaf field.
    pub(crate) fn assign_arm(&self, slot: usize) -> Option<TokenStream2> {
        if self.command.is_some() {
            return None;
        }

        let field_name = &self.field_name;
        let slot = Literal::usize_unsuffixed(slot);
        Some(quote! {
            #slot => {
                self.#field_name = ::argbind::prelude::FieldValue::from_value(value)?;
                Ok(())
            }
        })
    }

    /// The `Target::value` match arm, for a leaf field.
    pub(crate) fn value_arm(&self, slot: usize) -> Option<TokenStream2> {
        if self.command.is_some() {
            return None;
        }

        let field_name = &self.field_name;
        let slot = Literal::usize_unsuffixed(slot);
        Some(quote! {
            #slot => ::argbind::prelude::FieldValue::to_value(&self.#field_name),
        })
    }

    /// The `Target::enter` match arm, for a command field.
    pub(crate) fn enter_arm(&self, slot: usize) -> Option<TokenStream2> {
        let inner = &self.command.as_ref()?.tokens;
        let field_name = &self.field_name;
        let slot = Literal::usize_unsuffixed(slot);
        Some(quote! {
            #slot => Some(
                self.#field_name.insert(<#inner as ::std::default::Default>::default())
                    as &mut dyn ::argbind::prelude::Target
            ),
        })
    }

    /// The `Target::nested` match arm, for a command field.
    pub(crate) fn nested_arm(&self, slot: usize) -> Option<TokenStream2> {
        self.command.as_ref()?;
        let field_name = &self.field_name;
        let slot = Literal::usize_unsuffixed(slot);
        Some(quote! {
            #slot => self
                .#field_name
                .as_mut()
                .map(|nested| nested as &mut dyn ::argbind::prelude::Target),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::DeriveValue;
    use proc_macro2::Span;
    use quote::ToTokens;

    #[test]
    fn render_field_spec_empty() {
        // Setup
        let parameter = leaf("verbose", quote! { bool });

        // Execute
        let token_stream = parameter.field_spec();

        // Verify
        assert_eq!(
            token_stream.to_string(),
            quote! {
                ::argbind::FieldSpec::new("verbose", <bool as ::argbind::prelude::FieldValue>::KIND)
            }
            .to_string()
        );
    }

    #[test]
    fn render_field_spec() {
        // Setup
        let mut parameter = leaf("name", quote! { Option<String> });
        parameter.short = Some(string("-n"));
        parameter.long = Some(string("--name"));
        parameter.description = Some(string("The name."));
        parameter.required = true;
        parameter.invert_boolean = true;
        parameter.executors = vec![
            DeriveExecutor {
                style: ExecutorStyle::Inspect,
                function: DeriveValue {
                    tokens: quote! { show },
                },
            },
            DeriveExecutor {
                style: ExecutorStyle::Transform,
                function: DeriveValue {
                    tokens: quote! { shout },
                },
            },
        ];

        // Execute
        let token_stream = parameter.field_spec();

        // Verify
        assert_eq!(
            token_stream.to_string(),
            quote! {
                ::argbind::FieldSpec::new("name", <Option<String> as ::argbind::prelude::FieldValue>::KIND)
                    .short("-n")
                    .long("--name")
                    .description("The name.")
                    .required(true)
                    .invert_boolean(true)
                    .executor(::argbind::Executor::inspect(show))
                    .executor(::argbind::Executor::transform(shout))
            }
            .to_string()
        );
    }

    #[test]
    fn render_field_spec_command() {
        // Setup
        let mut parameter = command("start", quote! { StartArguments });
        parameter.long = Some(string("start"));
        parameter.executors = vec![DeriveExecutor {
            style: ExecutorStyle::Execute,
            function: DeriveValue {
                tokens: quote! { started },
            },
        }];

        // Execute
        let token_stream = parameter.field_spec();

        // Verify
        assert_eq!(
            token_stream.to_string(),
            quote! {
                ::argbind::FieldSpec::command("start", <StartArguments as ::argbind::prelude::Arguments>::fields())
                    .long("start")
                    .executor(::argbind::Executor::call(started))
            }
            .to_string()
        );
    }

    #[test]
    fn render_leaf_arms() {
        // Setup
        let parameter = leaf("port", quote! { i32 });

        // Execute
        let assign = parameter.assign_arm(3).unwrap();
        let value = parameter.value_arm(3).unwrap();

        // Verify
        assert_eq!(
            assign.to_string(),
            quote! {
                3 => {
                    self.port = ::argbind::prelude::FieldValue::from_value(value)?;
                    Ok(())
                }
            }
            .to_string()
        );
        assert_eq!(
            value.to_string(),
            quote! {
                3 => ::argbind::prelude::FieldValue::to_value(&self.port),
            }
            .to_string()
        );
        assert!(parameter.enter_arm(3).is_none());
        assert!(parameter.nested_arm(3).is_none());
    }

    #[test]
    fn render_command_arms() {
        // Setup
        let parameter = command("start", quote! { StartArguments });

        // Execute
        let enter = parameter.enter_arm(0).unwrap();
        let nested = parameter.nested_arm(0).unwrap();

        // Verify
        assert_eq!(
            enter.to_string(),
            quote! {
                0 => Some(
                    self.start.insert(<StartArguments as ::std::default::Default>::default())
                        as &mut dyn ::argbind::prelude::Target
                ),
            }
            .to_string()
        );
        assert_eq!(
            nested.to_string(),
            quote! {
                0 => self
                    .start
                    .as_mut()
                    .map(|nested| nested as &mut dyn ::argbind::prelude::Target),
            }
            .to_string()
        );
        assert!(parameter.assign_arm(0).is_none());
        assert!(parameter.value_arm(0).is_none());
    }

    pub(crate) fn leaf(name: &str, field_type: TokenStream2) -> DeriveParameter {
        DeriveParameter {
            field_name: syn::Ident::new(name, Span::call_site()),
            field_type: DeriveValue { tokens: field_type },
            short: None,
            long: None,
            description: None,
            required: false,
            invert_boolean: false,
            command: None,
            executors: vec![],
        }
    }

    pub(crate) fn command(name: &str, inner: TokenStream2) -> DeriveParameter {
        DeriveParameter {
            command: Some(DeriveValue {
                tokens: inner.clone(),
            }),
            ..leaf(name, quote! { Option<#inner> })
        }
    }

    fn string(value: &str) -> DeriveValue {
        DeriveValue {
            tokens: Literal::string(value).into_token_stream(),
        }
    }
}
