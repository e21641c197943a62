use crate::model::{DeriveArguments, DeriveController};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveArguments> for TokenStream2 {
    fn from(value: DeriveArguments) -> Self {
        let DeriveArguments {
            struct_name,
            controller,
            parameters,
        } = value;
        let type_name = struct_name.to_string();
        let config = match &controller {
            Some(controller) => {
                let config = TokenStream2::from(controller);
                quote! { Some(#config) }
            }
            None => quote! { None },
        };
        let specs: Vec<TokenStream2> = parameters.iter().map(|p| p.field_spec()).collect();
        let assign_arms = parameters
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.assign_arm(slot));
        let value_arms = parameters
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.value_arm(slot));
        let enter_arms = parameters
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.enter_arm(slot));
        let nested_arms = parameters
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.nested_arm(slot));

        quote! {
            #[allow(unused_variables)]
            impl ::argbind::prelude::Target for #struct_name {
                fn assign(
                    &mut self,
                    slot: usize,
                    value: ::argbind::Value,
                ) -> ::std::result::Result<(), ::argbind::InvalidValue> {
                    match slot {
                        #( #assign_arms )*
                        _ => {
                            ::std::mem::drop(value);
                            Err(::argbind::InvalidValue::UnknownSlot(slot))
                        }
                    }
                }

                fn value(&self, slot: usize) -> ::std::option::Option<::argbind::Value> {
                    match slot {
                        #( #value_arms )*
                        _ => None,
                    }
                }

                fn enter(
                    &mut self,
                    slot: usize,
                ) -> ::std::option::Option<&mut dyn ::argbind::prelude::Target> {
                    match slot {
                        #( #enter_arms )*
                        _ => None,
                    }
                }

                fn nested(
                    &mut self,
                    slot: usize,
                ) -> ::std::option::Option<&mut dyn ::argbind::prelude::Target> {
                    match slot {
                        #( #nested_arms )*
                        _ => None,
                    }
                }
            }

            impl ::argbind::prelude::Arguments for #struct_name {
                fn fields() -> ::std::vec::Vec<::argbind::FieldSpec> {
                    vec![ #( #specs ),* ]
                }

                fn schema() -> ::std::result::Result<&'static ::argbind::Schema, ::argbind::SchemaError> {
                    static SCHEMA: ::std::sync::OnceLock<
                        ::std::result::Result<::argbind::Schema, ::argbind::SchemaError>,
                    > = ::std::sync::OnceLock::new();
                    SCHEMA
                        .get_or_init(|| -> ::std::result::Result<::argbind::Schema, ::argbind::SchemaError> {
                            let config = #config;
                            ::argbind::Schema::extract(
                                #type_name,
                                config,
                                <Self as ::argbind::prelude::Arguments>::fields(),
                            )
                        })
                        .as_ref()
                        .map_err(::std::clone::Clone::clone)
                }
            }
        }
    }
}

impl From<&DeriveController> for TokenStream2 {
    fn from(value: &DeriveController) -> Self {
        let mut config = quote! { ::argbind::ControllerConfig::default() };

        if let Some(name) = &value.name {
            let name = &name.tokens;
            config = quote! { #config.name(#name) };
        }

        if let Some(auto_help) = &value.auto_help {
            let auto_help = &auto_help.tokens;
            config = quote! { #config.auto_help(#auto_help) };
        }

        if let Some(respect_order) = &value.respect_order {
            let respect_order = &respect_order.tokens;
            config = quote! { #config.respect_order(#respect_order) };
        }

        if let Some(separator) = &value.separator {
            let separator = &separator.tokens;
            config = quote! { #config.separator(::argbind::Separator::new(#separator)?) };
        }

        if let Some(execute_when_parsing) = &value.execute_when_parsing {
            let execute_when_parsing = &execute_when_parsing.tokens;
            config = quote! { #config.execute_when_parsing(#execute_when_parsing) };
        }

        config
    }
}
