//! The `#[metric]` attribute.
//!
//! Exports a metric type so it can be resolved by dotted identifier, and
//! optionally registers it under a metric name.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Generics, Ident, Item, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Version used when `#[metric(name = ...)]` does not give one.
const DEFAULT_VERSION: &str = "0.1.0";

/// Arguments for the `#[metric]` macro.
pub(crate) struct MetricArgs {
    pub name: Option<LitStr>,
    pub version: Option<LitStr>,
    pub backend: Option<LitStr>,
}

impl Parse for MetricArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut version = None;
        let mut backend = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;

            if lit.value().trim().is_empty() {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("`{}` must not be empty", ident),
                ));
            }

            let slot = match ident.to_string().as_str() {
                "name" => &mut name,
                "version" => &mut version,
                "backend" => &mut backend,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            };
            if slot.replace(lit).is_some() {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("duplicate attribute: {}", ident),
                ));
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        if name.is_none() && (version.is_some() || backend.is_some()) {
            return Err(input.error("`version` and `backend` require `name`"));
        }

        Ok(MetricArgs {
            name,
            version,
            backend,
        })
    }
}

fn item_ident(item: &Item) -> syn::Result<(&Ident, &Generics)> {
    match item {
        Item::Struct(s) => Ok((&s.ident, &s.generics)),
        Item::Enum(e) => Ok((&e.ident, &e.generics)),
        other => Err(syn::Error::new_spanned(
            other,
            "#[metric] can only be applied to a struct or enum",
        )),
    }
}

/// Implementation of the `#[metric]` attribute macro.
pub fn metric_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MetricArgs);
    let input = parse_macro_input!(item as Item);

    let (ident, generics) = match item_ident(&input) {
        Ok(parts) => parts,
        Err(err) => return err.to_compile_error().into(),
    };

    if !generics.params.is_empty() {
        return syn::Error::new_spanned(generics, "metric types must not be generic")
            .to_compile_error()
            .into();
    }

    let named: Option<proc_macro2::TokenStream> = args.name.as_ref().map(|name| {
        let version = args
            .version
            .clone()
            .unwrap_or_else(|| LitStr::new(DEFAULT_VERSION, name.span()));
        let backend = args.backend.as_ref().map(|backend| {
            quote! { .with_backend(#backend) }
        });

        quote! {
            ::metric_registry::inventory::submit! {
                ::metric_registry::MetricRegistration::new(
                    #name,
                    #version,
                    <#ident>::METRIC_CLASS,
                )
                #backend
            }
        }
    });

    let expanded = quote! {
        #input

        impl #ident {
            /// Class handle for this metric type.
            #[allow(dead_code)]
            pub const METRIC_CLASS: ::metric_registry::MetricClass =
                ::metric_registry::MetricClass::new::<#ident>(
                    ::core::module_path!(),
                    ::core::stringify!(#ident),
                );
        }

        ::metric_registry::inventory::submit! {
            ::metric_registry::ClassRegistration::new(<#ident>::METRIC_CLASS)
        }

        #named
    };

    TokenStream::from(expanded)
}
