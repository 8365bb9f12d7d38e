use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut option_name = utils::to_kebab_case(&enum_ident.to_string());
    match utils::parse_attr_args(&input.attrs, "cli_value", &["option"]) {
        Ok(args) => {
            if let Some((_, Some(value))) = args.into_iter().last() {
                option_name = value;
            }
        }
        Err(err) => return err.to_compile_error().into(),
    }

    let mut parse_arms = Vec::new();
    let mut name_arms = Vec::new();
    let mut variants = Vec::new();
    let mut expected_values = Vec::new();

    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            )
            .to_compile_error()
            .into();
        }

        let variant_ident = variant.ident;
        let mut canonical = utils::to_kebab_case(&variant_ident.to_string());
        let mut aliases = Vec::new();

        let args = match utils::parse_attr_args(&variant.attrs, "cli", &["name", "alias"]) {
            Ok(args) => args,
            Err(err) => return err.to_compile_error().into(),
        };
        for (key, value) in args {
            let Some(value) = value else {
                return syn::Error::new(variant_ident.span(), format!("`{key}` requires a value"))
                    .to_compile_error()
                    .into();
            };
            if key == "name" {
                canonical = value;
            } else {
                aliases.push(value);
            }
        }

        expected_values.push(canonical.clone());
        let accepted: Vec<LitStr> = std::iter::once(&canonical)
            .chain(aliases.iter())
            .map(|v| LitStr::new(v, Span::call_site()))
            .collect();
        let canonical_lit = LitStr::new(&canonical, Span::call_site());

        parse_arms.push(quote! {
            #(#accepted)|* => Ok(Self::#variant_ident),
        });
        name_arms.push(quote! {
            Self::#variant_ident => #canonical_lit,
        });
        variants.push(quote! { Self::#variant_ident });
    }

    let expected_lit = LitStr::new(&expected_values.join("|"), Span::call_site());
    let option_lit = LitStr::new(&option_name, Span::call_site());

    let expanded = quote! {
        impl #enum_ident {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[#(#variants),*];

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        #expected_lit
                    ))),
                }
            }

            /// Canonical command-line spelling of this value.
            pub fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };

    TokenStream::from(expanded)
}
