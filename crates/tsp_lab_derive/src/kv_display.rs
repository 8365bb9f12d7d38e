use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut keys = Vec::new();
    let mut vals = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let mut key = field_ident.to_string();
        let mut fmt_mode = String::from("display");

        let args = match utils::parse_attr_args(&field.attrs, "kv", &["name", "fmt"]) {
            Ok(args) => args,
            Err(err) => return err.to_compile_error().into(),
        };
        for (name, value) in args {
            match (name.as_str(), value) {
                ("name", Some(v)) => key = v,
                ("fmt", Some(v)) => fmt_mode = v,
                (name, _) => {
                    return syn::Error::new(field.span(), format!("malformed kv attribute `{name}`"))
                        .to_compile_error()
                        .into();
                }
            }
        }

        let value = match fmt_mode.as_str() {
            "display" => quote! { self.#field_ident.to_string() },
            "len" => quote! { self.#field_ident.len().to_string() },
            "empty_dash" => quote! {
                if self.#field_ident.is_empty() {
                    String::from("-")
                } else {
                    self.#field_ident.to_string()
                }
            },
            other => {
                return syn::Error::new(field.span(), format!("unsupported kv fmt mode: {other}"))
                    .to_compile_error()
                    .into();
            }
        };
        keys.push(key);
        vals.push(value);
    }

    let width = keys.iter().map(String::len).max().unwrap_or(0);
    let key_lits: Vec<LitStr> = keys
        .iter()
        .map(|key| LitStr::new(&format!("{key:<width$}"), Span::call_site()))
        .collect();

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #(
                    write!(f, "\n\t{} = {}", #key_lits, #vals)?;
                )*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
