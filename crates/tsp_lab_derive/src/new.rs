use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input, spanned::Spanned};

/// `pub fn new(..)` taking every named field in declaration order.
pub fn derive_new_inner(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return syn::Error::new(name.span(), "New can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let expanded = match &data.fields {
        Fields::Named(named) => {
            let idents: Vec<_> = named.named.iter().filter_map(|f| f.ident.as_ref()).collect();
            let types: Vec<_> = named.named.iter().map(|f| &f.ty).collect();
            quote! {
                impl #impl_generics #name #ty_generics #where_clause {
                    #[allow(clippy::too_many_arguments)]
                    pub fn new(#(#idents: #types),*) -> Self {
                        Self { #(#idents),* }
                    }
                }
            }
        }
        Fields::Unnamed(unnamed) => {
            let params: Vec<_> = (0..unnamed.unnamed.len())
                .map(|idx| quote::format_ident!("f{idx}"))
                .collect();
            let types: Vec<_> = unnamed.unnamed.iter().map(|f| &f.ty).collect();
            quote! {
                impl #impl_generics #name #ty_generics #where_clause {
                    pub fn new(#(#params: #types),*) -> Self {
                        Self(#(#params),*)
                    }
                }
            }
        }
        Fields::Unit => {
            return syn::Error::new(data.fields.span(), "New requires at least one field")
                .to_compile_error()
                .into();
        }
    };

    TokenStream::from(expanded)
}
