use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

/// Wraps a function body and logs its wall time at debug level.
///
/// `#[timer]` uses the function name as the label, `#[timer("label")]`
/// overrides it.
pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as LitStr))
    };
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(item as ItemFn);

    let label = label
        .map(|lit| lit.value())
        .unwrap_or_else(|| sig.ident.to_string());
    let label_lit = LitStr::new(&label, sig.ident.span());
    let output = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            let __timer_start = std::time::Instant::now();
            let __timer_result = (move || -> #output #block)();
            log::debug!(
                "{}: elapsed={:.3}s",
                #label_lit,
                __timer_start.elapsed().as_secs_f64()
            );
            __timer_result
        }
    };

    TokenStream::from(expanded)
}
