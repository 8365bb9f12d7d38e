use quote::quote;
use syn::{Attribute, LitStr, Path, Type, TypePath};

/// `CliValue` option names and variant names are derived from Rust idents.
pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, .. }) if path.is_ident("bool"))
}

/// Collects `name = "value"` pairs and bare flags from every `#[<attr_name>(...)]`.
pub fn parse_attr_args(
    attrs: &[Attribute],
    attr_name: &str,
    allowed: &[&str],
) -> syn::Result<Vec<(String, Option<String>)>> {
    let mut out = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident(attr_name) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let Some(key) = meta.path.get_ident().map(|ident| ident.to_string()) else {
                return Err(meta.error("expected a plain identifier"));
            };
            if !allowed.contains(&key.as_str()) {
                return Err(meta.error(format!(
                    "unsupported {attr_name} attribute `{key}`; expected one of {}",
                    allowed.join("/")
                )));
            }
            if meta.input.peek(syn::Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                out.push((key, Some(lit.value())));
            } else {
                out.push((key, None));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        quote! { #parse_with(&raw)? }
    } else {
        quote! {
            raw.parse::<#ty>()
                .map_err(|e| crate::Error::invalid_input(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{is_bool, parse_attr_args, to_kebab_case};

    #[test]
    fn to_kebab_case_handles_pascal_and_snake_idents() {
        assert_eq!(to_kebab_case("LogFormat"), "log-format");
        assert_eq!(to_kebab_case("fail_on_mismatch"), "fail-on-mismatch");
        assert_eq!(to_kebab_case("X"), "x");
    }

    #[test]
    fn is_bool_only_matches_plain_bool() {
        let b: syn::Type = parse_quote!(bool);
        let s: syn::Type = parse_quote!(String);
        let o: syn::Type = parse_quote!(Option<bool>);
        assert!(is_bool(&b));
        assert!(!is_bool(&s));
        assert!(!is_bool(&o));
    }

    #[test]
    fn parse_attr_args_reads_values_and_flags() {
        let field: syn::Field = parse_quote! {
            #[cli(long = "log-level", flag)]
            pub log_level: LogLevel
        };
        let args = parse_attr_args(&field.attrs, "cli", &["long", "flag"]).expect("parse attrs");
        assert_eq!(
            args,
            vec![
                ("long".to_string(), Some("log-level".to_string())),
                ("flag".to_string(), None),
            ]
        );
    }

    #[test]
    fn parse_attr_args_rejects_unknown_keys() {
        let field: syn::Field = parse_quote! {
            #[cli(short = "l")]
            pub log_level: LogLevel
        };
        let err = parse_attr_args(&field.attrs, "cli", &["long"]).expect_err("unknown key");
        assert!(err.to_string().contains("unsupported cli attribute `short`"));
    }
}
