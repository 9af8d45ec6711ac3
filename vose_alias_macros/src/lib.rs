use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, Fields, Lit, LitFloat, Meta, Variant, parse_macro_input,
    spanned::Spanned,
};

/// `#[derive(WeightedOutcome)]` for fieldless enums.
///
/// Every variant needs `#[weight(<expr>)]`. Integer literals inside the
/// expression are read as floats, so `#[weight(1/100)]` means `0.01`.
#[proc_macro_derive(WeightedOutcome, attributes(weight))]
pub fn derive_weighted_outcome(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            ident.span(),
            "WeightedOutcome can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new(
            ident.span(),
            "WeightedOutcome needs at least one variant",
        ));
    }

    let entries = data
        .variants
        .iter()
        .map(|v| {
            let weight = variant_weight(v)?;
            let name = &v.ident;
            Ok(quote! { (Self::#name, #weight) })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::vose_alias::WeightedOutcome for #ident #ty_generics #where_clause {
            const WEIGHTS: &'static [(Self, f64)] = &[ #(#entries),* ];
        }
    })
}

fn variant_weight(variant: &Variant) -> syn::Result<Expr> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new(
            variant.span(),
            "WeightedOutcome only supports fieldless variants",
        ));
    }

    let mut found = None;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("weight")) {
        if found.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[weight(..)]"));
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "use #[weight(<expr>)]"));
        };
        let expr: Expr = syn::parse2(list.tokens.clone())
            .map_err(|e| syn::Error::new(list.span(), format!("invalid weight: {e}")))?;
        found = Some(float_literals(expr));
    }

    found.ok_or_else(|| {
        syn::Error::new(
            variant.span(),
            format!("missing #[weight(..)] on variant `{}`", variant.ident),
        )
    })
}

/// Rewrite integer literals as floats so `1/3` divides in floating point.
fn float_literals(expr: Expr) -> Expr {
    match expr {
        Expr::Lit(mut el) => {
            if let Lit::Int(int) = &el.lit {
                let text = format!("{}.0", int.base10_digits());
                el.lit = Lit::Float(LitFloat::new(&text, int.span()));
            }
            Expr::Lit(el)
        }
        Expr::Binary(mut b) => {
            *b.left = float_literals(*b.left);
            *b.right = float_literals(*b.right);
            Expr::Binary(b)
        }
        Expr::Paren(mut p) => {
            *p.expr = float_literals(*p.expr);
            Expr::Paren(p)
        }
        Expr::Unary(mut u) => {
            *u.expr = float_literals(*u.expr);
            Expr::Unary(u)
        }
        Expr::Group(mut g) => {
            *g.expr = float_literals(*g.expr);
            Expr::Group(g)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn error_of(input: DeriveInput) -> String {
        match expand(&input) {
            Ok(tokens) => panic!("expected an error, got `{tokens}`"),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn expands_weights_in_order() {
        let tokens = expand(&parse_quote! {
            enum Loot {
                #[weight(3)]
                Common,
                #[weight(1/100)]
                Rare,
            }
        })
        .unwrap()
        .to_string();
        assert!(tokens.contains("WeightedOutcome for Loot"), "{tokens}");
        let common = tokens.find("Self :: Common").unwrap();
        let rare = tokens.find("Self :: Rare").unwrap();
        assert!(common < rare, "{tokens}");
        assert!(tokens.contains("3.0"), "{tokens}");
        assert!(tokens.contains("1.0 / 100.0"), "{tokens}");
    }

    #[test]
    fn integer_literals_become_floats() {
        let e = float_literals(parse_quote!(-(1 + 2) / 4 * HEAVY));
        assert_eq!(
            quote!(#e).to_string(),
            quote!(-(1.0 + 2.0) / 4.0 * HEAVY).to_string()
        );
    }

    #[test]
    fn rejects_structs() {
        let msg = error_of(parse_quote! { struct Loot { weight: f64 } });
        assert_eq!(msg, "WeightedOutcome can only be derived for enums");
    }

    #[test]
    fn rejects_empty_enums() {
        let msg = error_of(parse_quote! { enum Nothing {} });
        assert_eq!(msg, "WeightedOutcome needs at least one variant");
    }

    #[test]
    fn rejects_variants_with_fields() {
        let inputs: [DeriveInput; 2] = [
            parse_quote! { enum Loot { #[weight(1)] Gold(u32) } },
            parse_quote! { enum Loot { #[weight(1)] Gold { amount: u32 } } },
        ];
        for input in inputs {
            assert_eq!(
                error_of(input),
                "WeightedOutcome only supports fieldless variants"
            );
        }
    }

    #[test]
    fn rejects_missing_weight() {
        let msg = error_of(parse_quote! {
            enum Loot {
                #[weight(1)]
                Common,
                Rare,
            }
        });
        assert_eq!(msg, "missing #[weight(..)] on variant `Rare`");
    }

    #[test]
    fn rejects_malformed_weight() {
        let msg = error_of(parse_quote! { enum Loot { #[weight = 3] Common } });
        assert_eq!(msg, "use #[weight(<expr>)]");

        let msg = error_of(parse_quote! { enum Loot { #[weight] Common } });
        assert_eq!(msg, "use #[weight(<expr>)]");

        let msg = error_of(parse_quote! { enum Loot { #[weight(1 +)] Common } });
        assert!(msg.starts_with("invalid weight:"), "{msg}");
    }

    #[test]
    fn rejects_duplicate_weight() {
        let msg = error_of(parse_quote! {
            enum Loot {
                #[weight(1)]
                #[weight(2)]
                Common,
            }
        });
        assert_eq!(msg, "duplicate #[weight(..)]");
    }
}
