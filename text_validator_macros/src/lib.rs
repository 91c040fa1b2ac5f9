extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::{
    Data, DeriveInput, Expr, Field, Fields, Ident, LitStr, meta::ParseNestedMeta,
    parse_macro_input, token,
};

/// Derives `text_validator::FieldRules` for a struct whose fields implement
/// `TextField`.
///
/// ```ignore
/// #[derive(FieldRules)]
/// struct Signup {
///     #[rule(required)]
///     name: MemoryField,
///     #[rule(name = "age", range_int(min = 0, max = 150))]
///     age_years: MemoryField,
/// }
/// ```
#[proc_macro_derive(FieldRules, attributes(rule))]
pub fn field_rules_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// The rule declared on a single field.
enum RuleKind {
    Required,
    RangeInt { min: Option<Expr>, max: Option<Expr> },
}

struct FieldRule {
    ident: Ident,
    name: String,
    kind: RuleKind,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "FieldRules cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Only structs with named fields are supported",
                ));
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Only structs are supported")),
    };

    let mut rules = Vec::new();
    let mut seen_names = HashSet::new();
    for field in fields {
        if let Some(rule) = parse_field_rule(field)? {
            if !seen_names.insert(rule.name.clone()) {
                return Err(syn::Error::new_spanned(
                    &field.ident,
                    format!("Field name '{}' is defined twice", rule.name),
                ));
            }
            rules.push(rule);
        }
    }

    let defines = rules.iter().map(|rule| {
        let name = &rule.name;
        let rule_expr = rule_tokens(&rule.kind);
        quote! { builder.define(#name, #rule_expr)?; }
    });

    let field_arms = rules.iter().map(|rule| {
        let name = &rule.name;
        let ident = &rule.ident;
        quote! {
            #name => ::core::option::Option::Some(
                &mut self.#ident as &mut dyn ::text_validator::TextField,
            ),
        }
    });

    Ok(quote! {
        impl ::text_validator::FieldRules for #name {
            fn validator_set() -> ::core::result::Result<
                &'static ::text_validator::ValidatorSet,
                ::text_validator::RuleError,
            > {
                static VALIDATOR_SET: ::text_validator::__private::Lazy<
                    ::core::result::Result<
                        ::text_validator::ValidatorSet,
                        ::text_validator::RuleError,
                    >,
                > = ::text_validator::__private::Lazy::new(|| -> ::core::result::Result<
                    ::text_validator::ValidatorSet,
                    ::text_validator::RuleError,
                > {
                    #[allow(unused_mut)]
                    let mut builder = ::text_validator::ValidatorSet::builder();
                    #(#defines)*
                    ::core::result::Result::Ok(builder.build())
                });
                VALIDATOR_SET.as_ref().map_err(::core::clone::Clone::clone)
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn ::text_validator::TextField> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

// --- Helper Functions for Attribute Parsing ---

/// Collects the `#[rule(...)]` attributes of a field. Returns `None` when the
/// field has no rule.
fn parse_field_rule(field: &Field) -> syn::Result<Option<FieldRule>> {
    let Some(ident) = field.ident.clone() else {
        return Ok(None);
    };
    let mut name = None;
    let mut kind = None;
    let mut has_attr = false;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("rule")) {
        has_attr = true;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
                return Ok(());
            }

            let parsed = if meta.path.is_ident("required") {
                RuleKind::Required
            } else if meta.path.is_ident("range_int") {
                parse_range_int(&meta)?
            } else {
                return Err(meta.error("Unknown rule: expected `required`, `range_int` or `name`"));
            };

            if kind.replace(parsed).is_some() {
                return Err(meta.error("Only one rule can be declared per field"));
            }
            Ok(())
        })?;
    }

    if !has_attr {
        return Ok(None);
    }
    let kind = kind.ok_or_else(|| {
        syn::Error::new_spanned(&ident, "Expected `required` or `range_int` in #[rule(...)]")
    })?;

    Ok(Some(FieldRule {
        name: name.unwrap_or_else(|| ident.to_string()),
        ident,
        kind,
    }))
}

/// Parses `range_int` or `range_int(min = EXPR, max = EXPR)`, where either
/// bound may be omitted.
fn parse_range_int(meta: &ParseNestedMeta<'_>) -> syn::Result<RuleKind> {
    let mut min = None;
    let mut max = None;

    if meta.input.peek(token::Paren) {
        meta.parse_nested_meta(|bound| {
            if bound.path.is_ident("min") {
                min = Some(bound.value()?.parse::<Expr>()?);
            } else if bound.path.is_ident("max") {
                max = Some(bound.value()?.parse::<Expr>()?);
            } else {
                return Err(bound.error("Expected `min` or `max`"));
            }
            Ok(())
        })?;
    }

    Ok(RuleKind::RangeInt { min, max })
}

fn rule_tokens(kind: &RuleKind) -> TokenStream2 {
    match kind {
        RuleKind::Required => quote! { ::text_validator::ValidationRule::Required },
        RuleKind::RangeInt { min, max } => {
            let min = min
                .as_ref()
                .map(|m| quote! { #m })
                .unwrap_or(quote! { ::text_validator::NO_MIN });
            let max = max
                .as_ref()
                .map(|m| quote! { #m })
                .unwrap_or(quote! { ::text_validator::NO_MAX });
            quote! { ::text_validator::ValidationRule::range_int(#min, #max)? }
        }
    }
}
