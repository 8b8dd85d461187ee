use conf2struct_core::{Choice, Entry, EntryKind, qualified_type};
use proc_macro2::{Span, TokenStream};
use quote::quote;

use crate::render::render_impl;

pub(crate) fn field_ident(entry: &Entry) -> syn::Result<syn::Ident> {
    syn::parse_str(&entry.name).map_err(|_| {
        syn::Error::new(
            Span::call_site(),
            format!("`{}`: `{}` cannot be used as a field name", entry.id, entry.name),
        )
    })
}

fn type_ident(entry: &Entry) -> syn::Result<syn::Ident> {
    syn::parse_str(&entry.type_name).map_err(|_| {
        syn::Error::new(
            Span::call_site(),
            format!("`{}`: `{}` is not a valid type name", entry.id, entry.type_name),
        )
    })
}

fn field_type(entry: &Entry) -> syn::Result<syn::Type> {
    let spelled = match &entry.kind {
        EntryKind::Scalar(s) if s.native => qualified_type(&entry.type_name),
        EntryKind::List(l) => format!("Vec<{}>", qualified_type(&l.item_type)),
        _ => entry.type_name.clone(),
    };
    syn::parse_str(&spelled).map_err(|e| {
        syn::Error::new(
            Span::call_site(),
            format!("`{}`: invalid type `{spelled}`: {e}", entry.id),
        )
    })
}

/// The `#[arg(...)]` attribute of a leaf entry.
fn arg_attribute(entry: &Entry) -> TokenStream {
    let id = &entry.id;
    let long = entry.long_flag();
    let mut arg_params = vec![quote! { id = #id }, quote! { long = #long }];

    if let Some(names) = entry.names() {
        if let Some(s) = names.short {
            arg_params.push(quote! { short = #s });
        }
        if let Some(env) = &names.env {
            arg_params.push(quote! { env = #env });
        }
    }

    match &entry.kind {
        EntryKind::Scalar(s) => {
            if let Some(default) = &s.default {
                arg_params.push(quote! { default_value = #default });
            }
        }
        EntryKind::List(l) => {
            if let Some(defaults) = l.defaults.as_ref().filter(|d| !d.is_empty()) {
                arg_params.push(quote! { default_values = [#(#defaults),*] });
            }
            if l.names.env.is_some() {
                arg_params.push(quote! { value_delimiter = ',' });
            }
        }
        EntryKind::Choice(c) => {
            arg_params.push(quote! { value_enum });
            if let Some(default) = &c.default {
                arg_params.push(quote! { default_value = #default });
            }
        }
        EntryKind::Section(_) | EntryKind::External => {}
    }

    quote! { #[arg(#(#arg_params),*)] }
}

fn field_definition(entry: &Entry) -> syn::Result<TokenStream> {
    let field_name = field_ident(entry)?;
    let field_type = field_type(entry)?;

    // Flattened fields take no help text of their own.
    let attributes = match &entry.kind {
        EntryKind::Section(_) | EntryKind::External => vec![quote! { #[command(flatten)] }],
        _ => {
            let doc = entry.doc.iter().map(|doc| quote! { #[doc = #doc] });
            doc.chain(std::iter::once(arg_attribute(entry))).collect()
        }
    };

    Ok(if entry.optional {
        quote! {
            #(#attributes)*
            pub #field_name: Option<#field_type>,
        }
    } else {
        quote! {
            #(#attributes)*
            pub #field_name: #field_type,
        }
    })
}

/// The root record derives `Parser`; sections only need `Args` to be flattened.
pub(crate) fn generate_struct(
    struct_ident: &syn::Ident,
    entries: &[Entry],
    root_docs: Option<&[syn::Attribute]>,
) -> syn::Result<TokenStream> {
    let field_definitions = entries
        .iter()
        .map(field_definition)
        .collect::<syn::Result<Vec<_>>>()?;
    let render = render_impl(struct_ident, entries)?;

    let header = match root_docs {
        Some(docs) => quote! {
            #(#docs)*
            #[derive(Debug, Clone, PartialEq, clap::Parser)]
            #[command(version)]
        },
        None => quote! {
            #[derive(Debug, Clone, PartialEq, clap::Args)]
        },
    };

    Ok(quote! {
        #header
        pub struct #struct_ident {
            #(#field_definitions)*
        }

        #render
    })
}

/// Structs for every section and enums for every choice with declared
/// variants, depth first.
pub(crate) fn collect_items(entries: &[Entry], items: &mut Vec<TokenStream>) -> syn::Result<()> {
    for entry in entries {
        match &entry.kind {
            EntryKind::Section(children) => {
                let struct_ident = type_ident(entry)?;
                items.push(generate_struct(&struct_ident, children, None)?);
                collect_items(children, items)?;
            }
            EntryKind::Choice(choice) if !choice.variants.is_empty() => {
                let enum_ident = type_ident(entry)?;
                items.push(generate_enum(&enum_ident, choice)?);
            }
            _ => {}
        }
    }
    Ok(())
}

fn generate_enum(enum_ident: &syn::Ident, choice: &Choice) -> syn::Result<TokenStream> {
    let variants = choice
        .variants
        .iter()
        .map(|variant| syn::parse_str::<syn::Ident>(variant))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
        #[value(rename_all = "verbatim")]
        pub enum #enum_ident {
            #(#variants,)*
        }
    })
}
