mod config_attr;
mod generate;
mod render;

use conf2struct_core::Schema;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse_macro_input;

use crate::config_attr::ConfigAttr;
use crate::generate::{collect_items, generate_struct};

#[proc_macro_attribute]
pub fn config(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let config_attr = parse_macro_input!(args as ConfigAttr);
    let input_parsed = parse_macro_input!(input as syn::ItemStruct);

    expand(&config_attr, &input_parsed)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(config_attr: &ConfigAttr, item: &syn::ItemStruct) -> syn::Result<TokenStream> {
    if !matches!(item.fields, syn::Fields::Unit) {
        return Err(syn::Error::new_spanned(
            &item.fields,
            "#[config] expects a unit struct, its fields come from the schema",
        ));
    }
    let path = config_attr
        .full_path()
        .map_err(|e| syn::Error::new(Span::call_site(), e))?;
    let schema = Schema::from_file(&path).map_err(|e| {
        syn::Error::new(
            Span::call_site(),
            format!("failed to load schema {}: {e}", path.display()),
        )
    })?;

    generate_module(&schema, item, config_attr, &path.to_string_lossy())
}

fn generate_module(
    schema: &Schema,
    item: &syn::ItemStruct,
    config_attr: &ConfigAttr,
    schema_path: &str,
) -> syn::Result<TokenStream> {
    let struct_name = &item.ident;
    let vis = &item.vis;
    let docs: Vec<syn::Attribute> = item
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .cloned()
        .collect();

    let mut all_items = vec![generate_struct(struct_name, &schema.entries, Some(docs.as_slice()))?];
    collect_items(&schema.entries, &mut all_items)?;

    let private_mod_name = syn::Ident::new(
        &struct_name.to_string().to_lowercase(),
        struct_name.span(),
    );
    let export = if config_attr.export {
        quote! {
           #vis use #private_mod_name::*;
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        #vis mod #private_mod_name {
            #[allow(unused_imports)]
            use super::*;

            // Rebuild when the schema changes.
            const _: &str = include_str!(#schema_path);

            #(#all_items)*

            impl #struct_name {
                pub fn parse() -> Self {
                    <Self as clap::Parser>::parse()
                }

                pub fn try_parse() -> Result<Self, clap::Error> {
                    <Self as clap::Parser>::try_parse()
                }

                pub fn parse_from<I, T>(itr: I) -> Self
                where
                    I: IntoIterator<Item = T>,
                    T: Into<std::ffi::OsString> + Clone,
                {
                    <Self as clap::Parser>::parse_from(itr)
                }

                pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
                where
                    I: IntoIterator<Item = T>,
                    T: Into<std::ffi::OsString> + Clone,
                {
                    <Self as clap::Parser>::try_parse_from(itr)
                }
            }
        }

        #vis use #private_mod_name::#struct_name;
        #export
    })
}
