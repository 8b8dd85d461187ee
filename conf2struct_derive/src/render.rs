use conf2struct_core::{Entry, EntryKind};
use proc_macro2::TokenStream;
use quote::quote;

use crate::generate::field_ident;

/// `impl conf2struct::Render`: one line per entry, sections one level deeper.
pub(crate) fn render_impl(
    struct_ident: &syn::Ident,
    entries: &[Entry],
) -> syn::Result<TokenStream> {
    let lines = entries
        .iter()
        .map(render_entry)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl ::conf2struct::Render for #struct_ident {
            fn render_at(
                &self,
                out: &mut dyn ::std::io::Write,
                depth: usize,
            ) -> ::std::io::Result<()> {
                #(#lines)*
                Ok(())
            }
        }
    })
}

fn render_entry(entry: &Entry) -> syn::Result<TokenStream> {
    let field = field_ident(entry)?;
    let name = &entry.name;

    let direct = match &entry.kind {
        EntryKind::Section(_) => {
            return Ok(quote! {
                ::conf2struct::render::section(out, depth, #name)?;
                ::conf2struct::Render::render_at(&self.#field, out, depth + 1)?;
            });
        }
        EntryKind::Scalar(s) => s.native,
        EntryKind::List(_) => true,
        EntryKind::Choice(_) | EntryKind::External => false,
    };

    let value = if direct {
        quote! { &self.#field }
    } else if entry.optional {
        quote! { &self.#field.as_ref().map(::conf2struct::render::Debugged) }
    } else {
        quote! { &::conf2struct::render::Debugged(&self.#field) }
    };
    Ok(quote! {
        ::conf2struct::render::entry(out, depth, #name, #value)?;
    })
}
