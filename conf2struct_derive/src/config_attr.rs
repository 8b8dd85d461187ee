use std::{
    env,
    path::{Path, PathBuf},
};

use syn::{
    Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

/// Used when the attribute names no schema.
const DEFAULT_SCHEMA: &str = "config.toml";

/// Arguments of `#[config(...)]`.
#[derive(Debug, PartialEq)]
pub(crate) struct ConfigAttr {
    pub path: String,
    pub export: bool,
}

impl ConfigAttr {
    /// Schema paths are relative to the manifest of the crate using the macro.
    pub(crate) fn full_path(&self) -> Result<PathBuf, String> {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR")
            .map_err(|_| "CARGO_MANIFEST_DIR is not set".to_string())?;
        Ok(Path::new(&manifest_dir).join(&self.path))
    }

    fn set(&mut self, param: &syn::MetaNameValue) -> syn::Result<()> {
        let syn::Expr::Lit(syn::ExprLit { lit, .. }) = &param.value else {
            return Err(syn::Error::new_spanned(&param.value, "expected a literal"));
        };
        let key = param.path.get_ident().map(ToString::to_string);
        match (key.as_deref(), lit) {
            (Some("path"), syn::Lit::Str(path)) => self.path = path.value(),
            (Some("export"), syn::Lit::Bool(export)) => self.export = export.value,
            (Some("path"), _) => return Err(syn::Error::new_spanned(lit, "`path` takes a string")),
            (Some("export"), _) => {
                return Err(syn::Error::new_spanned(lit, "`export` takes a boolean"));
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    &param.path,
                    "unknown parameter, expected `path` or `export`",
                ));
            }
        }
        Ok(())
    }
}

impl Default for ConfigAttr {
    fn default() -> Self {
        Self {
            path: DEFAULT_SCHEMA.to_string(),
            export: true,
        }
    }
}

/// Either a bare schema path or a list of `key = literal` pairs.
impl Parse for ConfigAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(syn::LitStr) {
            let path: syn::LitStr = input.parse()?;
            return Ok(Self {
                path: path.value(),
                ..Self::default()
            });
        }
        let params = Punctuated::<syn::MetaNameValue, Token![,]>::parse_terminated(input)?;
        params.iter().try_fold(Self::default(), |mut attr, param| {
            attr.set(param)?;
            Ok(attr)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_uses_defaults() {
        let attr: ConfigAttr = syn::parse_str("").unwrap();
        assert_eq!(attr, ConfigAttr::default());
        assert_eq!(attr.path, DEFAULT_SCHEMA);
    }

    #[test]
    fn test_bare_path() {
        let attr: ConfigAttr = syn::parse_str(r#""eg.toml""#).unwrap();
        assert_eq!(attr.path, "eg.toml");
        assert!(attr.export);
    }

    #[test]
    fn test_named_parameters() {
        let attr: ConfigAttr = syn::parse_str(r#"path = "eg.toml", export = false"#).unwrap();
        assert_eq!(
            attr,
            ConfigAttr {
                path: "eg.toml".to_string(),
                export: false,
            }
        );

        let attr: ConfigAttr = syn::parse_str("export = false,").unwrap();
        assert_eq!(attr.path, DEFAULT_SCHEMA);
        assert!(!attr.export);
    }

    #[test]
    fn test_unknown_parameter() {
        let err = syn::parse_str::<ConfigAttr>(r#"schema = "eg.toml""#).unwrap_err();
        assert!(err.to_string().contains("unknown parameter"));
    }

    #[test]
    fn test_wrong_literal_kind() {
        let err = syn::parse_str::<ConfigAttr>(r#"export = "no""#).unwrap_err();
        assert!(err.to_string().contains("takes a boolean"));

        let err = syn::parse_str::<ConfigAttr>("path = eg").unwrap_err();
        assert!(err.to_string().contains("expected a literal"));
    }
}
