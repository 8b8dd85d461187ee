mod error;
mod kinds;
mod schema;

use std::{collections::HashMap, fs, path::Path, str::FromStr};

use serde::Deserialize;
use tracing::warn;

pub use error::SchemaError;
pub use kinds::{NATIVE_TYPES, PATH_BUF, is_native_type, qualified_type};
pub use schema::{ArgNames, Choice, Entry, EntryKind, List, Scalar, Section};

use kinds::{is_identifier, list_item, to_pascal_case};

/// Argument ids and flags clap gives every root command.
const RESERVED_IDS: [&str; 2] = ["help", "version"];
const RESERVED_FLAGS: [&str; 4] = ["--help", "-h", "--version", "-V"];

/// A parsed schema: the entries of the root configuration record, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub entries: Vec<Entry>,
}

impl Schema {
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            return Err(SchemaError::UnsupportedFormat(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SchemaError> {
        let table: toml::Table = toml::from_str(content)?;
        let entries = parse_entries(table, None)?;
        if entries.is_empty() {
            return Err(SchemaError::Empty);
        }
        let schema = Schema { entries };
        schema.check_generated_types()?;
        schema.check_flags()?;
        Ok(schema)
    }

    /// Sections are flattened into one command line, so every flag must be
    /// unique across the whole tree.
    fn check_flags(&self) -> Result<(), SchemaError> {
        fn walk<'a>(
            entries: &'a [Entry],
            seen: &mut HashMap<String, &'a str>,
        ) -> Result<(), SchemaError> {
            for entry in entries {
                if let EntryKind::Section(children) = &entry.kind {
                    walk(children, seen)?;
                    continue;
                }
                let Some(names) = entry.names() else {
                    continue;
                };
                if RESERVED_IDS.contains(&entry.id.as_str()) {
                    return Err(SchemaError::ReservedFlag {
                        id: entry.id.clone(),
                        flag: entry.id.clone(),
                    });
                }
                let short = names.short.map(|c| format!("-{c}"));
                for flag in std::iter::once(format!("--{}", entry.long_flag())).chain(short) {
                    if RESERVED_FLAGS.contains(&flag.as_str()) {
                        return Err(SchemaError::ReservedFlag {
                            id: entry.id.clone(),
                            flag,
                        });
                    }
                    if let Some(first) = seen.insert(flag.clone(), &entry.id) {
                        return Err(SchemaError::DuplicateFlag {
                            flag,
                            first: first.to_string(),
                            second: entry.id.clone(),
                        });
                    }
                }
            }
            Ok(())
        }
        walk(&self.entries, &mut HashMap::new())
    }

    fn check_generated_types(&self) -> Result<(), SchemaError> {
        fn walk<'a>(
            entries: &'a [Entry],
            seen: &mut HashMap<&'a str, &'a str>,
        ) -> Result<(), SchemaError> {
            for entry in entries {
                if let Some(type_name) = entry.generated_type()
                    && let Some(first) = seen.insert(type_name, &entry.id)
                {
                    return Err(SchemaError::DuplicateType {
                        type_name: type_name.to_string(),
                        first: first.to_string(),
                        second: entry.id.clone(),
                    });
                }
                if let EntryKind::Section(children) = &entry.kind {
                    walk(children, seen)?;
                }
            }
            Ok(())
        }
        walk(&self.entries, &mut HashMap::new())
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml(s)
    }
}

/// The attribute keys of an entry table; every other key holding a table is
/// a child entry.
#[derive(Deserialize)]
struct Attributes {
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(rename = "enum")]
    enum_name: Option<String>,
    #[serde(default)]
    variants: Vec<String>,
    default: Option<toml::Value>,
    doc: Option<String>,
    env: Option<String>,
    long: Option<String>,
    short: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    external: bool,
    #[serde(flatten)]
    rest: toml::Table,
}

fn parse_entries(table: toml::Table, parent: Option<&str>) -> Result<Vec<Entry>, SchemaError> {
    let mut entries = Vec::new();
    for (name, value) in table {
        match value {
            toml::Value::Table(table) => entries.push(parse_entry(name, table, parent)?),
            _ => warn!(key = %name, parent = parent.unwrap_or(""), "skipping non-table schema key"),
        }
    }
    Ok(entries)
}

fn parse_entry(
    name: String,
    table: toml::Table,
    parent: Option<&str>,
) -> Result<Entry, SchemaError> {
    let id = match parent {
        None => name.clone(),
        Some(pname) => format!("{pname}.{name}"),
    };
    if !is_identifier(&name) {
        return Err(SchemaError::InvalidName { id, name });
    }
    let Attributes {
        type_name,
        enum_name,
        variants,
        default,
        doc,
        env,
        long,
        short,
        optional,
        external,
        rest,
    } = toml::Value::Table(table)
        .try_into()
        .map_err(|source| SchemaError::Attributes {
            id: id.clone(),
            source,
        })?;

    let short = short.map(|value| single_char(&id, value)).transpose()?;
    let names = ArgNames { long, short, env };
    let children = parse_entries(rest, Some(&id))?;

    let (type_name, kind) = if !children.is_empty() {
        if optional {
            return Err(SchemaError::OptionalSection { id });
        }
        let type_name = type_name.unwrap_or_else(|| format!("{}Section", to_pascal_case(&name)));
        (type_name, EntryKind::Section(Section(children)))
    } else if external {
        let Some(type_name) = type_name else {
            return Err(SchemaError::MissingType { id });
        };
        (type_name, EntryKind::External)
    } else if let Some(enum_name) = enum_name {
        if let Some(bad) = variants.iter().find(|v| !is_identifier(v)) {
            return Err(SchemaError::InvalidName {
                id,
                name: bad.clone(),
            });
        }
        let default = default.map(|v| scalar_text(&id, &v)).transpose()?;
        if let Some(d) = &default
            && !variants.is_empty()
            && !variants.contains(d)
        {
            return Err(SchemaError::InvalidDefault {
                id,
                reason: format!("`{d}` is not one of {variants:?}"),
            });
        }
        let choice = Choice {
            names,
            variants,
            default,
        };
        (enum_name, EntryKind::Choice(choice))
    } else {
        let declared = type_name.unwrap_or_else(|| "String".to_string());
        if let Some(item) = list_item(&declared) {
            if !is_native_type(item) {
                return Err(SchemaError::UnsupportedListItem {
                    id,
                    item: item.to_string(),
                });
            }
            let defaults = default.map(|v| list_defaults(&id, v)).transpose()?;
            let list = List {
                names,
                item_type: item.to_string(),
                defaults,
            };
            (format!("Vec<{item}>"), EntryKind::List(list))
        } else {
            let default = default.map(|v| scalar_text(&id, &v)).transpose()?;
            // A required bool is a switch: it can only be turned on.
            if declared == "bool" && !optional && default.as_deref() == Some("true") {
                return Err(SchemaError::InvalidDefault {
                    id,
                    reason: "a switch defaulting to true can never be turned off".to_string(),
                });
            }
            let native = is_native_type(&declared);
            let scalar = Scalar {
                names,
                default,
                native,
            };
            (declared, EntryKind::Scalar(scalar))
        }
    };

    Ok(Entry {
        name,
        id,
        type_name,
        doc,
        optional,
        kind,
    })
}

fn single_char(id: &str, value: String) -> Result<char, SchemaError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SchemaError::InvalidShort {
            id: id.to_string(),
            value,
        }),
    }
}

fn scalar_text(id: &str, value: &toml::Value) -> Result<String, SchemaError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(SchemaError::InvalidDefault {
            id: id.to_string(),
            reason: "expected a single value".to_string(),
        }),
    }
}

fn list_defaults(id: &str, value: toml::Value) -> Result<Vec<String>, SchemaError> {
    match value {
        toml::Value::Array(items) => items.iter().map(|v| scalar_text(id, v)).collect(),
        _ => Err(SchemaError::InvalidDefault {
            id: id.to_string(),
            reason: "list defaults must be an array".to_string(),
        }),
    }
}
