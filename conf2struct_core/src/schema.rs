use std::ops::Deref;

/// One entry of a schema: a field of the generated configuration record.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// Field identifier, as written in the schema.
    pub name: String,
    /// Dotted path from the root, e.g. `timeouts.connect`.
    pub id: String,
    /// Rust type of the field, without the `Option` wrapper.
    pub type_name: String,
    pub doc: Option<String>,
    pub optional: bool,
    pub kind: EntryKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntryKind {
    Scalar(Scalar),
    List(List),
    Choice(Choice),
    Section(Section),
    External,
}

/// How an entry is reached from the command line and the environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgNames {
    pub long: Option<String>,
    pub short: Option<char>,
    pub env: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scalar {
    pub names: ArgNames,
    pub default: Option<String>,
    /// The type is one of [`crate::NATIVE_TYPES`].
    pub native: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct List {
    pub names: ArgNames,
    pub item_type: String,
    pub defaults: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub names: ArgNames,
    /// Empty when the enum is defined outside the schema.
    pub variants: Vec<String>,
    pub default: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section(pub Vec<Entry>);

impl Deref for Section {
    type Target = Vec<Entry>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Entry {
    pub fn names(&self) -> Option<&ArgNames> {
        match &self.kind {
            EntryKind::Scalar(s) => Some(&s.names),
            EntryKind::List(l) => Some(&l.names),
            EntryKind::Choice(c) => Some(&c.names),
            EntryKind::Section(_) | EntryKind::External => None,
        }
    }

    /// The long flag: the explicit `long` attribute, else the dotted id.
    pub fn long_flag(&self) -> &str {
        self.names()
            .and_then(|n| n.long.as_deref())
            .unwrap_or(&self.id)
    }

    /// Type name of the item this entry asks the generator to emit, if any.
    pub fn generated_type(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Section(_) => Some(&self.type_name),
            EntryKind::Choice(c) if !c.variants.is_empty() => Some(&self.type_name),
            _ => None,
        }
    }
}
