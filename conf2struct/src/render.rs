//! Printing of configuration records.
//!
//! Each entry is written as `name: value` on its own line, indented by four
//! spaces per level; a section writes `name:` followed by its entries one
//! level deeper:
//!
//! ```text
//! user: nobody
//! pidfile: <unset>
//! listen: [localhost:443, 0.0.0.0:80]
//! timeouts:
//!     connect: 2
//! ```
use std::{
    ffi::{OsStr, OsString},
    fmt, io,
    path::{Path, PathBuf},
};

pub const INDENT: &str = "    ";
/// Printed for optional entries that received no value.
pub const UNSET: &str = "<unset>";

/// A record that knows how to print itself. Implemented by `#[config]` for
/// every generated struct.
pub trait Render {
    fn render_at(&self, out: &mut dyn io::Write, depth: usize) -> io::Result<()>;

    fn render(&self, out: &mut dyn io::Write) -> io::Result<()> {
        self.render_at(out, 0)
    }

    fn render_to_vec(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(buf)
    }
}

/// A value printed after `name: `.
pub trait Value {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

macro_rules! display_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl Value for $t {
                fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
                    write!(out, "{}", self)
                }
            }
        )*
    };
}

display_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, f32, f64, char, String,
    str,
);

impl Value for Path {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        write!(out, "{}", self.display())
    }
}

impl Value for PathBuf {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        self.as_path().write_value(out)
    }
}

impl Value for OsStr {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        write!(out, "{}", self.to_string_lossy())
    }
}

impl Value for OsString {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        self.as_os_str().write_value(out)
    }
}

impl<T: Value + ?Sized> Value for &T {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        (**self).write_value(out)
    }
}

impl<T: Value> Value for Option<T> {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        match self {
            Some(value) => value.write_value(out),
            None => out.write_all(UNSET.as_bytes()),
        }
    }
}

impl<T: Value> Value for Vec<T> {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        out.write_all(b"[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.write_all(b", ")?;
            }
            item.write_value(out)?;
        }
        out.write_all(b"]")
    }
}

/// Prints a value with its `Debug` form: enums and external types.
pub struct Debugged<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> Value for Debugged<'_, T> {
    fn write_value(&self, out: &mut dyn io::Write) -> io::Result<()> {
        write!(out, "{:?}", self.0)
    }
}

fn indent(out: &mut dyn io::Write, depth: usize) -> io::Result<()> {
    for _ in 0..depth {
        out.write_all(INDENT.as_bytes())?;
    }
    Ok(())
}

pub fn entry(out: &mut dyn io::Write, depth: usize, name: &str, value: &dyn Value) -> io::Result<()> {
    indent(out, depth)?;
    write!(out, "{name}: ")?;
    value.write_value(out)?;
    writeln!(out)
}

pub fn section(out: &mut dyn io::Write, depth: usize, name: &str) -> io::Result<()> {
    indent(out, depth)?;
    writeln!(out, "{name}:")
}
