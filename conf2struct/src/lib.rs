// Licensed under the MIT license
// (see LICENSE or <http://opensource.org/licenses/MIT>) All files in the project carrying such
//! > conf2struct turns a TOML schema into clap-backed configuration structs. The generated record parses the command line (with environment variable fallbacks and defaults) and knows how to print itself back.
//!
//! # How it works
//!
//! 1- Write a schema: one table per entry, giving its type, default value, documentation and environment variable. Tables nested under an entry become a section, a nested struct with its own flags.
//!
//! ```toml
//! user = { doc = "User to run as", env = "EG_USER" }
//! port = { type = "u16", default = 443, doc = "Listening port", short = "p" }
//! pidfile = { type = "PathBuf", optional = true }
//! facility = { enum = "Facility", variants = ["Auth", "Daemon"], default = "Daemon" }
//!
//! [timeouts]
//! connect = { type = "u32", default = 2 }
//! ```
//!
//! 2- Apply the macro: `#[config]` on a unit struct reads the schema (relative to the crate manifest) and generates the record, its sections, its enums and their [`Render`] implementations.
//!
//! ```text
//! use conf2struct::config;
//!
//! #[config("eg.toml")]
//! struct EgConfig;
//! ```
//!
//! 3- Run it: [`runner::run_main`] parses the process arguments, exits with status 1 when they are rejected and prints the record otherwise.
//!
//! ```text
//! fn main() -> std::process::ExitCode {
//!     conf2struct::runner::run_main(&conf2struct::ClapArguments::<EgConfig>::new())
//! }
//! ```
//!
//! Sections are flattened into the parent command line under their dotted path:
//!
//! ```text
//! $ eg --user nobody --timeouts.connect 5
//! user: nobody
//! port: 443
//! pidfile: <unset>
//! facility: Daemon
//! timeouts:
//!     connect: 5
//! ```
pub mod render;
pub mod runner;

pub use conf2struct_derive::config;
pub use render::Render;
pub use runner::{ArgumentParser, ClapArguments, ParseFailure, Status, run};
