//! Parse the command line into a configuration record, then print it.
//!
//! The parser is injected through [`ArgumentParser`], so the runner works the
//! same with a `#[config]` record ([`ClapArguments`]) or a plain closure.
use std::{ffi::OsString, io, marker::PhantomData, process::ExitCode};

use thiserror::Error;
use tracing::{debug, error};

use crate::Render;

/// The command line could not be turned into a configuration record.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Rejected(#[from] clap::Error),
    #[error("{0}")]
    Invalid(String),
}

impl ParseFailure {
    /// `--help` and `--version` surface as clap errors but are not failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, ParseFailure::Rejected(e) if !e.use_stderr())
    }
}

pub trait ArgumentParser {
    type Config;

    /// `args` includes the program name in first position.
    fn parse_arguments(&self, args: &[OsString]) -> Result<Self::Config, ParseFailure>;
}

impl<F, C> ArgumentParser for F
where
    F: Fn(&[OsString]) -> Result<C, ParseFailure>,
{
    type Config = C;

    fn parse_arguments(&self, args: &[OsString]) -> Result<C, ParseFailure> {
        self(args)
    }
}

/// Parses with any `clap::Parser`, typically a `#[config]` record.
pub struct ClapArguments<T>(PhantomData<fn() -> T>);

impl<T> ClapArguments<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ClapArguments<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: clap::Parser> ArgumentParser for ClapArguments<T> {
    type Config = T;

    fn parse_arguments(&self, args: &[OsString]) -> Result<T, ParseFailure> {
        Ok(T::try_parse_from(args.iter().cloned())?)
    }
}

/// Outcome of [`run`]; maps onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

/// Parses `args` and writes the rendered record to `out`.
///
/// Nothing reaches `out` unless parsing and rendering both succeeded: the
/// record is rendered into memory first and written in one go.
///
/// `--help` and `--version` leave no record to print: their text goes to
/// `out` instead of a configuration dump, and the run counts as a success.
pub fn run<P, I, T, W>(parser: &P, args: I, out: &mut W) -> Status
where
    P: ArgumentParser + ?Sized,
    P::Config: Render,
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: io::Write + ?Sized,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let config = match parser.parse_arguments(&args) {
        Ok(config) => config,
        Err(failure) if failure.is_informational() => {
            return write_out(out, failure.to_string().as_bytes());
        }
        Err(failure) => {
            error!(%failure, "could not parse command line");
            return Status::Failure;
        }
    };
    debug!(arguments = args.len(), "command line parsed");

    match config.render_to_vec() {
        Ok(rendered) => write_out(out, &rendered),
        Err(e) => {
            error!(error = %e, "could not render configuration");
            Status::Failure
        }
    }
}

/// [`run`] over the process arguments and standard output.
pub fn run_main<P>(parser: &P) -> ExitCode
where
    P: ArgumentParser + ?Sized,
    P::Config: Render,
{
    run(parser, std::env::args_os(), &mut io::stdout().lock()).into()
}

fn write_out<W: io::Write + ?Sized>(out: &mut W, bytes: &[u8]) -> Status {
    match out.write_all(bytes).and_then(|()| out.flush()) {
        Ok(()) => Status::Success,
        Err(e) => {
            error!(error = %e, "could not write configuration");
            Status::Failure
        }
    }
}
