//! CLI argument capture.
//!
//! Every token belongs either to us (files, `-p`) or to vue-tsc, so argv is taken
//! verbatim, including any bare `--`; [`vue_tsc_runner::ParsedArgs`] does the splitting.

use std::ffi::OsString;
use vue_tsc_runner::{ParsedArgs, RunnerError};

/// Raw command-line tokens, program name excluded.
#[derive(Debug)]
pub struct Args {
    pub tokens: Vec<String>,
}

impl Args {
    /// Captures the process arguments.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_argv(std::env::args_os())
    }

    /// Captures `argv`, skipping the program name. Fails on a non-UTF-8 token.
    pub fn from_argv<I, S>(argv: I) -> Result<Self, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let tokens = argv
            .into_iter()
            .skip(1)
            .map(|arg| {
                arg.into().into_string().map_err(|arg| {
                    RunnerError::NonUtf8Argument(arg.to_string_lossy().into_owned())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    /// Splits the captured tokens into files, project override and forwarded flags.
    pub fn partition(&self) -> ParsedArgs {
        ParsedArgs::partition(self.tokens.iter().cloned())
    }
}
