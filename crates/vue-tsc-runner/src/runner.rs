//! vue-tsc process runner.

use crate::error::RunnerError;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Package whose installation anchors the checker lookup.
pub const ANCHOR_PACKAGE: &str = "typescript";

/// Checker executable name inside `node_modules/.bin`.
pub const CHECKER_NAME: &str = "vue-tsc";

/// Flag appended to every invocation so vue-tsc only type-checks.
pub const NO_EMIT_FLAG: &str = "--noEmit";

/// Platform suffix for package-manager shims in `node_modules/.bin`.
pub fn bin_suffix() -> &'static str {
    if cfg!(windows) {
        ".cmd"
    } else {
        ""
    }
}

/// The vue-tsc runner.
#[derive(Debug, Clone)]
pub struct VueTscRunner {
    /// Path to the vue-tsc executable.
    checker_path: Utf8PathBuf,
    /// Directory the checker runs in.
    working_dir: Utf8PathBuf,
}

impl VueTscRunner {
    /// Creates a new runner.
    pub fn new(checker_path: Utf8PathBuf, working_dir: Utf8PathBuf) -> Self {
        Self {
            checker_path,
            working_dir,
        }
    }

    /// Finds the directory of an installed package by walking up from `start`,
    /// looking for `node_modules/<name>/package.json` at each level.
    pub fn find_package_root(name: &str, start: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let package_dir = dir.join("node_modules").join(name);
            if package_dir.join("package.json").is_file() {
                return Some(package_dir);
            }
            current = dir.parent();
        }

        None
    }

    /// Locates vue-tsc.
    ///
    /// Search order:
    /// 1. `explicit`, when given (from `VUE_TSC_FILES_BIN`)
    /// 2. `../.bin/vue-tsc` relative to the installed `typescript` package
    /// 3. `vue-tsc` on PATH
    pub fn resolve_checker(
        start: &Utf8Path,
        explicit: Option<Utf8PathBuf>,
    ) -> Result<Utf8PathBuf, RunnerError> {
        if let Some(path) = explicit {
            let path = if path.is_relative() {
                start.join(path)
            } else {
                path
            };
            if path.exists() {
                return Ok(path);
            }
            return Err(RunnerError::CheckerNotFound {
                searched_from: path,
            });
        }

        if let Some(package_root) = Self::find_package_root(ANCHOR_PACKAGE, start) {
            // node_modules/typescript -> node_modules/.bin/vue-tsc
            if let Some(node_modules) = package_root.parent() {
                let bin = node_modules
                    .join(".bin")
                    .join(format!("{CHECKER_NAME}{}", bin_suffix()));
                if bin.exists() {
                    return Ok(bin);
                }
                tracing::debug!(path = %bin, "vue-tsc missing next to typescript package");
            }
        }

        if let Ok(path) = which::which(CHECKER_NAME) {
            if let Ok(utf8_path) = Utf8PathBuf::try_from(path) {
                return Ok(utf8_path);
            }
        }

        Err(RunnerError::CheckerNotFound {
            searched_from: start.to_owned(),
        })
    }

    /// Builds the checker's argument list: `-p <config>`, forwarded flags, `--noEmit`.
    pub fn command_args(temp_config: &Utf8Path, forwarded_flags: &[String]) -> Vec<String> {
        let mut args = Vec::with_capacity(forwarded_flags.len() + 3);
        args.push("-p".to_string());
        args.push(temp_config.to_string());
        args.extend(forwarded_flags.iter().cloned());
        args.push(NO_EMIT_FLAG.to_string());
        args
    }

    /// Runs vue-tsc to completion with inherited stdio.
    pub async fn run(
        &self,
        temp_config: &Utf8Path,
        forwarded_flags: &[String],
    ) -> Result<ExitStatus, RunnerError> {
        let child_err = |source| RunnerError::ChildProcess {
            path: self.checker_path.clone(),
            source,
        };

        let args = Self::command_args(temp_config, forwarded_flags);
        tracing::debug!(checker = %self.checker_path, ?args, "spawning vue-tsc");

        let mut child = Command::new(&self.checker_path)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(child_err)?;

        let status = child.wait().await.map_err(child_err)?;
        tracing::debug!(?status, "vue-tsc exited");
        Ok(status)
    }
}

/// Exit code to propagate: the child's own, or 0 if it had none (killed by a signal).
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(0)
}
