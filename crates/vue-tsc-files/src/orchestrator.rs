//! Main orchestration logic.

use camino::{Utf8Path, Utf8PathBuf};
use vue_tsc_runner::{
    collect_declaration_files, exit_code, watch_signals, ParsedArgs, RootConfig, RunnerError,
    VueTscRunner,
};

/// Environment variable pointing at an explicit vue-tsc binary.
pub const CHECKER_ENV: &str = "VUE_TSC_FILES_BIN";

/// Runs vue-tsc on the files in `parsed` and returns the exit code to propagate.
///
/// Returns 0 without touching the filesystem when no target files were given.
pub async fn run(parsed: ParsedArgs) -> Result<i32, RunnerError> {
    if parsed.is_empty() {
        tracing::debug!("no .vue/.ts/.tsx files given, nothing to check");
        return Ok(0);
    }

    let cwd = current_dir()?;
    tracing::debug!(
        files = ?parsed.files,
        project = ?parsed.project_override,
        forwarded = ?parsed.forwarded_flags,
        "parsed arguments"
    );

    let root_path = RootConfig::resolve_path(&cwd, parsed.project_override.as_deref());
    let root = RootConfig::load(&root_path)?;
    let declarations = collect_declaration_files(&cwd)?;
    let checker = VueTscRunner::resolve_checker(&cwd, checker_override())?;
    tracing::debug!(config = %root.path(), checker = %checker, "resolved inputs");

    let derived = root.derive(&parsed.files, &declarations);
    let guard = root.write_temp(&cwd, &derived)?;
    // If handlers cannot be installed, dropping the guard removes the file.
    watch_signals(guard.clone())?;

    let runner = VueTscRunner::new(checker, cwd);
    let status = runner.run(guard.path(), &parsed.forwarded_flags).await;
    guard.release();

    Ok(exit_code(status?))
}

fn current_dir() -> Result<Utf8PathBuf, RunnerError> {
    let cwd = std::env::current_dir().map_err(RunnerError::WorkingDir)?;
    Utf8PathBuf::try_from(cwd).map_err(|e| RunnerError::NonUtf8Path(e.to_string()))
}

fn checker_override() -> Option<Utf8PathBuf> {
    let value = std::env::var(CHECKER_ENV).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(Utf8Path::new(value).to_owned())
    }
}
