//! Error types for the runner.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort an invocation before or while running the checker.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The root tsconfig could not be read.
    #[error("failed to read tsconfig at {path}")]
    #[diagnostic(
        code(vue_tsc_files::config_read),
        help("pass the project config explicitly with `-p <path>`")
    )]
    ConfigRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root tsconfig is not valid JSON, even after stripping comments and trailing commas.
    #[error("failed to parse tsconfig at {path}: {message}")]
    #[diagnostic(code(vue_tsc_files::config_parse))]
    ConfigParse { path: Utf8PathBuf, message: String },

    /// The current working directory is gone or unreadable.
    #[error("failed to resolve the current working directory")]
    #[diagnostic(
        code(vue_tsc_files::working_dir),
        help("run vue-tsc-files from an existing project directory")
    )]
    WorkingDir(#[source] std::io::Error),

    /// A directory could not be read while collecting declaration files.
    #[error("failed to read directory {path}")]
    #[diagnostic(code(vue_tsc_files::directory_read))]
    DirectoryRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary tsconfig could not be created or written.
    #[error("failed to write temporary tsconfig in {dir}")]
    #[diagnostic(code(vue_tsc_files::temp_config))]
    TempConfigWrite {
        dir: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// vue-tsc could not be located.
    #[error("vue-tsc binary not found (searched from {searched_from})")]
    #[diagnostic(
        code(vue_tsc_files::checker_not_found),
        help("install `vue-tsc` and `typescript` in the project, or set VUE_TSC_FILES_BIN")
    )]
    CheckerNotFound { searched_from: Utf8PathBuf },

    /// vue-tsc failed to spawn or could not be waited on.
    #[error("failed to run {path}")]
    #[diagnostic(code(vue_tsc_files::child_process))]
    ChildProcess {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Termination signal handlers could not be installed.
    #[error("failed to install signal handler")]
    #[diagnostic(code(vue_tsc_files::signal_handler))]
    SignalHandler(#[source] std::io::Error),

    /// A path is not representable as UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    #[diagnostic(code(vue_tsc_files::non_utf8_path))]
    NonUtf8Path(String),

    /// A command-line argument is not valid UTF-8.
    #[error("argument is not valid UTF-8: {0}")]
    #[diagnostic(code(vue_tsc_files::non_utf8_argument))]
    NonUtf8Argument(String),
}
