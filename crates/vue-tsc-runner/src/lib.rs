//! tsconfig synthesis and vue-tsc process runner.
//!
//! This crate scopes a vue-tsc run to an explicit list of files. It derives a
//! temporary tsconfig from the project's root config (keeping every option, forcing
//! `skipLibCheck`, and listing the requested files plus every ambient `.d.ts` in the
//! tree), runs vue-tsc against it, and guarantees the temporary file is removed.
//!
//! # Example
//!
//! ```ignore
//! use camino::Utf8PathBuf;
//! use vue_tsc_runner::{
//!     collect_declaration_files, exit_code, watch_signals, ParsedArgs, RootConfig, VueTscRunner,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), vue_tsc_runner::RunnerError> {
//!     let cwd = Utf8PathBuf::from("/path/to/project");
//!     let parsed = ParsedArgs::partition(["src/App.vue", "--strict"]);
//!
//!     let root = RootConfig::load(&RootConfig::resolve_path(&cwd, None))?;
//!     let declarations = collect_declaration_files(&cwd)?;
//!     let checker = VueTscRunner::resolve_checker(&cwd, None)?;
//!
//!     let guard = root.write_temp(&cwd, &root.derive(&parsed.files, &declarations))?;
//!     watch_signals(guard.clone())?;
//!
//!     let status = VueTscRunner::new(checker, cwd)
//!         .run(guard.path(), &parsed.forwarded_flags)
//!         .await;
//!     guard.release();
//!     std::process::exit(exit_code(status?));
//! }
//! ```

mod args;
mod cleanup;
mod declarations;
mod error;
mod runner;
mod tsconfig;

pub use args::{is_checkable_file, ParsedArgs, CHECKABLE_EXTENSIONS};
pub use cleanup::{signal_exit_code, watch_signals, CleanupGuard};
pub use declarations::{collect_declaration_files, DECLARATION_SUFFIX, DEPENDENCY_DIR};
pub use error::RunnerError;
pub use runner::{bin_suffix, exit_code, VueTscRunner, NO_EMIT_FLAG};
pub use tsconfig::{strip_jsonc, RootConfig, ROOT_TSCONFIG};
