//! One-shot removal of the temporary tsconfig on every exit path.
//!
//! A [`CleanupGuard`] is created together with the temporary file. It is released
//! explicitly on normal completion, when the last clone is dropped (early error
//! returns), or by the signal watcher installed with [`watch_signals`]. Whichever
//! comes first deletes the file; later calls are no-ops.

use crate::error::RunnerError;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle to a file that must be deleted exactly once.
#[derive(Debug, Clone)]
pub struct CleanupGuard {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: Utf8PathBuf,
    released: AtomicBool,
}

impl Inner {
    fn release(&self) -> bool {
        if self.released.swap(true, Ordering::SeqCst) {
            return false;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path, "removed temporary tsconfig");
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "failed to remove temporary tsconfig");
                false
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.release();
    }
}

impl CleanupGuard {
    /// Takes ownership of deleting `path`.
    pub fn new(path: Utf8PathBuf) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                released: AtomicBool::new(false),
            }),
        }
    }

    /// Path of the guarded file.
    pub fn path(&self) -> &Utf8Path {
        &self.inner.path
    }

    /// Deletes the file if no earlier release did. Returns whether this call removed it.
    pub fn release(&self) -> bool {
        self.inner.release()
    }

    /// Returns whether the guard has already fired.
    pub fn is_released(&self) -> bool {
        self.inner.released.load(Ordering::SeqCst)
    }
}

/// Exit status used after cleanup on a termination signal.
pub fn signal_exit_code(signal: i32) -> i32 {
    128 + signal
}

/// Installs handlers for SIGHUP, SIGINT and SIGTERM that release `guard` and exit
/// with `128 + signal`.
///
/// Handlers are registered before this returns, so a signal arriving right after
/// is already covered. Must be called from within a tokio runtime.
#[cfg(unix)]
pub fn watch_signals(guard: CleanupGuard) -> Result<(), RunnerError> {
    use tokio::signal::unix::{signal, SignalKind};

    let register = |kind: SignalKind| signal(kind).map_err(RunnerError::SignalHandler);
    let mut hangup = register(SignalKind::hangup())?;
    let mut interrupt = register(SignalKind::interrupt())?;
    let mut terminate = register(SignalKind::terminate())?;

    tokio::spawn(async move {
        let kind = tokio::select! {
            _ = hangup.recv() => SignalKind::hangup(),
            _ = interrupt.recv() => SignalKind::interrupt(),
            _ = terminate.recv() => SignalKind::terminate(),
        };
        let code = signal_exit_code(kind.as_raw_value());
        tracing::debug!(code, "terminated by signal");
        guard.release();
        std::process::exit(code);
    });

    Ok(())
}

/// Installs a Ctrl-C handler that releases `guard` and exits with 130.
#[cfg(windows)]
pub fn watch_signals(guard: CleanupGuard) -> Result<(), RunnerError> {
    const SIGINT: i32 = 2;

    let mut ctrl_c = tokio::signal::windows::ctrl_c().map_err(RunnerError::SignalHandler)?;
    tokio::spawn(async move {
        ctrl_c.recv().await;
        guard.release();
        std::process::exit(signal_exit_code(SIGINT));
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path())
            .unwrap()
            .join("tsconfig.abc123.json");
        std::fs::write(&path, "{}").unwrap();
        (dir, path)
    }

    #[test]
    fn test_release_is_one_shot() {
        let (_dir, path) = scratch_file();
        let guard = CleanupGuard::new(path.clone());

        assert!(!guard.is_released());
        assert!(guard.release());
        assert!(guard.is_released());
        assert!(!path.exists());
        assert!(!guard.release());
    }

    #[test]
    fn test_clones_share_state() {
        let (_dir, path) = scratch_file();
        let guard = CleanupGuard::new(path.clone());
        let other = guard.clone();

        assert!(other.release());
        assert!(guard.is_released());
        assert!(!guard.release());
    }

    #[test]
    fn test_release_does_not_touch_recreated_file() {
        let (_dir, path) = scratch_file();
        let guard = CleanupGuard::new(path.clone());
        guard.release();

        std::fs::write(&path, "{}").unwrap();
        assert!(!guard.release());
        assert!(path.exists());
    }

    #[test]
    fn test_drop_of_last_clone_removes_file() {
        let (_dir, path) = scratch_file();
        let guard = CleanupGuard::new(path.clone());
        let other = guard.clone();

        drop(guard);
        assert!(path.exists());
        drop(other);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let (_dir, path) = scratch_file();
        std::fs::remove_file(&path).unwrap();
        let guard = CleanupGuard::new(path);
        assert!(!guard.release());
        assert!(guard.is_released());
    }

    #[test]
    fn test_signal_exit_code() {
        assert_eq!(signal_exit_code(2), 130);
        assert_eq!(signal_exit_code(15), 143);
    }
}
