//! Ambient declaration file discovery.

use crate::error::RunnerError;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Suffix of ambient declaration files.
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Directory holding installed dependencies; never traversed.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Collects every `.d.ts` file under `root`, skipping `node_modules`.
///
/// Links are not followed. Any unreadable directory aborts the whole scan.
pub fn collect_declaration_files(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, RunnerError> {
    let mut found = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_dependency_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|e| RunnerError::DirectoryRead {
            path: e
                .path()
                .and_then(|p| Utf8Path::from_path(p))
                .unwrap_or(root)
                .to_owned(),
            source: e.into(),
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let is_declaration = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(DECLARATION_SUFFIX));
        if !is_declaration {
            continue;
        }

        let path = Utf8PathBuf::try_from(entry.into_path())
            .map_err(|e| RunnerError::NonUtf8Path(e.into_path_buf().display().to_string()))?;
        found.push(path);
    }

    tracing::debug!(root = %root, count = found.len(), "collected declaration files");
    Ok(found)
}

fn is_dependency_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == DEPENDENCY_DIR
}
