//! Root tsconfig loading and temporary tsconfig synthesis.

use crate::cleanup::CleanupGuard;
use crate::error::RunnerError;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use std::io::Write;

/// Conventional root config filename.
pub const ROOT_TSCONFIG: &str = "tsconfig.json";

const RANDOM_SUFFIX_LEN: usize = 10;

/// The project's base tsconfig, parsed leniently.
#[derive(Debug, Clone)]
pub struct RootConfig {
    path: Utf8PathBuf,
    value: Map<String, Value>,
}

impl RootConfig {
    /// Resolves the root config path: the `-p` override if given, else `tsconfig.json`,
    /// both relative to `cwd`.
    pub fn resolve_path(cwd: &Utf8Path, project_override: Option<&str>) -> Utf8PathBuf {
        match project_override {
            Some(path) => {
                let path = Utf8Path::new(path);
                if path.is_relative() {
                    cwd.join(path)
                } else {
                    path.to_owned()
                }
            }
            None => cwd.join(ROOT_TSCONFIG),
        }
    }

    /// Reads and parses the config at `path`.
    pub fn load(path: &Utf8Path) -> Result<Self, RunnerError> {
        let content = std::fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parses tsconfig text, tolerating comments and trailing commas.
    pub fn parse(path: &Utf8Path, content: &str) -> Result<Self, RunnerError> {
        let cleaned = strip_jsonc(content.trim_start_matches('\u{feff}'));
        let value: Value =
            serde_json::from_str(&cleaned).map_err(|e| RunnerError::ConfigParse {
                path: path.to_owned(),
                message: e.to_string(),
            })?;

        match value {
            Value::Object(value) => Ok(Self {
                path: path.to_owned(),
                value,
            }),
            other => Err(RunnerError::ConfigParse {
                path: path.to_owned(),
                message: format!("expected an object at the top level, found {}", kind(&other)),
            }),
        }
    }

    /// Path the config was loaded from.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Parsed top-level mapping.
    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    /// Builds the derived config: a shallow copy with `skipLibCheck` forced on,
    /// `files` listing exactly `targets` then `declarations`, and an empty `include`.
    pub fn derive(&self, targets: &[String], declarations: &[Utf8PathBuf]) -> Map<String, Value> {
        let mut derived = self.value.clone();

        let mut compiler_options = match self.value.get("compilerOptions") {
            Some(Value::Object(options)) => options.clone(),
            _ => Map::new(),
        };
        compiler_options.insert("skipLibCheck".to_string(), Value::Bool(true));
        derived.insert(
            "compilerOptions".to_string(),
            Value::Object(compiler_options),
        );

        let files = targets
            .iter()
            .cloned()
            .chain(declarations.iter().map(|p| p.to_string()))
            .map(Value::String)
            .collect();
        derived.insert("files".to_string(), Value::Array(files));
        derived.insert("include".to_string(), Value::Array(Vec::new()));

        derived
    }

    /// Writes the derived config next to the working directory under a fresh name
    /// (`<stem>.<random>.json`) and returns a guard that owns its deletion.
    pub fn write_temp(
        &self,
        dir: &Utf8Path,
        derived: &Map<String, Value>,
    ) -> Result<CleanupGuard, RunnerError> {
        let write_err = |source| RunnerError::TempConfigWrite {
            dir: dir.to_owned(),
            source,
        };

        let content = serde_json::to_string_pretty(derived)
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        let prefix = format!("{}.", self.path.file_stem().unwrap_or("tsconfig"));
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".json")
            .rand_bytes(RANDOM_SUFFIX_LEN)
            .tempfile_in(dir)
            .map_err(write_err)?;

        // Until `keep`, dropping `file` on an error path removes it.
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        let path = file.into_temp_path().keep().map_err(|e| write_err(e.error))?;
        let path = Utf8PathBuf::try_from(path).map_err(|e| {
            let path = e.into_path_buf();
            let _ = std::fs::remove_file(&path);
            RunnerError::NonUtf8Path(path.display().to_string())
        })?;

        tracing::debug!(path = %path, "wrote temporary tsconfig");
        Ok(CleanupGuard::new(path))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Removes comments and trailing commas from JSON text.
///
/// Comment bodies are replaced with spaces (newlines kept) so parser positions
/// still point at the original line and column.
pub fn strip_jsonc(json: &str) -> String {
    without_trailing_commas(&without_comments(json))
}

fn without_comments(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if c == '"' {
                in_string = false;
            } else if c == '\\' {
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            }
        } else if c == '"' {
            result.push(c);
            in_string = true;
        } else if c == '/' {
            match chars.peek() {
                Some('/') => {
                    chars.next();
                    result.push_str("  ");
                    while let Some(&next) = chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        result.push(' ');
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    result.push_str("  ");
                    while let Some(next) = chars.next() {
                        if next == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            result.push_str("  ");
                            break;
                        }
                        result.push(if next == '\n' { '\n' } else { ' ' });
                    }
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

fn without_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            result.push(c);
            if c == '\\' {
                if let Some(&next) = chars.get(i + 1) {
                    result.push(next);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            result.push(c);
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                result.push(' ');
            } else {
                result.push(c);
            }
        } else {
            result.push(c);
        }
        i += 1;
    }

    result
}
