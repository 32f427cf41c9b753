//! Splitting raw command-line tokens into target files and forwarded flags.

/// Extensions that mark a token as a file to type-check.
pub const CHECKABLE_EXTENSIONS: [&str; 3] = [".vue", ".ts", ".tsx"];

const PROJECT_FLAGS: [&str; 2] = ["-p", "--project"];

/// Command-line tokens partitioned for vue-tsc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Files named on the command line, in the order given.
    pub files: Vec<String>,
    /// Value following the first `-p` / `--project`.
    pub project_override: Option<String>,
    /// Everything else, in the order given.
    pub forwarded_flags: Vec<String>,
}

impl ParsedArgs {
    /// Partitions `args` (without the program name).
    ///
    /// Only the first `-p` / `--project` is consumed together with the token after it;
    /// later occurrences are forwarded like any other flag.
    pub fn partition<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = ParsedArgs::default();
        let mut project_seen = false;
        let mut tokens = args.into_iter().map(Into::into);

        while let Some(token) = tokens.next() {
            if !project_seen && PROJECT_FLAGS.contains(&token.as_str()) {
                project_seen = true;
                parsed.project_override = tokens.next();
                continue;
            }

            if is_checkable_file(&token) {
                parsed.files.push(token);
            } else {
                parsed.forwarded_flags.push(token);
            }
        }

        parsed
    }

    /// Returns true when there is nothing to type-check.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Returns whether `arg` names a `.vue`, `.ts` or `.tsx` file.
pub fn is_checkable_file(arg: &str) -> bool {
    CHECKABLE_EXTENSIONS.iter().any(|ext| arg.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_files_and_flags() {
        let parsed = ParsedArgs::partition(["src/App.vue", "--strict"]);
        assert_eq!(parsed.files, strings(&["src/App.vue"]));
        assert_eq!(parsed.forwarded_flags, strings(&["--strict"]));
        assert_eq!(parsed.project_override, None);
    }

    #[test]
    fn test_project_override_short() {
        let parsed = ParsedArgs::partition(["-p", "custom.json", "a.ts"]);
        assert_eq!(parsed.project_override.as_deref(), Some("custom.json"));
        assert_eq!(parsed.files, strings(&["a.ts"]));
        assert!(parsed.forwarded_flags.is_empty());
    }

    #[test]
    fn test_project_override_long_keeps_order() {
        let parsed = ParsedArgs::partition([
            "--pretty",
            "a.tsx",
            "--project",
            "tsconfig.app.json",
            "--strict",
            "b.vue",
            "--incremental",
        ]);
        assert_eq!(parsed.project_override.as_deref(), Some("tsconfig.app.json"));
        assert_eq!(parsed.files, strings(&["a.tsx", "b.vue"]));
        assert_eq!(
            parsed.forwarded_flags,
            strings(&["--pretty", "--strict", "--incremental"])
        );
    }

    #[test]
    fn test_only_first_project_flag_is_consumed() {
        let parsed = ParsedArgs::partition(["-p", "one.json", "x.ts", "--project", "two.json"]);
        assert_eq!(parsed.project_override.as_deref(), Some("one.json"));
        assert_eq!(parsed.forwarded_flags, strings(&["--project", "two.json"]));
    }

    #[test]
    fn test_trailing_project_flag_without_value() {
        let parsed = ParsedArgs::partition(["a.ts", "-p"]);
        assert_eq!(parsed.project_override, None);
        assert_eq!(parsed.files, strings(&["a.ts"]));
        assert!(parsed.forwarded_flags.is_empty());
    }

    #[test]
    fn test_no_target_files() {
        let parsed = ParsedArgs::partition(["--watch"]);
        assert!(parsed.is_empty());
        assert_eq!(parsed.forwarded_flags, strings(&["--watch"]));
    }

    #[test]
    fn test_tokens_are_conserved() {
        let input = strings(&["--a", "x.vue", "-p", "cfg.json", "--b", "y.ts", "--c"]);
        let parsed = ParsedArgs::partition(input.clone());

        let mut rebuilt = parsed.files.clone();
        rebuilt.extend(parsed.forwarded_flags.clone());
        rebuilt.push("-p".to_string());
        rebuilt.extend(parsed.project_override.clone());

        let mut expected = input;
        expected.sort();
        rebuilt.sort();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_is_checkable_file() {
        assert!(is_checkable_file("App.vue"));
        assert!(is_checkable_file("index.ts"));
        assert!(is_checkable_file("types.d.ts"));
        assert!(is_checkable_file("Comp.tsx"));
        assert!(!is_checkable_file("main.js"));
        assert!(!is_checkable_file("--noEmit"));
        assert!(!is_checkable_file("tsconfig.json"));
    }
}
