use anyhow::{Context, Result};
use glob::{MatchOptions, glob_with};
use serde::Serialize;
use tracing::debug;

use super::{Param, Tool, ToolBuilder, TypeRef};
use crate::config::Policy;
use crate::error::ToolError;

pub const READ_FILE: &str = "read_file";

#[derive(Debug, Serialize)]
struct FileContents {
    filename: String,
    contents: String,
}

/// Declaration of the `read_file` tool, without a body
pub fn read_file_builder() -> ToolBuilder {
    Tool::builder(READ_FILE)
        .description("Read the given filename and return the contents.")
        .param(Param::new(
            "filename",
            TypeRef::String,
            "The path to the file to read. Can be a glob pattern.",
        ))
        .returns(TypeRef::String)
}

/// Tool for reading every file that matches a glob pattern.
///
/// Returns a JSON array of `{"filename", "contents"}` objects in match order.
pub fn read_file_tool(policy: Policy) -> Result<Tool, ToolError> {
    read_file_builder().build(move |args| {
        let pattern: String = args.get("filename")?;
        read_matching(&pattern, &policy)
    })
}

/// Wildcards never match a leading `.`; hidden files must be named explicitly
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

fn read_matching(pattern: &str, policy: &Policy) -> Result<String> {
    let entries = glob_with(pattern, MATCH_OPTIONS)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                // Skip entries we can't read
                debug!("glob entry error: {}", e);
                continue;
            }
        };

        policy.check_path(&path)?;

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        files.push(FileContents {
            filename: path.display().to_string(),
            contents,
        });
    }

    debug!(pattern, matches = files.len(), "read files");
    Ok(serde_json::to_string(&files)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        std::fs::write(dir.path().join("b.txt"), "beta").unwrap();
        std::fs::write(dir.path().join("c.md"), "gamma").unwrap();
        dir
    }

    #[test]
    fn schema_matches_declaration() {
        let tool = read_file_tool(Policy::default()).unwrap();
        let value = tool.schema().to_value().unwrap();
        assert_eq!(value["function"]["name"], "read_file");
        assert_eq!(
            value["function"]["parameters"]["properties"]["filename"]["type"],
            "string"
        );
        assert_eq!(value["function"]["parameters"]["required"], json!(["filename"]));
    }

    #[test]
    fn reads_every_match_in_order() {
        let dir = fixture();
        let pattern = format!("{}/*.txt", dir.path().display());
        let output = read_matching(&pattern, &Policy::default()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!([
                {"filename": format!("{}/a.txt", dir.path().display()), "contents": "alpha"},
                {"filename": format!("{}/b.txt", dir.path().display()), "contents": "beta"},
            ])
        );
    }

    #[test]
    fn wildcards_skip_hidden_files() {
        let dir = fixture();
        std::fs::write(dir.path().join(".hidden"), "SECRET=1").unwrap();

        let pattern = format!("{}/*", dir.path().display());
        let output = read_matching(&pattern, &Policy::default()).unwrap();
        assert!(!output.contains("SECRET"));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);

        let explicit = format!("{}/.hid*", dir.path().display());
        let output = read_matching(&explicit, &Policy::default()).unwrap();
        assert!(output.contains("SECRET=1"));
    }

    #[test]
    fn no_matches_yield_empty_array() {
        let dir = fixture();
        let pattern = format!("{}/*.rs", dir.path().display());
        assert_eq!(read_matching(&pattern, &Policy::default()).unwrap(), "[]");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = read_matching("[", &Policy::default()).unwrap_err();
        assert!(err.to_string().contains("invalid glob pattern"));
    }

    #[test]
    fn denied_match_fails_the_call() {
        let dir = fixture();
        let policy = Policy {
            deny_paths: vec![dir.path().display().to_string()],
            ..Policy::default()
        };
        let tool = read_file_tool(policy).unwrap();
        let args = json!({"filename": format!("{}/a.txt", dir.path().display())});
        let output = tool.safe_call(&args.to_string());
        assert!(output.contains("is_error"));
        assert!(output.contains("denied by policy"));
    }
}
