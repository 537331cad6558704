//! Parse a project `.env` file into a key-value map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `.env` in `override_dir` if given, else in the current directory.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Strips one pair of matching quotes. Double quotes honor `\"` and `\n`.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return raw[1..raw.len() - 1]
            .replace("\\n", "\n")
            .replace("\\\"", "\"");
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    raw.to_string()
}

/// One `KEY=VALUE` line; `export ` prefix allowed. `None` for blanks, comments and junk.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), unquote(value.trim())))
}

/// Later lines override earlier ones. No multiline values.
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Loads `.env` into a map. Missing file returns an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match dotenv_path(override_dir) {
        Some(path) => Ok(parse_dotenv(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let m = parse_dotenv("OPENAI_API_KEY=sk-test\nWEFT_MODEL=gpt-4o-mini\n");
        assert_eq!(m.get("OPENAI_API_KEY").map(String::as_str), Some("sk-test"));
        assert_eq!(m.get("WEFT_MODEL").map(String::as_str), Some("gpt-4o-mini"));
    }

    #[test]
    fn skip_comments_blanks_and_junk() {
        let m = parse_dotenv("\n# comment\nNOT_KEY_VALUE\n=value_only\nKEY=val\n  \n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("KEY").map(String::as_str), Some("val"));
    }

    #[test]
    fn export_prefix_is_accepted() {
        let m = parse_dotenv("export WEFT_TRANSCRIPT=chat.txt");
        assert_eq!(m.get("WEFT_TRANSCRIPT").map(String::as_str), Some("chat.txt"));
    }

    #[test]
    fn quoted_values() {
        let m = parse_dotenv(
            "A=\"hello world\"\nB='single quoted'\nC=\"say \\\"hi\\\"\"\nD=\"\"\nE=",
        );
        assert_eq!(m.get("A").map(String::as_str), Some("hello world"));
        assert_eq!(m.get("B").map(String::as_str), Some("single quoted"));
        assert_eq!(m.get("C").map(String::as_str), Some("say \"hi\""));
        assert_eq!(m.get("D").map(String::as_str), Some(""));
        assert_eq!(m.get("E").map(String::as_str), Some(""));
    }

    #[test]
    fn hash_inside_value_is_kept() {
        let m = parse_dotenv("URL=http://host/#frag");
        assert_eq!(m.get("URL").map(String::as_str), Some("http://host/#frag"));
    }

    #[test]
    fn later_line_wins() {
        let m = parse_dotenv("K=1\nK=2\n");
        assert_eq!(m.get("K").map(String::as_str), Some("2"));
    }

    #[test]
    fn load_env_map_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn load_env_map_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.get("A").map(String::as_str), Some("1"));
        assert_eq!(m.get("B").map(String::as_str), Some("2"));
    }
}
