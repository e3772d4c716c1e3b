#![allow(dead_code)]

use std::path::{Path, PathBuf};

use envfile_rs::{EnvMap, EnvParser, Error, SyntaxError, format, parse_str};
use tempfile::TempDir;

/// Write `contents` to `name` inside a fresh temp dir.
pub fn env_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    (dir, path)
}

/// Open and parse a file with default options.
pub fn parsed(path: &Path) -> EnvParser {
    let mut parser = EnvParser::open(path).expect("open");
    parser.parse(false).expect("parse");
    parser
}

pub fn expect_syntax(input: &str) -> SyntaxError {
    match parse_str(input) {
        Err(Error::Syntax(err)) => err,
        other => panic!("expected syntax error for {input:?}, got {other:?}"),
    }
}

/// Helper: format a map, parse it back, assert equality.
pub fn assert_map_roundtrip(original: &EnvMap) {
    let formatted = format(original);
    let parsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });
    assert_eq!(
        original, &parsed,
        "map mismatch\n--- formatted ---\n{formatted}"
    );
}
