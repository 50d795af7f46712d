//! The annotation scanner: a single forward pass over raw source text.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::classify::classify;
use super::types::Annotation;
use super::{BLOCK_END, BLOCK_START, LINE_START};

lazy_static! {
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
}

/// Malformed input that would otherwise send the scan out of bounds.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("block annotation opened on line {line} has no closing marker")]
    UnterminatedBlock { line: usize },
    #[error("method body brace on line {line} has no parameter list anywhere before it")]
    MissingParameterList { line: usize },
    #[error("method body brace on line {line} has no method name before its parameter list")]
    MissingMethodName { line: usize },
}

/// Scan `input` and return every annotation span in source order, each tagged
/// with the signature of the method body in effect at its position.
///
/// The scan visits every character exactly once and keeps two pieces of
/// state: the brace nesting depth, and the signature captured the last time
/// the depth entered 2 (a method body one level inside a type body). Braces
/// are counted wherever they occur, including inside comment and annotation
/// text; this tool scans substrings, it does not parse the language.
///
/// A block annotation runs from `/*@` to the first `*/` (markers included in
/// the content); a line annotation runs from `//@` to the end of the line
/// (terminator excluded), or to the end of input on the last line. A block
/// opened but never closed is a [`ScanError::UnterminatedBlock`].
pub fn extract_annotations(input: &str) -> Result<Vec<Annotation>, ScanError> {
    let mut annotations = Vec::new();
    let mut signature = String::new();
    let mut depth: i32 = 0;
    let mut line: usize = 1;

    for (i, ch) in input.char_indices() {
        let rest = &input[i..];
        if rest.starts_with(BLOCK_START) {
            let span = match rest.find(BLOCK_END) {
                Some(end) => &rest[..end + BLOCK_END.len()],
                None => return Err(ScanError::UnterminatedBlock { line }),
            };
            annotations.push(Annotation {
                signature: signature.clone(),
                content: span.to_string(),
                kind: classify(span),
                line,
            });
        } else if rest.starts_with(LINE_START) {
            let span = match rest.find('\n') {
                Some(end) => &rest[..end],
                None => rest,
            };
            annotations.push(Annotation {
                signature: signature.clone(),
                content: span.to_string(),
                kind: classify(span),
                line,
            });
        } else if ch == '{' {
            depth += 1;
            if depth == 2 {
                signature = signature_before(input, i, line)?;
            }
        } else if ch == '}' {
            depth -= 1;
        }

        if ch == '\n' {
            line += 1;
        }
    }

    Ok(annotations)
}

/// Recover `name(params)` for the method whose body opens at byte `brace`.
///
/// Walks backward to the nearest `(`, then further back to the nearest space
/// before it. The name is the trimmed text between the space and the `(`;
/// the parameter list is the trimmed text from the `(` up to the brace, with
/// every whitespace run collapsed to a single space so that signatures split
/// across lines compare equal. Both searched characters are ASCII, so the
/// byte positions found are always valid slice boundaries.
fn signature_before(input: &str, brace: usize, line: usize) -> Result<String, ScanError> {
    let bytes = input.as_bytes();

    let open = match (0..brace).rev().find(|&p| bytes[p] == b'(') {
        Some(p) => p,
        None => return Err(ScanError::MissingParameterList { line }),
    };
    let space = match (0..open).rev().find(|&p| bytes[p] == b' ') {
        Some(p) => p,
        None => return Err(ScanError::MissingMethodName { line }),
    };

    let name = input[space..open].trim();
    let params = input[open..brace].trim();
    Ok(format!("{}{}", name, WHITESPACE_RUNS.replace_all(params, " ")))
}
