//! Line-level cleanup of extracted annotations.

use super::types::{Annotation, AnnotationKind};
use super::LINE_START;

/// A raw annotation paired with its comment-stripped content.
///
/// Dump files are written from the raw text, command counting runs over the
/// filtered text, so both views travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredAnnotation {
    /// The annotation exactly as extracted.
    pub raw: Annotation,
    /// Content with blank, comment-only, and decorative lines removed.
    pub content: String,
}

impl FilteredAnnotation {
    pub fn signature(&self) -> &str {
        &self.raw.signature
    }

    pub fn kind(&self) -> AnnotationKind {
        self.raw.kind
    }
}

/// Drop every line of an annotation that carries no specification text:
/// blank lines, bare `@` continuation markers, plain `//` comments (line
/// annotations starting `//@` stay), and the decorative `@ //` pattern.
/// Surviving lines keep their order and are rejoined with `\n`; the result
/// is stable under repeated filtering.
pub fn filter_annotations(annotations: &[Annotation]) -> Vec<FilteredAnnotation> {
    annotations
        .iter()
        .map(|a| {
            let content = a
                .content
                .lines()
                .filter(|l| keep_line(l))
                .collect::<Vec<_>>()
                .join("\n");
            FilteredAnnotation {
                raw: a.clone(),
                content,
            }
        })
        .collect()
}

fn keep_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed != "@"
        && !(trimmed.starts_with("//") && !trimmed.starts_with(LINE_START))
        && !trimmed.starts_with("@ //")
}
