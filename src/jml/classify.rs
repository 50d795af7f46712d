//! Keyword-based annotation classification.

use super::types::AnnotationKind;

/// Classify an annotation by the keywords in its text.
///
/// The first three characters (the opening marker) are dropped, the rest is
/// trimmed, and the keyword tests run in a fixed order with the first match
/// winning. The order is load-bearing: an `assert` that mentions `requires `
/// in its condition is still an assert, never a contract. The `\by` lookup is
/// a plain substring test and also matches inside nested comments; that
/// over-approximation is accepted.
pub fn classify(content: &str) -> AnnotationKind {
    let body = content.get(3..).unwrap_or("").trim();

    if body.starts_with("assert") {
        if body.contains("\\by") {
            AnnotationKind::AssertScript
        } else {
            AnnotationKind::Assert
        }
    } else if body.starts_with("set ") {
        AnnotationKind::SetStatement
    } else if body.starts_with("loop_invariant") {
        AnnotationKind::LoopInvariant
    } else if body.contains("requires ") {
        AnnotationKind::Contract
    } else if body.contains("model ") {
        AnnotationKind::ModelMethod
    } else if body.contains("ghost ") {
        AnnotationKind::GhostDecl
    } else if body.contains("pure") || body.contains("non_null") || body.contains("nullable") {
        AnnotationKind::Annotation
    } else {
        AnnotationKind::Unknown
    }
}
