//! Core types for extracted JML annotations.

use serde::{Deserialize, Serialize};

/// Kinds of JML annotations, assigned once at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// An `assert` without an embedded proof script.
    Assert,
    /// An `assert` carrying a `\by` proof script.
    AssertScript,
    /// A modifier such as `pure`, `non_null`, or `nullable`.
    Annotation,
    /// A method contract (`requires`/`ensures` clauses).
    Contract,
    /// A `ghost` variable declaration.
    GhostDecl,
    /// A `loop_invariant` clause.
    LoopInvariant,
    /// A `model` method.
    ModelMethod,
    /// A `set` statement assigning a ghost variable.
    SetStatement,
    /// Anything the keyword heuristics do not recognize.
    Unknown,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Assert => "assert",
            AnnotationKind::AssertScript => "assert_script",
            AnnotationKind::Annotation => "annotation",
            AnnotationKind::Contract => "contract",
            AnnotationKind::GhostDecl => "ghost_decl",
            AnnotationKind::LoopInvariant => "loop_invariant",
            AnnotationKind::ModelMethod => "model_method",
            AnnotationKind::SetStatement => "set_statement",
            AnnotationKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single annotation span lifted out of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Signature of the most recently entered method body, normalized to
    /// single spaces. Empty when the annotation precedes every method body.
    pub signature: String,
    /// The full span text. Block annotations include both markers; line
    /// annotations include the opening marker and run to the line end.
    pub content: String,
    pub kind: AnnotationKind,
    /// 1-indexed source line of the opening marker.
    pub line: usize,
}

impl Annotation {
    /// True for annotations whose `assert` carries an embedded proof script.
    pub fn is_script(&self) -> bool {
        self.kind == AnnotationKind::AssertScript
    }
}
