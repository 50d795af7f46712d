//! JML annotation handling: extraction, classification, filtering.
//!
//! [`extract_annotations`] performs the single scan over the source text and
//! yields [`Annotation`] values already classified by [`classify`];
//! [`filter_annotations`] strips the lines that carry no specification text
//! while keeping the raw span around for dump output.

pub mod classify;
pub mod extract;
pub mod filter;
pub mod types;

pub use classify::classify;
pub use extract::{extract_annotations, ScanError};
pub use filter::{filter_annotations, FilteredAnnotation};
pub use types::{Annotation, AnnotationKind};

/// Opening marker of a block annotation.
pub const BLOCK_START: &str = "/*@";
/// Closing marker of a block annotation.
pub const BLOCK_END: &str = "*/";
/// Opening marker of a line annotation.
pub const LINE_START: &str = "//@";
