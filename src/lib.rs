//! jmltally - proof-script statistics for JML-annotated Java.
//!
//! jmltally scans a Java source file annotated with JML (`/*@ ... */` blocks
//! and `//@` lines), classifies every annotation by its leading keyword, and
//! counts the KeY proof-script commands inside `assert ... \by { ... }`
//! scripts. Counts are aggregated per method group and reported as a
//! `;`-delimited table plus one dump file per script annotation.
//!
//! # Architecture
//!
//! The pipeline is a straight line from source text to report:
//!
//! - `jml`: annotation extraction, classification, and line filtering
//! - `stats`: the command vocabulary and per-annotation/per-group tallies
//! - `profile`: YAML case-study profiles (source path, output layout, groups)
//! - `report`: the stats table, dump files, and console output
//!
//! # Adding a Case Study
//!
//! Run `jmltally init` and edit the generated profile; the `ips4o` template
//! is a fully worked example.

pub mod cli;
pub mod jml;
pub mod profile;
pub mod report;
pub mod stats;

pub use jml::{
    classify, extract_annotations, filter_annotations, Annotation, AnnotationKind,
    FilteredAnnotation, ScanError,
};
pub use profile::Profile;
pub use report::JsonReport;
pub use stats::{GroupStat, ScriptStat, VALID_COMMANDS};
