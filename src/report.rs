//! Output formatting for script statistics.
//!
//! Supports three console formats:
//! - CSV: the raw `;`-delimited table, byte-identical to the stats.csv file
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//!
//! Also writes the per-annotation dump files that accompany the table.

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::jml::FilteredAnnotation;
use crate::stats::{select_group, GroupStat, ScriptStat};

// =============================================================================
// CSV table
// =============================================================================

/// Render the aggregated counts as the `;`-delimited table.
///
/// The header row lists `method name` and the commands in lexicographic order
/// with no trailing delimiter; every data row carries one after its last
/// count. That asymmetry is the established on-disk format and stays.
pub fn render_table(groups: &[GroupStat], commands: &[&str]) -> String {
    let mut table = String::from("method name");
    for command in commands {
        table.push(';');
        table.push_str(command);
    }
    table.push('\n');

    for group in groups {
        table.push_str(&group.method);
        table.push(';');
        for command in commands {
            table.push_str(&group.total.count(command).to_string());
            table.push(';');
        }
        table.push('\n');
    }

    table
}

/// Write the table to `path`, creating the parent directory when missing.
pub fn write_table_file(path: &Path, table: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, table)?;
    Ok(())
}

// =============================================================================
// Annotation dump files
// =============================================================================

/// Replace the characters that are unsafe in file names: `\ $ ? | < > :`
/// become `_`, `*` becomes `+`, `"` becomes `'`, `/` becomes `-`, and the
/// brackets `[` `]` become parentheses.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '$' | '?' | '|' | '<' | '>' | ':' => '_',
            '*' => '+',
            '"' => '\'',
            '/' => '-',
            '[' => '(',
            ']' => ')',
            other => other,
        })
        .collect()
}

/// Write one annotation's raw text to `<stem>_<signature>_<n>.txt` under
/// `dir`, probing the file system and bumping `n` from 0 until a free name
/// turns up. Returns the path written.
pub fn write_dump(
    dir: &Path,
    stem: &str,
    annotation: &FilteredAnnotation,
) -> anyhow::Result<PathBuf> {
    let base = sanitize_file_name(annotation.signature());
    let mut counter = 0u32;
    let path = loop {
        let candidate = dir.join(format!("{}_{}_{}.txt", stem, base, counter));
        if !candidate.exists() {
            break candidate;
        }
        counter += 1;
    };
    fs::write(&path, format!("{}\n", annotation.raw.content))?;
    Ok(path)
}

/// Write the dump file of every script annotation, walking the groups in
/// order. The unfiltered span text goes to disk, not the filtered view the
/// counts were taken from. Returns the number of files written.
pub fn write_dumps(
    dir: &Path,
    stem: &str,
    stats: &[ScriptStat],
    groups: &[String],
) -> anyhow::Result<usize> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for prefix in groups {
        for stat in select_group(stats, prefix) {
            if let Some(annotation) = &stat.annotation {
                write_dump(dir, stem, annotation)?;
                written += 1;
            }
        }
    }
    Ok(written)
}

// =============================================================================
// JSON format
// =============================================================================

/// JSON report structure for the `json` console format.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub source: String,
    pub annotations: usize,
    pub scripts: usize,
    pub groups: Vec<JsonGroup>,
}

/// One method group with its zero-filled command counts.
#[derive(Serialize, Deserialize)]
pub struct JsonGroup {
    pub method: String,
    pub scripts: usize,
    pub commands: BTreeMap<String, u32>,
}

/// Write the statistics as pretty-printed JSON to stdout.
pub fn write_json(
    source: &str,
    annotations: usize,
    scripts: usize,
    groups: &[GroupStat],
    commands: &[&str],
) -> anyhow::Result<()> {
    let groups: Vec<JsonGroup> = groups
        .iter()
        .map(|g| JsonGroup {
            method: g.method.clone(),
            scripts: g.scripts,
            commands: commands
                .iter()
                .map(|&c| (c.to_string(), g.total.count(c)))
                .collect(),
        })
        .collect();

    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: source.to_string(),
        annotations,
        scripts,
        groups,
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty format
// =============================================================================

/// Write a colored, human-readable summary to stdout.
pub fn write_pretty(
    source: &str,
    annotations: usize,
    scripts: usize,
    groups: &[GroupStat],
    commands: &[&str],
) {
    println!();
    print!("  ");
    print!("{}", "jmltally".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Source:      ".dimmed());
    println!("{}", source);
    print!("  {}", "Annotations: ".dimmed());
    println!("{}", annotations);
    print!("  {}", "Scripts:     ".dimmed());
    println!("{}", scripts);
    println!();

    println!("  {}", "Method groups:".bold());
    for group in groups {
        let summary = command_summary(group, commands);
        print!("    {:<58}", group.method);
        if summary.is_empty() {
            println!(" {}", "no script commands".dimmed());
        } else {
            println!(" {}", summary);
        }
    }
    println!();
}

fn command_summary(group: &GroupStat, commands: &[&str]) -> String {
    let mut parts = Vec::new();
    for &command in commands {
        let n = group.total.count(command);
        if n > 0 {
            parts.push(format!("{}={}", command, n));
        }
    }
    parts.join(" ")
}
