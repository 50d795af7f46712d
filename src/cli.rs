//! Command-line interface for jmltally.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::jml::{extract_annotations, filter_annotations, AnnotationKind};
use crate::profile::{self, Profile};
use crate::report;
use crate::stats::{self, ScriptStat};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Default profile file names to search for in the project directory.
const DEFAULT_PROFILE_NAMES: &[&str] = &["jmltally.yaml", ".jmltally.yaml"];

/// Count proof-script commands in JML-annotated Java sources.
///
/// jmltally scans one annotated source file, pulls out every JML annotation,
/// and tallies the proof-script commands found in `assert ... \by` scripts,
/// broken down by method group. It writes a `;`-delimited table plus one
/// dump file per script annotation, and ships with built-in settings for the
/// verified ips4o Sorter case study.
#[derive(Parser)]
#[command(name = "jmltally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count script commands in a project's annotations
    #[command(visible_alias = "run")]
    Count(CountArgs),
    /// Create a new case-study profile from a template
    Init(InitArgs),
}

/// Arguments for the count command.
#[derive(Parser)]
pub struct CountArgs {
    /// Project root containing the annotated sources
    pub project_dir: PathBuf,

    /// Path to profile YAML file (default: auto-discover, else built-ins)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Console output format: csv, pretty, or json
    #[arg(short, long, default_value = "csv")]
    pub format: String,

    /// Skip writing the per-annotation dump files
    #[arg(long)]
    pub skip_dumps: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "jmltally.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = "minimal")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available profile templates.
struct Template {
    name: &'static str,
    description: &'static str,
    content: &'static str,
}

/// All available templates.
static TEMPLATES: &[Template] = &[
    Template {
        name: "minimal",
        description: "Commented skeleton profile to fill in for a new case study",
        content: include_str!("templates/minimal.yaml"),
    },
    Template {
        name: "ips4o",
        description: "The verified ips4o Sorter case study (the built-in defaults)",
        content: include_str!("templates/ips4o.yaml"),
    },
];

/// Look for a profile file in the project directory.
fn discover_profile(project_dir: &Path) -> Option<PathBuf> {
    DEFAULT_PROFILE_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.exists())
}

/// Run the count command.
pub fn run_count(args: &CountArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "csv" && args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'csv', 'pretty', or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    if !args.project_dir.is_dir() {
        eprintln!("Error: not a directory: {}", args.project_dir.display());
        return Ok(EXIT_ERROR);
    }

    // Load the profile: explicit flag, discovered file, or the built-ins
    let profile = match &args.profile {
        Some(path) => match Profile::parse_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error reading profile {}: {}", path.display(), e);
                return Ok(EXIT_ERROR);
            }
        },
        None => match discover_profile(&args.project_dir) {
            Some(path) => match Profile::parse_file(&path) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error reading profile {}: {}", path.display(), e);
                    return Ok(EXIT_ERROR);
                }
            },
            None => Profile::default(),
        },
    };

    // Validate profile
    if let Err(e) = profile::validate(&profile) {
        eprintln!("Error: invalid profile: {}", e);
        return Ok(EXIT_ERROR);
    }

    // Read the annotated source
    let source_path = args.project_dir.join(&profile.source);
    let text = match std::fs::read_to_string(&source_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", source_path.display(), e);
            return Ok(EXIT_ERROR);
        }
    };

    // Extract and filter annotations, count the script commands
    let annotations = match extract_annotations(&text) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}: {}", source_path.display(), e);
            return Ok(EXIT_ERROR);
        }
    };
    let filtered = filter_annotations(&annotations);
    let scripts: Vec<ScriptStat> = filtered
        .iter()
        .filter(|a| a.kind() == AnnotationKind::AssertScript)
        .map(|a| stats::count_commands(a, &stats::VALID_COMMANDS))
        .collect();

    // Aggregate per method group
    let commands = stats::sorted_commands(&stats::VALID_COMMANDS);
    let grouped = stats::group_stats(&scripts, &profile.method_groups);

    // Write the annotation dumps
    if !args.skip_dumps {
        let dumps_dir = args.project_dir.join(profile.dumps_dir());
        report::write_dumps(
            &dumps_dir,
            &profile.dump_stem(),
            &scripts,
            &profile.method_groups,
        )?;
    }

    // Write the table file
    let table = report::render_table(&grouped, &commands);
    let stats_path = args.project_dir.join(profile.stats_path());
    report::write_table_file(&stats_path, &table)?;

    // Console output
    let source_str = profile.source.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => {
            report::write_json(
                &source_str,
                annotations.len(),
                scripts.len(),
                &grouped,
                &commands,
            )?;
        }
        "pretty" => {
            report::write_pretty(
                &source_str,
                annotations.len(),
                scripts.len(),
                &grouped,
                &commands,
            );
        }
        _ => {
            print!("{}", table);
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // List mode
    if args.list {
        return list_templates();
    }

    // Find template
    let template = match TEMPLATES.iter().find(|t| t.name == args.template) {
        Some(t) => t,
        None => {
            eprintln!("Error: unknown template {:?}", args.template);
            eprintln!("Run 'jmltally init --list' to see available templates");
            return Ok(EXIT_ERROR);
        }
    };

    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    // Write profile file
    if let Err(e) = std::fs::write(&args.output, template.content) {
        eprintln!("Error: failed to write profile: {}", e);
        return Ok(EXIT_ERROR);
    }

    // Success message
    println!(
        "Created {} from template '{}'",
        args.output.display(),
        template.name
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit {} to point at your annotated source",
        args.output.display()
    );
    println!(
        "  2. Run: jmltally count . --profile {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}

/// List available templates.
fn list_templates() -> anyhow::Result<i32> {
    println!("Available templates:");
    println!();

    for template in TEMPLATES {
        let name = if template.name == "minimal" {
            format!("{} (default)", template.name)
        } else {
            template.name.to_string()
        };
        println!("  {:<20} {}", name, template.description);
    }

    println!();
    println!("Usage:");
    println!("  jmltally init --template <name>");

    Ok(EXIT_SUCCESS)
}
