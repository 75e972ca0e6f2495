//! `constraints` CLI: check weekly constraints for conflicts from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check a draft against stored constraints (existing read from stdin)
//! cat constraints.json | constraints check --candidate draft.json
//!
//! # Editing: skip the constraint's own stored version
//! constraints check -c edited.json -e constraints.json --exclude-id c1
//!
//! # Exit with status 2 when a conflict is found (for scripts)
//! constraints check -c draft.json -e constraints.json --fail-on-conflict
//!
//! # List every conflict, as JSON
//! constraints conflicts -c draft.json -e constraints.json --json
//!
//! # Validate a draft the way the form does
//! constraints validate -c draft.json
//!
//! # Free windows on Monday between 08:00 and 18:00 of at least 45 minutes
//! constraints free -e constraints.json --day monday --from 08:00 --to 18:00 --min 45
//! ```
//!
//! Logging goes to stderr; raise it with `-v`/`-vv`/`-vvv` or `RUST_LOG`.

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use constraint_engine::model::{constraints_from_json, draft_from_json};
use constraint_engine::{
    Constraint, ConstraintDraft, ConstraintId, ConflictVerdict, TimeOfDay, TimeRange, Weekday,
};

/// Exit status used by `check --fail-on-conflict` when a conflict is found.
const CONFLICT_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "constraints",
    version,
    about = "Check weekly unavailability windows for conflicts"
)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by the conflict commands.
#[derive(Args)]
struct ConflictInput {
    /// Draft constraint JSON file ("-" for stdin)
    #[arg(short, long)]
    candidate: String,
    /// Stored constraints JSON array file (reads from stdin if omitted)
    #[arg(short, long)]
    existing: Option<String>,
    /// Id of the constraint being edited, skipped during comparison
    #[arg(long)]
    exclude_id: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the first stored constraint the draft collides with
    Check {
        #[command(flatten)]
        input: ConflictInput,
        /// Exit with status 2 when a conflict is found
        #[arg(long)]
        fail_on_conflict: bool,
    },
    /// Report every stored constraint the draft collides with
    Conflicts {
        #[command(flatten)]
        input: ConflictInput,
    },
    /// Validate a draft constraint (name, days, time range)
    Validate {
        /// Draft constraint JSON file ("-" for stdin)
        #[arg(short, long)]
        candidate: String,
    },
    /// List free windows on a weekday
    Free {
        /// Stored constraints JSON array file (reads from stdin if omitted)
        #[arg(short, long)]
        existing: Option<String>,
        /// Day to inspect (monday..sunday)
        #[arg(short, long)]
        day: Weekday,
        /// Start of the window to inspect
        #[arg(long, default_value = "00:00")]
        from: TimeOfDay,
        /// End of the window to inspect (exclusive; 24:00 is not a time of day,
        /// so the default leaves out the last minute, 23:59-24:00)
        #[arg(long, default_value = "23:59")]
        to: TimeOfDay,
        /// Only show the first window lasting at least this many minutes
        #[arg(long)]
        min: Option<u16>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            input,
            fail_on_conflict,
        } => {
            let (candidate, existing) = load_conflict_input(&input)?;
            let exclude = input.exclude_id.map(ConstraintId::from);

            let verdict =
                constraint_engine::detect_conflict(&candidate, &existing, exclude.as_ref());

            if input.json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                println!("{}", describe_verdict(&verdict));
            }

            if fail_on_conflict && verdict.has_conflict() {
                process::exit(CONFLICT_EXIT_CODE);
            }
        }
        Commands::Conflicts { input } => {
            let (candidate, existing) = load_conflict_input(&input)?;
            let exclude = input.exclude_id.map(ConstraintId::from);

            let conflicts =
                constraint_engine::find_all_conflicts(&candidate, &existing, exclude.as_ref());

            if input.json {
                println!("{}", serde_json::to_string_pretty(&conflicts)?);
            } else if conflicts.is_empty() {
                println!("No conflicts.");
            } else {
                for conflict in &conflicts {
                    println!(
                        "{} ({} min/day)",
                        describe_constraint(&conflict.constraint, &conflict.overlapping_days),
                        conflict.overlap_minutes
                    );
                }
            }
        }
        Commands::Validate { candidate } => {
            let draft = read_draft(&candidate)?;
            draft
                .validate()
                .with_context(|| format!("Constraint '{}' is invalid", draft.name))?;
            println!("Constraint '{}' is valid.", draft.name);
        }
        Commands::Free {
            existing,
            day,
            from,
            to,
            min,
            json,
        } => {
            let constraints = read_constraints(existing.as_deref())?;
            let window = TimeRange::new(from, to);
            anyhow::ensure!(!window.is_empty(), "--from {} must be before --to {}", from, to);

            let windows = match min {
                Some(min) => {
                    constraint_engine::find_first_free_window(&constraints, day, window, min)
                        .into_iter()
                        .collect()
                }
                None => constraint_engine::find_free_windows(&constraints, day, window),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&windows)?);
            } else if windows.is_empty() {
                println!("No free time on {} between {}.", day, window);
            } else {
                for w in &windows {
                    println!("{}-{} ({} min)", w.start, w.end, w.duration_minutes);
                }
            }
        }
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries results; logs go to stderr.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn load_conflict_input(input: &ConflictInput) -> Result<(ConstraintDraft, Vec<Constraint>)> {
    if input.candidate == "-" && input.existing.as_deref().is_none_or(|p| p == "-") {
        anyhow::bail!("Only one of --candidate and --existing can be read from stdin");
    }
    let candidate = read_draft(&input.candidate)?;
    let existing = read_constraints(input.existing.as_deref())?;
    tracing::info!(
        candidate = %candidate.name,
        existing = existing.len(),
        "loaded constraints"
    );
    Ok((candidate, existing))
}

fn read_draft(path: &str) -> Result<ConstraintDraft> {
    let json = read_input(Some(path))?;
    draft_from_json(&json).with_context(|| format!("Failed to parse candidate constraint: {}", path))
}

fn read_constraints(path: Option<&str>) -> Result<Vec<Constraint>> {
    let json = read_input(path)?;
    constraints_from_json(&json).with_context(|| {
        format!(
            "Failed to parse existing constraints: {}",
            path.unwrap_or("<stdin>")
        )
    })
}

fn describe_constraint(constraint: &Constraint, days: &[Weekday]) -> String {
    let days: Vec<&str> = days.iter().map(|d| d.as_str()).collect();
    format!(
        "'{}' ({}) on {}, {}",
        constraint.name(),
        constraint.id,
        days.join(", "),
        constraint.time_range()
    )
}

fn describe_verdict(verdict: &ConflictVerdict) -> String {
    match verdict {
        ConflictVerdict::NoConflict => "No conflict.".to_string(),
        ConflictVerdict::Conflict {
            conflicting_constraint,
            overlapping_days,
        } => format!(
            "Conflicts with {}",
            describe_constraint(conflicting_constraint, overlapping_days)
        ),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
