mod input;
mod model;
mod pipeline;
mod report;
mod vocab;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::model::selection::SelectionEvent;
use crate::pipeline::report::{ReportInputs, write_reports};
use crate::pipeline::session::Session;
use crate::vocab::{Vocabulary, group_by_id};

#[derive(Debug, Parser)]
#[command(
    name = "biasrank",
    version,
    about = "Rank language-model bias and quality scores across TELeR prompt-detail levels."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a dataset, apply the selection and write ranking reports.
    Run(RunArgs),
    /// Fold an updates JSON document into a base dataset document.
    Merge(MergeArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Dataset file, or a directory searched for data.json(.gz) /
    /// rankings.json(.gz)
    #[arg(long)]
    input: PathBuf,

    /// Output directory for rankings.tsv, report.txt and summary.json
    #[arg(long)]
    out: PathBuf,

    /// Temperature key (defaults to the dataset profile's default)
    #[arg(long)]
    temperature: Option<String>,

    /// Replace the default all-on selection with these short bias ids,
    /// comma separated (e.g. anchor,confirm)
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<String>>,

    /// Bulk-set a group, e.g. cognitive:on or social:off (repeatable,
    /// applied after --select)
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Toggle one short bias id after the bulk flags (repeatable)
    #[arg(long = "toggle")]
    toggles: Vec<String>,
}

#[derive(Debug, Args)]
struct MergeArgs {
    /// Base dataset document
    #[arg(long)]
    base: PathBuf,

    /// Updates document merged on top of the base
    #[arg(long)]
    updates: PathBuf,

    /// Where to write the merged document
    #[arg(long)]
    out: PathBuf,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_rankings(&args),
        Command::Merge(args) => input::merge::merge_files(&args.base, &args.updates, &args.out)
            .map_err(|e| e.to_string()),
    }
}

fn run_rankings(args: &RunArgs) -> Result<(), String> {
    let loaded = input::load_dataset(&args.input).map_err(|e| e.to_string())?;
    let events = selection_events(loaded.vocabulary, args)?;

    let mut session = Session::new(loaded.dataset, loaded.vocabulary);
    for event in events {
        session.apply(event);
    }

    tracing::info!(
        "selection: temperature={}, active_biases={}, recomputations={}",
        session.vocabulary().temperatures[session.selection().temperature],
        session.selection().active.len(),
        session.recompute_count()
    );
    match session.current().rows() {
        Some(rows) => tracing::info!("ranked {} models", rows.len()),
        None => tracing::info!("empty selection; rendering guidance instead of a table"),
    }

    let inputs = ReportInputs {
        aggregation: session.current(),
        dataset: session.dataset(),
        vocabulary: session.vocabulary(),
        selection: session.selection(),
        audits: &loaded.audits,
        tool_name: "biasrank".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(Path::new(".")),
    };
    write_reports(&inputs, &args.out).map_err(|e| e.to_string())
}

/// Translates the selection flags into the event sequence applied on top of
/// the default all-on selection: temperature first, then --select (clear +
/// toggles), then --group bulk sets, then single --toggle flags.
fn selection_events(
    vocabulary: &Vocabulary,
    args: &RunArgs,
) -> Result<Vec<SelectionEvent>, String> {
    let mut events = Vec::new();

    if let Some(temperature) = &args.temperature {
        let idx = vocabulary.temperature_index(temperature).ok_or_else(|| {
            format!(
                "invalid --temperature {} (valid: {})",
                temperature,
                vocabulary.temperatures.join(", ")
            )
        })?;
        events.push(SelectionEvent::SetTemperature(idx));
    }

    if let Some(ids) = &args.select {
        events.push(SelectionEvent::SetAll(false));
        for id in ids {
            events.push(SelectionEvent::ToggleBias(resolve_bias_id(vocabulary, id)?));
        }
    }

    for flag in &args.groups {
        let (group, on) = parse_group_flag(flag)?;
        events.push(SelectionEvent::SetGroup { group, on });
    }

    for id in &args.toggles {
        events.push(SelectionEvent::ToggleBias(resolve_bias_id(vocabulary, id)?));
    }

    Ok(events)
}

fn resolve_bias_id(vocabulary: &Vocabulary, id: &str) -> Result<usize, String> {
    vocabulary.bias_by_id(id).ok_or_else(|| {
        let known = vocabulary
            .biases
            .iter()
            .map(|b| b.id)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "unknown bias id {} for the {} profile (valid: {})",
            id, vocabulary.profile, known
        )
    })
}

fn parse_group_flag(flag: &str) -> Result<(crate::vocab::BiasGroup, bool), String> {
    let (name, state) = flag
        .split_once(':')
        .ok_or_else(|| format!("invalid --group {} (use <name>:<on|off>)", flag))?;
    let group =
        group_by_id(name).ok_or_else(|| format!("unknown group {} (valid: content, cognitive, social)", name))?;
    let on = match state {
        "on" => true,
        "off" => false,
        _ => return Err(format!("invalid --group state {} (use on|off)", state)),
    };
    Ok((group, on))
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}
