//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::ChatTable;
use chatlens::cli::{AnalyzeArgs, Args, Command, RangeArgs};
use chatlens::config::AnalysisConfig;
use chatlens::core::{Selection, apply_filters};
use chatlens::core::output::write_artifacts;
use chatlens::parser::{ParseReport, WhatsAppParser};
use chatlens::report::{AnalysisContext, analyze, render_messages, render_text};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), ChatlensError> {
    match args.command {
        Command::Analyze(analyze_args) => run_analyze(&analyze_args),
        Command::Users { input } => run_users(&input),
        Command::Show { input, range } => run_show(&input, &range),
    }
}

fn run_analyze(args: &AnalyzeArgs) -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let filter = args.filter_config()?;

    // Print header
    println!("🔍 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("👤 User:    {}", filter.selection);
    if let Some(ref start) = args.range.start {
        println!("📅 Start:   {}", start);
    }
    if let Some(ref end) = args.range.end {
        println!("📅 End:     {}", end);
    }
    if !args.no_artifacts {
        println!("💾 Output:  {}", args.out_dir.display());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(top) = args.top {
        config = config.with_top_words(top);
    }

    let (table, _) = parse(&args.input)?;

    if filter.is_inverted() {
        println!("⚠️  Start date is after end date; nothing to analyze");
    }
    if let Selection::User(name) = &filter.selection {
        if !table.users().contains(&name.as_str()) {
            println!("⚠️  No messages from '{}' in this chat", name);
        }
    }

    let ctx = AnalysisContext::new(table)
        .with_filter(filter)
        .with_config(config);
    let report = analyze(&ctx)?;

    let stdout = io::stdout();
    render_text(&report, &mut stdout.lock())?;

    println!();
    if args.no_artifacts {
        println!("⏭️  Skipping artifacts (--no-artifacts)");
    } else {
        for path in write_artifacts(&report, &args.out_dir, args.json)? {
            println!("💾 Wrote {}", path.display());
        }
    }

    println!();
    println!("✅ Done! Analyzed {} messages", report.summary.messages);
    println!(
        "⚡ Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn run_users(input: &Path) -> Result<(), ChatlensError> {
    let (table, _) = parse(input)?;
    let mut stdout = io::stdout().lock();
    for user in table.selectable_users() {
        writeln!(stdout, "{}", user)?;
    }
    Ok(())
}

fn run_show(input: &Path, range: &RangeArgs) -> Result<(), ChatlensError> {
    let filter = range.filter_config()?;
    let (table, _) = parse(input)?;
    let view = apply_filters(&table, &filter);
    render_messages(&view, &mut io::stdout().lock())
}

/// Parse the export and log what was found
fn parse(input: &Path) -> Result<(ChatTable, ParseReport), ChatlensError> {
    let start = Instant::now();
    let (table, report) = WhatsAppParser::new().parse_file_with_report(input)?;
    tracing::info!(
        messages = report.messages,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "parsed {}",
        input.display()
    );
    Ok((table, report))
}

#[cfg(feature = "json-output")]
fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ChatlensError> {
    match path {
        Some(path) => AnalysisConfig::from_json_file(path),
        None => Ok(AnalysisConfig::default()),
    }
}

#[cfg(not(feature = "json-output"))]
fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ChatlensError> {
    match path {
        Some(path) => Err(ChatlensError::config(
            Some(path.to_path_buf()),
            "config files need the json-output feature",
        )),
        None => Ok(AnalysisConfig::default()),
    }
}
