//! # Spread Footing CLI
//!
//! Runs one footing design evaluation and prints the results table.
//!
//! ```text
//! footing_cli [INPUT] [--settings FILE] [--json] [--write-default FILE]
//! ```
//!
//! `INPUT` is a `.ftg` file (or bare input JSON); the default footing is used
//! when omitted. The workbook evaluator comes from the settings file or the
//! `FOOTING_EVALUATOR` environment variable.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use footing_core::file_io::{load_input, save_input};
use footing_core::report::CheckItem;
use footing_core::settings::ENV_EVALUATOR;
use footing_core::{compute_view, CalcError, CalcResult, FootingInput, FootingView, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Usage: footing_cli [INPUT] [--settings FILE] [--json] [--write-default FILE]";

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    settings: Option<PathBuf>,
    json: bool,
    write_default: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = Some(iter.next().ok_or("--settings needs a file")?.into());
            }
            "--write-default" => {
                args.write_default = Some(iter.next().ok_or("--write-default needs a file")?.into());
            }
            "--json" => args.json = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option {}\n{}", flag, USAGE)),
            path => {
                if args.input.is_some() {
                    return Err(format!("Only one input file is accepted\n{}", USAGE));
                }
                args.input = Some(path.into());
            }
        }
    }

    Ok(args)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footing_core=info,footing_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> CalcResult<()> {
    if let Some(path) = &args.write_default {
        save_input(&FootingInput::default(), path)?;
        println!("Wrote default footing to {}", path.display());
        return Ok(());
    }

    let input = match &args.input {
        Some(path) => load_input(path)?,
        None => FootingInput::default(),
    };

    let settings = Settings::load(args.settings.as_deref())?;
    let evaluator = settings.evaluator.clone().ok_or_else(|| {
        CalcError::evaluation_failure(format!(
            "No workbook evaluator configured; set {} or add \"evaluator\" to the settings file",
            ENV_EVALUATOR
        ))
    })?;

    tracing::info!(label = %input.label, program = %evaluator.program, "running footing evaluation");

    let view = compute_view(&input, Arc::new(evaluator), &settings)?;

    print_input(&input);
    print_results(&view);

    if args.json {
        println!();
        println!("JSON Output:");
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    Ok(())
}

fn print_input(input: &FootingInput) {
    println!("═══════════════════════════════════════");
    println!("  SPREAD FOOTING {}", input.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!(
        "  Loads:     D = {:.0} k, L = {:.0} k, q_allow = {:.1} ksf",
        input.loads.dead_load.0, input.loads.live_load.0, input.allowable_bearing.0
    );
    println!(
        "  Footing:   {:.0}\" x {:.0}\" x {:.0}\"",
        input.footing.width_x.0, input.footing.length_y.0, input.footing.thickness.0
    );
    println!("  Column:    {:.0}\" x {:.0}\"", input.column.width_x.0, input.column.length_y.0);
    println!("  Concrete:  f'c = {:.1} ksi, cover = {:.2}\"", input.fc.0, input.cover.0);
    println!("  X Bars:    {} {}", input.flexure_x.bar_count, input.flexure_x.bar_size);
    println!("  Y Bars:    {} {}", input.flexure_y.bar_count, input.flexure_y.bar_size);
    println!();
}

fn print_item(item: &CheckItem, indent: usize) {
    let name = format!("{}{}", " ".repeat(indent), item.title);
    println!(
        "  {:<20} {:<16} {:<8} {}",
        name,
        item.value_text,
        item.status.label,
        item.status.status.marker()
    );
    for child in &item.children {
        print_item(child, indent + 2);
    }
}

fn print_results(view: &FootingView) {
    let scene = &view.scene;
    println!("Reinforcement:");
    for layer in [&scene.x_bars, &scene.y_bars] {
        println!(
            "  {}-Dir:     {} bars @ {:.2}\" o.c., z = {:.3}\", hooks {:.2}\"",
            layer.direction, layer.bar_count, layer.spacing_in, layer.depth_in, layer.hook_length_in
        );
    }
    println!("  Segments:  {}", scene.segment_count());
    println!();

    println!("Design Checks:");
    for item in view.report.top_level() {
        print_item(item, 0);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} (governs: {}, code check: {})",
        view.report.overall_status(),
        view.report.governing_check(),
        view.report.code_check
    );
    println!("═══════════════════════════════════════");
}
