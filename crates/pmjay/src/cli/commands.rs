//! # CLI Layer
//!
//! The CLI layer is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_tracing()`: Installs the `tracing` subscriber
//! - `build_record()`: Merges flags with a `--from` record and defaults
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::render::{print_json, print_messages, print_records};
use super::setup::{Cli, Commands, RecordArgs};
use chrono::{Local, NaiveDate};
use clap::Parser;
use pmjayapp::api::PmjayApi;
use pmjayapp::commands::CmdResult;
use pmjayapp::error::{PmjayError, Result};
use pmjayapp::init::initialize;
use pmjayapp::model::FormRecord;
use pmjayapp::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_TARGETS: [&str; 2] = ["pmjay", "pmjayapp"];

struct AppContext {
    api: PmjayApi<FsBackend>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let pmjay_ctx = initialize(&cwd, cli.config.clone(), cli.data.clone())?;
    tracing::debug!(data_file = %pmjay_ctx.config.data_file.display(), "context ready");

    let mut ctx = AppContext {
        api: pmjay_ctx.api,
        json: cli.json,
    };

    match cli.command {
        Commands::Generate {
            record,
            days,
            output,
            save,
            print,
        } => handle_generate(&mut ctx, record, days, output.as_deref(), save, print),
        Commands::Save { record } => handle_save(&mut ctx, record),
        Commands::Search { name } => handle_search(&mut ctx, &name),
        Commands::List => handle_list(&mut ctx),
    }
}

/// `RUST_LOG` alone decides filtering when set; otherwise pmjay logs warnings,
/// or everything down to debug with `-v`.
fn init_tracing(verbose: bool) -> Result<()> {
    let mut filter = EnvFilter::from_default_env();
    if verbose || std::env::var_os("RUST_LOG").is_none() {
        let level = if verbose { "debug" } else { "warn" };
        for target in LOG_TARGETS {
            let directive = format!("{target}={level}")
                .parse::<Directive>()
                .map_err(|e| PmjayError::Config(format!("bad log directive: {e}")))?;
            filter = filter.add_directive(directive);
        }
    }

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    Ok(())
}

fn handle_generate(
    ctx: &mut AppContext,
    args: RecordArgs,
    days: u32,
    output: Option<&Path>,
    save: bool,
    print: bool,
) -> Result<()> {
    let base = lookup_base(ctx, args.from.as_deref())?;
    let record = build_record(base, args, today())?;

    let result = ctx.api.generate(record, days, output, save)?;
    show(ctx, &result, false)?;

    if print {
        let document = result
            .document
            .ok_or_else(|| PmjayError::Api("nothing was rendered".to_string()))?;
        let printed = ctx.api.print_document(&document)?;
        show(ctx, &printed, false)?;
    }
    Ok(())
}

fn handle_save(ctx: &mut AppContext, args: RecordArgs) -> Result<()> {
    let base = lookup_base(ctx, args.from.as_deref())?;
    let record = build_record(base, args, today())?;
    let result = ctx.api.save_record(record)?;
    show(ctx, &result, false)
}

fn handle_search(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.find_records(name)?;
    show(ctx, &result, true)
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_records()?;
    show(ctx, &result, true)
}

fn show(ctx: &AppContext, result: &CmdResult, with_records: bool) -> Result<()> {
    if ctx.json {
        return print_json(result);
    }
    if with_records {
        print_records(&result.records);
    }
    print_messages(&result.messages);
    Ok(())
}

/// The newest stored record matching `from`, if one was asked for.
fn lookup_base(ctx: &mut AppContext, from: Option<&str>) -> Result<Option<FormRecord>> {
    let Some(query) = from else {
        return Ok(None);
    };
    let found = ctx.api.find_records(query)?;
    found
        .records
        .into_iter()
        .next()
        .map(Some)
        .ok_or_else(|| PmjayError::Api(format!("no stored record matches \"{}\"", query.trim())))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Merge command-line fields over `base`. Without a base, a name is required
/// and every date defaults to `today`.
fn build_record(base: Option<FormRecord>, args: RecordArgs, today: NaiveDate) -> Result<FormRecord> {
    let mut record = match base {
        Some(record) => record,
        None => {
            let name = args
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| {
                    PmjayError::Api("--name is required unless --from is given".to_string())
                })?;
            FormRecord::new(name, "", "", today, today, today)
        }
    };

    if let Some(name) = args.name {
        record.name = name;
    }
    if let Some(address) = args.address {
        record.address = address;
    }
    if let Some(diagnosis) = args.diagnosis {
        record.diagnosis = diagnosis;
    }
    if let Some(gender) = args.gender {
        record.gender = Some(gender);
    }
    if let Some(date) = args.date {
        record.date = date;
    }
    if let Some(date) = args.date_of_admission {
        record.date_of_admission = date;
    }
    if let Some(date) = args.date_of_birth {
        record.date_of_birth = date;
    }
    Ok(record)
}
