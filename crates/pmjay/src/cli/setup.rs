use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pmjayapp::model::{parse_date, Gender, DATE_FORMAT};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pmjay", bin_name = "pmjay", version)]
#[command(about = "Fill and print PMJAY admission slips", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Config file (takes priority over ./pmjay.toml)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Record file to use instead of the configured data_file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one slip page per day of a stay
    #[command(alias = "g", display_order = 1)]
    Generate {
        #[command(flatten)]
        record: RecordArgs,

        /// Number of days (pages), starting at --date
        #[arg(long, default_value_t = 1)]
        days: u32,

        /// Output PDF (defaults to the configured output_file)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Remember the record after rendering
        #[arg(long)]
        save: bool,

        /// Send the rendered PDF to the printer
        #[arg(long)]
        print: bool,
    },

    /// Remember a record without rendering it
    #[command(display_order = 2)]
    Save {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Find stored records by name
    #[command(display_order = 3)]
    Search { name: String },

    /// List stored records, newest first
    #[command(alias = "ls", display_order = 4)]
    List,
}

/// Record fields. Unset fields come from `--from` or defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Start from the newest stored record whose name contains NAME
    #[arg(long, value_name = "NAME")]
    pub from: Option<String>,

    /// Patient name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub diagnosis: Option<String>,

    /// M or F
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Date of the first page (default: today)
    #[arg(long, value_parser = parse_date_arg, value_name = "DD/MM/YYYY")]
    pub date: Option<NaiveDate>,

    /// Date of admission (default: today)
    #[arg(long = "admitted", value_parser = parse_date_arg, value_name = "DD/MM/YYYY")]
    pub date_of_admission: Option<NaiveDate>,

    /// Date of birth (default: today)
    #[arg(long = "born", value_parser = parse_date_arg, value_name = "DD/MM/YYYY")]
    pub date_of_birth: Option<NaiveDate>,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|_| {
        format!(
            "invalid date {:?}, expected {}",
            value,
            DATE_FORMAT.replace("%d", "dd").replace("%m", "mm").replace("%Y", "yyyy")
        )
    })
}
