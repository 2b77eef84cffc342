//! CLI argument definitions for kidchart.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use growth_model::{CalendarDate, Gender, MeasurementType, ModelError, Standard};
use growth_standards::REFERENCE_DIR_ENV_VAR;
use growth_store::{DEFAULT_STORE_FILE, STORE_ENV_VAR};

#[derive(Parser)]
#[command(
    name = "kidchart",
    version,
    about = "Child growth percentiles against WHO and NHS reference charts",
    long_about = "Track children's height, weight and head circumference and place\n\
                  each measurement in its WHO or NHS (UK-WHO) percentile band."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow measurement values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Read reference tables from this directory instead of the built-in data.
    #[arg(
        long = "reference-dir",
        value_name = "DIR",
        env = REFERENCE_DIR_ENV_VAR,
        global = true
    )]
    pub reference_dir: Option<PathBuf>,

    /// Child list file.
    #[arg(
        long = "store",
        value_name = "PATH",
        env = STORE_ENV_VAR,
        default_value = DEFAULT_STORE_FILE,
        global = true
    )]
    pub store: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Age in days between a date of birth and a measurement date.
    Age(AgeArgs),

    /// Render a day count as a readable age.
    FormatAge(FormatAgeArgs),

    /// Place a measured value in its percentile band.
    Classify(ClassifyArgs),

    /// Reference values at an exact age.
    Interpolate(InterpolateArgs),

    /// Reference curves sampled at regular ages.
    Curve(CurveArgs),

    /// List the registered reference tables.
    Tables,

    /// Manage children.
    #[command(subcommand)]
    Child(ChildCommand),

    /// Manage measurements.
    #[command(subcommand)]
    Measure(MeasureCommand),

    /// Classify every measurement of a child.
    Report(ReportArgs),

    /// Chart series (curves and measured points) for one child as JSON.
    Chart(ChartArgs),
}

#[derive(Args)]
pub struct AgeArgs {
    /// Date of birth (YYYY-MM-DD or dd/mm/yyyy).
    #[arg(value_name = "DATE_OF_BIRTH", value_parser = parse_date)]
    pub date_of_birth: CalendarDate,

    /// Measurement date (YYYY-MM-DD or dd/mm/yyyy).
    #[arg(value_name = "DATE", value_parser = parse_date)]
    pub date: CalendarDate,
}

#[derive(Args)]
pub struct FormatAgeArgs {
    /// Age in days.
    #[arg(value_name = "DAYS")]
    pub days: u32,
}

/// Which reference table to use.
#[derive(Args)]
pub struct TableArgs {
    /// height, weight or head-circumference.
    #[arg(long, short = 'm', value_name = "TYPE")]
    pub measurement: MeasurementType,

    /// male or female.
    #[arg(long, short = 'g')]
    pub gender: Gender,

    /// Reference standard (WHO or NHS).
    #[arg(long, short = 's', default_value = "WHO")]
    pub standard: Standard,
}

/// Age given directly or from two dates.
#[derive(Args)]
#[group(required = true, multiple = true)]
pub struct AgeInput {
    /// Age in days.
    #[arg(long = "age-days", value_name = "DAYS", conflicts_with_all = ["dob", "date"])]
    pub age_days: Option<u32>,

    /// Date of birth; requires --date.
    #[arg(long, value_parser = parse_date, requires = "date")]
    pub dob: Option<CalendarDate>,

    /// Measurement date; requires --dob.
    #[arg(long, value_parser = parse_date, requires = "dob")]
    pub date: Option<CalendarDate>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub age: AgeInput,

    /// Measured value (cm or kg).
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Args)]
pub struct InterpolateArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub age: AgeInput,
}

#[derive(Args)]
pub struct CurveArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Days between samples.
    #[arg(long, default_value_t = 30)]
    pub step: u32,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Subcommand)]
pub enum ChildCommand {
    /// Add a child.
    Add(ChildAddArgs),

    /// List children.
    List,

    /// Remove a child and all of their measurements.
    Remove {
        /// Child id.
        id: String,
    },
}

#[derive(Args)]
pub struct ChildAddArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Date of birth (YYYY-MM-DD or dd/mm/yyyy).
    #[arg(long, value_parser = parse_date)]
    pub dob: CalendarDate,

    /// male or female.
    #[arg(long, short = 'g')]
    pub gender: Gender,
}

#[derive(Subcommand)]
pub enum MeasureCommand {
    /// Record measurements taken on one date.
    Add(MeasureAddArgs),

    /// Remove a measurement.
    Remove {
        /// Child id.
        child: String,
        /// Measurement id.
        id: String,
    },
}

#[derive(Args)]
pub struct MeasureAddArgs {
    /// Child id.
    #[arg(value_name = "CHILD_ID")]
    pub child: String,

    /// Measurement date (YYYY-MM-DD or dd/mm/yyyy).
    #[arg(long, value_parser = parse_date)]
    pub date: CalendarDate,

    /// Height or length in cm.
    #[arg(long, required_unless_present_any = ["weight", "head_circumference"])]
    pub height: Option<f64>,

    /// Weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Head circumference in cm.
    #[arg(long = "head-circumference", visible_alias = "hc")]
    pub head_circumference: Option<f64>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Child id.
    #[arg(value_name = "CHILD_ID")]
    pub child: String,

    /// Reference standard (WHO or NHS).
    #[arg(long, short = 's', default_value = "WHO")]
    pub standard: Standard,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Child id.
    #[arg(value_name = "CHILD_ID")]
    pub child: String,

    /// height, weight or head-circumference.
    #[arg(long, short = 'm', value_name = "TYPE")]
    pub measurement: MeasurementType,

    /// Reference standard (WHO or NHS).
    #[arg(long, short = 's', default_value = "WHO")]
    pub standard: Standard,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Accepts `YYYY-MM-DD` and `dd/mm/yyyy`.
pub fn parse_date(input: &str) -> Result<CalendarDate, ModelError> {
    if input.contains('/') {
        CalendarDate::parse_display(input)
    } else {
        CalendarDate::parse_iso(input)
    }
}
