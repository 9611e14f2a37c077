use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use compiler::{compile_reader, CompileLimits, Mode, PoolImage, RunParams};
use tracing::Level;
use vtpool_tools::{format_table, CompileReport, PoolStats};

#[derive(Parser)]
#[command(
    name = "vtpool",
    version,
    about = "Compile XML object pool descriptions into ISO 11783-6 pools"
)]
struct Cli {
    /// XML object pool description.
    input: PathBuf,
    /// Where to write the pool.
    output: PathBuf,
    /// Data mask width and height of the target terminal.
    #[arg(short = 'd', long)]
    dimension: Option<u32>,
    /// Soft key designator width of the target terminal.
    #[arg(long = "sw")]
    sk_width: Option<u32>,
    /// Soft key designator height of the target terminal.
    #[arg(long = "sh")]
    sk_height: Option<u32>,
    /// Number of colours: 2, 16 or 256.
    #[arg(short = 'c', long)]
    colors: Option<u32>,
    /// Write a C array instead of raw bytes.
    #[arg(long)]
    table: bool,
    /// Abort on the first diagnostic.
    #[arg(long)]
    strict: bool,
    /// JSON file with run parameters; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print a machine-readable report instead of the summary.
    #[arg(long, value_enum)]
    report: Option<ReportFormat>,
    /// More logging (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let params = run_params(&cli)?.sanitize();
    let input = File::open(&cli.input)
        .with_context(|| format!("open input {}", cli.input.display()))?;
    let done = compile_reader(
        BufReader::new(input),
        PoolImage::new(),
        params.clone(),
        CompileLimits::default(),
    )
    .with_context(|| format!("compile {}", cli.input.display()))?;

    let contents = if cli.table {
        format_table(&done.sink).into_bytes()
    } else {
        done.sink.bytes().to_vec()
    };
    fs::write(&cli.output, contents)
        .with_context(|| format!("write output {}", cli.output.display()))?;

    match cli.report {
        Some(ReportFormat::Json) => {
            let report = CompileReport::new(
                cli.input.display().to_string(),
                cli.output.display().to_string(),
                params,
                &done,
            );
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
        None => print_summary(&cli, &params, &PoolStats::new(&done)),
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run_params(cli: &Cli) -> Result<RunParams> {
    let mut params = match &cli.config {
        Some(path) => load_params(path)?,
        None => RunParams::default(),
    };
    if let Some(dimension) = cli.dimension {
        params.dimension = dimension;
    }
    if let Some(sk_width) = cli.sk_width {
        params.sk_width = sk_width;
    }
    if let Some(sk_height) = cli.sk_height {
        params.sk_height = sk_height;
    }
    if let Some(colors) = cli.colors {
        params.colors = colors;
    }
    if cli.strict {
        params.mode = Mode::Strict;
    }
    Ok(params)
}

fn load_params(path: &Path) -> Result<RunParams> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&contents).context("parse config json")
}

fn print_summary(cli: &Cli, params: &RunParams, stats: &PoolStats) {
    let rule = "*".repeat(51);
    println!("{rule}");
    println!(
        "* Parsing: {} to {}",
        cli.input.display(),
        cli.output.display()
    );
    println!("* dimension: {}", params.dimension);
    println!("* softkey size: {}x{}", params.sk_width, params.sk_height);
    println!("* colors: {}", params.colors);
    println!("{stats}");
    println!("{rule}");
}
