//! pdf-outline CLI - title and heading outline extraction

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use pdf_outline::render::to_json;
use pdf_outline::{
    extract_outline_from_file, BatchConfig, BatchProcessor, FileOutcome, JsonFormat,
    OutlineOptions, ParseOptions,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF titles and H1-H3 outlines to JSON", long_about = None)]
struct Cli {
    /// Directory containing PDF files
    #[arg(
        value_name = "INPUT_DIR",
        env = "PDF_OUTLINE_INPUT",
        default_value = DEFAULT_INPUT_DIR
    )]
    input: PathBuf,

    /// Directory receiving JSON files
    #[arg(
        value_name = "OUTPUT_DIR",
        env = "PDF_OUTLINE_OUTPUT",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    output: PathBuf,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Process files one at a time
    #[arg(long)]
    sequential: bool,

    /// Give up on a file after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by batch and single-file runs.
#[derive(clap::Args, Clone, Copy)]
struct ExtractArgs {
    /// Output compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Also list the title heading in the outline
    #[arg(long, global = true)]
    keep_title: bool,

    /// Fail a document on the first unreadable page
    #[arg(long, global = true)]
    strict: bool,
}

impl ExtractArgs {
    fn json_format(self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn outline_options(self) -> OutlineOptions {
        OutlineOptions::new().with_title_in_outline(self.keep_title)
    }

    fn parse_options(self) -> ParseOptions {
        if self.strict {
            ParseOptions::new()
        } else {
            ParseOptions::new().lenient()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a single PDF file
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::File { ref input, ref output }) => {
            cmd_file(input, output.as_deref(), cli.extract)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BatchConfig::new(&cli.input, &cli.output)
        .with_parallel(!cli.sequential)
        .with_json_format(cli.extract.json_format())
        .with_outline_options(cli.extract.outline_options())
        .with_parse_options(cli.extract.parse_options());
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let processor = BatchProcessor::new(config);
    let total = processor.discover()?.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let report = processor.run_with_progress(|file| {
        let name = file
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match &file.outcome {
            FileOutcome::Written { .. } => pb.set_message(name),
            FileOutcome::Failed(e) => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), name, e));
            }
        }
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    println!("{}", "Outlines:".green().bold());
    for file in report.written() {
        if let FileOutcome::Written { output, headings } = &file.outcome {
            println!(
                "  {} {} {}",
                "├─".dimmed(),
                output.display(),
                format!("({} headings)", headings).dimmed()
            );
        }
    }

    println!(
        "\n{} {} written, {} skipped",
        "Done!".green().bold(),
        report.written_count(),
        report.failed_count()
    );

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    args: ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = extract_outline_from_file(input, &args.parse_options(), &args.outline_options())?;
    let json = to_json(&result, args.json_format())?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdf-outline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF title and heading outline extraction");
    println!();
    println!("License: MIT");
}
