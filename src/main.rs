use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use typist_ingest::core::config::{ExtractorConfig, DEFAULT_PROGRAM};
use typist_ingest::extract::{PdfToText, TextExtractor};
use typist_ingest::normalize::normalize_str;
use typist_ingest::pipeline::{export_report, ingest, ingest_pdf_file, PipelineConfig};
use typist_ingest::{ExtractError, IngestReport, IngestSource};

#[derive(Parser, Debug)]
#[command(name = "typist-ingest")]
#[command(version, about = "Turn pasted text or PDFs into clean typing-practice text", long_about = None)]
struct Cli {
    /// Text extraction tool to invoke
    #[arg(long, global = true, env = "TYPIST_PDFTOTEXT", default_value = DEFAULT_PROGRAM)]
    pdftotext: PathBuf,

    /// Log tool invocations and byte counts
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean up text from a file, or stdin when no file is given
    Normalize {
        input: Option<PathBuf>,
    },

    /// Print the raw text of a PDF without cleanup
    Extract {
        input: PathBuf,
    },

    /// Extract (for PDFs) and clean up text ready for storage
    Ingest {
        /// Input PDF file path
        #[arg(required_unless_present = "text")]
        input: Option<PathBuf>,

        /// Use this pasted text instead of a PDF
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,

        /// Also write ingest.json and ingest.txt to this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the extraction tool is installed
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let extractor = ExtractorConfig::new()
        .with_program(cli.pdftotext)
        .with_debug(cli.debug);

    let result = match cli.command {
        Commands::Normalize { input } => run_normalize(input),
        Commands::Extract { input } => run_extract(extractor, input),
        Commands::Ingest {
            input,
            text,
            output,
            json,
        } => run_ingest(PipelineConfig::new(extractor), input, text, output, json),
        Commands::Check => run_check(extractor),
    };

    if let Err(err) = &result {
        if let Some(kind) = err.downcast_ref::<ExtractError>() {
            eprintln!("[!] {}", kind.user_hint());
        }
    }
    result
}

fn run_normalize(input: Option<PathBuf>) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    println!("{}", normalize_str(&raw));
    Ok(())
}

fn run_extract(config: ExtractorConfig, input: PathBuf) -> Result<()> {
    let bytes =
        std::fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;
    let display_name = input.display().to_string();

    let text = PdfToText::new(config).extract(&bytes, &display_name)?;
    println!("{text}");
    Ok(())
}

fn run_ingest(
    config: PipelineConfig,
    input: Option<PathBuf>,
    text: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let report = match (input, text) {
        (_, Some(text)) => ingest(&config, IngestSource::Pasted(text))?,
        (Some(path), None) => {
            if !path.is_file() {
                anyhow::bail!("Input is not a file: {}", path.display());
            }
            ingest_pdf_file(&config, &path)?
        }
        (None, None) => anyhow::bail!("No input given: pass a PDF path or --text"),
    };

    if let Some(dir) = &output {
        export_report(&report, dir)
            .with_context(|| format!("Failed to export to: {}", dir.display()))?;
        eprintln!("[✓] Saved ingest.json and ingest.txt to {}", dir.display());
    }

    print_report(&report, json)
}

fn print_report(report: &IngestReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.text);
    }
    Ok(())
}

fn run_check(config: ExtractorConfig) -> Result<()> {
    let program = config.program.display().to_string();
    let banner = PdfToText::new(config).probe()?;

    println!("Extraction tool");
    println!("===============");
    println!("Program: {program}");
    println!("Version: {banner}");
    Ok(())
}
