use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use khmer_segmenter::{Segmenter, SegmenterConfig};

/// Segment Khmer text into words.
#[derive(Parser, Debug)]
#[command(name = "khmer-segmenter", version, about)]
struct Cli {
    /// Text to segment. Reads from stdin if omitted and --file isn't given.
    text: Option<String>,

    /// Read input text from a file instead of the positional argument/stdin.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Dictionary file, one word per line.
    #[arg(long, default_value = "dictionary.txt")]
    dictionary: PathBuf,

    /// Optional `{"word": count}` JSON frequency table.
    #[arg(long)]
    frequencies: Option<PathBuf>,

    /// Optional TOML file overriding cost-model defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Separator inserted between segmented words.
    #[arg(long, default_value = "\u{200B}")]
    separator: String,

    /// Number of rayon threads to use when segmenting multiple lines.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Report wall-clock time and throughput instead of printing output.
    #[arg(long)]
    benchmark: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SegmenterConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SegmenterConfig::default(),
    };

    // A missing or unreadable dictionary degrades to an empty one (logged
    // at warn by Segmenter::with_config) rather than failing init; the only
    // init failure this binary can still report is a malformed --config.
    let segmenter = Segmenter::with_config(&cli.dictionary, cli.frequencies.as_deref(), config);

    let lines = read_input(&cli)?;

    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
        .ok();

    if cli.benchmark {
        let start = Instant::now();
        let total_bytes: usize = lines.iter().map(|l| l.len()).sum();
        for line in &lines {
            std::hint::black_box(segmenter.segment(line, Some(&cli.separator)));
        }
        let elapsed = start.elapsed();
        let mb_per_sec = (total_bytes as f64 / elapsed.as_secs_f64()) / 1_000_000.0;
        eprintln!(
            "segmented {} lines ({} bytes) in {:?} ({:.2} MB/s)",
            lines.len(),
            total_bytes,
            elapsed,
            mb_per_sec
        );
        return Ok(());
    }

    for line in &lines {
        println!("{}", segmenter.segment(line, Some(&cli.separator)));
    }

    Ok(())
}

fn read_input(cli: &Cli) -> Result<Vec<String>> {
    if let Some(path) = &cli.file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()))?;
        return Ok(contents.lines().map(str::to_string).collect());
    }
    if let Some(text) = &cli.text {
        return Ok(vec![text.clone()]);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading stdin")?;
    Ok(buf.lines().map(str::to_string).collect())
}
