//! Measures the area, moments and perimeter of glyphs listed in text files.
//!
//! Each input line holds a glyph name and its outline as SVG path data.
//! Results are written to stdout, one line per glyph, in input order.

use std::{io::Write, path::PathBuf};

use miette::miette;

use glyph_measure::DEFAULT_TOLERANCE;
use glyph_measure_cli::{parse_glyphs, tsv_header, ErrorReport, Measurer};

#[derive(clap::Parser, Debug)]
#[command(about = "Measure area, image moments and perimeter of glyph outlines")]
struct Args {
    /// Relative error tolerance for the length of cubic curves
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
    /// Add variance, covariance and slant columns
    #[arg(long)]
    stats: bool,
    /// Print one JSON object per glyph instead of tab separated values
    #[arg(long)]
    json: bool,
    /// Number of worker threads (defaults to the number of cores)
    #[arg(long)]
    jobs: Option<usize>,
    /// Files with one `<name> <svg path data>` entry per line
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> miette::Result<()> {
    env_logger::init();
    use clap::Parser as _;
    let args = Args::parse();

    let measurer = Measurer::new(args.tolerance).map_err(|e| ErrorReport::message(e.to_string()))?;
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|e| miette!("failed to start {jobs} worker threads: {e}"))?;
    }

    let mut glyphs = Vec::new();
    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .map_err(|e| miette!("failed to read '{}': {e}", path.display()))?;
        let parsed = parse_glyphs(&text)
            .map_err(|e| ErrorReport::from_input_error(&e, path, &text))?;
        log::info!("read {} glyphs from {}", parsed.len(), path.display());
        glyphs.extend(parsed);
    }

    let reports = measurer.measure_all(&glyphs);
    let failed = reports.iter().filter(|r| !r.errors.is_empty()).count();
    if failed > 0 {
        log::warn!("{failed} of {} glyphs could not be fully measured", reports.len());
    }

    let mut out = std::io::stdout().lock();
    let write_err = |e: std::io::Error| miette!("failed to write output: {e}");
    if !args.json {
        writeln!(out, "{}", tsv_header(args.stats)).map_err(write_err)?;
    }
    for report in &reports {
        if args.json {
            let line = report
                .to_json()
                .map_err(|e| miette!("failed to serialize '{}': {e}", report.name))?;
            writeln!(out, "{line}").map_err(write_err)?;
        } else {
            writeln!(out, "{}", report.to_tsv(args.stats)).map_err(write_err)?;
        }
    }
    Ok(())
}
