use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use pdf_poster::{Dimension, PosterOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfposter",
    about = "Split a PDF page into printable poster tiles",
    version
)]
struct Cli {
    /// Input PDF file; its first page becomes the poster
    #[arg(required_unless_present = "list_papers")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(short, long, required_unless_present = "list_papers")]
    output: Option<PathBuf>,

    /// Output media size: a paper name or "W U x H U" (default a4)
    #[arg(short, long)]
    media: Option<String>,

    /// Poster size: a paper name or "W U x H U" (default: input page size)
    #[arg(short, long)]
    poster: Option<String>,

    /// Cut margin: "N%" of the media width or a length such as "1in"
    #[arg(short, long)]
    cut_margin: Option<String>,

    /// Overwrite an existing output file
    #[arg(short, long)]
    force: bool,

    /// List supported paper names and sizes, then exit
    #[arg(short, long)]
    list_papers: bool,

    /// Load option defaults from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_secs()
        .init();

    if cli.list_papers {
        list_papers();
        return Ok(());
    }

    let options = build_options(&cli).await?;
    check_files(&options, cli.force)?;

    info!(
        "Tiling {} into {}",
        options.input_file.display(),
        options.output_file.display()
    );
    let summary = pdf_poster::make_poster(&options)
        .await
        .with_context(|| format!("Failed to create poster from {}", options.input_file.display()))?;

    let tile = &summary.tile;
    println!("Poster Tiles:");
    println!("  Grid: {} columns x {} rows", tile.columns, tile.rows);
    println!("  Pages: {}", tile.total_pages);
    println!("  Content scale: {:.2}", tile.content_scale);
    println!("  Cut margin: {:.2} pt", tile.margin);
    println!("Required dimension: {}", format_dimension(summary.fit.before));
    println!("Output dimension  : {}", format_dimension(summary.fit.after));
    println!("Poster → {}", options.output_file.display());

    Ok(())
}

/// Merge command-line flags over the defaults or the `--config` file
async fn build_options(cli: &Cli) -> Result<PosterOptions> {
    let mut options = match &cli.config {
        Some(path) => PosterOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PosterOptions::default(),
    };
    debug!("Base options: {:?}", options);

    if let Some(input) = &cli.input {
        options.input_file = input.clone();
    }
    if let Some(output) = &cli.output {
        options.output_file = output.clone();
    }
    if cli.media.is_some() {
        options.media = cli.media.clone();
    }
    if cli.poster.is_some() {
        options.poster = cli.poster.clone();
    }
    if cli.cut_margin.is_some() {
        options.cut_margin = cli.cut_margin.clone();
    }

    options.validate().context("Invalid options")?;
    Ok(options)
}

/// File checks the library leaves to the front end
fn check_files(options: &PosterOptions, force: bool) -> Result<()> {
    if !options.input_file.is_file() {
        bail!(
            "Input file {} does not exist",
            options.input_file.display()
        );
    }
    if options.output_file.exists() && !force {
        bail!(
            "Output file {} already exists, use --force to overwrite it",
            options.output_file.display()
        );
    }
    Ok(())
}

fn list_papers() {
    println!("Supported papers:");
    for paper in pdf_poster::supported_papers() {
        let dim = paper.dimension();
        println!(
            "  {:<14} {:<20} {}",
            paper.name,
            paper.describe(),
            format_dimension(dim)
        );
    }
}

fn format_dimension(dim: Dimension) -> String {
    format!("{:6.2} pt x {:6.2} pt", dim.width, dim.height)
}
