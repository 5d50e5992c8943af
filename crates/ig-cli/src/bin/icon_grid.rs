use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use icon_grid::{
    ARCHIVE_NAME, ArtifactSet, BundleConfig, FaviconFormat, GridSpec, Image, REFERENCE_SIZES,
    Rgba8, Session, aliases_for, encode_png, paint, png_name, rasterize, svg_name, to_svg,
    write_dir, write_zip,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "icon_grid")]
#[command(about = "Turn one image into pixel-grid favicons, app icons and SVGs")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the full icon bundle as a ZIP archive or a directory
    #[command(name = "bundle")]
    Bundle(BundleArgs),
    /// Render a single grid size
    #[command(name = "grid")]
    Grid(GridArgs),
    /// Print the size table with cell steps and aliases
    #[command(name = "sizes")]
    Sizes,
}

#[derive(Args, Debug, Clone)]
struct BundleArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    /// Archive path
    #[arg(long, default_value = ARCHIVE_NAME, conflicts_with = "dir")]
    out: PathBuf,
    /// Write loose files into this directory instead of an archive
    #[arg(long)]
    dir: Option<PathBuf>,
    /// JSON bundle configuration; unspecified keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Cell step per size (0 = finest, 1 = 2x, 2 = 4x)
    #[arg(long)]
    step: Option<usize>,
    /// Encode favicon.ico as a real ICO container
    #[arg(long)]
    ico: bool,
    /// Render sizes one after another instead of in parallel
    #[arg(long)]
    sequential: bool,
    /// Validate the configuration up front and fail if any size fails
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug, Clone)]
struct GridArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, required = true)]
    size: usize,
    #[arg(long, required = true)]
    cell: usize,
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Debug, Serialize)]
struct MetaGrid {
    grid_size: usize,
    cell_size: usize,
    columns: usize,
    cells: usize,
    source_width: usize,
    source_height: usize,
    resize: &'static str,
    averaging: &'static str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Bundle(args) => run_bundle(args),
        Command::Grid(args) => run_grid(args),
        Command::Sizes => run_sizes(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_bundle(args: BundleArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;

    let mut cfg = match &args.config {
        Some(path) => BundleConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BundleConfig::default(),
    };
    if let Some(step) = args.step {
        cfg.step = step;
    }
    if args.ico {
        cfg.favicon = FaviconFormat::Ico;
    }
    if args.sequential {
        cfg.parallel = false;
    }
    if args.strict {
        cfg.validate().context("validating bundle configuration")?;
    }

    let bytes =
        fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let mut session = Session::new();
    let mut run = session
        .upload(&bytes)
        .with_context(|| format!("decoding {}", args.input.display()))?;
    let set = run.process(&cfg).context("generating icons")?;

    match &args.dir {
        Some(dir) => {
            write_dir(&set, dir).with_context(|| format!("writing {}", dir.display()))?;
        }
        None => {
            let file = fs::File::create(&args.out)
                .with_context(|| format!("creating {}", args.out.display()))?;
            write_zip(&set, file).with_context(|| format!("writing {}", args.out.display()))?;
            info!(archive = %args.out.display(), "archive written");
        }
    }

    print_summary(&set);

    if args.strict && !set.is_complete() {
        bail!("{} size(s) failed: {:?}", set.failures().len(), set.failed_sizes());
    }
    Ok(())
}

fn run_grid(args: GridArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let src = load_input_rgba(&args.input)?;

    let spec = GridSpec::new(args.size, args.cell).context("grid spec")?;
    let render = rasterize(&src.as_view(), spec).context("rasterizing grid")?;
    let pixels = paint(&render).context("painting grid")?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let png_path = args.out.join(png_name(args.size));
    fs::write(&png_path, encode_png(&pixels)?)
        .with_context(|| format!("writing {}", png_path.display()))?;

    let svg_path = args.out.join(svg_name(args.size));
    fs::write(&svg_path, to_svg(&render))
        .with_context(|| format!("writing {}", svg_path.display()))?;

    write_json(
        args.out.join("meta.json"),
        &MetaGrid {
            grid_size: spec.grid_size(),
            cell_size: spec.cell_size(),
            columns: spec.columns(),
            cells: render.cells().len(),
            source_width: src.width(),
            source_height: src.height(),
            resize: "bilinear, pixel-center, clamped edges",
            averaging: "floored per-channel mean, alpha ignored",
        },
    )?;

    println!("{}", png_path.display());
    println!("{}", svg_path.display());
    Ok(())
}

fn run_sizes() -> Result<()> {
    println!("{:>6}  {:<14}  aliases", "size", "cell steps");
    for entry in REFERENCE_SIZES {
        let [a, b, c] = entry.cell_steps();
        let aliases: Vec<_> = aliases_for(entry.size).map(|alias| alias.name).collect();
        println!(
            "{:>6}  {:<14}  {}",
            entry.size,
            format!("{a}/{b}/{c}"),
            aliases.join(", ")
        );
    }
    Ok(())
}

fn print_summary(set: &ArtifactSet) {
    for artifacts in set.sizes() {
        let spec = artifacts.render.spec();
        println!(
            "{:>4}x{:<4} cell {:>2}  png {:>7} B  svg {:>8} B",
            spec.grid_size(),
            spec.grid_size(),
            spec.cell_size(),
            artifacts.png.len(),
            artifacts.svg.len()
        );
    }
    for failure in set.failures() {
        let what = failure.alias.unwrap_or("size");
        println!(
            "{:>4}x{:<4} cell {:>2}  FAILED ({what}): {}",
            failure.size, failure.size, failure.cell_size, failure.error
        );
    }
    if let Some(preview) = set.largest() {
        println!("preview: {}", preview.png_name());
    }
}

fn load_input_rgba(path: &Path) -> Result<Image<Rgba8>> {
    let rgba = image::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .to_rgba8();
    let (w, h) = rgba.dimensions();

    Image::from_rgba_bytes(w as usize, h as usize, rgba.as_raw())
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
