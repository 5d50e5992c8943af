//! Example: print one grid of an image as colored terminal blocks.
//!
//! Loads an image, rasterizes it at the requested grid and cell size, and
//! prints one 24-bit-color block per cell. The SVG for the same grid is
//! written next to the input unless `--no-svg` is given.
//!
//! Run from the workspace root:
//!   cargo run -p icon-grid --example grid_preview -- --input logo.png --size 32 --cell 2

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use icon_grid::{GridSpec, Image, rasterize, to_svg};

#[derive(Parser, Debug)]
#[command(about = "Preview a pixel-averaged icon grid in the terminal")]
struct Args {
    /// Source image (any format the `image` crate decodes)
    #[arg(long)]
    input: PathBuf,

    /// Grid size in pixels
    #[arg(long, default_value_t = 32)]
    size: usize,

    /// Cell size in pixels; must divide `size`
    #[arg(long, default_value_t = 2)]
    cell: usize,

    /// Skip writing `<input stem>-<size>.svg`
    #[arg(long)]
    no_svg: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let rgba = image::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?
        .to_rgba8();
    let (w, h) = rgba.dimensions();
    let src = Image::from_rgba_bytes(w as usize, h as usize, rgba.as_raw())
        .context("building source image")?;

    let spec = GridSpec::new(args.size, args.cell).context("grid spec")?;
    let render = rasterize(&src.as_view(), spec).context("rasterizing")?;

    for row in 0..spec.rows() {
        let mut line = String::new();
        for column in 0..spec.columns() {
            let c = render.get(row, column).context("cell in range")?.color;
            line.push_str(&format!("\x1b[48;2;{};{};{}m  ", c.r, c.g, c.b));
        }
        println!("{line}\x1b[0m");
    }

    if !args.no_svg {
        let stem = args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "grid".to_string());
        let out = args.input.with_file_name(format!("{stem}-{}.svg", args.size));
        std::fs::write(&out, to_svg(&render))
            .with_context(|| format!("writing {}", out.display()))?;
        println!("wrote {}", out.display());
    }

    Ok(())
}
