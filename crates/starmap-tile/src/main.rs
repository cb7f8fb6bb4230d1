//! Renders one star-map tile to a PNG file.
//!
//! ```text
//! starmap-tile --scale 64 --width 512 --height 512 -o regina.png
//! starmap-tile --style candy --resources res --font DejaVuSans.ttf
//! ```

mod demo;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use starmap_engine::coords::Rect;
use starmap_engine::logging::{LoggingConfig, init_logging};
use starmap_engine::raster::Canvas;
use starmap_engine::text::FontSystem;
use starmap_engine::time::Stopwatch;
use starmap_render::astrometry;
use starmap_render::options::MapOptions;
use starmap_render::resources::ResourceCache;
use starmap_render::style::{DEFAULT_FONT, LayerId, Stylesheet, presets};
use starmap_render::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};
use starmap_render::{RenderRequest, render_tile};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Preset {
    Poster,
    Candy,
    Print,
}

#[derive(Debug, Parser)]
#[command(name = "starmap-tile", version, about = "Render a star-map tile", long_about = None)]
struct Arguments {
    /// Tile center, world x. Defaults to the center of the demo sector.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f32>,

    /// Tile center, world y.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f32>,

    /// Pixels per parsec
    #[arg(short, long, default_value_t = 64.0)]
    scale: f32,

    /// Output width in pixels
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 256)]
    height: u32,

    /// Map option bits, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_bits)]
    options: Option<u32>,

    #[arg(long, value_enum, default_value_t = Preset::Poster)]
    style: Preset,

    /// TrueType/OpenType font used for every label
    #[arg(short = 'f', long)]
    font: Option<PathBuf>,

    /// Directory holding the background and world images
    #[arg(long, default_value = "res")]
    resources: PathBuf,

    /// JSON object of layer ranks overriding the preset, e.g. {"GridSector": 100}
    #[arg(long)]
    layer_order: Option<PathBuf>,

    /// Keep micro borders inside their own sector
    #[arg(long, action = clap::ArgAction::SetTrue)]
    clip_outsector_borders: bool,

    /// Log per-pass timings at debug level
    #[arg(long, action = clap::ArgAction::SetTrue)]
    timing: bool,

    /// Log filter in env_logger syntax, e.g. "starmap_render=debug"
    #[arg(long)]
    log: Option<String>,

    #[arg(short, long, default_value = "tile.png")]
    output: PathBuf,
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid option bits {s:?}: {e}"))
}

/// World rectangle of a `width` x `height` pixel tile centered on `center`.
fn tile_rect(center_x: f32, center_y: f32, scale: f32, width: u32, height: u32) -> Rect {
    let w = width as f32 / (scale * PARSEC_SCALE_X);
    let h = height as f32 / (scale * PARSEC_SCALE_Y);
    Rect::new(center_x - w / 2.0, center_y - h / 2.0, w, h)
}

fn stylesheet(args: &Arguments, options: MapOptions) -> Result<Stylesheet> {
    let mut style = match args.style {
        Preset::Poster => presets::poster(args.scale, options),
        Preset::Candy => presets::candy(args.scale, options),
        Preset::Print => presets::print(args.scale, options),
    };
    if let Some(path) = &args.layer_order {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading layer order {}", path.display()))?;
        let overrides: HashMap<LayerId, i32> = serde_json::from_str(&json)
            .with_context(|| format!("parsing layer order {}", path.display()))?;
        style.layer_order.apply_overrides(&overrides);
    }
    Ok(style)
}

fn fonts(path: Option<&PathBuf>) -> Result<FontSystem> {
    let mut fonts = FontSystem::new();
    if let Some(path) = path {
        let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        fonts
            .load_font(DEFAULT_FONT, &bytes)
            .with_context(|| format!("loading font {}", path.display()))?;
    } else {
        log::warn!("no --font given, labels will not be rasterized");
    }
    Ok(fonts)
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    if !(args.scale > 0.0 && args.scale.is_finite()) {
        bail!("--scale must be a positive number, got {}", args.scale);
    }

    let mut watch = Stopwatch::new();
    let options = args.options.map_or(MapOptions::DEFAULT, MapOptions::from_bits);
    let style = Arc::new(stylesheet(&args, options)?);
    let fonts = Arc::new(fonts(args.font.as_ref())?);
    let resources = ResourceCache::new(args.resources.clone());
    let index = demo::index();
    let assets = demo::assets();
    watch.lap("setup");

    let center = astrometry::sector_center(0, 0);
    let rect = tile_rect(
        args.x.unwrap_or(center.x),
        args.y.unwrap_or(center.y),
        args.scale,
        args.width,
        args.height,
    );
    log::info!(
        "rendering {:?} at {} px/pc into {}x{}",
        rect,
        args.scale,
        args.width,
        args.height
    );

    let request = RenderRequest::new(rect, args.scale, options, style, (args.width, args.height))
        .with_clip_outsector_borders(args.clip_outsector_borders)
        .with_timing(args.timing);
    let mut canvas = Canvas::new(args.width, args.height, fonts)?;
    render_tile(&request, &index, &assets, &resources, &mut canvas).context("rendering tile")?;
    watch.lap("render");

    canvas
        .write_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    watch.lap("encode");
    watch.log_summary("starmap-tile");

    log::info!("wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_bits_accept_hex_and_decimal() {
        assert_eq!(parse_bits("0x4000"), Ok(0x4000));
        assert_eq!(parse_bits("49152"), Ok(0xc000));
        assert!(parse_bits("lots").is_err());
    }

    #[test]
    fn tile_rect_is_centered() {
        let rect = tile_rect(10.0, -20.0, 64.0, 256, 128);
        assert!((rect.center().x - 10.0).abs() < 1e-4);
        assert!((rect.center().y + 20.0).abs() < 1e-4);
        assert!((rect.height() - 2.0).abs() < 1e-6);
        assert!((rect.width() * 64.0 * PARSEC_SCALE_X - 256.0).abs() < 1e-3);
    }

    #[test]
    fn cli_defaults() {
        let args = Arguments::parse_from(["starmap-tile"]);
        assert_eq!(args.style, Preset::Poster);
        assert_eq!((args.width, args.height), (256, 256));
        assert!(args.options.is_none());

        let args = Arguments::parse_from(["starmap-tile", "--x", "-12.5", "--style", "candy"]);
        assert_eq!(args.x, Some(-12.5));
        assert_eq!(args.style, Preset::Candy);
    }
}
