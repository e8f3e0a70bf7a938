use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};

use ascii_pet::{
    config::{DEFAULT_IMAGE_PATH, PetConfig},
    converter::{Converter, GlyphRamp},
    loader,
    monitor::{self, Monitor},
    player::Player,
    types::CellMetrics,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const RUN_USAGE: &str = "ascii-pet [image]";
const CONVERT_USAGE: &str = "ascii-pet convert <image> [width]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("convert") => {
            let image_path = args.next().context(CONVERT_USAGE)?;
            let width = match args.next() {
                Some(w) => w
                    .parse::<NonZeroU32>()
                    .with_context(|| format!("Invalid width {w:?}: {CONVERT_USAGE}"))?,
                None => PetConfig::default().target_width,
            };
            convert(Path::new(&image_path), width)
        }
        Some("-h" | "--help") => bail!(
            "ascii-pet: a glyph-art desktop pet for the terminal\n\nUsage:\n  {RUN_USAGE}\n  {CONVERT_USAGE}"
        ),
        Some(image_path) => run_pet(Some(PathBuf::from(image_path))),
        None => run_pet(None),
    }
}

fn convert(image_path: &Path, width: NonZeroU32) -> Result<()> {
    let image = loader::load(image_path)?;
    let converter = Converter::new(GlyphRamp::default(), width, CellMetrics::TERMINAL);
    let conversion = converter.convert(&image);

    println!("{}", conversion.grid.text());
    eprintln!(
        "Converted {} -> {}x{} glyphs",
        image_path.display(),
        conversion.grid.max_row_len(),
        conversion.grid.row_count(),
    );
    Ok(())
}

fn run_pet(image_override: Option<PathBuf>) -> Result<()> {
    let config_path = PetConfig::default_path();
    let config = PetConfig::load(&config_path)?;
    // Only a remembered image falls back to the shipped one.
    let (image_path, fallback) = match image_override {
        Some(path) => (path, None),
        None => (
            PathBuf::from(&config.image_path),
            Some(Path::new(DEFAULT_IMAGE_PATH)),
        ),
    };

    let stats = Monitor::spawn(monitor::DEFAULT_INTERVAL).context("Failed to start monitor")?;
    let mut player = Player::new(config, config_path, &image_path, fallback, stats)?;
    player.play()
}
