//! Drives the library the way the binary does: decode, convert, then run
//! frames through the engine.

use std::num::NonZeroU32;

use rand::SeedableRng;
use rand::rngs::StdRng;

use ascii_pet::config::{Toggle, Toggles};
use ascii_pet::converter::{Converter, GlyphRamp};
use ascii_pet::effects::CORRUPTION_GLYPHS;
use ascii_pet::engine::{Engine, FrameInput};
use ascii_pet::loader;
use ascii_pet::monitor::{MonitorSnapshot, SharedStats};
use ascii_pet::motion::PointerInput;
use ascii_pet::pet::Pet;
use ascii_pet::renderer::{ALERT_COLOR, MONO_COLOR};
use ascii_pet::types::{CellMetrics, Point, Rgb, ScreenSize};

fn converter(width: u32) -> Converter {
    Converter::new(
        GlyphRamp::default(),
        NonZeroU32::new(width).unwrap(),
        CellMetrics::DESKTOP,
    )
}

fn idle_input(origin: Point) -> FrameInput {
    FrameInput {
        pointer: PointerInput {
            position: Point::new(-100, -100),
            pressed: false,
        },
        window_origin: origin,
        screen: ScreenSize {
            width: 1280,
            height: 720,
        },
    }
}

#[test]
fn black_square_never_glitches_when_disabled() {
    let image = image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]));
    let pet = Pet::from_image(&converter(1), &image);

    assert_eq!(pet.grid.row_count(), 1);
    assert_eq!(pet.grid.max_row_len(), 1);
    let cell = pet.grid.cell(0, 0).unwrap();
    assert_eq!(cell.original(), '@');
    assert_eq!(cell.color(), Rgb::new(0, 0, 0));

    let toggles = Toggles {
        show_glitch: false,
        ..Toggles::default()
    };
    let origin = Point::new(10, 10);
    let mut engine = Engine::new(pet, toggles, CellMetrics::DESKTOP, origin);
    let stats = SharedStats::new();
    let mut rng = StdRng::seed_from_u64(1000);

    for _ in 0..1000 {
        let out = engine.step(idle_input(origin), &stats, &mut rng);
        assert!(engine.pet().grid.cells().all(|c| !c.is_corrupted()));
        assert_eq!(out.render.ops.len(), 1);
        assert_eq!(out.render.ops[0].ch, '@');
    }
}

#[test]
fn glitches_never_outlive_their_frame() {
    let image = image::RgbImage::from_fn(100, 60, |x, y| {
        image::Rgb([(x * 2) as u8, (y * 4) as u8, 128])
    });
    let pet = Pet::from_image(&converter(20), &image);
    let originals: Vec<char> = pet.grid.cells().map(|c| c.original()).collect();

    let toggles = Toggles {
        show_glitch: true,
        show_animation: false,
        ..Toggles::default()
    };
    let origin = Point::new(0, 0);
    let mut engine = Engine::new(pet, toggles, CellMetrics::DESKTOP, origin);
    let stats = MonitorSnapshot::default();
    let mut rng = StdRng::seed_from_u64(77);
    let mut glitched_frames = 0;

    for _ in 0..1000 {
        let out = engine.step(idle_input(origin), &stats, &mut rng);
        let changed: Vec<_> = out
            .render
            .ops
            .iter()
            .zip(&originals)
            .filter(|(op, original)| op.ch != **original)
            .collect();
        assert!(changed.len() <= 9);
        assert!(changed.iter().all(|(op, _)| CORRUPTION_GLYPHS.contains(&op.ch)));
        if !changed.is_empty() {
            glitched_frames += 1;
        }
    }
    assert!(glitched_frames > 0);

    engine.toggle(Toggle::Glitch);
    let out = engine.step(idle_input(origin), &stats, &mut rng);
    assert!(out.render.ops.iter().zip(&originals).all(|(op, o)| op.ch == *o));
}

#[test]
fn stress_and_monochrome_colors() {
    let image = image::RgbImage::from_pixel(40, 40, image::Rgb([10, 200, 30]));
    let pet = Pet::from_image(&converter(10), &image);
    let toggles = Toggles {
        show_color: true,
        show_glitch: false,
        show_animation: false,
        show_monitor: true,
    };
    let origin = Point::new(0, 0);
    let mut engine = Engine::new(pet, toggles, CellMetrics::DESKTOP, origin);
    let stats = SharedStats::new();
    let mut rng = StdRng::seed_from_u64(5);

    let out = engine.step(idle_input(origin), &stats, &mut rng);
    assert!(out.render.ops.iter().all(|op| op.color == Rgb::new(10, 200, 30)));
    assert_eq!(out.render.hud.unwrap().text, "CPU: 0% | MEM: 0%");

    stats.publish(MonitorSnapshot { cpu: 85.0, mem: 50.0 });
    let out = engine.step(idle_input(origin), &stats, &mut rng);
    assert!(out.render.ops.iter().all(|op| op.color == ALERT_COLOR));
    assert_eq!(out.render.hud.unwrap().text, "CPU: 85% | MEM: 50%");

    stats.publish(MonitorSnapshot { cpu: 20.0, mem: 50.0 });
    engine.toggle(Toggle::Color);
    let out = engine.step(idle_input(origin), &stats, &mut rng);
    assert!(out.render.ops.iter().all(|op| op.color == MONO_COLOR));
}

#[test]
fn failed_reload_keeps_previous_pet() {
    let dir = std::env::temp_dir().join(format!("ascii-pet-frame-loop-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("pet.png");
    image::RgbImage::from_pixel(60, 40, image::Rgb([255, 255, 255]))
        .save(&good)
        .unwrap();

    let conv = converter(30);
    let pet = Pet::from_image(&conv, &loader::load(&good).unwrap());
    let origin = Point::new(0, 0);
    let mut engine = Engine::new(pet, Toggles::default(), CellMetrics::DESKTOP, origin);
    let before = engine.pet().clone();
    assert_eq!(before.window_size(), (30 * 7, 10 * 13 + 20));

    let missing = dir.join("missing.png");
    if let Ok(image) = loader::load(&missing) {
        engine.replace_pet(Pet::from_image(&conv, &image));
    }
    assert_eq!(engine.pet(), &before);
}
