//! Player — the terminal frontend.
//!
//! Stands in for the desktop: the terminal is the screen, the pet's window
//! is a block of cells on it, and mouse capture supplies the pointer. Each
//! loop iteration gathers input for one tick period, runs one engine frame,
//! and redraws.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, queue, style, terminal};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{PetConfig, Toggle, matches_binding};
use crate::converter::{Converter, GlyphRamp};
use crate::engine::{ACTIVE_TICK_RATE, Engine, FrameInput, FrameOutput};
use crate::loader;
use crate::menubar::{hint_items, print_menu_item};
use crate::monitor::SharedStats;
use crate::motion::PointerInput;
use crate::pet::Pet;
use crate::types::{CellMetrics, Point, Rgb, ScreenSize};

/// Rows reserved below the screen area for the key-hint bar.
const MENUBAR_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Player {
    engine: Engine,
    converter: Converter,
    config: PetConfig,
    config_path: PathBuf,
    stats: SharedStats,
    rng: StdRng,
    window_origin: Point,
    /// Pointer in terminal coordinates.
    pointer: Point,
    pressed: bool,
    status: Option<String>,
}

impl Player {
    /// Loads `image_path`, or `fallback` if that fails. Errors only when
    /// neither can be loaded; there is no previous pet to keep yet.
    pub fn new(
        mut config: PetConfig,
        config_path: PathBuf,
        image_path: &Path,
        fallback: Option<&Path>,
        stats: SharedStats,
    ) -> Result<Self> {
        let converter = Converter::new(
            GlyphRamp::default(),
            config.target_width,
            CellMetrics::TERMINAL,
        );
        let (image, loaded_from) = loader::load_or_fallback(image_path, fallback)?;
        let pet = Pet::from_image(&converter, &image);
        info!(
            "loaded {} as {}x{} glyphs",
            loaded_from.display(),
            pet.grid.max_row_len(),
            pet.grid.row_count()
        );

        config.image_path = loaded_from.display().to_string();
        let engine = Engine::new(pet, config.toggles, CellMetrics::TERMINAL, Point::default());

        Ok(Player {
            engine,
            converter,
            config,
            config_path,
            stats,
            rng: StdRng::from_entropy(),
            window_origin: Point::default(),
            pointer: Point::new(-1, -1),
            pressed: false,
            status: None,
        })
    }

    /// Run the pet in the terminal.
    ///
    /// Sets up the terminal, enters the frame loop, and restores the
    /// terminal on exit (even on error). Preferences are saved on the way
    /// out.
    pub fn play(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            event::EnableBracketedPaste,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::DisableBracketedPaste,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();

        self.save_config();
        result
    }

    // -----------------------------------------------------------------------
    // Frame loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.center_window()?;
        let mut tick_rate = ACTIVE_TICK_RATE;

        loop {
            let started = Instant::now();
            let period = Duration::from_secs(1) / tick_rate;

            while let Some(remaining) = period.checked_sub(started.elapsed()) {
                if !event::poll(remaining)? {
                    break;
                }
                if self.handle_event(event::read()?) == Flow::Quit {
                    return Ok(());
                }
            }

            let output = self.frame()?;
            tick_rate = output.tick_rate;
            self.draw(stdout, &output)?;
        }
    }

    fn frame(&mut self) -> Result<FrameOutput> {
        let screen = screen_size()?;
        let input = FrameInput {
            pointer: PointerInput {
                position: Point::new(
                    self.pointer.x - self.window_origin.x,
                    self.pointer.y - self.window_origin.y,
                ),
                pressed: self.pressed,
            },
            window_origin: self.window_origin,
            screen,
        };

        let output = self.engine.step(input, &self.stats, &mut self.rng);
        if let Some(origin) = output.window_origin {
            self.window_origin = origin;
        }
        Ok(output)
    }

    fn center_window(&mut self) -> Result<()> {
        let screen = screen_size()?;
        let (w, h) = self.engine.pet().window_size();
        self.window_origin = Point::new(
            ((screen.width - w) / 2).max(0),
            ((screen.height - h) / 2).max(0),
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => self.handle_drop(&text),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let bindings = &self.config.key_bindings;

        if matches_binding(&bindings.quit, &key) || matches_binding(&bindings.quit_alt, &key) {
            return Flow::Quit;
        }

        let toggle = if matches_binding(&bindings.toggle_color, &key) {
            Some(Toggle::Color)
        } else if matches_binding(&bindings.toggle_glitch, &key) {
            Some(Toggle::Glitch)
        } else if matches_binding(&bindings.toggle_animation, &key) {
            Some(Toggle::Animation)
        } else if matches_binding(&bindings.toggle_monitor, &key) {
            Some(Toggle::Monitor)
        } else {
            None
        };

        if let Some(toggle) = toggle {
            self.engine.toggle(toggle);
            self.config.toggles = self.engine.toggles();
        } else if matches_binding(&bindings.reload, &key) {
            let path = PathBuf::from(&self.config.image_path);
            self.swap_image(&path);
        }
        Flow::Continue
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.pointer = Point::new(i32::from(mouse.column), i32::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pressed = true,
            MouseEventKind::Up(MouseButton::Left) => self.pressed = false,
            _ => {}
        }
    }

    /// Dropping a file on most terminals pastes its path.
    fn handle_drop(&mut self, text: &str) {
        let path = PathBuf::from(dropped_path(text));
        if self.swap_image(&path) {
            self.save_config();
        }
    }

    /// Convert a new image and swap it in whole. On failure the current pet
    /// stays.
    fn swap_image(&mut self, path: &Path) -> bool {
        match loader::load(path) {
            Ok(image) => {
                let pet = Pet::from_image(&self.converter, &image);
                self.engine.replace_pet(pet);
                self.config.image_path = path.display().to_string();
                self.status = None;
                info!("loaded {}", path.display());
                true
            }
            Err(e) => {
                warn!("{e:#}");
                self.status = Some(format!("{e:#}"));
                false
            }
        }
    }

    fn save_config(&mut self) {
        self.config.toggles = self.engine.toggles();
        if let Err(e) = self.config.save(&self.config_path) {
            warn!("config not saved: {e:#}");
        }
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn draw(&self, stdout: &mut io::Stdout, output: &FrameOutput) -> Result<()> {
        let screen = screen_size()?;
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;

        for op in &output.render.ops {
            let x = self.window_origin.x + op.x;
            let y = self.window_origin.y + op.y;
            if !on_screen(x, y, screen) {
                continue;
            }
            queue!(
                stdout,
                cursor::MoveTo(x as u16, y as u16),
                style::PrintStyledContent(style::StyledContent::new(
                    content_style(op.color),
                    op.ch
                )),
            )?;
        }

        if let Some(hud) = &output.render.hud {
            let x = self.window_origin.x + hud.x;
            let y = self.window_origin.y + hud.y;
            if on_screen(x, y, screen) {
                let room = (screen.width - x) as usize;
                let text: String = hud.text.chars().take(room).collect();
                queue!(
                    stdout,
                    cursor::MoveTo(x as u16, y as u16),
                    style::PrintStyledContent(style::StyledContent::new(
                        content_style(hud.color),
                        text
                    )),
                )?;
            }
        }

        self.draw_menubar(stdout, screen)?;
        stdout.flush()?;
        Ok(())
    }

    fn draw_menubar(&self, stdout: &mut io::Stdout, screen: ScreenSize) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, screen.height as u16),
            style::Print(" "),
        )?;
        let items = hint_items(&self.config.key_bindings, &self.engine.toggles());
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(stdout, style::Print("  "))?;
            }
            print_menu_item(stdout, item)?;
        }
        if let Some(status) = &self.status {
            queue!(stdout, style::Print("  "))?;
            print_menu_item(stdout, status)?;
        }
        Ok(())
    }
}

/// The terminal minus the hint bar.
fn screen_size() -> Result<ScreenSize> {
    let (w, h) = terminal::size()?;
    Ok(ScreenSize {
        width: i32::from(w),
        height: i32::from(h.saturating_sub(MENUBAR_ROWS)),
    })
}

fn on_screen(x: i32, y: i32, screen: ScreenSize) -> bool {
    (0..screen.width).contains(&x) && (0..screen.height).contains(&y)
}

pub fn content_style(color: Rgb) -> style::ContentStyle {
    style::ContentStyle {
        foreground_color: Some(style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }),
        ..Default::default()
    }
}

/// Terminals quote or URL-encode dropped paths in different ways.
fn dropped_path(text: &str) -> String {
    let trimmed = text.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    path.replace("%20", " ").replace("\\ ", " ")
}
