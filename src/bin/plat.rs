//! Windowed host: keyboard-driven platformer with its level editor.
//!
//! ```bash
//! cargo run --release
//! ```
//!
//! Controls   Arrows/WASD = move   Space = jump   Tab = switch mode
//! Edit mode  P = paint solid   L = paint liquid   E = erase
//!            I = inspect   R = reset grid   Esc = quit

use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use plat_rs::defs;
use plat_rs::renderer::software::{Software, SpriteBank};
use plat_rs::renderer::{BLACK, WHITE};
use plat_rs::session::{Button, ButtonEvent, Session};
use plat_rs::sim::{AXIS_X, AXIS_Y, AxisSource, SystemClock};
use plat_rs::world::Grid;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Grid rows
    #[arg(long, default_value_t = defs::GRID_ROWS)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = defs::GRID_COLS)]
    cols: usize,

    /// Cell size in pixels
    #[arg(long, default_value_t = defs::BLOCK_WIDTH)]
    cell: f32,
}

/// Maps held keys onto the two stick axes.
struct KeyAxes<'w>(&'w Window);

impl AxisSource for KeyAxes<'_> {
    fn axis(&self, axis: usize) -> f32 {
        let (neg, pos) = match axis {
            AXIS_X => ((Key::Left, Key::A), (Key::Right, Key::D)),
            AXIS_Y => ((Key::Up, Key::W), (Key::Down, Key::S)),
            _ => return 0.0,
        };
        let mut v = 0.0;
        if self.0.is_key_down(neg.0) || self.0.is_key_down(neg.1) {
            v -= 1.0;
        }
        if self.0.is_key_down(pos.0) || self.0.is_key_down(pos.1) {
            v += 1.0;
        }
        v
    }
}

/// Buttons that fire on key release (edit actions, jump cut-off).
const RELEASED: &[(Key, Button)] = &[
    (Key::Space, Button::A),
    (Key::I, Button::Y),
    (Key::E, Button::B),
    (Key::P, Button::X),
    (Key::L, Button::L1),
    (Key::R, Button::Share),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let grid = Grid::new(opts.rows, opts.cols, opts.cell, opts.cell);
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    let mut session = Session::new(grid);
    let mut canvas = Software::new(width, height, SpriteBank::with_placeholders());
    let clock = SystemClock::new();

    let mut win = Window::new("plat", width, height, WindowOptions::default())?;
    win.set_target_fps(defs::SIM_FPS as usize);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* --------------- buttons ------------------------------------- */
        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            session.next_mode(canvas.bank())?;
        }
        if win.is_key_pressed(Key::Space, KeyRepeat::No) {
            session.handle_button(ButtonEvent::Down(Button::A));
        }
        for &(key, button) in RELEASED {
            if win.is_key_released(key) {
                session.handle_button(ButtonEvent::Up(button));
            }
        }

        /* --------------- simulate ------------------------------------ */
        session.pump(&KeyAxes(&win), &clock);

        /* --------------- draw ---------------------------------------- */
        canvas.begin_frame(WHITE);
        session.draw(&mut canvas);
        let cell = opts.cell as i32;
        for row in 0..=session.grid().rows() as i32 {
            canvas.hline(row * cell, BLACK);
        }
        for col in 0..=session.grid().cols() as i32 {
            canvas.vline(col * cell, BLACK);
        }
        win.update_with_buffer(canvas.buffer(), width, height)?;
    }
    Ok(())
}
