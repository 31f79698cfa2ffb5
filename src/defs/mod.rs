//! Tuning constants for the stock entities and the default animation table.
//!
//! Everything a level designer would want to tweak lives here; the sim
//! modules only ever see these values through the spawn functions.

use glam::Vec2;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fixed simulation rate (tics per second).
pub const SIM_FPS: u32 = 60;

/* ── grid defaults ─────────────────────────────────────────────────── */

pub const GRID_ROWS: usize = 20;
pub const GRID_COLS: usize = 20;
pub const BLOCK_WIDTH: f32 = 40.0;
pub const BLOCK_HEIGHT: f32 = 40.0;

/* ── integration ───────────────────────────────────────────────────── */

/// Velocity components below this snap to exactly zero after integration.
pub const VEL_EPSILON: f32 = 0.125;

/// Raw axis readings are clamped to ±this before scaling.
pub const AXIS_CLAMP: f32 = 0.99;

/// Snap threshold for `vel.x` after a liquid slowdown is applied.
pub const LIQUID_VEL_EPSILON: f32 = 0.1;

/* ── editor cursor ("arrow") ───────────────────────────────────────── */

pub const ARROW_SPEED: Vec2 = Vec2::new(10.0, 10.0);
pub const ARROW_FRICTION: f32 = -0.7;
pub const ARROW_DEADZONE: f32 = 0.12;
pub const ARROW_SIZE: f32 = 10.0;

/* ── player ────────────────────────────────────────────────────────── */

pub const PLAYER_SPEED: Vec2 = Vec2::new(0.6, 0.0);
pub const PLAYER_FRICTION: f32 = -0.09;
pub const PLAYER_DEADZONE: f32 = 0.12;
pub const PLAYER_GRAVITY: f32 = 0.76;
pub const PLAYER_JUMP_FORCE: f32 = 21.0;
pub const PLAYER_MIN_JUMP: f32 = 1.0;
pub const PLAYER_SIZE: f32 = 10.0;

/// Where both the cursor and the player appear when a mode starts.
pub const SPAWN_POS: Vec2 = Vec2::new(40.0, 40.0);

/* ── animations ────────────────────────────────────────────────────── */

/// Default per-frame delay in milliseconds.
pub const FRAME_DELAY_MS: u64 = 120;

/// Registry keys understood by the stock `AnimationSource` impls.
pub const ANIM_STAND: &str = "playerStand";
pub const ANIM_WALK: &str = "playerWalk";

/// Animation name → ordered sprite-frame names.
pub static ANIMATIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    map.insert(ANIM_STAND, &["blue_01", "blue_02", "blue_03"][..]);
    map.insert(
        ANIM_WALK,
        &["blue_04", "blue_05", "blue_06", "blue_07", "blue_08"][..],
    );
    map
});
