//! Animation playback and the velocity → animation selector.
//!
//! Frame advance is wall-clock driven (a monotonic millisecond clock),
//! independent of the simulation tick rate. The asset registry that maps
//! names to frame sequences is a host collaborator behind
//! [`AnimationSource`]; entities resolve their animations once at spawn.

use std::cell::Cell;
use std::collections::HashMap;
use std::time::Instant;

use hecs::World;

use super::Velocity;

/* ── clock ──────────────────────────────────────────────────────────── */

pub trait Clock {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock, zeroed at construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-cranked clock for tests.
pub struct ManualClock(Cell<u64>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/* ── animations ─────────────────────────────────────────────────────── */

/// Opaque handle into the host's frame store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(pub u16);

#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<FrameId>,
    pub delay_ms: u64,
    /// Draw frames mirrored horizontally.
    pub flip: bool,
    cursor: usize,
    last_update: u64,
}

impl Animation {
    pub fn new(frames: Vec<FrameId>, delay_ms: u64, flip: bool) -> Self {
        assert!(!frames.is_empty(), "animation needs at least one frame");
        Self {
            frames,
            delay_ms,
            flip,
            cursor: 0,
            last_update: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> FrameId {
        self.frames[self.cursor]
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.last_update = 0;
    }

    /// Advance one frame (wrapping) when the delay has elapsed.
    pub fn advance(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_update) > self.delay_ms {
            self.cursor = (self.cursor + 1) % self.frames.len();
            self.last_update = now_ms;
        }
    }
}

/// External asset registry: name → frame sequence.
pub trait AnimationSource {
    fn animation(&self, name: &str, delay_ms: u64, flip: bool) -> Option<Animation>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("unknown animation `{0}`")]
    Unknown(String),
}

/// The animations one entity owns, plus which one is playing.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    map: HashMap<String, Animation>,
    current: String,
}

impl AnimationSet {
    pub fn new(
        entries: impl IntoIterator<Item = (String, Animation)>,
        initial: &str,
    ) -> Result<Self, AnimationError> {
        let map: HashMap<String, Animation> = entries.into_iter().collect();
        if !map.contains_key(initial) {
            return Err(AnimationError::Unknown(initial.to_string()));
        }
        Ok(Self {
            map,
            current: initial.to_string(),
        })
    }

    #[inline]
    pub fn current_name(&self) -> &str {
        &self.current
    }

    #[inline]
    pub fn current(&self) -> &Animation {
        &self.map[&self.current]
    }

    /// Switch the playing animation; both the old and the new animation
    /// rewind to frame 0. Switching to the playing animation is a no-op.
    pub fn change(&mut self, name: &str) -> Result<(), AnimationError> {
        if name == self.current {
            return Ok(());
        }
        if !self.map.contains_key(name) {
            return Err(AnimationError::Unknown(name.to_string()));
        }
        self.map.get_mut(&self.current).unwrap().rewind();
        self.current = name.to_string();
        self.map.get_mut(name).unwrap().rewind();
        Ok(())
    }

    pub fn advance(&mut self, now_ms: u64) {
        self.map.get_mut(&self.current).unwrap().advance(now_ms);
    }
}

/* ── selector ───────────────────────────────────────────────────────── */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Internal animation-set keys the selector switches between. Spawn code
/// registers all four; the selector treats a missing key as a wiring bug.
pub const WALK_RIGHT: &str = "walkRight";
pub const WALK_LEFT: &str = "walkLeft";
pub const STAND_RIGHT: &str = "standRight";
pub const STAND_LEFT: &str = "standLeft";

#[derive(Debug, Clone)]
pub struct Animated {
    pub set: AnimationSet,
    /// Last horizontal direction, for the idle pose.
    pub facing: Facing,
}

/// Pipeline step 5: derive the visual state from velocity.
pub fn select_animation(world: &mut World) {
    for (_, (vel, animated)) in world.query_mut::<(&Velocity, &mut Animated)>() {
        let name = if vel.0.x > 0.0 {
            animated.facing = Facing::Right;
            WALK_RIGHT
        } else if vel.0.x < 0.0 {
            animated.facing = Facing::Left;
            WALK_LEFT
        } else {
            match animated.facing {
                Facing::Right => STAND_RIGHT,
                Facing::Left => STAND_LEFT,
            }
        };
        animated
            .set
            .change(name)
            .expect("selector state missing from animation set");
    }
}

/// Pipeline step 6: advance the playing animation of every entity.
pub fn advance_frames(world: &mut World, clock: &dyn Clock) {
    let now = clock.now_ms();
    for (_, animated) in world.query_mut::<&mut Animated>() {
        animated.set.advance(now);
    }
}
