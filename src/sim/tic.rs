//! Fixed-rate tick driver. Owns the entity world and runs the behavior
//! pipeline in its contractual order.

use std::time::{Duration, Instant};

use hecs::World;

use crate::defs::SIM_FPS;
use crate::world::Grid;

use super::{AxisSource, Clock, animation, collision, input, jump, mover};

const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Owns the *hecs* world and advances it at a fixed rate.
pub struct TicRunner {
    world: World,
    last: Instant,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run enough ticks to catch the simulation up with real time.
    pub fn pump(&mut self, grid: &Grid, axes: &dyn AxisSource, clock: &dyn Clock) {
        while self.last.elapsed() >= TIC {
            self.tick(grid, axes, clock);
            self.last += TIC;
        }
    }

    /// One simulation tick. The stage order is a hard contract: input
    /// before acceleration, integration before collision, collision
    /// before the jump machine, and animation last.
    pub fn tick(&mut self, grid: &Grid, axes: &dyn AxisSource, clock: &dyn Clock) {
        input::sample_input(&mut self.world, axes);
        mover::integrate(&mut self.world, grid);
        collision::resolve(&mut self.world, grid);
        jump::jump_system(&mut self.world, grid);
        animation::select_animation(&mut self.world);
        animation::advance_frames(&mut self.world, clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{
        JumpCmd, JumpState, Jumper, ManualClock, NoDevice, Position, Velocity, spawn_player,
    };
    use crate::sim::{Animation, AnimationSource, FrameId};
    use crate::world::Block;
    use glam::Vec2;

    struct OneFrame;

    impl AnimationSource for OneFrame {
        fn animation(&self, name: &str, delay_ms: u64, flip: bool) -> Option<Animation> {
            crate::defs::ANIMATIONS
                .contains_key(name)
                .then(|| Animation::new(vec![FrameId(0)], delay_ms, flip))
        }
    }

    #[test]
    fn player_falls_lands_and_can_jump() {
        let mut grid = Grid::new(20, 20, 40.0, 40.0);
        // a floor row at cells (0..20, 12): top edge at y = 480
        for col in 0..20 {
            grid.set_square(col as f32 * 40.0 + 1.0, 481.0, Block::solid(0, 0));
        }

        let mut sim = TicRunner::new();
        let clock = ManualClock::new();
        let player = spawn_player(sim.world_mut(), &OneFrame).unwrap();
        sim.world_mut()
            .get::<&mut Position>(player)
            .unwrap()
            .0 = Vec2::new(420.0, 300.0);

        // fall under gravity until grounded
        for _ in 0..200 {
            sim.tick(&grid, &NoDevice, &clock);
        }
        let pos = sim.world().get::<&Position>(player).unwrap().0;
        let state = sim.world().get::<&Jumper>(player).unwrap().state;
        assert_eq!(pos.y, 480.0, "landed flush on the floor row");
        assert_eq!(state, JumpState::Grounded);

        // a queued jump launches with the exact jump force
        sim.world_mut()
            .get::<&mut Jumper>(player)
            .unwrap()
            .push(JumpCmd::Start);
        sim.tick(&grid, &NoDevice, &clock);
        let vel = sim.world().get::<&Velocity>(player).unwrap().0;
        assert!(vel.y < 0.0, "moving upward after jump, got {}", vel.y);
        assert_eq!(
            sim.world().get::<&Jumper>(player).unwrap().state,
            JumpState::Ascending
        );
    }
}
