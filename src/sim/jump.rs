//! The jump state machine: initiation gated by ground contact, variable
//! height via early release.

use hecs::World;
use smallvec::SmallVec;

use crate::world::Grid;

use super::{Collider, Position, Velocity, collision::is_on_plat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    /// Jump force applied, still moving upward.
    Ascending,
    /// Post-peak, or cut short by release; falling.
    Airborne,
}

/// Button edges queued by the host, consumed once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpCmd {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct Jumper {
    pub state: JumpState,
    /// Upward speed set on initiation.
    pub force: f32,
    /// Remaining upward speed after an early release is capped to this.
    pub min_jump: f32,
    pending: SmallVec<[JumpCmd; 2]>,
}

impl Jumper {
    pub fn new(force: f32, min_jump: f32) -> Self {
        Self {
            state: JumpState::Grounded,
            force,
            min_jump,
            pending: SmallVec::new(),
        }
    }

    /// Queue a button edge for the next tick.
    pub fn push(&mut self, cmd: JumpCmd) {
        self.pending.push(cmd);
    }
}

/// Pipeline step 4: run every jumper's state machine. Must run after
/// collision resolution so ground contact reflects this tick's corrected
/// position.
pub fn jump_system(world: &mut World, grid: &Grid) {
    for (_, (pos, vel, collider, jumper)) in
        world.query_mut::<(&Position, &mut Velocity, &Collider, &mut Jumper)>()
    {
        let grounded = is_on_plat(grid, pos.0, collider.size);

        for cmd in std::mem::take(&mut jumper.pending) {
            match cmd {
                // initiation requires ground contact at this instant;
                // jumping while airborne is a silent no-op
                JumpCmd::Start => {
                    if grounded {
                        vel.0.y = -jumper.force;
                        jumper.state = JumpState::Ascending;
                    }
                }
                // short-hop: cap remaining upward speed
                JumpCmd::End => {
                    if jumper.state == JumpState::Ascending {
                        if vel.0.y < -jumper.min_jump {
                            vel.0.y = -jumper.min_jump;
                        }
                        jumper.state = JumpState::Airborne;
                    }
                }
            }
        }

        jumper.state = match jumper.state {
            JumpState::Ascending if vel.0.y >= 0.0 => {
                if grounded {
                    JumpState::Grounded
                } else {
                    JumpState::Airborne
                }
            }
            JumpState::Airborne if grounded => JumpState::Grounded,
            JumpState::Grounded if !grounded => JumpState::Airborne,
            state => state,
        };
    }
}
