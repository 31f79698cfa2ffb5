//! One level session: the grid, the entity world, and the two modes that
//! share them.
//!
//! Edit mode flies an arrow cursor over the grid and paints blocks; play
//! mode runs the player. Switching modes tears the current mode's
//! entities down and spawns the next mode's; the grid itself persists,
//! only the explicit reset action regenerates it.

use hecs::Entity;

use crate::renderer::Canvas;
use crate::sim::{
    Animated, AnimationError, AnimationSource, AxisSource, Clock, JumpCmd, Jumper, Position,
    Sprite, TicRunner, spawn_arrow, spawn_player,
};
use crate::world::{Aabb, Block, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Play,
}

/// Controller buttons the engine understands. The host maps whatever
/// physical device it has onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    X,
    A,
    B,
    Y,
    L1,
    Share,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Down(Button),
    Up(Button),
}

/// Editor operations, all applied at the cursor's current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Log the block under the cursor.
    Inspect,
    Erase,
    PaintSolid,
    PaintLiquid,
    ResetGrid,
}

/// Default liquid drag painted by the editor.
const LIQUID_SLOWDOWN: f32 = 3.0;

pub struct Session {
    grid: Grid,
    sim: TicRunner,
    mode: Mode,
    avatar: Entity,
}

impl Session {
    /// A fresh session starts in edit mode with the arrow cursor.
    pub fn new(grid: Grid) -> Self {
        let mut sim = TicRunner::new();
        let avatar = spawn_arrow(sim.world_mut());
        log::info!("session started in edit mode on {grid}");
        Self {
            grid,
            sim,
            mode: Mode::Edit,
            avatar,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn world(&self) -> &hecs::World {
        self.sim.world()
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut hecs::World {
        self.sim.world_mut()
    }

    /// The current mode's controllable entity.
    #[inline]
    pub fn avatar(&self) -> Entity {
        self.avatar
    }

    /// Cycle Edit → Play → Edit. All entities of the old mode are
    /// despawned; the grid keeps its edits.
    pub fn next_mode(&mut self, registry: &dyn AnimationSource) -> Result<(), AnimationError> {
        self.sim.world_mut().clear();
        self.mode = match self.mode {
            Mode::Edit => {
                self.avatar = spawn_player(self.sim.world_mut(), registry)?;
                Mode::Play
            }
            Mode::Play => {
                self.avatar = spawn_arrow(self.sim.world_mut());
                Mode::Edit
            }
        };
        log::info!("switched to {:?} mode", self.mode);
        Ok(())
    }

    /// Catch the simulation up with real time.
    pub fn pump(&mut self, axes: &dyn AxisSource, clock: &dyn Clock) {
        self.sim.pump(&self.grid, axes, clock);
    }

    /// Advance exactly one tick (tests, deterministic hosts).
    pub fn tick(&mut self, axes: &dyn AxisSource, clock: &dyn Clock) {
        self.sim.tick(&self.grid, axes, clock);
    }

    /// Route a button edge to the current mode.
    pub fn handle_button(&mut self, event: ButtonEvent) {
        match self.mode {
            Mode::Play => {
                let cmd = match event {
                    ButtonEvent::Down(Button::A) => Some(JumpCmd::Start),
                    ButtonEvent::Up(Button::A) => Some(JumpCmd::End),
                    _ => None,
                };
                if let Some(cmd) = cmd {
                    if let Ok(mut jumper) = self.sim.world_mut().get::<&mut Jumper>(self.avatar) {
                        jumper.push(cmd);
                    }
                }
            }
            // editor actions fire on release so a held button paints once
            Mode::Edit => {
                let action = match event {
                    ButtonEvent::Up(Button::Y) => Some(EditAction::Inspect),
                    ButtonEvent::Up(Button::B) => Some(EditAction::Erase),
                    ButtonEvent::Up(Button::X) => Some(EditAction::PaintSolid),
                    ButtonEvent::Up(Button::L1) => Some(EditAction::PaintLiquid),
                    ButtonEvent::Up(Button::Share) => Some(EditAction::ResetGrid),
                    _ => None,
                };
                if let Some(action) = action {
                    self.apply_edit(action);
                }
            }
        }
    }

    /// Apply an editor action at the cursor's cell.
    pub fn apply_edit(&mut self, action: EditAction) {
        let Ok(pos) = self.sim.world().get::<&Position>(self.avatar) else {
            return;
        };
        let (x, y) = (pos.0.x, pos.0.y);
        drop(pos);

        match action {
            EditAction::Inspect => {
                log::info!("{:?}", self.grid.get_square(x, y));
            }
            EditAction::Erase => self.grid.set_square(x, y, Block::empty(0, 0)),
            EditAction::PaintSolid => self.grid.set_square(x, y, Block::solid(0, 0)),
            EditAction::PaintLiquid => {
                self.grid.set_square(x, y, Block::liquid(0, 0, LIQUID_SLOWDOWN))
            }
            EditAction::ResetGrid => self.grid.reset(),
        }
    }

    /// Draw the session: terrain first, entities on top.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let block = self.grid.block_at(col, row);
                canvas.fill_rect(block.color, self.grid.block_aabb(block));
            }
        }

        for (_, (pos, sprite, animated)) in self
            .sim
            .world()
            .query::<(&Position, &Sprite, Option<&Animated>)>()
            .iter()
        {
            let dst = Aabb::from_midbottom(pos.0, sprite.size);
            match animated {
                Some(animated) => {
                    let anim = animated.set.current();
                    canvas.draw(anim.current(), dst, anim.flip);
                }
                None => canvas.fill_rect(sprite.color, dst),
            }
        }
    }
}
