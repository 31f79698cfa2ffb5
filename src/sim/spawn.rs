//! Stock entity assembly: which capabilities each entity carries, wired
//! with the tuning constants from [`defs`](crate::defs).

use glam::Vec2;
use hecs::{Entity, World};

use crate::defs;
use crate::renderer::{BLUE, GREY};

use super::animation::{STAND_LEFT, STAND_RIGHT, WALK_LEFT, WALK_RIGHT};
use super::{
    Animated, AnimationError, AnimationSet, AnimationSource, Collider, Facing, FrictionAxis,
    InputDriven, Jumper, Mover, Position, Sprite, Velocity,
};

/// Editor cursor: input-driven free flight, friction on both axes, no
/// gravity, no collision.
pub fn spawn_arrow(world: &mut World) -> Entity {
    world.spawn((
        Position(defs::SPAWN_POS),
        Velocity::default(),
        Mover::new(Vec2::ZERO, defs::ARROW_FRICTION, FrictionAxis::Both),
        InputDriven {
            scale: defs::ARROW_SPEED,
            deadzone: defs::ARROW_DEADZONE,
        },
        Sprite {
            color: BLUE,
            size: Vec2::splat(defs::ARROW_SIZE),
        },
    ))
}

/// Player: gravity, horizontal input with X friction, collision, jumping,
/// walk/stand animations.
///
/// Fails when the registry lacks the default animations, a wiring bug in
/// the host, reported rather than recovered.
pub fn spawn_player(
    world: &mut World,
    registry: &dyn AnimationSource,
) -> Result<Entity, AnimationError> {
    let resolve = |name: &str, flip: bool| {
        registry
            .animation(name, defs::FRAME_DELAY_MS, flip)
            .ok_or_else(|| AnimationError::Unknown(name.to_string()))
    };

    let set = AnimationSet::new(
        [
            (WALK_RIGHT.to_string(), resolve(defs::ANIM_WALK, false)?),
            (WALK_LEFT.to_string(), resolve(defs::ANIM_WALK, true)?),
            (STAND_RIGHT.to_string(), resolve(defs::ANIM_STAND, false)?),
            (STAND_LEFT.to_string(), resolve(defs::ANIM_STAND, true)?),
        ],
        STAND_RIGHT,
    )?;

    Ok(world.spawn((
        Position(defs::SPAWN_POS),
        Velocity::default(),
        Mover::new(
            Vec2::new(0.0, defs::PLAYER_GRAVITY),
            defs::PLAYER_FRICTION,
            FrictionAxis::X,
        ),
        InputDriven {
            scale: defs::PLAYER_SPEED,
            deadzone: defs::PLAYER_DEADZONE,
        },
        Collider::new(Vec2::splat(defs::PLAYER_SIZE)),
        Jumper::new(defs::PLAYER_JUMP_FORCE, defs::PLAYER_MIN_JUMP),
        Animated {
            set,
            facing: Facing::Right,
        },
        Sprite {
            color: GREY,
            size: Vec2::splat(defs::PLAYER_SIZE),
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Animation;
    use crate::sim::FrameId;

    struct OneFrame;

    impl AnimationSource for OneFrame {
        fn animation(&self, name: &str, delay_ms: u64, flip: bool) -> Option<Animation> {
            defs::ANIMATIONS
                .contains_key(name)
                .then(|| Animation::new(vec![FrameId(0)], delay_ms, flip))
        }
    }

    struct EmptyRegistry;

    impl AnimationSource for EmptyRegistry {
        fn animation(&self, _: &str, _: u64, _: bool) -> Option<Animation> {
            None
        }
    }

    #[test]
    fn player_carries_the_full_capability_stack() {
        let mut world = World::new();
        let e = spawn_player(&mut world, &OneFrame).unwrap();
        assert!(world.satisfies::<(&Position, &Velocity, &Mover, &InputDriven)>(e).unwrap());
        assert!(world.satisfies::<(&Collider, &Jumper, &Animated, &Sprite)>(e).unwrap());
        let mover = world.get::<&Mover>(e).unwrap();
        assert_eq!(mover.base_accel, Vec2::new(0.0, defs::PLAYER_GRAVITY));
        assert_eq!(mover.friction_axis, FrictionAxis::X);
    }

    #[test]
    fn arrow_has_no_collision_or_gravity() {
        let mut world = World::new();
        let e = spawn_arrow(&mut world);
        assert!(!world.satisfies::<&Collider>(e).unwrap());
        assert!(!world.satisfies::<&Jumper>(e).unwrap());
        assert_eq!(world.get::<&Mover>(e).unwrap().base_accel, Vec2::ZERO);
    }

    #[test]
    fn missing_registry_entries_surface_as_unknown() {
        let mut world = World::new();
        let err = spawn_player(&mut world, &EmptyRegistry).unwrap_err();
        assert_eq!(err, AnimationError::Unknown(defs::ANIM_WALK.to_string()));
    }
}
