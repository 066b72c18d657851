//! Scripted wall-walk run in a floor-and-wall arena

use glam::Vec3;
use tracing::{debug, info};
use wallwalker_character::{ControlRotation, WallWalkCharacter, WallWalkEvent};
use wallwalker_physics::{spawn_static_box, PhysicsWorld, Pose};

use crate::config::SimConfig;

/// Wall thickness along X
const WALL_THICKNESS: f32 = 100.0;
/// Half-width of the arena and wall along Y
const ARENA_HALF_WIDTH: f32 = 2000.0;

/// A frame on which something other than idling or moving happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub frame: u32,
    pub event: WallWalkEvent,
    pub position: Vec3,
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct SimReport {
    pub transitions: Vec<Transition>,
    /// Frames spent attached to a surface
    pub attached_frames: u32,
    pub final_pose: Pose,
    pub wall_walking_at_end: bool,
}

impl SimReport {
    pub fn entries(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.event, WallWalkEvent::Entered(_)))
            .count()
    }

    pub fn exits(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.event, WallWalkEvent::Exited(_)))
            .count()
    }
}

/// Build the arena: a floor with its top at z = 0 and a wall whose face is
/// `wall_distance` ahead of the origin along +X.
pub fn build_arena(config: &SimConfig) -> PhysicsWorld {
    let scenario = &config.scenario;
    let mut world = PhysicsWorld::new(Vec3::new(0.0, 0.0, -config.movement.gravity));

    spawn_static_box(
        &mut world,
        Vec3::new(0.0, 0.0, -10.0),
        Vec3::new(ARENA_HALF_WIDTH * 2.0, ARENA_HALF_WIDTH * 2.0, 10.0),
    );
    spawn_static_box(
        &mut world,
        Vec3::new(
            scenario.wall_distance + WALL_THICKNESS / 2.0,
            0.0,
            scenario.wall_height / 2.0,
        ),
        Vec3::new(
            WALL_THICKNESS / 2.0,
            ARENA_HALF_WIDTH,
            scenario.wall_height / 2.0,
        ),
    );

    world.update_query_pipeline();
    world
}

/// Run the configured scenario to completion
pub fn run(config: &SimConfig) -> anyhow::Result<SimReport> {
    config.validate()?;

    let scenario = &config.scenario;
    let mut world = build_arena(config);
    let mut character = WallWalkCharacter::spawn(
        &mut world,
        Vec3::new(0.0, 0.0, config.wall_walk.capsule_half_height),
        scenario.start_yaw_degrees.to_radians(),
        config.wall_walk,
        config
            .movement
            .to_movement_config(config.wall_walk.capsule_half_height),
    );

    info!(
        frames = scenario.frames,
        wall_distance = scenario.wall_distance,
        yaw = scenario.start_yaw_degrees,
        "starting scenario"
    );

    let control = ControlRotation::new(scenario.view_yaw_degrees.to_radians(), 0.0);
    let mut transitions = Vec::new();
    let mut attached_frames = 0;

    for frame in 0..scenario.frames {
        let input = scenario.input_at(frame);
        let event = character.apply_input(&mut world, Some(&control), &input, scenario.dt);
        world.step(scenario.dt);

        match event {
            WallWalkEvent::Idle => {}
            WallWalkEvent::Moved(_) => {
                attached_frames += 1;
            }
            _ => {
                let position = character.position();
                info!(frame, ?event, ?position, "transition");
                transitions.push(Transition {
                    frame,
                    event,
                    position,
                });
            }
        }

        if character.controller().is_wall_walking() {
            debug!(frame, position = ?character.position(), "attached");
        }
    }

    Ok(SimReport {
        transitions,
        attached_frames,
        final_pose: *character.pose(),
        wall_walking_at_end: character.controller().is_wall_walking(),
    })
}
