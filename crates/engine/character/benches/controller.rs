//! Benchmark for the per-frame wall-walk update
//!
//! Measures entry detection from an idle character and the steady-state
//! revalidate-and-move path while attached to a wall.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use std::hint::black_box;
use wallwalker_character::{ControlRotation, WallWalkCharacter, WallWalkConfig};
use wallwalker_physics::{spawn_static_box, MovementConfig, PhysicsWorld};

const DT: f32 = 1.0 / 60.0;

fn arena() -> PhysicsWorld {
    let mut world = PhysicsWorld::new(Vec3::new(0.0, 0.0, -980.0));
    spawn_static_box(&mut world, Vec3::new(0.0, 0.0, -10.0), Vec3::new(5000.0, 5000.0, 10.0));
    spawn_static_box(&mut world, Vec3::new(150.0, 0.0, 5000.0), Vec3::new(50.0, 5000.0, 5000.0));
    world.update_query_pipeline();
    world
}

fn spawn(world: &mut PhysicsWorld, yaw: f32) -> WallWalkCharacter {
    WallWalkCharacter::spawn(
        world,
        Vec3::new(0.0, 0.0, 96.0),
        yaw,
        WallWalkConfig::default(),
        MovementConfig::default(),
    )
}

fn bench_entry(c: &mut Criterion) {
    let control = ControlRotation::default();

    c.bench_function("wall_walk_entry", |b| {
        let mut world = arena();
        let mut character = spawn(&mut world, 0.0);
        b.iter(|| {
            let event = character.tick(&mut world, Some(&control), 1.0, DT);
            // Drop back off so the next iteration detects the wall again
            character.tick(&mut world, Some(&control), 0.0, DT);
            black_box(event)
        });
    });
}

fn bench_attached(c: &mut Criterion) {
    let control = ControlRotation::default();

    c.bench_function("wall_walk_attached", |b| {
        let mut world = arena();
        let mut character = spawn(&mut world, 45f32.to_radians());
        character.tick(&mut world, Some(&control), 1.0, DT);
        let anchor = *character.pose();
        b.iter(|| {
            // Keep the character in range of the wall
            character.set_pose(&mut world, anchor);
            black_box(character.tick(&mut world, Some(&control), 1.0, DT))
        });
    });
}

criterion_group!(benches, bench_entry, bench_attached);
criterion_main!(benches);
