use glam::Vec3;
use tracing::{debug, info};
use wallwalker_physics::{CollisionLayer, CollisionQuery, MovementComponent, MovementMode, Object};

use crate::config::WallWalkConfig;
use crate::input::ControlRotation;
use crate::state::{ExitReason, WallWalkEvent, WallWalkState};
use crate::surface::{self, SurfaceBasis, SurfaceDirection};

/// Wall-walking state machine for one character
///
/// Owns the movement component it drives and the identity of the body its
/// traces must ignore. The pose and the collision world are lent per call.
pub struct WallWalkController<M, B> {
    config: WallWalkConfig,
    movement: M,
    owner: B,
    state: WallWalkState,
}

impl<M, B> WallWalkController<M, B>
where
    M: MovementComponent,
    B: Copy,
{
    /// Create a new controller
    ///
    /// # Arguments
    /// * `config` - Probe distances and thresholds
    /// * `movement` - Movement component mutated on entry and exit
    /// * `owner` - The character's own body, excluded from every trace
    pub fn new(config: WallWalkConfig, movement: M, owner: B) -> Self {
        Self {
            config,
            movement,
            owner,
            state: WallWalkState::Inactive,
        }
    }

    pub fn config(&self) -> &WallWalkConfig {
        &self.config
    }

    pub fn state(&self) -> &WallWalkState {
        &self.state
    }

    pub fn is_wall_walking(&self) -> bool {
        self.state.is_active()
    }

    pub fn surface_direction(&self) -> Option<SurfaceDirection> {
        self.state.surface_direction()
    }

    pub fn movement(&self) -> &M {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut M {
        &mut self.movement
    }

    pub fn owner(&self) -> B {
        self.owner
    }

    /// Feed this frame's wall-walk axis value
    ///
    /// `control` is the controlling input source; `None` means nobody is
    /// possessing the character.
    pub fn update_intent<Q, P>(
        &mut self,
        world: &Q,
        pose: &mut P,
        control: Option<&ControlRotation>,
        axis_value: f32,
    ) -> WallWalkEvent
    where
        Q: CollisionQuery<Body = B>,
        P: Object,
    {
        let control = match control {
            Some(control) if axis_value != 0.0 => control,
            other => {
                if !self.state.is_active() {
                    return WallWalkEvent::Idle;
                }
                let reason = if other.is_none() {
                    ExitReason::NoController
                } else {
                    ExitReason::IntentReleased
                };
                self.exit(pose);
                debug!(?reason, "wall walk released");
                return WallWalkEvent::Exited(reason);
            }
        };

        match self.state {
            WallWalkState::Inactive => self.try_enter(world, pose),
            WallWalkState::Active {
                surface_direction, ..
            } => {
                if !self.revalidate(world, pose) {
                    return WallWalkEvent::Exited(ExitReason::SurfaceLost);
                }
                self.apply_surface_movement(pose, control, surface_direction, axis_value);
                WallWalkEvent::Moved(surface_direction)
            }
        }
    }

    /// Look for a surface ahead and start wall-walking on it
    ///
    /// Leaves the state untouched when nothing is hit or the space behind
    /// the surface is too tight.
    pub fn try_enter<Q, P>(&mut self, world: &Q, pose: &mut P) -> WallWalkEvent
    where
        Q: CollisionQuery<Body = B>,
        P: Object,
    {
        if self.state.is_active() {
            return WallWalkEvent::Idle;
        }

        let ignore = [self.owner];
        let origin = pose.position();
        let forward = pose.forward();
        let probe = self.config.probe_distance;

        let Some(wall) = world.line_trace(
            origin,
            origin + forward * probe,
            CollisionLayer::WorldStatic,
            &ignore,
        ) else {
            return WallWalkEvent::Idle;
        };
        let Some(normal) = wall.normal.try_normalize() else {
            debug!(?wall, "wall walk entry ignored, degenerate surface normal");
            return WallWalkEvent::Idle;
        };

        let backing = world.line_trace(
            origin,
            origin - normal * probe,
            CollisionLayer::WorldStatic,
            &ignore,
        );
        if let Some(hit) = backing {
            let gap = hit.point.distance(origin);
            if gap <= self.config.cramped_distance {
                debug!(gap, "wall walk entry blocked, too cramped");
                return WallWalkEvent::EntryBlocked;
            }
        }

        let right = pose.right();
        let direction = surface::classify_surface(
            forward,
            right,
            normal,
            self.config.floor_angle_threshold,
        );
        let saved_rotation = pose.rotation();

        self.movement.set_gravity_scale(0.0);
        self.movement.set_movement_mode(MovementMode::Falling);

        match direction {
            SurfaceDirection::Up => {
                let speed = self.movement.max_walk_speed();
                self.movement.set_vertical_velocity(speed);
                pose.set_rotation((pose.rotation() * surface::pitch(90.0)).normalize());
            }
            SurfaceDirection::Left | SurfaceDirection::Right => {
                let basis = SurfaceBasis::align(right, pose.up(), normal);
                pose.set_basis(basis.forward, basis.right, basis.up);

                let contact = backing.unwrap_or(wall);
                pose.set_position(contact.point + contact.normal * self.config.standing_offset());
                pose.set_scale(Vec3::ONE);

                let turn = if direction == SurfaceDirection::Left {
                    -90.0
                } else {
                    90.0
                };
                pose.set_rotation((pose.rotation() * surface::yaw(turn)).normalize());
            }
        }

        self.state = WallWalkState::Active {
            surface_direction: direction,
            saved_rotation,
        };

        info!(
            ?direction,
            angle = surface::approach_angle_degrees(forward, normal),
            distance = wall.distance,
            "wall walk started"
        );
        WallWalkEvent::Entered(direction)
    }

    /// Check the character is still supported by a surface
    ///
    /// On failure the character is snapped onto a ledge right below it when
    /// one exists, and the session ends. Returns whether it is still valid.
    pub fn revalidate<Q, P>(&mut self, world: &Q, pose: &mut P) -> bool
    where
        Q: CollisionQuery<Body = B>,
        P: Object,
    {
        if !self.state.is_active() {
            return false;
        }

        let ignore = [self.owner];
        let origin = pose.position();
        let up = pose.up();

        let support = world.line_trace(
            origin,
            origin - up * self.config.support_distance,
            CollisionLayer::WorldStatic,
            &ignore,
        );
        if support.is_some() {
            return true;
        }

        let start = origin - up * (self.config.capsule_half_height + self.config.capsule_radius);
        let end = start + Vec3::NEG_Z * self.config.ledge_probe_distance;
        if let Some(ledge) = world.line_trace(start, end, CollisionLayer::WorldStatic, &ignore) {
            let snapped = ledge.point + ledge.normal * self.config.standing_offset();
            debug!(?snapped, "snapping onto ledge");
            pose.set_position(snapped);
        }

        self.exit(pose);
        info!("wall walk surface lost");
        false
    }

    /// End the session and restore normal locomotion
    ///
    /// Returns the surface direction that was active, if any.
    pub fn exit<P: Object>(&mut self, pose: &mut P) -> Option<SurfaceDirection> {
        let WallWalkState::Active {
            surface_direction,
            saved_rotation,
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        self.movement.set_gravity_scale(1.0);
        self.movement.set_vertical_velocity(0.0);
        self.movement.set_movement_mode(MovementMode::Walking);
        pose.set_rotation(saved_rotation);

        debug!(?surface_direction, "wall walk ended");
        Some(surface_direction)
    }

    fn apply_surface_movement<P: Object>(
        &mut self,
        pose: &P,
        control: &ControlRotation,
        direction: SurfaceDirection,
        axis_value: f32,
    ) {
        let along = match direction {
            SurfaceDirection::Up => control.yaw_up(),
            SurfaceDirection::Right => pose.forward(),
            SurfaceDirection::Left => -pose.forward(),
        };
        self.movement.add_movement_input(along, axis_value);
    }
}
