//! Line-trace queries against collision layers
//!
//! A miss is `None`, never an error. Callers treat both outcomes as valid
//! answers and decide from there.

use glam::Vec3;
use rapier3d::prelude::{Group, InteractionGroups};

/// Collision layer a collider belongs to, and that a trace can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Level geometry that never moves
    WorldStatic,
    /// Moving props and physics objects
    WorldDynamic,
    /// Characters
    Pawn,
}

impl CollisionLayer {
    /// Rapier group bit for this layer
    pub fn group(self) -> Group {
        match self {
            CollisionLayer::WorldStatic => Group::GROUP_1,
            CollisionLayer::WorldDynamic => Group::GROUP_2,
            CollisionLayer::Pawn => Group::GROUP_3,
        }
    }

    /// Interaction groups for a collider living on this layer
    ///
    /// Colliders accept tests from every layer; traces do the filtering.
    pub fn collider_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.group(), Group::ALL)
    }

    /// Interaction groups for a trace that only sees this layer
    pub fn query_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, self.group())
    }
}

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// World-space hit location
    pub point: Vec3,
    /// Unit surface normal at the hit, pointing away from the solid
    pub normal: Vec3,
    /// Distance from the trace start
    pub distance: f32,
}

/// Synchronous line-trace service.
///
/// `Body` identifies something a trace may ignore, usually the caller itself.
pub trait CollisionQuery {
    type Body: Copy;

    /// Trace the segment `start..end` against `layer`, skipping `ignore`.
    ///
    /// Returns the closest hit, or `None` when the segment is clear. A hit
    /// always carries a unit normal.
    fn line_trace(
        &self,
        start: Vec3,
        end: Vec3,
        layer: CollisionLayer,
        ignore: &[Self::Body],
    ) -> Option<RaycastHit>;
}

impl<T: CollisionQuery + ?Sized> CollisionQuery for &T {
    type Body = T::Body;

    fn line_trace(
        &self,
        start: Vec3,
        end: Vec3,
        layer: CollisionLayer,
        ignore: &[Self::Body],
    ) -> Option<RaycastHit> {
        (**self).line_trace(start, end, layer, ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_have_distinct_groups() {
        let layers = [
            CollisionLayer::WorldStatic,
            CollisionLayer::WorldDynamic,
            CollisionLayer::Pawn,
        ];
        for (i, a) in layers.iter().enumerate() {
            for b in &layers[i + 1..] {
                assert!((a.group() & b.group()).is_empty());
            }
        }
    }

    #[test]
    fn test_query_groups_only_see_target_layer() {
        let query = CollisionLayer::WorldStatic.query_groups();
        assert!(query.test(CollisionLayer::WorldStatic.collider_groups()));
        assert!(!query.test(CollisionLayer::WorldDynamic.collider_groups()));
        assert!(!query.test(CollisionLayer::Pawn.collider_groups()));
    }
}
