use glam::Quat;

use crate::surface::SurfaceDirection;

/// Wall-walking state of a character
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WallWalkState {
    #[default]
    Inactive,
    Active {
        surface_direction: SurfaceDirection,
        /// Rotation captured when the session began, restored on exit
        saved_rotation: Quat,
    },
}

impl WallWalkState {
    pub fn is_active(&self) -> bool {
        matches!(self, WallWalkState::Active { .. })
    }

    pub fn surface_direction(&self) -> Option<SurfaceDirection> {
        match self {
            WallWalkState::Active {
                surface_direction, ..
            } => Some(*surface_direction),
            WallWalkState::Inactive => None,
        }
    }

    pub fn saved_rotation(&self) -> Option<Quat> {
        match self {
            WallWalkState::Active { saved_rotation, .. } => Some(*saved_rotation),
            WallWalkState::Inactive => None,
        }
    }
}

/// Why a wall-walk session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The wall-walk axis dropped to zero
    IntentReleased,
    /// No controlling input source
    NoController,
    /// Neither the support probe nor the ledge probe found a surface
    SurfaceLost,
}

/// Outcome of one wall-walk update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallWalkEvent {
    /// Nothing to do this frame
    Idle,
    /// A surface was found and the session began
    Entered(SurfaceDirection),
    /// A surface was found but the space behind it is too tight
    EntryBlocked,
    /// Still attached; movement input was queued
    Moved(SurfaceDirection),
    /// The session ended
    Exited(ExitReason),
}
