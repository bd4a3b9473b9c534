//! Core data model: identifiers, marker kinds, markers and player state

pub mod identifier;
pub mod marker;
pub mod player;

pub use identifier::{Identifier, DEFAULT_NAMESPACE};
pub use marker::{Marker, MarkerError, MarkerKind, MAX_ROTATION, ROTATION_MASK};
pub use player::{MarkerListQuery, PlayerPose};
