//! Map markers and their registry-resolved kinds

use super::identifier::Identifier;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Highest rotation value a marker can carry (16 facings)
pub const MAX_ROTATION: u8 = 15;

/// Mask applied to rotations so they wrap onto the 16 facings
pub const ROTATION_MASK: u8 = 0x0F;

/// Errors for malformed identifiers and markers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Marker rotation {0} is outside 0..=15")]
    RotationOutOfRange(u8),
}

/// Runtime identity of a marker kind, as handed out by a kind registry
///
/// The raw id is whatever the registry assigned in this game instance and is
/// kept for diagnostics only. Equality and hashing go through the identifier,
/// so two lookups of the same kind always compare equal.
#[derive(Clone)]
pub struct MarkerKind {
    raw_id: u32,
    identifier: Identifier,
}

impl MarkerKind {
    pub fn new(raw_id: u32, identifier: Identifier) -> Self {
        Self { raw_id, identifier }
    }

    pub fn raw_id(&self) -> u32 {
        self.raw_id
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Whether this kind is the one registered under `identifier`
    pub fn matches_id(&self, identifier: &Identifier) -> bool {
        self.identifier == *identifier
    }
}

impl PartialEq for MarkerKind {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for MarkerKind {}

impl Hash for MarkerKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Debug for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkerKind({}#{})", self.identifier, self.raw_id)
    }
}

/// A single icon on a map
///
/// Coordinates live in the map's square marker space, `-128..=127` per axis
/// with the usable edge at +/-127. The rotation is kept exactly as the host
/// handed it over; see [`Marker::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    pub kind: MarkerKind,
    pub x: i8,
    pub z: i8,
    pub rotation: u8,
    pub label: Option<String>,
}

impl Marker {
    /// Create a marker, wrapping the rotation onto the 16 facings
    pub fn new(kind: MarkerKind, x: i8, z: i8, rotation: u8, label: Option<String>) -> Self {
        Self {
            kind,
            x,
            z,
            rotation: rotation & ROTATION_MASK,
            label,
        }
    }

    /// Copy of this marker with a different kind and rotation
    pub fn with_kind_and_rotation(&self, kind: MarkerKind, rotation: u8) -> Self {
        Self::new(kind, self.x, self.z, rotation, self.label.clone())
    }

    /// Check the fields a host could have filled in badly
    pub fn validate(&self) -> Result<(), MarkerError> {
        if self.rotation > MAX_ROTATION {
            return Err(MarkerError::RotationOutOfRange(self.rotation));
        }
        Ok(())
    }
}
