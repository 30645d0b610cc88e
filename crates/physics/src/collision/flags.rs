//! Layer masks for collision filtering.
//!
//! Every brush in the world carries a [`LayerMask`]. Queries pass a mask and
//! only see brushes whose layers intersect it, so movement probes can look
//! at ground geometry while ignoring pickups and switches.

use serde::{Deserialize, Serialize};

/// Set of collision layers a brush belongs to (or a query accepts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const EMPTY: Self = Self(0);

    /// Static ground geometry - floors, walls, ceilings, slopes.
    pub const GROUND: Self = Self(1 << 0);

    /// One-way or moving platforms that still block movement probes.
    pub const PLATFORM: Self = Self(1 << 1);

    /// Objects the actor can push or use (crates, levers).
    pub const INTERACTABLE: Self = Self(1 << 2);

    /// Trigger volumes - never block movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Decoration that only exists for rendering.
    pub const DECORATION: Self = Self(1 << 4);

    /// Everything movement probes collide with.
    pub const MASK_MOVEMENT: Self = Self(Self::GROUND.0 | Self::PLATFORM.0);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Check if these layers contain every layer in `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Check if no layer is set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
