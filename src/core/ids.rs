//! Handles für Szenen-Objekte und Greifer sowie die Tool-Tag-Bitmaske.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Opakes Handle auf ein Szenen-Objekt (gehört dem Host-Szenengraphen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item#{}", self.0)
    }
}

/// Identität eines Greifers (wird in Events und Holder-Einträgen mitgeführt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrabberId(pub u32);

impl fmt::Display for GrabberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grabber#{}", self.0)
    }
}

/// Bitmaske zur Eingrenzung von Kollisionsabfragen auf markierte Objekte.
///
/// Mehrere Werkzeuge in derselben Szene markieren ihre Objekte mit eigenen
/// Bits und fragen nur Objekte mit passendem Bit ab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ToolTag(pub u32);

impl ToolTag {
    /// Keine Markierung
    pub const NONE: ToolTag = ToolTag(0);
    /// Markierung für greifbare Objekte
    pub const GRAB: ToolTag = ToolTag(1);
    /// Markierung für Objekte anderer Werkzeuge (z.B. Zeiger, Menüs)
    pub const POINT: ToolTag = ToolTag(1 << 1);

    /// Prüft ob mindestens ein Bit von `other` gesetzt ist.
    pub fn intersects(self, other: ToolTag) -> bool {
        self.0 & other.0 != 0
    }

    /// Prüft ob alle Bits von `other` gesetzt sind.
    pub fn contains(self, other: ToolTag) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ToolTag {
    type Output = ToolTag;

    fn bitor(self, rhs: ToolTag) -> ToolTag {
        ToolTag(self.0 | rhs.0)
    }
}

impl BitOrAssign for ToolTag {
    fn bitor_assign(&mut self, rhs: ToolTag) {
        self.0 |= rhs.0;
    }
}
