//! Welt-Pose eines Greifers (Hand oder Zeigestrahl).

use glam::{Quat, Vec3};

/// Position und Orientierung des Greifer-Nodes in Weltkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabberPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for GrabberPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GrabberPose {
    /// Pose im Ursprung ohne Rotation.
    pub const IDENTITY: GrabberPose = GrabberPose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Erstellt eine Pose an `position` ohne Rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Erstellt eine Pose an `position`, deren Blickrichtung auf `target` zeigt.
    ///
    /// Fällt auf keine Rotation zurück, wenn `target` mit `position` zusammenfällt.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::at(position);
        }
        Self {
            position,
            rotation: Quat::from_rotation_arc(Vec3::Z, dir),
        }
    }

    /// Blickrichtung (lokale +Z-Achse) in Weltkoordinaten.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Transformiert einen Weltpunkt in den lokalen Raum des Greifers.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Transformiert einen lokalen Punkt in Weltkoordinaten.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}
