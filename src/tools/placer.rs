//! Placer: bestimmen die Ruheposition eines losgelassenen Objekts und
//! berechnen während des Haltens eine Vorschau.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{GrabberPose, ItemId, Scene};

/// Geteilter Placer (Standard-Placer oder objekt-spezifischer Override).
pub type SharedPlacer = Rc<RefCell<dyn Placer>>;

/// Schnittstelle für Placer.
pub trait Placer {
    /// Wird beim Greifen mit dem gegriffenen Objekt aufgerufen.
    fn initialize(&mut self, scene: &Scene, item: ItemId);

    /// Schaltet die Vorschau ein/aus.
    fn set_preview_enabled(&mut self, enabled: bool);

    /// Aktualisiert die Vorschau für das gehaltene Objekt (einmal pro Tick).
    fn preview(&mut self, scene: &Scene, pose: &GrabberPose, item: ItemId);

    /// Setzt das losgelassene Objekt auf seine Ruhepose.
    fn place(&mut self, scene: &mut Scene, item: ItemId);

    /// Zuletzt berechnetes Vorschau-Ziel (für die Darstellung durch den Host).
    fn preview_target(&self) -> Option<Vec3> {
        None
    }
}

/// Ablegemodus für Hand-Greifer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Objekt bleibt dort, wo es losgelassen wird
    #[default]
    MidAir,
    /// Objekt kehrt an die Position vor dem Greifen zurück
    Inspection,
    /// Objekt fällt senkrecht auf den Boden
    DropDown,
    /// Objekt landet dort, wo der Greifer-Strahl den Boden trifft
    PointAndPlace,
}

impl PlacementMode {
    /// Erzeugt den passenden Placer.
    pub fn build(self) -> SharedPlacer {
        match self {
            PlacementMode::MidAir => Rc::new(RefCell::new(MidAirPlacer::default())),
            PlacementMode::Inspection => Rc::new(RefCell::new(InspectionPlacer::default())),
            PlacementMode::DropDown => Rc::new(RefCell::new(DropDownPlacer::default())),
            PlacementMode::PointAndPlace => {
                Rc::new(RefCell::new(PointAndPlacePlacer::default()))
            }
        }
    }
}

/// Vorschau-Zustand, den alle Placer teilen.
#[derive(Debug, Clone, Copy, Default)]
struct PreviewState {
    enabled: bool,
    target: Option<Vec3>,
}

impl PreviewState {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.target = None;
        }
    }
}

// ── MidAir ───────────────────────────────────────────────────────

/// Lässt das Objekt an Ort und Stelle.
#[derive(Debug, Clone, Default)]
pub struct MidAirPlacer {
    preview: PreviewState,
}

impl Placer for MidAirPlacer {
    fn initialize(&mut self, _scene: &Scene, _item: ItemId) {}

    fn set_preview_enabled(&mut self, enabled: bool) {
        self.preview.set_enabled(enabled);
    }

    fn preview(&mut self, scene: &Scene, _pose: &GrabberPose, item: ItemId) {
        if self.preview.enabled {
            self.preview.target = scene.item(item).map(|i| i.position);
        }
    }

    fn place(&mut self, _scene: &mut Scene, item: ItemId) {
        log::debug!("{} bleibt an aktueller Position", item);
    }

    fn preview_target(&self) -> Option<Vec3> {
        self.preview.target
    }
}

// ── DropDown ─────────────────────────────────────────────────────

/// Setzt das Objekt senkrecht unter seiner Position auf den Boden.
#[derive(Debug, Clone, Default)]
pub struct DropDownPlacer {
    preview: PreviewState,
}

fn resting_on_ground(scene: &Scene, item: ItemId) -> Option<Vec3> {
    let entry = scene.item(item)?;
    Some(Vec3::new(
        entry.position.x,
        scene.ground_height() + entry.radius,
        entry.position.z,
    ))
}

impl Placer for DropDownPlacer {
    fn initialize(&mut self, _scene: &Scene, _item: ItemId) {}

    fn set_preview_enabled(&mut self, enabled: bool) {
        self.preview.set_enabled(enabled);
    }

    fn preview(&mut self, scene: &Scene, _pose: &GrabberPose, item: ItemId) {
        if self.preview.enabled {
            self.preview.target = resting_on_ground(scene, item);
        }
    }

    fn place(&mut self, scene: &mut Scene, item: ItemId) {
        let Some(target) = resting_on_ground(scene, item) else {
            return;
        };
        if let Some(entry) = scene.item_mut(item) {
            entry.position = target;
        }
    }

    fn preview_target(&self) -> Option<Vec3> {
        self.preview.target
    }
}

// ── Inspection ───────────────────────────────────────────────────

/// Legt das Objekt nach dem Betrachten wieder an seine Ursprungspose.
#[derive(Debug, Clone, Default)]
pub struct InspectionPlacer {
    preview: PreviewState,
    origin: Option<(ItemId, Vec3, Quat)>,
}

impl Placer for InspectionPlacer {
    fn initialize(&mut self, scene: &Scene, item: ItemId) {
        self.origin = scene
            .item(item)
            .map(|entry| (item, entry.position, entry.rotation));
    }

    fn set_preview_enabled(&mut self, enabled: bool) {
        self.preview.set_enabled(enabled);
    }

    fn preview(&mut self, _scene: &Scene, _pose: &GrabberPose, item: ItemId) {
        if self.preview.enabled {
            self.preview.target = self
                .origin
                .filter(|(origin_item, _, _)| *origin_item == item)
                .map(|(_, pos, _)| pos);
        }
    }

    fn place(&mut self, scene: &mut Scene, item: ItemId) {
        match self.origin.take() {
            Some((origin_item, position, rotation)) if origin_item == item => {
                scene.set_item_pose(item, position, rotation);
            }
            _ => log::debug!("InspectionPlacer: keine Ursprungspose für {}", item),
        }
    }

    fn preview_target(&self) -> Option<Vec3> {
        self.preview.target
    }
}

// ── PointAndPlace ────────────────────────────────────────────────

/// Setzt das Objekt dort ab, wo die Blickrichtung des Greifers den Boden trifft.
///
/// Ohne gültigen Bodentreffer bleibt das Objekt an Ort und Stelle.
#[derive(Debug, Clone, Default)]
pub struct PointAndPlacePlacer {
    preview: PreviewState,
    last_target: Option<Vec3>,
}

/// Schnittpunkt des Greifer-Strahls mit der Bodenebene.
fn ground_hit(pose: &GrabberPose, ground: f32) -> Option<Vec3> {
    let dir = pose.forward();
    if dir.y > -f32::EPSILON {
        return None;
    }
    let t = (ground - pose.position.y) / dir.y;
    (t >= 0.0).then(|| pose.position + dir * t)
}

impl Placer for PointAndPlacePlacer {
    fn initialize(&mut self, _scene: &Scene, _item: ItemId) {
        self.last_target = None;
    }

    fn set_preview_enabled(&mut self, enabled: bool) {
        self.preview.set_enabled(enabled);
    }

    fn preview(&mut self, scene: &Scene, pose: &GrabberPose, item: ItemId) {
        if !self.preview.enabled {
            return;
        }
        let radius = scene.item(item).map_or(0.0, |i| i.radius);
        self.last_target =
            ground_hit(pose, scene.ground_height()).map(|hit| hit + Vec3::Y * radius);
        self.preview.target = self.last_target;
    }

    fn place(&mut self, scene: &mut Scene, item: ItemId) {
        if let Some(target) = self.last_target.take() {
            if let Some(entry) = scene.item_mut(item) {
                entry.position = target;
            }
        }
    }

    fn preview_target(&self) -> Option<Vec3> {
        self.preview.target
    }
}
