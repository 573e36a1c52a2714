//! Attacher: verwalten die Kante Greifer ↔ angeheftetes Objekt.

use std::fmt;
use std::rc::Rc;

use glam::{Quat, Vec3};

use crate::core::{GrabberId, GrabberPose, ItemId, Scene};

/// Schnittstelle für Attacher (starr, gefedert, …).
///
/// Ein Objekt hängt höchstens an einem Greifer: `attach` verweigert Objekte,
/// die bereits ein anderer Greifer hält.
pub trait Attacher {
    /// Heftet `item` an den Greifer. Gibt `false` zurück, wenn abgelehnt.
    fn attach(&mut self, scene: &mut Scene, pose: &GrabberPose, item: ItemId) -> bool;

    /// Löst das angeheftete Objekt und gibt es zurück.
    fn detach(&mut self, scene: &mut Scene) -> Option<ItemId>;

    /// Aktuell angeheftetes Objekt.
    fn dst(&self) -> Option<ItemId>;

    /// Führt das angeheftete Objekt der neuen Greifer-Pose nach.
    fn follow(&mut self, scene: &mut Scene, pose: &GrabberPose);
}

/// Erzeugt einen objekt-spezifischen Attacher für einen Greifer.
#[derive(Clone)]
pub struct AttacherFactory {
    build: Rc<dyn Fn(GrabberId) -> Box<dyn Attacher>>,
}

impl AttacherFactory {
    pub fn new(build: impl Fn(GrabberId) -> Box<dyn Attacher> + 'static) -> Self {
        Self {
            build: Rc::new(build),
        }
    }

    pub fn build(&self, grabber: GrabberId) -> Box<dyn Attacher> {
        (self.build)(grabber)
    }
}

impl fmt::Debug for AttacherFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttacherFactory").finish_non_exhaustive()
    }
}

/// Gemeinsamer Zustand: Ziel-Objekt plus Offset im lokalen Greifer-Raum.
#[derive(Debug, Clone, Copy)]
struct AttachmentLink {
    item: ItemId,
    local_offset: Vec3,
    local_rotation: Quat,
}

impl AttachmentLink {
    /// Legt den Link an und trägt den Holder ein; `None` wenn das Objekt
    /// fehlt oder schon an einem anderen Greifer hängt.
    fn establish(
        scene: &mut Scene,
        grabber: GrabberId,
        pose: &GrabberPose,
        item: ItemId,
    ) -> Option<Self> {
        let entry = scene.item(item)?;
        if let Some(other) = entry.holder.filter(|h| *h != grabber) {
            log::debug!("{} hängt bereits an {}, Anheften abgelehnt", item, other);
            return None;
        }
        let link = Self {
            item,
            local_offset: pose.to_local(entry.position),
            local_rotation: pose.rotation.inverse() * entry.rotation,
        };
        scene.set_holder(item, Some(grabber));
        Some(link)
    }

    fn target(&self, pose: &GrabberPose) -> (Vec3, Quat) {
        (
            pose.to_world(self.local_offset),
            pose.rotation * self.local_rotation,
        )
    }

    fn release(self, scene: &mut Scene, grabber: GrabberId) {
        let still_ours = scene
            .item(self.item)
            .is_some_and(|item| item.holder == Some(grabber));
        if still_ours {
            scene.set_holder(self.item, None);
        }
    }
}

/// Link-Verwaltung eines Greifers, von allen Attachern geteilt.
/// Die Varianten unterscheiden sich nur in `follow`.
#[derive(Debug, Clone)]
struct LinkSlot {
    grabber: GrabberId,
    link: Option<AttachmentLink>,
}

impl LinkSlot {
    fn new(grabber: GrabberId) -> Self {
        Self {
            grabber,
            link: None,
        }
    }

    /// Ersetzt einen bestehenden Link; `false` wenn `item` abgelehnt wird.
    fn attach(&mut self, scene: &mut Scene, pose: &GrabberPose, item: ItemId) -> bool {
        if let Some(old) = self.link.take() {
            old.release(scene, self.grabber);
        }
        self.link = AttachmentLink::establish(scene, self.grabber, pose, item);
        self.link.is_some()
    }

    fn detach(&mut self, scene: &mut Scene) -> Option<ItemId> {
        let link = self.link.take()?;
        link.release(scene, self.grabber);
        Some(link.item)
    }

    fn dst(&self) -> Option<ItemId> {
        self.link.map(|l| l.item)
    }
}

// ── Starr ────────────────────────────────────────────────────────

/// Starre Anheftung: das Objekt folgt dem Greifer exakt.
#[derive(Debug, Clone)]
pub struct GrabAttacher {
    slot: LinkSlot,
}

impl GrabAttacher {
    pub fn new(grabber: GrabberId) -> Self {
        Self {
            slot: LinkSlot::new(grabber),
        }
    }
}

impl Attacher for GrabAttacher {
    fn attach(&mut self, scene: &mut Scene, pose: &GrabberPose, item: ItemId) -> bool {
        self.slot.attach(scene, pose, item)
    }

    fn detach(&mut self, scene: &mut Scene) -> Option<ItemId> {
        self.slot.detach(scene)
    }

    fn dst(&self) -> Option<ItemId> {
        self.slot.dst()
    }

    fn follow(&mut self, scene: &mut Scene, pose: &GrabberPose) {
        let Some(link) = self.slot.link else {
            return;
        };
        let (position, rotation) = link.target(pose);
        scene.set_item_pose(link.item, position, rotation);
    }
}

// ── Gefedert ─────────────────────────────────────────────────────

/// Gefederte Anheftung: das Objekt nähert sich pro Tick um `stiffness`
/// (0..=1) der starren Zielpose an.
#[derive(Debug, Clone)]
pub struct SpringAttacher {
    slot: LinkSlot,
    stiffness: f32,
}

impl SpringAttacher {
    pub fn new(grabber: GrabberId, stiffness: f32) -> Self {
        Self {
            slot: LinkSlot::new(grabber),
            stiffness: stiffness.clamp(0.0, 1.0),
        }
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }
}

impl Attacher for SpringAttacher {
    fn attach(&mut self, scene: &mut Scene, pose: &GrabberPose, item: ItemId) -> bool {
        self.slot.attach(scene, pose, item)
    }

    fn detach(&mut self, scene: &mut Scene) -> Option<ItemId> {
        self.slot.detach(scene)
    }

    fn dst(&self) -> Option<ItemId> {
        self.slot.dst()
    }

    fn follow(&mut self, scene: &mut Scene, pose: &GrabberPose) {
        let Some(link) = self.slot.link else {
            return;
        };
        let (target_pos, target_rot) = link.target(pose);
        let Some(item) = scene.item(link.item) else {
            return;
        };
        let position = item.position.lerp(target_pos, self.stiffness);
        let rotation = item.rotation.slerp(target_rot, self.stiffness);
        scene.set_item_pose(link.item, position, rotation);
    }
}
