//! Kollisions-Tester: bestimmen das nächstgelegene Objekt für eine Greifer-Pose.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use glam::Vec3;

use crate::core::{GrabberId, GrabberPose, ItemId, Scene, SceneItem, ToolTag};

/// Ergebnis einer Kollisionsabfrage.
///
/// Eine negative Distanz bedeutet "kein Treffer".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub item: Option<ItemId>,
    pub distance: f32,
}

impl Hit {
    /// Kein Treffer
    pub const MISS: Hit = Hit {
        item: None,
        distance: -1.0,
    };

    pub fn new(item: ItemId, distance: f32) -> Self {
        Self {
            item: Some(item),
            distance,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.distance >= 0.0 && self.item.is_some()
    }
}

/// Schnittstelle für Kollisions-Tester (Distanz, Strahl, Physik, …).
pub trait CollisionTester {
    /// Ersetzt die Menge der zu testenden Objekte.
    fn set_items(&mut self, items: &[ItemId]);

    /// Aktuell registrierte Objekte.
    fn items(&self) -> &[ItemId];

    /// Liefert das nächstgelegene Objekt für die Pose.
    ///
    /// Mit `tag` werden nur Objekte berücksichtigt, deren Tool-Tag mindestens
    /// ein Bit des Filters trägt. Fehler werden vom Greifer gemeldet und als
    /// Fehlschlag gewertet.
    fn get(&self, scene: &Scene, pose: &GrabberPose, tag: Option<ToolTag>)
        -> anyhow::Result<Hit>;
}

/// Erzeugt pro Greifer eine eigene Tester-Instanz.
///
/// Die Identität der Factory ist ihr `key`: alle Objekte mit derselben
/// Factory teilen sich eine Tester-Instanz.
#[derive(Clone)]
pub struct CollisionTesterFactory {
    key: &'static str,
    build: Rc<dyn Fn(GrabberId) -> Box<dyn CollisionTester>>,
}

impl CollisionTesterFactory {
    pub fn new(
        key: &'static str,
        build: impl Fn(GrabberId) -> Box<dyn CollisionTester> + 'static,
    ) -> Self {
        Self {
            key,
            build: Rc::new(build),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn build(&self, grabber: GrabberId) -> Box<dyn CollisionTester> {
        (self.build)(grabber)
    }
}

impl fmt::Debug for CollisionTesterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionTesterFactory")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn tag_matches(item: &SceneItem, tag: Option<ToolTag>) -> bool {
    tag.is_none_or(|t| item.tool_tag.intersects(t))
}

// ── Distanz ──────────────────────────────────────────────────────

/// Trifft das Objekt, dessen Begrenzungskugel innerhalb von `radius` um den
/// Greifer liegt und dessen Mittelpunkt am nächsten ist.
///
/// Die gemeldete Distanz ist der Mittelpunktsabstand.
#[derive(Debug, Clone)]
pub struct DistanceTester {
    radius: f32,
    items: Vec<ItemId>,
    lookup: HashSet<ItemId>,
}

impl DistanceTester {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            items: Vec::new(),
            lookup: HashSet::new(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl CollisionTester for DistanceTester {
    fn set_items(&mut self, items: &[ItemId]) {
        self.items = items.to_vec();
        self.lookup = items.iter().copied().collect();
    }

    fn items(&self) -> &[ItemId] {
        &self.items
    }

    fn get(
        &self,
        scene: &Scene,
        pose: &GrabberPose,
        tag: Option<ToolTag>,
    ) -> anyhow::Result<Hit> {
        if self.items.is_empty() {
            return Ok(Hit::MISS);
        }

        // KD-Tree-Vorfilter über Mittelpunkte, exakte Prüfung gegen die Kugel
        let search_radius = self.radius + scene.max_item_radius();
        let hit = scene
            .items_within(pose.position, search_radius)
            .into_iter()
            .filter(|m| self.lookup.contains(&m.item))
            .find(|m| {
                scene.item(m.item).is_some_and(|item| {
                    tag_matches(item, tag) && m.distance - item.radius <= self.radius
                })
            });

        Ok(hit.map_or(Hit::MISS, |m| Hit::new(m.item, m.distance)))
    }
}

// ── Strahl ───────────────────────────────────────────────────────

/// Trifft das erste Objekt entlang der Blickrichtung des Greifers.
///
/// Die gemeldete Distanz ist die Strahllänge bis zur Kugeloberfläche.
#[derive(Debug, Clone)]
pub struct RayTester {
    max_distance: f32,
    items: Vec<ItemId>,
}

impl RayTester {
    pub fn new(max_distance: f32) -> Self {
        Self {
            max_distance,
            items: Vec::new(),
        }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }
}

impl CollisionTester for RayTester {
    fn set_items(&mut self, items: &[ItemId]) {
        self.items = items.to_vec();
    }

    fn items(&self) -> &[ItemId] {
        &self.items
    }

    fn get(
        &self,
        scene: &Scene,
        pose: &GrabberPose,
        tag: Option<ToolTag>,
    ) -> anyhow::Result<Hit> {
        let origin = pose.position;
        let dir = pose.forward().normalize_or_zero();
        if dir == Vec3::ZERO {
            anyhow::bail!("Greifer-Rotation liefert keine gültige Blickrichtung");
        }

        let mut best = Hit::MISS;
        for &id in &self.items {
            let Some(item) = scene.item(id) else {
                log::debug!("RayTester: {} nicht mehr in der Szene", id);
                continue;
            };
            if !tag_matches(item, tag) {
                continue;
            }
            let Some(t) = ray_sphere(origin, dir, item.position, item.radius) else {
                continue;
            };
            if t <= self.max_distance && (!best.is_hit() || t < best.distance) {
                best = Hit::new(id, t);
            }
        }
        Ok(best)
    }
}

/// Strahl/Kugel-Schnitt. Gibt die kleinste nicht-negative Strahllänge zurück.
pub(crate) fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    // Ursprung liegt in der Kugel
    let far = -b + sqrt_disc;
    (far >= 0.0).then_some(far)
}
