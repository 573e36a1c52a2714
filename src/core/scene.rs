//! Minimaler In-Memory-Szenengraph als Stellvertreter für die Host-Engine.
//!
//! Hält Posen, Begrenzungsradien, Tool-Tags und Holder-Einträge der Objekte
//! sowie deren deklarierte Werkzeug-Overrides. Rendering und Physik gehören
//! nicht hierher.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use indexmap::IndexMap;

use super::{GrabberId, ItemId, SpatialIndex, SpatialMatch, ToolTag};
use crate::tools::ItemOverrides;

/// Einzelnes Szenen-Objekt
#[derive(Debug, Clone)]
pub struct SceneItem {
    /// Handle des Objekts
    pub id: ItemId,
    /// Anzeigename (nur für Logs)
    pub name: String,
    /// Mittelpunkt in Weltkoordinaten
    pub position: Vec3,
    /// Orientierung in Weltkoordinaten
    pub rotation: Quat,
    /// Radius der Begrenzungskugel
    pub radius: f32,
    /// Tool-Tag-Bitmaske (wird von Werkzeugen additiv gesetzt)
    pub tool_tag: ToolTag,
    /// Greifer, an dem das Objekt aktuell hängt
    pub holder: Option<GrabberId>,
}

impl SceneItem {
    /// Erstellt ein Objekt ohne Rotation, Tags und Holder.
    pub fn new(id: ItemId, name: impl Into<String>, position: Vec3, radius: f32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            radius,
            tool_tag: ToolTag::NONE,
            holder: None,
        }
    }
}

/// Container für alle Szenen-Objekte
#[derive(Debug)]
pub struct Scene {
    items: IndexMap<ItemId, SceneItem>,
    overrides: HashMap<ItemId, ItemOverrides>,
    /// Höhe der Bodenebene (Y), auf die Placer Objekte absetzen
    ground_height: f32,
    next_id: u64,
    spatial_index: SpatialIndex,
    spatial_dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Erstellt eine leere Szene mit Bodenebene auf Höhe 0.
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
            overrides: HashMap::new(),
            ground_height: 0.0,
            next_id: 1,
            spatial_index: SpatialIndex::empty(),
            spatial_dirty: false,
        }
    }

    /// Fügt ein neues Objekt hinzu und gibt dessen Handle zurück.
    pub fn add_item(&mut self, name: impl Into<String>, position: Vec3, radius: f32) -> ItemId {
        let id = ItemId(self.next_id);
        self.insert_item(SceneItem::new(id, name, position, radius));
        id
    }

    /// Fügt ein fertig konfiguriertes Objekt hinzu (ersetzt ein vorhandenes mit gleicher ID).
    pub fn insert_item(&mut self, item: SceneItem) {
        self.next_id = self.next_id.max(item.id.0 + 1);
        self.items.insert(item.id, item);
        self.spatial_dirty = true;
    }

    /// Entfernt ein Objekt inklusive seiner Overrides.
    pub fn remove_item(&mut self, id: ItemId) -> Option<SceneItem> {
        let removed = self.items.shift_remove(&id);
        if removed.is_some() {
            self.overrides.remove(&id);
            self.spatial_dirty = true;
        }
        removed
    }

    pub fn item(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(&id)
    }

    /// Mutabler Zugriff; markiert den Spatial-Index als veraltet.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut SceneItem> {
        let item = self.items.get_mut(&id)?;
        self.spatial_dirty = true;
        Some(item)
    }

    /// Setzt Position und Rotation eines Objekts.
    pub fn set_item_pose(&mut self, id: ItemId, position: Vec3, rotation: Quat) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        item.position = position;
        item.rotation = rotation;
        true
    }

    /// Ergänzt die Tool-Tag-Bitmaske eines Objekts (fremde Bits bleiben erhalten).
    pub fn add_tool_tag(&mut self, id: ItemId, tag: ToolTag) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.tool_tag |= tag;
                true
            }
            None => false,
        }
    }

    /// Setzt den Holder-Eintrag eines Objekts.
    pub fn set_holder(&mut self, id: ItemId, holder: Option<GrabberId>) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.holder = holder;
                true
            }
            None => false,
        }
    }

    /// Deklariert Werkzeug-Overrides für ein Objekt.
    ///
    /// Greifer lesen die Deklarationen bei `set_items` ein; spätere Änderungen
    /// wirken erst nach erneutem `set_items`.
    pub fn declare_overrides(&mut self, id: ItemId, overrides: ItemOverrides) {
        if self.items.contains_key(&id) {
            self.overrides.insert(id, overrides);
        } else {
            log::warn!("Overrides für unbekanntes Objekt {} ignoriert", id);
        }
    }

    pub fn overrides(&self, id: ItemId) -> Option<&ItemOverrides> {
        self.overrides.get(&id)
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn set_ground_height(&mut self, height: f32) {
        self.ground_height = height;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iteriert über alle Objekte in Einfügereihenfolge.
    pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
        self.items.values()
    }

    /// Größter Begrenzungsradius aller Objekte (0.0 bei leerer Szene).
    pub fn max_item_radius(&self) -> f32 {
        self.items
            .values()
            .map(|item| item.radius)
            .fold(0.0, f32::max)
    }

    /// Baut den Spatial-Index neu auf, falls Objekte bewegt oder geändert wurden.
    pub fn ensure_spatial_index(&mut self) {
        if self.spatial_dirty {
            self.spatial_index = SpatialIndex::from_items(&self.items);
            self.spatial_dirty = false;
        }
    }

    /// Gibt `true` zurück, wenn der Index seit der letzten Änderung nicht neu gebaut wurde.
    pub fn is_spatial_index_stale(&self) -> bool {
        self.spatial_dirty
    }

    /// Objekte mit Mittelpunkt innerhalb `radius`, aufsteigend nach Distanz.
    pub fn items_within(&self, query: Vec3, radius: f32) -> Vec<SpatialMatch> {
        if self.spatial_dirty {
            log::debug!("Spatial-Index veraltet, Abfrage nutzt letzten Stand");
        }
        self.spatial_index.within_radius(query, radius)
    }
}
