//! Objekt-spezifische Werkzeug-Overrides.
//!
//! Objekte können eigene Strategien deklarieren; fehlt ein Eintrag, greift
//! der Standard des Greifers. Die Tabelle wird bei `set_items` aus den
//! Deklarationen der Szene befüllt.

use std::collections::HashMap;
use std::fmt;

use super::{AttacherFactory, CollisionTesterFactory, SharedHighlighter, SharedPlacer};
use crate::core::ItemId;

/// Override-Record eines Objekts. Alle Felder sind optional.
#[derive(Clone, Default)]
pub struct ItemOverrides {
    /// Eigener Kollisions-Tester (pro Factory eine Instanz je Greifer)
    pub collision_tester: Option<CollisionTesterFactory>,
    /// Eigener Attacher (wird beim Greifen neu erzeugt)
    pub attacher: Option<AttacherFactory>,
    /// Eigener Placer
    pub placer: Option<SharedPlacer>,
    /// Eigener Highlighter
    pub highlighter: Option<SharedHighlighter>,
}

impl ItemOverrides {
    pub fn with_collision_tester(mut self, factory: CollisionTesterFactory) -> Self {
        self.collision_tester = Some(factory);
        self
    }

    pub fn with_attacher(mut self, factory: AttacherFactory) -> Self {
        self.attacher = Some(factory);
        self
    }

    pub fn with_placer(mut self, placer: SharedPlacer) -> Self {
        self.placer = Some(placer);
        self
    }

    pub fn with_highlighter(mut self, highlighter: SharedHighlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// `true` wenn kein Override gesetzt ist.
    pub fn is_empty(&self) -> bool {
        self.collision_tester.is_none()
            && self.attacher.is_none()
            && self.placer.is_none()
            && self.highlighter.is_none()
    }
}

impl fmt::Debug for ItemOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemOverrides")
            .field(
                "collision_tester",
                &self.collision_tester.as_ref().map(|c| c.key()),
            )
            .field("attacher", &self.attacher.is_some())
            .field("placer", &self.placer.is_some())
            .field("highlighter", &self.highlighter.is_some())
            .finish()
    }
}

/// Lookup-Tabelle ItemId → Overrides (nur Presence-Abfragen, kein Attribut-Probing).
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<ItemId, ItemOverrides>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trägt Overrides ein; leere Records werden nicht gespeichert.
    pub fn insert(&mut self, item: ItemId, overrides: ItemOverrides) {
        if overrides.is_empty() {
            self.entries.remove(&item);
        } else {
            self.entries.insert(item, overrides);
        }
    }

    pub fn get(&self, item: ItemId) -> Option<&ItemOverrides> {
        self.entries.get(&item)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn collision_tester(&self, item: ItemId) -> Option<&CollisionTesterFactory> {
        self.get(item)?.collision_tester.as_ref()
    }

    pub fn attacher(&self, item: ItemId) -> Option<&AttacherFactory> {
        self.get(item)?.attacher.as_ref()
    }

    pub fn placer(&self, item: ItemId) -> Option<&SharedPlacer> {
        self.get(item)?.placer.as_ref()
    }

    pub fn highlighter(&self, item: ItemId) -> Option<&SharedHighlighter> {
        self.get(item)?.highlighter.as_ref()
    }
}
