//! Highlighter: schalten den visuellen Hervorhebungseffekt für Objekte.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::ItemId;

/// Geteilter Highlighter (Standard oder objekt-spezifisch).
pub type SharedHighlighter = Rc<RefCell<dyn Highlighter>>;

/// Schnittstelle für Highlighter.
pub trait Highlighter {
    /// Registriert den Effekt für ein Objekt (sichtbar).
    fn add(&mut self, item: ItemId);

    /// Entfernt den Effekt vollständig.
    fn remove(&mut self, item: ItemId);

    /// Blendet einen registrierten Effekt ein/aus.
    fn set_visible(&mut self, item: ItemId, visible: bool);
}

/// Darstellungsart der Hervorhebung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighlightMode {
    /// Umriss um das Objekt
    #[default]
    Outline,
    /// Begrenzungsbox
    Box,
    /// Pfeil über dem Objekt
    Arrow,
}

impl HighlightMode {
    /// Erzeugt einen Highlighter für diesen Modus.
    pub fn build(self) -> SharedHighlighter {
        Rc::new(RefCell::new(OutlineHighlighter::new(self)))
    }
}

/// Registry-basierter Highlighter: merkt sich pro Objekt, ob der Effekt
/// registriert und sichtbar ist. Der Host liest den Zustand zum Zeichnen.
#[derive(Debug, Clone, Default)]
pub struct OutlineHighlighter {
    mode: HighlightMode,
    entries: IndexMap<ItemId, bool>,
}

impl OutlineHighlighter {
    pub fn new(mode: HighlightMode) -> Self {
        Self {
            mode,
            entries: IndexMap::new(),
        }
    }

    pub fn mode(&self) -> HighlightMode {
        self.mode
    }

    pub fn is_registered(&self, item: ItemId) -> bool {
        self.entries.contains_key(&item)
    }

    pub fn is_visible(&self, item: ItemId) -> bool {
        self.entries.get(&item).copied().unwrap_or(false)
    }

    /// Alle aktuell sichtbaren Objekte in Registrierungsreihenfolge.
    pub fn visible_items(&self) -> Vec<ItemId> {
        self.entries
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn registered_count(&self) -> usize {
        self.entries.len()
    }
}

impl Highlighter for OutlineHighlighter {
    fn add(&mut self, item: ItemId) {
        self.entries.insert(item, true);
    }

    fn remove(&mut self, item: ItemId) {
        self.entries.shift_remove(&item);
    }

    fn set_visible(&mut self, item: ItemId, visible: bool) {
        match self.entries.get_mut(&item) {
            Some(entry) => *entry = visible,
            None => log::debug!("Highlight für {} nicht registriert", item),
        }
    }
}
