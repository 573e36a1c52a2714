//! Kandidaten-Registry: greifbare Objekte, ihre Overrides und Tester-Gruppen.

use indexmap::{IndexMap, IndexSet};

use super::events::GrabEvent;
use super::state::GrabberStateMachine;
use crate::core::{ItemId, Scene};
use crate::tools::{CollisionTester, OverrideTable, SharedHighlighter};

/// Tester-Instanz einer Factory plus die Objekte, für die sie zuständig ist.
pub(crate) struct TesterGroup {
    pub(crate) tester: Box<dyn CollisionTester>,
    pub(crate) items: Vec<ItemId>,
}

/// Kandidatenmenge und abgeleitete Tester-Zuordnung.
pub(crate) struct CandidateRegistry {
    /// Geordnete, eindeutige Kandidaten
    pub(crate) items: IndexSet<ItemId>,
    /// Bei `set_items` aus der Szene übernommene Overrides
    pub(crate) overrides: OverrideTable,
    /// Testet alle Kandidaten ohne eigene Tester-Factory
    pub(crate) default_tester: Box<dyn CollisionTester>,
    /// Factory-Key → Gruppe, in Reihenfolge des ersten Auftretens
    pub(crate) groups: IndexMap<&'static str, TesterGroup>,
}

impl CandidateRegistry {
    pub(crate) fn new(default_tester: Box<dyn CollisionTester>) -> Self {
        Self {
            items: IndexSet::new(),
            overrides: OverrideTable::new(),
            default_tester,
            groups: IndexMap::new(),
        }
    }

    /// Kandidaten, die nur der Standard-Tester prüft.
    fn default_items(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .copied()
            .filter(|item| self.overrides.collision_tester(*item).is_none())
            .collect()
    }

    pub(crate) fn replace_default_tester(&mut self, mut tester: Box<dyn CollisionTester>) {
        tester.set_items(&self.default_items());
        self.default_tester = tester;
    }

    /// Übernimmt Overrides aus der Szene und baut Tester-Gruppen neu auf.
    fn rebuild(&mut self, scene: &Scene, grabber: crate::core::GrabberId) {
        self.overrides.clear();
        for &item in &self.items {
            if let Some(declared) = scene.overrides(item) {
                self.overrides.insert(item, declared.clone());
            }
        }

        let default_items = self.default_items();
        self.default_tester.set_items(&default_items);

        self.groups.clear();
        for &item in &self.items {
            let Some(factory) = self.overrides.collision_tester(item) else {
                continue;
            };
            self.groups
                .entry(factory.key())
                .or_insert_with(|| TesterGroup {
                    tester: factory.build(grabber),
                    items: Vec::new(),
                })
                .items
                .push(item);
        }
        for group in self.groups.values_mut() {
            group.tester.set_items(&group.items);
        }
    }

    /// Highlighter eines Objekts: eigener Override oder der Standard.
    pub(crate) fn resolve_highlighter(
        &self,
        item: ItemId,
        default: Option<&SharedHighlighter>,
    ) -> Option<SharedHighlighter> {
        self.overrides.highlighter(item).or(default).cloned()
    }
}

impl GrabberStateMachine {
    /// Ersetzt die Kandidatenmenge.
    ///
    /// Registriert alle Kandidaten beim Standard-Tester bzw. ihrer Tester-Gruppe,
    /// lädt Highlights vor (falls aktiviert) und ergänzt ihr Tool-Tag.
    /// Herausgefallene Objekte werden vorher losgelassen und entleuchtet.
    pub fn set_items(&mut self, scene: &mut Scene, items: &[ItemId]) {
        let next: IndexSet<ItemId> = items.iter().copied().collect();
        let dropped: Vec<ItemId> = self
            .registry
            .items
            .iter()
            .copied()
            .filter(|item| !next.contains(item))
            .collect();
        if !dropped.is_empty() {
            self.retire_items(scene, &dropped);
        }

        self.registry.items = next;
        self.registry.rebuild(scene, self.id);

        if self.settings.pre_load_highlights {
            for &item in &self.registry.items {
                if let Some(hl) = self
                    .registry
                    .resolve_highlighter(item, self.highlighter.as_ref())
                {
                    let mut hl = hl.borrow_mut();
                    hl.add(item);
                    hl.set_visible(item, false);
                }
            }
            // Vorladen blendet alles aus; überlebendes Highlight wieder zeigen
            if let (Some(item), Some(hl)) = (
                self.intersection.highlighted,
                self.intersection.highlighted_by.as_ref(),
            ) {
                hl.borrow_mut().set_visible(item, true);
            }
        }

        if self.settings.use_tool_tag {
            for &item in &self.registry.items {
                if !scene.add_tool_tag(item, self.settings.tag) {
                    log::debug!("{}: {} nicht in der Szene, kein Tag gesetzt", self.id, item);
                }
            }
        }

        self.resolve_pending = true;
        log::debug!(
            "{}: {} Kandidaten, {} Tester-Gruppen",
            self.id,
            self.registry.items.len(),
            self.registry.groups.len()
        );
    }

    /// Ergänzt Kandidaten; bereits vorhandene werden ignoriert.
    pub fn add_items(&mut self, scene: &mut Scene, items: &[ItemId]) {
        let fresh: Vec<ItemId> = items
            .iter()
            .copied()
            .filter(|item| !self.registry.items.contains(item))
            .collect();
        if fresh.is_empty() {
            return;
        }
        let mut all: Vec<ItemId> = self.registry.items.iter().copied().collect();
        all.extend(fresh);
        self.set_items(scene, &all);
    }

    /// Entfernt Kandidaten und baut Registrierungen und Gruppen neu auf.
    pub fn remove_items(&mut self, scene: &mut Scene, items: &[ItemId]) {
        let remaining: Vec<ItemId> = self
            .registry
            .items
            .iter()
            .copied()
            .filter(|item| !items.contains(item))
            .collect();
        if remaining.len() == self.registry.items.len() {
            return;
        }
        self.set_items(scene, &remaining);
    }

    /// Räumt Zustand auf, der auf nicht mehr registrierte Objekte zeigt.
    fn retire_items(&mut self, scene: &mut Scene, dropped: &[ItemId]) {
        if self.attached().is_some_and(|item| dropped.contains(&item)) {
            log::info!("{}: angeheftetes Objekt wird aus den Kandidaten entfernt", self.id);
            self.release(scene);
        }
        if self.attachment.held.is_some_and(|item| dropped.contains(&item)) {
            self.attachment.held = None;
        }

        if let Some(item) = self.intersection.highlighted.filter(|i| dropped.contains(i)) {
            if let Some(hl) = self.intersection.highlighted_by.take() {
                self.hide_highlight(&hl, item);
            }
            self.intersection.highlighted = None;
        }

        if let Some(old) = self.intersection.current.filter(|i| dropped.contains(i)) {
            self.events.emit(GrabEvent::IntersectionChanged {
                grabber: self.id,
                new: None,
                old: Some(old),
            });
            self.intersection.current = None;
        }

        if self.settings.pre_load_highlights {
            for &item in dropped {
                if let Some(hl) = self
                    .registry
                    .resolve_highlighter(item, self.highlighter.as_ref())
                {
                    hl.borrow_mut().remove(item);
                }
            }
        }
    }
}
