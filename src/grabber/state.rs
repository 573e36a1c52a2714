//! Zustands-Definitionen, Konstruktor und Zugriffe des Greifers.

use std::rc::Rc;

use super::events::{EventBus, EventLog, GrabEvent};
use super::locks::TickLocks;
use super::registry::CandidateRegistry;
use crate::core::{GrabberId, GrabberPose, ItemId, Scene, ToolTag};
use crate::shared::GrabberOptions;
use crate::tools::{Attacher, CollisionTester, SharedHighlighter, SharedPlacer};

/// Per-Tick-Callback des Hosts (z.B. Eingabe abfragen und greifen).
pub type UpdateFn = Box<dyn FnMut(&mut GrabberStateMachine, &mut Scene)>;

/// Die vier Standard-Fähigkeiten eines Greifers.
pub struct GrabberParts {
    pub collision_tester: Box<dyn CollisionTester>,
    pub attacher: Box<dyn Attacher>,
    pub placer: SharedPlacer,
    pub highlighter: Option<SharedHighlighter>,
}

/// Verhaltens-Schalter des Greifers (aus `GrabberOptions` abgeleitet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabberSettings {
    /// Highlights vorab registrieren und nur ein-/ausblenden
    pub pre_load_highlights: bool,
    /// Jeden Tick auf Schnitt testen, solange nichts angeheftet ist
    pub test_intersection: bool,
    /// Kollisionsabfragen auf `tag` beschränken und Kandidaten damit markieren
    pub use_tool_tag: bool,
    /// Tag dieses Werkzeugs
    pub tag: ToolTag,
    /// Maximale Anzahl gepufferter Events
    pub event_log_capacity: usize,
}

impl Default for GrabberSettings {
    fn default() -> Self {
        Self::from(&GrabberOptions::default())
    }
}

impl From<&GrabberOptions> for GrabberSettings {
    fn from(options: &GrabberOptions) -> Self {
        Self {
            pre_load_highlights: options.pre_load_highlights,
            test_intersection: options.test_intersection,
            use_tool_tag: options.use_tool_tag,
            tag: ToolTag::GRAB,
            event_log_capacity: options.event_log_capacity,
        }
    }
}

/// Grober Zustand des Greifers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabberPhase {
    /// Nichts angeheftet, kein automatischer Schnitt-Test
    Idle,
    /// Nichts angeheftet, Schnitt-Test läuft jeden Tick
    Testing,
    /// Ein Objekt ist angeheftet
    Attached,
}

/// Schnitt- und Hervorhebungszustand.
#[derive(Default)]
pub(crate) struct IntersectionState {
    /// Zuletzt aufgelöstes Objekt
    pub(crate) current: Option<ItemId>,
    /// Aktuell hervorgehobenes Objekt
    pub(crate) highlighted: Option<ItemId>,
    /// Highlighter, mit dem `highlighted` eingeblendet wurde
    pub(crate) highlighted_by: Option<SharedHighlighter>,
}

/// Anheftungszustand: aktiver Attacher/Placer und gehaltenes Objekt.
pub(crate) struct AttachmentState {
    pub(crate) default_attacher: Box<dyn Attacher>,
    /// Objekt-spezifischer Attacher des letzten Griffs
    pub(crate) item_attacher: Option<Box<dyn Attacher>>,
    pub(crate) default_placer: SharedPlacer,
    pub(crate) current_placer: SharedPlacer,
    /// Per `grab_and_hold` gegriffenes Objekt
    pub(crate) held: Option<ItemId>,
}

impl AttachmentState {
    pub(crate) fn current(&self) -> &dyn Attacher {
        match &self.item_attacher {
            Some(attacher) => attacher.as_ref(),
            None => self.default_attacher.as_ref(),
        }
    }

    pub(crate) fn current_mut(&mut self) -> &mut dyn Attacher {
        match &mut self.item_attacher {
            Some(attacher) => attacher.as_mut(),
            None => self.default_attacher.as_mut(),
        }
    }
}

/// Greifer-Zustandsmaschine: testet Kandidaten, hebt das getroffene Objekt
/// hervor, heftet höchstens ein Objekt an und legt es beim Loslassen ab.
///
/// Der Host ruft pro Frame genau einmal `finalize` (oder `update`) auf.
/// Alle Operationen laufen synchron im Host-Thread.
pub struct GrabberStateMachine {
    pub(crate) id: GrabberId,
    pub(crate) pose: GrabberPose,
    pub(crate) settings: GrabberSettings,
    pub(crate) registry: CandidateRegistry,
    pub(crate) intersection: IntersectionState,
    pub(crate) attachment: AttachmentState,
    pub(crate) highlighter: Option<SharedHighlighter>,
    pub(crate) locks: TickLocks,
    pub(crate) events: EventBus,
    /// Nächster `finalize` löst den Schnitt auch ohne `test_intersection` auf
    pub(crate) resolve_pending: bool,
    pub(crate) update_fn: Option<UpdateFn>,
}

impl GrabberStateMachine {
    /// Erstellt einen Greifer ohne Kandidaten.
    pub fn new(id: GrabberId, parts: GrabberParts, settings: GrabberSettings) -> Self {
        let GrabberParts {
            collision_tester,
            attacher,
            placer,
            highlighter,
        } = parts;

        Self {
            id,
            pose: GrabberPose::IDENTITY,
            settings,
            registry: CandidateRegistry::new(collision_tester),
            intersection: IntersectionState::default(),
            attachment: AttachmentState {
                default_attacher: attacher,
                item_attacher: None,
                current_placer: Rc::clone(&placer),
                default_placer: placer,
                held: None,
            },
            highlighter,
            locks: TickLocks::default(),
            events: EventBus::with_capacity(settings.event_log_capacity),
            resolve_pending: false,
            update_fn: None,
        }
    }

    pub fn id(&self) -> GrabberId {
        self.id
    }

    pub fn pose(&self) -> GrabberPose {
        self.pose
    }

    /// Bewegt den Greifer (vom Host pro Frame gesetzt).
    pub fn set_pose(&mut self, pose: GrabberPose) {
        self.pose = pose;
    }

    pub fn settings(&self) -> &GrabberSettings {
        &self.settings
    }

    /// Schaltet den automatischen Schnitt-Test um.
    pub fn set_test_intersection(&mut self, enabled: bool) {
        self.settings.test_intersection = enabled;
    }

    /// Aktuelle Kandidaten in Registrierungsreihenfolge.
    pub fn items(&self) -> Vec<ItemId> {
        self.registry.items.iter().copied().collect()
    }

    pub fn contains_item(&self, item: ItemId) -> bool {
        self.registry.items.contains(&item)
    }

    /// Zuletzt aufgelöstes Objekt.
    pub fn current_intersection(&self) -> Option<ItemId> {
        self.intersection.current
    }

    /// Aktuell hervorgehobenes Objekt.
    pub fn highlighted(&self) -> Option<ItemId> {
        self.intersection.highlighted
    }

    /// Aktuell angeheftetes Objekt.
    pub fn attached(&self) -> Option<ItemId> {
        self.attachment.current().dst()
    }

    pub fn is_attached(&self) -> bool {
        self.attached().is_some()
    }

    /// Per `grab_and_hold` gehaltenes Objekt.
    pub fn held(&self) -> Option<ItemId> {
        self.attachment.held
    }

    pub fn phase(&self) -> GrabberPhase {
        if self.is_attached() {
            GrabberPhase::Attached
        } else if self.settings.test_intersection {
            GrabberPhase::Testing
        } else {
            GrabberPhase::Idle
        }
    }

    // ── Strategien ──────────────────────────────────────────────

    /// Standard-Kollisions-Tester.
    pub fn collision_tester(&self) -> &dyn CollisionTester {
        self.registry.default_tester.as_ref()
    }

    /// Ersetzt den Standard-Kollisions-Tester und registriert die Kandidaten neu.
    pub fn set_collision_tester(&mut self, tester: Box<dyn CollisionTester>) {
        self.registry.replace_default_tester(tester);
    }

    /// Aktiver Attacher (objekt-spezifisch, falls der letzte Griff einen nutzte).
    pub fn attacher(&self) -> &dyn Attacher {
        self.attachment.current()
    }

    /// Ersetzt den Standard-Attacher. Ein über ihn angeheftetes Objekt wird
    /// vorher losgelassen.
    pub fn set_attacher(&mut self, scene: &mut Scene, attacher: Box<dyn Attacher>) {
        if self.attachment.item_attacher.is_none() && self.is_attached() {
            log::info!("{}: Attacher-Wechsel löst angeheftetes Objekt", self.id);
            self.release(scene);
        }
        self.attachment.default_attacher = attacher;
    }

    /// Standard-Placer.
    pub fn placer(&self) -> SharedPlacer {
        Rc::clone(&self.attachment.default_placer)
    }

    /// Placer des aktuellen bzw. letzten Griffs.
    pub fn current_placer(&self) -> SharedPlacer {
        Rc::clone(&self.attachment.current_placer)
    }

    /// Ersetzt den Standard-Placer (wirkt ab dem nächsten Griff).
    pub fn set_placer(&mut self, placer: SharedPlacer) {
        self.attachment.default_placer = placer;
    }

    /// Standard-Highlighter.
    pub fn highlighter(&self) -> Option<SharedHighlighter> {
        self.highlighter.clone()
    }

    /// Ersetzt den Standard-Highlighter und lädt bei Bedarf die Highlights
    /// aller Kandidaten ohne eigenen Highlighter vor.
    pub fn set_highlighter(&mut self, highlighter: Option<SharedHighlighter>) {
        self.highlighter = highlighter;
        if !self.settings.pre_load_highlights {
            return;
        }
        let Some(hl) = &self.highlighter else {
            return;
        };
        let mut hl = hl.borrow_mut();
        for &item in &self.registry.items {
            if self.registry.overrides.highlighter(item).is_none() {
                hl.add(item);
                hl.set_visible(item, false);
            }
        }
    }

    // ── Events ──────────────────────────────────────────────────

    /// Registriert einen Listener für Greif-Events.
    pub fn subscribe(&mut self, listener: impl FnMut(&GrabEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub fn event_log(&self) -> &EventLog {
        self.events.log()
    }

    /// Entnimmt alle gepufferten Events.
    pub fn drain_events(&mut self) -> Vec<GrabEvent> {
        self.events.log_mut().drain()
    }

    /// Registriert den Per-Tick-Callback für `update`.
    pub fn set_update_fn(
        &mut self,
        update: impl FnMut(&mut GrabberStateMachine, &mut Scene) + 'static,
    ) {
        self.update_fn = Some(Box::new(update));
    }
}
