//! Gemeinsame Test-Hilfen: Tabellen-Tester, protokollierender Placer, Rig.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec3;
use vr_grab_tools::tools::{
    CollisionTester, CollisionTesterFactory, GrabAttacher, Hit, OutlineHighlighter, Placer,
    SharedHighlighter, SharedPlacer,
};
use vr_grab_tools::{
    GrabEvent, GrabberId, GrabberParts, GrabberPose, GrabberSettings, GrabberStateMachine,
    ItemId, Scene, ToolTag,
};

/// Distanz-Tabelle, die Tests pro Objekt vorgeben.
pub type DistanceTable = Rc<RefCell<HashMap<ItemId, f32>>>;

/// Meldet das registrierte Objekt mit der kleinsten Tabellen-Distanz.
pub struct TableTester {
    table: DistanceTable,
    queries: Rc<Cell<usize>>,
    items: Vec<ItemId>,
}

impl TableTester {
    pub fn new(table: DistanceTable, queries: Rc<Cell<usize>>) -> Self {
        Self {
            table,
            queries,
            items: Vec::new(),
        }
    }

    /// Factory, deren Instanzen alle dieselbe Tabelle lesen.
    pub fn factory(key: &'static str, table: DistanceTable) -> CollisionTesterFactory {
        CollisionTesterFactory::new(key, move |_| {
            Box::new(TableTester::new(table.clone(), Rc::new(Cell::new(0))))
        })
    }
}

impl CollisionTester for TableTester {
    fn set_items(&mut self, items: &[ItemId]) {
        self.items = items.to_vec();
    }

    fn items(&self) -> &[ItemId] {
        &self.items
    }

    fn get(
        &self,
        scene: &Scene,
        _pose: &GrabberPose,
        tag: Option<ToolTag>,
    ) -> anyhow::Result<Hit> {
        self.queries.set(self.queries.get() + 1);
        let table = self.table.borrow();
        let best = self
            .items
            .iter()
            .filter(|id| {
                tag.is_none_or(|t| scene.item(**id).is_some_and(|i| i.tool_tag.intersects(t)))
            })
            .filter_map(|id| table.get(id).map(|d| Hit::new(*id, *d)))
            .filter(|hit| hit.distance >= 0.0)
            .min_by(|x, y| x.distance.total_cmp(&y.distance));
        Ok(best.unwrap_or(Hit::MISS))
    }
}

/// Protokollierte Placer-Aufrufe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacerCall {
    Initialize(ItemId),
    PreviewEnabled(bool),
    Preview(ItemId),
    Place(ItemId),
}

/// Placer, der nur mitschreibt.
#[derive(Default)]
pub struct RecordingPlacer {
    pub calls: Vec<PlacerCall>,
}

impl Placer for RecordingPlacer {
    fn initialize(&mut self, _scene: &Scene, item: ItemId) {
        self.calls.push(PlacerCall::Initialize(item));
    }

    fn set_preview_enabled(&mut self, enabled: bool) {
        self.calls.push(PlacerCall::PreviewEnabled(enabled));
    }

    fn preview(&mut self, _scene: &Scene, _pose: &GrabberPose, item: ItemId) {
        self.calls.push(PlacerCall::Preview(item));
    }

    fn place(&mut self, _scene: &mut Scene, item: ItemId) {
        self.calls.push(PlacerCall::Place(item));
    }
}

pub struct Rig {
    pub scene: Scene,
    pub grabber: GrabberStateMachine,
    pub items: Vec<ItemId>,
    pub highlighter: Rc<RefCell<OutlineHighlighter>>,
    pub placer: Rc<RefCell<RecordingPlacer>>,
    pub table: DistanceTable,
    queries: Rc<Cell<usize>>,
}

impl Rig {
    /// Setzt die Distanz, die der Standard-Tester für `item` meldet.
    pub fn aim(&self, item: ItemId, distance: f32) {
        self.table.borrow_mut().insert(item, distance);
    }

    pub fn clear_aim(&self) {
        self.table.borrow_mut().clear();
    }

    /// Anzahl der Abfragen an den Standard-Tester.
    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    pub fn placer_calls(&self) -> Vec<PlacerCall> {
        self.placer.borrow().calls.clone()
    }

    /// Schreibt alle zugestellten Events mit.
    pub fn record_events(&mut self) -> Rc<RefCell<Vec<GrabEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        self.grabber
            .subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }
}

/// Greifer mit Standard-Einstellungen und drei registrierten Objekten.
pub fn rig() -> Rig {
    rig_with(GrabberSettings::default())
}

pub fn rig_with(settings: GrabberSettings) -> Rig {
    let mut scene = Scene::new();
    let items = vec![
        scene.add_item("A", Vec3::new(0.0, 1.0, 2.0), 0.2),
        scene.add_item("B", Vec3::new(0.0, 1.0, 4.0), 0.2),
        scene.add_item("C", Vec3::new(1.0, 1.0, 3.0), 0.2),
    ];

    let table: DistanceTable = Rc::new(RefCell::new(HashMap::new()));
    let queries = Rc::new(Cell::new(0));
    let highlighter = Rc::new(RefCell::new(OutlineHighlighter::default()));
    let placer = Rc::new(RefCell::new(RecordingPlacer::default()));
    let shared_highlighter: SharedHighlighter = highlighter.clone();
    let shared_placer: SharedPlacer = placer.clone();

    let parts = GrabberParts {
        collision_tester: Box::new(TableTester::new(table.clone(), queries.clone())),
        attacher: Box::new(GrabAttacher::new(GrabberId(1))),
        placer: shared_placer,
        highlighter: Some(shared_highlighter),
    };
    let mut grabber = GrabberStateMachine::new(GrabberId(1), parts, settings);
    grabber.set_items(&mut scene, &items);

    Rig {
        scene,
        grabber,
        items,
        highlighter,
        placer,
        table,
        queries,
    }
}

/// Zählt gepufferte Events, die `pred` erfüllen.
pub fn events_of(grabber: &GrabberStateMachine, pred: impl Fn(&GrabEvent) -> bool) -> usize {
    grabber
        .event_log()
        .entries()
        .iter()
        .filter(|e| pred(*e))
        .count()
}
