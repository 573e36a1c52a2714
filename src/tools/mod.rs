//! Strategie-Schnittstellen des Greif-Systems und Referenz-Implementierungen.
//!
//! Der Greifer kombiniert vier austauschbare Fähigkeiten: Kollisions-Tester,
//! Attacher, Placer und Highlighter. Jede lässt sich global oder pro Objekt
//! (über `ItemOverrides`) ersetzen.

/// Attacher: Kante Greifer ↔ Objekt (starr oder gefedert).
pub mod attacher;
/// Kollisions-Tester: Distanz- und Strahltests.
pub mod collision;
/// Highlighter: Hervorhebung des aktuell getroffenen Objekts.
pub mod highlighter;
mod overrides;
/// Placer: Ruhepose beim Loslassen und Vorschau beim Halten.
pub mod placer;

pub use attacher::{Attacher, AttacherFactory, GrabAttacher, SpringAttacher};
pub use collision::{CollisionTester, CollisionTesterFactory, DistanceTester, Hit, RayTester};
pub use highlighter::{HighlightMode, Highlighter, OutlineHighlighter, SharedHighlighter};
pub use overrides::{ItemOverrides, OverrideTable};
pub use placer::{
    DropDownPlacer, InspectionPlacer, MidAirPlacer, PlacementMode, Placer, PointAndPlacePlacer,
    SharedPlacer,
};
