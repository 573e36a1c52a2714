//! Core-Domänentypen: Handles, Posen, Szene und Spatial-Index.

mod ids;
pub mod pose;
/// Szenen-Stellvertreter für die Host-Engine
///
/// Die Greifer-Logik arbeitet ausschließlich über Handles (`ItemId`);
/// Posen, Radien und Tags liegen hier.
pub mod scene;
pub mod spatial;

pub use ids::{GrabberId, ItemId, ToolTag};
pub use pose::GrabberPose;
pub use scene::{Scene, SceneItem};
pub use spatial::{SpatialIndex, SpatialMatch};
