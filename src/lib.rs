//! VR Grab Tools Library.
//! Greifer-Zustandsmaschine mit austauschbaren Strategien für VR-Hände und Zeigestrahlen.

pub mod core;
pub mod grabber;
pub mod shared;
pub mod tools;

pub use core::{GrabberId, GrabberPose, ItemId, Scene, SceneItem, ToolTag};
pub use core::{SpatialIndex, SpatialMatch};
pub use grabber::{
    hand_grabber, ray_grabber, GrabEvent, GrabberParts, GrabberPhase, GrabberSettings,
    GrabberStateMachine,
};
pub use shared::GrabberOptions;
pub use tools::{
    Attacher, CollisionTester, Highlighter, Hit, ItemOverrides, PlacementMode, Placer,
};
