//! Geteilte Konfiguration für Greifer, Factories und Demo.

pub mod options;

pub use options::{GrabberOptions, HandOptions, RayOptions};
pub use options::{EVENT_LOG_CAPACITY, HAND_GRAB_RADIUS, RAY_MAX_DISTANCE, SPRING_STIFFNESS};
