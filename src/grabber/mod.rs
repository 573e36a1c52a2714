//! Greifer-Zustandsmaschine: Idle → Testing → Attached → Idle.
//!
//! Ein Greifer verwaltet eine Kandidatenmenge, löst pro Tick das getroffene
//! Objekt auf, hebt es hervor, heftet höchstens ein Objekt an und legt es beim
//! Loslassen über einen Placer ab. Strategien sind austauschbar (`tools`),
//! Hand- und Strahl-Greifer entstehen über Factory-Funktionen.
//!
//! Aufgeteilt in:
//! - `state`        — Structs, Konstruktor, Zugriffe und Strategie-Setter
//! - `registry`     — Kandidatenmenge, Overrides, Tester-Gruppen
//! - `intersection` — Schnitt-Auflösung mit Tie-Break
//! - `highlight`    — Hide-then-Show der Hervorhebung
//! - `attachment`   — grab, release, grab_and_hold, toggle_grab
//! - `lifecycle`    — finalize, update, hover, remove
//! - `events`       — typisierte Events, Listener, Event-Log
//! - `locks`        — Tick-Locks mit Verfall

mod attachment;
pub mod events;
mod factory;
mod highlight;
mod intersection;
mod lifecycle;
pub mod locks;
mod registry;
mod state;

pub use events::{EventBus, EventListener, EventLog, GrabEvent};
pub use factory::{hand_grabber, ray_grabber};
pub use locks::{LockFlags, TickLocks};
pub use state::{GrabberParts, GrabberPhase, GrabberSettings, GrabberStateMachine, UpdateFn};
