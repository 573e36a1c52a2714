//! Typisierte Greif-Events und ihre synchrone Zustellung.

use crate::core::{GrabberId, ItemId};

/// Events, die ein Greifer während eines Ticks veröffentlicht.
#[derive(Debug, Clone, PartialEq)]
pub enum GrabEvent {
    /// Objekt wurde gegriffen
    Grab { grabber: GrabberId, grabbed: ItemId },
    /// Objekt wurde losgelassen und abgelegt
    Release {
        grabber: GrabberId,
        released: ItemId,
    },
    /// Das aktuell getroffene Objekt hat gewechselt
    IntersectionChanged {
        grabber: GrabberId,
        new: Option<ItemId>,
        old: Option<ItemId>,
    },
    /// Ein Kollisions-Tester ist fehlgeschlagen (wurde als Fehlschlag gewertet)
    TesterFailed { grabber: GrabberId, reason: String },
}

impl GrabEvent {
    /// Greifer, der das Event ausgelöst hat.
    pub fn grabber(&self) -> GrabberId {
        match self {
            GrabEvent::Grab { grabber, .. }
            | GrabEvent::Release { grabber, .. }
            | GrabEvent::IntersectionChanged { grabber, .. }
            | GrabEvent::TesterFailed { grabber, .. } => *grabber,
        }
    }
}

/// Listener, die Events synchron im selben Tick erhalten.
pub type EventListener = Box<dyn FnMut(&GrabEvent)>;

/// Begrenzter Puffer veröffentlichter Events, den der Host abholen kann.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: Vec<GrabEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(crate::shared::EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    /// Erstellt ein leeres Log mit maximaler Größe (mindestens 2).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(2),
        }
    }

    /// Fügt ein Event hinzu.
    /// Bei voller Kapazität wird die ältere Hälfte verworfen.
    pub fn record(&mut self, event: GrabEvent) {
        if self.entries.len() >= self.capacity {
            self.entries.drain(..self.capacity / 2);
        }
        self.entries.push(event);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[GrabEvent] {
        &self.entries
    }

    /// Entnimmt alle gepufferten Events.
    pub fn drain(&mut self) -> Vec<GrabEvent> {
        std::mem::take(&mut self.entries)
    }
}

/// Verteilt Events an registrierte Listener und puffert sie im `EventLog`.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<EventListener>,
    log: EventLog,
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: Vec::new(),
            log: EventLog::with_capacity(capacity),
        }
    }

    /// Registriert einen Listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&GrabEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Stellt das Event allen Listenern zu und puffert es.
    pub fn emit(&mut self, event: GrabEvent) {
        log::debug!("Event: {:?}", event);
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.log.record(event);
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }
}
