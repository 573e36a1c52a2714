//! Greifen, Loslassen, Halten und Umschalten.

use std::rc::Rc;

use super::events::GrabEvent;
use super::locks::LockFlags;
use super::state::GrabberStateMachine;
use crate::core::{ItemId, Scene};

impl GrabberStateMachine {
    /// Heftet das aktuell getroffene Objekt an.
    ///
    /// Gibt `None` zurück, wenn bereits etwas angeheftet ist, nichts getroffen
    /// wird oder der Attacher das Objekt ablehnt.
    pub fn grab(&mut self, scene: &mut Scene) -> Option<ItemId> {
        if self.is_attached() {
            return None;
        }
        let item = self.get_intersection(scene)?;

        // Erst anheften, dann Attacher und Placer übernehmen: ein geteilter
        // Placer darf bei Ablehnung nicht neu initialisiert werden
        let pose = self.pose;
        let mut item_attacher = self
            .registry
            .overrides
            .attacher(item)
            .map(|factory| factory.build(self.id));
        let accepted = match item_attacher.as_mut() {
            Some(attacher) => attacher.attach(scene, &pose, item),
            None => self.attachment.default_attacher.attach(scene, &pose, item),
        };
        if !accepted {
            log::debug!("{}: {} wird bereits gehalten", self.id, item);
            return None;
        }

        self.attachment.item_attacher = item_attacher;
        self.attachment.current_placer = match self.registry.overrides.placer(item) {
            Some(placer) => Rc::clone(placer),
            None => Rc::clone(&self.attachment.default_placer),
        };
        self.attachment
            .current_placer
            .borrow_mut()
            .initialize(scene, item);

        self.suspend_highlight();
        self.attachment
            .current_placer
            .borrow_mut()
            .set_preview_enabled(true);

        log::debug!("{}: {} gegriffen", self.id, item);
        self.events.emit(GrabEvent::Grab {
            grabber: self.id,
            grabbed: item,
        });
        Some(item)
    }

    /// Löst das angeheftete Objekt und legt es über den aktuellen Placer ab.
    ///
    /// Beendet auch ein laufendes `grab_and_hold`.
    pub fn release(&mut self, scene: &mut Scene) -> Option<ItemId> {
        let item = self.attachment.current().dst()?;
        self.attachment.current_mut().detach(scene);

        {
            let mut placer = self.attachment.current_placer.borrow_mut();
            placer.place(scene, item);
            placer.set_preview_enabled(false);
        }
        self.attachment.held = None;
        // Nächstes finalize löst neu auf und zeigt die Hervorhebung wieder
        self.resolve_pending = true;

        log::debug!("{}: {} losgelassen", self.id, item);
        self.events.emit(GrabEvent::Release {
            grabber: self.id,
            released: item,
        });
        Some(item)
    }

    /// Greift beim ersten Aufruf einer Serie und hält, solange der Aufruf
    /// jeden Tick wiederholt wird. Bleibt er aus, lässt `finalize` los.
    pub fn grab_and_hold(&mut self, scene: &mut Scene) -> Option<ItemId> {
        let grabbed = if self.locks.is_frame_locked(LockFlags::HOLD) {
            None
        } else {
            let grabbed = self.grab(scene);
            self.attachment.held = grabbed;
            grabbed
        };
        self.locks.request(LockFlags::HOLD);
        grabbed
    }

    /// Lässt los, falls etwas angeheftet ist, sonst wird gegriffen.
    /// Wiederholte Aufrufe in Folge-Ticks schalten nicht erneut um.
    pub fn toggle_grab(&mut self, scene: &mut Scene) -> Option<ItemId> {
        let toggled = if self.locks.is_frame_locked(LockFlags::TOGGLE) {
            None
        } else if self.is_attached() {
            self.release(scene)
        } else {
            self.grab(scene)
        };
        self.locks.request(LockFlags::TOGGLE);
        toggled
    }
}
