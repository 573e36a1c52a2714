//! Tick-Abschluss, Update-Callback und Abbau des Greifers.

use super::locks::LockFlags;
use super::state::GrabberStateMachine;
use crate::core::Scene;

impl GrabberStateMachine {
    /// Fordert für diesen Tick einen Schnitt-Test an, auch wenn der
    /// automatische Test abgeschaltet ist.
    pub fn hover(&mut self) {
        self.locks.request(LockFlags::HOVER);
    }

    /// Schließt einen Tick ab. Muss vom Host genau einmal pro Frame nach
    /// allen Greif-Aufrufen des Frames aufgerufen werden.
    pub fn finalize(&mut self, scene: &mut Scene) {
        // 1. Schnitt auflösen, solange nichts angeheftet ist
        if !self.is_attached()
            && (self.settings.test_intersection
                || self.locks.is_requested(LockFlags::HOVER)
                || self.resolve_pending)
        {
            self.get_intersection(scene);
            self.resolve_pending = false;
        }

        // 2. Halten ohne erneute Anforderung → loslassen
        if self.attachment.held.is_some() && !self.locks.is_requested(LockFlags::HOLD) {
            self.release(scene);
            self.attachment.held = None;
        }

        // 3. Angeheftetes Objekt nachführen und Ablage-Vorschau zeigen
        if let Some(item) = self.attached() {
            let pose = self.pose;
            self.attachment.current_mut().follow(scene, &pose);
            self.attachment
                .current_placer
                .borrow_mut()
                .preview(scene, &pose, item);
        }

        // 4. Erst nach allen Prüfungen
        self.locks.end_tick();
    }

    /// Ruft den registrierten Update-Callback auf und schließt den Tick ab.
    pub fn update(&mut self, scene: &mut Scene) {
        if let Some(mut update) = self.update_fn.take() {
            update(self, scene);
            // Ein im Callback neu gesetzter Callback hat Vorrang
            if self.update_fn.is_none() {
                self.update_fn = Some(update);
            }
        }
        self.finalize(scene);
    }

    /// Baut den Greifer ab: lässt los, entfernt vorgeladene Highlights und
    /// leert die Kandidaten.
    pub fn remove(&mut self, scene: &mut Scene) {
        log::info!("{} wird entfernt", self.id);
        self.release(scene);
        self.set_items(scene, &[]);
        self.locks.clear();
        self.resolve_pending = false;
    }
}
