//! Schnitt-Auflösung über Standard-Tester und Tester-Gruppen.

use super::events::{EventBus, GrabEvent};
use super::state::GrabberStateMachine;
use crate::core::{GrabberId, GrabberPose, ItemId, Scene, ToolTag};
use crate::tools::{CollisionTester, Hit};

/// Fragt einen Tester ab; Fehler werden gemeldet und als Fehlschlag gewertet.
fn query_tester(
    tester: &dyn CollisionTester,
    scene: &Scene,
    pose: &GrabberPose,
    tag: Option<ToolTag>,
    grabber: GrabberId,
    events: &mut EventBus,
) -> Hit {
    match tester.get(scene, pose, tag) {
        Ok(hit) => hit,
        Err(e) => {
            log::warn!("{}: Kollisions-Tester fehlgeschlagen: {:#}", grabber, e);
            events.emit(GrabEvent::TesterFailed {
                grabber,
                reason: format!("{:#}", e),
            });
            Hit::MISS
        }
    }
}

/// Ein Gruppen-Treffer ersetzt den bisherigen nur, wenn dieser leer ist oder
/// der neue echt näher liegt. Gleichstand behält den früheren.
pub(crate) fn replaces_best(best: &Hit, candidate: &Hit) -> bool {
    best.distance < 0.0 || (candidate.distance > 0.0 && candidate.distance < best.distance)
}

impl GrabberStateMachine {
    /// Bestimmt das aktuell getroffene Objekt.
    ///
    /// Fragt zuerst den Standard-Tester, dann jede Tester-Gruppe in
    /// Registrierungsreihenfolge. Aktualisiert die Hervorhebung und meldet
    /// einen Wechsel per `IntersectionChanged`.
    pub fn get_intersection(&mut self, scene: &mut Scene) -> Option<ItemId> {
        scene.ensure_spatial_index();
        let scene: &Scene = scene;
        let tag = self.settings.use_tool_tag.then_some(self.settings.tag);

        let mut best = query_tester(
            self.registry.default_tester.as_ref(),
            scene,
            &self.pose,
            tag,
            self.id,
            &mut self.events,
        );
        for group in self.registry.groups.values() {
            let hit = query_tester(
                group.tester.as_ref(),
                scene,
                &self.pose,
                tag,
                self.id,
                &mut self.events,
            );
            if replaces_best(&best, &hit) {
                best = hit;
            }
        }

        let candidate = if best.distance < 0.0 { None } else { best.item };

        // Auch ohne Wechsel: nach einem Loslassen wird das Highlight wieder gezeigt
        self.update_highlight(candidate);

        let old = self.intersection.current;
        if candidate != old {
            self.events.emit(GrabEvent::IntersectionChanged {
                grabber: self.id,
                new: candidate,
                old,
            });
            self.intersection.current = candidate;
        }
        candidate
    }
}
