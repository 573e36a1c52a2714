//! Vorkonfigurierte Greifer: Hand (Distanz) und Strahl.

use super::state::{GrabberParts, GrabberSettings, GrabberStateMachine};
use crate::core::GrabberId;
use crate::shared::GrabberOptions;
use crate::tools::{
    Attacher, DistanceTester, GrabAttacher, PlacementMode, RayTester, SpringAttacher,
};

/// Hand-Greifer: Distanztest um die Handposition, starre oder gefederte
/// Anheftung, Placer gemäß `hand.placement_mode`.
pub fn hand_grabber(id: GrabberId, options: &GrabberOptions) -> GrabberStateMachine {
    let hand = &options.hand;
    let attacher: Box<dyn Attacher> = if hand.using_springs {
        Box::new(SpringAttacher::new(id, hand.spring_stiffness))
    } else {
        Box::new(GrabAttacher::new(id))
    };

    let parts = GrabberParts {
        collision_tester: Box::new(DistanceTester::new(hand.grab_radius)),
        attacher,
        placer: hand.placement_mode.build(),
        highlighter: Some(hand.highlight_mode.build()),
    };
    log::debug!(
        "{}: Hand-Greifer (Radius {:.2} m, Federn: {})",
        id,
        hand.grab_radius,
        hand.using_springs
    );
    GrabberStateMachine::new(id, parts, GrabberSettings::from(options))
}

/// Strahl-Greifer: Strahltest entlang der Blickrichtung, starre Anheftung,
/// Ablage am Boden-Schnittpunkt des Strahls.
pub fn ray_grabber(id: GrabberId, options: &GrabberOptions) -> GrabberStateMachine {
    let ray = &options.ray;
    let parts = GrabberParts {
        collision_tester: Box::new(RayTester::new(ray.max_distance)),
        attacher: Box::new(GrabAttacher::new(id)),
        placer: PlacementMode::PointAndPlace.build(),
        highlighter: Some(ray.highlight_mode.build()),
    };
    log::debug!("{}: Strahl-Greifer (max. {:.1} m)", id, ray.max_distance);
    GrabberStateMachine::new(id, parts, GrabberSettings::from(options))
}
