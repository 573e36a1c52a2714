use super::support::{events_of, rig, rig_with};
use vr_grab_tools::{GrabEvent, GrabberSettings};

#[test]
fn test_hold_released_when_not_renewed() {
    let mut rig = rig();
    let a = rig.items[0];
    rig.aim(a, 1.0);

    // Tick N: greifen und halten
    assert_eq!(rig.grabber.grab_and_hold(&mut rig.scene), Some(a));
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(rig.grabber.attached(), Some(a));

    // Tick N+1: keine Anforderung → losgelassen
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(rig.grabber.attached(), None);
    assert_eq!(rig.grabber.held(), None);
    assert_eq!(
        events_of(&rig.grabber, |e| matches!(e, GrabEvent::Release { .. })),
        1
    );
}

#[test]
fn test_hold_survives_while_renewed_each_tick() {
    let mut rig = rig();
    let a = rig.items[0];
    rig.aim(a, 1.0);

    for _ in 0..5 {
        rig.grabber.grab_and_hold(&mut rig.scene);
        rig.grabber.finalize(&mut rig.scene);
        assert_eq!(rig.grabber.attached(), Some(a));
    }
    assert_eq!(
        events_of(&rig.grabber, |e| matches!(e, GrabEvent::Grab { .. })),
        1
    );
}

#[test]
fn test_hold_only_grabs_on_first_tick_of_series() {
    let mut rig = rig();
    let a = rig.items[0];

    // Nichts in Reichweite beim Drücken
    assert_eq!(rig.grabber.grab_and_hold(&mut rig.scene), None);
    rig.grabber.finalize(&mut rig.scene);

    // Objekt kommt in Reichweite, Taste bleibt gedrückt
    rig.aim(a, 1.0);
    assert_eq!(rig.grabber.grab_and_hold(&mut rig.scene), None);
    rig.grabber.finalize(&mut rig.scene);
    assert!(!rig.grabber.is_attached());

    // Loslassen und erneut drücken
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(rig.grabber.grab_and_hold(&mut rig.scene), Some(a));
}

#[test]
fn test_explicit_release_cancels_hold() {
    let mut rig = rig();
    rig.aim(rig.items[0], 1.0);
    rig.grabber.grab_and_hold(&mut rig.scene);
    rig.grabber.finalize(&mut rig.scene);

    rig.grabber.release(&mut rig.scene);
    assert_eq!(rig.grabber.held(), None);

    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(
        events_of(&rig.grabber, |e| matches!(e, GrabEvent::Release { .. })),
        1
    );
}

#[test]
fn test_toggle_does_not_retrigger_while_held_down() {
    let mut rig = rig();
    let a = rig.items[0];
    rig.aim(a, 1.0);

    assert_eq!(rig.grabber.toggle_grab(&mut rig.scene), Some(a));
    rig.grabber.finalize(&mut rig.scene);

    // Taste weiter gedrückt: kein erneutes Umschalten
    for _ in 0..3 {
        assert_eq!(rig.grabber.toggle_grab(&mut rig.scene), None);
        rig.grabber.finalize(&mut rig.scene);
        assert_eq!(rig.grabber.attached(), Some(a));
    }

    // Taste losgelassen, dann erneut gedrückt
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(rig.grabber.toggle_grab(&mut rig.scene), Some(a));
    assert!(!rig.grabber.is_attached());
}

#[test]
fn test_toggled_grab_is_not_auto_released() {
    let mut rig = rig();
    rig.aim(rig.items[0], 1.0);
    rig.grabber.toggle_grab(&mut rig.scene);

    for _ in 0..3 {
        rig.grabber.finalize(&mut rig.scene);
    }
    assert!(rig.grabber.is_attached());
}

#[test]
fn test_hover_resolves_only_while_requested() {
    let mut rig = rig_with(GrabberSettings {
        test_intersection: false,
        ..GrabberSettings::default()
    });
    // Erster Tick nach set_items löst einmalig auf
    rig.grabber.finalize(&mut rig.scene);
    let queries = rig.queries();

    rig.aim(rig.items[1], 2.0);
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(rig.grabber.current_intersection(), None);

    rig.grabber.hover();
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(rig.grabber.current_intersection(), Some(rig.items[1]));
    assert_eq!(rig.queries(), queries + 1);
}
