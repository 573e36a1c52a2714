use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec3;

use super::support::{rig, rig_with, DistanceTable, PlacerCall, RecordingPlacer, TableTester};
use vr_grab_tools::tools::{
    AttacherFactory, GrabAttacher, InspectionPlacer, ItemOverrides, OutlineHighlighter,
    SharedHighlighter, SharedPlacer,
};
use vr_grab_tools::{
    hand_grabber, GrabberId, GrabberOptions, GrabberPose, GrabberSettings, Scene, ToolTag,
};

fn group_table() -> DistanceTable {
    Rc::new(RefCell::new(HashMap::new()))
}

// ── Tie-Break ──

#[test]
fn test_closer_group_hit_wins_over_default() {
    let mut rig = rig();
    let [a, b] = [rig.items[0], rig.items[1]];
    let table = group_table();
    rig.scene.declare_overrides(
        b,
        ItemOverrides::default().with_collision_tester(TableTester::factory("gruppe", table.clone())),
    );
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    rig.aim(a, 5.0);
    table.borrow_mut().insert(b, 3.0);
    assert_eq!(rig.grabber.get_intersection(&mut rig.scene), Some(b));

    table.borrow_mut().insert(b, -1.0);
    assert_eq!(rig.grabber.get_intersection(&mut rig.scene), Some(a));
}

#[test]
fn test_equal_distance_keeps_default_hit() {
    let mut rig = rig();
    let [a, b] = [rig.items[0], rig.items[1]];
    let table = group_table();
    rig.scene.declare_overrides(
        b,
        ItemOverrides::default().with_collision_tester(TableTester::factory("gruppe", table.clone())),
    );
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    rig.aim(a, 2.0);
    table.borrow_mut().insert(b, 2.0);
    assert_eq!(rig.grabber.get_intersection(&mut rig.scene), Some(a));
}

#[test]
fn test_items_sharing_a_factory_share_one_group() {
    let mut rig = rig();
    let [a, b, c] = [rig.items[0], rig.items[1], rig.items[2]];
    let table = group_table();
    let factory = TableTester::factory("gruppe", table.clone());
    for item in [b, c] {
        rig.scene.declare_overrides(
            item,
            ItemOverrides::default().with_collision_tester(factory.clone()),
        );
    }
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    assert_eq!(rig.grabber.collision_tester().items(), &[a]);
    table.borrow_mut().insert(c, 0.5);
    table.borrow_mut().insert(b, 0.7);
    assert_eq!(rig.grabber.get_intersection(&mut rig.scene), Some(c));
}

// ── Objekt-spezifische Strategien ──

#[test]
fn test_item_placer_replaces_default_for_that_item() {
    let mut rig = rig();
    let [a, b] = [rig.items[0], rig.items[1]];
    let own = Rc::new(RefCell::new(RecordingPlacer::default()));
    let shared: SharedPlacer = own.clone();
    rig.scene
        .declare_overrides(a, ItemOverrides::default().with_placer(shared));
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    rig.aim(a, 1.0);
    rig.grabber.grab(&mut rig.scene);
    rig.grabber.release(&mut rig.scene);
    assert!(own.borrow().calls.contains(&PlacerCall::Place(a)));
    assert!(rig.placer_calls().is_empty());

    // Ohne Override: Standard-Placer
    rig.clear_aim();
    rig.aim(b, 1.0);
    rig.grabber.grab(&mut rig.scene);
    rig.grabber.release(&mut rig.scene);
    assert!(rig.placer_calls().contains(&PlacerCall::Place(b)));
}

#[test]
fn test_item_attacher_is_built_per_grab() {
    let mut rig = rig();
    let [a, b] = [rig.items[0], rig.items[1]];
    let built = Rc::new(Cell::new(0));
    let counter = built.clone();
    let factory = AttacherFactory::new(move |grabber| {
        counter.set(counter.get() + 1);
        Box::new(GrabAttacher::new(grabber))
    });
    rig.scene
        .declare_overrides(a, ItemOverrides::default().with_attacher(factory));
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    rig.aim(a, 1.0);
    for _ in 0..2 {
        rig.grabber.grab(&mut rig.scene);
        assert_eq!(rig.grabber.attached(), Some(a));
        rig.grabber.release(&mut rig.scene);
    }
    assert_eq!(built.get(), 2);

    rig.clear_aim();
    rig.aim(b, 1.0);
    rig.grabber.grab(&mut rig.scene);
    assert_eq!(rig.grabber.attached(), Some(b));
    assert_eq!(built.get(), 2);
}

#[test]
fn test_item_highlighter_falls_back_to_default() {
    let mut rig = rig();
    let [a, b] = [rig.items[0], rig.items[1]];
    let own = Rc::new(RefCell::new(OutlineHighlighter::default()));
    let shared: SharedHighlighter = own.clone();
    rig.scene
        .declare_overrides(a, ItemOverrides::default().with_highlighter(shared));
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    rig.aim(a, 1.0);
    rig.grabber.finalize(&mut rig.scene);
    assert_eq!(own.borrow().visible_items(), vec![a]);
    assert!(rig.highlighter.borrow().visible_items().is_empty());

    rig.clear_aim();
    rig.aim(b, 1.0);
    rig.grabber.finalize(&mut rig.scene);
    assert!(own.borrow().visible_items().is_empty());
    assert_eq!(rig.highlighter.borrow().visible_items(), vec![b]);
}

// ── Tool-Tags ──

#[test]
fn test_tag_scoping_ignores_items_without_grab_tag() {
    let mut rig = rig();
    let a = rig.items[0];
    rig.aim(a, 1.0);
    if let Some(item) = rig.scene.item_mut(a) {
        item.tool_tag = ToolTag::POINT;
    }

    assert_eq!(rig.grabber.get_intersection(&mut rig.scene), None);
}

#[test]
fn test_without_tag_scoping_untagged_items_are_found() {
    let mut rig = rig_with(GrabberSettings {
        use_tool_tag: false,
        ..GrabberSettings::default()
    });
    let a = rig.items[0];
    rig.aim(a, 1.0);

    assert!(rig.scene.item(a).is_some_and(|i| i.tool_tag.is_empty()));
    assert_eq!(rig.grabber.get_intersection(&mut rig.scene), Some(a));
}

#[test]
fn test_tags_are_added_not_replaced() {
    let mut rig = rig();
    let a = rig.items[0];
    rig.scene.add_tool_tag(a, ToolTag::POINT);
    rig.grabber.set_items(&mut rig.scene, &rig.items);

    let tag = rig.scene.item(a).map(|i| i.tool_tag).unwrap_or_default();
    assert!(tag.contains(ToolTag::GRAB | ToolTag::POINT));
}

// ── Mehrere Greifer ──

#[test]
fn test_second_hand_cannot_take_held_item() {
    let mut scene = Scene::new();
    let cup = scene.add_item("Becher", Vec3::new(0.0, 1.0, 0.0), 0.05);
    let options = GrabberOptions::default();
    let mut left = hand_grabber(GrabberId(1), &options);
    let mut right = hand_grabber(GrabberId(2), &options);
    for hand in [&mut left, &mut right] {
        hand.set_items(&mut scene, &[cup]);
        hand.set_pose(GrabberPose::at(Vec3::new(0.0, 1.0, 0.08)));
    }

    assert_eq!(left.grab(&mut scene), Some(cup));
    assert_eq!(right.grab(&mut scene), None);
    assert_eq!(scene.item(cup).and_then(|i| i.holder), Some(GrabberId(1)));

    left.release(&mut scene);
    assert_eq!(right.grab(&mut scene), Some(cup));
}

#[test]
fn test_refused_grab_leaves_shared_placer_untouched() {
    let mut scene = Scene::new();
    let origin = Vec3::new(0.0, 1.0, 0.05);
    let cup = scene.add_item("Becher", origin, 0.05);
    let inspection: SharedPlacer = Rc::new(RefCell::new(InspectionPlacer::default()));
    scene.declare_overrides(cup, ItemOverrides::default().with_placer(inspection));

    let options = GrabberOptions::default();
    let mut left = hand_grabber(GrabberId(1), &options);
    let mut right = hand_grabber(GrabberId(2), &options);
    for hand in [&mut left, &mut right] {
        hand.set_items(&mut scene, &[cup]);
        hand.set_pose(GrabberPose::at(Vec3::new(0.0, 1.0, 0.1)));
    }

    assert_eq!(left.grab(&mut scene), Some(cup));
    left.set_pose(GrabberPose::at(Vec3::new(2.0, 1.0, 0.1)));
    left.finalize(&mut scene);
    let moved = scene.item(cup).expect("Becher erwartet").position;
    assert!((moved.x - 2.0).abs() < 1e-4);

    // Abgelehnter Griff der zweiten Hand darf die Ursprungspose nicht überschreiben
    right.set_pose(GrabberPose::at(Vec3::new(2.0, 1.0, 0.1)));
    assert_eq!(right.grab(&mut scene), None);
    assert!(!right.is_attached());

    left.release(&mut scene);
    let placed = scene.item(cup).expect("Becher erwartet").position;
    assert!((placed - origin).length() < 1e-4);
}
