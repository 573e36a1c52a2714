//! Grab-Demo.
//!
//! Spielt eine kurze Greif-Sequenz mit einem Hand-Greifer durch und
//! protokolliert alle Events. Optionen werden aus `vr_grab_tools.toml`
//! neben der Binary gelesen.

use glam::Vec3;
use vr_grab_tools::{hand_grabber, GrabEvent, GrabberId, GrabberOptions, GrabberPose, Scene};

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("VR Grab Tools Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    let config_path = GrabberOptions::config_path();
    let options = GrabberOptions::load_from_file(&config_path);
    if !config_path.exists() {
        options.save_to_file(&config_path)?;
    }

    let mut scene = Scene::new();
    let items = [
        scene.add_item("Becher", Vec3::new(0.0, 1.0, 0.3), 0.05),
        scene.add_item("Buch", Vec3::new(0.4, 1.0, 0.3), 0.12),
        scene.add_item("Ball", Vec3::new(-0.4, 0.8, 0.3), 0.08),
    ];

    let mut grabber = hand_grabber(GrabberId(1), &options);
    grabber.subscribe(|event| match event {
        GrabEvent::Grab { grabber, grabbed } => log::info!("{grabber} greift {grabbed}"),
        GrabEvent::Release { grabber, released } => {
            log::info!("{grabber} lässt {released} los")
        }
        GrabEvent::IntersectionChanged { grabber, new, old } => {
            log::info!("{grabber}: Treffer {old:?} → {new:?}")
        }
        GrabEvent::TesterFailed { grabber, reason } => {
            log::warn!("{grabber}: Kollisionstest fehlgeschlagen: {reason}")
        }
    });
    grabber.set_items(&mut scene, &items);

    // Hand fährt zum Becher, greift, hält drei Ticks und lässt los
    let path = [
        (Vec3::new(0.0, 1.0, 0.0), false),
        (Vec3::new(0.0, 1.0, 0.25), true),
        (Vec3::new(0.1, 1.1, 0.25), true),
        (Vec3::new(0.2, 1.2, 0.25), true),
        (Vec3::new(0.2, 1.2, 0.25), false),
        (Vec3::new(0.4, 1.0, 0.2), false),
    ];
    for (tick, (position, holding)) in path.into_iter().enumerate() {
        grabber.set_pose(GrabberPose::at(position));
        if holding {
            grabber.grab_and_hold(&mut scene);
        }
        grabber.finalize(&mut scene);
        log::info!(
            "Tick {}: Phase {:?}, angeheftet {:?}",
            tick,
            grabber.phase(),
            grabber.attached()
        );
    }

    for item in scene.items() {
        log::info!("{} '{}' bei {:?}", item.id, item.name, item.position);
    }
    grabber.remove(&mut scene);
    Ok(())
}
