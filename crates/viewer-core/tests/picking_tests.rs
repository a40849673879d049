use glam::{Vec2, Vec3};
use viewer_core::{
    pick, pick_nearest, Bounds, Camera, CameraConfig, Candidate, HotspotRegistry, HotspotSpec,
    Ray, RenderKind, Scene, Viewer, ViewerConfig, Viewport, GROUND_NAME,
};

fn camera_at_origin_looking_down_neg_z() -> Camera {
    Camera {
        eye: Vec3::ZERO,
        target: Vec3::NEG_Z,
        aspect: 1.0,
        ..Camera::default()
    }
}

#[test]
fn pick_returns_nearest_of_three_along_ray() {
    let cam = camera_at_origin_looking_down_neg_z();
    // registered far-to-near so registry order cannot decide the result
    let registry = HotspotRegistry::new(
        vec![
            HotspotSpec::new("three", Vec3::new(0.0, 0.0, -3.0)),
            HotspotSpec::new("two", Vec3::new(0.0, 0.0, -2.0)),
            HotspotSpec::new("one", Vec3::new(0.0, 0.0, -1.0)),
        ],
        &Scene::RESERVED_NAMES,
    )
    .unwrap();
    let scene = Scene::default();

    let hit = pick(Vec2::ZERO, &cam, scene.candidates(&registry)).unwrap();
    assert_eq!(hit.name, "one");
    assert_eq!(hit.kind, RenderKind::Hotspot);
    assert!((hit.distance - (1.0 - scene.marker_radius)).abs() < 1e-4);
}

#[test]
fn pick_outside_viewport_is_none() {
    let viewport = Viewport::new(800.0, 600.0, 1.0);
    let mut viewer = Viewer::new(ViewerConfig::default(), viewport).unwrap();
    let outside = [
        (-1.0, 300.0),
        (801.0, 300.0),
        (400.0, -0.5),
        (400.0, 600.5),
        (-50.0, -50.0),
        (5000.0, 5000.0),
    ];
    for (x, y) in outside {
        viewer.on_pointer_move(x, y);
        assert!(!viewer.pointer.in_viewport(), "({x}, {y}) should be outside");
        let hit = pick(
            viewer.pointer.ndc(),
            &viewer.camera,
            viewer.scene.candidates(&viewer.hotspots),
        );
        assert!(hit.is_none(), "({x}, {y}) picked {:?}", hit);
    }
}

#[test]
fn pick_ignores_non_finite_ndc() {
    let cam = Camera::default();
    let scene = Scene::default();
    let registry = HotspotRegistry::default();
    assert!(pick(Vec2::new(f32::NAN, 0.0), &cam, scene.candidates(&registry)).is_none());
}

#[test]
fn ground_is_hit_when_nothing_else_is() {
    let viewport = Viewport::new(800.0, 600.0, 1.0);
    let viewer = Viewer::new(ViewerConfig::default().with_hotspots(vec![]), viewport).unwrap();
    // default camera looks down at the origin from above the ground
    let hit = pick(
        Vec2::ZERO,
        &viewer.camera,
        viewer.scene.candidates(&viewer.hotspots),
    )
    .unwrap();
    assert_eq!(hit.name, GROUND_NAME);
    assert_eq!(hit.kind, RenderKind::Ground);
}

#[test]
fn marker_resting_on_ground_beats_ground() {
    // a marker sitting exactly on the ground plane, seen from straight above
    let cfg = ViewerConfig {
        camera: CameraConfig {
            position: Vec3::new(0.0, 0.5, 0.0),
            target: Vec3::ZERO,
            ..CameraConfig::default()
        },
        marker_radius: 0.0001,
        ..ViewerConfig::default()
    }
    .with_hotspots(vec![HotspotSpec::new("flat", Vec3::ZERO)]);
    let mut viewer = Viewer::new(cfg, Viewport::new(600.0, 600.0, 1.0)).unwrap();
    // straight-down view needs a non-parallel up vector
    viewer.camera.up = Vec3::NEG_Z;
    let hit = pick(
        Vec2::ZERO,
        &viewer.camera,
        viewer.scene.candidates(&viewer.hotspots),
    )
    .unwrap();
    assert_eq!(hit.name, "flat");
}

#[test]
fn coincident_hotspots_resolve_to_first_registered() {
    let cam = camera_at_origin_looking_down_neg_z();
    let registry = HotspotRegistry::new(
        vec![
            HotspotSpec::new("first", Vec3::new(0.0, 0.0, -1.0)),
            HotspotSpec::new("second", Vec3::new(0.0, 0.0, -1.0)),
        ],
        &Scene::RESERVED_NAMES,
    )
    .unwrap();
    let scene = Scene::default();
    let hit = pick(Vec2::ZERO, &cam, scene.candidates(&registry)).unwrap();
    assert_eq!(hit.name, "first");
}

#[test]
fn hotspot_and_ground_at_equal_distance_resolve_to_hotspot() {
    // both surfaces sit exactly 1.0 along -Z
    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    let marker = Candidate {
        name: "marker",
        kind: RenderKind::Hotspot,
        bounds: Bounds::Sphere {
            center: Vec3::new(0.0, 0.0, -2.0),
            radius: 1.0,
        },
    };
    let ground = Candidate {
        name: GROUND_NAME,
        kind: RenderKind::Ground,
        bounds: Bounds::Rect {
            center: Vec3::new(0.0, 0.0, -1.0),
            half_u: Vec3::X,
            half_v: Vec3::Y,
        },
    };
    assert_eq!(ground.bounds.intersect(&ray), marker.bounds.intersect(&ray));

    let hit = pick_nearest(&ray, [marker, ground]).unwrap();
    assert_eq!(hit.name, "marker");
    assert_eq!(hit.distance, 1.0);

    // the scene lists hotspots ahead of the ground
    let registry =
        HotspotRegistry::new(vec![HotspotSpec::new("a", Vec3::ZERO)], &Scene::RESERVED_NAMES)
            .unwrap();
    let scene = Scene::default();
    let kinds: Vec<RenderKind> = scene.candidates(&registry).map(|c| c.kind).collect();
    assert_eq!(kinds, vec![RenderKind::Hotspot, RenderKind::Ground]);
}
