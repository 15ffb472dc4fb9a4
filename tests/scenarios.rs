//! End-to-end behaviour of a viewing session: clicks, animation frames and
//! window resizes.

use twokinds_map::{Hotspot, MapContent, PanelContent, PanelState, ViewExtent, Viewer};

const WINDOW: [f64; 2] = [1280.0, 720.0];

fn content() -> MapContent {
    MapContent {
        title: "World".to_owned(),
        image_path: "world_map.png".to_owned(),
        extent: ViewExtent::new(0.0, 0.0, 800.0, 950.0),
        max_zoom: 10.0,
        hotspots: vec![
            Hotspot {
                x: 392.5,
                y: 442.5,
                panel_id: "ch1".to_owned(),
            },
            Hotspot {
                x: 375.4,
                y: 474.5,
                panel_id: "ch2".to_owned(),
            },
        ],
        panels: vec![panel("ch1", 300.0), panel("ch2", 250.0)],
        labels: Vec::new(),
    }
}

fn panel(id: &str, open_width: f64) -> PanelContent {
    PanelContent {
        id: id.to_owned(),
        title: id.to_owned(),
        open_width: Some(open_width),
        body: Vec::new(),
    }
}

fn viewer() -> Viewer {
    let mut viewer = Viewer::new(&content());
    viewer.window_resized(WINDOW);
    // Zoom in so the hotspots are well apart on screen.
    viewer.map_mut().zoom_by(2.0, None);
    viewer
}

fn hotspot_pixel(viewer: &Viewer, coord: [f64; 2]) -> [f64; 2] {
    viewer.map().coordinate_to_pixel(coord)
}

fn click_hotspot(viewer: &mut Viewer, coord: [f64; 2]) -> bool {
    let pixel = hotspot_pixel(viewer, coord);
    viewer.click(pixel).unwrap()
}

fn width(viewer: &Viewer, id: &str) -> f64 {
    viewer.panels().current_width(id).unwrap()
}

/// Runs frames until the animation stops, checking the single-open invariant
/// along the way. Returns the number of frames.
fn settle(viewer: &mut Viewer) -> usize {
    let mut frames = 0;
    while viewer.tick() {
        frames += 1;
        assert!(viewer.panels().visible().count() <= 1);
        assert!(frames < 500, "animation did not settle");
    }
    frames + 1
}

const CH1: [f64; 2] = [392.5, 442.5];
const CH2: [f64; 2] = [375.4, 474.5];

#[test]
fn open_from_closed() {
    let mut viewer = viewer();
    assert_eq!(viewer.menu_opened(), None);

    assert!(click_hotspot(&mut viewer, CH1));
    assert!(viewer.is_animating());
    assert_eq!(viewer.menu_opened(), Some("ch1"));
    assert_eq!(viewer.state(), PanelState::Opening("ch1".to_owned()));

    settle(&mut viewer);
    assert!(!viewer.is_animating());
    assert_eq!(viewer.menu_opened(), Some("ch1"));
    assert_eq!(width(&viewer, "ch1"), 300.0);
    assert_eq!(viewer.map().width(), WINDOW[0] - 300.0);
}

#[test]
fn toggle_close() {
    let mut viewer = viewer();
    click_hotspot(&mut viewer, CH1);
    settle(&mut viewer);

    assert!(click_hotspot(&mut viewer, CH1));
    assert_eq!(viewer.state(), PanelState::Closing("ch1".to_owned()));
    assert_eq!(viewer.menu_opened(), None);

    settle(&mut viewer);
    assert_eq!(viewer.state(), PanelState::Closed);
    assert_eq!(width(&viewer, "ch1"), 0.0);
    assert_eq!(viewer.map().width(), WINDOW[0]);
}

#[test]
fn switch_between_panels() {
    let mut viewer = viewer();
    click_hotspot(&mut viewer, CH1);
    settle(&mut viewer);

    assert!(click_hotspot(&mut viewer, CH2));
    assert_eq!(
        viewer.state(),
        PanelState::Switching {
            from: "ch1".to_owned(),
            to: "ch2".to_owned()
        }
    );

    settle(&mut viewer);
    assert_eq!(viewer.menu_opened(), Some("ch2"));
    assert_eq!(width(&viewer, "ch1"), 0.0);
    assert_eq!(width(&viewer, "ch2"), 250.0);
    assert_eq!(viewer.map().width(), WINDOW[0] - 250.0);
}

#[test]
fn empty_area_click_closes() {
    let mut viewer = viewer();
    click_hotspot(&mut viewer, CH1);
    settle(&mut viewer);

    assert!(viewer.click([5.0, 5.0]).unwrap());
    settle(&mut viewer);
    assert_eq!(viewer.state(), PanelState::Closed);
    assert_eq!(width(&viewer, "ch1"), 0.0);
}

#[test]
fn empty_area_click_without_panel_is_noop() {
    let mut viewer = viewer();
    assert!(!viewer.click([5.0, 5.0]).unwrap());
    assert_eq!(viewer.state(), PanelState::Closed);
}

#[test]
fn clicks_during_animation_are_dropped() {
    let mut viewer = viewer();
    click_hotspot(&mut viewer, CH1);
    viewer.tick();
    viewer.tick();
    let mid_width = width(&viewer, "ch1");

    // Same hotspot reads as already open, so this would close; it is dropped.
    assert!(!click_hotspot(&mut viewer, CH1));
    assert!(!click_hotspot(&mut viewer, CH2));
    assert!(!viewer.click([5.0, 5.0]).unwrap());

    assert_eq!(viewer.state(), PanelState::Opening("ch1".to_owned()));
    assert_eq!(width(&viewer, "ch1"), mid_width);
    assert_eq!(width(&viewer, "ch2"), 0.0);

    settle(&mut viewer);
    assert_eq!(width(&viewer, "ch1"), 300.0);
}

#[test]
fn animation_keeps_left_edge_of_view() {
    let mut viewer = viewer();
    let before = viewer.map().calculate_extent();

    click_hotspot(&mut viewer, CH1);
    while viewer.tick() {
        let during = viewer.map().calculate_extent();
        assert!((during.min_x - before.min_x).abs() < 1e-6);
        assert!((viewer.map().resolution() - (before.width() / WINDOW[0])).abs() < 1e-9);
    }

    let after = viewer.map().calculate_extent();
    assert!((after.min_x - before.min_x).abs() < 1e-6);
    assert!((after.width() - before.width() * (WINDOW[0] - 300.0) / WINDOW[0]).abs() < 1e-6);
}

#[test]
fn open_then_close_restores_view() {
    let mut viewer = viewer();
    let before = viewer.map().calculate_extent();

    click_hotspot(&mut viewer, CH1);
    settle(&mut viewer);
    viewer.click([5.0, 5.0]).unwrap();
    settle(&mut viewer);

    assert!(viewer.map().calculate_extent().max_edge_difference(&before) < 1e-6);
}

#[test]
fn animation_frames_are_bounded() {
    let mut viewer = viewer();
    click_hotspot(&mut viewer, CH1);
    let frames = settle(&mut viewer);
    assert!(frames <= 300 / 40 + 20, "took {frames} frames");
}

#[test]
fn resize_mid_animation_uses_current_width() {
    let mut viewer = viewer();
    click_hotspot(&mut viewer, CH1);
    viewer.tick();
    viewer.tick();
    let mid_width = width(&viewer, "ch1");

    viewer.window_resized([1600.0, 900.0]);
    assert_eq!(viewer.window_size(), [1600.0, 900.0]);
    assert_eq!(viewer.map().width(), 1600.0 - mid_width);
    assert_eq!(viewer.map().size()[1], 900.0);

    settle(&mut viewer);
    assert_eq!(width(&viewer, "ch1"), 300.0);
    assert_eq!(viewer.map().width(), 1600.0 - 300.0);
}

#[test]
fn embedded_content_is_valid() {
    let content = MapContent::from_ron(include_str!("../assets/map.ron")).unwrap();
    assert!(content.validate().is_empty(), "{:?}", content.validate());
    assert_eq!(content.hotspots[0].panel_id, "ch1");
    assert_eq!(content.hotspots[0].x, 392.5);
    assert_eq!(content.hotspots[0].y, 442.5);

    let mut viewer = Viewer::new(&content);
    viewer.window_resized(WINDOW);
    let anchor = hotspot_pixel(&viewer, CH1);
    viewer.map_mut().zoom_by(4.0, Some(anchor));
    assert!(click_hotspot(&mut viewer, CH1));
    assert_eq!(viewer.menu_opened(), Some("ch1"));
}

#[test]
fn negative_max_zoom_does_not_break_the_session() {
    let mut content = content();
    content.max_zoom = -1.0;
    assert!(!content.validate().is_empty());

    let mut viewer = Viewer::new(&content);
    viewer.window_resized(WINDOW);
    assert_eq!(viewer.map().max_zoom(), 0.0);
    assert!(viewer.map().resolution().is_finite());
}
