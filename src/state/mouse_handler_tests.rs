//! Tests for mouse gesture recognition and hit testing.

use super::*;

// ===== Test Helpers =====

fn page_area() -> Rect {
    Rect::new(0, 1, 100, 20)
}

fn regions() -> HitRegions {
    HitRegions {
        prev_button: Some(Rect::new(0, 22, 5, 1)),
        next_button: Some(Rect::new(95, 22, 5, 1)),
        slider: Some(Rect::new(6, 22, 88, 1)),
        retry_button: Some(Rect::new(45, 10, 10, 1)),
        page: Some(page_area()),
        ..HitRegions::default()
    }
}

// ===== Tap zones =====

#[test]
fn default_zones_split_thirty_forty_thirty() {
    let zones = TapZones::default();
    let area = page_area();

    assert_eq!(zones.zone_at(area, 0), Some(Zone::Left));
    assert_eq!(zones.zone_at(area, 29), Some(Zone::Left));
    assert_eq!(zones.zone_at(area, 30), Some(Zone::Center));
    assert_eq!(zones.zone_at(area, 69), Some(Zone::Center));
    assert_eq!(zones.zone_at(area, 70), Some(Zone::Right));
    assert_eq!(zones.zone_at(area, 99), Some(Zone::Right));
    assert_eq!(zones.zone_at(area, 100), None);
}

#[test]
fn zones_are_relative_to_page_origin() {
    let zones = TapZones::default();
    let area = Rect::new(10, 0, 10, 5);

    assert_eq!(zones.zone_at(area, 9), None);
    assert_eq!(zones.zone_at(area, 10), Some(Zone::Left));
    assert_eq!(zones.zone_at(area, 15), Some(Zone::Center));
    assert_eq!(zones.zone_at(area, 19), Some(Zone::Right));
}

#[test]
fn default_zone_meanings() {
    let zones = TapZones::default();
    assert_eq!(zones.action(Zone::Left), ZoneAction::TurnLeft);
    assert_eq!(zones.action(Zone::Center), ZoneAction::ToggleImmersive);
    assert_eq!(zones.action(Zone::Right), ZoneAction::TurnRight);
}

#[test]
fn custom_fractions_move_boundaries() {
    let zones = TapZones {
        left_fraction: 0.5,
        right_fraction: 0.5,
        ..TapZones::default()
    };
    let area = page_area();
    assert_eq!(zones.zone_at(area, 49), Some(Zone::Left));
    assert_eq!(zones.zone_at(area, 50), Some(Zone::Right));
}

#[test]
fn overlapping_fractions_are_invalid() {
    let zones = TapZones {
        left_fraction: 0.6,
        right_fraction: 0.6,
        ..TapZones::default()
    };
    assert!(zones.validate().is_err());
}

#[test]
fn fraction_out_of_unit_range_is_invalid() {
    let zones = TapZones {
        left_fraction: -0.1,
        ..TapZones::default()
    };
    assert!(zones.validate().is_err());
    assert!(TapZones::default().validate().is_ok());
}

#[test]
fn zone_action_uses_kebab_case_names() {
    let action: ZoneAction = serde_json::from_str(r#""toggle-immersive""#).unwrap();
    assert_eq!(action, ZoneAction::ToggleImmersive);
}

// ===== Swipe =====

#[test]
fn swipe_left_reveals_right_side() {
    let mut tracker = SwipeTracker::new(4);
    tracker.press(50, 10);
    assert_eq!(tracker.release(40, 11), Some(Gesture::Swipe(Side::Right)));
}

#[test]
fn swipe_right_reveals_left_side() {
    let mut tracker = SwipeTracker::new(4);
    tracker.press(40, 10);
    assert_eq!(tracker.release(50, 10), Some(Gesture::Swipe(Side::Left)));
}

#[test]
fn travel_equal_to_threshold_is_a_tap() {
    let mut tracker = SwipeTracker::new(4);
    tracker.press(50, 10);
    assert_eq!(
        tracker.release(46, 10),
        Some(Gesture::Tap { column: 50, row: 10 })
    );
}

#[test]
fn mostly_vertical_drag_is_a_tap() {
    let mut tracker = SwipeTracker::new(4);
    tracker.press(50, 2);
    assert_eq!(
        tracker.release(44, 12),
        Some(Gesture::Tap { column: 50, row: 2 })
    );
}

#[test]
fn release_without_press_is_ignored() {
    let mut tracker = SwipeTracker::default();
    assert_eq!(tracker.release(10, 10), None);

    tracker.press(1, 1);
    tracker.cancel();
    assert_eq!(tracker.release(10, 10), None);
}

// ===== Slider =====

#[test]
fn slider_ends_map_to_first_and_last_page() {
    let bounds = PageBounds::default();
    let track = Rect::new(10, 0, 100, 1);

    assert_eq!(slider_page(track, 10, bounds).get(), 1);
    assert_eq!(slider_page(track, 109, bounds).get(), 604);
}

#[test]
fn slider_clamps_outside_columns() {
    let bounds = PageBounds::default();
    let track = Rect::new(10, 0, 100, 1);

    assert_eq!(slider_page(track, 0, bounds).get(), 1);
    assert_eq!(slider_page(track, 200, bounds).get(), 604);
}

#[test]
fn slider_is_monotonic() {
    let bounds = PageBounds::default();
    let track = Rect::new(0, 0, 80, 1);
    let pages: Vec<u16> = (0..80).map(|c| slider_page(track, c, bounds).get()).collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn slider_offset_inverts_slider_page_at_ends() {
    let bounds = PageBounds::default();
    assert_eq!(slider_offset(100, bounds.first(), bounds), 0);
    assert_eq!(slider_offset(100, bounds.last(), bounds), 99);
}

#[test]
fn degenerate_slider_selects_first_page() {
    let bounds = PageBounds::default();
    assert_eq!(slider_page(Rect::new(0, 0, 1, 1), 0, bounds).get(), 1);
    assert_eq!(slider_offset(1, bounds.last(), bounds), 0);
}

// ===== Hit testing =====

#[test]
fn footer_controls_take_priority() {
    let zones = TapZones::default();
    let regions = regions();

    assert_eq!(hit_test(&regions, &zones, 2, 22), HitTarget::PrevButton);
    assert_eq!(hit_test(&regions, &zones, 97, 22), HitTarget::NextButton);
    assert_eq!(hit_test(&regions, &zones, 50, 22), HitTarget::Slider);
}

#[test]
fn retry_button_beats_page_zone() {
    let zones = TapZones::default();
    assert_eq!(
        hit_test(&regions(), &zones, 50, 10),
        HitTarget::RetryButton
    );
}

#[test]
fn page_taps_resolve_to_zones() {
    let zones = TapZones::default();
    let regions = regions();

    assert_eq!(hit_test(&regions, &zones, 5, 5), HitTarget::Page(Zone::Left));
    assert_eq!(hit_test(&regions, &zones, 50, 5), HitTarget::Page(Zone::Center));
    assert_eq!(hit_test(&regions, &zones, 90, 5), HitTarget::Page(Zone::Right));
    assert_eq!(hit_test(&regions, &zones, 50, 0), HitTarget::Nothing);
}

#[test]
fn open_modal_captures_taps() {
    let zones = TapZones::default();
    let regions = HitRegions {
        modal: Some(Rect::new(20, 2, 60, 16)),
        modal_list: Some(Rect::new(21, 5, 58, 12)),
        modal_list_offset: 10,
        ..regions()
    };

    assert_eq!(hit_test(&regions, &zones, 30, 5), HitTarget::ModalItem(10));
    assert_eq!(hit_test(&regions, &zones, 30, 8), HitTarget::ModalItem(13));
    assert_eq!(hit_test(&regions, &zones, 30, 3), HitTarget::ModalChrome);
    assert_eq!(hit_test(&regions, &zones, 2, 22), HitTarget::ModalBackdrop);
}
