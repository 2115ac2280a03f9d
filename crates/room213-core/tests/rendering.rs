//! Raster Rendering Tests
//!
//! Pixel-level checks on a Skia raster surface: determinism, overlays, the poster frame and
//! the optional cross-fade.

mod common;

use common::{init_tracing, pixel_at, recording_driver};
use room213_core::animation::EasingType;
use room213_core::scenes::overlay::{dust_particle, vignette, DUST_PARTICLES};
use room213_core::scenes::{escape, hallway, reflection};
use room213_core::systems::renderer::{frame_surface, read_rgba, render_frame, snapshot_png};
use room213_core::systems::transitions::TransitionSettings;
use room213_core::{FontBook, SceneKind, Storyboard, CANVAS_HEIGHT, CANVAS_WIDTH};

const W: usize = CANVAS_WIDTH as usize;
const H: usize = CANVAS_HEIGHT as usize;

fn render_at(storyboard: &Storyboard, t: f64) -> Vec<u8> {
    let mut surface = frame_surface().unwrap();
    render_frame(storyboard, t, surface.canvas());
    read_rgba(&mut surface).unwrap()
}

/// Runs one painter on a black surface, without the overlay pass.
fn paint_with(painter: impl FnOnce(&skia_safe::Canvas)) -> Vec<u8> {
    let mut surface = frame_surface().unwrap();
    surface.canvas().clear(skia_safe::Color::BLACK);
    painter(surface.canvas());
    read_rgba(&mut surface).unwrap()
}

fn assert_rgb_near(pixels: &[u8], (x, y): (usize, usize), expected: [u8; 3], tolerance: u8) {
    let actual = pixel_at(pixels, W, x, y);
    for channel in 0..3 {
        assert!(
            actual[channel].abs_diff(expected[channel]) <= tolerance,
            "({}, {}): expected {:?}, got {:?}",
            x,
            y,
            expected,
            actual
        );
    }
}

#[test]
fn hallway_palette_at_the_first_frame() {
    let pixels = paint_with(|canvas| {
        hallway::hallway(canvas, 0.0);
    });
    // Backdrop, left of the wall trapezoid and above the floor.
    assert_rgb_near(&pixels, (5, 700), [0x06, 0x06, 0x08], 1);
    // Top of the walls and top of the floor: first gradient stops.
    assert_rgb_near(&pixels, (360, 2), [0x1c, 0x1b, 0x3a], 2);
    assert_rgb_near(&pixels, (360, 770), [0x1a, 0x14, 0x24], 2);
    // Bottom of the floor approaches the last stop.
    assert_rgb_near(&pixels, (360, H - 1), [0x05, 0x01, 0x09], 2);
}

/// At t = 0.125 the four-pi flicker peaks, so the ceiling light is at half opacity.
#[test]
fn ceiling_light_flicker_peaks_at_an_eighth() {
    let pixels = paint_with(|canvas| {
        hallway::hallway(canvas, 0.125);
    });
    // Wall gradient at y = 192 is a quarter of the way from #1c1b3a to #090512.
    let wall = [23.25, 21.5, 48.0];
    let light = [255.0, 240.0, 210.0];
    let mix = |c: usize| (wall[c] + 0.5 * (light[c] - wall[c])).round() as u8;
    assert_rgb_near(&pixels, (360, 192), [mix(0), mix(1), mix(2)], 3);
}

#[test]
fn door_plaque_is_filled_dark_slate() {
    let storyboard = Storyboard::new(FontBook::empty());
    let pixels = paint_with(|canvas| hallway::door(canvas, storyboard.fonts(), 0.0, 0.6));
    // Plaque spans x 342..378, y 393..428 at perspective 0.6. This point clears its stroke.
    assert_rgb_near(&pixels, (345, 396), [0x16, 0x19, 0x24], 1);
    // Handle sits three quarters across the door, 60% down.
    assert_rgb_near(&pixels, (388, 495), [0xf1, 0xdf, 0x93], 1);
}

#[test]
fn mirror_frame_and_backdrop_colors() {
    let pixels = paint_with(|canvas| reflection::reflection(canvas, 0.3));
    assert_rgb_near(&pixels, (5, 5), [0x03, 0x01, 0x05], 1);
    // The frame shows in the 20px band left of the glass.
    assert_rgb_near(&pixels, (130, 500), [0x1a, 0x0f, 0x1f], 1);
}

/// The door flash follows `sin((t + 0.2) * 10pi)`: full at t = 0.05, dark at t = 0.15.
#[test]
fn escape_flash_follows_its_pulse() {
    let lit = paint_with(|canvas| escape::escape(canvas, 0.05));
    // #ff5078 at 0.4 over #05030a.
    assert_rgb_near(&lit, (384, 500), [105, 34, 54], 2);

    let dark = paint_with(|canvas| escape::escape(canvas, 0.15));
    assert_rgb_near(&dark, (369, 500), [0x05, 0x03, 0x0a], 1);
}

#[test]
fn same_time_same_pixels() {
    init_tracing();
    let storyboard = Storyboard::new(FontBook::empty());
    for t in [0.0, 13_500.0, 29_000.0, 41_000.0, 59_000.0] {
        assert_eq!(render_at(&storyboard, t), render_at(&storyboard, t), "t = {}", t);
    }
}

#[test]
fn frames_change_over_time() {
    let storyboard = Storyboard::new(FontBook::empty());
    assert_ne!(render_at(&storyboard, 1_000.0), render_at(&storyboard, 2_000.0));
}

#[test]
fn every_scene_paints_an_opaque_frame() {
    let storyboard = Storyboard::new(FontBook::empty());
    for t in [500.0, 12_500.0, 24_500.0, 36_500.0, 48_500.0, 60_000.0] {
        let pixels = render_at(&storyboard, t);
        for (x, y) in [(0, 0), (W - 1, 0), (W / 2, H / 2), (0, H - 1), (W - 1, H - 1)] {
            assert_eq!(pixel_at(&pixels, W, x, y)[3], 255, "t = {} at ({}, {})", t, x, y);
        }
    }
}

#[test]
fn vignette_darkens_edges_only() {
    let mut surface = frame_surface().unwrap();
    surface.canvas().clear(skia_safe::Color::WHITE);
    vignette(surface.canvas());
    let pixels = read_rgba(&mut surface).unwrap();

    let center = pixel_at(&pixels, W, W / 2, H / 2);
    let corner = pixel_at(&pixels, W, 0, 0);
    let opposite = pixel_at(&pixels, W, W - 1, H - 1);
    assert!(center[0] >= 253, "center darkened: {:?}", center);
    assert!(corner[0] < 200, "corner not darkened: {:?}", corner);
    assert!(corner[0].abs_diff(opposite[0]) <= 2);
}

#[test]
fn dust_is_a_pure_function_of_index_and_time() {
    for i in 0..DUST_PARTICLES {
        let a = dust_particle(i, 0.37);
        let b = dust_particle(i, 0.37);
        assert_eq!(a, b);
        let ((_, y), size, alpha) = a;
        assert!((0.0..CANVAS_HEIGHT as f64).contains(&y));
        assert!((2.0..=5.0).contains(&size));
        assert!((0.0..=0.2).contains(&alpha));
    }
}

#[test]
fn dust_particle_positions_match_hand_computed_values() {
    let ((x, y), size, alpha) = dust_particle(1, 0.0);
    // x = 97 + 120 sin(1), y = 0.02 * 1280
    assert!((x - 197.976_518).abs() < 1e-4, "x = {}", x);
    assert!((y - 25.6).abs() < 1e-9);
    assert_eq!(size, 3.0);
    assert!((alpha - 0.184_147).abs() < 1e-5);

    // x wraps: (970 + 120 sin(11.5)) mod 720, y = 0.3 * 1280
    let ((x, y), size, alpha) = dust_particle(10, 0.5);
    assert!((x - 144.945_739).abs() < 1e-4, "x = {}", x);
    assert!((y - 384.0).abs() < 1e-9);
    assert_eq!(size, 4.0);
    assert!((alpha - 0.165_029).abs() < 1e-5);
}

#[test]
fn poster_frame_matches_itself_and_differs_from_first_frame() {
    let storyboard = Storyboard::new(FontBook::empty());
    let mut surface = frame_surface().unwrap();
    storyboard.draw_poster(surface.canvas());
    let poster = read_rgba(&mut surface).unwrap();

    storyboard.draw_poster(surface.canvas());
    assert_eq!(read_rgba(&mut surface).unwrap(), poster);
    assert_ne!(poster, render_at(&storyboard, 0.0));
}

#[test]
fn crossfade_only_near_cuts() {
    let scenes = Storyboard::new(FontBook::empty());
    let settings = TransitionSettings {
        crossfade_ms: 1_000.0,
        easing: EasingType::Linear,
    };
    let boundary = scenes.resolve(12_500.0);
    let fade = settings
        .crossfade(scenes.scenes(), &boundary, 12_500.0)
        .unwrap();
    assert_eq!(fade.from.kind, SceneKind::Hallway);
    assert!((fade.alpha - 0.5).abs() < 1e-6);

    let settled = scenes.resolve(14_000.0);
    assert!(settings.crossfade(scenes.scenes(), &settled, 14_000.0).is_none());
    let first = scenes.resolve(200.0);
    assert!(settings.crossfade(scenes.scenes(), &first, 200.0).is_none());
    assert!(TransitionSettings::default()
        .crossfade(scenes.scenes(), &boundary, 12_500.0)
        .is_none());
}

#[test]
fn crossfade_changes_pixels_at_the_cut() {
    let hard = Storyboard::new(FontBook::empty());
    let soft = Storyboard::new(FontBook::empty()).with_transition(TransitionSettings {
        crossfade_ms: 2_000.0,
        easing: EasingType::EaseInOut,
    });
    assert_ne!(render_at(&hard, 12_400.0), render_at(&soft, 12_400.0));
    assert_eq!(render_at(&hard, 20_000.0), render_at(&soft, 20_000.0));
}

#[test]
fn driver_draws_when_given_a_surface() {
    let (mut driver, _speech) = recording_driver();
    let mut surface = frame_surface().unwrap();
    let request = driver.play();
    let outcome = driver.tick(request, 0.0, Some(surface.canvas()));
    assert!(outcome.report().unwrap().drew);
    let driven = read_rgba(&mut surface).unwrap();
    assert_eq!(driven, render_at(driver.storyboard(), 0.0));
}

#[test]
fn snapshot_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let storyboard = Storyboard::new(FontBook::empty());
    let mut surface = frame_surface().unwrap();
    render_frame(&storyboard, 40_000.0, surface.canvas());
    snapshot_png(&mut surface, &path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (W as u32, H as u32));
}
