use isometric_renderer::core::{DisplayConfig, Viewport, DEFAULT_ISOMETRIC_ROTATION};

const EPS: f64 = 1e-9;

#[test]
fn test_rotation_is_applied_before_pan() {
    let cfg = DisplayConfig::new(8, 8, 64, 32).with_rotation(std::f64::consts::FRAC_PI_2);
    let vp = Viewport::new(100, 50, 600, 400);

    let (sx, sy) = vp.tile_to_screen(1.0, 0.0, &cfg);
    assert!((sx - -100.0).abs() < EPS);
    assert!((sy - -49.0).abs() < EPS);
}

#[test]
fn test_zoom_scales_tile_axes_independently() {
    let cfg = DisplayConfig::new(8, 8, 64, 32).with_rotation(0.0);
    let vp = Viewport::new(0, 0, 600, 400).with_zoom(2.0, 3.0);

    let (sx, sy) = vp.tile_to_screen(4.0, 5.0, &cfg);
    assert!((sx - 8.0).abs() < EPS);
    assert!((sy - 15.0).abs() < EPS);
}

#[test]
fn test_default_rotation_round_trips_whole_grid() {
    let cfg = DisplayConfig::new(12, 7, 64, 32);
    assert_eq!(cfg.isometric_rotation, DEFAULT_ISOMETRIC_ROTATION);
    let vp = Viewport::centered(800, 600).with_zoom(0.5, 1.25);

    for y in 0..cfg.map_h {
        for x in 0..cfg.map_w {
            let (sx, sy) = vp.tile_to_screen(x as f64, y as f64, &cfg);
            let (tx, ty) = vp.screen_to_tile(sx, sy, &cfg);
            assert!((tx - x as f64).abs() < 1e-6);
            assert!((ty - y as f64).abs() < 1e-6);
        }
    }
}

#[test]
fn test_on_screen_culls_cells_outside_view() {
    let cfg = DisplayConfig::new(32, 32, 64, 32);
    let vp = Viewport::new(0, 0, 320, 240);

    let (px, py) = cfg.cell_anchor(2, 2);
    assert!(vp.on_screen(px, py, cfg.tile_w, cfg.tile_h));

    let (px, py) = cfg.cell_anchor(31, 0);
    assert!(!vp.on_screen(px, py, cfg.tile_w, cfg.tile_h));

    let mut panned = vp;
    panned.move_by(px, py);
    assert!(panned.on_screen(px, py, cfg.tile_w, cfg.tile_h));
}
