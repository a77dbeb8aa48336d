use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn sizes(n: usize) -> impl Iterator<Item = (f64, f64, f64, f64)> {
    (0..n as u64).map(|i| {
        let pick = |k: u64| 1.0 + (mix64(i * 4 + k) % 2000) as f64 / 3.0;
        (pick(0), pick(1), pick(2), pick(3))
    })
}

#[test]
fn fit_always_centers() {
    for (nw, nh, vw, vh) in sizes(500) {
        let t = fit(nw, nh, vw, vh);
        assert!(approx(t.x + t.width / 2.0, vw / 2.0));
        assert!(approx(t.y + t.height / 2.0, vh / 2.0));
    }
}

#[test]
fn fit_never_upscales_and_preserves_aspect() {
    for (nw, nh, vw, vh) in sizes(500) {
        let t = fit(nw, nh, vw, vh);
        if nw <= vw && nh <= vh {
            assert_eq!((t.width, t.height), (nw, nh));
        } else {
            assert!(approx(t.width / t.height, nw / nh));
            assert!(t.width <= vw + 1e-9 && t.height <= vh + 1e-9);
        }
    }
}

#[test]
fn equal_aspect_fits_width_first() {
    let t = fit(600.0, 400.0, 300.0, 200.0);
    assert_eq!(t.width, 300.0);
    assert!(approx(t.height, 200.0));
    assert_eq!(t.x, 0.0);
    assert!(approx(t.y, 0.0));
}

#[test]
fn tall_image_fits_height() {
    let t = fit(100.0, 400.0, 300.0, 300.0);
    assert_eq!(t.height, 300.0);
    assert_eq!(t.width, 75.0);
    assert_eq!(t.x, 112.5);
    assert_eq!(t.y, 0.0);
}

#[test]
fn wide_image_scenario() {
    let t = fit_to_canvas(400, 200, Canvas::new(300, 300).unwrap());
    assert_eq!(t, Transform::new(0.0, 75.0, 300.0, 150.0));
}

#[test]
fn small_image_is_centered_at_native_size() {
    let t = fit(50.0, 20.0, 300.0, 300.0);
    assert_eq!(t, Transform::new(125.0, 140.0, 50.0, 20.0));
}
