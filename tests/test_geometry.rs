use starfall::geometry::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn rect_edges_are_centre_anchored() {
    let r = Rect::new(100.0, 50.0, 40.0, 20.0);
    assert_eq!(r.left(), 80.0);
    assert_eq!(r.right(), 120.0);
    assert_eq!(r.top(), 40.0);
    assert_eq!(r.bottom(), 60.0);
}

#[test]
fn overlapping_boxes_collide() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(6.0, 6.0, 10.0, 10.0);
    assert!(overlaps(&a, &b));
    assert!(overlaps(&b, &a));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let side = Rect::new(10.0, 0.0, 10.0, 10.0);
    let below = Rect::new(0.0, 10.0, 10.0, 10.0);
    assert!(!overlaps(&a, &side));
    assert!(!overlaps(&a, &below));
}

#[test]
fn clamp_bounds_both_ends() {
    assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(0.4, 0.0, 1.0), 0.4);
    assert_eq!(clamp(7.0, 0.0, 1.0), 1.0);
}

#[test]
fn pick_from_nothing_is_none() {
    let mut rng = StdRng::seed_from_u64(42);
    let empty: [u8; 0] = [];
    assert_eq!(pick(&empty, &mut rng), None);

    let items = [1, 2, 3];
    let chosen = pick(&items, &mut rng).copied();
    assert!(matches!(chosen, Some(1..=3)));
}

#[test]
fn jitter_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let j = jitter(&mut rng);
        assert!((-0.5..0.5).contains(&j));
    }
}
