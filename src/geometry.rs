/// Centre-anchored axis-aligned boxes and small numeric helpers.

use rand::seq::SliceRandom;
use rand::Rng;

/// A centre-anchored axis-aligned box. `w`/`h` are full extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

/// Anything with a collision box.
pub trait Hitbox {
    fn rect(&self) -> Rect;
}

impl Hitbox for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// Strict overlap: boxes that only touch along an edge do not collide.
pub fn overlaps(a: &impl Hitbox, b: &impl Hitbox) -> bool {
    let a = a.rect();
    let b = b.rect();
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Uniformly pick one element, `None` for an empty slice.
pub fn pick<'a, T>(items: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    items.choose(rng)
}

/// Uniform jitter in `[-0.5, 0.5)`, the building block for particle spread.
pub fn jitter(rng: &mut impl Rng) -> f32 {
    rng.gen::<f32>() - 0.5
}

