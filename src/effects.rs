/// Background star field and the player hit-feedback timers.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{HitFx, Star};

pub fn make_star_field(cfg: &GameConfig, rng: &mut impl Rng) -> Vec<Star> {
    (0..cfg.star_count)
        .map(|_| Star {
            x: rng.gen::<f32>() * cfg.width,
            y: rng.gen::<f32>() * cfg.height,
            r: 0.5 + rng.gen::<f32>() * 1.8,
            speed: 20.0 + rng.gen::<f32>() * 60.0,
        })
        .collect()
}

/// Scroll downward; stars that fall off the bottom wrap to the top at a
/// fresh column.
pub fn update_stars(stars: &mut [Star], cfg: &GameConfig, rng: &mut impl Rng, dt: f32) {
    for star in stars {
        star.y += star.speed * dt;
        if star.y > cfg.height + 2.0 {
            star.y = -2.0;
            star.x = rng.gen::<f32>() * cfg.width;
        }
    }
}

pub fn update_hit_feedback(fx: &mut HitFx, dt: f32) {
    fx.shake_timer = (fx.shake_timer - dt).max(0.0);
    fx.flash_timer = (fx.flash_timer - dt).max(0.0);
    fx.flicker_timer = (fx.flicker_timer - dt).max(0.0);
    fx.cooldown_timer = (fx.cooldown_timer - dt).max(0.0);
}
