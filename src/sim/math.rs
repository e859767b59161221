//! Scalar and vector helpers used by every entity
//!
//! Angles are stored in degrees on entities and converted to radians only at
//! the trig boundary.

use glam::Vec2;

use crate::polar_to_cartesian;

/// Saturate `value` to `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Toroidal wrap into `[min, max]`
///
/// Both branches take the remainder by `max`, so for a non-zero `min` this is
/// not a plain `(v - min) mod (max - min) + min`. Values already in range are
/// returned unchanged.
#[inline]
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let mut value = value;
    if value < min {
        value = max + (value % max);
    }
    if value > max {
        value = min + (value % max);
    }
    value
}

/// Polar helpers for [`Vec2`]
pub trait PolarExt {
    /// Overwrite both components from polar form (radians)
    fn set_to_polar(&mut self, azimuth: f32, radius: f32) -> &mut Self;

    /// Build a vector from polar form (radians)
    fn from_polar(azimuth: f32, radius: f32) -> Self;
}

impl PolarExt for Vec2 {
    fn set_to_polar(&mut self, azimuth: f32, radius: f32) -> &mut Self {
        *self = polar_to_cartesian(radius, azimuth);
        self
    }

    fn from_polar(azimuth: f32, radius: f32) -> Self {
        polar_to_cartesian(radius, azimuth)
    }
}

pub mod angle {
    use glam::Vec2;
    use std::f32::consts::{PI, TAU};

    /// Default step for [`rotate_to`] (radians per call)
    pub const DEFAULT_LERP: f32 = 0.05;

    #[inline]
    pub fn to_degrees(radians: f32) -> f32 {
        radians * (180.0 / PI)
    }

    #[inline]
    pub fn to_radians(degrees: f32) -> f32 {
        degrees * (PI / 180.0)
    }

    /// Bearing from `a` to `b` in degrees
    #[inline]
    pub fn between(a: Vec2, b: Vec2) -> f32 {
        to_degrees((b.y - a.y).atan2(b.x - a.x))
    }

    /// Step `current` toward `target` (radians) along the shorter arc
    ///
    /// Snaps to `target` once within `lerp` of it, directly or across the
    /// wrap seam.
    pub fn rotate_to(current: f32, target: f32, lerp: f32) -> f32 {
        if current == target {
            return current;
        }

        let distance = (target - current).abs();
        if distance <= lerp || distance >= TAU - lerp {
            return target;
        }

        let mut target = target;
        if distance > PI {
            if target < current {
                target += TAU;
            } else {
                target -= TAU;
            }
        }

        if target > current {
            current + lerp
        } else if target < current {
            current - lerp
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::angle::*;
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 0.0, 10.0), 3.0);
    }

    #[test]
    fn test_wrap_below_min_uses_max_modulus() {
        assert_eq!(wrap(-1.0, 0.0, 100.0), 99.0);
        // Margin-style bounds keep the literal formula: 100 + (-21 % 100)
        assert_eq!(wrap(-21.0, -20.0, 100.0), 79.0);
    }

    #[test]
    fn test_wrap_above_max() {
        assert_eq!(wrap(101.0, 0.0, 100.0), 1.0);
        assert_eq!(wrap(841.0, -20.0, 840.0), -19.0);
    }

    #[test]
    fn test_set_to_polar_overwrites() {
        let mut v = Vec2::new(7.0, -3.0);
        v.set_to_polar(0.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 0.0));

        let w = Vec2::from_polar(PI, 2.0);
        assert!((w.x + 2.0).abs() < 1e-5);
        assert!(w.y.abs() < 1e-5);
    }

    #[test]
    fn test_between_degrees() {
        let a = Vec2::new(0.0, 0.0);
        assert!((between(a, Vec2::new(0.0, 10.0)) - 90.0).abs() < 1e-4);
        assert!((between(a, Vec2::new(-10.0, 0.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_to_takes_short_arc_across_seam() {
        // From just below PI toward just above -PI: step forward, not back
        let next = rotate_to(3.0, -3.0, DEFAULT_LERP);
        assert!(next > 3.0);
    }

    #[test]
    fn test_rotate_to_snaps_when_close() {
        assert_eq!(rotate_to(1.0, 1.03, DEFAULT_LERP), 1.03);
        assert_eq!(rotate_to(1.03, 1.03, DEFAULT_LERP), 1.03);
    }

    proptest! {
        #[test]
        fn prop_wrap_idempotent_in_range(v in -20.0f32..840.0) {
            prop_assert_eq!(wrap(v, -20.0, 840.0), v);
        }

        #[test]
        fn prop_rotate_to_converges(current in -PI..PI, target in -PI..PI) {
            let mut angle = current;
            for _ in 0..200 {
                angle = rotate_to(angle, target, DEFAULT_LERP);
                if angle == target {
                    break;
                }
            }
            prop_assert_eq!(angle, target);
            prop_assert_eq!(rotate_to(angle, target, DEFAULT_LERP), target);
        }
    }
}
