mod vec2;

pub use vec2::Vec2;

/// Common math constants
pub mod consts {
    /// Scale used by [`round_for_float`](super::utils::round_for_float): three decimal places
    pub const ROUNDING_SCALE: f64 = 1000.0;
}

/// Scalar helpers shared by the narrow phase and the resolver
pub mod utils {
    use super::consts::ROUNDING_SCALE;

    /// Rounds to three decimal places, halves rounding toward positive infinity.
    ///
    /// Every sign or zero test on a derived scalar (dot products, roots of the
    /// time-of-impact quadratics) goes through this first. Without it a contact
    /// computed at `t = -1e-12` would be discarded as "in the past".
    #[inline]
    pub fn round_for_float(value: f64) -> f64 {
        (value * ROUNDING_SCALE + 0.5).floor() / ROUNDING_SCALE
    }

    /// Real roots of `a·t² + b·t + c = 0`.
    ///
    /// Returns `None` when there is no quadratic term (no relative motion) or
    /// when the discriminant is negative.
    #[inline]
    pub fn quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || discriminant.is_nan() {
            return None;
        }

        let sqrt = discriminant.sqrt();
        let r0 = (-b + sqrt) / (2.0 * a);
        let r1 = (-b - sqrt) / (2.0 * a);

        if r0.is_nan() || r1.is_nan() {
            return None;
        }

        Some((r0, r1))
    }

    /// Returns true if the segments `[a0, a1]` and `[b0, b1]` share at least one point
    #[inline]
    pub fn has_overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> bool {
        !(b1 < a0 || a1 < b0)
    }

    /// Returns the shared coordinate if the segments touch at exactly one end
    #[inline]
    pub fn exact_overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> Option<f64> {
        if a0 == b1 {
            Some(a0)
        } else if a1 == b0 {
            Some(a1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_for_float() {
        assert_eq!(round_for_float(1.23449), 1.234);
        assert_eq!(round_for_float(0.0625), 0.063);
        assert_eq!(round_for_float(-0.0625), -0.062);
        assert_eq!(round_for_float(-0.0004), 0.0);
        assert_eq!(round_for_float(-0.0006), -0.001);
    }

    #[test]
    fn test_quadratic_roots() {
        // (t - 1)(t - 3) = t² - 4t + 3
        let (r0, r1) = quadratic(1.0, -4.0, 3.0).unwrap();
        assert_relative_eq!(r0, 3.0);
        assert_relative_eq!(r1, 1.0);
    }

    #[test]
    fn test_quadratic_degenerate() {
        assert!(quadratic(0.0, 2.0, 1.0).is_none());
        assert!(quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_overlap() {
        assert!(has_overlap(0.0, 1.0, 1.0, 2.0));
        assert!(has_overlap(0.0, 3.0, 1.0, 2.0));
        assert!(!has_overlap(0.0, 1.0, 1.5, 2.0));

        assert_eq!(exact_overlap(0.0, 1.0, 1.0, 2.0), Some(1.0));
        assert_eq!(exact_overlap(1.0, 2.0, 0.0, 1.0), Some(1.0));
        assert_eq!(exact_overlap(0.0, 2.0, 1.0, 3.0), None);
    }
}
