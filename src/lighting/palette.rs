/// Procedural cosine palette.
///
/// `palette` is the classic a + b·cos(2π(c·t + d)) formulation; `spectrum`
/// fixes the coefficients to a full-hue sweep used for iridescence.

use std::f64::consts::TAU;

/// Sample a cosine palette at `t`. Colors are (r, g, b) in [0, 1] when the
/// coefficients are chosen that way; the function itself does not clamp.
pub fn palette(
    t: f64,
    a: (f64, f64, f64),
    b: (f64, f64, f64),
    c: (f64, f64, f64),
    d: (f64, f64, f64),
) -> (f64, f64, f64) {
    (
        a.0 + b.0 * (TAU * (c.0 * t + d.0)).cos(),
        a.1 + b.1 * (TAU * (c.1 * t + d.1)).cos(),
        a.2 + b.2 * (TAU * (c.2 * t + d.2)).cos(),
    )
}

/// Full-spectrum hue sweep, period 1 in `n`.
pub fn spectrum(n: f64) -> (f64, f64, f64) {
    palette(
        n,
        (0.5, 0.5, 0.5),
        (0.5, 0.5, 0.5),
        (1.0, 1.0, 1.0),
        (0.0, 0.33, 0.67),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_at_zero() {
        let (r, g, b) = spectrum(0.0);
        assert!((r - 1.0).abs() < 1e-12);
        assert!((g - (0.5 + 0.5 * (TAU * 0.33).cos())).abs() < 1e-12);
        assert!((b - (0.5 + 0.5 * (TAU * 0.67).cos())).abs() < 1e-12);
    }

    #[test]
    fn test_spectrum_period_one() {
        for n in [-1.3, 0.0, 0.41, 2.77] {
            let a = spectrum(n);
            let b = spectrum(n + 1.0);
            assert!((a.0 - b.0).abs() < 1e-9);
            assert!((a.1 - b.1).abs() < 1e-9);
            assert!((a.2 - b.2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spectrum_in_unit_range() {
        let mut n = -2.0;
        while n < 2.0 {
            let (r, g, b) = spectrum(n);
            for ch in [r, g, b] {
                assert!((-1e-12..=1.0 + 1e-12).contains(&ch));
            }
            n += 0.01;
        }
    }
}
