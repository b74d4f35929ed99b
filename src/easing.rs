//! Easing Curves
//!
//! Pure interpolation functions `f(t, b, c, d) -> value` where `t` is elapsed
//! time, `d` is the tween's total duration, `b` is the initial value and `c`
//! is the total delta (`target - initial`). Every curve returns `b` at `t=0`
//! and `b+c` at `t=d`.
//!
//! Ported from the `tween.lua`-derived formulae used by the animation
//! scheduler this crate generalizes; the polynomial/trigonometric bodies are
//! reproduced exactly so prior visual motion matches.

use std::f32::consts::PI;

/// One of the 33 supported interpolation curves.
///
/// Quad/Cubic/Quart/Quint/Sine/Expo/Circ/Bounce each come in four flavors
/// (`In`, `Out`, `InOut`, `OutIn`), plus `Linear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,

    InQuad,
    OutQuad,
    InOutQuad,
    OutInQuad,

    InCubic,
    OutCubic,
    InOutCubic,
    OutInCubic,

    InQuart,
    OutQuart,
    InOutQuart,
    OutInQuart,

    InQuint,
    OutQuint,
    InOutQuint,
    OutInQuint,

    InSine,
    OutSine,
    InOutSine,
    OutInSine,

    InExpo,
    OutExpo,
    InOutExpo,
    OutInExpo,

    InCirc,
    OutCirc,
    InOutCirc,
    OutInCirc,

    InBounce,
    OutBounce,
    InOutBounce,
    OutInBounce,
}

impl Easing {
    /// Evaluate this curve at elapsed time `t` for a tween spanning duration
    /// `d`, starting at `b` with total delta `c`.
    pub fn apply(self, t: f32, b: f32, c: f32, d: f32) -> f32 {
        use Easing::*;
        match self {
            Linear => linear(t, b, c, d),

            InQuad => in_quad(t, b, c, d),
            OutQuad => out_quad(t, b, c, d),
            InOutQuad => in_out_quad(t, b, c, d),
            OutInQuad => out_in_quad(t, b, c, d),

            InCubic => in_cubic(t, b, c, d),
            OutCubic => out_cubic(t, b, c, d),
            InOutCubic => in_out_cubic(t, b, c, d),
            OutInCubic => out_in_cubic(t, b, c, d),

            InQuart => in_quart(t, b, c, d),
            OutQuart => out_quart(t, b, c, d),
            InOutQuart => in_out_quart(t, b, c, d),
            OutInQuart => out_in_quart(t, b, c, d),

            InQuint => in_quint(t, b, c, d),
            OutQuint => out_quint(t, b, c, d),
            InOutQuint => in_out_quint(t, b, c, d),
            OutInQuint => out_in_quint(t, b, c, d),

            InSine => in_sine(t, b, c, d),
            OutSine => out_sine(t, b, c, d),
            InOutSine => in_out_sine(t, b, c, d),
            OutInSine => out_in_sine(t, b, c, d),

            InExpo => in_expo(t, b, c, d),
            OutExpo => out_expo(t, b, c, d),
            InOutExpo => in_out_expo(t, b, c, d),
            OutInExpo => out_in_expo(t, b, c, d),

            InCirc => in_circ(t, b, c, d),
            OutCirc => out_circ(t, b, c, d),
            InOutCirc => in_out_circ(t, b, c, d),
            OutInCirc => out_in_circ(t, b, c, d),

            InBounce => in_bounce(t, b, c, d),
            OutBounce => out_bounce(t, b, c, d),
            InOutBounce => in_out_bounce(t, b, c, d),
            OutInBounce => out_in_bounce(t, b, c, d),
        }
    }
}

fn linear(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * t / d + b
}

// ---- Quad ------------------------------------------------------------

fn in_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (t / d).powi(2) + b
}

fn out_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

fn in_out_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d * 2.0;
    if t < 1.0 {
        c / 2.0 * t.powi(2) + b
    } else {
        -c / 2.0 * ((t - 1.0) * (t - 3.0) - 1.0) + b
    }
}

fn out_in_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_quad(t * 2.0, b, c / 2.0, d)
    } else {
        in_quad((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Cubic -------------------------------------------------------------

fn in_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (t / d).powi(3) + b
}

fn out_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * ((t / d - 1.0).powi(3) + 1.0) + b
}

fn in_out_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d * 2.0;
    if t < 1.0 {
        c / 2.0 * t * t * t + b
    } else {
        let t = t - 2.0;
        c / 2.0 * (t * t * t + 2.0) + b
    }
}

fn out_in_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_cubic(t * 2.0, b, c / 2.0, d)
    } else {
        in_cubic((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Quart ---------------------------------------------------------------

fn in_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (t / d).powi(4) + b
}

fn out_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    -c * ((t / d - 1.0).powi(4) - 1.0) + b
}

fn in_out_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d * 2.0;
    if t < 1.0 {
        c / 2.0 * t.powi(4) + b
    } else {
        -c / 2.0 * ((t - 2.0).powi(4) - 2.0) + b
    }
}

fn out_in_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_quart(t * 2.0, b, c / 2.0, d)
    } else {
        in_quart((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Quint -----------------------------------------------------------

fn in_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (t / d).powi(5) + b
}

fn out_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * ((t / d - 1.0).powi(5) + 1.0) + b
}

fn in_out_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d * 2.0;
    if t < 1.0 {
        c / 2.0 * t.powi(5) + b
    } else {
        c / 2.0 * ((t - 2.0).powi(5) + 2.0) + b
    }
}

fn out_in_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_quint(t * 2.0, b, c / 2.0, d)
    } else {
        in_quint((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Sine --------------------------------------------------------------

fn in_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    -c * (t / d * (PI / 2.0)).cos() + c + b
}

fn out_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (t / d * (PI / 2.0)).sin() + b
}

fn in_out_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    -c / 2.0 * (PI * t / d).cos() - (-c / 2.0) + b
}

fn out_in_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_sine(t * 2.0, b, c / 2.0, d)
    } else {
        in_sine((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Expo ----------------------------------------------------------------
//
// The exact endpoints short-circuit: `powf` drifts from the analytic limit at
// t=0 and t=d, so both are special-cased as in the original.

fn in_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t == 0.0 {
        return b;
    }
    c * 2f32.powf(10.0 * (t / d - 1.0)) + b - c * 0.001
}

fn out_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t == d {
        return b + c;
    }
    c * 1.001 * (-2f32.powf(-10.0 * t / d) + 1.0) + b
}

fn in_out_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t == 0.0 {
        return b;
    }
    if t == d {
        return b + c;
    }
    let t = t / d * 2.0;
    if t < 1.0 {
        c / 2.0 * 2f32.powf(10.0 * (t - 1.0)) + b - c * 0.0005
    } else {
        c / 2.0 * 1.0005 * (-2f32.powf(-10.0 * (t - 1.0)) + 2.0) + b
    }
}

fn out_in_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_expo(t * 2.0, b, c / 2.0, d)
    } else {
        in_expo((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Circ --------------------------------------------------------------

fn in_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    -c * ((1.0 - (t / d).powi(2)).sqrt() - 1.0) + b
}

fn out_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (1.0 - (t / d - 1.0).powi(2)).sqrt() + b
}

fn in_out_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d * 2.0;
    if t < 1.0 {
        -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
    } else {
        let t = t - 2.0;
        c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
    }
}

fn out_in_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_circ(t * 2.0, b, c / 2.0, d)
    } else {
        in_circ((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

// ---- Bounce ----------------------------------------------------------

fn out_bounce(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        let t = t - (1.5 / 2.75);
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        let t = t - (2.25 / 2.75);
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        let t = t - (2.625 / 2.75);
        c * (7.5625 * t * t + 0.984375) + b
    }
}

fn in_bounce(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c - out_bounce(d - t, 0.0, c, d) + b
}

fn in_out_bounce(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        in_bounce(t * 2.0, 0.0, c, d) * 0.5 + b
    } else {
        out_bounce(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
    }
}

fn out_in_bounce(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if t < d / 2.0 {
        out_bounce(t * 2.0, b, c / 2.0, d)
    } else {
        in_bounce((t * 2.0) - d, b + c / 2.0, c / 2.0, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Easing] = &[
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::OutInQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::OutInCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::OutInQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::OutInQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::OutInSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::OutInExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::OutInCirc,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InOutBounce,
        Easing::OutInBounce,
    ];

    #[test]
    fn all_33_curves_present() {
        assert_eq!(ALL.len(), 33);
    }

    #[test]
    fn every_curve_hits_its_endpoints() {
        let b = 10.0f32;
        let c = 50.0f32;
        let d = 1000.0f32;
        let tol = 1e-3 * c.abs();

        for easing in ALL {
            let start = easing.apply(0.0, b, c, d);
            let end = easing.apply(d, b, c, d);
            assert!(
                (start - b).abs() <= tol,
                "{easing:?} start={start} expected~{b}"
            );
            assert!(
                (end - (b + c)).abs() <= tol,
                "{easing:?} end={end} expected~{}",
                b + c
            );
        }
    }

    #[test]
    fn linear_is_exactly_proportional() {
        assert_eq!(Easing::Linear.apply(500.0, 0.0, 100.0, 1000.0), 50.0);
    }

    proptest::proptest! {
        #[test]
        fn endpoints_hold_for_arbitrary_params(
            b in -1000.0f32..1000.0,
            delta in -1000.0f32..1000.0,
            d in 1.0f32..10_000.0,
        ) {
            let c = delta;
            let tol = 1e-3 * c.abs() + 1e-3;
            for easing in ALL {
                let start = easing.apply(0.0, b, c, d);
                let end = easing.apply(d, b, c, d);
                proptest::prop_assert!((start - b).abs() <= tol);
                proptest::prop_assert!((end - (b + c)).abs() <= tol);
            }
        }
    }
}
