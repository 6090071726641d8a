use crate::serenity::Colour;

/// A colour in hue (degrees), saturation and lightness (percentages)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

/// An 8-bit per channel display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

/// Colour for the worst possible roll
pub(crate) const LOW: Hsl = Hsl {
    h: 0.0,
    s: 56.0,
    l: 54.0,
};

/// Colour for the best possible roll
pub(crate) const HIGH: Hsl = Hsl {
    h: 109.0,
    s: 58.0,
    l: 59.0,
};

impl Hsl {
    /// Channel-wise linear interpolation towards `to`
    fn lerp(self, to: Hsl, ratio: f64) -> Hsl {
        let mix = |a: f64, b: f64| a + (b - a) * ratio;
        Hsl {
            h: mix(self.h, to.h),
            s: mix(self.s, to.s),
            l: mix(self.l, to.l),
        }
    }

    pub(crate) fn to_rgb(self) -> Rgb {
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h60 = self.h / 60.0;
        let x = c * (1.0 - ((h60 % 2.0) - 1.0).abs());
        let m = l - c / 2.0;

        // h is never negative here so truncation picks the sector
        #[allow(clippy::cast_possible_truncation)]
        let (r, g, b) = match h60 as i64 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb {
            r: to_channel(r + m),
            g: to_channel(g + m),
            b: to_channel(b + m),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Rgb {
    /// Pack into the `0xRRGGBB` form Discord uses for embed colours
    pub(crate) fn packed(self) -> u32 {
        u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b)
    }
}

impl From<Rgb> for Colour {
    fn from(rgb: Rgb) -> Self {
        Colour::from_rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Where `total` sits between the lowest (`count` ones) and highest (`count` maximums) outcome.
/// A one-sided die has no spread, so it always counts as the best outcome.
#[allow(clippy::cast_precision_loss)]
fn outcome_ratio(die_size: u32, count: u32, total: u64) -> f64 {
    let count = u64::from(count);
    let span = (u64::from(die_size) * count).saturating_sub(count);
    if span == 0 {
        return 1.0;
    }
    let achieved = total.saturating_sub(count);
    (achieved as f64 / span as f64).clamp(0.0, 1.0)
}

/// Pick a colour on the red to green gradient reflecting how good a roll was
pub(crate) fn compute_colour(die_size: u32, count: u32, total: u64) -> Rgb {
    LOW.lerp(HIGH, outcome_ratio(die_size, count, total)).to_rgb()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_roll_is_low_endpoint() {
        assert_eq!(compute_colour(20, 1, 1), LOW.to_rgb());
        assert_eq!(compute_colour(20, 1, 1), Rgb { r: 203, g: 72, b: 72 });
    }

    #[test]
    fn maximum_roll_is_high_endpoint() {
        assert_eq!(compute_colour(20, 1, 20), HIGH.to_rgb());
        assert_eq!(
            compute_colour(20, 1, 20),
            Rgb {
                r: 112,
                g: 211,
                b: 90
            }
        );
    }

    #[test]
    fn multiple_dice_span_the_whole_gradient() {
        assert_eq!(compute_colour(6, 3, 3), LOW.to_rgb());
        assert_eq!(compute_colour(6, 3, 18), HIGH.to_rgb());
    }

    #[test]
    fn one_sided_die_does_not_divide_by_zero() {
        assert_eq!(compute_colour(1, 1, 1), HIGH.to_rgb());
        assert_eq!(compute_colour(1, 1000, 1000), HIGH.to_rgb());
    }

    #[test]
    fn same_inputs_same_colour() {
        for total in 1..=20 {
            assert_eq!(compute_colour(20, 1, total), compute_colour(20, 1, total));
        }
    }

    #[test]
    fn out_of_range_totals_stay_on_the_gradient() {
        assert_eq!(compute_colour(20, 2, 0), LOW.to_rgb());
        assert_eq!(compute_colour(20, 2, 500), HIGH.to_rgb());
    }

    #[test]
    fn hue_grows_with_the_total() {
        assert!(outcome_ratio(20, 1, 5) < outcome_ratio(20, 1, 15));
        assert!((outcome_ratio(20, 1, 1)).abs() < f64::EPSILON);
        assert!((outcome_ratio(20, 1, 20) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn primary_hues_convert() {
        let red = Hsl {
            h: 0.0,
            s: 100.0,
            l: 50.0,
        };
        let blue = Hsl {
            h: 240.0,
            s: 100.0,
            l: 50.0,
        };
        let magenta = Hsl {
            h: 300.0,
            s: 100.0,
            l: 50.0,
        };
        assert_eq!(red.to_rgb(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(blue.to_rgb(), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(
            magenta.to_rgb(),
            Rgb {
                r: 255,
                g: 0,
                b: 255
            }
        );
    }

    #[test]
    fn packs_as_rrggbb() {
        let rgb = Rgb {
            r: 0x12,
            g: 0x34,
            b: 0x56,
        };
        assert_eq!(rgb.packed(), 0x0012_3456);
        assert_eq!(Colour::from(rgb).0, 0x0012_3456);
    }
}
