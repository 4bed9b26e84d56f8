#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// `part` expressed as a percentage of `whole`. `None` when `whole` isn't positive.
    pub fn of(part: f64, whole: f64) -> Option<Percentage> {
        if whole <= 0. {
            None
        } else {
            Percentage::new_opt(part / whole * 100.)
        }
    }

    pub fn capped(self, max: f64) -> Percentage {
        Percentage(self.0.min(max))
    }

    /// Rounds half up. Percentages are never negative so `f64::round` does exactly that.
    pub fn rounded(self) -> u32 {
        self.0.round() as u32
    }
}
