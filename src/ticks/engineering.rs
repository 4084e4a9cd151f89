//! Engineering-notation scale factors and unit prefixes

/// SI prefixes for every power of 1000 the engine will pick
const PREFIXES: [(i32, &str); 17] = [
    (-24, "y"),
    (-21, "z"),
    (-18, "a"),
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
    (21, "Z"),
    (24, "Y"),
];

const MIN_EXPONENT: i32 = -24;
const MAX_EXPONENT: i32 = 24;

/// A power-of-1000 divisor paired with its unit prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngScale {
    pub exponent: i32,
    pub factor: f64,
    pub prefix: &'static str,
}

impl EngScale {
    pub const UNIT: EngScale = EngScale {
        exponent: 0,
        factor: 1.0,
        prefix: "",
    };

    /// Scale that puts `value` in `[1, 1000)`; zero and non-finite values get [`EngScale::UNIT`]
    pub fn for_value(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            return Self::UNIT;
        }
        // Nudge exact powers of ten that log10 lands just below
        let decade = (value.abs().log10() + 1e-9).floor() as i32;
        let exponent = (decade.div_euclid(3) * 3).clamp(MIN_EXPONENT, MAX_EXPONENT);
        Self::from_exponent(exponent).unwrap_or(Self::UNIT)
    }

    /// Scale for an exact multiple-of-three exponent inside the prefix table
    pub fn from_exponent(exponent: i32) -> Option<Self> {
        PREFIXES
            .iter()
            .find(|(e, _)| *e == exponent)
            .map(|&(exponent, prefix)| Self {
                exponent,
                factor: 10f64.powi(exponent),
                prefix,
            })
    }

    /// One engineering step coarser (e.g. `m` -> unit, `k` -> `M`)
    pub fn coarser(&self) -> Option<Self> {
        Self::from_exponent(self.exponent + 3)
    }
}
