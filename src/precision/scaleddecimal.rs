use num_bigint::BigUint;
use num_traits::Zero;

/// Non-negative fixed-point decimal: a `BigUint` read as `value / 10^scale`.
///
/// Division truncates, so each division loses at most one unit in the last
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledDecimal {
    value: BigUint,
    scale: usize,
}

impl ScaledDecimal {
    /// Zero with `scale` digits after the point.
    pub fn zero(scale: usize) -> ScaledDecimal {
        ScaledDecimal { value: BigUint::zero(), scale }
    }

    pub fn from_integer(integer: u32, scale: usize) -> ScaledDecimal {
        let unit = BigUint::from(10u32).pow(scale as u32);
        ScaledDecimal { value: unit * integer, scale }
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// `self += other`; both sides must share a scale.
    pub fn add_assign(&mut self, other: &ScaledDecimal) {
        debug_assert_eq!(self.scale, other.scale);
        self.value += &other.value;
    }

    /// `self /= divisor`, truncating. Division by zero leaves the value
    /// unchanged.
    pub fn div_assign(&mut self, divisor: u32) {
        if divisor != 0 {
            self.value /= divisor;
        }
    }

    /// Renders `significant` significant digits, truncated, e.g.
    /// `"2.718281828"` for 10.
    pub fn to_significant_string(&self, significant: usize) -> String {
        let digits = format!("{:0>width$}", self.value.to_str_radix(10), width = self.scale + 1);
        let (integer, fraction) = digits.split_at(digits.len() - self.scale);

        let fraction_wanted = significant.saturating_sub(integer.len()).min(fraction.len());
        if fraction_wanted == 0 {
            return integer.to_owned();
        }
        format!("{}.{}", integer, &fraction[..fraction_wanted])
    }
}
