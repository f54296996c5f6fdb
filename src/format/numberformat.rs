use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{
    Decimal,
    RoundingStrategy
};
use serde::{
    Deserialize,
    Serialize
};

use crate::configuration::FormatSettings;
use crate::math::round::round;
use crate::math::scalar::Scalar;
use crate::series::errorbound::ApproximationError;

/// How numbers past the scientific-notation thresholds are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LargeNumberFormat {
    /// `1.5 × 10^14`
    #[default]
    Default,
    /// `1.5e14`
    E,
    /// `150 × 10^12`
    Engineering,
    /// `150e12`
    EEngineering,
}

impl LargeNumberFormat {
    fn is_engineering(&self) -> bool {
        matches!(self, LargeNumberFormat::Engineering | LargeNumberFormat::EEngineering)
    }

    fn is_e(&self) -> bool {
        matches!(self, LargeNumberFormat::E | LargeNumberFormat::EEngineering)
    }
}

const UNDEFINED: &str = "undefined";
const MAX_DECIMAL_PLACES: u32 = 28;

fn uses_scientific_notation(x: f64, settings: &FormatSettings) -> bool {
    let abs = x.abs();
    abs >= settings.scientific_high || (abs > 0.0 && abs < settings.scientific_low)
}

/// abs / 10^exponent, staying clear of the underflow of 10^exponent
/// for subnormal `abs`.
fn scale_down(abs: f64, exponent: i32) -> f64 {
    if exponent < -300 {
        (abs * 1e300) / 10f64.powi(exponent + 300)
    } else {
        abs / 10f64.powi(exponent)
    }
}

fn scientific(abs: f64, settings: &FormatSettings) -> String {
    let style = settings.large_number_format;
    let decimals = settings.scientific_decimals as i32;
    let (step, stride) = if style.is_engineering() { (1000.0, 3) } else { (10.0, 1) };

    let mut exponent = abs.log10().floor() as i32;
    if style.is_engineering() {
        exponent -= exponent.rem_euclid(3);
    }
    let mut mantissa = round(scale_down(abs, exponent), decimals);
    if mantissa >= step {
        // rounding carried into the next power
        mantissa = round(mantissa / step, decimals);
        exponent += stride;
    }

    if style.is_e() {
        format!("{}e{}", mantissa, exponent)
    } else if exponent >= 0 {
        format!("{} × 10^{}", mantissa, exponent)
    } else {
        format!("{} × 10^({})", mantissa, exponent)
    }
}

/// Groups the integer digits of a plain decimal string in threes.
fn group_thousands(plain: &str) -> String {
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain, None),
    };
    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn fixed(abs: f64, places: u32) -> String {
    let places = places.min(MAX_DECIMAL_PLACES);
    let plain = match Decimal::from_f64(abs) {
        Some(decimal) => decimal
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => {
            let text = format!("{:.*}", places as usize, abs);
            if text.contains('.') {
                text.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                text
            }
        }
    };
    group_thousands(&plain)
}

/// Renders a real number for display.
///
/// Non-finite values read "undefined". Values past the configured
/// thresholds use scientific notation; everything else is rounded to
/// `places` decimals (fewer when `max_sig_figs` caps the significant
/// figures) with trailing zeros dropped and thousands separated by commas.
pub fn format_number(x: f64, places: u32, max_sig_figs: Option<u32>, settings: &FormatSettings) -> String {
    if !x.is_finite() {
        return UNDEFINED.to_string();
    }

    let mut places = places;
    if let Some(sig_figs) = max_sig_figs {
        let digits = if x == 0.0 { 1 } else { x.abs().log10().floor() as i64 + 1 };
        places = (sig_figs as i64 - digits).clamp(0, places as i64) as u32;
    }

    let abs = x.abs();
    let body = if uses_scientific_notation(x, settings) {
        scientific(abs, settings)
    } else {
        fixed(abs, places)
    };

    if x < 0.0 && body != "0" {
        format!("-{}", body)
    } else {
        body
    }
}

/// Renders a real or complex value, writing unit imaginary parts as a bare
/// `i`.
pub fn format_scalar(value: Scalar, places: u32, settings: &FormatSettings) -> String {
    let (re, im) = match value {
        Scalar::Real(x) => return format_number(round(x, places as i32), places, None, settings),
        Scalar::Complex(z) => (round(z.re, places as i32), round(z.im, places as i32)),
    };
    if !re.is_finite() || !im.is_finite() {
        return UNDEFINED.to_string();
    }

    let imaginary = |magnitude: f64| {
        let text = format_number(magnitude, places, None, settings);
        if uses_scientific_notation(magnitude, settings) {
            format!("({})", text)
        } else {
            text
        }
    };

    if re == 0.0 {
        return match im {
            x if x == 0.0 => "0".to_string(),
            x if x == 1.0 => "i".to_string(),
            x if x == -1.0 => "-i".to_string(),
            x => format!("{}i", imaginary(x)),
        };
    }

    let real = format_number(re, places, None, settings);
    if im == 0.0 {
        return real;
    }
    let magnitude = if im.abs() == 1.0 { String::new() } else { imaginary(im.abs()) };
    let sign = if im > 0.0 { '+' } else { '-' };
    format!("{} {} {}i", real, sign, magnitude)
}

pub fn format_error(error: &ApproximationError, places: u32, settings: &FormatSettings) -> String {
    match error {
        ApproximationError::BelowMachinePrecision => "under 10^(-15)".to_string(),
        ApproximationError::Value(value) => format_number(*value, places, None, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(style: LargeNumberFormat) -> FormatSettings {
        FormatSettings { large_number_format: style, ..FormatSettings::default() }
    }

    fn plain(x: f64, places: u32) -> String {
        format_number(x, places, None, &FormatSettings::default())
    }

    #[test]
    fn non_finite_is_undefined() {
        assert_eq!(plain(f64::NAN, 2), "undefined");
        assert_eq!(plain(f64::INFINITY, 2), "undefined");
        assert_eq!(plain(f64::NEG_INFINITY, 2), "undefined");
    }

    #[test]
    fn rounds_and_drops_trailing_zeros() {
        assert_eq!(plain(2.5, 0), "3");
        assert_eq!(plain(-2.5, 0), "-3");
        assert_eq!(plain(0.1 + 0.2, 4), "0.3");
        assert_eq!(plain(2.0, 6), "2");
        assert_eq!(plain(-0.0001, 2), "0");
    }

    #[test]
    fn separates_thousands() {
        assert_eq!(plain(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(plain(999.0, 0), "999");
        assert_eq!(plain(1000.0, 0), "1,000");
        assert_eq!(plain(-123_456.0, 0), "-123,456");
    }

    #[test]
    fn significant_figures_limit_places() {
        let defaults = FormatSettings::default();
        assert_eq!(format_number(123.456_789, 10, Some(5), &defaults), "123.46");
        assert_eq!(format_number(123_456.7, 3, Some(4), &defaults), "123,457");
    }

    #[test]
    fn scientific_styles() {
        let x = 1.5e14;
        assert_eq!(format_number(x, 2, None, &settings(LargeNumberFormat::Default)), "1.5 × 10^14");
        assert_eq!(format_number(x, 2, None, &settings(LargeNumberFormat::E)), "1.5e14");
        assert_eq!(format_number(x, 2, None, &settings(LargeNumberFormat::Engineering)), "150 × 10^12");
        assert_eq!(format_number(x, 2, None, &settings(LargeNumberFormat::EEngineering)), "150e12");
        assert_eq!(format_number(-x, 2, None, &settings(LargeNumberFormat::E)), "-1.5e14");
    }

    #[test]
    fn small_numbers_use_negative_exponents() {
        assert_eq!(plain(1.234e-11, 4), "1.234 × 10^(-11)");
        assert_eq!(format_number(1.234e-11, 4, None, &settings(LargeNumberFormat::EEngineering)), "12.34e-12");
    }

    #[test]
    fn subnormal_numbers() {
        assert_eq!(plain(5e-324, 4), "4.9407 × 10^(-324)");
        assert_eq!(format_number(-2.5e-320, 4, None, &settings(LargeNumberFormat::E)), "-2.5e-320");
        assert_eq!(plain(f64::MIN_POSITIVE, 4), "2.2251 × 10^(-308)");
    }

    #[test]
    fn mantissa_carry() {
        assert_eq!(plain(9.999_99e14, 2), "1 × 10^15");
    }

    #[test]
    fn complex_values() {
        let defaults = FormatSettings::default();
        assert_eq!(format_scalar(Scalar::complex(0.0, 1.0), 3, &defaults), "i");
        assert_eq!(format_scalar(Scalar::complex(0.0, -1.0), 3, &defaults), "-i");
        assert_eq!(format_scalar(Scalar::complex(0.0, 0.0), 3, &defaults), "0");
        assert_eq!(format_scalar(Scalar::complex(0.0, 2.5), 3, &defaults), "2.5i");
        assert_eq!(format_scalar(Scalar::complex(1.5, -2.0), 3, &defaults), "1.5 - 2i");
        assert_eq!(format_scalar(Scalar::complex(1.5, 1.0), 3, &defaults), "1.5 + i");
        assert_eq!(format_scalar(Scalar::complex(1.5, 1e-4), 3, &defaults), "1.5");
        assert_eq!(format_scalar(Scalar::complex(f64::NAN, 1.0), 3, &defaults), "undefined");
        assert_eq!(format_scalar(Scalar::Real(1234.5678), 2, &defaults), "1,234.57");
    }

    #[test]
    fn tiny_errors() {
        let defaults = FormatSettings::default();
        assert_eq!(format_error(&ApproximationError::BelowMachinePrecision, 4, &defaults), "under 10^(-15)");
        assert_eq!(format_error(&ApproximationError::Value(0.00125), 4, &defaults), "0.0013");
    }
}
