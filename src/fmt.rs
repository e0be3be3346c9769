use std::fmt::{Debug, Display, Formatter};

use crate::quantity::rate::KilowattHourRate;

/// Euro amount in the Spanish locale: decimal comma, two decimals, trailing sign.
///
/// Groups of thousands are only separated from five integer digits on, like `es_ES` does.
pub struct FormattedEuro(pub f64);

impl From<KilowattHourRate> for FormattedEuro {
    fn from(rate: KilowattHourRate) -> Self {
        Self(rate.0)
    }
}

impl Debug for FormattedEuro {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedEuro {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Adding zero turns `-0.0` into `0.0`:
        let rounded = (self.0 * 100.0).round() / 100.0 + 0.0;
        let formatted = format!("{:.2}", rounded.abs());
        let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
        if rounded < 0.0 {
            f.write_str("-")?;
        }
        if integer.len() >= 5 {
            let head = integer.len() % 3;
            for (index, digit) in integer.char_indices() {
                if index != 0 && (index + 3 - head) % 3 == 0 {
                    f.write_str(".")?;
                }
                write!(f, "{digit}")?;
            }
        } else {
            f.write_str(integer)?;
        }
        write!(f, ",{fraction}\u{a0}€")
    }
}

/// Signed difference, always with an explicit sign.
pub struct FormattedDelta(pub KilowattHourRate);

impl Display for FormattedDelta {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 > KilowattHourRate::ZERO {
            f.write_str("+")?;
        }
        Display::fmt(&FormattedEuro::from(self.0), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amount() {
        assert_eq!(FormattedEuro(0.1234).to_string(), "0,12\u{a0}€");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(FormattedEuro(-0.049).to_string(), "-0,05\u{a0}€");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(FormattedEuro(-0.001).to_string(), "0,00\u{a0}€");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(FormattedEuro(1234.5).to_string(), "1234,50\u{a0}€");
        assert_eq!(FormattedEuro(12345.0).to_string(), "12.345,00\u{a0}€");
        assert_eq!(FormattedEuro(1_234_567.891).to_string(), "1.234.567,89\u{a0}€");
    }

    #[test]
    fn test_delta() {
        assert_eq!(FormattedDelta(KilowattHourRate(0.03)).to_string(), "+0,03\u{a0}€");
        assert_eq!(FormattedDelta(KilowattHourRate(-0.03)).to_string(), "-0,03\u{a0}€");
    }
}
