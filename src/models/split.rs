//! Split ratio model
//!
//! Describes how the cost of one expense divides between the two parties.
//! Every ratio maps to a valid pair of fractions; malformed ratios (zero or
//! negative weights, unreadable stored values) degrade to an equal split.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

const HALF: Decimal = dec!(0.5);
const HUNDRED: Decimal = dec!(100);

/// How one expense's cost is divided between party 1 and party 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitRatio {
    /// Each party owes half
    #[default]
    Equal,
    /// Weighted split; weights need not sum to 1 or 100
    Custom {
        party1_share: Decimal,
        party2_share: Decimal,
    },
}

impl SplitRatio {
    /// Build a custom ratio from two weights
    pub fn custom(party1_share: Decimal, party2_share: Decimal) -> Self {
        Self::Custom {
            party1_share,
            party2_share,
        }
    }

    /// Build a custom ratio from party 1's percentage (party 2 gets the rest)
    ///
    /// Returns `None` outside `0..=100`.
    pub fn from_percent(party1_percent: Decimal) -> Option<Self> {
        if party1_percent < Decimal::ZERO || party1_percent > HUNDRED {
            return None;
        }
        Some(Self::custom(party1_percent, HUNDRED - party1_percent))
    }

    /// Fractions of the cost owed by party 1 and party 2
    ///
    /// Both lie in `[0, 1]` and sum to exactly 1.
    pub fn fractions(&self) -> (Decimal, Decimal) {
        let fraction1 = self.party1_fraction();
        (fraction1, Decimal::ONE - fraction1)
    }

    /// Fraction of the cost owed by party 1
    ///
    /// Falls back to 0.5 when either weight is negative or the weights sum to
    /// zero or less, so the result always lies in `[0, 1]`.
    pub fn party1_fraction(&self) -> Decimal {
        match *self {
            Self::Equal => HALF,
            Self::Custom {
                party1_share,
                party2_share,
            } => {
                if party1_share < Decimal::ZERO || party2_share < Decimal::ZERO {
                    return HALF;
                }
                let total = party1_share + party2_share;
                if total <= Decimal::ZERO {
                    return HALF;
                }
                party1_share.checked_div(total).unwrap_or(HALF)
            }
        }
    }

    /// Whether this ratio would silently fall back to an equal split
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Equal => false,
            Self::Custom {
                party1_share,
                party2_share,
            } => {
                party1_share < Decimal::ZERO
                    || party2_share < Decimal::ZERO
                    || party1_share + party2_share <= Decimal::ZERO
            }
        }
    }

    /// Encode for storage
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("\"equal\""))
    }

    /// Decode a stored ratio, falling back to `Equal` on anything unreadable
    pub fn decode(encoded: &str) -> Self {
        match serde_json::from_str(encoded) {
            Ok(ratio) => ratio,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable split ratio, using equal split");
                Self::Equal
            }
        }
    }

    fn from_json_value(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(ratio) => ratio,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable split ratio, using equal split");
                Self::Equal
            }
        }
    }

    /// Parse user input: "equal", "70" (party 1 percent) or "70/30" (weights)
    pub fn parse(s: &str) -> Result<Self, SplitRatioParseError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("equal") || s == "50/50" {
            return Ok(Self::Equal);
        }

        let invalid = || SplitRatioParseError::InvalidFormat(s.to_string());
        let parse_weight = |w: &str| Decimal::from_str(w.trim().trim_end_matches('%'));

        if let Some((left, right)) = s.split_once(['/', ':']) {
            let party1_share = parse_weight(left).map_err(|_| invalid())?;
            let party2_share = parse_weight(right).map_err(|_| invalid())?;
            return Ok(Self::custom(party1_share, party2_share));
        }

        let percent = parse_weight(s).map_err(|_| invalid())?;
        Self::from_percent(percent).ok_or(SplitRatioParseError::OutOfRange(percent))
    }
}

impl fmt::Display for SplitRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "50/50"),
            Self::Custom {
                party1_share,
                party2_share,
            } => write!(f, "{}/{}", party1_share.normalize(), party2_share.normalize()),
        }
    }
}

/// Lenient serde field deserializer: a malformed stored ratio becomes `Equal`
pub fn deserialize_or_equal<'de, D>(deserializer: D) -> Result<SplitRatio, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(SplitRatio::from_json_value(value))
}

/// Error type for split ratio parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitRatioParseError {
    InvalidFormat(String),
    OutOfRange(Decimal),
}

impl fmt::Display for SplitRatioParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(
                f,
                "Invalid split: '{}'. Use 'equal', a percentage like '70', or weights like '70/30'",
                s
            ),
            Self::OutOfRange(p) => {
                write!(f, "Split percentage must be between 0 and 100, got {}", p)
            }
        }
    }
}

impl std::error::Error for SplitRatioParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums_to_one(ratio: SplitRatio) {
        let (f1, f2) = ratio.fractions();
        assert_eq!(f1 + f2, Decimal::ONE, "fractions of {:?}", ratio);
        assert!(f1 >= Decimal::ZERO && f1 <= Decimal::ONE);
        assert!(f2 >= Decimal::ZERO && f2 <= Decimal::ONE);
    }

    #[test]
    fn test_equal_is_exactly_half() {
        assert_eq!(SplitRatio::Equal.fractions(), (dec!(0.5), dec!(0.5)));
    }

    #[test]
    fn test_custom_fractions() {
        let ratio = SplitRatio::custom(dec!(70), dec!(30));
        assert_eq!(ratio.fractions(), (dec!(0.7), dec!(0.3)));

        let ratio = SplitRatio::custom(dec!(3), dec!(1));
        assert_eq!(ratio.fractions(), (dec!(0.75), dec!(0.25)));
    }

    #[test]
    fn test_fractions_sum_to_one() {
        for ratio in [
            SplitRatio::Equal,
            SplitRatio::custom(dec!(1), dec!(2)),
            SplitRatio::custom(dec!(2), dec!(3)),
            SplitRatio::custom(dec!(1), dec!(6)),
            SplitRatio::custom(dec!(0), dec!(5)),
            SplitRatio::custom(dec!(5), dec!(0)),
            SplitRatio::custom(dec!(0.0001), dec!(99999)),
            SplitRatio::custom(dec!(0), dec!(0)),
            SplitRatio::custom(dec!(-3), dec!(1)),
        ] {
            assert_sums_to_one(ratio);
        }
    }

    #[test]
    fn test_degenerate_ratio_falls_back_to_half() {
        for ratio in [
            SplitRatio::custom(dec!(0), dec!(0)),
            SplitRatio::custom(dec!(-10), dec!(-5)),
            SplitRatio::custom(dec!(-10), dec!(30)),
        ] {
            assert!(ratio.is_degenerate());
            assert_eq!(ratio.fractions(), SplitRatio::Equal.fractions());
        }
        assert_eq!(SplitRatio::custom(dec!(-10), dec!(30)).party1_fraction(), dec!(0.5));
        assert_eq!(SplitRatio::custom(dec!(30), dec!(-10)).party1_fraction(), dec!(0.5));
        assert!(!SplitRatio::custom(dec!(0), dec!(1)).is_degenerate());
    }

    #[test]
    fn test_from_percent() {
        assert_eq!(
            SplitRatio::from_percent(dec!(70)),
            Some(SplitRatio::custom(dec!(70), dec!(30)))
        );
        assert_eq!(SplitRatio::from_percent(dec!(101)), None);
        assert_eq!(SplitRatio::from_percent(dec!(-1)), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(SplitRatio::parse("equal").unwrap(), SplitRatio::Equal);
        assert_eq!(SplitRatio::parse("Equal").unwrap(), SplitRatio::Equal);
        assert_eq!(
            SplitRatio::parse("60").unwrap(),
            SplitRatio::custom(dec!(60), dec!(40))
        );
        assert_eq!(
            SplitRatio::parse("2/1").unwrap(),
            SplitRatio::custom(dec!(2), dec!(1))
        );
        assert_eq!(
            SplitRatio::parse("70%:30%").unwrap(),
            SplitRatio::custom(dec!(70), dec!(30))
        );
        assert!(matches!(
            SplitRatio::parse("150"),
            Err(SplitRatioParseError::OutOfRange(_))
        ));
        assert!(SplitRatio::parse("half").is_err());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for ratio in [SplitRatio::Equal, SplitRatio::custom(dec!(70), dec!(30.5))] {
            assert_eq!(SplitRatio::decode(&ratio.encode()), ratio);
        }
        assert_eq!(SplitRatio::Equal.encode(), "\"equal\"");
    }

    #[test]
    fn test_decode_failure_degrades_to_equal() {
        assert_eq!(SplitRatio::decode("not json"), SplitRatio::Equal);
        assert_eq!(SplitRatio::decode("{\"thirds\":{}}"), SplitRatio::Equal);
        assert_eq!(
            SplitRatio::decode("{\"custom\":{\"party1_share\":\"x\"}}"),
            SplitRatio::Equal
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SplitRatio::Equal.to_string(), "50/50");
        assert_eq!(
            SplitRatio::custom(dec!(70.0), dec!(30)).to_string(),
            "70/30"
        );
    }
}
