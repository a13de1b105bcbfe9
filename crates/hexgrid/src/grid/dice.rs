//! Dice descriptors (`2d6`, `1d20+3`, `d8-1`) attached to item types.
use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};

use crate::error::Error;

const MAX_COUNT: u32 = 100;
const MIN_SIDES: u32 = 2;
const MAX_SIDES: u32 = 1000;

/// A parsed `NdM±K` dice expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpr {
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll every die once and add the modifier.
    pub fn roll<R: RngCore + ?Sized>(&self, rng: &mut R) -> DiceOutcome {
        let rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        let sum: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        DiceOutcome {
            rolls,
            total: sum + i64::from(self.modifier),
        }
    }

    /// Smallest possible total.
    pub fn min_total(&self) -> i64 {
        i64::from(self.count) + i64::from(self.modifier)
    }

    /// Largest possible total.
    pub fn max_total(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)
    }
}

impl FromStr for DiceExpr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| Error::config(format!("invalid dice '{s}': {why}"));

        let text = s.trim().to_ascii_lowercase();
        let (count, rest) = text
            .split_once('d')
            .ok_or_else(|| invalid("expected NdM"))?;

        let count = if count.is_empty() {
            1
        } else {
            count
                .parse::<u32>()
                .map_err(|_| invalid("dice count is not a number"))?
        };

        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(at) => {
                let (sides, modifier) = rest.split_at(at);
                let (sign, digits) = modifier.split_at(1);
                if !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("modifier is not a number"));
                }
                let magnitude = digits
                    .parse::<u32>()
                    .map_err(|_| invalid("modifier is not a number"))?;
                let modifier = i32::try_from(magnitude)
                    .ok()
                    .and_then(|m| if sign == "-" { m.checked_neg() } else { Some(m) })
                    .ok_or_else(|| invalid("modifier is out of range"))?;
                (sides, modifier)
            }
            None => (rest, 0),
        };
        let sides = sides
            .parse::<u32>()
            .map_err(|_| invalid("side count is not a number"))?;

        if !(1..=MAX_COUNT).contains(&count) {
            return Err(invalid(&format!("dice count must be 1..={MAX_COUNT}")));
        }
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(invalid(&format!(
                "side count must be {MIN_SIDES}..={MAX_SIDES}"
            )));
        }

        Ok(DiceExpr::new(count, sides, modifier))
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Result of rolling a [`DiceExpr`] for one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceOutcome {
    pub rolls: Vec<u32>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!("2d6".parse::<DiceExpr>().unwrap(), DiceExpr::new(2, 6, 0));
        assert_eq!("d20".parse::<DiceExpr>().unwrap(), DiceExpr::new(1, 20, 0));
        assert_eq!(
            " 3D8+2 ".parse::<DiceExpr>().unwrap(),
            DiceExpr::new(3, 8, 2)
        );
        assert_eq!("1d4-1".parse::<DiceExpr>().unwrap(), DiceExpr::new(1, 4, -1));
    }

    #[test]
    fn rejects_malformed_expressions() {
        for bad in [
            "", "6", "xd6", "2dx", "2d6+", "2d6+x", "0d6", "2d1", "101d6", "2d1001", "2d6+-3",
            "2d6++3", "2d6--3", "2d6-+3",
        ] {
            assert!(bad.parse::<DiceExpr>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn oversized_modifiers_are_configuration_errors() {
        for bad in ["2d6--2147483648", "2d6+2147483648", "2d6-2147483648", "2d6+99999999999"] {
            let err = bad.parse::<DiceExpr>().unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "{bad:?}: {err}");
        }
        assert_eq!(
            "1d4+2147483647".parse::<DiceExpr>().unwrap(),
            DiceExpr::new(1, 4, i32::MAX)
        );
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(DiceExpr::new(1, 20, 0).to_string(), "1d20");
        assert_eq!(DiceExpr::new(2, 6, 3).to_string(), "2d6+3");
        assert_eq!(DiceExpr::new(2, 6, -3).to_string(), "2d6-3");
        assert_eq!("d8".parse::<DiceExpr>().unwrap().to_string(), "1d8");
    }

    #[test]
    fn rolls_stay_within_range() {
        let dice = DiceExpr::new(3, 6, -2);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let outcome = dice.roll(&mut rng);
            assert_eq!(outcome.rolls.len(), 3);
            assert!(outcome.rolls.iter().all(|r| (1..=6).contains(r)));
            assert!((dice.min_total()..=dice.max_total()).contains(&outcome.total));
            let sum: i64 = outcome.rolls.iter().map(|&r| i64::from(r)).sum();
            assert_eq!(outcome.total, sum - 2);
        }
    }

    #[test]
    fn same_seed_same_rolls() {
        let dice = DiceExpr::new(4, 10, 0);
        let a = dice.roll(&mut StdRng::seed_from_u64(99));
        let b = dice.roll(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
