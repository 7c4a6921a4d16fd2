use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::modifier::Modifier;

pub const MAX_CARDS_IN_HAND: usize = 5;
pub const CARD_DRAW_COUNTER_INITIAL_VALUE: u8 = 4;
pub const CARDS_OFFERED_PER_DRAW: usize = 2;

const NIBBLES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidHand(pub u32);
impl Display for InvalidHand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid stack of card codes", self.0)?;
        Ok(())
    }
}
impl Error for InvalidHand {}

/// Stack of 4-bit card codes terminated by a zero nibble. Adding a card shifts
/// the stack up by one nibble, and reading starts from the lowest nibble, so
/// cards read back in the reverse of the order they were added. Peers and
/// saved snapshots exchange this integer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct Hand(u32);

impl Hand {
    pub const EMPTY: Self = Hand(0);

    /// One of every card.
    pub fn full() -> Self {
        Modifier::ALL.into_iter().collect()
    }
    pub fn random(rng: &mut impl Rng, count: usize) -> Self {
        (0..count)
            .map(|_| Modifier::ALL[rng.random_range(0..Modifier::ALL.len())])
            .collect()
    }
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            let code = (bits & 0b_1111) as u8;
            bits >>= 4;
            Modifier::from_card_code(code).ok()
        })
    }
    pub fn len(self) -> usize {
        self.iter().count()
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn contains(self, card: Modifier) -> bool {
        self.iter().any(|held| held == card)
    }
    /// Adds a card below the others; `false` when the stack has no room left.
    pub fn push(&mut self, card: Modifier) -> bool {
        if self.len() >= NIBBLES {
            return false;
        }
        self.0 = (self.0 << 4) | u32::from(card.card_code());
        true
    }
    /// Removes the first card equal to `card` in reading order and rebuilds the
    /// stack from the rest, which reverses their order.
    pub fn remove(&mut self, card: Modifier) -> bool {
        let mut found = false;
        let rest: Hand = self
            .iter()
            .filter(|held| {
                if !found && *held == card {
                    found = true;
                    false
                } else {
                    true
                }
            })
            .collect();
        *self = rest;
        found
    }
}
impl FromIterator<Modifier> for Hand {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        let mut hand = Hand::EMPTY;
        for card in iter {
            hand.push(card);
        }
        hand
    }
}
impl Display for Hand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "-")?;
        }
        for card in self.iter() {
            write!(f, "{}", card.glyph())?;
        }
        Ok(())
    }
}
impl From<Hand> for u32 {
    fn from(value: Hand) -> Self {
        value.0
    }
}
impl TryFrom<u32> for Hand {
    type Error = InvalidHand;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let hand = Hand(value);
        // every nibble below the terminator must be a card, and nothing may follow it
        let len = hand.len();
        if len < NIBBLES && value >> (len * 4) != 0 {
            return Err(InvalidHand(value));
        }
        Ok(hand)
    }
}
#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::{hand::Hand, modifier::Modifier};

    #[test]
    fn last_added_card_lives_in_lowest_nibble() {
        let hand: Hand = [Modifier::Portal, Modifier::Clear].into_iter().collect();
        assert_eq!(u32::from(hand), 0x31);
        assert_eq!(
            hand.iter().collect::<Vec<_>>(),
            [Modifier::Clear, Modifier::Portal]
        );
    }
    #[test]
    fn full_hand_matches_the_exchanged_integer() {
        assert_eq!(u32::from(Hand::full()), 0x13245);
        assert_eq!(
            Hand::full().iter().collect::<Vec<_>>(),
            [
                Modifier::ShovePawn,
                Modifier::ReversePawn,
                Modifier::Trench,
                Modifier::Portal,
                Modifier::Clear,
            ]
        );
    }
    #[test]
    fn remove_takes_first_match_and_rebuilds() {
        let mut hand: Hand = [
            Modifier::Trench,
            Modifier::Portal,
            Modifier::Trench,
            Modifier::ShovePawn,
        ]
        .into_iter()
        .collect();
        assert_eq!(u32::from(hand), 0x2325);
        assert!(hand.remove(Modifier::Trench));
        assert_eq!(u32::from(hand), 0x532);
        assert_eq!(
            hand.iter().collect::<Vec<_>>(),
            [Modifier::Trench, Modifier::Portal, Modifier::ShovePawn]
        );
        assert!(!hand.remove(Modifier::Clear));
        assert_eq!(hand.len(), 3);
    }
    #[test]
    fn full_hand_holds_every_card_once() {
        let hand = Hand::full();
        assert_eq!(hand.len(), Modifier::ALL.len());
        for card in Modifier::ALL {
            assert!(hand.contains(card));
        }
    }
    #[test]
    fn raw_values_with_gaps_are_rejected() {
        assert!(Hand::try_from(0x1203).is_err());
        assert!(Hand::try_from(0x9).is_err());
        assert_eq!(Hand::try_from(0x321).map(Hand::len), Ok(3));
    }
    #[test]
    fn random_hand_has_requested_size() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(Hand::random(&mut rng, 2).len(), 2);
    }
}
