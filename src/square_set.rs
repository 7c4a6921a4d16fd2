use std::{
    fmt::{self, Display, Formatter},
    ops::{BitAnd, BitOr, BitOrAssign, Not},
};

use crate::coord::Coord;

/// Set of board squares, one bit per square index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: Self = SquareSet(0);

    pub fn contains(self, position: Coord) -> bool {
        self.0 & (1_u64 << position.index()) != 0
    }
    pub fn insert(&mut self, position: Coord) {
        self.0 |= 1_u64 << position.index();
    }
    pub fn remove(&mut self, position: Coord) {
        self.0 &= !(1_u64 << position.index());
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn iter(self) -> impl Iterator<Item = Coord> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Coord::from_index(index)
        })
    }
}
impl FromIterator<Coord> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut set = SquareSet::EMPTY;
        for position in iter {
            set.insert(position);
        }
        set
    }
}
impl BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}
impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
impl BitAnd for SquareSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & rhs.0)
    }
}
impl Not for SquareSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        SquareSet(!self.0)
    }
}
impl Display for SquareSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for position in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{position}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{coord, square_set::SquareSet};

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [coord!("h8"), coord!("a1"), coord!("e4")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [coord!("a1"), coord!("e4"), coord!("h8")]
        );
        assert_eq!(set.to_string(), "a1 e4 h8");
    }
    #[test]
    fn remove_and_complement() {
        let mut set: SquareSet = [coord!("b2"), coord!("c3")].into_iter().collect();
        set.remove(coord!("b2"));
        assert!(!set.contains(coord!("b2")));
        assert!(set.contains(coord!("c3")));
        assert!((set & !set).is_empty());
    }
}
