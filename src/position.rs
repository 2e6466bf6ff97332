//! Logical positions inside a [`Deque`](crate::Deque).
//!
//! A [`Position`] is a `(segment, offset)` pair naming one slot of the segment directory.
//! The deque stores its own front and back cursors as positions, hands them out through
//! [`begin`](crate::Deque::begin) and [`end`](crate::Deque::end), and embeds them in its
//! borrowing iterators, so all of these agree on one normalization:
//! `offset` is always in `0..BLOCK_SIZE`, and stepping past the last slot of a block lands on
//! `(segment + 1, 0)`.
//!
//! Positions are detached from the deque. They carry the deque's generation at the time they
//! were created; any operation that shifts segment ordinals or moves or destroys elements bumps
//! the generation, and resolving a position from an older generation is a debug assertion failure.

use crate::block::BLOCK_SIZE;
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A random-access cursor into a [`Deque`](crate::Deque).
///
/// # Examples
/// ```
/// # use blockdeque::{Deque, BLOCK_SIZE};
/// let deque: Deque<usize> = (0..100).collect();
/// let pos = deque.begin() + BLOCK_SIZE + 1;
/// assert_eq!(pos.segment(), 1);
/// assert_eq!(pos.offset(), 1);
/// assert_eq!(deque.position_get(pos), Some(&(BLOCK_SIZE + 1)));
/// assert_eq!(deque.end() - deque.begin(), 100);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Position {
    pub(crate) segment: usize,
    pub(crate) offset: usize,
    pub(crate) generation: u64,
}

impl Position {
    #[inline]
    pub(crate) const fn new(segment: usize, offset: usize, generation: u64) -> Self {
        Position {
            segment,
            offset,
            generation,
        }
    }

    #[inline]
    pub(crate) const fn from_linear(linear: usize, generation: u64) -> Self {
        Position {
            segment: linear / BLOCK_SIZE,
            offset: linear % BLOCK_SIZE,
            generation,
        }
    }

    /// Index of the directory entry this position points into.
    #[inline]
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Slot within the block, always less than [`BLOCK_SIZE`].
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Flat slot number across the whole directory.
    #[inline]
    pub(crate) fn linear(&self) -> usize {
        self.segment * BLOCK_SIZE + self.offset
    }

    /// The position one slot further back, rolling over into the next segment.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        if self.offset + 1 == BLOCK_SIZE {
            Position::new(self.segment + 1, 0, self.generation)
        } else {
            Position::new(self.segment, self.offset + 1, self.generation)
        }
    }

    /// The position one slot further front, rolling over into the previous segment.
    ///
    /// # Panics
    /// Panics if this is the first slot of segment 0.
    #[inline]
    #[must_use]
    pub fn prev(self) -> Self {
        if self.offset == 0 {
            assert!(self.segment > 0, "attempt to move a position before segment 0");
            Position::new(self.segment - 1, BLOCK_SIZE - 1, self.generation)
        } else {
            Position::new(self.segment, self.offset - 1, self.generation)
        }
    }
}

impl PartialEq for Position {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.segment == other.segment && self.offset == other.offset
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment
            .cmp(&other.segment)
            .then(self.offset.cmp(&other.offset))
    }
}

impl Add<usize> for Position {
    type Output = Position;

    /// # Panics
    /// Panics if the resulting slot number overflows `usize`.
    #[inline]
    fn add(self, rhs: usize) -> Position {
        match self.linear().checked_add(rhs) {
            Some(linear) => Position::from_linear(linear, self.generation),
            None => panic!("attempt to move a position past the end of the address space"),
        }
    }
}

impl AddAssign<usize> for Position {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        *self = *self + rhs;
    }
}

impl Sub<usize> for Position {
    type Output = Position;

    /// # Panics
    /// Panics if the result would lie before the first slot of segment 0.
    #[inline]
    fn sub(self, rhs: usize) -> Position {
        match self.linear().checked_sub(rhs) {
            Some(linear) => Position::from_linear(linear, self.generation),
            None => panic!("attempt to move a position before segment 0"),
        }
    }
}

impl SubAssign<usize> for Position {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        *self = *self - rhs;
    }
}

impl Sub for Position {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Position) -> isize {
        self.linear() as isize - rhs.linear() as isize
    }
}

/// A position walking the deque from back to front.
///
/// Follows the usual reverse-iterator convention: it wraps a forward [`Position`] (its
/// [`base`](RevPosition::base)) and refers to the element one slot before that base.
/// [`rbegin`](crate::Deque::rbegin) wraps `end()` and so names the last element;
/// [`rend`](crate::Deque::rend) wraps `begin()`.
///
/// # Examples
/// ```
/// # use blockdeque::Deque;
/// let deque: Deque<i32> = Deque::from([1, 2, 3]);
/// let mut rpos = deque.rbegin();
/// assert_eq!(deque.rev_position_get(rpos), Some(&3));
/// rpos += 2;
/// assert_eq!(deque.rev_position_get(rpos), Some(&1));
/// assert_eq!(rpos + 1, deque.rend());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevPosition {
    base: Position,
}

impl RevPosition {
    /// Wraps a forward position.
    #[inline]
    pub fn new(base: Position) -> Self {
        RevPosition { base }
    }

    /// The wrapped forward position, one slot past the element this position refers to.
    #[inline]
    pub fn base(self) -> Position {
        self.base
    }

    /// The forward position of the referenced element, if there is one.
    #[inline]
    pub(crate) fn target(self) -> Option<Position> {
        if self.base.linear() == 0 {
            None
        } else {
            Some(self.base.prev())
        }
    }
}

impl PartialOrd for RevPosition {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RevPosition {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.base.cmp(&self.base)
    }
}

impl Add<usize> for RevPosition {
    type Output = RevPosition;

    #[inline]
    fn add(self, rhs: usize) -> RevPosition {
        RevPosition::new(self.base - rhs)
    }
}

impl AddAssign<usize> for RevPosition {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        self.base -= rhs;
    }
}

impl Sub<usize> for RevPosition {
    type Output = RevPosition;

    #[inline]
    fn sub(self, rhs: usize) -> RevPosition {
        RevPosition::new(self.base + rhs)
    }
}

impl SubAssign<usize> for RevPosition {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        self.base += rhs;
    }
}

impl Sub for RevPosition {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: RevPosition) -> isize {
        rhs.base - self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_rolls_over_block_boundary() {
        let pos = Position::new(0, BLOCK_SIZE - 1, 0).next();
        assert_eq!((pos.segment(), pos.offset()), (1, 0));
        let back = pos.prev();
        assert_eq!((back.segment(), back.offset()), (0, BLOCK_SIZE - 1));
    }

    #[test]
    fn arithmetic_matches_stepping() {
        let start = Position::new(2, 17, 0);
        let mut stepped = start;
        for _ in 0..150 {
            stepped = stepped.next();
        }
        assert_eq!(start + 150, stepped);
        assert_eq!(stepped - 150, start);
        assert_eq!(stepped - start, 150);
        assert_eq!(start - stepped, -150);

        let mut compound = start;
        compound += 150;
        assert_eq!(compound, stepped);
        compound -= 150;
        assert_eq!(compound, start);
    }

    #[test]
    fn ordering_is_segment_then_offset() {
        let a = Position::new(0, BLOCK_SIZE - 1, 0);
        let b = Position::new(1, 0, 0);
        let c = Position::new(1, 5, 0);
        assert!(a < b && b < c);
        assert!(c > a);
        assert!(b <= b && b >= b);
    }

    #[test]
    fn equality_ignores_generation() {
        assert_eq!(Position::new(3, 4, 1), Position::new(3, 4, 9));
    }

    #[test]
    #[should_panic(expected = "before segment 0")]
    fn prev_of_origin_panics() {
        let _ = Position::new(0, 0, 0).prev();
    }

    #[test]
    #[should_panic(expected = "before segment 0")]
    fn subtracting_past_origin_panics() {
        let _ = Position::new(0, 3, 0) - 4;
    }

    #[test]
    #[should_panic(expected = "past the end of the address space")]
    fn adding_past_address_space_panics() {
        let _ = Position::new(1, 0, 0) + usize::MAX;
    }

    #[test]
    fn reverse_positions_refer_one_before_base() {
        let base = Position::new(1, 0, 0);
        let rpos = RevPosition::new(base);
        let target = rpos.target().unwrap();
        assert_eq!((target.segment(), target.offset()), (0, BLOCK_SIZE - 1));
        assert_eq!(RevPosition::new(Position::new(0, 0, 0)).target(), None);

        let further = rpos + 10;
        assert!(further > rpos);
        assert_eq!(further - rpos, 10);
        assert_eq!((further - 10).base(), base);
    }
}
