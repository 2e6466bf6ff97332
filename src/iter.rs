//! Iterators over the elements of a [`Deque`].
//!
//! [`Iter`] and [`IterMut`] are the shared and mutable views. Both walk a front/back pair of [`Position`]s with the
//! same arithmetic the deque uses for its own cursors, and only differ in the reference type they hand out.
//! Reverse iteration is [`Iterator::rev`] over either of them.

use crate::block::{slot_in, RawBlock};
use crate::{Deque, DropBehavior, Position};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A borrowing iterator over the elements of a [`Deque`].
/// This struct is created by the [`iter`](Deque::iter) method on [`Deque`].
pub struct Iter<'a, T> {
    blocks: &'a [Option<RawBlock<T>>],
    front: Position,
    back: Position,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(blocks: &'a [Option<RawBlock<T>>], front: Position, back: Position) -> Self {
        Iter {
            blocks,
            front,
            back,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Iter {
            blocks: self.blocks,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let slot = slot_in(self.blocks, self.front);
        self.front = self.front.next();
        unsafe { Some(&*slot) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back = self.back.prev();
        unsafe { Some(&*slot_in(self.blocks, self.back)) }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        (self.back - self.front) as usize
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable borrowing iterator over the elements of a [`Deque`].
/// This struct is created by the [`iter_mut`](Deque::iter_mut) method on [`Deque`].
pub struct IterMut<'a, T> {
    blocks: &'a [Option<RawBlock<T>>],
    front: Position,
    back: Position,
    marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    /// `blocks` must come from a deque that is mutably borrowed for `'a`.
    #[inline]
    pub(crate) fn new(blocks: &'a [Option<RawBlock<T>>], front: Position, back: Position) -> Self {
        IterMut {
            blocks,
            front,
            back,
            marker: PhantomData,
        }
    }
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        let slot = slot_in(self.blocks, self.front);
        self.front = self.front.next();
        // each slot is handed out at most once
        unsafe { Some(&mut *slot) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back = self.back.prev();
        unsafe { Some(&mut *slot_in(self.blocks, self.back)) }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        (self.back - self.front) as usize
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An iterator over the elements owned by a [`Deque`]. It pops them from the appropriate side as it goes, and it will
/// drop all remaining elements of the `Deque` when it is dropped.
pub struct IntoIter<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    deque: Deque<T, DropOrder>,
}

impl<T, DropOrder> IntoIterator for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    type Item = T;
    type IntoIter = IntoIter<T, DropOrder>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T, DropOrder> IntoIterator for &'a Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, DropOrder> IntoIterator for &'a mut Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, DropOrder> Iterator for IntoIter<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, DropOrder> FusedIterator for IntoIter<T, DropOrder> where DropOrder: DropBehavior {}

impl<T, DropOrder> ExactSizeIterator for IntoIter<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn len(&self) -> usize {
        self.deque.len()
    }
}

impl<T, DropOrder> DoubleEndedIterator for IntoIter<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Deque, BLOCK_SIZE};

    #[test]
    fn iter_visits_len_elements_in_order() {
        let mut deque = Deque::new();
        for i in 0..BLOCK_SIZE * 2 {
            deque.push_front(i);
            deque.push_back(i + 1000);
        }
        let mut it = deque.begin();
        let mut visited = 0;
        while it != deque.end() {
            assert_eq!(deque.position_get(it), deque.get(visited));
            it = it.next();
            visited += 1;
        }
        assert_eq!(visited, deque.len());
        assert_eq!(deque.iter().count(), deque.len());
        assert_eq!(deque.iter().len(), deque.len());
    }

    #[test]
    fn rev_mirrors_forward() {
        let deque: Deque<usize> = (0..BLOCK_SIZE * 3 + 5).collect();
        let forward: Vec<_> = deque.iter().collect();
        let mut backward: Vec<_> = deque.iter().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn meeting_in_the_middle() {
        let deque: Deque<i32> = (0..5).collect();
        let mut it = deque.iter();
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn nth_skips_across_blocks() {
        let deque: Deque<usize> = (0..BLOCK_SIZE * 2).collect();
        let mut it = deque.iter();
        assert_eq!(it.nth(BLOCK_SIZE + 3), Some(&(BLOCK_SIZE + 3)));
        assert_eq!(it.next(), Some(&(BLOCK_SIZE + 4)));
        assert_eq!(it.nth(BLOCK_SIZE), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn iter_mut_modifies_every_element() {
        let mut deque: Deque<usize> = (0..BLOCK_SIZE + 1).collect();
        deque.push_front(0);
        for elem in &mut deque {
            *elem += 1;
        }
        for elem in deque.iter_mut().rev().take(1) {
            *elem = 0;
        }
        assert_eq!(deque.front(), Some(&1));
        assert_eq!(deque.back(), Some(&0));
        assert_eq!(deque.get(1), Some(&1));
        assert_eq!(deque.get(BLOCK_SIZE), Some(&BLOCK_SIZE));
    }

    #[test]
    fn into_iter_pops_from_both_ends() {
        let deque: Deque<String> = (0..10).map(|i| i.to_string()).collect();
        let mut it = deque.into_iter();
        assert_eq!(it.len(), 10);
        assert_eq!(it.next().as_deref(), Some("0"));
        assert_eq!(it.next_back().as_deref(), Some("9"));
        let rest: Vec<_> = it.collect();
        assert_eq!(rest.len(), 8);
        assert_eq!(rest[0], "1");
    }

    #[test]
    fn borrowing_into_iter() {
        let deque: Deque<i32> = Deque::from([1, 2, 3]);
        let mut sum = 0;
        for elem in &deque {
            sum += elem;
        }
        assert_eq!(sum, 6);
    }
}
