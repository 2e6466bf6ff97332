//! A [`Deque`] is a double-ended queue stored in a directory of fixed-size blocks.
//! Its API is similar to [`VecDeque`](std::collections::VecDeque), with positional handles in the style of
//! random-access iterators for insertion and removal in the middle.
//! Unlike a `VecDeque`, growing never moves elements: new blocks are added to either end of the directory and
//! the values already stored keep their addresses.

use crate::block::{alloc_failure, slot_in, RawBlock, BLOCK_SIZE};
use crate::{
    BackToFront, DequeError, DropBehavior, FrontToBack, Iter, IterMut, Position, RevPosition,
    TryPushError,
};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A double-ended queue with amortized O(1) pushes and pops at both ends and O(1) indexing.
///
/// Elements live in blocks of [`BLOCK_SIZE`] slots. The deque keeps an ordered directory of those blocks and two
/// cursors, `start` and `finish`, that delimit the live range. A block is allocated only when a push crosses into
/// it, and popped blocks are kept around for later pushes; they are released by [`clear`](Deque::clear) or on drop.
///
/// # Examples
/// ```
/// use blockdeque::Deque;
/// let mut deque = Deque::new();
/// deque.push_back(2);
/// deque.push_front(1);
/// deque.push_back(3);
/// assert_eq!(deque, [1, 2, 3]);
/// assert_eq!(deque[1], 2);
/// ```
///
/// # Drop Order
/// The default drop order is front-to-back, meaning that elements are dropped in the same order as iteration would happen.
/// This can be changed to back-to-front by using the [`BackToFront`] drop order.
///
/// # Positions
/// [`begin`](Deque::begin) and [`end`](Deque::end) return [`Position`]s, detached cursors that support random-access
/// arithmetic and can be handed back to [`insert`](Deque::insert), [`erase`](Deque::erase) and
/// [`position_get`](Deque::position_get). Growing at the front, inserting, erasing and clearing invalidate
/// previously obtained positions; using one afterwards trips a debug assertion. A push to the back that reuses a
/// retained block from in front of the first element renumbers the directory and invalidates positions as well.
///
/// Pops do not invalidate positions. A position to a popped slot resolves to `None` while the slot is outside the
/// live range, but once a later push writes into that slot the position resolves to the new element.
///
/// The deque does no internal synchronization. Like any owning collection, shared access needs `&` and mutation
/// needs `&mut`.
pub struct Deque<T, DropOrder = FrontToBack>
where
    DropOrder: DropBehavior,
{
    pub(crate) blocks: Vec<Option<RawBlock<T>>>,
    pub(crate) start: Position,
    pub(crate) finish: Position,
    pub(crate) generation: u64,
    marker: PhantomData<(T, DropOrder)>,
}

impl<T: Debug, DropOrder> Debug for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Snapshot of the raw layout of a [`Deque`], returned by [`Deque::debug`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DequeDebug {
    /// `(segment, offset)` of the first live slot.
    pub start: (usize, usize),
    /// `(segment, offset)` one past the last live slot.
    pub finish: (usize, usize),
    /// Number of directory entries, allocated or not.
    pub directory_len: usize,
    /// Number of directory entries that own a block.
    pub allocated_blocks: usize,
    /// Invalidation counter stamped into every position handed out.
    pub generation: u64,
}

unsafe impl<T: Send, DropOrder> Send for Deque<T, DropOrder> where DropOrder: DropBehavior {}
unsafe impl<T: Sync, DropOrder> Sync for Deque<T, DropOrder> where DropOrder: DropBehavior {}

impl<T> Deque<T, FrontToBack> {
    /// Creates a new, empty `Deque`. No block is allocated until the first push.
    /// The default is to drop items from front to back.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque = Deque::new();
    /// assert_eq!(deque.allocated_blocks(), 0);
    /// deque.push_back(1);
    /// assert_eq!(deque.allocated_blocks(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Deque` holding `count` clones of `value`.
    ///
    /// Exactly `count` elements are constructed; the rest of the last block stays uninitialized.
    ///
    /// # Panics
    /// Calls [`handle_alloc_error`](std::alloc::handle_alloc_error) if a block cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let deque = Deque::from_elem(5, 7);
    /// assert_eq!(deque.len(), 5);
    /// assert!(deque.iter().all(|&x| x == 7));
    /// ```
    #[inline]
    #[must_use]
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem(count, value) {
            Ok(deque) => deque,
            Err(err) => alloc_failure(err),
        }
    }

    /// Fallible version of [`from_elem`](Deque::from_elem).
    ///
    /// Every block is allocated before the first element is constructed. If an allocation fails, the blocks
    /// allocated so far are released and the error is returned. If `T::clone` panics, the elements built so far
    /// are dropped and all blocks are released during unwinding.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, BLOCK_SIZE};
    /// let deque = Deque::try_from_elem(BLOCK_SIZE + 1, "x").unwrap();
    /// assert_eq!(deque.len(), BLOCK_SIZE + 1);
    /// assert_eq!(deque.allocated_blocks(), 2);
    /// ```
    pub fn try_from_elem(count: usize, value: T) -> Result<Self, DequeError>
    where
        T: Clone,
    {
        if count == 0 {
            return Ok(Self::new());
        }
        let block_count = (count + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let mut blocks = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            blocks.push(Some(RawBlock::allocate()?));
        }
        let mut deque = Self::new();
        deque.blocks = blocks;
        for _ in 1..count {
            deque
                .try_push_back(value.clone())
                .map_err(TryPushError::into_error)?;
        }
        deque
            .try_push_back(value)
            .map_err(TryPushError::into_error)?;
        Ok(deque)
    }

    /// Converts the `Deque` to drop its elements from back to front.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// let deque = deque.as_back_to_front();
    /// assert_eq!(deque, [1, 2]);
    /// ```
    #[inline]
    #[must_use = "This Deque's drop order has been changed. Please make sure to use the new Deque or drop it explicitly."]
    pub fn as_back_to_front(self) -> Deque<T, BackToFront> {
        self.with_drop_order()
    }
}

impl<T, DropOrder> Default for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn default() -> Self {
        Deque {
            blocks: vec![None],
            start: Position::new(0, 0, 0),
            finish: Position::new(0, 0, 0),
            generation: 0,
            marker: PhantomData,
        }
    }
}

impl<T, DropOrder> Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    /// Creates a new, empty `Deque` with a specified drop order.
    ///
    /// # Examples
    /// ```
    /// use blockdeque::{Deque, BackToFront};
    /// let mut deque = Deque::<_>::new_with_drop_order::<BackToFront>();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque, [1, 2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn new_with_drop_order<D>() -> Deque<T, D>
    where
        D: DropBehavior,
    {
        Deque::default()
    }

    /// Changes the drop order of the `Deque` without touching its elements or blocks.
    #[inline]
    #[must_use]
    pub fn with_drop_order<D>(self) -> Deque<T, D>
    where
        D: DropBehavior,
    {
        let mut this = std::mem::ManuallyDrop::new(self);
        Deque {
            blocks: std::mem::take(&mut this.blocks),
            start: this.start,
            finish: this.finish,
            generation: this.generation,
            marker: PhantomData,
        }
    }

    /// Returns a snapshot of the raw cursor and directory state.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, BLOCK_SIZE};
    /// let mut deque = Deque::new();
    /// deque.push_front(1);
    /// let raw = deque.debug();
    /// assert_eq!(raw.start, (0, BLOCK_SIZE - 1));
    /// assert_eq!(raw.finish, (1, 0));
    /// ```
    pub fn debug(&self) -> DequeDebug {
        DequeDebug {
            start: (self.start.segment, self.start.offset),
            finish: (self.finish.segment, self.finish.offset),
            directory_len: self.blocks.len(),
            allocated_blocks: self.allocated_blocks(),
            generation: self.generation,
        }
    }

    #[inline]
    fn debug_check_invariants(&self) {
        debug_assert!(self.start <= self.finish, "start cursor is past finish");
        debug_assert!(self.start.offset < BLOCK_SIZE && self.finish.offset < BLOCK_SIZE);
        debug_assert!(
            self.finish.segment <= self.blocks.len(),
            "finish cursor is past the directory"
        );
    }

    #[inline]
    fn check_generation(&self, pos: Position) {
        debug_assert!(
            pos.generation == self.generation,
            "position {:?} was invalidated (generation {} != {})",
            pos,
            pos.generation,
            self.generation
        );
    }

    #[inline]
    fn slot(&self, pos: Position) -> *mut T {
        slot_in(&self.blocks, pos)
    }

    /// Maps a logical index onto the directory, relative to `start`.
    #[inline]
    fn index_to_position(&self, index: usize) -> Position {
        Position::from_linear(self.start.linear() + index, self.generation)
    }

    /// Makes sure the directory has an allocated block at `segment`, appending one if `segment` is one past the end.
    fn ensure_block(&mut self, segment: usize) -> Result<(), DequeError> {
        if segment == self.blocks.len() {
            let block = RawBlock::allocate()?;
            self.blocks.push(Some(block));
        } else if self.blocks[segment].is_none() {
            self.blocks[segment] = Some(RawBlock::allocate()?);
        }
        Ok(())
    }

    /// Puts a new block at the head of the directory and renumbers both cursors.
    fn grow_front(&mut self) -> Result<(), DequeError> {
        let block = RawBlock::allocate()?;
        self.blocks.insert(0, Some(block));
        self.start.segment += 1;
        self.finish.segment += 1;
        // every segment ordinal handed out so far now names the wrong block
        self.generation += 1;
        Ok(())
    }

    /// Returns the slot a push to the front would write, allocating whatever is needed to reach it.
    fn front_slot(&mut self) -> Result<Position, DequeError> {
        if self.start.segment == 0 && self.start.offset == 0 {
            self.grow_front()?;
        }
        let slot = self.start.prev();
        self.ensure_block(slot.segment)?;
        Ok(slot)
    }

    /// Moves the spare block at the head of the directory to the tail and renumbers both cursors.
    ///
    /// Only valid while `start` lies past segment 0, so the head block holds no live element.
    fn recycle_front_block(&mut self) {
        debug_assert!(self.start.segment > 0, "head block still holds live elements");
        self.blocks.rotate_left(1);
        self.start.segment -= 1;
        self.finish.segment -= 1;
        self.generation += 1;
    }

    /// Returns the slot a push to the back would write, allocating its block if needed.
    ///
    /// A retained block in front of `start` is reused before a new one is allocated.
    fn back_slot(&mut self) -> Result<Position, DequeError> {
        if self.finish.segment == self.blocks.len()
            && self.start.segment > 0
            && self.blocks[0].is_some()
        {
            self.recycle_front_block();
        }
        self.ensure_block(self.finish.segment)?;
        Ok(self.finish)
    }

    /// Pushes an element to the back of the `Deque`.
    ///
    /// # Panics
    /// Calls [`handle_alloc_error`](std::alloc::handle_alloc_error) if a new block is needed and cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([42, 10]);
    /// deque.push_back(100);
    /// assert_eq!(deque.pop_back(), Ok(100));
    /// ```
    #[inline]
    pub fn push_back(&mut self, elem: T) {
        if let Err(err) = self.try_push_back(elem) {
            alloc_failure(err.into_error());
        }
    }

    /// Pushes an element to the front of the `Deque`.
    ///
    /// # Panics
    /// Calls [`handle_alloc_error`](std::alloc::handle_alloc_error) if a new block is needed and cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([42, 10]);
    /// deque.push_front(100);
    /// assert_eq!(deque.pop_front(), Ok(100));
    /// ```
    #[inline]
    pub fn push_front(&mut self, elem: T) {
        if let Err(err) = self.try_push_front(elem) {
            alloc_failure(err.into_error());
        }
    }

    /// Pushes an element to the back, handing it back if a needed block cannot be allocated.
    ///
    /// The block is allocated before anything is written, so a failure leaves the `Deque` unchanged.
    #[inline]
    pub fn try_push_back(&mut self, elem: T) -> Result<(), TryPushError<T>> {
        let slot = match self.back_slot() {
            Ok(slot) => slot,
            Err(error) => {
                return Err(TryPushError {
                    element: elem,
                    error,
                })
            }
        };
        unsafe {
            std::ptr::write(self.slot(slot), elem);
        }
        self.finish = slot.next();
        Ok(())
    }

    /// Pushes an element to the front, handing it back if a needed block cannot be allocated.
    ///
    /// The block is allocated before anything is written, so a failure leaves the elements unchanged.
    #[inline]
    pub fn try_push_front(&mut self, elem: T) -> Result<(), TryPushError<T>> {
        let slot = match self.front_slot() {
            Ok(slot) => slot,
            Err(error) => {
                return Err(TryPushError {
                    element: elem,
                    error,
                })
            }
        };
        unsafe {
            std::ptr::write(self.slot(slot), elem);
        }
        self.start = slot;
        Ok(())
    }

    /// Removes the last element and returns it, or [`DequeError::Empty`] if the `Deque` is empty.
    /// The block it lived in stays allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, DequeError};
    /// let mut deque: Deque<i32> = Deque::from([42, 10]);
    /// assert_eq!(deque.pop_back(), Ok(10));
    /// assert_eq!(deque.pop_back(), Ok(42));
    /// assert_eq!(deque.pop_back(), Err(DequeError::Empty));
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }
        let last = self.finish.prev();
        self.finish = last;
        unsafe { Ok(std::ptr::read(self.slot(last))) }
    }

    /// Removes the first element and returns it, or [`DequeError::Empty`] if the `Deque` is empty.
    /// The block it lived in stays allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, DequeError};
    /// let mut deque: Deque<i32> = Deque::from([42, 10]);
    /// assert_eq!(deque.pop_front(), Ok(42));
    /// assert_eq!(deque.pop_front(), Ok(10));
    /// assert_eq!(deque.pop_front(), Err(DequeError::Empty));
    /// ```
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }
        let first = self.start;
        self.start = first.next();
        unsafe { Ok(std::ptr::read(self.slot(first))) }
    }

    /// Returns the number of elements in the `Deque`.
    #[inline]
    pub fn len(&self) -> usize {
        self.finish.linear() - self.start.linear()
    }

    /// Returns true if the `Deque` contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque = Deque::new();
    /// assert!(deque.is_empty());
    ///
    /// deque.push_back(1);
    /// assert!(!deque.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }

    /// Number of entries in the segment directory, allocated or not.
    #[inline]
    pub fn directory_len(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks currently allocated.
    #[inline]
    pub fn allocated_blocks(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_some()).count()
    }

    /// Returns how many elements can be pushed to the back before another block has to be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, BLOCK_SIZE};
    /// let mut deque = Deque::new();
    /// assert_eq!(deque.capacity_back(), 0);
    /// deque.push_back(1);
    /// assert_eq!(deque.capacity_back(), BLOCK_SIZE - 1);
    /// ```
    pub fn capacity_back(&self) -> usize {
        self.blocks
            .iter()
            .enumerate()
            .skip(self.finish.segment)
            .take_while(|(_, block)| block.is_some())
            .map(|(segment, _)| {
                if segment == self.finish.segment {
                    BLOCK_SIZE - self.finish.offset
                } else {
                    BLOCK_SIZE
                }
            })
            .sum()
    }

    /// Returns how many elements can be pushed to the front before another block has to be allocated.
    pub fn capacity_front(&self) -> usize {
        let whole_blocks = self.blocks[..self.start.segment.min(self.blocks.len())]
            .iter()
            .rev()
            .take_while(|block| block.is_some())
            .count();
        whole_blocks * BLOCK_SIZE + self.start.offset
    }

    /// Allocates blocks so that at least `additional` elements can be pushed to the back without allocating.
    ///
    /// # Panics
    /// Calls [`handle_alloc_error`](std::alloc::handle_alloc_error) if a block cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, BLOCK_SIZE};
    /// let mut deque = Deque::new();
    /// deque.push_back(1);
    /// deque.reserve_back(BLOCK_SIZE * 2);
    /// assert!(deque.capacity_back() >= BLOCK_SIZE * 2);
    /// assert_eq!(deque.allocated_blocks(), 3);
    /// ```
    #[inline]
    pub fn reserve_back(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_back(additional) {
            alloc_failure(err);
        }
    }

    /// Fallible version of [`reserve_back`](Deque::reserve_back). Blocks allocated before a failure are kept.
    pub fn try_reserve_back(&mut self, additional: usize) -> Result<(), DequeError> {
        if additional == 0 {
            return Ok(());
        }
        let last = self.finish + (additional - 1);
        for segment in self.finish.segment..=last.segment {
            self.ensure_block(segment)?;
        }
        Ok(())
    }

    /// Allocates blocks so that at least `additional` elements can be pushed to the front without allocating.
    ///
    /// Adding blocks at the front renumbers the directory, which invalidates existing positions.
    ///
    /// # Panics
    /// Calls [`handle_alloc_error`](std::alloc::handle_alloc_error) if a block cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_back(1);
    /// deque.reserve_front(100);
    /// assert!(deque.capacity_front() >= 100);
    /// ```
    #[inline]
    pub fn reserve_front(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_front(additional) {
            alloc_failure(err);
        }
    }

    /// Fallible version of [`reserve_front`](Deque::reserve_front). Blocks allocated before a failure are kept.
    pub fn try_reserve_front(&mut self, additional: usize) -> Result<(), DequeError> {
        if additional == 0 {
            return Ok(());
        }
        while self.start.linear() < additional {
            self.grow_front()?;
        }
        let first = self.start - additional;
        for segment in first.segment..=self.start.prev().segment {
            self.ensure_block(segment)?;
        }
        Ok(())
    }

    /// Returns a reference to the element at `index`, or `None` if it is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            unsafe { Some(&*self.slot(self.index_to_position(index))) }
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `index`, or `None` if it is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            unsafe { Some(&mut *self.slot(self.index_to_position(index))) }
        } else {
            None
        }
    }

    /// Returns a reference to the element at `index` without any bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](Deque::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        let pos = self.index_to_position(index);
        let block = self.blocks.get_unchecked(pos.segment);
        &*block.as_ref().unwrap_unchecked().slot(pos.offset)
    }

    /// Returns a mutable reference to the element at `index` without any bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](Deque::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        let pos = self.index_to_position(index);
        let block = self.blocks.get_unchecked(pos.segment);
        &mut *block.as_ref().unwrap_unchecked().slot(pos.offset)
    }

    /// Bounds-checked access. Returns [`DequeError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{Deque, DequeError};
    /// let deque: Deque<i32> = Deque::from([1, 2, 3]);
    /// assert_eq!(deque.at(2), Ok(&3));
    /// assert_eq!(deque.at(5), Err(DequeError::IndexOutOfRange { index: 5, len: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len();
        self.get(index)
            .ok_or(DequeError::IndexOutOfRange { index, len })
    }

    /// Mutable bounds-checked access. Returns [`DequeError::IndexOutOfRange`] if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.len();
        self.get_mut(index)
            .ok_or(DequeError::IndexOutOfRange { index, len })
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        let last = self.len().checked_sub(1)?;
        self.get(last)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len().checked_sub(1)?;
        self.get_mut(last)
    }

    /// Position of the first element, or [`end`](Deque::end) if the `Deque` is empty.
    #[inline]
    pub fn begin(&self) -> Position {
        Position {
            generation: self.generation,
            ..self.start
        }
    }

    /// Position one past the last element.
    #[inline]
    pub fn end(&self) -> Position {
        Position {
            generation: self.generation,
            ..self.finish
        }
    }

    /// Reverse position naming the last element.
    #[inline]
    pub fn rbegin(&self) -> RevPosition {
        RevPosition::new(self.end())
    }

    /// Reverse position one before the first element.
    #[inline]
    pub fn rend(&self) -> RevPosition {
        RevPosition::new(self.begin())
    }

    /// Logical index of `pos`, or `None` if it lies outside `[begin, end]`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let deque: Deque<i32> = (0..10).collect();
    /// assert_eq!(deque.index_of(deque.begin() + 4), Some(4));
    /// assert_eq!(deque.index_of(deque.end()), Some(10));
    /// assert_eq!(deque.index_of(deque.end() + 1), None);
    /// ```
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.check_generation(pos);
        if self.start <= pos && pos <= self.finish {
            Some(pos.linear() - self.start.linear())
        } else {
            None
        }
    }

    /// Resolves a position to its element, or `None` if it does not name a live element.
    #[inline]
    pub fn position_get(&self, pos: Position) -> Option<&T> {
        self.check_generation(pos);
        if self.start <= pos && pos < self.finish {
            unsafe { Some(&*self.slot(pos)) }
        } else {
            None
        }
    }

    /// Resolves a position to its element mutably, or `None` if it does not name a live element.
    #[inline]
    pub fn position_get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.check_generation(pos);
        if self.start <= pos && pos < self.finish {
            unsafe { Some(&mut *self.slot(pos)) }
        } else {
            None
        }
    }

    /// Resolves a reverse position to the element one before its base.
    #[inline]
    pub fn rev_position_get(&self, rpos: RevPosition) -> Option<&T> {
        rpos.target().and_then(|pos| self.position_get(pos))
    }

    /// Resolves a reverse position to the element one before its base, mutably.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([1, 2, 3]);
    /// let rpos = deque.rbegin() + 1;
    /// *deque.rev_position_get_mut(rpos).unwrap() = 20;
    /// assert_eq!(deque, [1, 20, 3]);
    /// ```
    #[inline]
    pub fn rev_position_get_mut(&mut self, rpos: RevPosition) -> Option<&mut T> {
        rpos.target().and_then(|pos| self.position_get_mut(pos))
    }

    /// Returns a front-to-back iterator over the elements.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let deque: Deque<i32> = Deque::from([1, 2, 3]);
    /// let forward: Vec<_> = deque.iter().copied().collect();
    /// let backward: Vec<_> = deque.iter().rev().copied().collect();
    /// assert_eq!(forward, [1, 2, 3]);
    /// assert_eq!(backward, [3, 2, 1]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.blocks, self.begin(), self.end())
    }

    /// Returns a front-to-back iterator that allows modifying each element.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([1, 2, 3]);
    /// for elem in deque.iter_mut() {
    ///     *elem *= 10;
    /// }
    /// assert_eq!(deque, [10, 20, 30]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (begin, end) = (self.begin(), self.end());
        IterMut::new(&self.blocks, begin, end)
    }

    /// Inserts an element at `pos`, shifting the elements on the shorter side to make room.
    /// Afterwards the new element sits at the logical index `pos` had, and the relative order of all other elements
    /// is unchanged. Invalidates all positions.
    ///
    /// # Panics
    /// Panics if `pos` lies outside `[begin, end]`, or if a needed block cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([1, 2]);
    /// deque.insert(deque.begin() + 1, 3);
    /// assert_eq!(deque, [1, 3, 2]);
    /// ```
    /// ```should_panic
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([1, 2]);
    /// deque.insert(deque.end() + 1, 3);
    /// ```
    pub fn insert(&mut self, pos: Position, elem: T) {
        self.check_generation(pos);
        assert!(
            self.start <= pos && pos <= self.finish,
            "insert position out of bounds"
        );
        let index = pos.linear() - self.start.linear();
        let len = self.len();

        if index >= len / 2 {
            // shift the tail one slot toward the back
            if let Err(err) = self.back_slot() {
                alloc_failure(err);
            }
            for i in (index..len).rev() {
                let from = self.index_to_position(i);
                unsafe {
                    std::ptr::copy_nonoverlapping(self.slot(from), self.slot(from.next()), 1);
                }
            }
            unsafe {
                std::ptr::write(self.slot(self.index_to_position(index)), elem);
            }
            self.finish = self.finish.next();
        } else {
            // shift the head one slot toward the front
            let new_start = match self.front_slot() {
                Ok(slot) => slot,
                Err(err) => alloc_failure(err),
            };
            for i in 0..index {
                let from = self.start + i;
                unsafe {
                    std::ptr::copy_nonoverlapping(self.slot(from), self.slot(new_start + i), 1);
                }
            }
            unsafe {
                std::ptr::write(self.slot(new_start + index), elem);
            }
            self.start = new_start;
        }

        self.generation += 1;
        self.debug_check_invariants();
    }

    /// Removes and returns the element at `pos`, closing the gap from the shorter side.
    /// Invalidates all positions.
    ///
    /// # Panics
    /// Panics if `pos` does not name a live element.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque: Deque<i32> = Deque::from([0, 1, 2, 3]);
    /// assert_eq!(deque.erase(deque.begin() + 1), 1);
    /// assert_eq!(deque, [0, 2, 3]);
    /// ```
    pub fn erase(&mut self, pos: Position) -> T {
        self.check_generation(pos);
        assert!(
            self.start <= pos && pos < self.finish,
            "erase position out of bounds"
        );
        let index = pos.linear() - self.start.linear();
        let len = self.len();
        let elem = unsafe { std::ptr::read(self.slot(pos)) };

        if index < len / 2 {
            for i in (0..index).rev() {
                let from = self.start + i;
                unsafe {
                    std::ptr::copy_nonoverlapping(self.slot(from), self.slot(from.next()), 1);
                }
            }
            self.start = self.start.next();
        } else {
            for i in index + 1..len {
                let from = self.start + i;
                unsafe {
                    std::ptr::copy_nonoverlapping(self.slot(from), self.slot(from.prev()), 1);
                }
            }
            self.finish = self.finish.prev();
        }

        self.generation += 1;
        self.debug_check_invariants();
        elem
    }

    /// Drops every element, releases every block, and resets the `Deque` to its freshly constructed state.
    /// Elements are dropped in the order specified by the `Deque`'s drop order.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.allocated_blocks(), 0);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.clear_with_order(DropOrder::IS_INVERTED);
    }

    /// Like [`clear`](Deque::clear), but drops the elements in the order given by `drop_from_back`.
    pub fn clear_with_order(&mut self, drop_from_back: bool) {
        self.drop_elements(drop_from_back);
        self.blocks.clear();
        self.blocks.push(None);
        self.start = Position::new(0, 0, 0);
        self.finish = Position::new(0, 0, 0);
        self.generation += 1;
        self.debug_check_invariants();
    }

    fn drop_elements(&mut self, drop_from_back: bool) {
        while (if drop_from_back {
            self.pop_back()
        } else {
            self.pop_front()
        })
        .is_ok()
        {
            // drop the element
        }
    }

    /// Clones every element of the slice onto the back of the `Deque`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::Deque;
    /// let mut deque = Deque::new();
    /// deque.extend_from_slice(&[1, 2, 3]);
    /// assert_eq!(deque, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        self.reserve_back(other.len());
        for elem in other {
            self.push_back(elem.clone());
        }
    }
}

impl<T, DropOrder> Drop for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn drop(&mut self) {
        // blocks are released when the directory itself is dropped
        self.drop_elements(DropOrder::IS_INVERTED);
    }
}

impl<T, DropOrder> Clone for Deque<T, DropOrder>
where
    T: Clone,
    DropOrder: DropBehavior,
{
    #[inline]
    fn clone(&self) -> Self {
        let mut new = Self::default();
        // a panicking clone drops `new`, which drops what was copied so far
        for elem in self.iter() {
            new.push_back(elem.clone());
        }
        new
    }

    /// Replaces the contents with a deep copy of `source`.
    /// The copy is built first, so a panicking clone leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let mut fresh = source.clone();
        fresh.generation = self.generation + 1;
        *self = fresh;
    }
}

impl<T, DropOrder> Index<usize> for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(elem) => elem,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }
}

impl<T, DropOrder> IndexMut<usize> for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T, DropOrder> FromIterator<T> for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::default();
        deque.extend(iter);
        deque
    }
}

impl<T, DropOrder> Extend<T> for Deque<T, DropOrder>
where
    DropOrder: DropBehavior,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_back(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    #[inline]
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    #[inline]
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

// partialeq, eq, partialord, ord, and hash implementations
impl<T, DropOrder> PartialEq for Deque<T, DropOrder>
where
    T: PartialEq,
    DropOrder: DropBehavior,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, DropOrder> PartialEq<[T]> for Deque<T, DropOrder>
where
    T: PartialEq,
    DropOrder: DropBehavior,
{
    #[inline]
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, DropOrder> PartialEq<&[T]> for Deque<T, DropOrder>
where
    T: PartialEq,
    DropOrder: DropBehavior,
{
    #[inline]
    fn eq(&self, other: &&[T]) -> bool {
        *self == **other
    }
}

impl<T, DropOrder, const N: usize> PartialEq<[T; N]> for Deque<T, DropOrder>
where
    T: PartialEq,
    DropOrder: DropBehavior,
{
    #[inline]
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T, DropOrder> Eq for Deque<T, DropOrder>
where
    T: Eq,
    DropOrder: DropBehavior,
{
}

impl<T, DropOrder> PartialOrd for Deque<T, DropOrder>
where
    T: PartialOrd,
    DropOrder: DropBehavior,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, DropOrder> Ord for Deque<T, DropOrder>
where
    T: Ord,
    DropOrder: DropBehavior,
{
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, DropOrder> std::hash::Hash for Deque<T, DropOrder>
where
    T: std::hash::Hash,
    DropOrder: DropBehavior,
{
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for elem in self.iter() {
            elem.hash(state);
        }
    }
}

/// A version of the [`vec!`] macro but for [`Deque`].
/// # Examples
/// ```
/// # use blockdeque::deque;
/// let deque = deque![1, 2, 3, 4, 5];
/// assert_eq!(deque.len(), 5);
/// assert_eq!(deque, [1, 2, 3, 4, 5]);
/// ```
/// ```
/// # use blockdeque::deque;
/// let deque = deque![1; 5];
/// assert_eq!(deque, [1, 1, 1, 1, 1]);
/// ```
/// ```
/// # use blockdeque::{Deque, deque};
/// let deque: Deque<i32> = deque![];
/// assert!(deque.is_empty());
/// ```
#[macro_export]
macro_rules! deque {
    () => {
        $crate::Deque::<_>::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Deque::<_>::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Deque::<_>::from([$($x),+])
    };
}
