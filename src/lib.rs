//! A double-ended queue backed by a directory of fixed-size blocks.
//!
//! [`Deque`] stores its elements in blocks of [`BLOCK_SIZE`] slots. Pushing at either end writes into the block
//! next to the live range and allocates a new block only when that block is full, so elements never move once
//! written and references into the deque stay valid across growth. Indexing maps a logical index onto
//! `(segment, offset)` with one division, which keeps random access O(1).
//!
//! ```
//! use blockdeque::{deque, Deque, DequeError};
//!
//! let mut deque = deque![1, 2, 3];
//! deque.push_front(0);
//! assert_eq!(deque, [0, 1, 2, 3]);
//!
//! deque.erase(deque.begin() + 1);
//! assert_eq!(deque, [0, 2, 3]);
//! assert_eq!(deque.at(5), Err(DequeError::IndexOutOfRange { index: 5, len: 3 }));
//!
//! let sevens: Deque<i32> = Deque::from_elem(5, 7);
//! assert!(sevens.iter().all(|&x| x == 7));
//! ```
//!
//! The deque is a single-threaded structure and does no synchronization of its own.

mod block;
pub mod deque;
pub mod error;
pub mod iter;
pub mod position;
pub mod settings;


pub use block::BLOCK_SIZE;
pub use deque::{Deque, DequeDebug};
pub use error::{DequeError, TryPushError};
pub use iter::{IntoIter, Iter, IterMut};
pub use position::{Position, RevPosition};
pub use settings::{BackToFront, DropBehavior, FrontToBack};
