use std::fmt::Debug;

/// Drops elements starting from the front of the [`Deque`](crate::Deque). This matches iteration order.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrontToBack;

/// Drops elements starting from the back of the [`Deque`](crate::Deque).
#[derive(Copy, Clone, Debug, Default)]
pub struct BackToFront;

/// Selects the order in which a [`Deque`](crate::Deque) destroys its elements on `clear` and `drop`.
pub trait DropBehavior: seal_drop_behavior::Sealed + Debug + Copy + Default {}
pub(crate) mod seal_drop_behavior {
    pub trait Sealed {
        const IS_INVERTED: bool;
    }
}

impl DropBehavior for FrontToBack {}
impl DropBehavior for BackToFront {}

impl seal_drop_behavior::Sealed for FrontToBack {
    const IS_INVERTED: bool = false;
}
impl seal_drop_behavior::Sealed for BackToFront {
    const IS_INVERTED: bool = true;
}
