//! Implement [`std::fmt::Display`] for types such as `Option<T>` and slice
//! `&[T]`.

pub(crate) mod display_option;
pub(crate) mod display_slice;

pub use display_option::DisplayOption;
pub use display_option::DisplayOptionExt;
pub use display_slice::DisplaySlice;
pub use display_slice::DisplaySliceExt;
