//! Allocation-free buffers for real-time audio paths.
//!
//! This crate provides [`FixedCircularBuffer<T, N>`], a double-ended ring
//! buffer whose storage lives inline, sized at compile time. It is meant for
//! code that must not allocate per sample, such as the delay line of a
//! streaming FIR filter.
//!
//! # Overflow
//!
//! Fixed-size buffers never fail on overflow. Pushing onto a full buffer
//! evicts the element at the opposite end:
//!
//! ```
//! use victor_buffer::FixedCircularBuffer;
//!
//! let mut buf = FixedCircularBuffer::<i32, 3>::new();
//! for v in [1, 2, 3, 4, 5] {
//!     buf.push_back(v); // Overwrites 1, 2
//! }
//! assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
//! ```
//!
//! # Thread Safety
//!
//! Mutation takes `&mut self`; there is no internal locking. Share a buffer
//! across threads only behind external synchronization.

mod fixed_circular_buffer;

pub use fixed_circular_buffer::{FixedCircularBuffer, Iter};
