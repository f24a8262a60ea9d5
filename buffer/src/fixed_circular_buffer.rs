//! Fixed-capacity circular buffer with inline storage.

use std::fmt;
use std::ops::Index;

/// A double-ended ring buffer holding at most `N` elements.
///
/// `FixedCircularBuffer<T, N>` stores its elements in an inline array, so it
/// never touches the heap after construction. Writes never fail: pushing
/// onto a full buffer silently evicts the element at the opposite end.
///
/// This makes it a natural delay line for streaming filters, where
/// `push_front` keeps the most recent sample at logical index 0.
///
/// # Example
///
/// ```
/// use victor_buffer::FixedCircularBuffer;
///
/// let mut history = FixedCircularBuffer::<i16, 3>::new();
/// for s in [1, 2, 3, 4] {
///     history.push_front(s);
/// }
///
/// // Most recent first, oldest (1) evicted
/// assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
/// ```
pub struct FixedCircularBuffer<T, const N: usize> {
    buf: [Option<T>; N],
    // Physical slot of logical index 0.
    head: usize,
    len: usize,
}

impl<T, const N: usize> FixedCircularBuffer<T, N> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        const { assert!(N > 0, "capacity must be greater than 0") };
        Self {
            buf: std::array::from_fn(|_| None),
            head: 0,
            len: 0,
        }
    }

    /// Returns the number of elements currently in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the buffer capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push will evict an element.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    #[inline]
    fn slot(&self, index: usize) -> usize {
        (self.head + index) % N
    }

    /// Inserts `value` at logical index 0.
    ///
    /// If the buffer is full, the last element is dropped first.
    pub fn push_front(&mut self, value: T) {
        // When full, the slot before head holds the last element, so the
        // write below overwrites it.
        self.head = (self.head + N - 1) % N;
        self.buf[self.head] = Some(value);
        if self.len < N {
            self.len += 1;
        }
    }

    /// Appends `value` after the last element.
    ///
    /// If the buffer is full, the first element is dropped first.
    pub fn push_back(&mut self, value: T) {
        let tail = self.slot(self.len);
        self.buf[tail] = Some(value);
        if self.len < N {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % N;
        }
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.buf[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        item
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let last = self.slot(self.len - 1);
        self.len -= 1;
        self.buf[last].take()
    }

    /// Returns the first element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the last element.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns the element at logical `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.buf[self.slot(index)].as_ref()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        for slot in &mut self.buf {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates from logical index 0 to the last element.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter { buf: self, pos: 0 }
    }
}

impl<T, const N: usize> Default for FixedCircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for FixedCircularBuffer<T, N> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            head: self.head,
            len: self.len,
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedCircularBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> Index<usize> for FixedCircularBuffer<T, N> {
    type Output = T;

    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(v) => v,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

/// Iterator over a [`FixedCircularBuffer`] in logical order.
pub struct Iter<'a, T, const N: usize> {
    buf: &'a FixedCircularBuffer<T, N>,
    pos: usize,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.buf.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<'a, T, const N: usize> IntoIterator for &'a FixedCircularBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<const N: usize>(buf: &FixedCircularBuffer<i32, N>) -> Vec<i32> {
        buf.iter().copied().collect()
    }

    #[test]
    fn test_empty() {
        let buf = FixedCircularBuffer::<i32, 5>::new();
        assert!(buf.is_empty());
        assert!(!buf.is_full());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 5);
        assert!(buf.front().is_none());
        assert!(buf.back().is_none());
        assert!(buf.get(0).is_none());
    }

    #[test]
    fn test_push_back_wraps() {
        let mut buf = FixedCircularBuffer::<i32, 5>::new();
        for v in [103, 102, 105, 106, 107] {
            buf.push_back(v);
        }
        assert!(buf.is_full());
        assert_eq!(contents(&buf), vec![103, 102, 105, 106, 107]);

        // First write past capacity drops the front
        buf.push_back(108);
        assert_eq!(buf.len(), 5);
        assert_eq!(contents(&buf), vec![102, 105, 106, 107, 108]);

        // Loop several more times
        for i in -5..=24 {
            buf.push_back(i);
            assert_eq!(buf.len(), 5);
            assert_eq!(buf[0], i - 4);
            assert_eq!(buf[4], i);
            assert_eq!(buf.front(), Some(&buf[0]));
            assert_eq!(buf.back(), Some(&buf[4]));
        }
        assert_eq!(contents(&buf), vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_push_front_most_recent_first() {
        let mut buf = FixedCircularBuffer::<i32, 5>::new();
        buf.push_front(103);
        buf.push_front(102);
        buf.push_front(105);
        assert_eq!(contents(&buf), vec![105, 102, 103]);
        assert_eq!(buf.front(), Some(&105));
        assert_eq!(buf.back(), Some(&103));

        buf.push_front(106);
        buf.push_front(107);
        buf.push_front(108);
        assert_eq!(buf.len(), 5);
        assert_eq!(contents(&buf), vec![108, 107, 106, 105, 102]);

        for i in 0..30 {
            buf.push_front(i);
            assert_eq!(buf[0], i);
            assert_eq!(buf.len(), 5);
        }
        assert_eq!(contents(&buf), vec![29, 28, 27, 26, 25]);
    }

    #[test]
    fn test_push_pop_mix() {
        let mut buf = FixedCircularBuffer::<i32, 4>::new();
        buf.push_front(123);
        buf.push_front(122);
        buf.push_back(124);
        assert_eq!(contents(&buf), vec![122, 123, 124]);

        assert_eq!(buf.pop_back(), Some(124));
        assert_eq!(buf.pop_front(), Some(122));
        assert_eq!(buf.pop_front(), Some(123));
        assert_eq!(buf.pop_front(), None);
        assert_eq!(buf.pop_back(), None);
        assert!(buf.is_empty());

        for v in [10, 9, 8, 7, 6] {
            buf.push_front(v);
        }
        assert_eq!(contents(&buf), vec![6, 7, 8, 9]);
        assert_eq!(buf.pop_front(), Some(6));
        assert_eq!(buf.pop_back(), Some(9));
        assert_eq!(contents(&buf), vec![7, 8]);
    }

    #[test]
    fn test_clear() {
        let mut buf = FixedCircularBuffer::<i32, 3>::new();
        for v in 0..7 {
            buf.push_front(v);
        }
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.get(0).is_none());

        buf.push_back(1);
        assert_eq!(contents(&buf), vec![1]);
    }

    #[test]
    fn test_iter_size_hint() {
        let mut buf = FixedCircularBuffer::<i32, 4>::new();
        buf.push_back(1);
        buf.push_back(2);
        let mut it = buf.iter();
        assert_eq!(it.len(), 2);
        it.next();
        assert_eq!(it.len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut buf = FixedCircularBuffer::<i32, 3>::new();
        buf.push_back(1);
        let copy = buf.clone();
        buf.push_back(2);
        assert_eq!(contents(&copy), vec![1]);
        assert_eq!(format!("{:?}", buf), "[1, 2]");
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_index_out_of_range() {
        let mut buf = FixedCircularBuffer::<i32, 3>::new();
        buf.push_back(1);
        let _ = buf[1];
    }
}
