//! Clamped, non-wrapping selection over an owned list.

/// Current position in an ordered list.
///
/// The cursor owns its list so the two can never disagree: the only way to
/// swap the list is [`SelectionCursor::replace`], which also resets the index.
#[derive(Clone, Debug)]
pub struct SelectionCursor<T> {
    /// Items the cursor walks over.
    items: Vec<T>,
    /// Selected position; always 0 when `items` is empty.
    index: usize,
}

impl<T> Default for SelectionCursor<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
        }
    }
}

impl<T> SelectionCursor<T> {
    /// Create a cursor over `items` positioned at the first element.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    /// Move one step towards the end; holds at the last element.
    pub fn next(&mut self) {
        if !self.items.is_empty() && self.index + 1 < self.items.len() {
            self.index += 1;
        }
    }

    /// Move one step towards the start; holds at the first element.
    pub const fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Jump to `index`, clamped to the list bounds. No-op on an empty list.
    pub fn set(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.index = index.min(self.items.len() - 1);
    }

    /// Move by a signed number of steps, clamped at both ends.
    pub fn step(&mut self, delta: isize) {
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                self.previous();
            }
        } else {
            for _ in 0..delta.unsigned_abs() {
                self.next();
            }
        }
    }

    /// Return to the first element.
    pub const fn reset(&mut self) {
        self.index = 0;
    }

    /// Swap in a new list and reset the index in the same step.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.index = 0;
    }

    /// Drop all items (and reset).
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Current index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Currently selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// All items in order.
    #[must_use]
    pub const fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
