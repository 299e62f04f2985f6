//! Navigation history with a cursor.

/// An ordered list of entries and the position of the current one.
///
/// Pushing while the cursor is not at the end discards the entries after it, the same way a
/// browser drops its forward history.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        History {
            entries: vec![],
            cursor: 0,
        }
    }
}

impl<T> History<T> {
    /// Add an entry after the current one and make it current.
    pub fn push(&mut self, entry: T) -> &T {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        &self.entries[self.cursor]
    }

    /// Move one step back, `None` if already at the start.
    pub fn back(&mut self) -> Option<&T> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Move one step forward, `None` if already at the end.
    pub fn forward(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Jump to an existing position, `None` if it is out of range.
    pub fn go_to(&mut self, position: usize) -> Option<&T> {
        if position >= self.entries.len() {
            return None;
        }
        self.cursor = position;
        self.entries.get(self.cursor)
    }

    /// The current entry.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Position of the current entry.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let mut history = History::<u32>::default();
        assert_eq!(history.current(), None);
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn back_and_forward() {
        let mut history = History::default();
        history.push(1);
        history.push(2);
        history.push(3);

        assert_eq!(history.back(), Some(&2));
        assert_eq!(history.back(), Some(&1));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), Some(&1));

        assert_eq!(history.forward(), Some(&2));
        assert_eq!(history.forward(), Some(&3));
        assert_eq!(history.forward(), None);
        assert_eq!(history.current(), Some(&3));
    }

    #[test]
    fn push_drops_forward_entries() {
        let mut history = History::default();
        history.push(1);
        history.push(2);
        history.push(3);
        history.back();
        history.back();

        history.push(4);
        assert_eq!(history.len(), 2);
        assert_eq!(history.position(), 1);
        assert_eq!(history.forward(), None);
        assert_eq!(history.back(), Some(&1));
    }

    #[test]
    fn go_to() {
        let mut history = History::default();
        history.push("a");
        history.push("b");

        assert_eq!(history.go_to(0), Some(&"a"));
        assert_eq!(history.go_to(5), None);
        assert_eq!(history.current(), Some(&"a"));
        assert_eq!(history.position(), 0);
        assert_eq!(history.len(), 2);
    }
}
