//! Caret positions and selections.

/// A caret position inside a document.
///
/// `offset` counts characters within the block; an image counts as one.
/// Field order matters: the derived ordering compares the block first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Index of the block
    pub block: usize,
    /// Character offset within the block
    pub offset: usize,
}

impl Position {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// A selection between an anchor (where it started) and a focus (where the
/// caret currently is). Collapsed selections are plain carets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection at `position`.
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position,
            focus: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The selection as an ordered `(start, end)` pair.
    pub fn range(&self) -> (Position, Position) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }

    pub fn start(&self) -> Position {
        self.range().0
    }

    pub fn end(&self) -> Position {
        self.range().1
    }

    /// Character range of the selection inside `block`, given that block's length.
    ///
    /// Returns `None` when the selection does not touch the block or is collapsed.
    pub fn block_range(&self, block: usize, block_len: usize) -> Option<(usize, usize)> {
        if self.is_collapsed() {
            return None;
        }
        let (start, end) = self.range();
        if block < start.block || block > end.block {
            return None;
        }
        let from = if block == start.block { start.offset } else { 0 };
        let to = if block == end.block {
            end.offset
        } else {
            block_len
        };
        (from < to).then_some((from, to.min(block_len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_compares_block_first() {
        assert!(Position::new(0, 10) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }

    #[test]
    fn test_range_orders_backwards_selection() {
        let sel = Selection::new(Position::new(1, 2), Position::new(0, 4));
        assert_eq!(sel.range(), (Position::new(0, 4), Position::new(1, 2)));
        assert!(!sel.is_collapsed());
    }

    #[test]
    fn test_caret_is_collapsed() {
        let sel = Selection::caret(Position::new(3, 1));
        assert!(sel.is_collapsed());
        assert_eq!(sel.start(), sel.end());
    }

    #[test]
    fn test_block_range_spanning_blocks() {
        let sel = Selection::new(Position::new(0, 2), Position::new(2, 3));
        assert_eq!(sel.block_range(0, 5), Some((2, 5)));
        assert_eq!(sel.block_range(1, 7), Some((0, 7)));
        assert_eq!(sel.block_range(2, 9), Some((0, 3)));
        assert_eq!(sel.block_range(3, 4), None);
    }

    #[test]
    fn test_block_range_collapsed_is_none() {
        let sel = Selection::caret(Position::new(0, 2));
        assert_eq!(sel.block_range(0, 5), None);
    }
}
