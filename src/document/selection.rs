use super::position::Position;

/// Text selection (range). `end` is the side that moves with the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// Create new selection
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create selection at a single position (cursor)
    pub fn cursor(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Check if selection is empty (just a cursor)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Get the range, ensuring start <= end
    pub fn range(&self) -> (Position, Position) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Whether `position` falls inside the selected range (end exclusive)
    pub fn contains(&self, position: Position) -> bool {
        let (from, to) = self.range();
        from <= position && position < to
    }
}
