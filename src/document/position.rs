use std::cmp::Ordering;

/// A position in the document as (block, offset)
/// Offsets count atoms: characters and inline images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    /// Create new position
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    /// Start of the document
    pub fn zero() -> Self {
        Self {
            block: 0,
            offset: 0,
        }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.block
            .cmp(&other.block)
            .then(self.offset.cmp(&other.offset))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.block + 1, self.offset + 1) // 1-indexed for display
    }
}
