use serde::{Deserialize, Serialize};

/// Player-visible state of a cell, what a renderer is allowed to draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    Exploded,
}

impl VisibleCell {
    /// Hidden or flagged, nothing about the cell underneath is shown.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for VisibleCell {
    fn default() -> Self {
        Self::Hidden
    }
}
