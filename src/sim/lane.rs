//! Player lane (0 = left, 1 = center, 2 = right)

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// One of the three road lanes; construction always clamps into range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lane(u8);

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const CENTER: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(2);

    /// Clamp any index into a valid lane
    pub fn new(index: i32) -> Self {
        Lane(index.clamp(0, LANE_COUNT as i32 - 1) as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// One lane to the left, sticking at the edge
    pub fn left(self) -> Self {
        Lane::new(self.0 as i32 - 1)
    }

    /// One lane to the right, sticking at the edge
    pub fn right(self) -> Self {
        Lane::new(self.0 as i32 + 1)
    }
}

impl Default for Lane {
    fn default() -> Self {
        Lane::CENTER
    }
}

/// Discrete steering command from keyboard, buttons or touch zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneInput {
    Left,
    Right,
    /// Jump straight to a lane (touch zone); out-of-range values clamp
    Set(i32),
}

impl LaneInput {
    pub fn apply(self, lane: Lane) -> Lane {
        match self {
            LaneInput::Left => lane.left(),
            LaneInput::Right => lane.right(),
            LaneInput::Set(index) => Lane::new(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_center() {
        assert_eq!(Lane::default(), Lane::CENTER);
    }

    #[test]
    fn test_steering_clamps_at_edges() {
        assert_eq!(Lane::LEFT.left(), Lane::LEFT);
        assert_eq!(Lane::RIGHT.right(), Lane::RIGHT);
        assert_eq!(Lane::CENTER.left(), Lane::LEFT);
        assert_eq!(Lane::CENTER.right(), Lane::RIGHT);
    }

    #[test]
    fn test_direct_set_clamps() {
        assert_eq!(LaneInput::Set(-4).apply(Lane::CENTER), Lane::LEFT);
        assert_eq!(LaneInput::Set(9).apply(Lane::CENTER), Lane::RIGHT);
        assert_eq!(LaneInput::Set(1).apply(Lane::LEFT), Lane::CENTER);
    }
}
