//! Grid coordinates

use core::fmt;
use serde::{Deserialize, Serialize};

/// A grid location on the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
}

impl Loc {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy)
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Approximate distance: the longer axis plus half the shorter one.
    pub fn distance(self, other: Loc) -> i32 {
        let ax = (other.x - self.x).abs();
        let ay = (other.y - self.y).abs();
        if ay > ax { ay + (ax >> 1) } else { ax + (ay >> 1) }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
