//! Fixed catalog of target slots
//!
//! The pizza only ever appears at one of these five positions.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Name of a target slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionName {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl PositionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionName::Top => "top",
            PositionName::Right => "right",
            PositionName::Bottom => "bottom",
            PositionName::Left => "left",
            PositionName::Center => "center",
        }
    }

    /// Map a `KeyboardEvent.key` value to the slot it catches.
    ///
    /// Arrow keys cover the four edges, `0` (top row or numpad) covers the center.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(PositionName::Top),
            "ArrowDown" => Some(PositionName::Bottom),
            "ArrowLeft" => Some(PositionName::Left),
            "ArrowRight" => Some(PositionName::Right),
            "0" | "Numpad0" => Some(PositionName::Center),
            _ => None,
        }
    }
}

/// A target slot with its screen placement (percent of the play area)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub name: PositionName,
    pub top_pct: f32,
    pub left_pct: f32,
}

impl Position {
    /// CSS transform that keeps edge slots inside the viewport
    pub fn anchor_transform(&self) -> &'static str {
        match self.name {
            PositionName::Left => "translate(0, -50%)",
            PositionName::Right => "translate(-100%, -50%)",
            _ => "translate(-50%, -50%)",
        }
    }
}

/// All five slots, in catalog order
pub const POSITIONS: [Position; 5] = [
    Position {
        name: PositionName::Top,
        top_pct: 10.0,
        left_pct: 50.0,
    },
    Position {
        name: PositionName::Right,
        top_pct: 50.0,
        left_pct: 97.0, // near the edge
    },
    Position {
        name: PositionName::Bottom,
        top_pct: 90.0,
        left_pct: 50.0,
    },
    Position {
        name: PositionName::Left,
        top_pct: 50.0,
        left_pct: 3.0,
    },
    Position {
        name: PositionName::Center,
        top_pct: 50.0,
        left_pct: 50.0,
    },
];

/// Look up a slot by name
pub fn position(name: PositionName) -> Position {
    match name {
        PositionName::Top => POSITIONS[0],
        PositionName::Right => POSITIONS[1],
        PositionName::Bottom => POSITIONS[2],
        PositionName::Left => POSITIONS[3],
        PositionName::Center => POSITIONS[4],
    }
}

/// Pick a slot uniformly at random (independent draws, repeats allowed)
pub fn random_position<R: Rng>(rng: &mut R) -> Position {
    POSITIONS[rng.random_range(0..POSITIONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_catalog_lookup_matches_names() {
        for pos in POSITIONS {
            assert_eq!(position(pos.name), pos);
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(PositionName::from_key("ArrowUp"), Some(PositionName::Top));
        assert_eq!(PositionName::from_key("ArrowRight"), Some(PositionName::Right));
        assert_eq!(PositionName::from_key("Numpad0"), Some(PositionName::Center));
        assert_eq!(PositionName::from_key("0"), Some(PositionName::Center));
        assert_eq!(PositionName::from_key("Enter"), None);
        assert_eq!(PositionName::from_key("1"), None);
    }

    #[test]
    fn test_edge_anchors() {
        assert_eq!(position(PositionName::Left).anchor_transform(), "translate(0, -50%)");
        assert_eq!(
            position(PositionName::Right).anchor_transform(),
            "translate(-100%, -50%)"
        );
        assert_eq!(
            position(PositionName::Center).anchor_transform(),
            "translate(-50%, -50%)"
        );
    }

    #[test]
    fn test_random_position_hits_every_slot() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(random_position(&mut rng).name);
        }
        assert_eq!(seen.len(), POSITIONS.len());
    }
}
