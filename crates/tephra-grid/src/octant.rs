//! Compass-octant classification of wind vectors.

use std::fmt;

/// One of the 8 compass directions a cell's wind vector can point to.
///
/// Each octant names the unique grid-adjacent neighbour that receives
/// the transported share of a cell's concentration. Rows ascend
/// northward, so North is `(+1, 0)` in `(row, col)` offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Octant {
    /// (337.5°, 360°] ∪ [0°, 22.5°] → neighbour (+1, 0).
    North,
    /// (22.5°, 67.5°] → neighbour (+1, +1).
    NorthEast,
    /// (67.5°, 112.5°] → neighbour (0, +1).
    East,
    /// (112.5°, 157.5°] → neighbour (−1, +1).
    SouthEast,
    /// (157.5°, 202.5°] → neighbour (−1, 0).
    South,
    /// (202.5°, 247.5°] → neighbour (−1, −1).
    SouthWest,
    /// (247.5°, 292.5°] → neighbour (0, −1).
    West,
    /// (292.5°, 337.5°] → neighbour (+1, −1).
    NorthWest,
}

impl Octant {
    /// All octants in classification-code order (1..=8).
    pub const ALL: [Octant; 8] = [
        Octant::North,
        Octant::NorthEast,
        Octant::East,
        Octant::SouthEast,
        Octant::South,
        Octant::SouthWest,
        Octant::West,
        Octant::NorthWest,
    ];

    /// Classify a wind vector into its destination octant.
    ///
    /// The bearing is `atan2(u, v)` normalized to [0°, 360°), with
    /// 45°-wide octants centred on the 8 compass bearings. A calm cell
    /// (`u == 0 && v == 0`) has no preferred direction and returns
    /// `None`.
    pub fn classify(u: f64, v: f64) -> Option<Octant> {
        if u == 0.0 && v == 0.0 {
            return None;
        }
        let mut degrees = u.atan2(v).to_degrees();
        if degrees < 0.0 {
            degrees += 360.0;
        }
        Some(Self::from_degrees(degrees))
    }

    /// Octant for a bearing in degrees, [0, 360).
    pub fn from_degrees(degrees: f64) -> Octant {
        if degrees > 337.5 || degrees <= 22.5 {
            Octant::North
        } else if degrees <= 67.5 {
            Octant::NorthEast
        } else if degrees <= 112.5 {
            Octant::East
        } else if degrees <= 157.5 {
            Octant::SouthEast
        } else if degrees <= 202.5 {
            Octant::South
        } else if degrees <= 247.5 {
            Octant::SouthWest
        } else if degrees <= 292.5 {
            Octant::West
        } else {
            Octant::NorthWest
        }
    }

    /// `(row, col)` offset of the destination neighbour.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Octant::North => (1, 0),
            Octant::NorthEast => (1, 1),
            Octant::East => (0, 1),
            Octant::SouthEast => (-1, 1),
            Octant::South => (-1, 0),
            Octant::SouthWest => (-1, -1),
            Octant::West => (0, -1),
            Octant::NorthWest => (1, -1),
        }
    }

    /// Whether the destination neighbour is diagonal.
    pub fn is_diagonal(self) -> bool {
        let (dr, dc) = self.offset();
        dr != 0 && dc != 0
    }

    /// Classification code 1..=8 (N=1, NE=2, … NW=8).
    pub fn code(self) -> u8 {
        match self {
            Octant::North => 1,
            Octant::NorthEast => 2,
            Octant::East => 3,
            Octant::SouthEast => 4,
            Octant::South => 5,
            Octant::SouthWest => 6,
            Octant::West => 7,
            Octant::NorthWest => 8,
        }
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Octant::North => "N",
            Octant::NorthEast => "NE",
            Octant::East => "E",
            Octant::SouthEast => "SE",
            Octant::South => "S",
            Octant::SouthWest => "SW",
            Octant::West => "W",
            Octant::NorthWest => "NW",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cardinal_winds() {
        // Pure northward wind (v > 0) blows mass into the northern neighbour.
        assert_eq!(Octant::classify(0.0, 10.0), Some(Octant::North));
        assert_eq!(Octant::classify(10.0, 0.0), Some(Octant::East));
        assert_eq!(Octant::classify(0.0, -10.0), Some(Octant::South));
        assert_eq!(Octant::classify(-10.0, 0.0), Some(Octant::West));
    }

    #[test]
    fn diagonal_winds() {
        assert_eq!(Octant::classify(10.0, 10.0), Some(Octant::NorthEast));
        assert_eq!(Octant::classify(10.0, -10.0), Some(Octant::SouthEast));
        assert_eq!(Octant::classify(-10.0, -10.0), Some(Octant::SouthWest));
        assert_eq!(Octant::classify(-10.0, 10.0), Some(Octant::NorthWest));
    }

    #[test]
    fn calm_has_no_direction() {
        assert_eq!(Octant::classify(0.0, 0.0), None);
    }

    #[test]
    fn boundary_angles_fall_in_lower_octant() {
        // Boundaries are half-open: 22.5° still counts as North.
        assert_eq!(Octant::from_degrees(22.5), Octant::North);
        assert_eq!(Octant::from_degrees(22.500001), Octant::NorthEast);
        assert_eq!(Octant::from_degrees(337.5), Octant::NorthWest);
        assert_eq!(Octant::from_degrees(337.500001), Octant::North);
        assert_eq!(Octant::from_degrees(0.0), Octant::North);
    }

    #[test]
    fn codes_cover_one_through_eight() {
        let codes: Vec<u8> = Octant::ALL.iter().map(|o| o.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn offsets_are_distinct_unit_neighbours() {
        let mut seen = std::collections::HashSet::new();
        for o in Octant::ALL {
            let (dr, dc) = o.offset();
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
            assert!((dr, dc) != (0, 0));
            assert!(seen.insert((dr, dc)));
        }
    }

    proptest! {
        #[test]
        fn every_nonzero_vector_classifies(u in -50.0f64..50.0, v in -50.0f64..50.0) {
            prop_assume!(u != 0.0 || v != 0.0);
            let octant = Octant::classify(u, v);
            prop_assert!(octant.is_some());
        }

        #[test]
        fn magnitude_does_not_change_octant(
            u in -50.0f64..50.0,
            v in -50.0f64..50.0,
            scale in 0.001f64..1000.0,
        ) {
            prop_assume!(u != 0.0 || v != 0.0);
            prop_assert_eq!(Octant::classify(u, v), Octant::classify(u * scale, v * scale));
        }
    }
}
