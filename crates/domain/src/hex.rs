//! Flat-top, offset-column hex grid math.
//!
//! All functions are pure: identical inputs always produce identical pixel
//! output, so map layout can be asserted against fixed fixtures. Columns and
//! rows are zero-based; even columns sit half a cell lower than odd ones.

use std::f64::consts::PI;

use serde::Serialize;

/// Default hex horizontal radius in pixels.
pub const HEX_RADIUS: f64 = 100.0;

/// Fraction of the radius at which orbiting markers circle their hex center.
const ORBIT_FACTOR: f64 = 0.55;

/// Geometry of a hex grid with a fixed horizontal radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    radius: f64,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(HEX_RADIUS)
    }
}

impl HexLayout {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Hex width (corner to corner).
    pub fn width(&self) -> f64 {
        2.0 * self.radius
    }

    /// Hex height (edge to edge).
    pub fn height(&self) -> f64 {
        2.0 * (self.radius.powi(2) - (self.radius / 2.0).powi(2)).sqrt()
    }

    /// Half the hex height.
    pub fn vertical_radius(&self) -> f64 {
        self.height() / 2.0
    }

    /// Distance of orbiting markers from the center of their hex.
    pub fn orbiting_distance(&self) -> f64 {
        ORBIT_FACTOR * self.radius
    }

    /// Pixel center of the cell at `column`, `row`.
    pub fn hex_center(&self, column: u32, row: u32) -> PixelPoint {
        let vertical_offset = if column % 2 == 0 {
            self.vertical_radius()
        } else {
            0.0
        };

        PixelPoint {
            x: (0.75 * self.width() * f64::from(column) + self.radius).floor() as i64,
            y: (self.height() * f64::from(row) + self.vertical_radius() + vertical_offset).floor()
                as i64,
        }
    }

    /// Radial offset and tooltip anchor for the marker at `index` among
    /// `count` markers sharing a hex.
    ///
    /// Index 0 is the system marker itself: centered, no offset. Orbiting
    /// indices 1..count-1 are spread evenly over a circle with count-1
    /// divisions.
    pub fn orbit_offset(&self, count: usize, index: usize) -> RadialOffset {
        if index == 0 || count < 2 {
            return RadialOffset {
                dx: 0.0,
                dy: 0.0,
                anchor: MarkerAnchor::Center,
            };
        }

        let step = (2.0 * PI) / (count - 1) as f64;
        let angle = index as f64 * step;

        RadialOffset {
            dx: angle.cos() * self.orbiting_distance(),
            dy: angle.sin() * self.orbiting_distance(),
            anchor: MarkerAnchor::from_angle(angle),
        }
    }

    /// Pixel width of a scene spanning `columns` cells.
    pub fn scene_width(&self, columns: u32) -> i64 {
        (0.75 * self.width() * f64::from(columns) + 0.25 * self.width()).floor() as i64
    }

    /// Pixel height of a scene spanning `rows` cells.
    pub fn scene_height(&self, rows: u32) -> i64 {
        ((f64::from(rows) + 1.0) * self.height()).floor() as i64
    }
}

/// A floored pixel coordinate on the scene canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    /// Apply a fractional offset and floor back to whole pixels.
    pub fn offset_by(&self, dx: f64, dy: f64) -> PixelPoint {
        PixelPoint {
            x: (self.x as f64 + dx).floor() as i64,
            y: (self.y as f64 + dy).floor() as i64,
        }
    }
}

/// Tooltip anchor of a map marker relative to its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerAnchor {
    Center,
    Right,
    Bottom,
    Left,
    Top,
}

impl MarkerAnchor {
    /// Eight equal wedges collapsed onto the four cardinal anchors; angles
    /// past 7/4 pi wrap back to the right-hand wedge.
    fn from_angle(angle: f64) -> Self {
        if angle <= 0.25 * PI {
            Self::Right
        } else if angle <= 0.75 * PI {
            Self::Bottom
        } else if angle <= 1.25 * PI {
            Self::Left
        } else if angle <= 1.75 * PI {
            Self::Top
        } else {
            Self::Right
        }
    }
}

/// Offset of an orbiting marker from its hex center, plus tooltip anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialOffset {
    pub dx: f64,
    pub dy: f64,
    pub anchor: MarkerAnchor,
}

impl RadialOffset {
    pub fn magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_constants_derive_from_radius() {
        let layout = HexLayout::default();
        assert!((layout.width() - 200.0).abs() < EPSILON);
        assert!((layout.height() - 2.0 * 7500f64.sqrt()).abs() < EPSILON);
        assert!((layout.orbiting_distance() - 55.0).abs() < EPSILON);
    }

    #[test]
    fn test_hex_center_is_deterministic() {
        let layout = HexLayout::default();
        assert_eq!(layout.hex_center(3, 11), layout.hex_center(3, 11));
    }

    #[test]
    fn test_hex_center_staggers_even_columns_down() {
        let layout = HexLayout::default();
        let vr = layout.vertical_radius().floor() as i64;

        // 4x4 swatch: even columns carry one extra vertical radius.
        for row in 0..4u32 {
            for column in 0..4u32 {
                let center = layout.hex_center(column, row);
                let base = (layout.height() * f64::from(row) + layout.vertical_radius()).floor()
                    as i64;
                if column % 2 == 0 {
                    assert!(
                        (center.y - base - vr).abs() <= 1,
                        "even column {column} row {row} should sit ~one VR lower"
                    );
                } else {
                    assert_eq!(center.y, base, "odd column {column} row {row}");
                }
            }
        }
    }

    #[test]
    fn test_hex_center_known_cells() {
        let layout = HexLayout::default();
        assert_eq!(layout.hex_center(0, 0), PixelPoint { x: 100, y: 173 });
        assert_eq!(layout.hex_center(1, 0), PixelPoint { x: 250, y: 86 });
    }

    #[test]
    fn test_orbit_offset_center_marker() {
        let layout = HexLayout::default();
        let offset = layout.orbit_offset(5, 0);
        assert_eq!(offset.dx, 0.0);
        assert_eq!(offset.dy, 0.0);
        assert_eq!(offset.anchor, MarkerAnchor::Center);
    }

    #[test]
    fn test_orbit_offsets_are_evenly_spaced() {
        let layout = HexLayout::default();
        let count = 5;
        let step = 2.0 * PI / (count - 1) as f64;

        for index in 1..count {
            let offset = layout.orbit_offset(count, index);
            let angle = index as f64 * step;
            assert!((offset.dx - angle.cos() * 55.0).abs() < EPSILON);
            assert!((offset.dy - angle.sin() * 55.0).abs() < EPSILON);
            assert!((offset.magnitude() - 55.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_orbit_anchor_wedges() {
        let layout = HexLayout::default();
        // 9 markers -> 8 divisions of pi/4 each.
        let anchors: Vec<MarkerAnchor> = (1..9)
            .map(|index| layout.orbit_offset(9, index).anchor)
            .collect();
        assert_eq!(
            anchors,
            vec![
                MarkerAnchor::Right,  // pi/4
                MarkerAnchor::Bottom, // pi/2
                MarkerAnchor::Bottom, // 3pi/4
                MarkerAnchor::Left,   // pi
                MarkerAnchor::Left,   // 5pi/4
                MarkerAnchor::Top,    // 3pi/2
                MarkerAnchor::Top,    // 7pi/4
                MarkerAnchor::Right,  // 2pi wraps around
            ]
        );
    }

    #[test]
    fn test_scene_dimensions() {
        let layout = HexLayout::default();
        assert_eq!(layout.scene_width(2), 350);
        assert_eq!(layout.scene_width(8), 1250);
        assert_eq!(layout.scene_height(1), (2.0 * layout.height()).floor() as i64);
        assert_eq!(layout.scene_height(1), 346);
    }

    #[test]
    fn test_pixel_offset_floors() {
        let point = PixelPoint { x: 100, y: 173 };
        let shifted = point.offset_by(-0.5, 54.9);
        assert_eq!(shifted, PixelPoint { x: 99, y: 227 });
    }
}
