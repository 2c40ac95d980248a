//! Coordinate and dimension descriptors resolved by layouts.

/// How a descriptor value is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Unit {
    /// Fraction of the parent's content rectangle.
    #[default]
    Relative,
    /// Fraction of the whole viewport, converted to a parent fraction.
    Absolute,
    /// Device pixels, converted through the current pixel size.
    Pixels,
}

impl Unit {
    /// Converts `value` to a fraction of a parent extent.
    ///
    /// `parent_extent` is the parent's size on this axis in viewport units and
    /// `pixel_extent` is the size of one device pixel on the same axis.
    pub fn to_fraction(self, value: f32, parent_extent: f32, pixel_extent: f32) -> f32 {
        match self {
            Unit::Relative => value,
            Unit::Absolute => {
                if parent_extent > 0.0 {
                    value / parent_extent
                } else {
                    0.0
                }
            }
            Unit::Pixels => {
                if parent_extent > 0.0 {
                    value * pixel_extent / parent_extent
                } else {
                    0.0
                }
            }
        }
    }
}

/// Which point of an element a coordinate refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Center,
    End,
}

/// Anchor selection for a coordinate. The inverse variants mirror the
/// coordinate about `1.0` before anchoring, measuring from the far edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
    Center,
    InverseLeft,
    InverseRight,
    InverseTop,
    InverseBottom,
    InverseCenter,
}

impl Alignment {
    pub const ALL: [Alignment; 10] = [
        Alignment::Left,
        Alignment::Right,
        Alignment::Top,
        Alignment::Bottom,
        Alignment::Center,
        Alignment::InverseLeft,
        Alignment::InverseRight,
        Alignment::InverseTop,
        Alignment::InverseBottom,
        Alignment::InverseCenter,
    ];

    pub fn is_inverse(self) -> bool {
        matches!(
            self,
            Alignment::InverseLeft
                | Alignment::InverseRight
                | Alignment::InverseTop
                | Alignment::InverseBottom
                | Alignment::InverseCenter
        )
    }

    /// Left and top share the start anchor, right and bottom the end anchor,
    /// so a vertical alignment used on the x axis still resolves.
    pub fn anchor(self) -> Anchor {
        match self {
            Alignment::Left | Alignment::Top | Alignment::InverseLeft | Alignment::InverseTop => {
                Anchor::Start
            }
            Alignment::Right
            | Alignment::Bottom
            | Alignment::InverseRight
            | Alignment::InverseBottom => Anchor::End,
            Alignment::Center | Alignment::InverseCenter => Anchor::Center,
        }
    }

    /// Places an element of `size` at the already unit-resolved `coordinate`.
    /// Both values are parent fractions; the result is the element's start.
    pub fn place(self, coordinate: f32, size: f32) -> f32 {
        let coordinate = if self.is_inverse() {
            1.0 - coordinate
        } else {
            coordinate
        };
        match self.anchor() {
            Anchor::Start => coordinate,
            Anchor::Center => coordinate - size * 0.5,
            Anchor::End => coordinate - size,
        }
    }
}

/// Position of an element along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coordinate {
    pub value: f32,
    pub unit: Unit,
    pub alignment: Alignment,
}

impl Coordinate {
    pub const fn new(value: f32, unit: Unit, alignment: Alignment) -> Self {
        Self {
            value,
            unit,
            alignment,
        }
    }

    pub const fn relative(value: f32) -> Self {
        Self::new(value, Unit::Relative, Alignment::Left)
    }

    pub const fn absolute(value: f32) -> Self {
        Self::new(value, Unit::Absolute, Alignment::Left)
    }

    pub const fn pixels(value: f32) -> Self {
        Self::new(value, Unit::Pixels, Alignment::Left)
    }

    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Extent of an element along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimension {
    pub value: f32,
    pub unit: Unit,
}

impl Default for Dimension {
    fn default() -> Self {
        Self::relative(1.0)
    }
}

impl Dimension {
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn relative(value: f32) -> Self {
        Self::new(value, Unit::Relative)
    }

    pub const fn absolute(value: f32) -> Self {
        Self::new(value, Unit::Absolute)
    }

    pub const fn pixels(value: f32) -> Self {
        Self::new(value, Unit::Pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_convert_through_pixel_size() {
        // 100px on an 800px wide viewport inside a half-width parent.
        let fraction = Unit::Pixels.to_fraction(100.0, 0.5, 1.0 / 800.0);
        assert!((fraction - 0.25).abs() < 1e-6);
    }

    #[test]
    fn absolute_units_are_viewport_fractions() {
        assert_eq!(Unit::Absolute.to_fraction(0.25, 0.5, 0.0), 0.5);
        assert_eq!(Unit::Absolute.to_fraction(0.25, 0.0, 0.0), 0.0);
    }

    #[test]
    fn right_alignment_offsets_by_size() {
        assert_eq!(Alignment::Right.place(1.0, 0.5), 0.5);
        assert_eq!(Alignment::Center.place(0.5, 0.5), 0.25);
    }

    #[test]
    fn inverse_alignments_mirror_before_anchoring() {
        assert_eq!(Alignment::InverseLeft.place(0.25, 0.5), 0.75);
        assert_eq!(Alignment::InverseRight.place(0.0, 0.25), 0.75);
        assert_eq!(Alignment::InverseCenter.place(0.25, 0.5), 0.5);
        assert_eq!(Alignment::InverseBottom.place(0.0, 0.5), 0.5);
        for alignment in Alignment::ALL {
            let expected_inverse = matches!(
                alignment,
                Alignment::InverseLeft
                    | Alignment::InverseRight
                    | Alignment::InverseTop
                    | Alignment::InverseBottom
                    | Alignment::InverseCenter
            );
            assert_eq!(alignment.is_inverse(), expected_inverse);
        }
    }
}
