//! Screen-space geometry for widget placement and hit-testing.

/// Axis-aligned rectangle in terminal cell coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl Bounds {
    /// Creates new bounds.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns whether the point lies inside. Right and bottom edges are exclusive.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Anchor of a widget relative to the window along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Offset from the left/top edge.
    #[default]
    Min,
    /// Offset from the window centre.
    Centre,
    /// Offset from the right/bottom edge.
    Max,
}

impl Anchor {
    /// Computes the origin of a span of `size` cells inside `window` cells.
    #[must_use]
    pub const fn offset(self, window: i32, size: i32, offset: i32) -> i32 {
        match self {
            Self::Min => offset,
            Self::Centre => offset + window / 2 - size / 2,
            Self::Max => window - size - offset,
        }
    }
}

/// Anchored position of a widget, resolved against the window on layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal anchor.
    pub anchor_x: Anchor,
    /// Vertical anchor.
    pub anchor_y: Anchor,
    /// Horizontal offset in cells.
    pub x_offset: i32,
    /// Vertical offset in cells.
    pub y_offset: i32,
}

impl Placement {
    /// Creates new placement.
    #[must_use]
    pub const fn new(anchor_x: Anchor, anchor_y: Anchor, x_offset: i32, y_offset: i32) -> Self {
        Self {
            anchor_x,
            anchor_y,
            x_offset,
            y_offset,
        }
    }

    /// Places a widget of the given size centred on the window, shifted by the offsets.
    #[must_use]
    pub const fn centre(x_offset: i32, y_offset: i32) -> Self {
        Self::new(Anchor::Centre, Anchor::Centre, x_offset, y_offset)
    }

    /// Resolves to concrete bounds.
    #[must_use]
    pub const fn resolve(&self, window: (i32, i32), size: (i32, i32)) -> Bounds {
        Bounds::new(
            self.anchor_x.offset(window.0, size.0, self.x_offset),
            self.anchor_y.offset(window.1, size.1, self.y_offset),
            size.0,
            size.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let bounds = Bounds::new(2, 3, 4, 2);
        assert!(bounds.contains(2, 3));
        assert!(bounds.contains(5, 4));
        assert!(!bounds.contains(6, 4));
        assert!(!bounds.contains(5, 5));
        assert!(!bounds.contains(1, 3));
    }

    #[test]
    fn test_empty_bounds_contain_nothing() {
        assert!(!Bounds::default().contains(0, 0));
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(Anchor::Min.offset(80, 10, 3), 3);
        assert_eq!(Anchor::Centre.offset(80, 10, 0), 35);
        assert_eq!(Anchor::Centre.offset(80, 10, -5), 30);
        assert_eq!(Anchor::Max.offset(80, 10, 1), 69);
    }

    #[test]
    fn test_placement_resolve() {
        let placement = Placement::centre(0, -4);
        let bounds = placement.resolve((80, 24), (20, 3));
        assert_eq!(bounds, Bounds::new(30, 7, 20, 3));
    }
}
