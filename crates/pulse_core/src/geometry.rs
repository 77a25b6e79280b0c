//! Geometry primitives
//!
//! Rectangles are viewport-relative unless a surface documents otherwise:
//! `y` is the distance from the viewport's top edge to the element's top
//! edge, so a negative `y` means the element has scrolled past the top.

/// A 2D point in surface coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Center of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Translate vertically (used by surfaces to map document coordinates
    /// into viewport coordinates)
    pub fn translated_y(&self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, -500.0, 100.0, 2000.0);
        assert_eq!(rect.top(), -500.0);
        assert_eq!(rect.bottom(), 1500.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
    }

    #[test]
    fn test_rect_translated_y() {
        let rect = Rect::new(0.0, 300.0, 50.0, 50.0);
        let shifted = rect.translated_y(-400.0);
        assert_eq!(shifted.top(), -100.0);
        assert_eq!(shifted.width, 50.0);
    }
}
