//! Backend-neutral vector drawing produced by the figures.
//!
//! Coordinates are pixels with the origin at the top-left and y growing
//! downwards. Angles are degrees counter-clockwise from 3 o'clock; a
//! negative sweep runs clockwise.

use sensor_panel_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` with its top-left corner at (`x`, `y`)
    pub const fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Region later primitives are restricted to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipShape {
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled wedge of the ellipse inscribed in `rect`
    FillPie {
        rect: Rect,
        start_deg: f64,
        sweep_deg: f64,
        color: Color,
    },
    FillEllipse {
        rect: Rect,
        color: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRoundedRect {
        rect: Rect,
        radius: f64,
        line_width: f64,
        color: Color,
    },
    StrokeLine {
        from: Point,
        to: Point,
        line_width: f64,
        color: Color,
    },
    /// `origin` is the left end of the text baseline
    Text {
        text: String,
        origin: Point,
        size: f64,
        color: Color,
    },
    /// Image file scaled into `rect`
    Icon {
        path: String,
        rect: Rect,
    },
    PushClip(ClipShape),
    PopClip,
}

/// Ordered list of primitives; later ones paint over earlier ones
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    primitives: Vec<Primitive>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }

    /// Every text primitive as `(text, origin, size)`
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, f64)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text {
                text, origin, size, ..
            } => Some((text.as_str(), *origin, *size)),
            _ => None,
        })
    }

    /// Whether every `PushClip` has a matching `PopClip`
    pub fn clips_balanced(&self) -> bool {
        let mut depth = 0i32;
        for p in &self.primitives {
            match p {
                Primitive::PushClip(_) => depth += 1,
                Primitive::PopClip => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_balance() {
        let mut drawing = Drawing::new();
        assert!(drawing.clips_balanced());
        drawing.push(Primitive::PushClip(ClipShape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0))));
        assert!(!drawing.clips_balanced());
        drawing.push(Primitive::PopClip);
        assert!(drawing.clips_balanced());
        drawing.push(Primitive::PopClip);
        assert!(!drawing.clips_balanced());
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::square(10.0, 20.0, 30.0);
        assert_eq!(rect.center(), Point::new(25.0, 35.0));
    }
}
