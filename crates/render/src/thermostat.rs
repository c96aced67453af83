//! Thermometer: a bulb and tube whose red fill rises with the value.

use sensor_panel_core::ChannelSnapshot;
use sensor_panel_types::{Color, ThermostatConfig};

use crate::drawing::{ClipShape, Drawing, Point, Primitive, Rect, Size};
use crate::geometry::snapshot_fraction;
use crate::renderable::FigureStyle;
use crate::text::{fit_font_to_width, TextMetrics};

/// Derived outline geometry, all in pixels
#[derive(Debug, Clone, Copy)]
struct Outline {
    diameter: f64,
    radius: f64,
    wall: f64,
    left_x: f64,
    right_x: f64,
    tube_top: f64,
    tube_bottom: f64,
    cap_diameter: f64,
}

impl Outline {
    fn new(config: &ThermostatConfig, frame: Size) -> Self {
        let w = frame.width;
        let diameter = w * config.bulb_ratio;
        let radius = diameter / 2.0;
        let wall = w * config.wall_ratio;
        // angle from the horizontal up to where the bulb arc ends
        let cos = ((config.bulb_sweep_deg - 180.0) / 2.0).to_radians().cos();
        let cap_diameter = (diameter * cos).round();

        Self {
            diameter,
            radius,
            wall,
            left_x: w / 2.0 - cos * radius + wall / 2.0,
            right_x: w / 2.0 + cos * radius - wall / 2.0,
            tube_top: cap_diameter / 2.0,
            tube_bottom: frame.height - radius,
            cap_diameter,
        }
    }

    fn bulb_interior(&self, frame: Size) -> Rect {
        Rect::square(
            frame.width / 2.0 - self.radius + self.wall,
            frame.height - self.diameter + self.wall,
            self.diameter - self.wall * 2.0,
        )
    }

    fn cap_interior(&self, frame: Size) -> Rect {
        Rect::square(
            frame.width / 2.0 - self.cap_diameter / 2.0 + self.wall,
            self.wall,
            self.cap_diameter - self.wall * 2.0,
        )
    }
}

/// Top edge of the fill for `fraction`
pub fn fill_line(frame: Size, wall: f64, fraction: f64) -> f64 {
    wall + (1.0 - fraction) * (frame.height - wall * 2.0)
}

pub fn draw(
    config: &ThermostatConfig,
    style: &FigureStyle,
    frame: Size,
    snapshot: &ChannelSnapshot,
    metrics: &dyn TextMetrics,
) -> Drawing {
    let mut drawing = style.begin(frame);
    let (w, h) = (frame.width, frame.height);
    let o = Outline::new(config, frame);

    // bulb, an upside-down open arc
    drawing.push(Primitive::FillPie {
        rect: Rect::square(w / 2.0 - o.radius, h - o.diameter, o.diameter),
        start_deg: -(config.bulb_sweep_deg / 2.0 + 90.0),
        sweep_deg: config.bulb_sweep_deg,
        color: config.outline,
    });

    for x in [o.left_x, o.right_x] {
        drawing.push(Primitive::StrokeLine {
            from: Point::new(x, o.tube_top),
            to: Point::new(x, o.tube_bottom),
            line_width: o.wall,
            color: config.outline,
        });
    }

    drawing.push(Primitive::FillEllipse {
        rect: o.bulb_interior(frame),
        color: style.background,
    });

    // rounded cap closing the top of the tube
    drawing.push(Primitive::FillPie {
        rect: Rect::square(w / 2.0 - o.cap_diameter / 2.0, 0.0, o.cap_diameter),
        start_deg: 0.0,
        sweep_deg: 180.0,
        color: config.outline,
    });
    drawing.push(Primitive::FillPie {
        rect: o.cap_interior(frame),
        start_deg: 0.0,
        sweep_deg: 180.0,
        color: style.background,
    });

    let fraction = snapshot_fraction(snapshot, style.fraction_policy);
    let top = fill_line(frame, o.wall, fraction);
    drawing.push(Primitive::PushClip(ClipShape::Rect(Rect::new(0.0, top, w, h))));
    drawing.push(Primitive::FillEllipse {
        rect: o.bulb_interior(frame),
        color: config.fill,
    });
    drawing.push(Primitive::FillRect {
        rect: Rect::new(
            o.left_x + o.wall / 2.0,
            o.tube_top,
            o.cap_diameter - o.wall * 2.0,
            h - o.diameter,
        ),
        color: config.fill,
    });
    drawing.push(Primitive::FillPie {
        rect: o.cap_interior(frame),
        start_deg: 0.0,
        sweep_deg: 180.0,
        color: config.fill,
    });
    drawing.push(Primitive::PopClip);

    let label = snapshot.unit.decorate(&snapshot.rounded_display(), false);
    let size = fit_font_to_width(metrics, &format!("{}0", label), o.diameter - o.wall);
    drawing.push(Primitive::Text {
        origin: Point::new(
            w / 2.0 - metrics.width(&label, size) / 2.0,
            h - o.radius + metrics.ascent(size) / 3.0,
        ),
        text: label,
        size,
        color: Color::WHITE,
    });

    if let Some(icon) = &config.icon {
        let icon_size = w * config.icon_ratio;
        drawing.push(Primitive::Icon {
            path: icon.clone(),
            rect: Rect::square(w - icon_size, 0.0, icon_size),
        });
    }

    drawing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMetrics;
    use sensor_panel_types::{ChannelBounds, DisplayFormat, FractionPolicy, Unit};

    const FRAME: Size = Size::new(200.0, 400.0);

    fn snapshot(value: f64) -> ChannelSnapshot {
        ChannelSnapshot {
            value,
            bounds: ChannelBounds::new(60.0, 110.0, 60.0, 105.0),
            unit: Unit::Fahrenheit,
            display: DisplayFormat::Integer,
        }
    }

    fn clip_top(drawing: &Drawing) -> f64 {
        drawing
            .iter()
            .find_map(|p| match p {
                Primitive::PushClip(ClipShape::Rect(rect)) => Some(rect.y),
                _ => None,
            })
            .unwrap()
    }

    fn draw_with(value: f64, policy: FractionPolicy) -> Drawing {
        let style = FigureStyle {
            fraction_policy: policy,
            ..FigureStyle::default()
        };
        draw(
            &ThermostatConfig::default(),
            &style,
            FRAME,
            &snapshot(value),
            &MonospaceMetrics,
        )
    }

    #[test]
    fn test_fill_line_tracks_fraction() {
        let wall = 200.0 * 0.035;
        let empty = clip_top(&draw_with(60.0, FractionPolicy::Preserve));
        let half = clip_top(&draw_with(85.0, FractionPolicy::Preserve));
        let full = clip_top(&draw_with(110.0, FractionPolicy::Preserve));
        assert!((empty - (400.0 - wall)).abs() < 1e-9);
        assert!((half - 200.0).abs() < 1e-9);
        assert!((full - wall).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_per_policy() {
        let wall = 200.0 * 0.035;
        let over = clip_top(&draw_with(135.0, FractionPolicy::Preserve));
        assert!(over < wall);
        let over = clip_top(&draw_with(135.0, FractionPolicy::Clamp));
        assert!((over - wall).abs() < 1e-9);

        let under = clip_top(&draw_with(35.0, FractionPolicy::Preserve));
        assert!(under > 400.0 - wall);
        let under = clip_top(&draw_with(35.0, FractionPolicy::Clamp));
        assert!((under - (400.0 - wall)).abs() < 1e-9);
    }

    #[test]
    fn test_outline_drawn_in_full_regardless_of_value() {
        let low = draw_with(60.0, FractionPolicy::Preserve);
        let high = draw_with(110.0, FractionPolicy::Preserve);
        let outline = |d: &Drawing| -> Vec<Primitive> {
            d.iter()
                .take_while(|p| !matches!(p, Primitive::PushClip(_)))
                .cloned()
                .collect()
        };
        assert_eq!(outline(&low), outline(&high));
        assert!(low.clips_balanced());
    }

    #[test]
    fn test_tube_walls() {
        let drawing = draw_with(80.0, FractionPolicy::Preserve);
        let lines: Vec<(Point, Point)> = drawing
            .iter()
            .filter_map(|p| match p {
                Primitive::StrokeLine { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        let (left, right) = (lines[0], lines[1]);
        // symmetric about the centre line
        assert!((left.0.x + right.0.x - 200.0).abs() < 1e-9);
        assert_eq!(left.1.y, 400.0 - 200.0 * 0.73 / 2.0);
    }

    #[test]
    fn test_label_has_unit() {
        let drawing = draw_with(91.4, FractionPolicy::Preserve);
        let (text, _, size) = drawing.texts().next().unwrap();
        assert_eq!(text, "91°F");
        let wall = 200.0 * 0.035;
        let available = 200.0 * 0.73 - wall;
        assert!((MonospaceMetrics.width("91°F0", size) - available).abs() < 1e-9);
    }
}
