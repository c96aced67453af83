//! Ring gauge: a partial circle filled clockwise up to the value.

use sensor_panel_core::ChannelSnapshot;
use sensor_panel_types::{Color, GaugeConfig};

use crate::drawing::{Drawing, Point, Primitive, Rect, Size};
use crate::geometry::snapshot_fraction;
use crate::renderable::FigureStyle;
use crate::text::{fit_font_to_width, TextMetrics};

/// Widest value label the font is sized for
const VALUE_SAMPLE: &str = "100";

/// Unit label size relative to the value label
const UNIT_SCALE: f64 = 1.75;

/// The ring occupies an `h` x `h` square on the left; any extra width is
/// room for the icon.
pub fn draw(
    config: &GaugeConfig,
    style: &FigureStyle,
    frame: Size,
    snapshot: &ChannelSnapshot,
    metrics: &dyn TextMetrics,
) -> Drawing {
    let mut drawing = style.begin(frame);
    let h = frame.height;
    let thickness = h * config.thickness_ratio;
    let fraction = snapshot_fraction(snapshot, style.fraction_policy);

    let start = config.sweep_deg / 2.0 - 270.0;
    let angle = fraction * config.sweep_deg;
    let ring = Rect::square(0.0, 0.0, h);

    drawing.push(Primitive::FillPie {
        rect: ring,
        start_deg: start - angle,
        sweep_deg: -(config.sweep_deg - angle),
        color: Color::DARK_GRAY,
    });
    drawing.push(Primitive::FillPie {
        rect: ring,
        start_deg: start,
        sweep_deg: -angle,
        color: config.color,
    });
    drawing.push(Primitive::FillEllipse {
        rect: Rect::square(thickness, thickness, h - thickness * 2.0),
        color: style.background,
    });

    // marker where the used and unused arcs meet
    let theta = (start - angle).to_radians();
    let x = h * (1.0 + theta.cos()) / 2.0;
    let y = h * (1.0 - theta.sin()) / 2.0;
    if h > 0.0 {
        drawing.push(Primitive::FillEllipse {
            rect: Rect::square(x - thickness * x / h, y - thickness * y / h, thickness),
            color: Color::WHITE,
        });
    }

    let size = fit_font_to_width(metrics, VALUE_SAMPLE, h - thickness * 4.0);
    let value = snapshot.rounded_display();
    drawing.push(Primitive::Text {
        origin: Point::new(
            h / 2.0 - metrics.width(&value, size) / 2.0,
            h / 2.0 + metrics.ascent(size) / 3.0,
        ),
        text: value,
        size,
        color: Color::WHITE,
    });

    let unit_size = size / UNIT_SCALE;
    let unit = snapshot.unit.label();
    drawing.push(Primitive::Text {
        text: unit.to_string(),
        origin: Point::new(
            h / 2.0 - metrics.width(unit, unit_size) / 2.0,
            h - metrics.ascent(unit_size) / 4.0,
        ),
        size: unit_size,
        color: Color::WHITE,
    });

    if let Some(icon) = &config.icon {
        let icon_size = h * config.icon_ratio;
        drawing.push(Primitive::Icon {
            path: icon.clone(),
            rect: Rect::square(frame.width - icon_size, 0.0, icon_size),
        });
    }

    drawing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMetrics;
    use sensor_panel_types::{ChannelBounds, DisplayFormat, FractionPolicy, Unit};

    fn snapshot(value: f64) -> ChannelSnapshot {
        ChannelSnapshot {
            value,
            bounds: ChannelBounds::new(0.0, 100.0, 0.0, 95.0),
            unit: Unit::Percentage,
            display: DisplayFormat::Integer,
        }
    }

    fn style(policy: FractionPolicy) -> FigureStyle {
        FigureStyle {
            fraction_policy: policy,
            ..FigureStyle::default()
        }
    }

    fn pies(drawing: &Drawing) -> Vec<(f64, f64)> {
        drawing
            .iter()
            .filter_map(|p| match p {
                Primitive::FillPie {
                    start_deg,
                    sweep_deg,
                    ..
                } => Some((*start_deg, *sweep_deg)),
                _ => None,
            })
            .collect()
    }

    fn marker(drawing: &Drawing) -> Rect {
        drawing
            .iter()
            .filter_map(|p| match p {
                Primitive::FillEllipse { rect, color } if *color == Color::WHITE => Some(*rect),
                _ => None,
            })
            .next()
            .unwrap()
    }

    const FRAME: Size = Size::new(250.0, 200.0);

    #[test]
    fn test_half_full() {
        let drawing = draw(
            &GaugeConfig::default(),
            &FigureStyle::default(),
            FRAME,
            &snapshot(50.0),
            &MonospaceMetrics,
        );
        // start = 150 - 270 = -120, angle = 150
        assert_eq!(pies(&drawing), vec![(-270.0, -150.0), (-120.0, -150.0)]);
        let texts: Vec<_> = drawing.texts().map(|(t, _, _)| t.to_string()).collect();
        assert_eq!(texts, vec!["50", "%"]);
    }

    #[test]
    fn test_marker_at_top_when_half_full() {
        let drawing = draw(
            &GaugeConfig::default(),
            &FigureStyle::default(),
            FRAME,
            &snapshot(50.0),
            &MonospaceMetrics,
        );
        // theta = -270 degrees points straight up
        let dot = marker(&drawing);
        let t = 200.0 * 0.08;
        assert!((dot.x - (100.0 - t * 0.5)).abs() < 1e-9);
        assert!(dot.y.abs() < 1e-9);
        assert_eq!(dot.width, t);
    }

    #[test]
    fn test_empty_and_full() {
        let empty = draw(
            &GaugeConfig::default(),
            &FigureStyle::default(),
            FRAME,
            &snapshot(0.0),
            &MonospaceMetrics,
        );
        assert_eq!(pies(&empty), vec![(-120.0, -300.0), (-120.0, 0.0)]);

        let full = draw(
            &GaugeConfig::default(),
            &FigureStyle::default(),
            FRAME,
            &snapshot(100.0),
            &MonospaceMetrics,
        );
        assert_eq!(pies(&full), vec![(-420.0, 0.0), (-120.0, -300.0)]);
    }

    #[test]
    fn test_out_of_range_per_policy() {
        let over = snapshot(120.0);
        let preserved = draw(
            &GaugeConfig::default(),
            &style(FractionPolicy::Preserve),
            FRAME,
            &over,
            &MonospaceMetrics,
        );
        // used arc overshoots the sweep
        assert_eq!(pies(&preserved)[1], (-120.0, -360.0));

        let clamped = draw(
            &GaugeConfig::default(),
            &style(FractionPolicy::Clamp),
            FRAME,
            &over,
            &MonospaceMetrics,
        );
        assert_eq!(pies(&clamped)[1], (-120.0, -300.0));

        let under = snapshot(-10.0);
        let preserved = draw(
            &GaugeConfig::default(),
            &style(FractionPolicy::Preserve),
            FRAME,
            &under,
            &MonospaceMetrics,
        );
        assert_eq!(pies(&preserved)[1], (-120.0, 30.0));
        let clamped = draw(
            &GaugeConfig::default(),
            &style(FractionPolicy::Clamp),
            FRAME,
            &under,
            &MonospaceMetrics,
        );
        assert_eq!(pies(&clamped)[1], (-120.0, 0.0));
    }

    #[test]
    fn test_value_label_fits_inner_width() {
        let drawing = draw(
            &GaugeConfig::default(),
            &FigureStyle::default(),
            FRAME,
            &snapshot(100.0),
            &MonospaceMetrics,
        );
        let (text, origin, size) = drawing.texts().next().unwrap();
        assert_eq!(text, "100");
        let available = 200.0 - 4.0 * 200.0 * 0.08;
        assert!((MonospaceMetrics.width(text, size) - available).abs() < 1e-9);
        assert!((origin.x - (100.0 - available / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_icon_top_right() {
        let config = GaugeConfig {
            icon: Some("icons/cpu.png".to_string()),
            ..GaugeConfig::default()
        };
        let drawing = draw(&config, &FigureStyle::default(), FRAME, &snapshot(1.0), &MonospaceMetrics);
        let icon = drawing
            .iter()
            .find_map(|p| match p {
                Primitive::Icon { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert!((icon.width - 56.0).abs() < 1e-9);
        assert!((icon.x + icon.width - 250.0).abs() < 1e-9);
        assert_eq!(icon.y, 0.0);
    }
}
