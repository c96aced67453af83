//! Vertical rounded bar with a percent label that dodges the fill edge.

use sensor_panel_core::ChannelSnapshot;
use sensor_panel_types::{BarConfig, Color};

use crate::drawing::{ClipShape, Drawing, Point, Primitive, Rect, Size};
use crate::geometry::{percent_label, snapshot_fraction};
use crate::renderable::FigureStyle;
use crate::text::{fit_font_to_width, TextMetrics};

/// Widest label the font is sized for
const LABEL_SAMPLE: &str = "100%";

/// Top of the fill for `fraction`, and the baseline of the percent label
pub fn fill_geometry(config: &BarConfig, frame: Size, ascent: f64, fraction: f64) -> (f64, f64) {
    let border = config.separation + config.thickness / 2.0;
    let interior = frame.height - border * 2.0 - ascent;
    let fill_y = border + interior * (1.0 - fraction);
    // above half the label sits inside the fill, otherwise just over it
    let label_y = if fraction > 0.5 {
        fill_y + ascent
    } else {
        fill_y - ascent / 3.0
    };
    (fill_y, label_y)
}

pub fn draw(
    config: &BarConfig,
    style: &FigureStyle,
    frame: Size,
    snapshot: &ChannelSnapshot,
    metrics: &dyn TextMetrics,
) -> Drawing {
    let mut drawing = style.begin(frame);
    let (w, h) = (frame.width, frame.height);
    let border = config.separation + config.thickness / 2.0;

    let size = fit_font_to_width(metrics, LABEL_SAMPLE, w - border * 2.0);
    let ascent = metrics.ascent(size);
    let fraction = snapshot_fraction(snapshot, style.fraction_policy);
    let (fill_y, label_y) = fill_geometry(config, frame, ascent, fraction);

    let outline = Rect::new(
        config.separation,
        config.separation,
        w - config.separation * 2.0,
        h - config.separation * 2.0 - ascent,
    );
    let radius = config.roundness / 2.0;

    drawing.push(Primitive::PushClip(ClipShape::RoundedRect {
        rect: outline,
        radius,
    }));
    drawing.push(Primitive::FillRect {
        rect: Rect::new(0.0, fill_y, w, h),
        color: config.fill,
    });
    drawing.push(Primitive::PopClip);

    let percent = percent_label(fraction);
    drawing.push(Primitive::Text {
        origin: Point::new(w / 2.0 - metrics.width(&percent, size) / 2.0, label_y),
        text: percent,
        size,
        color: Color::WHITE,
    });

    drawing.push(Primitive::Text {
        text: config.title.clone(),
        origin: Point::new(w / 2.0 - metrics.width(&config.title, size) / 2.0, h),
        size,
        color: Color::WHITE,
    });

    drawing.push(Primitive::StrokeRoundedRect {
        rect: outline,
        radius,
        line_width: config.thickness,
        color: config.outline,
    });

    drawing
}
