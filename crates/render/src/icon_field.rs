//! Icon on the left, value and unit centered in the space beside it.

use sensor_panel_core::ChannelSnapshot;
use sensor_panel_types::{Color, IconFieldConfig};

use crate::drawing::{Drawing, Point, Primitive, Rect, Size};
use crate::renderable::FigureStyle;
use crate::text::{fit_font_to_box, TextMetrics};

/// Font size for `text`: the large preset when it is short enough
pub fn preset_size(config: &IconFieldConfig, frame: Size, text: &str, metrics: &dyn TextMetrics) -> f64 {
    let width = frame.width - frame.height;
    let sample = if text.chars().count() <= config.large_max_chars {
        &config.large_sample
    } else {
        &config.small_sample
    };
    fit_font_to_box(metrics, sample, width, frame.height)
}

pub fn draw(
    config: &IconFieldConfig,
    style: &FigureStyle,
    frame: Size,
    snapshot: &ChannelSnapshot,
    metrics: &dyn TextMetrics,
) -> Drawing {
    let mut drawing = style.begin(frame);
    let (w, h) = (frame.width, frame.height);

    if let Some(icon) = &config.icon {
        drawing.push(Primitive::Icon {
            path: icon.clone(),
            rect: Rect::square(0.0, 0.0, h),
        });
    }

    let text = snapshot.unit.decorate(&snapshot.rounded_display(), true);
    let size = preset_size(config, frame, &text, metrics);
    let empty = w - h - metrics.width(&text, size);
    drawing.push(Primitive::Text {
        origin: Point::new(
            h + empty / 2.0,
            (h - metrics.height(size)) / 2.0 + metrics.ascent(size),
        ),
        text,
        size,
        color: Color::WHITE,
    });

    drawing
}
