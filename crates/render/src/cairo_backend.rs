//! Replays a [`Drawing`] onto a Cairo context, with Pango for text.

use cairo::Context;
use pango::FontDescription;
use pangocairo::functions::{create_context, create_layout, show_layout};
use sensor_panel_types::Color;
use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fs::File;

use crate::drawing::{ClipShape, Drawing, Primitive, Rect};
use crate::text::TextMetrics;

/// Font family used for every label
pub const DEFAULT_FONT_FAMILY: &str = "Sans";

// Thread-local icon cache (Cairo surfaces aren't thread-safe)
thread_local! {
    static ICON_CACHE: RefCell<HashMap<String, Option<cairo::ImageSurface>>> =
        RefCell::new(HashMap::new());
}

/// Load a PNG once per thread; failures are logged once and remembered
fn cached_icon(path: &str) -> Option<cairo::ImageSurface> {
    ICON_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .entry(path.to_string())
            .or_insert_with(|| {
                let loaded = File::open(path)
                    .map_err(|e| e.to_string())
                    .and_then(|mut file| {
                        cairo::ImageSurface::create_from_png(&mut file).map_err(|e| e.to_string())
                    });
                match loaded {
                    Ok(surface) => Some(surface),
                    Err(e) => {
                        log::warn!("Failed to load icon {}: {}", path, e);
                        None
                    }
                }
            })
            .clone()
    })
}

fn font(family: &str, size: f64) -> FontDescription {
    let mut desc = FontDescription::new();
    desc.set_family(family);
    desc.set_absolute_size(size.max(0.0) * pango::SCALE as f64);
    desc
}

/// [`TextMetrics`] backed by the Pango font in use on screen
pub struct PangoMetrics {
    context: pango::Context,
    family: String,
}

impl PangoMetrics {
    pub fn new(cr: &Context, family: &str) -> Self {
        Self {
            context: create_context(cr),
            family: family.to_string(),
        }
    }

    fn font_metrics(&self, size: f64) -> pango::FontMetrics {
        self.context
            .metrics(Some(&font(&self.family, size)), None)
    }
}

impl TextMetrics for PangoMetrics {
    fn width(&self, text: &str, size: f64) -> f64 {
        if size <= 0.0 {
            return 0.0;
        }
        let layout = pango::Layout::new(&self.context);
        layout.set_font_description(Some(&font(&self.family, size)));
        layout.set_text(text);
        layout.size().0 as f64 / pango::SCALE as f64
    }

    fn ascent(&self, size: f64) -> f64 {
        if size <= 0.0 {
            return 0.0;
        }
        self.font_metrics(size).ascent() as f64 / pango::SCALE as f64
    }

    fn descent(&self, size: f64) -> f64 {
        if size <= 0.0 {
            return 0.0;
        }
        self.font_metrics(size).descent() as f64 / pango::SCALE as f64
    }
}

fn usable(rect: &Rect) -> bool {
    rect.width > 0.0 && rect.height > 0.0 && rect.width.is_finite() && rect.height.is_finite()
}

fn rounded_rectangle(cr: &Context, rect: &Rect, radius: f64) {
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (x, y, width, height) = (rect.x, rect.y, rect.width, rect.height);

    cr.new_path();
    cr.arc(x + radius, y + radius, radius, PI, 3.0 * PI / 2.0);
    cr.arc(x + width - radius, y + radius, radius, 3.0 * PI / 2.0, 0.0);
    cr.arc(x + width - radius, y + height - radius, radius, 0.0, PI / 2.0);
    cr.arc(x + radius, y + height - radius, radius, PI / 2.0, PI);
    cr.close_path();
}

/// Wedge of the ellipse inscribed in `rect`. Angles are counter-clockwise
/// on screen, which is the negative direction in Cairo's y-down space.
fn pie(cr: &Context, rect: &Rect, start_deg: f64, sweep_deg: f64) -> Result<(), cairo::Error> {
    let center = rect.center();
    let from = -start_deg.to_radians();
    let to = -(start_deg + sweep_deg).to_radians();

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.scale(rect.width / 2.0, rect.height / 2.0);
    cr.new_path();
    cr.move_to(0.0, 0.0);
    if sweep_deg >= 0.0 {
        cr.arc_negative(0.0, 0.0, 1.0, from, to);
    } else {
        cr.arc(0.0, 0.0, 1.0, from, to);
    }
    cr.close_path();
    cr.restore()?;
    Ok(())
}

fn ellipse(cr: &Context, rect: &Rect) -> Result<(), cairo::Error> {
    let center = rect.center();
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.scale(rect.width / 2.0, rect.height / 2.0);
    cr.new_path();
    cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    cr.close_path();
    cr.restore()?;
    Ok(())
}

fn fill(cr: &Context, color: &Color) -> Result<(), cairo::Error> {
    color.apply_to_cairo(cr);
    cr.fill()
}

fn show_text(cr: &Context, family: &str, text: &str, x: f64, y: f64, size: f64) {
    if size <= 0.0 {
        return;
    }
    let layout = create_layout(cr);
    layout.set_font_description(Some(&font(family, size)));
    layout.set_text(text);

    // Pango draws from the top-left; primitives carry the baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    cr.move_to(x, y - baseline);
    show_layout(cr, &layout);
}

fn icon(cr: &Context, path: &str, rect: &Rect) -> Result<(), cairo::Error> {
    let Some(surface) = cached_icon(path) else {
        return Ok(());
    };
    if surface.width() <= 0 || surface.height() <= 0 || !usable(rect) {
        return Ok(());
    }

    cr.save()?;
    cr.translate(rect.x, rect.y);
    cr.scale(
        rect.width / surface.width() as f64,
        rect.height / surface.height() as f64,
    );
    cr.set_source_surface(&surface, 0.0, 0.0)?;
    cr.source().set_filter(cairo::Filter::Bilinear);
    cr.paint()?;
    cr.restore()
}

/// Paint `drawing` onto `cr` in order
pub fn replay(cr: &Context, drawing: &Drawing, family: &str) -> Result<(), cairo::Error> {
    cr.set_antialias(cairo::Antialias::Best);

    for primitive in drawing {
        match primitive {
            Primitive::FillPie {
                rect,
                start_deg,
                sweep_deg,
                color,
            } => {
                if usable(rect) && *sweep_deg != 0.0 {
                    pie(cr, rect, *start_deg, *sweep_deg)?;
                    fill(cr, color)?;
                }
            }
            Primitive::FillEllipse { rect, color } => {
                if usable(rect) {
                    ellipse(cr, rect)?;
                    fill(cr, color)?;
                }
            }
            Primitive::FillRect { rect, color } => {
                cr.new_path();
                cr.rectangle(rect.x, rect.y, rect.width, rect.height);
                fill(cr, color)?;
            }
            Primitive::StrokeRoundedRect {
                rect,
                radius,
                line_width,
                color,
            } => {
                rounded_rectangle(cr, rect, *radius);
                color.apply_to_cairo(cr);
                cr.set_line_width(*line_width);
                cr.stroke()?;
            }
            Primitive::StrokeLine {
                from,
                to,
                line_width,
                color,
            } => {
                cr.new_path();
                cr.move_to(from.x, from.y);
                cr.line_to(to.x, to.y);
                color.apply_to_cairo(cr);
                cr.set_line_width(*line_width);
                cr.set_line_cap(cairo::LineCap::Square);
                cr.stroke()?;
            }
            Primitive::Text {
                text,
                origin,
                size,
                color,
            } => {
                color.apply_to_cairo(cr);
                show_text(cr, family, text, origin.x, origin.y, *size);
            }
            Primitive::Icon { path, rect } => icon(cr, path, rect)?,
            Primitive::PushClip(shape) => {
                cr.save()?;
                match shape {
                    ClipShape::Rect(rect) => {
                        cr.new_path();
                        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
                    }
                    ClipShape::RoundedRect { rect, radius } => {
                        rounded_rectangle(cr, rect, *radius);
                    }
                }
                cr.clip();
            }
            Primitive::PopClip => cr.restore()?,
        }
    }

    Ok(())
}
