//! Text measurement and font fitting.

/// Size the fitting functions measure at before scaling
pub const REFERENCE_SIZE: f64 = 100.0;

/// Font measurements a figure needs to lay out its labels
pub trait TextMetrics {
    /// Advance width of `text` at font size `size`
    fn width(&self, text: &str, size: f64) -> f64;

    /// Distance from the baseline to the top of tall glyphs
    fn ascent(&self, size: f64) -> f64;

    fn descent(&self, size: f64) -> f64;

    /// Line height
    fn height(&self, size: f64) -> f64 {
        self.ascent(size) + self.descent(size)
    }
}

/// Fixed-advance metrics that need no font backend
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl MonospaceMetrics {
    pub const ADVANCE: f64 = 0.6;
    pub const ASCENT: f64 = 0.8;
    pub const DESCENT: f64 = 0.2;
}

impl TextMetrics for MonospaceMetrics {
    fn width(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * Self::ADVANCE * size
    }

    fn ascent(&self, size: f64) -> f64 {
        Self::ASCENT * size
    }

    fn descent(&self, size: f64) -> f64 {
        Self::DESCENT * size
    }
}

/// Font size at which `sample` spans exactly `width`
pub fn fit_font_to_width(metrics: &dyn TextMetrics, sample: &str, width: f64) -> f64 {
    let measured = metrics.width(sample, REFERENCE_SIZE);
    if measured <= 0.0 || width <= 0.0 {
        return 0.0;
    }
    REFERENCE_SIZE * width / measured
}

/// Largest font size at which `sample` fits in `width` x `height`
pub fn fit_font_to_box(metrics: &dyn TextMetrics, sample: &str, width: f64, height: f64) -> f64 {
    let measured = metrics.height(REFERENCE_SIZE);
    let by_height = if measured <= 0.0 || height <= 0.0 {
        0.0
    } else {
        REFERENCE_SIZE * height / measured
    };
    fit_font_to_width(metrics, sample, width).min(by_height)
}
