//! The panel window: one `DrawingArea` per configured figure

use anyhow::{Context, Result};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, DrawingArea, Fixed, Overlay};
use log::{debug, info, warn};
use sensor_panel_core::{ChannelId, Registry, RepaintFlag, RepaintHook};
use sensor_panel_render::{replay, Figure, PangoMetrics, Renderable, Size, DEFAULT_FONT_FAMILY};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, FigurePlacement};

/// A figure's widget and the flag its channel raises on every write.
///
/// The registry only holds a weak link to `hook`, so dropping the view
/// silently unbinds the channel.
pub struct FigureView {
    pub area: DrawingArea,
    flag: Arc<RepaintFlag>,
    _hook: Arc<dyn RepaintHook>,
}

impl FigureView {
    fn new(placement: &FigurePlacement, config: &AppConfig, registry: &Arc<Registry>) -> Result<Self> {
        let channel = registry
            .require(&placement.channel)
            .with_context(|| format!("Cannot place {} figure", placement.figure.figure_type()))?;

        let area = DrawingArea::new();
        area.set_content_width(placement.width);
        area.set_content_height(placement.height);
        area.set_size_request(placement.width, placement.height);

        let figure = Figure::new(placement.figure.clone(), config.render);
        let draw_registry = registry.clone();
        area.set_draw_func(move |_, cr, width, height| {
            draw_figure(&figure, &draw_registry, channel, cr, width, height);
        });

        let flag = Arc::new(RepaintFlag::new());
        let hook: Arc<dyn RepaintHook> = flag.clone();
        registry.bind(channel, Arc::downgrade(&hook));

        debug!(
            "Placed {} for {} at ({}, {})",
            placement.figure.figure_type(),
            placement.channel,
            placement.x,
            placement.y
        );

        Ok(Self {
            area,
            flag,
            _hook: hook,
        })
    }

    /// Queue a redraw if the channel changed since the last check
    pub fn refresh(&self) -> bool {
        let dirty = self.flag.take();
        if dirty {
            self.area.queue_draw();
        }
        dirty
    }
}

fn draw_figure(
    figure: &Figure,
    registry: &Registry,
    channel: ChannelId,
    cr: &cairo::Context,
    width: i32,
    height: i32,
) {
    let snapshot = registry.snapshot(channel);
    let metrics = PangoMetrics::new(cr, DEFAULT_FONT_FAMILY);
    let drawing = figure.draw(Size::new(width as f64, height as f64), &snapshot, &metrics);

    if let Err(e) = replay(cr, &drawing, DEFAULT_FONT_FAMILY) {
        warn!("Failed to draw {}: {}", registry.spec(channel).name, e);
    }
}

/// Build the panel window and start polling its figures for repaints
pub fn build_panel_window(
    app: &Application,
    config: &AppConfig,
    registry: Arc<Registry>,
) -> Result<ApplicationWindow> {
    let window = ApplicationWindow::builder()
        .application(app)
        .title(config.window.title.as_str())
        .default_width(config.window.width)
        .default_height(config.window.height)
        .resizable(false)
        .build();

    let background = DrawingArea::new();
    background.set_content_width(config.window.width);
    background.set_content_height(config.window.height);
    let background_color = config.window.background;
    background.set_draw_func(move |_, cr, _, _| {
        background_color.apply_to_cairo(cr);
        if let Err(e) = cr.paint() {
            warn!("Failed to paint window background: {}", e);
        }
    });

    let container = Fixed::new();
    let mut views = Vec::with_capacity(config.figures.len());
    for placement in &config.figures {
        let view = FigureView::new(placement, config, &registry)?;
        container.put(&view.area, placement.x as f64, placement.y as f64);
        views.push(view);
    }
    info!("Laid out {} figures", views.len());

    let overlay = Overlay::new();
    overlay.set_child(Some(&background));
    overlay.add_overlay(&container);
    window.set_child(Some(&overlay));

    // Values arrive on adapter threads; redraws happen here on the main loop
    let window_weak = window.downgrade();
    let interval = Duration::from_millis(config.window.repaint_poll_ms.max(1));
    glib::timeout_add_local(interval, move || {
        if window_weak.upgrade().is_none() {
            return glib::ControlFlow::Break;
        }
        for view in &views {
            view.refresh();
        }
        glib::ControlFlow::Continue
    });

    Ok(window)
}
