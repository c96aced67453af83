//! Live channel state.

use arc_swap::ArcSwapOption;
use sensor_panel_types::{ChannelBounds, ChannelSpec, DisplayFormat, Unit};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::repaint::RepaintHook;

/// Weak link from a channel to whatever draws it
pub(crate) type RepaintBinding = Weak<dyn RepaintHook>;

/// A channel's configuration plus its current value and render binding.
///
/// The value lives in an `AtomicU64` holding `f64` bits so every read sees a
/// whole value, never a torn one.
pub(crate) struct Channel {
    pub(crate) spec: ChannelSpec,
    value: AtomicU64,
    binding: ArcSwapOption<RepaintBinding>,
}

impl Channel {
    pub(crate) fn new(spec: ChannelSpec) -> Self {
        Self {
            spec,
            value: AtomicU64::new(0f64.to_bits()),
            binding: ArcSwapOption::empty(),
        }
    }

    pub(crate) fn load(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, value: f64) {
        self.value.store(value.to_bits(), Ordering::Release);
    }

    pub(crate) fn bind(&self, hook: Weak<dyn RepaintHook>) {
        self.binding.store(Some(Arc::new(hook)));
    }

    pub(crate) fn unbind(&self) {
        self.binding.store(None);
    }

    /// Ask the bound figure to repaint, if it is still alive
    pub(crate) fn notify(&self) {
        let guard = self.binding.load();
        if let Some(hook) = guard.as_ref().and_then(|weak| weak.upgrade()) {
            hook.request_repaint();
        }
    }

    pub(crate) fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            value: self.load(),
            bounds: self.spec.bounds,
            unit: self.spec.unit,
            display: self.spec.display,
        }
    }
}

/// Everything a figure needs to draw one channel, copied out at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSnapshot {
    pub value: f64,
    pub bounds: ChannelBounds,
    pub unit: Unit,
    pub display: DisplayFormat,
}

impl ChannelSnapshot {
    /// Value formatted per the channel's display format, without unit
    pub fn rounded_display(&self) -> String {
        self.display.format(self.value)
    }
}
