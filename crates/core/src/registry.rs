//! Registry of telemetry channels.
//!
//! The channel set is fixed at construction. Adapters resolve names to
//! [`ChannelId`] handles once and then write through them; the display side
//! reads snapshots through the same handles. A shared `Arc<Registry>` is all
//! the coordination either side needs.

use log::debug;
use sensor_panel_types::{default_channel_table, ChannelSpec};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use thiserror::Error;

use crate::alert::{evaluate, AlertEvent, AlertPolicy, AlertSink, LogAlertSink};
use crate::channel::{Channel, ChannelSnapshot};
use crate::repaint::RepaintHook;

/// Opaque handle to a registered channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(usize);

impl ChannelId {
    /// Position of the channel in declaration order
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("channel '{0}' declared more than once")]
    DuplicateChannel(String),
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),
}

pub struct Registry {
    channels: Vec<Channel>,
    by_name: HashMap<String, ChannelId>,
    policy: AlertPolicy,
    sink: Arc<dyn AlertSink>,
}

impl Registry {
    /// Build a registry from channel specs, in order.
    pub fn new(
        specs: Vec<ChannelSpec>,
        policy: AlertPolicy,
        sink: Arc<dyn AlertSink>,
    ) -> Result<Self, RegistryError> {
        let mut by_name = HashMap::with_capacity(specs.len());
        let mut channels = Vec::with_capacity(specs.len());

        for (i, spec) in specs.into_iter().enumerate() {
            if by_name.insert(spec.name.clone(), ChannelId(i)).is_some() {
                return Err(RegistryError::DuplicateChannel(spec.name));
            }
            channels.push(Channel::new(spec));
        }

        debug!("Registry created with {} channels", channels.len());

        Ok(Self {
            channels,
            by_name,
            policy,
            sink,
        })
    }

    /// The built-in channel table with alerts going to the log
    pub fn with_defaults() -> Result<Self, RegistryError> {
        Self::new(
            default_channel_table(),
            AlertPolicy::default(),
            Arc::new(LogAlertSink),
        )
    }

    pub fn lookup(&self, name: &str) -> Option<ChannelId> {
        self.by_name.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup) but with an error naming the channel
    pub fn require(&self, name: &str) -> Result<ChannelId, RegistryError> {
        self.lookup(name)
            .ok_or_else(|| RegistryError::UnknownChannel(name.to_string()))
    }

    pub fn id_at(&self, index: usize) -> Option<ChannelId> {
        (index < self.channels.len()).then_some(ChannelId(index))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// All channel handles in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &ChannelSpec)> {
        self.channels
            .iter()
            .enumerate()
            .map(|(i, c)| (ChannelId(i), &c.spec))
    }

    fn channel(&self, id: ChannelId) -> &Channel {
        // Handles only come from this registry and it never shrinks
        &self.channels[id.0]
    }

    pub fn spec(&self, id: ChannelId) -> &ChannelSpec {
        &self.channel(id).spec
    }

    /// Store a new value, report any alerts it raises, then ask the bound
    /// figure to repaint.
    pub fn set(&self, id: ChannelId, value: f64) {
        let channel = self.channel(id);
        channel.store(value);

        let alerts = evaluate(&channel.spec.bounds, value, &self.policy);
        for (severity, direction) in alerts.events() {
            self.sink.emit(&AlertEvent {
                channel: &channel.spec,
                value,
                severity,
                direction,
            });
        }

        channel.notify();
    }

    pub fn set_by_name(&self, name: &str, value: f64) -> Result<(), RegistryError> {
        let id = self.require(name)?;
        self.set(id, value);
        Ok(())
    }

    pub fn value(&self, id: ChannelId) -> f64 {
        self.channel(id).load()
    }

    pub fn rounded_display(&self, id: ChannelId) -> String {
        let channel = self.channel(id);
        channel.spec.display.format(channel.load())
    }

    pub fn snapshot(&self, id: ChannelId) -> ChannelSnapshot {
        self.channel(id).snapshot()
    }

    /// Attach a repaint hook; replaces any previous binding
    pub fn bind(&self, id: ChannelId, hook: Weak<dyn RepaintHook>) {
        self.channel(id).bind(hook);
    }

    pub fn unbind(&self, id: ChannelId) {
        self.channel(id).unbind();
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("channels", &self.channels.len())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{Direction, RecordingAlertSink, Severity};
    use crate::repaint::RepaintFlag;
    use sensor_panel_types::channel::{
        CPU_TEMPERATURE, RAM_USAGE, SYSTEM_COST_PER_HOUR,
    };
    use sensor_panel_types::Unit;

    fn recording_registry() -> (Registry, Arc<RecordingAlertSink>) {
        let sink = Arc::new(RecordingAlertSink::new());
        let registry =
            Registry::new(default_channel_table(), AlertPolicy::default(), sink.clone()).unwrap();
        (registry, sink)
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let specs = vec![
            ChannelSpec::new("a", Unit::Watts, 0.0, 1.0, 0.0, 1.0),
            ChannelSpec::new("a", Unit::Watts, 0.0, 1.0, 0.0, 1.0),
        ];
        let err = Registry::new(specs, AlertPolicy::default(), Arc::new(LogAlertSink)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateChannel("a".to_string()));
    }

    #[test]
    fn test_defaults_lookup_and_order() {
        let registry = Registry::with_defaults().unwrap();
        assert_eq!(registry.len(), 17);
        let ram = registry.lookup(RAM_USAGE).unwrap();
        assert_eq!(ram.index(), 0);
        assert_eq!(registry.id_at(16), registry.lookup(SYSTEM_COST_PER_HOUR));
        assert!(registry.id_at(17).is_none());
        assert!(registry.lookup("nope").is_none());
        let names: Vec<_> = registry.iter().map(|(_, s)| s.name.as_str()).collect();
        assert_eq!(names[3], CPU_TEMPERATURE);
    }

    #[test]
    fn test_values_start_at_zero() {
        let registry = Registry::with_defaults().unwrap();
        for (id, _) in registry.iter() {
            assert_eq!(registry.value(id), 0.0);
        }
    }

    #[test]
    fn test_set_raises_warning_and_critical() {
        let (registry, sink) = recording_registry();
        let ram = registry.lookup(RAM_USAGE).unwrap();

        registry.set(ram, 97.0);
        let records = sink.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warning);
        assert_eq!(records[0].direction, Direction::High);
        assert_eq!(registry.value(ram), 97.0);
        assert_eq!(registry.rounded_display(ram), "97");

        registry.set(ram, 101.0);
        let severities: Vec<_> = sink.drain().into_iter().map(|r| r.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Critical]);
    }

    #[test]
    fn test_value_visible_before_alert_delivery() {
        struct Probe {
            registry: std::sync::OnceLock<Weak<Registry>>,
            seen: std::sync::Mutex<Vec<f64>>,
        }
        impl AlertSink for Probe {
            fn emit(&self, event: &AlertEvent<'_>) {
                if let Some(registry) = self.registry.get().and_then(|w| w.upgrade()) {
                    let id = registry.lookup(&event.channel.name).unwrap();
                    self.seen.lock().unwrap().push(registry.value(id));
                }
            }
        }

        let probe = Arc::new(Probe {
            registry: std::sync::OnceLock::new(),
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let registry =
            Arc::new(Registry::new(default_channel_table(), AlertPolicy::default(), probe.clone()).unwrap());
        probe.registry.set(Arc::downgrade(&registry)).unwrap();

        registry.set_by_name(RAM_USAGE, 99.0).unwrap();
        assert_eq!(*probe.seen.lock().unwrap(), vec![99.0]);
    }

    #[test]
    fn test_set_by_unknown_name() {
        let registry = Registry::with_defaults().unwrap();
        assert_eq!(
            registry.set_by_name("bogus", 1.0),
            Err(RegistryError::UnknownChannel("bogus".to_string()))
        );
    }

    #[test]
    fn test_set_notifies_binding() {
        let registry = Registry::with_defaults().unwrap();
        let id = registry.lookup(CPU_TEMPERATURE).unwrap();
        let flag = Arc::new(RepaintFlag::new());
        let hook: Arc<dyn RepaintHook> = flag.clone();
        registry.bind(id, Arc::downgrade(&hook));

        registry.set(id, 50.0);
        assert!(flag.take());

        registry.unbind(id);
        registry.set(id, 51.0);
        assert!(!flag.is_dirty());
    }

    #[test]
    fn test_set_with_dropped_binding_still_stores() {
        let registry = Registry::with_defaults().unwrap();
        let id = registry.lookup(CPU_TEMPERATURE).unwrap();
        {
            let hook: Arc<dyn RepaintHook> = Arc::new(RepaintFlag::new());
            registry.bind(id, Arc::downgrade(&hook));
        }
        registry.set(id, 60.0);
        assert_eq!(registry.value(id), 60.0);
    }

    #[test]
    fn test_cost_display_uses_one_decimal() {
        let registry = Registry::with_defaults().unwrap();
        let id = registry.lookup(SYSTEM_COST_PER_HOUR).unwrap();
        registry.set(id, 42.25);
        assert_eq!(registry.rounded_display(id), "42.2");
        registry.set(id, 12.35);
        assert_eq!(registry.rounded_display(id), "12.3");
        registry.set(id, 42.0);
        assert_eq!(registry.rounded_display(id), "42");
    }

    #[test]
    fn test_concurrent_writers_on_distinct_channels() {
        let registry = Arc::new(Registry::with_defaults().unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let id = registry.id_at(i).unwrap();
                    for v in 0..1000 {
                        registry.set(id, v as f64);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for i in 0..4 {
            assert_eq!(registry.value(registry.id_at(i).unwrap()), 999.0);
        }
    }
}
