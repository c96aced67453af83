//! Configuration types for the ingestion adapters.

pub mod command;
pub mod datagram;
pub mod hwinfo;
pub mod smart_plug;

pub use command::CommandSpec;
pub use datagram::{DatagramConfig, RestartPolicy, DEFAULT_DATAGRAM_PORT, MAX_FRAME_LEN};
pub use hwinfo::{
    DerivedPowerConfig, HwInfoConfig, IndexEntry, IndexMap, INDEX_MAP_VERSION, KBPS_TO_MBPS,
};
pub use smart_plug::SmartPlugConfig;
