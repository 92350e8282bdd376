//! intentd - intent-based SDN controller core.
//!
//! Computes shortest-path trees over a live switch/link topology, compiles
//! declarative forwarding intents into per-switch rules, manages their
//! lifecycle, and runs a reactive learning switch as the fallback for
//! traffic no intent covers.

mod compiler;
mod config;
mod dispatch;
mod error;
mod flow;
mod frame;
mod gateway;
mod intent;
mod learning;
mod spt;
mod topology;

pub use compiler::compile;
pub use config::ControllerConfig;
pub use dispatch::{Controller, Event, IntentRequest};
pub use error::{IntentError, IntentResult};
pub use flow::{FlowAction, FlowMatch, FlowRule, INTENT_RULE_PRIORITY, LEARNED_RULE_PRIORITY};
pub use frame::EthernetHeader;
pub use gateway::{GatewayError, LoggingGateway, SwitchGateway};
pub use intent::{Intent, IntentRegistry};
pub use learning::{LearningSwitch, PacketIn};
pub use spt::{NextHop, SptTree};
pub use topology::{LinkInfo, StaticTopology, SwitchInfo, TopologySnapshot, TopologyView};
