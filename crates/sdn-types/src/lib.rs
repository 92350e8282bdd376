//! Typed network primitives shared across the intentd control plane:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`SwitchId`]: OpenFlow datapath identifiers
//! - [`PortNo`]: switch port numbers, including the reserved local port
//! - [`EtherType`]: Ethernet frame type codes

mod ethertype;
mod mac;
mod switch;

pub use ethertype::EtherType;
pub use mac::MacAddress;
pub use switch::{PortNo, SwitchId};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid switch id: {0}")]
    InvalidSwitchId(String),

    #[error("invalid port number: {0}")]
    InvalidPortNo(String),
}
