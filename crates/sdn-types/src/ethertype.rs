//! Ethernet frame type codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An Ethernet frame type (EtherType) code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EtherType(u16);

impl EtherType {
    pub const IPV4: EtherType = EtherType(0x0800);
    pub const ARP: EtherType = EtherType(0x0806);
    pub const IPV6: EtherType = EtherType(0x86dd);
    pub const LLDP: EtherType = EtherType(0x88cc);

    pub const fn new(raw: u16) -> Self {
        EtherType(raw)
    }

    pub const fn raw(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl From<u16> for EtherType {
    fn from(raw: u16) -> Self {
        EtherType(raw)
    }
}
