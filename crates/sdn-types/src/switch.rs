//! Switch and port identifiers.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An OpenFlow datapath identifier.
///
/// Displayed in the conventional 16-digit hexadecimal form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SwitchId(u64);

impl SwitchId {
    pub const fn new(raw: u64) -> Self {
        SwitchId(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for SwitchId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16)
            .map(SwitchId)
            .map_err(|_| ParseError::InvalidSwitchId(s.to_string()))
    }
}

impl From<u64> for SwitchId {
    fn from(raw: u64) -> Self {
        SwitchId(raw)
    }
}

/// A switch port number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PortNo(u32);

impl PortNo {
    /// The reserved controller-facing port. Never a forwarding target and
    /// never matched as an ingress port in compiled rules.
    pub const LOCAL: PortNo = PortNo(65534);

    pub const fn new(raw: u32) -> Self {
        PortNo(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Returns true for the reserved controller-facing port.
    pub fn is_reserved(&self) -> bool {
        *self == Self::LOCAL
    }
}

impl fmt::Display for PortNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PortNo {
    fn from(raw: u32) -> Self {
        PortNo(raw)
    }
}
