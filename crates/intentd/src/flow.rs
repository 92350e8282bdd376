//! Forwarding-table entries: match predicates, actions, and rules.

use sdn_types::{EtherType, MacAddress, PortNo, SwitchId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of rules compiled from intents.
pub const INTENT_RULE_PRIORITY: u16 = 200;

/// Priority of shortcut rules installed by the learning switch. Lower than
/// [`INTENT_RULE_PRIORITY`] so intents always take precedence.
pub const LEARNED_RULE_PRIORITY: u16 = 100;

/// A conjunction of header-field equality constraints.
///
/// An unset field matches anything; [`FlowMatch::any`] matches every frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMatch {
    /// Ingress port constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_port: Option<PortNo>,
    /// Ethernet source address constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_src: Option<MacAddress>,
    /// Ethernet destination address constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_dst: Option<MacAddress>,
    /// Ethernet frame type constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_type: Option<EtherType>,
}

impl FlowMatch {
    /// The match-everything predicate.
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns a copy with the ingress port forced to `port`. The original
    /// predicate is left untouched; per-port compilation works on copies.
    pub fn with_in_port(mut self, port: PortNo) -> Self {
        self.in_port = Some(port);
        self
    }

    pub fn with_eth_src(mut self, mac: MacAddress) -> Self {
        self.eth_src = Some(mac);
        self
    }

    pub fn with_eth_dst(mut self, mac: MacAddress) -> Self {
        self.eth_dst = Some(mac);
        self
    }

    pub fn with_eth_type(mut self, ethertype: EtherType) -> Self {
        self.eth_type = Some(ethertype);
        self
    }

    /// Returns true if no field is constrained.
    pub fn is_any(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for FlowMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return write!(f, "any");
        }
        let mut sep = "";
        if let Some(p) = self.in_port {
            write!(f, "in_port={p}")?;
            sep = ",";
        }
        if let Some(mac) = self.eth_src {
            write!(f, "{sep}eth_src={mac}")?;
            sep = ",";
        }
        if let Some(mac) = self.eth_dst {
            write!(f, "{sep}eth_dst={mac}")?;
            sep = ",";
        }
        if let Some(t) = self.eth_type {
            write!(f, "{sep}eth_type={t}")?;
        }
        Ok(())
    }
}

/// What a switch does with a matching frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowAction {
    /// Forward out a single port.
    Output(PortNo),
    /// Forward out every port except the ingress one.
    Flood,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowAction::Output(port) => write!(f, "output:{port}"),
            FlowAction::Flood => write!(f, "flood"),
        }
    }
}

/// A concrete per-switch forwarding-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRule {
    /// Switch the rule is installed on.
    pub switch: SwitchId,
    /// Match predicate.
    pub matching: FlowMatch,
    /// Forwarding action.
    pub action: FlowAction,
    /// Rule priority; authoritative for both install and delete.
    pub priority: u16,
}
