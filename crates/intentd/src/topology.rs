//! Topology inventory: switches, links, and point-in-time snapshots.
//!
//! The discovery mechanism that maintains the switch/link inventory is an
//! external collaborator behind [`TopologyView`]. The core queries it for a
//! fresh [`TopologySnapshot`] at every compilation; nothing is cached or
//! incrementally updated here.

use sdn_types::{PortNo, SwitchId};
use serde::{Deserialize, Serialize};

/// A switch known to the topology, with its ordered set of ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchInfo {
    /// Datapath identifier.
    pub id: SwitchId,
    /// Port numbers in ascending order. May include the reserved
    /// controller-facing port; forwarding decisions skip it.
    pub ports: Vec<PortNo>,
}

impl SwitchInfo {
    /// Creates a switch entry, normalizing port order.
    pub fn new(id: SwitchId, mut ports: Vec<PortNo>) -> Self {
        ports.sort_unstable();
        ports.dedup();
        Self { id, ports }
    }
}

/// A directed link: traffic leaving `src` arrives on `dst` at `dst_port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    /// Source switch.
    pub src: SwitchId,
    /// Destination switch.
    pub dst: SwitchId,
    /// Ingress port on the destination side.
    pub dst_port: PortNo,
}

/// Boundary trait for the topology-discovery collaborator.
///
/// Implementations return the current inventory synchronously; the core
/// treats the answer as an immediate snapshot.
pub trait TopologyView: Send + Sync {
    /// All switches currently known.
    fn list_switches(&self) -> Vec<SwitchInfo>;

    /// All directed links currently known.
    fn list_links(&self) -> Vec<LinkInfo>;
}

/// A point-in-time view of the switch/link graph.
#[derive(Debug, Clone, Default)]
pub struct TopologySnapshot {
    switches: Vec<SwitchInfo>,
    links: Vec<LinkInfo>,
}

impl TopologySnapshot {
    /// Builds a snapshot from explicit inventory, ordering switches by id.
    pub fn new(mut switches: Vec<SwitchInfo>, links: Vec<LinkInfo>) -> Self {
        switches.sort_unstable_by_key(|sw| sw.id);
        Self { switches, links }
    }

    /// Queries the collaborator for a fresh snapshot.
    pub fn capture(view: &dyn TopologyView) -> Self {
        Self::new(view.list_switches(), view.list_links())
    }

    /// Switches in ascending id order.
    pub fn switches(&self) -> &[SwitchInfo] {
        &self.switches
    }

    /// All directed links, in collaborator order.
    pub fn links(&self) -> &[LinkInfo] {
        &self.links
    }

    /// Looks up a switch by id.
    pub fn switch(&self, id: SwitchId) -> Option<&SwitchInfo> {
        self.switches.iter().find(|sw| sw.id == id)
    }

    /// Returns true if the switch is present in this snapshot.
    pub fn contains(&self, id: SwitchId) -> bool {
        self.switch(id).is_some()
    }
}

/// A fixed in-memory topology, used by the binary's dry-run mode and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    switches: Vec<SwitchInfo>,
    links: Vec<LinkInfo>,
}

impl StaticTopology {
    pub fn new(switches: Vec<SwitchInfo>, links: Vec<LinkInfo>) -> Self {
        Self { switches, links }
    }
}

impl TopologyView for StaticTopology {
    fn list_switches(&self) -> Vec<SwitchInfo> {
        self.switches.clone()
    }

    fn list_links(&self) -> Vec<LinkInfo> {
        self.links.clone()
    }
}
