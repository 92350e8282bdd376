//! Shortest-path tree over the switch graph.
//!
//! Single-source shortest path with uniform edge weight 1, rooted at the
//! traffic target. Every switch in the snapshot resolves to a tagged
//! [`NextHop`]: the root itself, one hop toward the root, or unreachable.
//! Ties between equal-distance candidates break toward the numerically
//! smallest switch id, so the tree is deterministic for a given snapshot.

use std::collections::{BTreeMap, BTreeSet};

use sdn_types::{PortNo, SwitchId};

use crate::error::{IntentError, IntentResult};
use crate::topology::TopologySnapshot;

/// Per-switch outcome of a tree computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextHop {
    /// This switch is the tree root (the intent target).
    Root,
    /// One hop along the tree: `toward` is the neighbor closer to the root,
    /// `port` is the local port leading to it, `distance` the hop count to
    /// the root.
    Via {
        toward: SwitchId,
        port: PortNo,
        distance: u32,
    },
    /// No path to the root exists in this snapshot.
    Unreachable,
}

/// A computed shortest-path tree.
#[derive(Debug, Clone)]
pub struct SptTree {
    target: SwitchId,
    nodes: BTreeMap<SwitchId, NextHop>,
}

impl SptTree {
    /// Computes the tree rooted at `target` over the given snapshot.
    ///
    /// Fails with [`IntentError::InvalidTarget`] when `target` is not among
    /// the snapshot's switches.
    pub fn compute(snapshot: &TopologySnapshot, target: SwitchId) -> IntentResult<SptTree> {
        if !snapshot.contains(target) {
            return Err(IntentError::InvalidTarget(target));
        }

        let mut dist: BTreeMap<SwitchId, u32> = BTreeMap::new();
        let mut prev: BTreeMap<SwitchId, (SwitchId, PortNo)> = BTreeMap::new();
        let mut unvisited: BTreeSet<SwitchId> = BTreeSet::new();

        for sw in snapshot.switches() {
            dist.insert(sw.id, u32::MAX);
            unvisited.insert(sw.id);
        }
        dist.insert(target, 0);

        while !unvisited.is_empty() {
            // Minimum known distance wins; the ascending id scan takes the
            // strictly smaller candidate only, so the smallest id wins ties.
            let mut selected = None;
            let mut best = u32::MAX;
            for &candidate in &unvisited {
                let d = dist[&candidate];
                if selected.is_none() || d < best {
                    selected = Some(candidate);
                    best = d;
                }
            }
            let u = match selected {
                Some(u) if best != u32::MAX => u,
                // Everything left is disconnected from the target.
                _ => break,
            };
            unvisited.remove(&u);

            let alt = dist[&u] + 1;
            for link in snapshot.links().iter().filter(|l| l.src == u) {
                match dist.get_mut(&link.dst) {
                    Some(d) if alt < *d => {
                        *d = alt;
                        prev.insert(link.dst, (u, link.dst_port));
                    }
                    _ => {}
                }
            }
        }

        let mut nodes = BTreeMap::new();
        for sw in snapshot.switches() {
            let hop = if sw.id == target {
                NextHop::Root
            } else if let Some(&(toward, port)) = prev.get(&sw.id) {
                NextHop::Via {
                    toward,
                    port,
                    distance: dist[&sw.id],
                }
            } else {
                NextHop::Unreachable
            };
            nodes.insert(sw.id, hop);
        }

        Ok(SptTree { target, nodes })
    }

    /// The root the tree was computed for.
    pub fn target(&self) -> SwitchId {
        self.target
    }

    /// Resolution for a switch; `None` if the switch was not in the snapshot.
    pub fn next_hop(&self, id: SwitchId) -> Option<&NextHop> {
        self.nodes.get(&id)
    }

    /// Hop count to the root; `None` for unreachable or unknown switches.
    pub fn distance(&self, id: SwitchId) -> Option<u32> {
        match self.nodes.get(&id)? {
            NextHop::Root => Some(0),
            NextHop::Via { distance, .. } => Some(*distance),
            NextHop::Unreachable => None,
        }
    }
}
