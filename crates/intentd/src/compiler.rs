//! Intent-to-rule compilation.
//!
//! Turns a network-wide intent ("deliver traffic matching P to switch X,
//! port Y") into per-switch forwarding rules along the shortest-path tree
//! rooted at the target. Pure: no side effects, no stored state.

use tracing::debug;

use crate::error::IntentResult;
use crate::flow::{FlowAction, FlowRule, INTENT_RULE_PRIORITY};
use crate::intent::Intent;
use crate::spt::{NextHop, SptTree};
use crate::topology::TopologySnapshot;

/// Compiles an intent into the full per-switch rule set.
///
/// Every reachable switch gets one rule per port other than its output port
/// and the reserved controller port, forwarding matching traffic one hop
/// toward the target. Switches with no path to the target are excluded;
/// compiling rules for them would forward their traffic nowhere useful.
pub fn compile(snapshot: &TopologySnapshot, intent: &Intent) -> IntentResult<Vec<FlowRule>> {
    let tree = SptTree::compute(snapshot, intent.target)?;

    let mut rules = Vec::new();
    for sw in snapshot.switches() {
        let out_port = match tree.next_hop(sw.id) {
            Some(NextHop::Root) => intent.target_port,
            Some(NextHop::Via { port, .. }) => *port,
            Some(NextHop::Unreachable) | None => continue,
        };

        for &in_port in &sw.ports {
            if in_port == out_port || in_port.is_reserved() {
                continue;
            }
            rules.push(FlowRule {
                switch: sw.id,
                matching: intent.matching.clone().with_in_port(in_port),
                action: FlowAction::Output(out_port),
                priority: INTENT_RULE_PRIORITY,
            });
        }
    }

    debug!(
        intent = %intent.uuid,
        target = %intent.target,
        rules = rules.len(),
        "compiled intent"
    );
    Ok(rules)
}
