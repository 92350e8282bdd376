//! Reactive learning switch.
//!
//! Baseline connectivity for traffic no intent covers: learn where source
//! MACs live, flood unknown destinations, and install low-priority shortcut
//! rules once a destination's port is known. State is kept per switch; there
//! is no cross-switch coordination and no aging of learned entries (tables
//! grow monotonically for the life of the process).

use std::collections::HashMap;

use sdn_types::{EtherType, MacAddress, PortNo, SwitchId};
use tracing::{debug, info, warn};

use crate::flow::{FlowAction, FlowMatch, FlowRule, LEARNED_RULE_PRIORITY};
use crate::frame::EthernetHeader;
use crate::gateway::SwitchGateway;

/// A packet-in notification from a switch.
#[derive(Debug, Clone)]
pub struct PacketIn {
    /// Switch that punted the frame.
    pub switch: SwitchId,
    /// Port the frame arrived on.
    pub in_port: PortNo,
    /// Raw frame bytes.
    pub frame: Vec<u8>,
    /// Switch-side buffer id, when the switch kept the frame buffered.
    pub buffer_id: Option<u32>,
}

/// Per-switch MAC learning tables and the reactive forwarding decision.
#[derive(Debug, Default)]
pub struct LearningSwitch {
    tables: HashMap<SwitchId, HashMap<MacAddress, PortNo>>,
}

impl LearningSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The port a MAC was last seen on at a switch, if learned.
    pub fn learned_port(&self, switch: SwitchId, mac: MacAddress) -> Option<PortNo> {
        self.tables.get(&switch)?.get(&mac).copied()
    }

    /// Handles one packet-in: learn, resolve, maybe install a shortcut,
    /// and emit the packet-out.
    ///
    /// Gateway failures are logged and swallowed; the decision itself is
    /// fire-and-forget like every other switch instruction.
    pub async fn handle_packet_in(&mut self, gateway: &dyn SwitchGateway, pkt: &PacketIn) {
        let Some(eth) = EthernetHeader::decode(&pkt.frame) else {
            debug!(switch = %pkt.switch, in_port = %pkt.in_port, "dropping undecodable frame");
            return;
        };

        // LLDP and IPv6 are out of scope for learning.
        if eth.ethertype == EtherType::LLDP || eth.ethertype == EtherType::IPV6 {
            return;
        }

        if !eth.dst.is_group() {
            info!(
                switch = %pkt.switch,
                src = %eth.src,
                dst = %eth.dst,
                in_port = %pkt.in_port,
                "packet in"
            );
        }

        // Learn unconditionally, group-addressed frames included.
        self.tables
            .entry(pkt.switch)
            .or_default()
            .insert(eth.src, pkt.in_port);

        // Group destinations are flood-only; never install a rule for them.
        if eth.dst.is_group() {
            self.packet_out(gateway, pkt, FlowAction::Flood).await;
            return;
        }

        let action = match self.learned_port(pkt.switch, eth.dst) {
            Some(port) => FlowAction::Output(port),
            None => {
                info!(switch = %pkt.switch, dst = %eth.dst, "destination not learned, flooding");
                FlowAction::Flood
            }
        };

        // Shortcut rule so subsequent frames bypass the controller.
        // Permanent entry, below intent priority.
        if let FlowAction::Output(_) = action {
            let rule = FlowRule {
                switch: pkt.switch,
                matching: FlowMatch::any()
                    .with_in_port(pkt.in_port)
                    .with_eth_dst(eth.dst),
                action,
                priority: LEARNED_RULE_PRIORITY,
            };
            if let Err(err) = gateway.install_rule(&rule).await {
                warn!(switch = %pkt.switch, %err, "shortcut install submission failed");
            }
        }

        self.packet_out(gateway, pkt, action).await;
    }

    async fn packet_out(&self, gateway: &dyn SwitchGateway, pkt: &PacketIn, action: FlowAction) {
        // Raw bytes travel with the packet-out only when the switch did not
        // buffer the frame.
        let data = match pkt.buffer_id {
            Some(_) => None,
            None => Some(pkt.frame.as_slice()),
        };
        if let Err(err) = gateway
            .send_packet_out(pkt.switch, pkt.buffer_id, data, pkt.in_port, action)
            .await
        {
            warn!(switch = %pkt.switch, %err, "packet-out submission failed");
        }
    }
}
