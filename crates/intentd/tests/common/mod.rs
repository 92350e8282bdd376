//! Shared test fixtures: a recording gateway and small topologies.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use intentd::{
    FlowAction, FlowMatch, FlowRule, GatewayError, LinkInfo, SwitchGateway, SwitchInfo,
    TopologySnapshot,
};
use sdn_types::{PortNo, SwitchId};

/// One instruction submitted through the gateway, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Install(FlowRule),
    Delete {
        switch: SwitchId,
        matching: FlowMatch,
        priority: u16,
    },
    PacketOut {
        switch: SwitchId,
        buffer_id: Option<u32>,
        data: Option<Vec<u8>>,
        in_port: PortNo,
        action: FlowAction,
    },
    Reset(SwitchId),
}

/// Gateway that records every instruction it is handed.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Drains and returns the recorded calls.
    pub fn take(&self) -> Vec<GatewayCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn installs(&self) -> Vec<FlowRule> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Install(rule) => Some(rule),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<(SwitchId, FlowMatch, u16)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Delete {
                    switch,
                    matching,
                    priority,
                } => Some((switch, matching, priority)),
                _ => None,
            })
            .collect()
    }

    pub fn packet_outs(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, GatewayCall::PacketOut { .. }))
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SwitchGateway for RecordingGateway {
    async fn install_rule(&self, rule: &FlowRule) -> Result<(), GatewayError> {
        self.record(GatewayCall::Install(rule.clone()));
        Ok(())
    }

    async fn delete_rule(
        &self,
        switch: SwitchId,
        matching: &FlowMatch,
        priority: u16,
    ) -> Result<(), GatewayError> {
        self.record(GatewayCall::Delete {
            switch,
            matching: matching.clone(),
            priority,
        });
        Ok(())
    }

    async fn send_packet_out(
        &self,
        switch: SwitchId,
        buffer_id: Option<u32>,
        frame: Option<&[u8]>,
        in_port: PortNo,
        action: FlowAction,
    ) -> Result<(), GatewayError> {
        self.record(GatewayCall::PacketOut {
            switch,
            buffer_id,
            data: frame.map(<[u8]>::to_vec),
            in_port,
            action,
        });
        Ok(())
    }

    async fn reset_table(&self, switch: SwitchId) -> Result<(), GatewayError> {
        self.record(GatewayCall::Reset(switch));
        Ok(())
    }
}

pub fn switch(id: u64, ports: &[u32]) -> SwitchInfo {
    SwitchInfo::new(
        SwitchId::new(id),
        ports.iter().copied().map(PortNo::new).collect(),
    )
}

pub fn link(src: u64, dst: u64, dst_port: u32) -> LinkInfo {
    LinkInfo {
        src: SwitchId::new(src),
        dst: SwitchId::new(dst),
        dst_port: PortNo::new(dst_port),
    }
}

/// Bidirectional chain 1 - 2 - 3; inter-switch links on ports 1/2, host
/// ports 3 and 4 on every switch.
pub fn chain_inventory() -> (Vec<SwitchInfo>, Vec<LinkInfo>) {
    let switches = vec![
        switch(1, &[1, 2, 3, 4]),
        switch(2, &[1, 2, 3, 4]),
        switch(3, &[1, 2, 3, 4]),
    ];
    let links = vec![
        link(1, 2, 1),
        link(2, 1, 2),
        link(2, 3, 1),
        link(3, 2, 2),
    ];
    (switches, links)
}

pub fn chain_snapshot() -> TopologySnapshot {
    let (switches, links) = chain_inventory();
    TopologySnapshot::new(switches, links)
}

/// Builds an Ethernet frame with the given addresses and ethertype.
pub fn frame(dst: [u8; 6], src: [u8; 6], ethertype: u16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(20);
    bytes.extend_from_slice(&dst);
    bytes.extend_from_slice(&src);
    bytes.extend_from_slice(&ethertype.to_be_bytes());
    bytes.extend_from_slice(&[0u8; 6]);
    bytes
}
