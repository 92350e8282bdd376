//! Outbound boundary to the switches.
//!
//! The transport that actually talks OpenFlow (or anything else) to the
//! switches lives behind [`SwitchGateway`]. Every call is fire-and-forget:
//! the core never awaits acknowledgment, never retries a failed send, and
//! treats "installed" as "instruction was submitted".

use async_trait::async_trait;
use sdn_types::{PortNo, SwitchId};
use thiserror::Error;
use tracing::info;

use crate::flow::{FlowAction, FlowMatch, FlowRule};

/// Errors a gateway implementation may surface at submission time.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The transport rejected or failed to queue the instruction.
    #[error("transport error: {0}")]
    Transport(String),

    /// The connection to the switch is gone.
    #[error("switch {0} is not connected")]
    Disconnected(SwitchId),
}

/// Switch-communication boundary consumed by the controller core.
#[async_trait]
pub trait SwitchGateway: Send + Sync {
    /// Submits a forwarding-table install instruction.
    async fn install_rule(&self, rule: &FlowRule) -> Result<(), GatewayError>;

    /// Submits a strict delete for a previously installed rule. The match
    /// and priority must equal the installed rule's exactly.
    async fn delete_rule(
        &self,
        switch: SwitchId,
        matching: &FlowMatch,
        priority: u16,
    ) -> Result<(), GatewayError>;

    /// Submits a packet-out for a frame held at the controller. `frame`
    /// carries the raw bytes when the switch did not buffer the frame.
    async fn send_packet_out(
        &self,
        switch: SwitchId,
        buffer_id: Option<u32>,
        frame: Option<&[u8]>,
        in_port: PortNo,
        action: FlowAction,
    ) -> Result<(), GatewayError>;

    /// Submits a match-everything delete, clearing the switch's table.
    async fn reset_table(&self, switch: SwitchId) -> Result<(), GatewayError>;
}

/// Gateway that only traces the instructions it is handed.
///
/// Default for the binary's dry-run mode; also handy when bringing up a
/// topology without live switch connections.
#[derive(Debug, Default)]
pub struct LoggingGateway;

#[async_trait]
impl SwitchGateway for LoggingGateway {
    async fn install_rule(&self, rule: &FlowRule) -> Result<(), GatewayError> {
        info!(
            switch = %rule.switch,
            matching = %rule.matching,
            action = %rule.action,
            priority = rule.priority,
            "install rule"
        );
        Ok(())
    }

    async fn delete_rule(
        &self,
        switch: SwitchId,
        matching: &FlowMatch,
        priority: u16,
    ) -> Result<(), GatewayError> {
        info!(%switch, %matching, priority, "delete rule");
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
        info!(
            %switch,
            ?buffer_id,
            bytes = frame.map_or(0, <[u8]>::len),
            %in_port,
            %action,
            "packet out"
        );
        Ok(())
    }

    async fn reset_table(&self, switch: SwitchId) -> Result<(), GatewayError> {
        info!(%switch, "reset forwarding table");
        Ok(())
    }
}
