//! Single-threaded cooperative event dispatch.
//!
//! The controller owns all long-lived mutable state (intent registry, MAC
//! tables) and drains one event at a time from an mpsc channel. Each event
//! runs to completion before the next is looked at, which is the only
//! serialization the registry and the learning switch rely on.

use std::sync::Arc;

use sdn_types::SwitchId;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::IntentResult;
use crate::gateway::SwitchGateway;
use crate::intent::{Intent, IntentRegistry};
use crate::learning::{LearningSwitch, PacketIn};
use crate::topology::{TopologySnapshot, TopologyView};

/// An intent operation submitted through the request surface. The reply
/// channel carries the operation's outcome back to the caller.
#[derive(Debug)]
pub enum IntentRequest {
    Add {
        intent: Intent,
        reply: oneshot::Sender<IntentResult<()>>,
    },
    Update {
        uuid: Uuid,
        intent: Intent,
        reply: oneshot::Sender<IntentResult<()>>,
    },
    Remove {
        uuid: Uuid,
        reply: oneshot::Sender<IntentResult<()>>,
    },
    RemoveAll {
        reply: oneshot::Sender<IntentResult<()>>,
    },
}

/// An inbound event for the controller loop.
#[derive(Debug)]
pub enum Event {
    /// Intent create/update/delete request.
    Intent(IntentRequest),
    /// A switch punted a frame to the controller.
    PacketIn(PacketIn),
    /// A switch joined (or rejoined) the control channel.
    SwitchJoin(SwitchId),
}

/// The controller core: owned state plus handles to the collaborators.
pub struct Controller {
    registry: IntentRegistry,
    learning: LearningSwitch,
    topology: Arc<dyn TopologyView>,
    gateway: Arc<dyn SwitchGateway>,
}

impl Controller {
    pub fn new(topology: Arc<dyn TopologyView>, gateway: Arc<dyn SwitchGateway>) -> Self {
        Self {
            registry: IntentRegistry::new(),
            learning: LearningSwitch::new(),
            topology,
            gateway,
        }
    }

    /// The intent registry (read access, for inspection and tests).
    pub fn registry(&self) -> &IntentRegistry {
        &self.registry
    }

    /// The learning switch state (read access, for inspection and tests).
    pub fn learning(&self) -> &LearningSwitch {
        &self.learning
    }

    /// Drains events until every sender is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        info!("event channel closed, controller stopping");
    }

    /// Processes one event to completion.
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Intent(request) => self.handle_intent_request(request).await,
            Event::PacketIn(pkt) => {
                self.learning
                    .handle_packet_in(self.gateway.as_ref(), &pkt)
                    .await;
            }
            Event::SwitchJoin(switch) => {
                // Clear any leftover forwarding state before learning or
                // intents touch the switch.
                info!(%switch, "switch joined, clearing forwarding table");
                if let Err(err) = self.gateway.reset_table(switch).await {
                    warn!(%switch, %err, "table reset submission failed");
                }
            }
        }
    }

    async fn handle_intent_request(&mut self, request: IntentRequest) {
        match request {
            IntentRequest::Add { intent, reply } => {
                let snapshot = TopologySnapshot::capture(self.topology.as_ref());
                let result = self
                    .registry
                    .add(&snapshot, self.gateway.as_ref(), intent)
                    .await;
                let _ = reply.send(result);
            }
            IntentRequest::Update {
                uuid,
                intent,
                reply,
            } => {
                let snapshot = TopologySnapshot::capture(self.topology.as_ref());
                let result = self
                    .registry
                    .update(&snapshot, self.gateway.as_ref(), uuid, intent)
                    .await;
                let _ = reply.send(result);
            }
            IntentRequest::Remove { uuid, reply } => {
                let result = self.registry.remove(self.gateway.as_ref(), uuid).await;
                let _ = reply.send(result);
            }
            IntentRequest::RemoveAll { reply } => {
                self.registry.remove_all(self.gateway.as_ref()).await;
                let _ = reply.send(Ok(()));
            }
        }
    }
}
