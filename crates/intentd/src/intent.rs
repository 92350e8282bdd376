//! Intents and their lifecycle registry.
//!
//! [`IntentRegistry`] is the only long-lived mutable intent state. It owns
//! each stored [`Intent`] together with the rules compiled for it, and it is
//! the single place install/delete instructions for intent rules originate.
//! Serialization of concurrent operations is the dispatcher's job (see
//! `dispatch`); the registry assumes it runs one operation at a time.

use std::collections::HashMap;

use sdn_types::{PortNo, SwitchId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::compiler;
use crate::error::{IntentError, IntentResult};
use crate::flow::{FlowMatch, FlowRule};
use crate::gateway::SwitchGateway;
use crate::topology::TopologySnapshot;

/// A declarative forwarding goal: traffic matching the predicate must reach
/// `target_port` on `target`, from anywhere in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique key; caller-assigned or generated at construction.
    pub uuid: Uuid,
    /// Header-field predicate selecting the traffic.
    pub matching: FlowMatch,
    /// Delivery switch.
    pub target: SwitchId,
    /// Delivery port on the target switch.
    pub target_port: PortNo,
    /// Rules compiled for this intent; empty until added to the registry.
    #[serde(default, skip)]
    rules: Vec<FlowRule>,
}

impl Intent {
    /// Creates an intent with a generated uuid and no compiled rules.
    pub fn new(matching: FlowMatch, target: SwitchId, target_port: PortNo) -> Self {
        Self::with_uuid(Uuid::new_v4(), matching, target, target_port)
    }

    /// Creates an intent under a caller-assigned uuid.
    pub fn with_uuid(
        uuid: Uuid,
        matching: FlowMatch,
        target: SwitchId,
        target_port: PortNo,
    ) -> Self {
        Self {
            uuid,
            matching,
            target,
            target_port,
            rules: Vec::new(),
        }
    }

    /// The rules compiled for this intent. Empty before `add`, fully
    /// populated after: an intent is never tracked half-installed.
    pub fn rules(&self) -> &[FlowRule] {
        &self.rules
    }
}

/// Owner of all installed intents, keyed by uuid.
#[derive(Debug, Default)]
pub struct IntentRegistry {
    intents: HashMap<Uuid, Intent>,
}

impl IntentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Looks up a stored intent.
    pub fn get(&self, uuid: Uuid) -> Option<&Intent> {
        self.intents.get(&uuid)
    }

    /// Uuids of all stored intents, in no particular order.
    pub fn uuids(&self) -> Vec<Uuid> {
        self.intents.keys().copied().collect()
    }

    /// Compiles the intent against the snapshot, pushes every compiled rule
    /// to the gateway, and stores the intent.
    ///
    /// Fails with [`IntentError::InvalidTarget`] before any instruction is
    /// submitted. A transport failure on an individual install is logged and
    /// not rolled back; the rule stays tracked so a later remove still
    /// issues its delete.
    pub async fn add(
        &mut self,
        snapshot: &TopologySnapshot,
        gateway: &dyn SwitchGateway,
        mut intent: Intent,
    ) -> IntentResult<()> {
        let rules = compiler::compile(snapshot, &intent)?;

        for rule in &rules {
            if let Err(err) = gateway.install_rule(rule).await {
                warn!(
                    intent = %intent.uuid,
                    switch = %rule.switch,
                    %err,
                    "install submission failed, continuing without rollback"
                );
            }
        }

        info!(intent = %intent.uuid, rules = rules.len(), "intent added");
        intent.rules = rules;
        self.intents.insert(intent.uuid, intent);
        Ok(())
    }

    /// Removes the stored intent under `uuid`, then adds `intent`.
    ///
    /// Not atomic: between the two steps neither rule set is installed.
    /// The dispatcher's run-to-completion guarantee keeps other intent
    /// operations from interleaving.
    pub async fn update(
        &mut self,
        snapshot: &TopologySnapshot,
        gateway: &dyn SwitchGateway,
        uuid: Uuid,
        intent: Intent,
    ) -> IntentResult<()> {
        self.remove(gateway, uuid).await?;
        self.add(snapshot, gateway, intent).await
    }

    /// Issues one delete per rule recorded for the intent, then erases it.
    ///
    /// Each delete carries the rule's own recorded priority, so it strictly
    /// matches what was installed. Fails with [`IntentError::NotFound`] when
    /// the uuid is absent; no state changes in that case.
    pub async fn remove(&mut self, gateway: &dyn SwitchGateway, uuid: Uuid) -> IntentResult<()> {
        let intent = self
            .intents
            .remove(&uuid)
            .ok_or(IntentError::NotFound(uuid))?;

        for rule in intent.rules() {
            if let Err(err) = gateway
                .delete_rule(rule.switch, &rule.matching, rule.priority)
                .await
            {
                warn!(intent = %uuid, switch = %rule.switch, %err, "delete submission failed");
            }
        }

        info!(intent = %uuid, rules = intent.rules().len(), "intent removed");
        Ok(())
    }

    /// Removes every stored intent. Order is unspecified; the net effect is
    /// identical to removing each uuid individually.
    pub async fn remove_all(&mut self, gateway: &dyn SwitchGateway) {
        for uuid in self.uuids() {
            // The uuid came from the map, so NotFound cannot occur here.
            if let Err(err) = self.remove(gateway, uuid).await {
                warn!(intent = %uuid, %err, "remove-all skipped an intent");
            }
        }
    }
}
