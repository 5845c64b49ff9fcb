//! Testing utilities for the portal workspace
//!
//! Shared fixtures and in-memory fakes for the external collaborators.

#![allow(missing_docs)]

use parking_lot::Mutex;
use portal_core::plan::ArmSku;
use portal_core::{
    BladeError, BladeOpener, BladeRequest, BladeResult, KeyVaultLookup, KeyVaultReference,
    LookupError, NewPlanInfo, PlanChoice, ResourceGroup, ResourceGroupChoice, ServerFarm,
    ServerFarmInfo, TelemetrySink, VaultResource,
};
use serde_json::{Map, Value};
use std::collections::VecDeque;

pub const SUBSCRIPTION: &str = "0000-sub";

pub fn resource_group_id(name: &str) -> String {
    format!("/subscriptions/{SUBSCRIPTION}/resourceGroups/{name}")
}

pub fn server_farm_id(resource_group: &str, name: &str) -> String {
    format!(
        "{}/providers/Microsoft.Web/serverfarms/{name}",
        resource_group_id(resource_group)
    )
}

pub fn site_id(resource_group: &str, name: &str) -> String {
    format!(
        "{}/providers/Microsoft.Web/sites/{name}",
        resource_group_id(resource_group)
    )
}

pub fn resource_group(name: &str) -> ResourceGroup {
    ResourceGroup {
        id: resource_group_id(name),
        name: name.to_string(),
        location: "West US".to_string(),
    }
}

pub fn server_farm(resource_group: &str, name: &str, sku: &str, tier: &str) -> ServerFarm {
    ServerFarm {
        id: server_farm_id(resource_group, name),
        name: name.to_string(),
        location: "West US".to_string(),
        sku: ArmSku {
            name: sku.to_string(),
            tier: tier.to_string(),
        },
    }
}

/// New consumption plan in a new resource group
pub fn new_plan_info(plan_name: &str, resource_group_name: &str) -> ServerFarmInfo {
    ServerFarmInfo {
        new_plan: NewPlanInfo {
            name: plan_name.to_string(),
            sku_code: "Y1".to_string(),
            tier: "Dynamic".to_string(),
            new_resource_group_name: resource_group_name.to_string(),
            resource_group: ResourceGroupChoice::New,
        },
        choice: PlanChoice::New,
    }
}

pub fn key_vault_reference(status: &str) -> KeyVaultReference {
    KeyVaultReference {
        status: status.to_string(),
        vault_name: "contoso-kv".to_string(),
        secret_name: "ConnectionString".to_string(),
        secret_version: "0f3c".to_string(),
        details: String::new(),
        identity_type: "SystemAssigned".to_string(),
    }
}

/// Lookup returning a fixed answer and recording its calls
#[derive(Debug, Default)]
pub struct FakeKeyVaultLookup {
    answer: Option<Result<Vec<VaultResource>, LookupError>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeKeyVaultLookup {
    pub fn found(vault_id: &str) -> Self {
        Self {
            answer: Some(Ok(vec![VaultResource {
                id: vault_id.to_string(),
            }])),
            calls: Mutex::default(),
        }
    }

    pub fn empty() -> Self {
        Self {
            answer: Some(Ok(Vec::new())),
            calls: Mutex::default(),
        }
    }

    pub fn failing(error: LookupError) -> Self {
        Self {
            answer: Some(Err(error)),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl KeyVaultLookup for FakeKeyVaultLookup {
    async fn find_vaults(
        &self,
        subscription_id: &str,
        vault_uri: &str,
    ) -> Result<Vec<VaultResource>, LookupError> {
        self.calls
            .lock()
            .push((subscription_id.to_string(), vault_uri.to_string()));
        self.answer.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Blade opener replaying queued results and recording requests
#[derive(Debug, Default)]
pub struct RecordingBladeOpener {
    results: Mutex<VecDeque<BladeResult>>,
    requests: Mutex<Vec<BladeRequest>>,
}

impl RecordingBladeOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(results: impl IntoIterator<Item = BladeResult>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<BladeRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait::async_trait]
impl BladeOpener for RecordingBladeOpener {
    async fn open_blade(&self, request: BladeRequest) -> Result<BladeResult, BladeError> {
        self.requests.lock().push(request);
        Ok(self
            .results
            .lock()
            .pop_front()
            .unwrap_or_else(BladeResult::dismissed))
    }
}

/// Blade opener that always fails
#[derive(Debug, Default)]
pub struct FailingBladeOpener;

#[async_trait::async_trait]
impl BladeOpener for FailingBladeOpener {
    async fn open_blade(&self, request: BladeRequest) -> Result<BladeResult, BladeError> {
        Err(BladeError::OpenFailed {
            blade: request.detail_blade,
            reason: "host unavailable".to_string(),
        })
    }
}

/// Sink keeping every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Map<String, Value>)> {
        self.events.lock().clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn track(&self, event: &str, properties: &Map<String, Value>) {
        self.events
            .lock()
            .push((event.to_string(), properties.clone()));
    }
}
