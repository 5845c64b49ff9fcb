//! Change app plan: destination plan details
//!
//! Derived state for the "destination plan" section of the change-plan page:
//! the plan and resource group dropdowns, the resource group and pricing tier
//! labels, and the spec picker round trip.

use crate::blade::{BladeOpener, BladeRequest, BladeResult};
use crate::config::PortalConfig;
use crate::descriptor::ArmResourceDescriptor;
use crate::error::{BladeError, DescriptorError, PortalError};
use crate::site::Site;
use portal_options::{
    reconcile, InsertionPolicy, OptionList, Record, ValidationError, VirtualEntry, VirtualKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Blade that lets the user pick a pricing tier
pub const SPEC_PICKER_BLADE: &str = "SpecPickerFrameBlade";

/// SKU preselected when the spec picker opens
pub const SPEC_PICKER_DEFAULT_SKU: &str = "F1";

/// ARM SKU
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmSku {
    /// SKU code (e.g. `P1v2`)
    pub name: String,
    /// Tier (e.g. `PremiumV2`)
    pub tier: String,
}

/// App Service plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFarm {
    /// ARM id
    pub id: String,
    /// Plan name
    pub name: String,
    /// Region
    #[serde(default)]
    pub location: String,
    /// Pricing tier
    pub sku: ArmSku,
}

/// Resource group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// ARM id
    pub id: String,
    /// Group name
    pub name: String,
    /// Region
    #[serde(default)]
    pub location: String,
}

/// Resource group chosen for a new plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceGroupChoice {
    /// Create [`NewPlanInfo::new_resource_group_name`]
    New,
    /// Use an existing group
    Existing(ResourceGroup),
}

/// Draft of a plan to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlanInfo {
    /// Proposed plan name
    pub name: String,
    /// Selected SKU code
    pub sku_code: String,
    /// Selected tier
    pub tier: String,
    /// Proposed resource group name, used when creating a group
    pub new_resource_group_name: String,
    /// Where the plan goes
    pub resource_group: ResourceGroupChoice,
}

/// Plan the app moves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChoice {
    /// Create the plan described by [`ServerFarmInfo::new_plan`]
    New,
    /// Move to an existing plan
    Existing(ServerFarm),
}

/// Form values of the destination plan section
///
/// The new-plan draft is kept while the user switches to an existing plan
/// so switching back restores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFarmInfo {
    /// New plan draft
    pub new_plan: NewPlanInfo,
    /// Current choice
    pub choice: PlanChoice,
}

/// How the pricing tier is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingTierDisplay {
    /// Visible text
    pub text: String,
    /// Accessible label
    pub aria_label: String,
    /// Whether clicking opens the spec picker
    pub opens_spec_picker: bool,
}

/// Hosting plan tier offered by the plan type radio group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanTier {
    /// Consumption
    Dynamic,
    /// Functions Premium
    ElasticPremium,
}

/// Radio option for the plan type choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanTypeOption {
    /// Tier selected by the option
    pub tier: PlanTier,
    /// Localization key of the label
    pub label_key: &'static str,
}

/// Value returned by the spec picker blade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecPickerSelection {
    /// Chosen SKU code
    pub sku_code: String,
    /// Chosen tier
    pub tier: String,
}

#[derive(Deserialize)]
struct SpecPickerOutput {
    value: SpecPickerSelection,
}

impl ServerFarmInfo {
    /// Whether a new plan will be created
    #[inline]
    #[must_use]
    pub fn is_new_plan(&self) -> bool {
        matches!(self.choice, PlanChoice::New)
    }

    /// Resource group shown under the plan dropdown
    ///
    /// A group to be created is shown with the new-entry format; for an
    /// existing plan the group is read from the plan's resource id.
    pub fn selected_resource_group_label(
        &self,
        config: &PortalConfig,
    ) -> Result<String, DescriptorError> {
        match (&self.choice, &self.new_plan.resource_group) {
            (PlanChoice::New, ResourceGroupChoice::New) => {
                Ok(config.format_new(&self.new_plan.new_resource_group_name))
            }
            (PlanChoice::New, ResourceGroupChoice::Existing(group)) => Ok(group.name.clone()),
            (PlanChoice::Existing(plan), _) => {
                let descriptor = ArmResourceDescriptor::parse(&plan.id)?;
                descriptor.require_resource_group().map(str::to_string)
            }
        }
    }

    /// Region shown for the destination plan
    ///
    /// A plan can only move within the site's region, so a new plan takes the
    /// site's location; an existing plan reports its own when known.
    #[must_use]
    pub fn selected_region<'a>(&'a self, site: &'a Site) -> &'a str {
        match &self.choice {
            PlanChoice::Existing(plan) if !plan.location.is_empty() => &plan.location,
            _ => &site.location,
        }
    }

    /// `"{tier} ({sku code})"` of the selected plan
    #[must_use]
    pub fn selected_sku_label(&self) -> String {
        let (tier, sku_code) = match &self.choice {
            PlanChoice::New => (&self.new_plan.tier, &self.new_plan.sku_code),
            PlanChoice::Existing(plan) => (&plan.sku.tier, &plan.sku.name),
        };
        format!("{tier} ({sku_code})")
    }

    /// Pricing tier value; only a new plan's tier can be changed
    #[must_use]
    pub fn pricing_tier_display(&self, pricing_tier_label: &str) -> PricingTierDisplay {
        let text = self.selected_sku_label();
        PricingTierDisplay {
            aria_label: format!("{pricing_tier_label} {text}"),
            text,
            opens_spec_picker: self.is_new_plan(),
        }
    }

    /// Options of the plan dropdown
    ///
    /// The proposed plan is always listed while creating a new plan; otherwise
    /// it only shows up when the subscription has no plans to pick from.
    pub fn server_farm_options(
        &self,
        server_farms: &[ServerFarm],
        config: &PortalConfig,
    ) -> Result<OptionList<ServerFarm>, ValidationError> {
        let records: Vec<Record<ServerFarm>> = server_farms
            .iter()
            .map(|farm| Record::new(farm.id.clone(), farm.name.clone(), farm.clone()))
            .collect();
        let entry = proposed_entry(VirtualKind::NewPlan, &self.new_plan.name, config);
        let policy = if self.is_new_plan() {
            InsertionPolicy::Append
        } else {
            InsertionPolicy::PrependIfEmpty
        };
        reconcile(&records, entry.as_ref(), policy)
    }

    /// Options of the resource group dropdown
    pub fn resource_group_options(
        &self,
        resource_groups: &[ResourceGroup],
        config: &PortalConfig,
    ) -> Result<OptionList<ResourceGroup>, ValidationError> {
        let records: Vec<Record<ResourceGroup>> = resource_groups
            .iter()
            .map(|group| Record::new(group.id.clone(), group.name.clone(), group.clone()))
            .collect();
        let entry = proposed_entry(
            VirtualKind::NewResourceGroup,
            &self.new_plan.new_resource_group_name,
            config,
        );
        let policy = match self.new_plan.resource_group {
            ResourceGroupChoice::New => InsertionPolicy::Append,
            ResourceGroupChoice::Existing(_) => InsertionPolicy::PrependIfEmpty,
        };
        reconcile(&records, entry.as_ref(), policy)
    }

    /// Copy with the new plan's SKU replaced
    #[must_use]
    pub fn with_sku(&self, selection: &SpecPickerSelection) -> Self {
        let mut info = self.clone();
        info.new_plan.sku_code.clone_from(&selection.sku_code);
        info.new_plan.tier.clone_from(&selection.tier);
        info
    }
}

/// Blank drafts produce no placeholder
fn proposed_entry(kind: VirtualKind, name: &str, config: &PortalConfig) -> Option<VirtualEntry> {
    if name.trim().is_empty() {
        return None;
    }
    Some(VirtualEntry::new(kind, name).with_text(config.format_new(name)))
}

/// Plan type choices, shown only when the feature is enabled
#[must_use]
pub fn plan_type_options(config: &PortalConfig) -> Vec<PlanTypeOption> {
    if !config.enable_dynamic_to_premium {
        return Vec::new();
    }
    vec![
        PlanTypeOption {
            tier: PlanTier::Dynamic,
            label_key: "consumptionPlan",
        },
        PlanTypeOption {
            tier: PlanTier::ElasticPremium,
            label_key: "functionPremiumPlan",
        },
    ]
}

/// Subscription the destination plan must live in
pub fn destination_subscription(current_server_farm_id: &str) -> Result<String, DescriptorError> {
    ArmResourceDescriptor::parse(current_server_farm_id).map(|d| d.subscription().to_string())
}

/// Request opening the spec picker for the current plan
#[must_use]
pub fn spec_picker_request(current_server_farm_id: &str) -> BladeRequest {
    BladeRequest::new(
        SPEC_PICKER_BLADE,
        json!({
            "id": current_server_farm_id,
            "data": {
                "selectedSkuCode": SPEC_PICKER_DEFAULT_SKU,
                "returnObjectResult": true,
            },
        }),
    )
    .as_context_blade()
}

/// Apply a spec picker outcome to the form values
///
/// Only a blade that closed itself carries a selection; any other outcome
/// leaves the values unchanged.
pub fn apply_spec_picker_result(
    info: &ServerFarmInfo,
    result: &BladeResult,
) -> Result<ServerFarmInfo, BladeError> {
    let Some(data) = result.data.as_ref().filter(|_| result.is_completed()) else {
        return Ok(info.clone());
    };
    let output: SpecPickerOutput = serde_json::from_value(data.clone())?;
    tracing::debug!(
        sku = %output.value.sku_code,
        tier = %output.value.tier,
        "spec picker selection applied"
    );
    Ok(info.with_sku(&output.value))
}

/// Open the spec picker and apply the chosen SKU
pub async fn open_spec_picker(
    opener: &dyn BladeOpener,
    current_server_farm_id: &str,
    info: &ServerFarmInfo,
) -> Result<ServerFarmInfo, PortalError> {
    let result = opener
        .open_blade(spec_picker_request(current_server_farm_id))
        .await?;
    Ok(apply_spec_picker_result(info, &result)?)
}
