use portal_core::plan::{open_spec_picker, destination_subscription, SPEC_PICKER_BLADE};
use portal_core::{BladeResult, PlanChoice, PortalConfig, PortalError, ResourceGroupChoice};
use portal_test_utils::{
    new_plan_info, resource_group, server_farm, server_farm_id, FailingBladeOpener,
    RecordingBladeOpener, SUBSCRIPTION,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn summary<T>(options: &portal_options::OptionList<T>) -> Vec<(String, String, bool, bool)> {
    options
        .iter()
        .map(|o| {
            (
                o.key().to_string(),
                o.text().to_string(),
                o.is_default(),
                o.is_virtual(),
            )
        })
        .collect()
}

#[test]
fn test_new_plan_is_listed_after_existing_plans() {
    let config = PortalConfig::default();
    let info = new_plan_info("PlanNew", "rg-new");
    let farms = vec![
        server_farm("rg-a", "PlanA", "EP1", "ElasticPremium"),
        server_farm("rg-b", "PlanB", "Y1", "Dynamic"),
    ];

    let options = info.server_farm_options(&farms, &config).unwrap();

    assert_eq!(
        summary(&options),
        vec![
            (server_farm_id("rg-a", "PlanA").to_lowercase(), "PlanA".to_string(), true, false),
            (server_farm_id("rg-b", "PlanB").to_lowercase(), "PlanB".to_string(), false, false),
            ("plannew".to_string(), "(new) PlanNew".to_string(), false, true),
        ]
    );
}

#[test]
fn test_existing_plan_mode_hides_placeholder_when_plans_exist() {
    let config = PortalConfig::default();
    let mut info = new_plan_info("PlanNew", "rg-new");
    let farm = server_farm("rg-a", "PlanA", "EP1", "ElasticPremium");
    info.choice = PlanChoice::Existing(farm.clone());

    let options = info.server_farm_options(&[farm], &config).unwrap();
    assert_eq!(options.len(), 1);
    assert!(!options.as_slice()[0].is_virtual());

    let options = info.server_farm_options(&[], &config).unwrap();
    assert_eq!(
        summary(&options),
        vec![("plannew".to_string(), "(new) PlanNew".to_string(), true, true)]
    );
}

#[test]
fn test_resource_group_options_follow_group_choice() {
    let config = PortalConfig::default();
    let groups = vec![resource_group("rg-a"), resource_group("rg-b")];

    let info = new_plan_info("PlanNew", "rg-new");
    let options = info.resource_group_options(&groups, &config).unwrap();
    assert_eq!(options.len(), 3);
    assert_eq!(options.default_option().unwrap().text(), "rg-a");
    assert!(options.find("RG-NEW").unwrap().is_virtual());

    let mut info = new_plan_info("PlanNew", "rg-new");
    info.new_plan.resource_group = ResourceGroupChoice::Existing(resource_group("rg-b"));
    let options = info.resource_group_options(&groups, &config).unwrap();
    assert_eq!(options.len(), 2);
    assert!(!options.contains_key("rg-new"));
}

#[test]
fn test_proposed_group_matching_existing_name_is_dropped() {
    let config = PortalConfig::default();
    let mut group = resource_group("rg-a");
    group.id = "rg-a".to_string();
    let info = new_plan_info("PlanNew", "RG-A");

    let options = info.resource_group_options(&[group], &config).unwrap();
    assert_eq!(options.len(), 1);
    assert!(!options.as_slice()[0].is_virtual());
}

#[test]
fn test_blank_server_farm_id_is_rejected() {
    let config = PortalConfig::default();
    let mut farm = server_farm("rg-a", "PlanA", "EP1", "ElasticPremium");
    farm.id = String::new();
    let info = new_plan_info("PlanNew", "rg-new");

    let err = info.server_farm_options(&[farm], &config).unwrap_err();
    assert_eq!(err.to_string(), "record 0 ('PlanA') has no identifier");
}

#[test]
fn test_destination_subscription_from_current_plan() {
    let id = server_farm_id("rg-a", "PlanA");
    assert_eq!(destination_subscription(&id).unwrap(), SUBSCRIPTION);
    assert!(destination_subscription("/providers/x").is_err());
}

#[tokio::test]
async fn test_spec_picker_round_trip_updates_sku() {
    let opener = RecordingBladeOpener::replying([BladeResult::completed(json!({
        "value": { "skuCode": "EP1", "tier": "ElasticPremium" }
    }))]);
    let info = new_plan_info("PlanNew", "rg-new");
    let current = server_farm_id("rg-a", "PlanA");

    let updated = open_spec_picker(&opener, &current, &info).await.unwrap();

    assert_eq!(updated.selected_sku_label(), "ElasticPremium (EP1)");
    let requests = opener.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].detail_blade, SPEC_PICKER_BLADE);
    assert_eq!(requests[0].detail_blade_inputs["id"], current.as_str());
}

#[tokio::test]
async fn test_spec_picker_dismissed_keeps_values() {
    let opener = RecordingBladeOpener::new();
    let info = new_plan_info("PlanNew", "rg-new");

    let updated = open_spec_picker(&opener, &server_farm_id("rg-a", "PlanA"), &info)
        .await
        .unwrap();
    assert_eq!(updated, info);
}

#[tokio::test]
async fn test_spec_picker_open_failure_propagates() {
    let info = new_plan_info("PlanNew", "rg-new");
    let result = open_spec_picker(&FailingBladeOpener, &server_farm_id("rg-a", "PlanA"), &info).await;
    assert!(matches!(result, Err(PortalError::Blade(_))));
}
