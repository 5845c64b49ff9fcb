use portal_options::{reconcile, InsertionPolicy, Record, VirtualEntry, VirtualKind};
use proptest::prelude::*;
use std::collections::HashSet;

fn records_from(ids: &[String]) -> Vec<Record<usize>> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| Record::new(id.clone(), format!("name-{i}"), i))
        .collect()
}

fn unique_ids() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-z][a-z0-9]{0,7}", 0..12)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

fn policy() -> impl Strategy<Value = InsertionPolicy> {
    prop_oneof![
        Just(InsertionPolicy::Append),
        Just(InsertionPolicy::PrependIfEmpty),
        Just(InsertionPolicy::Prepend),
    ]
}

proptest! {
    #[test]
    fn prop_records_only_preserve_order(ids in unique_ids()) {
        let records = records_from(&ids);
        let options = reconcile(&records, None, InsertionPolicy::Append).unwrap();

        prop_assert_eq!(options.len(), records.len());
        for (option, record) in options.iter().zip(&records) {
            prop_assert_eq!(option.key(), record.key());
        }
        let defaults: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_default())
            .map(|(i, _)| i)
            .collect();
        if records.is_empty() {
            prop_assert!(defaults.is_empty());
        } else {
            prop_assert_eq!(defaults, vec![0]);
        }
    }

    #[test]
    fn prop_append_adds_non_colliding_virtual_last(ids in unique_ids()) {
        // Generated ids never contain a dash.
        let entry = VirtualEntry::new(VirtualKind::NewPlan, "ZZ-New-Entry");
        let records = records_from(&ids);
        let options = reconcile(&records, Some(&entry), InsertionPolicy::Append).unwrap();

        prop_assert_eq!(options.len(), records.len() + 1);
        let last = options.as_slice().last().unwrap();
        prop_assert!(last.is_virtual());
        prop_assert_eq!(last.key(), "zz-new-entry");
        prop_assert_eq!(last.is_default(), records.is_empty());
    }

    #[test]
    fn prop_colliding_virtual_is_excluded(
        ids in unique_ids().prop_filter("need records", |ids| !ids.is_empty()),
        pick in any::<prop::sample::Index>(),
        policy in policy(),
    ) {
        let records = records_from(&ids);
        let target = &ids[pick.index(ids.len())];
        let entry = VirtualEntry::new(VirtualKind::NewResourceGroup, target.to_uppercase());
        let options = reconcile(&records, Some(&entry), policy).unwrap();

        prop_assert_eq!(options.len(), records.len());
        prop_assert!(options.iter().all(|o| !o.is_virtual()));
    }

    #[test]
    fn prop_keys_unique_and_single_default(
        ids in proptest::collection::vec("[a-cA-C]{1,2}", 0..16),
        name in "[a-cA-C]{1,2}",
        policy in policy(),
    ) {
        let records = records_from(&ids);
        let entry = VirtualEntry::new(VirtualKind::NewPlan, name);
        let options = reconcile(&records, Some(&entry), policy).unwrap();

        let keys: HashSet<&str> = options.keys().collect();
        prop_assert_eq!(keys.len(), options.len());

        let distinct: HashSet<String> = ids.iter().map(|id| id.to_lowercase()).collect();
        prop_assert!(options.len() >= distinct.len());

        let default_count = options.iter().filter(|o| o.is_default()).count();
        prop_assert_eq!(default_count, usize::from(!options.is_empty()));
    }

    #[test]
    fn prop_reconcile_is_idempotent(
        ids in proptest::collection::vec("[a-zA-Z]{1,4}", 0..10),
        name in "[a-zA-Z]{0,4}",
        policy in policy(),
    ) {
        let records = records_from(&ids);
        let entry = VirtualEntry::new(VirtualKind::NewPlan, name);
        let first = reconcile(&records, Some(&entry), policy).unwrap();
        let second = reconcile(&records, Some(&entry), policy).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_documented_examples() {
    let records = vec![Record::new("RG1", "Group One", ())];
    let entry = VirtualEntry::new(VirtualKind::NewResourceGroup, "NewGroup");

    let appended = reconcile(&records, Some(&entry), InsertionPolicy::Append).unwrap();
    let summary: Vec<_> = appended
        .iter()
        .map(|o| (o.key(), o.text(), o.is_default()))
        .collect();
    assert_eq!(
        summary,
        vec![("rg1", "Group One", true), ("newgroup", "NewGroup", false)]
    );

    let empty: Vec<Record<()>> = vec![];
    let injected = reconcile(&empty, Some(&entry), InsertionPolicy::PrependIfEmpty).unwrap();
    let summary: Vec<_> = injected
        .iter()
        .map(|o| (o.key(), o.text(), o.is_default()))
        .collect();
    assert_eq!(summary, vec![("newgroup", "NewGroup", true)]);
}
