//! Property-based tests for the permission evaluator

use proptest::prelude::*;
use rbac::{has_permission, normalize_entry, normalize_legacy};
use shared::{Permission, PermissionEntry, PermissionSet};

/// Concrete identifiers (never the wildcard, never empty)
fn ident() -> impl Strategy<Value = String> {
    r"[a-z][a-z0-9]{0,8}".prop_map(|s| s.to_string())
}

/// A field that is either concrete or the wildcard
fn field() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => ident(),
        1 => Just("*".to_string()),
    ]
}

fn grant() -> impl Strategy<Value = Permission> {
    (field(), field(), field()).prop_map(|(m, a, r)| Permission::new(m, a, r))
}

fn query() -> impl Strategy<Value = (String, String, String)> {
    (ident(), ident(), ident())
}

proptest! {
    #[test]
    fn prop_superuser_grants_every_query(
        others in prop::collection::vec(grant(), 0..6),
        (m, a, r) in query(),
    ) {
        let mut grants: PermissionSet = others.into();
        grants.push(Permission::superuser());
        prop_assert!(has_permission(&grants, &m, &a, &r));
    }

    #[test]
    fn prop_empty_set_denies_every_query((m, a, r) in query()) {
        prop_assert!(!has_permission(&PermissionSet::new(), &m, &a, &r));
    }

    #[test]
    fn prop_order_never_matters(
        grants in prop::collection::vec(grant(), 0..8),
        (m, a, r) in query(),
        seed in any::<u64>(),
    ) {
        let forward = has_permission(&grants, &m, &a, &r);

        let mut reversed = grants.clone();
        reversed.reverse();
        prop_assert_eq!(forward, has_permission(&reversed, &m, &a, &r));

        let mut rotated = grants.clone();
        if !rotated.is_empty() {
            let by = (seed as usize) % rotated.len();
            rotated.rotate_left(by);
        }
        prop_assert_eq!(forward, has_permission(&rotated, &m, &a, &r));
    }

    #[test]
    fn prop_exact_tuple_always_grants_itself((m, a, r) in query()) {
        let grants = vec![Permission::new(m.clone(), a.clone(), r.clone())];
        prop_assert!(has_permission(&grants, &m, &a, &r));
    }

    #[test]
    fn prop_module_grants_never_leak_across_modules(
        (m, a, r) in query(),
        other in ident(),
    ) {
        prop_assume!(other != m);
        let grants = vec![
            Permission::new(other.clone(), "*", "*"),
            Permission::new(other.clone(), a.clone(), r.clone()),
        ];
        prop_assert!(!has_permission(&grants, &m, &a, &r));
    }

    #[test]
    fn prop_tuple_normalization_is_identity(p in grant()) {
        let entry = PermissionEntry::Tuple(p.clone());
        prop_assert_eq!(normalize_entry(&entry), p);
    }

    #[test]
    fn prop_legacy_three_part_shape(
        m in ident(),
        a in ident(),
        r in r"[a-z]{1,6}(_[a-z]{1,6}){0,2}",
    ) {
        let raw = format!("{}_{}_{}", m, a, r);
        prop_assume!(raw != "all");
        prop_assert_eq!(normalize_legacy(&raw), Permission::new(m, a, r));
    }

    #[test]
    fn prop_legacy_two_part_shape(m in ident(), a in ident()) {
        prop_assert_eq!(
            normalize_legacy(&format!("{}_{}", m, a)),
            Permission::new(m, a, "*")
        );
    }

    #[test]
    fn prop_legacy_bare_module(m in ident()) {
        prop_assume!(m != "all");
        prop_assert_eq!(normalize_legacy(&m), Permission::new(m.clone(), "view", "*"));
    }
}
