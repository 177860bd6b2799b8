//! Permission evaluator
//!
//! A grant matches a query when one of these holds:
//!
//! 1. it is `{*, *, *}`;
//! 2. it is `{module, *, *}` for the query's module;
//! 3. it is `{module, *, resource}` for the query's module and resource;
//! 4. it is `{module, action, *}` for the query's module and action;
//! 5. it equals the query exactly.
//!
//! A module wildcard only ever grants as part of `{*, *, *}`: a tuple such
//! as `{*, view, *}` matches nothing. Malformed tuples (any empty field)
//! match nothing. Evaluation is a disjunction over the grants, so their
//! order never affects the result.

use shared::{AccessQuery, Permission, WILDCARD};

/// Check whether a single grant matches a query
pub fn matches(grant: &Permission, module: &str, action: &str, resource: &str) -> bool {
    if !grant.is_well_formed() {
        return false;
    }

    if grant.is_superuser() {
        return true;
    }

    if grant.module != module {
        return false;
    }

    let resource_ok = grant.resource == WILDCARD || grant.resource == resource;

    if grant.action == WILDCARD {
        return resource_ok;
    }

    grant.action == action && resource_ok
}

/// Decide whether any of `grants` allows `(module, action, resource)`
pub fn has_permission<'a>(
    grants: impl IntoIterator<Item = &'a Permission>,
    module: &str,
    action: &str,
    resource: &str,
) -> bool {
    grants
        .into_iter()
        .any(|grant| matches(grant, module, action, resource))
}

/// [`has_permission`] for a validated query
pub fn allows<'a>(grants: impl IntoIterator<Item = &'a Permission>, query: &AccessQuery) -> bool {
    has_permission(grants, query.module(), query.action(), query.resource())
}

/// First grant that matches `query`, if any
pub fn matching_grant<'a>(
    grants: impl IntoIterator<Item = &'a Permission>,
    query: &AccessQuery,
) -> Option<&'a Permission> {
    grants
        .into_iter()
        .find(|grant| matches(grant, query.module(), query.action(), query.resource()))
}
