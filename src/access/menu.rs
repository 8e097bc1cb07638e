//! Navigation menu resolution
//!
//! Maps the acting role to the ordered set of destinations it may see.
//! Patients get exactly the self-service portal; everyone else gets the
//! fixed base sequence, and admins get the two administrative destinations
//! appended. The resolver is a pure function of the role and holds no state
//! across identities, so it is re-evaluated on every sign-in.

use crate::access::capability::Capability;
use crate::domain::Role;

/// A navigation destination visible to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavDestination {
    pub label: &'static str,
    pub route: &'static str,
    /// Capability the destination represents, for the gated entries
    pub capability: Option<Capability>,
}

const PORTAL: NavDestination = NavDestination {
    label: "My Portal",
    route: "/patient-portal",
    capability: None,
};

const BASE: [NavDestination; 3] = [
    NavDestination {
        label: "Dashboard",
        route: "/dashboard",
        capability: None,
    },
    NavDestination {
        label: "Patients",
        route: "/patients",
        capability: None,
    },
    NavDestination {
        label: "Doctors",
        route: "/doctors",
        capability: None,
    },
];

const ADMIN_EXTRA: [NavDestination; 2] = [
    NavDestination {
        label: "Staff",
        route: "/staff",
        capability: Some(Capability::ManageStaff),
    },
    NavDestination {
        label: "Admin Panel",
        route: "/admin",
        capability: Some(Capability::ViewAdminPanel),
    },
];

/// Resolves the navigation menu for a role
///
/// An absent or unknown role resolves to the base sequence with no
/// admin-only items.
pub fn resolve_menu(role: Option<Role>) -> Vec<NavDestination> {
    if role == Some(Role::Patient) {
        return vec![PORTAL];
    }

    let mut items = BASE.to_vec();
    if role == Some(Role::Admin) {
        items.extend(ADMIN_EXTRA);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(Role::Patient), 1; "patient sees only the portal")]
    #[test_case(Some(Role::Doctor), 3; "doctor sees the base sequence")]
    #[test_case(Some(Role::Staff), 3; "staff sees the base sequence")]
    #[test_case(Some(Role::Admin), 5; "admin sees base plus two")]
    #[test_case(None, 3; "absent role sees the base sequence")]
    fn test_menu_cardinality(role: Option<Role>, expected: usize) {
        assert_eq!(resolve_menu(role).len(), expected);
    }

    #[test]
    fn test_patient_menu_is_the_portal() {
        let menu = resolve_menu(Some(Role::Patient));
        assert_eq!(menu[0].route, "/patient-portal");
        assert_eq!(menu[0].label, "My Portal");
    }

    #[test]
    fn test_base_sequence_order_is_fixed() {
        let menu = resolve_menu(Some(Role::Doctor));
        let routes: Vec<_> = menu.iter().map(|d| d.route).collect();
        assert_eq!(routes, ["/dashboard", "/patients", "/doctors"]);
    }

    #[test]
    fn test_admin_items_are_appended_in_order() {
        let menu = resolve_menu(Some(Role::Admin));
        let routes: Vec<_> = menu.iter().map(|d| d.route).collect();
        assert_eq!(
            routes,
            ["/dashboard", "/patients", "/doctors", "/staff", "/admin"]
        );
        assert_eq!(menu[3].capability, Some(Capability::ManageStaff));
        assert_eq!(menu[4].capability, Some(Capability::ViewAdminPanel));
    }

    #[test]
    fn test_resolver_is_stateless_across_identities() {
        // Sign-out then sign-in as a different role must not leak items.
        let admin = resolve_menu(Some(Role::Admin));
        let patient = resolve_menu(Some(Role::Patient));
        let admin_again = resolve_menu(Some(Role::Admin));
        assert_eq!(admin, admin_again);
        assert_eq!(patient.len(), 1);
    }
}
