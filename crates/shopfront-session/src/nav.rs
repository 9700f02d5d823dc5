//! Page targets: the fixed role → destination mapping.

use shopfront_protocol::Role;

/// The navigation endpoints of the storefront, as relative paths.
///
/// This is an explicit mapping table, not a string switch scattered
/// across pages: every redirect decision in the kit goes through
/// [`home_for`](PageTargets::home_for) or [`login`](PageTargets::login).
/// Targets are fixed per role — there is deliberately no "return to the
/// page you originally asked for" flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTargets {
    /// Where anonymous visitors go to sign in.
    pub login: String,

    /// The storefront home — the landing page for plain users and the
    /// post-logout destination for everyone.
    pub home: String,

    /// The admin back-office landing page.
    pub admin_home: String,

    /// The seller panel landing page.
    pub seller_home: String,
}

impl Default for PageTargets {
    fn default() -> Self {
        Self {
            login: "/login.html".to_string(),
            home: "/index.html".to_string(),
            admin_home: "/admin/dashboard.html".to_string(),
            seller_home: "/seller/dashboard.html".to_string(),
        }
    }
}

impl PageTargets {
    /// The home page of a role: where it lands after login, and where
    /// it is sent back to when it strays onto a page it may not view.
    pub fn home_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::Seller => &self.seller_home,
            Role::User => &self.home,
        }
    }
}
