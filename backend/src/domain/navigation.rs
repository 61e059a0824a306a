//! Session route guard and the client route table it protects.
//!
//! The web client asks where a navigation should land given the current
//! session. Members-only pages send guests to sign-in; guest-only pages send
//! signed-in users to their profile.

use serde::Serialize;
use utoipa::ToSchema;

use super::user::Username;

/// Landing page for guests hitting a members-only route.
pub const SIGN_IN_PATH: &str = "/signin";
/// Landing page for members hitting a guest-only route.
pub const PROFILE_PATH: &str = "/profile";

/// Admit `target` when `is_allowed`, otherwise redirect to `fallback`.
///
/// # Examples
/// ```
/// use runit::domain::guard;
///
/// assert_eq!(guard(true, "/settings", "/signin"), "/settings");
/// assert_eq!(guard(false, "/settings", "/signin"), "/signin");
/// ```
pub fn guard<P>(is_allowed: bool, target: P, fallback: P) -> P {
    if is_allowed { target } else { fallback }
}

/// Access class of a client route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RouteAccess {
    /// Reachable with or without a session.
    Public,
    /// Requires a session; guests go to [`SIGN_IN_PATH`].
    MembersOnly,
    /// Only for guests; members go to [`PROFILE_PATH`].
    GuestsOnly,
}

impl RouteAccess {
    fn fallback(self) -> &'static str {
        match self {
            Self::Public => "/",
            Self::MembersOnly => SIGN_IN_PATH,
            Self::GuestsOnly => PROFILE_PATH,
        }
    }

    fn admits(self, is_logged_in: bool) -> bool {
        match self {
            Self::Public => true,
            Self::MembersOnly => is_logged_in,
            Self::GuestsOnly => !is_logged_in,
        }
    }
}

/// Client route classification.
///
/// Unknown paths are public so the client can render its own not-found page.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteTable;

const MEMBERS_ONLY: &[&str] = &[PROFILE_PATH, "/settings"];
const GUESTS_ONLY: &[&str] = &["/signup", SIGN_IN_PATH];

impl RouteTable {
    /// Access class for `path`. Trailing slashes are ignored.
    pub fn classify(&self, path: &str) -> RouteAccess {
        let path = normalise(path);
        if MEMBERS_ONLY.contains(&path) {
            RouteAccess::MembersOnly
        } else if GUESTS_ONLY.contains(&path) {
            RouteAccess::GuestsOnly
        } else {
            RouteAccess::Public
        }
    }

    /// Where a navigation to `path` lands for the current viewer.
    ///
    /// `viewer` is the signed-in user's name, or `None` for guests. A member
    /// landing on [`PROFILE_PATH`] is sent on to their public page.
    ///
    /// # Examples
    /// ```
    /// use runit::domain::{RouteTable, Username};
    ///
    /// let table = RouteTable;
    /// let ada = Username::new("ada_l").unwrap();
    /// assert_eq!(table.resolve("/settings", None), "/signin");
    /// assert_eq!(table.resolve("/signin", Some(&ada)), "/u/ada_l");
    /// ```
    pub fn resolve(&self, path: &str, viewer: Option<&Username>) -> String {
        let access = self.classify(path);
        let landed = guard(access.admits(viewer.is_some()), path, access.fallback());
        match viewer {
            Some(username) if normalise(landed) == PROFILE_PATH => format!("/u/{username}"),
            _ => landed.to_owned(),
        }
    }
}

fn normalise(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
