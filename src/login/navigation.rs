use crate::ui::{Destination, Page};
use tracing::warn;
use url::Url;

/// Query parameter naming the same-origin path to return to after login.
pub const CALLBACK_PARAM: &str = "Callback";

const HIDE_NOT_LOGIN_ONLY: &str = ".NotLoginOnly { display: none; }";
const HIDE_ADMIN_ONLY: &str = ".AdminOnly { display: none; }";

/// Where to go after a successful login: `origin + Callback` when the page
/// URL carries a usable callback, otherwise the home page.
#[must_use]
pub fn destination_after_login(page_url: &Url) -> Destination {
    let Some(callback) = page_url
        .query_pairs()
        .find(|(key, _)| *key == CALLBACK_PARAM)
        .map(|(_, value)| value.into_owned())
    else {
        return Destination::Page(Page::Home);
    };

    if !callback.starts_with('/') {
        warn!(callback = %callback, "ignoring callback that is not a relative path");
        return Destination::Page(Page::Home);
    }

    let origin = page_url.origin();
    match Url::parse(&format!("{}{callback}", origin.ascii_serialization())) {
        Ok(target) if target.origin() == origin => Destination::Url(target),
        Ok(_) | Err(_) => {
            warn!(callback = %callback, "ignoring callback outside the page origin");
            Destination::Page(Page::Home)
        }
    }
}

/// Rules for the `AddonStyle` stylesheet once a user is signed in.
#[must_use]
pub fn addon_style(is_admin: bool) -> String {
    let mut rules = HIDE_NOT_LOGIN_ONLY.to_string();
    if !is_admin {
        rules.push_str(HIDE_ADMIN_ONLY);
    }
    rules
}
