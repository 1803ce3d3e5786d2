//! Default logout navigator.

use tracing::info;

use crate::traits::LogoutNavigator;

/// Navigator that only records the redirect target in the log.
///
/// Suitable for headless use and tests; UI shells supply their own
/// [`LogoutNavigator`] that performs the actual page navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl LogoutNavigator for TracingNavigator {
    fn navigate(&self, uri: &str) {
        info!(uri = %uri, "logout redirect requested");
    }
}
