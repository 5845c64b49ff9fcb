//! Site host names

use serde::{Deserialize, Serialize};

/// Role of a host name bound to a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HostType {
    /// Public app endpoint
    #[default]
    Standard,
    /// Kudu/SCM endpoint
    Repository,
}

/// Host name with its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostNameSslState {
    /// Host name
    pub name: String,
    /// Role
    #[serde(default)]
    pub host_type: HostType,
}

/// The subset of a site the detail pages need
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site name
    pub name: String,
    /// Region
    #[serde(default)]
    pub location: String,
    /// Bound host names
    #[serde(default)]
    pub host_name_ssl_states: Vec<HostNameSslState>,
}

impl Site {
    /// URL of the SCM endpoint, if the site has one
    #[must_use]
    pub fn scm_url(&self) -> Option<String> {
        self.host_name_ssl_states
            .iter()
            .find(|h| h.host_type == HostType::Repository)
            .map(|h| format!("https://{}", h.name))
    }
}
