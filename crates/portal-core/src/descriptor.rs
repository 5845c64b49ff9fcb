//! ARM resource id descriptors
//!
//! Splits ids of the form
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}`
//! into their parts. Segment names compare case-insensitively; values keep
//! their original casing.

use crate::error::DescriptorError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Parsed ARM resource id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArmResourceDescriptor {
    resource_id: String,
    subscription: String,
    resource_group: Option<String>,
    provider: Option<String>,
    resource_type: Option<String>,
    name: Option<String>,
}

impl ArmResourceDescriptor {
    /// Parse resource id
    ///
    /// Accepts subscription ids, resource group ids, and full resource ids.
    pub fn parse(resource_id: &str) -> Result<Self, DescriptorError> {
        let malformed = |reason: &str| DescriptorError::Malformed {
            resource_id: resource_id.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = resource_id
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let subscription = match segments.as_slice() {
            [head, sub, ..] if head.eq_ignore_ascii_case("subscriptions") => (*sub).to_string(),
            [head] if head.eq_ignore_ascii_case("subscriptions") => {
                return Err(malformed("missing subscription id"))
            }
            _ => return Err(malformed("expected /subscriptions/{id} prefix")),
        };

        let mut descriptor = Self {
            resource_id: resource_id.trim().to_string(),
            subscription,
            resource_group: None,
            provider: None,
            resource_type: None,
            name: None,
        };

        let mut rest = &segments[2..];
        if let [key, group, tail @ ..] = rest {
            if key.eq_ignore_ascii_case("resourceGroups") {
                descriptor.resource_group = Some((*group).to_string());
                rest = tail;
            }
        } else if let [key] = rest {
            if key.eq_ignore_ascii_case("resourceGroups") {
                return Err(malformed("missing resource group name"));
            }
        }

        match rest {
            [] => {}
            [key, provider, resource_type, _, ..] if key.eq_ignore_ascii_case("providers") => {
                descriptor.provider = Some((*provider).to_string());
                descriptor.resource_type = Some((*resource_type).to_string());
                // Child resources (type/name pairs) resolve to the last name
                descriptor.name = rest.last().map(|s| (*s).to_string());
                if rest.len() % 2 != 0 {
                    return Err(malformed("unbalanced resource type/name segments"));
                }
            }
            _ => return Err(malformed("expected providers/{namespace}/{type}/{name}")),
        }

        Ok(descriptor)
    }

    /// Original resource id
    #[inline]
    #[must_use]
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Subscription id
    #[inline]
    #[must_use]
    pub fn subscription(&self) -> &str {
        &self.subscription
    }

    /// Resource group name, if the id is scoped to one
    #[inline]
    #[must_use]
    pub fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    /// Provider namespace (e.g. `Microsoft.Web`)
    #[inline]
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Top-level resource type (e.g. `serverfarms`)
    #[inline]
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    /// Resource name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Resource group name, or an error naming the missing segment
    pub fn require_resource_group(&self) -> Result<&str, DescriptorError> {
        self.resource_group()
            .ok_or_else(|| DescriptorError::MissingSegment {
                resource_id: self.resource_id.clone(),
                segment: "resourceGroups",
            })
    }
}

impl FromStr for ArmResourceDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ArmResourceDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_id)
    }
}
