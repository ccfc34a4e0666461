//! Resource table
//!
//! Every listable Huntress resource is one row: a plural name for the
//! collection, a singular name for a single record, and the path segment
//! under `/v1/`. The client reads this table instead of growing one method
//! body per endpoint.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A collection endpoint of the Huntress API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Agents,
    BillingReports,
    IncidentReports,
    Organizations,
    Reports,
    Signals,
}

/// Static description of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Collection accessor name
    pub plural: &'static str,
    /// Single-record accessor name
    pub singular: &'static str,
    /// Path segment below the API version prefix
    pub path: &'static str,
}

const AGENTS: ResourceSpec = ResourceSpec {
    plural: "agents",
    singular: "agent",
    path: "agents",
};

const BILLING_REPORTS: ResourceSpec = ResourceSpec {
    plural: "billing_reports",
    singular: "billing_report",
    path: "billing_reports",
};

const INCIDENT_REPORTS: ResourceSpec = ResourceSpec {
    plural: "incident_reports",
    singular: "incident_report",
    path: "incident_reports",
};

const ORGANIZATIONS: ResourceSpec = ResourceSpec {
    plural: "organizations",
    singular: "organization",
    path: "organizations",
};

const REPORTS: ResourceSpec = ResourceSpec {
    plural: "reports",
    singular: "report",
    path: "reports",
};

const SIGNALS: ResourceSpec = ResourceSpec {
    plural: "signals",
    singular: "signal",
    path: "signals",
};

impl Resource {
    /// All resources, in table order
    pub const ALL: [Resource; 6] = [
        Resource::Agents,
        Resource::BillingReports,
        Resource::IncidentReports,
        Resource::Organizations,
        Resource::Reports,
        Resource::Signals,
    ];

    /// Table row for this resource
    pub const fn spec(self) -> &'static ResourceSpec {
        match self {
            Resource::Agents => &AGENTS,
            Resource::BillingReports => &BILLING_REPORTS,
            Resource::IncidentReports => &INCIDENT_REPORTS,
            Resource::Organizations => &ORGANIZATIONS,
            Resource::Reports => &REPORTS,
            Resource::Signals => &SIGNALS,
        }
    }

    /// Path of the collection, relative to the version prefix
    pub fn collection_path(self) -> &'static str {
        self.spec().path
    }

    /// Path of one record, relative to the version prefix
    pub fn member_path(self, id: impl fmt::Display) -> String {
        format!("{}/{id}", self.spec().path)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().plural)
    }
}

impl FromStr for Resource {
    type Err = Error;

    /// Accepts either the plural or the singular name, with `-` or `_`
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        Resource::ALL
            .into_iter()
            .find(|resource| {
                let spec = resource.spec();
                spec.plural == name || spec.singular == name
            })
            .ok_or_else(|| Error::UnknownResource { name: s.to_string() })
    }
}
