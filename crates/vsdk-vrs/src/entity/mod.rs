//! Vocabulary of the VRS entity tables
//!
//! States, reasons and events follow libvirt's domain lifecycle numbering,
//! which is what the VRS agent expects in the `state`, `reason`, `event` and
//! `event_type` columns.

pub mod event;
pub mod state;

pub use event::{validate_event, Event, EventCategory};
pub use state::{State, SubState};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Kind of workload an entity row describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityType {
    #[default]
    Vm,
    Container,
}

impl EntityType {
    pub fn code(self) -> i64 {
        match self {
            EntityType::Vm => 0,
            EntityType::Container => 1,
        }
    }
}

/// Hypervisor or runtime hosting the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Kvm,
    Docker,
    Lxc,
    Esxi,
    Hyperv,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Kvm => "kvm",
            Domain::Docker => "docker",
            Domain::Lxc => "lxc",
            Domain::Esxi => "esxi",
            Domain::Hyperv => "hyperv",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kvm" => Ok(Domain::Kvm),
            "docker" => Ok(Domain::Docker),
            "lxc" => Ok(Domain::Lxc),
            "esxi" => Ok(Domain::Esxi),
            "hyperv" => Ok(Domain::Hyperv),
            other => Err(format!("unknown domain '{}'", other)),
        }
    }
}

/// Key of the metadata attached to an entity or port.
///
/// The well-known keys are associated constants; any other string is
/// passed through to the VRS untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataKey(Cow<'static, str>);

impl MetadataKey {
    pub const USER: MetadataKey = MetadataKey(Cow::Borrowed("nuage-user"));
    pub const ENTERPRISE: MetadataKey = MetadataKey(Cow::Borrowed("nuage-enterprise"));
    pub const DOMAIN: MetadataKey = MetadataKey(Cow::Borrowed("nuage-domain"));
    pub const ZONE: MetadataKey = MetadataKey(Cow::Borrowed("nuage-zone"));
    pub const NETWORK: MetadataKey = MetadataKey(Cow::Borrowed("nuage-network"));
    pub const NETWORK_TYPE: MetadataKey = MetadataKey(Cow::Borrowed("nuage-network-type"));
    pub const STATIC_IP: MetadataKey = MetadataKey(Cow::Borrowed("nuage-static-ip"));
    pub const POLICY_GROUP: MetadataKey = MetadataKey(Cow::Borrowed("nuage-policy-group"));
    pub const REDIRECTION_TARGET: MetadataKey =
        MetadataKey(Cow::Borrowed("nuage-redirection-target"));

    pub fn new(key: impl Into<String>) -> Self {
        MetadataKey(Cow::Owned(key.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetadataKey {
    fn from(key: &str) -> Self {
        MetadataKey::new(key)
    }
}
