use std::fmt::{self, Display};

use k8s_openapi::api::core::v1::Pod;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "homework.interview.me",
    version = "v1alpha1",
    kind = "Dummy",
    plural = "dummies",
    namespaced,
    status = "DummyStatus"
)]
pub struct DummySpec {
    /// arbitrary message, echoed back into the status once propagated
    #[serde(default)]
    pub message: String,
}

/// Snapshot taken during a single reconciliation pass, both fields are always
/// written together.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DummyStatus {
    /// last propagated `spec.message`
    #[serde(default)]
    pub spec_echo: String,
    /// last observed phase of the bound pod
    #[serde(default)]
    pub dependent_phase: DependentPhase,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
pub enum DependentPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl DependentPhase {
    pub fn from_pod(pod: &Pod) -> Self {
        Self::from_phase(pod.status.as_ref().and_then(|status| status.phase.as_deref()))
    }

    pub fn from_phase(phase: Option<&str>) -> Self {
        match phase {
            None | Some("") => Self::Unset,
            Some("Pending") => Self::Pending,
            Some("Running") => Self::Running,
            Some("Succeeded") => Self::Succeeded,
            Some("Failed") => Self::Failed,
            Some(_) => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
            Self::Unset => "",
        }
    }
}

impl Display for DependentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
