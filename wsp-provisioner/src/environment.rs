use std::collections::BTreeMap;
use k8s_openapi::api::core::v1::PodSpec;
use serde::{Deserialize, Serialize};

/// Workload kind a pod descriptor originates from. Opaque to the
/// provisioning engine; carried through for downstream pipeline steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PodRole {
    #[default]
    Deployment,
    Pod,
}

/// A workload's pod specification plus its role tag, owned by the
/// workspace environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodData {
    #[serde(default)]
    pub role: PodRole,
    pub spec: PodSpec,
}

impl PodData {
    pub fn new(role: PodRole, spec: PodSpec) -> Self {
        Self { role, spec }
    }
}

/// The mutable in-memory model of a workspace environment under assembly.
///
/// Pods are keyed by name; iteration order is the map's order, so a
/// provisioning pass over the environment is deterministic. The environment
/// is exclusively owned by the single provisioning pass that mutates it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KubernetesEnvironment {
    #[serde(default)]
    pods: BTreeMap<String, PodData>,
}

impl KubernetesEnvironment {
    pub fn new(pods: BTreeMap<String, PodData>) -> Self {
        Self { pods }
    }

    pub fn add_pod(&mut self, name: impl Into<String>, data: PodData) {
        self.pods.insert(name.into(), data);
    }

    pub fn pods_data(&self) -> &BTreeMap<String, PodData> {
        &self.pods
    }

    pub fn pods_data_mut(&mut self) -> &mut BTreeMap<String, PodData> {
        &mut self.pods
    }
}
