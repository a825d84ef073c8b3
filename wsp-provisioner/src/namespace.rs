use async_trait::async_trait;
use kube::{api::{Api, ListParams}, Client};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use crate::error::{ProvisionError, Result};

/// Namespace-scoped access to the secrets visible to a workspace.
///
/// This is the engine's only I/O boundary; everything else operates on
/// in-memory structures owned by the caller.
#[async_trait]
pub trait SecretSource {
    /// Fetch the secrets matching the given label selector.
    async fn get(&self, selector: &LabelSelector) -> Result<Vec<Secret>>;
}

/// Secret access backed by the Kubernetes API of a single namespace.
pub struct KubernetesSecrets {
    api: Api<Secret>,
}

impl KubernetesSecrets {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
        }
    }
}

#[async_trait]
impl SecretSource for KubernetesSecrets {
    async fn get(&self, selector: &LabelSelector) -> Result<Vec<Secret>> {
        let labels = selector
            .match_labels
            .as_ref()
            .map(|labels| {
                labels
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        let secrets = self
            .api
            .list(&ListParams::default().labels(&labels))
            .await
            .map_err(ProvisionError::from)?;

        Ok(secrets.items)
    }
}

/// Handle on the namespace a workspace environment is provisioned against.
pub struct KubernetesNamespace {
    name: String,
    secrets: KubernetesSecrets,
}

impl KubernetesNamespace {
    pub fn new(client: Client, name: &str) -> Self {
        Self {
            secrets: KubernetesSecrets::new(client, name),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secrets(&self) -> &KubernetesSecrets {
        &self.secrets
    }
}

/// Create a new kube client by inferring the kubeconfig from the environment
/// or the default service account
///
/// # Returns
/// A Result containing the kube Client or an error
pub async fn create_client() -> Result<Client> {
    Client::try_default().await.map_err(ProvisionError::from)
}
