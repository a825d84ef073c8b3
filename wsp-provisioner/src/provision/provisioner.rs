use std::collections::BTreeMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use wsp_common::config::AppConfig;
use wsp_common::telemetry::{debug, info};

use crate::environment::KubernetesEnvironment;
use crate::error::{ProvisionError, Result};
use crate::namespace::{KubernetesNamespace, SecretSource};
use crate::provision::directive::SecretDirective;
use crate::provision::matcher::select_containers;
use crate::provision::{env, volume};

/// Rewrites the pod specs of a workspace environment according to the
/// provisioning annotations carried by the secrets visible to its namespace.
///
/// The provisioner is constructed with a fixed label selector and re-queries
/// and re-classifies from scratch on every call; nothing is cached across
/// invocations. All mutation is append-only, so calling `provision` more than
/// once on the same environment duplicates entries; the contract is
/// exactly-once-per-build invocation. There is no rollback: a failure partway
/// through a pass leaves earlier mutations in place and the caller must
/// discard the whole environment build.
pub struct SecretProvisioner {
    selector: LabelSelector,
}

impl SecretProvisioner {
    /// Create a provisioner considering only secrets carrying the given labels.
    pub fn new(secret_labels: BTreeMap<String, String>) -> Self {
        Self {
            selector: LabelSelector {
                match_labels: Some(secret_labels),
                ..Default::default()
            },
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.provisioner.secret_labels.clone())
    }

    pub fn selector(&self) -> &LabelSelector {
        &self.selector
    }

    /// Provision the environment's pods from the given secret source.
    ///
    /// Performs a single store query and classifies each returned secret
    /// once, then for each pod (map order) and each directive (list order)
    /// dispatches to the matching injector. Secrets without a recognized
    /// directive cause zero mutation, and a classification failure surfaces
    /// before any pod is touched.
    ///
    /// # Arguments
    /// * `environment` - The workspace environment to mutate in place
    /// * `secrets` - The namespace-scoped secret source to query once
    ///
    /// # Returns
    /// A Result indicating success or the first provisioning failure
    pub async fn provision<S>(
        &self,
        environment: &mut KubernetesEnvironment,
        secrets: &S,
    ) -> Result<()>
    where
        S: SecretSource,
    {
        let secrets = secrets.get(&self.selector).await?;

        let mut directives = Vec::with_capacity(secrets.len());
        for secret in &secrets {
            let secret_name = secret.metadata.name.as_deref().ok_or(
                ProvisionError::MissingObjectKeyError(
                    "expected secret to be named via metadata.name",
                ),
            )?;
            directives.push((secret_name, SecretDirective::classify(secret)?));
        }

        for (pod_name, pod) in environment.pods_data_mut() {
            for (secret_name, directive) in &directives {
                match directive {
                    SecretDirective::Env { pairs, target } => {
                        info!(
                            event = "InjectingSecretEnv",
                            secret = *secret_name,
                            pod = pod_name.as_str(),
                            vars = pairs.len(),
                        );
                        env::inject(
                            select_containers(&mut pod.spec.containers, target.as_deref()),
                            secret_name,
                            pairs,
                        );
                    }
                    SecretDirective::File { mount_path, target } => {
                        info!(
                            event = "MountingSecretFile",
                            secret = *secret_name,
                            pod = pod_name.as_str(),
                            path = mount_path.as_str(),
                        );
                        volume::inject(&mut pod.spec, secret_name, mount_path, target.as_deref());
                    }
                    SecretDirective::Skip => {
                        debug!(event = "SkippingSecret", secret = *secret_name);
                    }
                }
            }
        }

        Ok(())
    }

    /// Convenience for callers holding a namespace handle.
    pub async fn provision_namespace(
        &self,
        environment: &mut KubernetesEnvironment,
        namespace: &KubernetesNamespace,
    ) -> Result<()> {
        self.provision(environment, namespace.secrets()).await
    }
}
