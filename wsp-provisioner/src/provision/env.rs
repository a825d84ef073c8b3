use k8s_openapi::api::core::v1::{Container, EnvVar, EnvVarSource, SecretKeySelector};

use crate::provision::directive::EnvPair;

/// Append one secret-backed environment variable per directive pair to each
/// matched container, in directive order.
///
/// Appending is additive: pre-existing env vars are never removed or
/// replaced, and a container whose pair set is empty is left untouched.
pub fn inject(containers: Vec<&mut Container>, secret_name: &str, pairs: &[EnvPair]) {
    if pairs.is_empty() {
        return;
    }

    for container in containers {
        let env = container.env.get_or_insert_with(Vec::new);
        for pair in pairs {
            env.push(create_secret_env_var(&pair.env_name, secret_name, &pair.data_key));
        }
    }
}

/// Create an environment variable resolved through a secret key reference,
/// never a literal value
fn create_secret_env_var(name: &str, secret_name: &str, key: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret_name.to_string(),
                key: key.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}
