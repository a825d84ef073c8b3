use std::collections::BTreeMap;
use k8s_openapi::api::core::v1::Secret;

use crate::error::{ProvisionError, Result};

pub static USE_SECRET_AS_ENV_ANNOTATION: &str = "useSecretAsEnv";
pub static ENV_NAME_ANNOTATION: &str = "envName";
pub static ENV_NAME_ANNOTATION_SUFFIX: &str = ".envName";
pub static TARGET_CONTAINER_ANNOTATION: &str = "targetContainer";
pub static MOUNT_PATH_ANNOTATION: &str = "mountPath";

/// One environment variable to inject, resolved through a secret key
/// reference at container start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvPair {
    pub env_name: String,
    pub data_key: String,
}

/// The typed provisioning decision derived from a secret's annotations.
///
/// Computed fresh from each secret on every pass and passed by value to the
/// injectors; never cached across passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecretDirective {
    /// Expose secret entries as environment variables on matching containers.
    Env {
        pairs: Vec<EnvPair>,
        target: Option<String>,
    },
    /// Mount the secret as a read-only file volume on matching containers.
    File {
        mount_path: String,
        target: Option<String>,
    },
    /// The secret opts out of provisioning entirely.
    Skip,
}

impl SecretDirective {
    /// Classify a secret by its annotation schema.
    ///
    /// `useSecretAsEnv == "true"` selects env mode; otherwise a present
    /// `mountPath` selects file mode; otherwise the secret is skipped. When
    /// both are set, env mode wins. An empty `mountPath` fails the pass.
    ///
    /// # Arguments
    /// * `secret` - The secret to classify
    ///
    /// # Returns
    /// The directive derived from the secret's annotations
    pub fn classify(secret: &Secret) -> Result<Self> {
        let name = secret.metadata.name.as_deref().ok_or(
            ProvisionError::MissingObjectKeyError("expected secret to be named via metadata.name"),
        )?;

        let empty = BTreeMap::new();
        let annotations = secret.metadata.annotations.as_ref().unwrap_or(&empty);
        let target = annotations.get(TARGET_CONTAINER_ANNOTATION).cloned();

        if annotations.get(USE_SECRET_AS_ENV_ANNOTATION).map(String::as_str) == Some("true") {
            return Ok(SecretDirective::Env {
                pairs: env_pairs(secret, annotations),
                target,
            });
        }

        match annotations.get(MOUNT_PATH_ANNOTATION) {
            Some(path) if path.is_empty() => Err(ProvisionError::EmptyMountPathError {
                secret: name.to_string(),
            }),
            Some(path) => Ok(SecretDirective::File {
                mount_path: path.clone(),
                target,
            }),
            None => Ok(SecretDirective::Skip),
        }
    }
}

/// Build the (variable name, data key) pairs for env mode.
///
/// A single-key secret with a plain `envName` annotation yields that one
/// pair. Otherwise every data key with a `<key>.envName` override yields a
/// pair, in the data map's iteration order; keys without an override are
/// skipped. Zero pairs is valid and injects nothing.
fn env_pairs(secret: &Secret, annotations: &BTreeMap<String, String>) -> Vec<EnvPair> {
    let empty = BTreeMap::new();
    let data = secret.data.as_ref().unwrap_or(&empty);

    if data.len() == 1 {
        if let (Some(env_name), Some(data_key)) =
            (annotations.get(ENV_NAME_ANNOTATION), data.keys().next())
        {
            return vec![EnvPair {
                env_name: env_name.clone(),
                data_key: data_key.clone(),
            }];
        }
    }

    data.keys()
        .filter_map(|key| {
            annotations
                .get(&format!("{}{}", key, ENV_NAME_ANNOTATION_SUFFIX))
                .map(|env_name| EnvPair {
                    env_name: env_name.clone(),
                    data_key: key.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use kube::api::ObjectMeta;

    fn secret(name: &str, data: &[(&str, &str)], annotations: &[(&str, &str)]) -> Secret {
        Secret {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                annotations: Some(
                    annotations
                        .iter()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                ),
                labels: Some(BTreeMap::new()),
                ..Default::default()
            },
            data: Some(
                data.iter()
                    .map(|(key, value)| (key.to_string(), ByteString(value.as_bytes().to_vec())))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn classifies_single_key_env_secret() {
        let secret = secret(
            "test_secret",
            &[("foo", "random")],
            &[
                ("useSecretAsEnv", "true"),
                ("envName", "MY_FOO"),
                ("targetContainer", "maven"),
            ],
        );

        assert_eq!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::Env {
                pairs: vec![EnvPair {
                    env_name: "MY_FOO".to_string(),
                    data_key: "foo".to_string(),
                }],
                target: Some("maven".to_string()),
            },
        );
    }

    #[test]
    fn classifies_multi_key_env_secret_in_data_key_order() {
        let secret = secret(
            "test_secret",
            &[("bar", "freedom"), ("foo", "random")],
            &[
                ("useSecretAsEnv", "true"),
                ("foo.envName", "MY_FOO"),
                ("bar.envName", "MY_BAR"),
            ],
        );

        assert_eq!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::Env {
                pairs: vec![
                    EnvPair {
                        env_name: "MY_BAR".to_string(),
                        data_key: "bar".to_string(),
                    },
                    EnvPair {
                        env_name: "MY_FOO".to_string(),
                        data_key: "foo".to_string(),
                    },
                ],
                target: None,
            },
        );
    }

    #[test]
    fn single_key_secret_falls_back_to_per_key_override() {
        let secret = secret(
            "test_secret",
            &[("foo", "random")],
            &[("useSecretAsEnv", "true"), ("foo.envName", "MY_FOO")],
        );

        assert_eq!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::Env {
                pairs: vec![EnvPair {
                    env_name: "MY_FOO".to_string(),
                    data_key: "foo".to_string(),
                }],
                target: None,
            },
        );
    }

    #[test]
    fn multi_key_secret_without_overrides_yields_no_pairs() {
        let secret = secret(
            "test_secret",
            &[("bar", "freedom"), ("foo", "random")],
            &[("useSecretAsEnv", "true"), ("envName", "MY_FOO")],
        );

        assert_eq!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::Env {
                pairs: vec![],
                target: None,
            },
        );
    }

    #[test]
    fn classifies_file_secret() {
        let secret = secret(
            "test_secret",
            &[("settings.xml", "random")],
            &[("mountPath", "/home/user/.m2"), ("targetContainer", "maven")],
        );

        assert_eq!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::File {
                mount_path: "/home/user/.m2".to_string(),
                target: Some("maven".to_string()),
            },
        );
    }

    #[test]
    fn env_mode_wins_when_both_annotations_are_set() {
        let secret = secret(
            "test_secret",
            &[("foo", "random")],
            &[
                ("useSecretAsEnv", "true"),
                ("envName", "MY_FOO"),
                ("mountPath", "/home/user/.m2"),
            ],
        );

        assert!(matches!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::Env { .. },
        ));
    }

    #[test]
    fn use_secret_as_env_false_with_mount_path_selects_file_mode() {
        let secret = secret(
            "test_secret",
            &[("foo", "random")],
            &[("useSecretAsEnv", "false"), ("mountPath", "/var/run/keys")],
        );

        assert!(matches!(
            SecretDirective::classify(&secret).unwrap(),
            SecretDirective::File { .. },
        ));
    }

    #[test]
    fn skips_secret_without_recognized_annotations() {
        let secret = secret(
            "test_secret",
            &[("foo", "random")],
            &[("some.other/annotation", "value")],
        );

        assert_eq!(SecretDirective::classify(&secret).unwrap(), SecretDirective::Skip);
    }

    #[test]
    fn fails_on_empty_mount_path() {
        let secret = secret("test_secret", &[("foo", "random")], &[("mountPath", "")]);

        assert!(matches!(
            SecretDirective::classify(&secret),
            Err(ProvisionError::EmptyMountPathError { secret }) if secret == "test_secret",
        ));
    }

    #[test]
    fn fails_on_unnamed_secret() {
        let secret = Secret::default();

        assert!(matches!(
            SecretDirective::classify(&secret),
            Err(ProvisionError::MissingObjectKeyError(_)),
        ));
    }
}
