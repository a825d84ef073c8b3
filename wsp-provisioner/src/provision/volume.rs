use k8s_openapi::api::core::v1::{PodSpec, SecretVolumeSource, Volume, VolumeMount};

use crate::provision::matcher::select_containers;

/// Materialize a secret as a read-only file volume on a pod spec.
///
/// Exactly one volume is added per secret per pod, named after the secret;
/// secret names are unique within a namespace, so the volume name is too.
/// Each matched container then gains one read-only mount at the configured
/// path. Env-var lists are never touched here.
pub fn inject(pod_spec: &mut PodSpec, secret_name: &str, mount_path: &str, target: Option<&str>) {
    pod_spec.volumes.get_or_insert_with(Vec::new).push(Volume {
        name: secret_name.to_string(),
        secret: Some(SecretVolumeSource {
            secret_name: Some(secret_name.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });

    for container in select_containers(&mut pod_spec.containers, target) {
        container.volume_mounts.get_or_insert_with(Vec::new).push(VolumeMount {
            name: secret_name.to_string(),
            mount_path: mount_path.to_string(),
            read_only: Some(true),
            ..Default::default()
        });
    }
}
