use k8s_openapi::api::core::v1::Container;

/// Select the ordered subsequence of containers an injection applies to.
///
/// Without a target every container is selected in order. With a target only
/// the equal-named containers are selected, preserving their original order;
/// zero matches is valid and makes the injection a silent no-op.
pub fn select_containers<'a>(
    containers: &'a mut [Container],
    target: Option<&str>,
) -> Vec<&'a mut Container> {
    containers
        .iter_mut()
        .filter(|container| target.is_none_or(|name| container.name == name))
        .collect()
}
