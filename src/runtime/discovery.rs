//! Locating the containers that belong to a generated topology.
//!
//! Containers are matched by the labels written into the compose file. A
//! container without any of our labels (for instance one created by hand)
//! still matches when its name is exactly the slug or `<slug>-<digits>`.

use super::ContainerInfo;
use crate::generator::compose_gen::{
    LABEL_ROLE, LABEL_SLUG, ROLE_NODE, ROLE_TOOLS, TOOLS_PREFIX,
};

fn is_labelled(container: &ContainerInfo) -> bool {
    container.label(LABEL_ROLE).is_some()
}

/// Name rule for unlabelled containers: `slug` or `slug-<digits>`
pub fn name_matches_slug(name: &str, slug: &str) -> bool {
    match name.strip_prefix(slug) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('-')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

/// Does this container run a node of the namespace with `slug`?
pub fn belongs_to(container: &ContainerInfo, slug: &str) -> bool {
    if is_labelled(container) {
        container.label(LABEL_ROLE) == Some(ROLE_NODE) && container.label(LABEL_SLUG) == Some(slug)
    } else {
        name_matches_slug(&container.name, slug)
    }
}

/// Node containers of one namespace, sorted by name
pub fn namespace_nodes<'a>(containers: &'a [ContainerInfo], slug: &str) -> Vec<&'a ContainerInfo> {
    let mut nodes: Vec<_> = containers.iter().filter(|c| belongs_to(c, slug)).collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    nodes
}

pub fn is_tools(container: &ContainerInfo) -> bool {
    if is_labelled(container) {
        container.label(LABEL_ROLE) == Some(ROLE_TOOLS)
    } else {
        container.name.starts_with(&format!("{}-", TOOLS_PREFIX))
    }
}

/// The tools container to use, preferring one that is already running
pub fn find_tools(containers: &[ContainerInfo]) -> Option<&ContainerInfo> {
    let mut candidates: Vec<_> = containers.iter().filter(|c| is_tools(c)).collect();
    candidates.sort_by_key(|c| !c.is_running());
    candidates.into_iter().next()
}

/// Containers of one run: nodes of the namespaces in `slugs` plus tools
/// containers
pub fn run_containers<'a>(containers: &'a [ContainerInfo], slugs: &[String]) -> Vec<&'a ContainerInfo> {
    containers
        .iter()
        .filter(|c| is_tools(c) || slugs.iter().any(|s| belongs_to(c, s)))
        .collect()
}
