//! # Topology Module
//!
//! Turns the namespace set and a replica count into concrete node, volume and
//! host port assignments. Allocation order is namespace declaration order,
//! then node index, so the same input always yields the same plan.

use crate::config::types::PortConfig;
use crate::error::{InputError, Result};
use crate::input::Namespace;
use serde::{Deserialize, Serialize};

/// Hands out host ports in strictly increasing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortAllocator {
    next: u32,
    step: u32,
}

impl PortAllocator {
    pub fn new(base: u16, step: u16) -> Self {
        Self {
            next: u32::from(base),
            step: u32::from(step.max(1)),
        }
    }

    pub fn from_config(ports: &PortConfig) -> Self {
        Self::new(ports.base, ports.step)
    }

    /// Returns the next port, or `None` once the 16-bit range is exhausted
    pub fn allocate(&mut self) -> Option<u16> {
        let port = u16::try_from(self.next).ok()?;
        self.next += self.step;
        Some(port)
    }

    /// The port the next call to `allocate` would return
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// How many more ports can be handed out before the range runs out
    pub fn remaining(&self) -> u32 {
        let max = u32::from(u16::MAX);
        if self.next > max {
            0
        } else {
            (max - self.next) / self.step + 1
        }
    }
}

impl Default for PortAllocator {
    fn default() -> Self {
        Self::from_config(&PortConfig::default())
    }
}

/// One database server container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub volume: String,
    pub host_port: u16,
    /// Position within the namespace, `None` for single-node clusters
    pub index: Option<u32>,
}

/// Nodes planned for one namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceTopology {
    pub namespace: Namespace,
    pub replicas: u32,
    pub nodes: Vec<Node>,
}

impl NamespaceTopology {
    pub fn slug(&self) -> &str {
        &self.namespace.slug
    }

    pub fn network(&self) -> String {
        network_name(&self.namespace.slug)
    }

    pub fn ports(&self) -> Vec<u16> {
        self.nodes.iter().map(|n| n.host_port).collect()
    }

    pub fn volumes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.volume.as_str())
    }
}

/// The full plan for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub replicas: u32,
    pub namespaces: Vec<NamespaceTopology>,
}

impl Topology {
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.namespaces.iter().flat_map(|ns| ns.nodes.iter())
    }

    pub fn node_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.nodes.len()).sum()
    }
}

/// Bridge network owned by a namespace
pub fn network_name(slug: &str) -> String {
    format!("{}-net", slug)
}

/// Plan nodes, volumes and ports for every namespace.
///
/// With one replica a namespace gets a single node named after its slug and a
/// `<slug>-data` volume. With more, nodes are `<slug>-<i>` and volumes
/// `<slug>-data-<i>`.
pub fn plan(
    namespaces: &[Namespace],
    replicas: u32,
    ports: &mut PortAllocator,
) -> Result<Topology> {
    if replicas == 0 {
        return Err(InputError::InvalidReplicas(replicas).into());
    }

    // Fail before building anything when the range cannot hold every node.
    let capacity = u64::from(ports.remaining());
    if let Some(namespace) = namespaces
        .iter()
        .enumerate()
        .find(|(i, _)| (*i as u64 + 1) * u64::from(replicas) > capacity)
        .map(|(_, ns)| ns)
    {
        return Err(InputError::PortsExhausted {
            namespace: namespace.name.clone(),
        }
        .into());
    }

    let mut planned = Vec::with_capacity(namespaces.len());
    for namespace in namespaces {
        let mut nodes = Vec::new();
        for i in 0..replicas {
            let host_port = ports.allocate().ok_or_else(|| InputError::PortsExhausted {
                namespace: namespace.name.clone(),
            })?;
            let slug = &namespace.slug;
            let node = if replicas == 1 {
                Node {
                    name: slug.clone(),
                    volume: format!("{}-data", slug),
                    host_port,
                    index: None,
                }
            } else {
                Node {
                    name: format!("{}-{}", slug, i),
                    volume: format!("{}-data-{}", slug, i),
                    host_port,
                    index: Some(i),
                }
            };
            nodes.push(node);
        }

        log::debug!(
            "Planned {} node(s) for {} on ports {:?}",
            nodes.len(),
            namespace.name,
            nodes.iter().map(|n| n.host_port).collect::<Vec<_>>()
        );
        planned.push(NamespaceTopology {
            namespace: namespace.clone(),
            replicas,
            nodes,
        });
    }

    Ok(Topology {
        replicas,
        namespaces: planned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces(names: &[&str]) -> Vec<Namespace> {
        names.iter().map(|n| Namespace::new(*n, None)).collect()
    }

    #[test]
    fn test_single_replica_has_no_suffix() {
        let mut ports = PortAllocator::default();
        let topology = plan(&namespaces(&["prod-users", "prod-sessions"]), 1, &mut ports).unwrap();

        let users = &topology.namespaces[0];
        assert_eq!(users.nodes.len(), 1);
        assert_eq!(users.nodes[0].name, "prod-users");
        assert_eq!(users.nodes[0].volume, "prod-users-data");
        assert_eq!(users.nodes[0].host_port, 30000);

        let sessions = &topology.namespaces[1];
        assert_eq!(sessions.nodes[0].name, "prod-sessions");
        assert_eq!(sessions.nodes[0].host_port, 30002);
        assert_eq!(sessions.network(), "prod-sessions-net");
    }

    #[test]
    fn test_multi_replica_naming_and_ports() {
        let mut ports = PortAllocator::default();
        let topology = plan(&namespaces(&["cache"]), 3, &mut ports).unwrap();

        let cache = &topology.namespaces[0];
        let names: Vec<_> = cache.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["cache-0", "cache-1", "cache-2"]);
        assert_eq!(
            cache.volumes().collect::<Vec<_>>(),
            vec!["cache-data-0", "cache-data-1", "cache-data-2"]
        );
        assert_eq!(cache.ports(), vec![30000, 30002, 30004]);
        assert_eq!(ports.peek(), 30006);
    }

    #[test]
    fn test_ports_continue_across_namespaces() {
        let mut ports = PortAllocator::default();
        let topology = plan(&namespaces(&["a", "b"]), 2, &mut ports).unwrap();
        assert_eq!(topology.namespaces[0].ports(), vec![30000, 30002]);
        assert_eq!(topology.namespaces[1].ports(), vec![30004, 30006]);
        assert_eq!(topology.node_count(), 4);
    }

    #[test]
    fn test_zero_replicas_rejected() {
        let mut ports = PortAllocator::default();
        assert!(plan(&namespaces(&["a"]), 0, &mut ports).is_err());
    }

    #[test]
    fn test_remaining_ports() {
        assert_eq!(PortAllocator::new(65535, 2).remaining(), 1);
        assert_eq!(PortAllocator::new(65534, 2).remaining(), 1);
        assert_eq!(PortAllocator::new(65530, 2).remaining(), 3);
        assert_eq!(PortAllocator::default().remaining(), 17768);

        let mut ports = PortAllocator::new(65535, 2);
        ports.allocate().unwrap();
        assert_eq!(ports.remaining(), 0);
    }

    #[test]
    fn test_huge_replica_count_fails_cleanly() {
        let mut ports = PortAllocator::default();
        let err = plan(&namespaces(&["cache"]), 4_000_000_000, &mut ports).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AeroComposeError::Input(InputError::PortsExhausted { ref namespace })
                if namespace == "cache"
        ));
        assert_eq!(ports.peek(), 30000);
    }

    #[test]
    fn test_exhaustion_names_first_namespace_that_does_not_fit() {
        let mut ports = PortAllocator::new(65530, 2);
        let err = plan(&namespaces(&["a", "b"]), 2, &mut ports).unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_port_range_exhaustion() {
        let mut ports = PortAllocator::new(65534, 2);
        let err = plan(&namespaces(&["a"]), 2, &mut ports).unwrap_err();
        assert!(err.to_string().contains("host ports"));
    }
}
