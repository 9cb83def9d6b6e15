use crate::input::SkippedEntry;
use crate::topology::Topology;
use std::fmt::Write;
use std::path::Path;

/// Everything the run summary reports besides the topology itself
pub struct SummaryContext<'a> {
    pub output_dir: &'a Path,
    pub tools_container: &'a str,
    pub skipped: &'a [SkippedEntry],
}

/// Human-readable account of a generation run
pub fn generate(topology: &Topology, ctx: &SummaryContext<'_>) -> String {
    let out = ctx.output_dir.display();
    let mut text = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        text,
        "Generated {} namespace(s), {} node(s), replication factor {}",
        topology.namespaces.len(),
        topology.node_count(),
        topology.replicas
    );
    let _ = writeln!(text, "Output directory: {}", out);
    let _ = writeln!(text, "Tools container: {}", ctx.tools_container);
    if !ctx.skipped.is_empty() {
        let _ = writeln!(text, "Skipped {} invalid entries:", ctx.skipped.len());
        for entry in ctx.skipped {
            let _ = writeln!(text, "  {}: {:?}", entry.origin, entry.value);
        }
    }

    let width = topology
        .namespaces
        .iter()
        .map(|ns| ns.namespace.name.len())
        .max()
        .unwrap_or(0);
    let _ = writeln!(text, "\nNamespaces:");
    for ns in &topology.namespaces {
        let nodes: Vec<String> = ns
            .nodes
            .iter()
            .map(|n| format!("{}:{}", n.name, n.host_port))
            .collect();
        let _ = writeln!(
            text,
            "  {:<width$}  {}",
            ns.namespace.name,
            nodes.join(", "),
            width = width
        );
    }

    let _ = writeln!(text, "\nNext steps:");
    let _ = writeln!(text, "  docker compose -f {}/docker-compose.yml up -d", out);
    let _ = writeln!(text, "  {}/overview.sh", out);
    if let Some(first) = topology.nodes().next() {
        let _ = writeln!(text, "  {}/overview.sh {}", out, first.name);
    }
    let _ = writeln!(text, "  {}/push-config.sh", out);

    text
}
