//! Terminal output for the helper commands.

use crate::ops::push_config::PushReport;
use crate::runtime::ContainerInfo;
use colored::*;
use prettytable::{format, Cell, Row, Table};

/// Table of name / status / ports for the overview command
pub fn container_table(containers: &[ContainerInfo]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        ["NAME", "STATUS", "PORTS"]
            .iter()
            .map(|title| Cell::new(title).style_spec("b"))
            .collect(),
    ));
    for container in containers {
        let status = if container.is_running() {
            container.status.green().to_string()
        } else {
            container.status.yellow().to_string()
        };
        table.add_row(Row::new(vec![
            Cell::new(&container.name),
            Cell::new(&status),
            Cell::new(&container.ports),
        ]));
    }
    table
}

pub fn print_containers(containers: &[ContainerInfo]) {
    if containers.is_empty() {
        println!(
            "{}",
            "No containers from this stack found. Start it with `aero-compose up`.".yellow()
        );
        return;
    }
    container_table(containers).printstd();
}

pub fn print_push_report(report: &PushReport) {
    for (container, config) in &report.pushed {
        println!("{} {} <- {}", "✅".green(), container.bold(), config.display());
    }
    for namespace in &report.missing {
        println!("{} no containers for namespace {}", "⚠️ ".yellow(), namespace.bold());
    }
    println!(
        "Pushed to {} container(s), {} namespace(s) without containers",
        report.pushed.len(),
        report.missing.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_table_has_one_row_per_container() {
        colored::control::set_override(false);
        let containers = vec![
            ContainerInfo {
                name: "cache-0".to_string(),
                state: "running".to_string(),
                status: "Up 5 minutes".to_string(),
                ports: "0.0.0.0:30000->3000/tcp".to_string(),
                ..ContainerInfo::default()
            },
            ContainerInfo {
                name: "cache-1".to_string(),
                state: "exited".to_string(),
                status: "Exited (0)".to_string(),
                ..ContainerInfo::default()
            },
        ];

        let table = container_table(&containers);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("cache-0"));
        assert!(rendered.contains("0.0.0.0:30000->3000/tcp"));
        assert!(rendered.contains("Exited (0)"));
    }
}
