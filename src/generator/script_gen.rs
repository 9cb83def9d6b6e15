use super::templates::HELPER_SCRIPT;
use crate::error::{GeneratorError, Result};
use tera::{Context, Tera};

/// A generated wrapper script and the subcommand it forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperScript {
    pub file_name: &'static str,
    pub command: &'static str,
    pub description: &'static str,
}

pub const HELPER_SCRIPTS: &[HelperScript] = &[
    HelperScript {
        file_name: "overview.sh",
        command: "overview",
        description: "list this run's containers, or open aql against one of them",
    },
    HelperScript {
        file_name: "push-config.sh",
        command: "push-config",
        description: "copy each namespace config into its containers and restart them",
    },
    HelperScript {
        file_name: "regen-config.sh",
        command: "regen-config",
        description: "rewrite the namespace configs from namespaces.yml",
    },
];

pub fn generate(tera: &Tera, script: &HelperScript) -> Result<String> {
    let mut context = Context::new();
    context.insert("command", script.command);
    context.insert("description", script.description);
    let rendered = tera
        .render(HELPER_SCRIPT, &context)
        .map_err(GeneratorError::from)?;
    Ok(rendered)
}
