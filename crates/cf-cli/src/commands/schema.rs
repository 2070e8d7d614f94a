use anyhow::Context;
use cf_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `cfl schema`. Runs without a project root or configuration.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    let Some(type_name) = args.type_name.as_deref() else {
        return output(&registry.names(), flags.format);
    };

    let Some(path) = args.validate.as_deref() else {
        let schema = registry.get(type_name).with_context(|| {
            format!(
                "unknown schema type '{type_name}'; known: {}",
                registry.names().join(", ")
            )
        })?;
        return output(schema, flags.format);
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let instance: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    registry
        .validate(type_name, &instance)
        .with_context(|| format!("{} is not a valid {type_name}", path.display()))?;

    output(
        &serde_json::json!({ "valid": true, "type": type_name, "file": path.display().to_string() }),
        flags.format,
    )
}
