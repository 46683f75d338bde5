use crate::config::Config;
use schemars::gen::SchemaSettings;

/// Print the config file's JSON Schema (draft 7, for editor tooling)
pub fn execute() -> anyhow::Result<()> {
    let generator = SchemaSettings::draft07().into_generator();
    let mut schema = generator.into_root_schema_for::<Config>();
    schema.schema.metadata().title = Some("retroplan configuration".to_string());
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
