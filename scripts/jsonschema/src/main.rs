use std::fs::{create_dir_all, File};
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use schemars::{schema_for, Schema};

use pgfdw_config::Config;

static WORKSPACE_ROOT: OnceLock<PathBuf> = OnceLock::new();

fn write_schema(name: &str, schema: Schema) -> anyhow::Result<()> {
    let root = WORKSPACE_ROOT.get_or_init(workspace_root::get_workspace_root);
    let dir = root.join(".schema");
    create_dir_all(&dir).context("Failed to create schema directory")?;

    let schema_path = dir.join(format!("{name}.schema.json"));
    let file = File::create(&schema_path).context("Failed to create file")?;
    serde_json::to_writer_pretty(file, &schema).context("serde_json conversion")?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    write_schema("pgfdw", schema_for!(Config))
}
