//! `gantry init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use gantry_rules::{
    is_valid_name, module_template, target_template, TargetKind, MODULE_RULES_SUFFIX,
    TARGET_RULES_SUFFIX,
};

use crate::manifest::ProjectManifest;

/// Create a new gantry project in a directory named after it.
///
/// `name` doubles as the initial module name and game target name, so it
/// must be a valid identifier.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if !is_valid_name(name) {
        bail!("project name '{name}' is not a valid identifier (letters, digits, underscores)");
    }
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    let source_dir = project_dir.join("source");
    let module_dir = source_dir.join(name);
    fs::create_dir_all(&module_dir).context("creating source directory")?;

    fs::write(
        project_dir.join("gantry.toml"),
        ProjectManifest::template(name),
    )
    .context("writing gantry.toml")?;

    let module_file = module_dir.join(format!("{name}{MODULE_RULES_SUFFIX}"));
    fs::write(&module_file, module_template(name)?).context("writing module rules")?;

    let game_target = source_dir.join(format!("{name}{TARGET_RULES_SUFFIX}"));
    fs::write(&game_target, target_template(name, TargetKind::Game, [name])?)
        .context("writing game target rules")?;

    let editor_name = format!("{name}Editor");
    let editor_target = source_dir.join(format!("{editor_name}{TARGET_RULES_SUFFIX}"));
    fs::write(
        &editor_target,
        target_template(&editor_name, TargetKind::Editor, [name])?,
    )
    .context("writing editor target rules")?;

    println!("Created project '{name}'");
    println!("  {name}/gantry.toml");
    println!("  {name}/source/{name}/{name}.module.toml");
    println!("  {name}/source/{name}.target.toml");
    println!("  {name}/source/{editor_name}.target.toml");

    Ok(())
}
