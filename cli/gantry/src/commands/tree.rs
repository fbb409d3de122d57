//! `gantry tree`: render a target's dependency tree.

use anyhow::{Context, Result};
use gantry_core::format_tree;

use crate::project::Project;

pub fn run(project: &Project, target: Option<&str>) -> Result<()> {
    let target = project.select_target(target)?;
    let rendered = format_tree(target, &project.registry)
        .with_context(|| format!("rendering tree for target '{}'", target.name))?;
    print!("{rendered}");
    Ok(())
}
