//! `gantry plan`: compute and print a build plan.

use anyhow::{bail, Context, Result};
use gantry_core::format_plan;

use crate::project::Project;

pub fn run(project: &Project, target: Option<&str>, format: Option<&str>) -> Result<()> {
    let target = project.select_target(target)?;
    let plan = gantry_core::plan(target, &project.registry)
        .with_context(|| format!("planning target '{}'", target.name))?;

    match format.unwrap_or("human") {
        "human" => print!("{}", format_plan(&plan)?),
        "json" => println!("{}", serde_json::to_string_pretty(&plan)?),
        other => bail!("unknown format '{other}' (expected human or json)"),
    }

    Ok(())
}
