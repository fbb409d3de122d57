//! Gantry CLI: build planning for modular engine projects.

mod commands;
mod manifest;
mod project;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use project::Project;

#[derive(Parser)]
#[command(name = "gantry", version, about = "Build planner for modular engine projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new gantry project
    Init {
        /// Project name (also the initial module and target name)
        name: String,
    },
    /// Compute the build plan for a target
    Plan {
        /// Target name (default: the manifest's default target)
        #[arg(long)]
        target: Option<String>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show a target's module dependency tree
    Tree {
        /// Target name (default: the manifest's default target)
        #[arg(long)]
        target: Option<String>,
    },
    /// Inspect modules
    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },
    /// Inspect and validate targets
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Check project status
    Doctor,
}

#[derive(Subcommand)]
enum ModuleAction {
    /// List engine and project modules
    List,
    /// Show details of a module
    Describe {
        /// Module name
        name: String,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List targets discovered in the project
    List,
    /// Show details of a target
    Describe {
        /// Target name
        name: String,
    },
    /// Validate a target's rule file
    Validate {
        /// Target name
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Plan { target, format } => {
            let project = Project::load_required(&cwd)?;
            commands::plan::run(&project, target.as_deref(), format.as_deref())
        }

        Commands::Tree { target } => {
            let project = Project::load_required(&cwd)?;
            commands::tree::run(&project, target.as_deref())
        }

        Commands::Module { action } => {
            let project = Project::load_required(&cwd)?;
            match action {
                ModuleAction::List => commands::module::list(&project),
                ModuleAction::Describe { name } => commands::module::describe(&project, &name),
            }
        }

        Commands::Target { action } => {
            let project = Project::load_required(&cwd)?;
            match action {
                TargetAction::List => commands::target::list(&project),
                TargetAction::Describe { name } => commands::target::describe(&project, &name),
                TargetAction::Validate { name } => commands::target::validate(&project, &name),
            }
        }

        Commands::Doctor => commands::doctor::run(&cwd),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn project_at(root: &std::path::Path) -> Project {
        Project::load_required(root).unwrap()
    }

    /// Full workflow: init → plan → tree → doctor.
    #[test]
    fn init_plan_tree_doctor_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Demo");

        commands::init::create_project(&root, "Demo").unwrap();
        assert!(root.join("gantry.toml").is_file());
        assert!(root.join("source/Demo/Demo.module.toml").is_file());

        let project = project_at(&root);
        assert!(project.registry.contains("Core"));
        assert!(project.registry.contains("Demo"));

        commands::plan::run(&project, None, None).unwrap();
        commands::plan::run(&project, None, Some("json")).unwrap();
        commands::plan::run(&project, Some("DemoEditor"), None).unwrap();
        commands::tree::run(&project, None).unwrap();
        commands::module::list(&project).unwrap();
        commands::target::list(&project).unwrap();
        commands::doctor::run(&root).unwrap();
    }

    /// A generated project plans the whole engine catalog with the project
    /// module last.
    #[test]
    fn plan_covers_engine_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Demo");
        commands::init::create_project(&root, "Demo").unwrap();

        let project = project_at(&root);
        let target = project.select_target(None).unwrap();
        let plan = gantry_core::plan(target, &project.registry).unwrap();

        let names: Vec<&str> = plan.module_names().collect();
        assert_eq!(names.len(), gantry_engine::modules().len() + 1);
        assert_eq!(names.first().copied(), Some("Core"));
        assert_eq!(names.last().copied(), Some("Demo"));
        assert!(names.contains(&"SlateCore"));
    }

    #[test]
    fn plan_unknown_target_lists_available() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Demo");
        commands::init::create_project(&root, "Demo").unwrap();

        let project = project_at(&root);
        let err = commands::plan::run(&project, Some("Server"), None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown target 'Server'"));
        assert!(message.contains("Demo"));
        assert!(message.contains("DemoEditor"));
    }

    #[test]
    fn plan_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Demo");
        commands::init::create_project(&root, "Demo").unwrap();

        let project = project_at(&root);
        let err = commands::plan::run(&project, None, Some("yaml")).unwrap_err();
        assert!(err.to_string().contains("unknown format 'yaml'"));
    }

    /// A dependency cycle written on disk surfaces through the plan command
    /// with the full path.
    #[test]
    fn plan_reports_cycles_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Demo");
        commands::init::create_project(&root, "Demo").unwrap();

        let source = root.join("source");
        std::fs::create_dir_all(source.join("Alpha")).unwrap();
        std::fs::create_dir_all(source.join("Beta")).unwrap();
        std::fs::write(
            source.join("Alpha/Alpha.module.toml"),
            "[module]\nname = \"Alpha\"\npublic-dependencies = [\"Beta\"]\n",
        )
        .unwrap();
        std::fs::write(
            source.join("Beta/Beta.module.toml"),
            "[module]\nname = \"Beta\"\npublic-dependencies = [\"Alpha\"]\n",
        )
        .unwrap();
        std::fs::write(
            source.join("Loop.target.toml"),
            "[target]\nname = \"Loop\"\nkind = \"program\"\nmodules = [\"Alpha\"]\n",
        )
        .unwrap();

        let project = project_at(&root);
        let err = commands::plan::run(&project, Some("Loop"), None).unwrap_err();
        assert!(
            format!("{err:#}").contains("cyclic module dependency: Alpha -> Beta -> Alpha"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn plan_reports_missing_dependency_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Demo");
        commands::init::create_project(&root, "Demo").unwrap();

        std::fs::write(
            root.join("source/Demo/Demo.module.toml"),
            "[module]\nname = \"Demo\"\npublic-dependencies = [\"Missing\"]\n",
        )
        .unwrap();

        let project = project_at(&root);
        let err = commands::plan::run(&project, None, None).unwrap_err();
        assert!(
            format!("{err:#}").contains("unknown module 'Missing' (required by 'Demo')"),
            "unexpected error: {err:#}"
        );
    }
}
