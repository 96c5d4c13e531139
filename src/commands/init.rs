use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::commands::validate_name;

pub fn execute_init(project_name: &str, current_dir: &Path) -> Result<()> {
    validate_name(project_name)?;

    let project_path = current_dir.join(project_name);

    if project_path.exists() {
        return Err(anyhow::anyhow!(
            "Directory '{}' already exists",
            project_name
        ));
    }

    fs::create_dir_all(&project_path)
        .with_context(|| format!("Failed to create project directory '{project_name}'"))?;

    fs::create_dir_all(project_path.join("packages"))
        .context("Failed to create packages directory")?;

    create_project_yml(&project_path, project_name)?;

    println!(
        "Stratum project '{}' initialized at {}",
        project_name,
        project_path.display()
    );
    Ok(())
}

fn create_project_yml(project_path: &Path, project_name: &str) -> Result<()> {
    let project_yml_content = format!(
        r#"name: {project_name}

database:
  type: sqlite
  path: ./database.db

packages:
  path: ./packages
"#
    );

    fs::write(project_path.join("project.yml"), project_yml_content)
        .context("Failed to create project.yml")?;
    Ok(())
}
