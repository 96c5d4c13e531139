use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::path::Path;

/// A migration implemented in code rather than as a SQL file. Implementations
/// are registered with the runner under the name derived from their migration
/// file by [`script_name`].
#[async_trait]
pub trait ScriptMigration: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, db: &DatabaseConnection) -> Result<()>;
}

#[derive(Default)]
pub struct ScriptRegistry {
    scripts: HashMap<String, Box<dyn ScriptMigration>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
        }
    }

    pub fn register(&mut self, script: Box<dyn ScriptMigration>) {
        self.scripts.insert(script.name().to_string(), script);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ScriptMigration> {
        self.scripts.get(name).map(|script| script.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// Derives the registered script name from a migration filename. The numeric
/// ordering prefix and the extension are dropped and the remainder is
/// converted to UpperCamelCase: `002_add_sample_data.rs` -> `AddSampleData`.
pub fn script_name(filename: &str) -> Result<String> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid migration filename: {filename}"))?;

    let prefix = Regex::new(r"^\d+[_-]?")?;
    let stem = prefix.replace(stem, "");

    if stem.is_empty() {
        return Err(anyhow::anyhow!(
            "Cannot derive a script name from {filename}"
        ));
    }

    let name = stem
        .split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    Ok(name)
}
