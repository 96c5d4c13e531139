pub mod init;
pub mod migrate;
pub mod new;
pub mod status;

pub fn validate_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        return Err(anyhow::anyhow!("Name cannot be empty"));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(anyhow::anyhow!(
            "Name can only contain alphanumeric characters, underscores, and hyphens"
        ));
    }

    Ok(())
}
