use anyhow::{Context, Result};
use scorm_core::ConfigRoot;
use scorm_infrastructure::ConfigStorage;
use std::fmt::Write as _;
use std::path::PathBuf;

pub fn show(path: Option<PathBuf>) -> Result<()> {
    let storage = match path {
        Some(path) => ConfigStorage::new(path),
        None => ConfigStorage::default_location()?,
    };
    let root = storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;

    println!("# {}", storage.path().display());
    print!("{}", render(&root)?);
    Ok(())
}

/// Renders the engine section as TOML followed by the package's limit
/// conditions, if a package is configured.
fn render(root: &ConfigRoot) -> Result<String> {
    let mut out = String::new();
    let engine = toml::to_string_pretty(&root.engine).context("Failed to render engine config")?;
    writeln!(out, "[engine]")?;
    out.push_str(&engine);

    if let Some(package) = &root.package {
        let limits = package.limit_conditions();
        writeln!(out)?;
        writeln!(out, "[package.limit_conditions]")?;
        writeln!(out, "time_limit_action = {:?}", limits.time_limit_action)?;
        writeln!(
            out,
            "attempt_absolute_duration_limit = {:?}",
            limits.attempt_absolute_duration_limit
        )?;
        if let Err(e) = package.validate() {
            tracing::warn!("[Config] Package metadata is incomplete: {}", e);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorm_core::PackageMetadata;
    use scorm_core::codec::TimeLimitAction;

    #[test]
    fn renders_defaults_without_package() {
        let out = render(&ConfigRoot::default()).unwrap();
        assert!(out.starts_with("[engine]\n"));
        assert!(out.contains("request_timeout_ms = 30000"));
        assert!(out.contains("urn:scorm:interaction-id"));
        assert!(!out.contains("limit_conditions"));
    }

    #[test]
    fn renders_limit_conditions() {
        let root = ConfigRoot {
            package: Some(PackageMetadata {
                manifest_identifier: "course-1".to_string(),
                time_limit_action: TimeLimitAction::ExitMessage,
                time_limit_secs: 3600.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = render(&root).unwrap();
        assert!(out.contains("time_limit_action = \"exit,message\""));
        assert!(out.contains("attempt_absolute_duration_limit = \"P0DT1H0M0.00S\""));
    }
}
