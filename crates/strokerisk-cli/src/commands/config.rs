use anyhow::{Context, Result};
use colored::Colorize;
use strokerisk_core::config::{AppConfig, AuthProviderConfig};
use strokerisk_infrastructure::ConfigService;

/// Prints the effective configuration as TOML. With `write_defaults`, the
/// effective configuration (defaults filled in) is written to the config
/// file first.
pub fn run(service: &ConfigService, write_defaults: bool) -> Result<()> {
    let config = if write_defaults {
        let written = write_effective(service)?;
        println!(
            "{}",
            format!("Wrote {}", service.path().display()).green()
        );
        written
    } else {
        service.load()?
    };
    show(&config, service)
}

/// Saves the effective configuration and reads it back from disk.
fn write_effective(service: &ConfigService) -> Result<AppConfig> {
    let config = service.load()?;
    service
        .save(&config)
        .with_context(|| format!("Failed to write {}", service.path().display()))?;
    service.invalidate_cache()?;
    Ok(service.load()?)
}

fn show(config: &AppConfig, service: &ConfigService) -> Result<()> {
    let path = service.path();
    let source = if path.exists() { "loaded" } else { "not found, defaults" };
    println!("{}", format!("# {} ({})", path.display(), source).bright_black());
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", rendered);

    match AuthProviderConfig::from_env() {
        Ok(provider) => println!(
            "{}",
            format!("# auth provider: project '{}'", provider.project_id).bright_black()
        ),
        Err(err) => println!("{}", format!("# auth provider: mock ({})", err).bright_black()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_effective_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strokerisk").join("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[emergency]\nphone_number = \"112\"\n").unwrap();

        let service = ConfigService::new(&path);
        let written = write_effective(&service).unwrap();
        assert_eq!(written.emergency.phone_number, "112");
        assert_eq!(written.session.sign_in_route, "/login");

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("[mock]"));
        assert!(on_disk.contains("scan_latency_ms = 2000"));
        assert!(on_disk.contains("phone_number = \"112\""));
    }

    #[test]
    fn test_write_effective_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let service = ConfigService::new(&path);

        assert_eq!(write_effective(&service).unwrap(), AppConfig::default());
        assert!(path.exists());
    }
}
