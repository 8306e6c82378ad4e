//! TOML configuration for a build.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use epipanel_model::PipelineOptions;

/// Load pipeline options from a TOML file; no path means defaults.
///
/// Keys absent from the file keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<PipelineOptions> {
    let Some(path) = path else {
        return Ok(PipelineOptions::default());
    };
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let options: PipelineOptions =
        toml::from_str(&contents).with_context(|| format!("parse config {}", path.display()))?;
    debug!(
        path = %path.display(),
        countries = options.countries.len(),
        aliases = options.aliases.len(),
        "config loaded"
    );
    Ok(options)
}

/// Config file options with command-line countries taking precedence.
pub fn resolve_options(config: Option<&Path>, countries: &[String]) -> Result<PipelineOptions> {
    let options = load_config(config)?;
    if countries.is_empty() {
        Ok(options)
    } else {
        Ok(options.with_countries(countries.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), PipelineOptions::default());
    }

    #[test]
    fn command_line_countries_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("epipanel.toml");
        fs::write(
            &path,
            "countries = [\"India\"]\n\n[aliases]\n\"Korea, North\" = \"North Korea\"\n",
        )
        .unwrap();

        let from_file = resolve_options(Some(path.as_path()), &[]).unwrap();
        assert_eq!(from_file.countries, vec!["India"]);
        assert_eq!(from_file.default_countries.len(), 5);

        let overridden = resolve_options(Some(path.as_path()), &["Brazil".to_string()]).unwrap();
        assert_eq!(overridden.countries, vec!["Brazil"]);
        assert_eq!(
            overridden.aliases.get("Korea, North").map(String::as_str),
            Some("North Korea")
        );
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/epipanel.toml"))).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
