//! Path and family resolution.

use std::path::PathBuf;

use selfq_core::EnvelopeConfig;

use crate::cli::FamilyArgs;
use crate::config::{default_config_path, SelfqConfig};
use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Resolve the config file path, checking SELFQ_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Turn `--tag`, `--family` or the configured default family into an
/// [`EnvelopeConfig`].
pub fn resolve_envelope(
    config: &SelfqConfig,
    args: &FamilyArgs,
) -> Result<EnvelopeConfig, CliError> {
    let envelope = match (&args.tag, &args.family) {
        (Some(tag), _) => EnvelopeConfig::new(tag.clone()),
        (None, family) => {
            let name = family
                .as_deref()
                .unwrap_or(config.export.default_family.as_str());
            let section = config.family(name).ok_or_else(|| {
                CliError::invalid_input_with_hint(
                    format!("Unknown export family \"{}\"", name),
                    format!("Known families: {}", config.family_names().join(", ")),
                )
            })?;
            section.to_envelope()
        }
    };
    envelope.validate()?;
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfq_core::export::{POST_TAG, STORY_TAG};

    fn args(family: Option<&str>, tag: Option<&str>) -> FamilyArgs {
        FamilyArgs {
            family: family.map(str::to_string),
            tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_default_family_is_story() {
        let envelope = resolve_envelope(&SelfqConfig::default(), &args(None, None)).unwrap();
        assert_eq!(envelope.tag, STORY_TAG);
        assert_eq!(envelope.layers, 3);
    }

    #[test]
    fn test_named_family() {
        let envelope =
            resolve_envelope(&SelfqConfig::default(), &args(Some("post"), None)).unwrap();
        assert_eq!(envelope.tag, POST_TAG);
    }

    #[test]
    fn test_explicit_tag() {
        let envelope =
            resolve_envelope(&SelfqConfig::default(), &args(None, Some("T-v1"))).unwrap();
        assert_eq!(envelope.tag, "T-v1");
        assert_eq!(envelope.version, "2.0");
    }

    #[test]
    fn test_unknown_family_lists_known_ones() {
        let err = resolve_envelope(&SelfqConfig::default(), &args(Some("diary"), None))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::constants::exit_codes::INVALID_INPUT);
        assert_eq!(err.hint(), Some("Known families: post, story"));
    }

    #[test]
    fn test_invalid_family_config_rejected() {
        let config: SelfqConfig =
            toml::from_str("[families.broken]\ntag = \"x\"\nlayers = 0\n").unwrap();
        let err = resolve_envelope(&config, &args(Some("broken"), None)).unwrap_err();
        assert_eq!(err.exit_code(), crate::constants::exit_codes::INVALID_INPUT);
    }
}
