use std::fs;

use anyhow::{Context, Result};
use playmol_tools::ScriptConfig;
use playmol_tools::script::load_config;

use crate::cli::ScriptOptions;

/// Loads the style file (or the embedded defaults) and applies command-line overrides.
pub fn build_script_config(opts: &ScriptOptions) -> Result<ScriptConfig> {
    let custom = match &opts.styles {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read styles file: {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = load_config(custom.as_deref()).context("Invalid styles configuration")?;


    if let Some(min_diameter) = opts.min_diameter {
        config.amber.min_diameter = min_diameter;
    }
    if opts.expand_equivalences {
        config.amber.expand_equivalences = true;
    }

    config.validate().context("Invalid command-line override")
}

#[cfg(test)]
mod tests {
    use super::*;
    use playmol_tools::script::Error as ScriptError;

    fn options(min_diameter: Option<f64>) -> ScriptOptions {
        ScriptOptions {
            styles: None,
            min_diameter,
            expand_equivalences: false,
        }
    }

    #[test]
    fn negative_min_diameter_override_is_rejected() {
        let err = build_script_config(&options(Some(-5.0))).unwrap_err();
        let cause = err.downcast_ref::<ScriptError>().unwrap();
        assert!(matches!(cause, ScriptError::InvalidOption { key, .. } if key == "amber.min_diameter"));
    }

    #[test]
    fn non_finite_min_diameter_override_is_rejected() {
        assert!(build_script_config(&options(Some(f64::NAN))).is_err());
        assert!(build_script_config(&options(Some(f64::INFINITY))).is_err());
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut opts = options(Some(0.5));
        opts.expand_equivalences = true;
        let config = build_script_config(&opts).unwrap();
        assert_eq!(config.amber.min_diameter, 0.5);
        assert!(config.amber.expand_equivalences);
    }
}
