use super::error::Error;
use serde::Deserialize;
use std::sync::OnceLock;

const DEFAULT_STYLES_TOML: &str = include_str!("../../resources/default.styles.toml");

static DEFAULT_CONFIG: OnceLock<ScriptConfig> = OnceLock::new();

/// Settings that shape the generated Playmol script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptConfig {
    #[serde(default)]
    pub styles: StyleSet,
    #[serde(default)]
    pub amber: AmberOptions,
}

/// Interaction styles bound by the `define ... as ...` header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleSet {
    #[serde(default = "default_pair_style")]
    pub pair: String,
    #[serde(default = "default_harmonic")]
    pub bond: String,
    #[serde(default = "default_harmonic")]
    pub angle: String,
    #[serde(default = "default_dihedral_style")]
    pub dihedral: String,
    #[serde(default = "default_improper_style")]
    pub improper: String,
}

fn default_pair_style() -> String {
    "lj/cut/coul/long".to_string()
}
fn default_harmonic() -> String {
    "harmonic".to_string()
}
fn default_dihedral_style() -> String {
    "charmm".to_string()
}
fn default_improper_style() -> String {
    "cvff".to_string()
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            pair: default_pair_style(),
            bond: default_harmonic(),
            angle: default_harmonic(),
            dihedral: default_dihedral_style(),
            improper: default_improper_style(),
        }
    }
}

impl StyleSet {
    /// `(variable, style)` pairs in the order they are defined in the script.
    pub fn definitions(&self) -> [(&'static str, &str); 5] {
        [
            ("pair_style", self.pair.as_str()),
            ("bond_style", self.bond.as_str()),
            ("angle_style", self.angle.as_str()),
            ("dihedral_style", self.dihedral.as_str()),
            ("improper_style", self.improper.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmberOptions {
    #[serde(default = "default_min_diameter")]
    pub min_diameter: f64,
    #[serde(default)]
    pub expand_equivalences: bool,
}

fn default_min_diameter() -> f64 {
    2.0
}

impl Default for AmberOptions {
    fn default() -> Self {
        Self {
            min_diameter: default_min_diameter(),
            expand_equivalences: false,
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        get_default_config().clone()
    }
}

impl ScriptConfig {
    /// Checks that every style is a single word and `min_diameter` is a finite,
    /// non-negative length.
    ///
    /// Called by [`load_config`]; callers that change fields afterwards validate again.
    pub fn validate(self) -> Result<Self, Error> {
        for (variable, style) in self.styles.definitions() {
            if style.trim().is_empty() || style.split_whitespace().count() > 1 {
                return Err(Error::InvalidOption {
                    key: variable.to_string(),
                    reason: format!("'{}' is not a single style name", style),
                });
            }
        }
        if !self.amber.min_diameter.is_finite() || self.amber.min_diameter < 0.0 {
            return Err(Error::InvalidOption {
                key: "amber.min_diameter".to_string(),
                reason: format!("{} is not a non-negative length", self.amber.min_diameter),
            });
        }
        Ok(self)
    }
}

/// Parses a user style file, or returns the embedded defaults when none is given.
pub fn load_config(custom_toml: Option<&str>) -> Result<ScriptConfig, Error> {
    match custom_toml {
        Some(toml) => {
            let config: ScriptConfig = toml::from_str(toml)?;
            config.validate()
        }
        None => Ok(get_default_config().clone()),
    }
}

pub fn get_default_config() -> &'static ScriptConfig {
    DEFAULT_CONFIG.get_or_init(|| {
        toml::from_str(DEFAULT_STYLES_TOML)
            .expect("Failed to parse embedded default styles. This is a library bug.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_serde_defaults() {
        let config = get_default_config();
        assert_eq!(config.styles, StyleSet::default());
        assert_eq!(config.amber, AmberOptions::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = load_config(Some("[styles]\ndihedral = \"fourier\"\n")).unwrap();
        assert_eq!(config.styles.dihedral, "fourier");
        assert_eq!(config.styles.pair, "lj/cut/coul/long");
        assert_eq!(config.amber.min_diameter, 2.0);
    }

    #[test]
    fn definitions_are_in_script_order() {
        let names: Vec<_> = StyleSet::default()
            .definitions()
            .iter()
            .map(|(variable, _)| *variable)
            .collect();
        assert_eq!(
            names,
            vec!["pair_style", "bond_style", "angle_style", "dihedral_style", "improper_style"]
        );
    }

    #[test]
    fn malformed_toml_is_a_style_parse_error() {
        let err = load_config(Some("[styles\n")).unwrap_err();
        assert!(matches!(err, Error::StyleParse(_)));
    }

    #[test]
    fn multi_word_style_is_rejected() {
        let err = load_config(Some("[styles]\npair = \"lj/cut 10.0\"\n")).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { key, .. } if key == "pair_style"));
    }

    #[test]
    fn negative_min_diameter_is_rejected() {
        let err = load_config(Some("[amber]\nmin_diameter = -1.0\n")).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }
}
