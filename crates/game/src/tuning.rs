//! Tuning data loaded from TOML.
//!
//! ```toml
//! [move_spec]
//! move_speed = 9.0
//! max_slope_angle = 50.0
//!
//! [resolver]          # optional
//! skin_width = 0.02
//! ```
//!
//! Missing fields take their defaults.

use std::path::{Path, PathBuf};

use ledge_physics::{ConfigError, MoveSpec, ResolverConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load tuning data.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tuning value: {0}")]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TuningDocument {
    move_spec: MoveSpec,
    resolver: Option<ResolverConfig>,
}

/// Validated tuning data, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct TuningStore {
    spec: MoveSpec,
    resolver: Option<ResolverConfig>,
    source: Option<PathBuf>,
}

impl TuningStore {
    /// Store holding a spec that was built in code.
    pub fn new(spec: MoveSpec) -> Result<Self, TuningError> {
        spec.validate()?;
        Ok(Self {
            spec,
            resolver: None,
            source: None,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(document: &str) -> Result<Self, TuningError> {
        let parsed: TuningDocument = toml::from_str(document)?;

        parsed.move_spec.validate()?;
        if let Some(resolver) = &parsed.resolver {
            resolver.validate()?;
        }

        Ok(Self {
            spec: parsed.move_spec,
            resolver: parsed.resolver,
            source: None,
        })
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = Self::from_toml_str(&document)?;
        store.source = Some(path.to_path_buf());

        log::info!("loaded tuning from {}", path.display());
        Ok(store)
    }

    /// Serialize the current values back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let document = TuningDocument {
            move_spec: self.spec.clone(),
            resolver: self.resolver.clone(),
        };
        toml::to_string_pretty(&document)
    }

    pub fn spec(&self) -> &MoveSpec {
        &self.spec
    }

    /// Resolver settings, if the document had a `[resolver]` table.
    pub fn resolver_config(&self) -> Option<&ResolverConfig> {
        self.resolver.as_ref()
    }

    /// Resolver settings from the document, or the defaults.
    pub fn resolver_config_or_default(&self) -> ResolverConfig {
        self.resolver.clone().unwrap_or_default()
    }

    /// File this store was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
