//! Chart settings
//!
//! Settings are read from `CHART_*` environment variables (a `.env` file is
//! honoured), for example:
//!
//! ```text
//! CHART_CURRENCY=USD
//! CHART_CODE_WIDTH=plain
//! CHART_UNIQUE_NAMES=true
//! CHART_DEFAULT_STARTER=1
//! ```
//!
//! Anything not set keeps its default.

use serde::Deserialize;

use core_kernel::{Currency, NominalCode};

use crate::error::ChartError;

/// How a derived nominal code is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeWidthPolicy {
    /// Zero-pad to the width of the widest sibling code
    #[default]
    Preserve,
    /// Plain integer rendering, leading zeros dropped
    Plain,
}

/// Chart behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Currency for new charts
    pub currency: Currency,
    /// Rendering of derived nominal codes
    pub code_width: CodeWidthPolicy,
    /// Reject a second account with an existing display name
    pub unique_names: bool,
    /// Code offered for the first child of a leaf account
    pub default_starter: NominalCode,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            code_width: CodeWidthPolicy::default(),
            unique_names: false,
            default_starter: NominalCode::from(1),
        }
    }
}

impl ChartSettings {
    /// Loads settings from the environment
    pub fn from_env() -> Result<Self, ChartError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("CHART"))
    }

    /// Loads settings from any `config` source
    pub fn from_source<S>(source: S) -> Result<Self, ChartError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
