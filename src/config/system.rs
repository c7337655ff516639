//! Engine configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::settings::{AxisOverride, AxisSettings};

/// Maximum number of per-axis override tables.
pub const MAX_AXIS_OVERRIDES: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Settings applied to every axis slot.
    #[serde(default)]
    pub defaults: AxisSettings,

    /// Per-slot overrides keyed by axis index (`[axes.0]`, `[axes.1]`, ...).
    #[serde(default)]
    pub axes: FnvIndexMap<String<32>, AxisOverride, MAX_AXIS_OVERRIDES>,

    /// Throttle delay at the end of each control-loop iteration.
    #[serde(default = "default_loop_period_us")]
    pub loop_period_us: u32,
}

fn default_loop_period_us() -> u32 {
    1000
}

impl EngineConfig {
    /// Settings for slot `index`: defaults with any override applied.
    ///
    /// Override keys that are not decimal indices are skipped here;
    /// [`validate_config`](super::validate_config) reports them.
    pub fn settings_for(&self, index: usize) -> AxisSettings {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str().parse::<usize>().ok() == Some(index))
            .map(|(_, over)| over.apply(&self.defaults))
            .unwrap_or(self.defaults)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defaults: AxisSettings::default(),
            axes: FnvIndexMap::new(),
            loop_period_us: default_loop_period_us(),
        }
    }
}
