use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, RenderMode, Rgba8};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::session::finish::PaperFinish;
use crate::sim::evaporation::Evaporation;
use crate::sim::flow::FlowMapConfig;
use crate::sim::paint_water::{DiffusionConfig, SimConfig};

/// Everything a run needs besides the sketch itself. Loaded from JSON; missing fields take
/// their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: Canvas,
    /// Seeds both the random and the noise source.
    pub seed: u64,
    pub diffusion: DiffusionConfig,
    pub evaporation: Evaporation,
    /// Flow map built before the sketch's setup runs.
    pub flow_map: FlowMapConfig,
    /// Work budget of scripted brushes, in units per frame.
    pub work_units_per_frame: f64,
    /// Idle frames to wait after the last routine before the final dry.
    pub settle_frames: u32,
    /// Background color under the dry and wet pigment.
    pub paper: Rgba8,
    pub finish: Option<PaperFinish>,
    pub mode: RenderMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 540,
                height: 540,
            },
            seed: 0,
            diffusion: DiffusionConfig::default(),
            evaporation: Evaporation::default(),
            flow_map: FlowMapConfig::default(),
            work_units_per_frame: 60.0,
            settle_frames: 50,
            paper: Rgba8::WHITE,
            finish: None,
            mode: RenderMode::Full,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> AquarelleResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AquarelleError::serde(format!("parse engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> AquarelleResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read engine config '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> AquarelleResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AquarelleError::serde(format!("encode engine config: {e}")))
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            diffusion: self.diffusion,
            evaporation: self.evaporation,
        }
    }

    pub fn validate(&self) -> AquarelleResult<()> {
        self.canvas.validate()?;
        self.sim_config().validate()?;

        let flow = &self.flow_map;
        if !(flow.low.is_finite() && flow.high.is_finite() && flow.noise_scale.is_finite()) {
            return Err(AquarelleError::validation(
                "flow map range and noise scale must be finite",
            ));
        }
        if !self.work_units_per_frame.is_finite() || self.work_units_per_frame <= 0.0 {
            return Err(AquarelleError::validation(
                "work_units_per_frame must be finite and > 0",
            ));
        }
        if let Some(finish) = &self.finish {
            finish.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
