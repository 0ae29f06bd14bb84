use crate::foundation::core::{Canvas, FrameIndex, Rgba8, Rgba8Premul};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::sim::evaporation::Evaporation;
use crate::sim::flow::{FlowMap, FlowMapConfig};
use crate::sim::kernel::DiffusionKernel;
use crate::sim::stroke::{PaintStyle, Stroke};
use crate::sim::watercolor::Watercolor;
use crate::source::Source;
use crate::surface::blend::BlendMode;
use crate::surface::draw::Painter;
use crate::surface::raster::{Gray8, Raster};

/// Spread parameters for the three diffusion passes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    /// Water spreading through the flow map.
    pub water_sigma: f32,
    /// Pigment spreading through the water.
    pub paint_sigma: f32,
    /// Final settle of the pigment when it is fixed into the dry layer.
    pub fixation_sigma: f32,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            water_sigma: 12.0,
            paint_sigma: 18.0,
            fixation_sigma: 6.0,
        }
    }
}

/// Configuration of a [`PaintWater`] state.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub diffusion: DiffusionConfig,
    pub evaporation: Evaporation,
}

impl SimConfig {
    pub fn validate(&self) -> AquarelleResult<()> {
        let d = &self.diffusion;
        for (name, v) in [
            ("water_sigma", d.water_sigma),
            ("paint_sigma", d.paint_sigma),
            ("fixation_sigma", d.fixation_sigma),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(AquarelleError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        self.evaporation.validate()
    }
}

/// The wet/dry paint surface: live pigment, water, permanent dry pigment and the flow map.
///
/// Pigment and water always share the canvas size fixed at construction, and every primitive
/// lands on both in the same call.
#[derive(Debug)]
pub struct PaintWater {
    canvas: Canvas,
    pigment: Raster<Rgba8Premul>,
    water: Raster<Gray8>,
    dry: Raster<Rgba8Premul>,
    flow: Option<FlowMap>,
    kernel: DiffusionKernel,
    config: SimConfig,
    painter: Painter,
    fixations: u32,
}

impl PaintWater {
    pub fn new(canvas: Canvas, config: SimConfig) -> AquarelleResult<Self> {
        Self::with_kernel(canvas, config, DiffusionKernel::default())
    }

    pub fn with_kernel(
        canvas: Canvas,
        config: SimConfig,
        kernel: DiffusionKernel,
    ) -> AquarelleResult<Self> {
        canvas.validate()?;
        config.validate()?;
        Ok(Self {
            canvas,
            pigment: Raster::new(canvas),
            water: Raster::new(canvas),
            dry: Raster::new(canvas),
            flow: None,
            kernel,
            config,
            painter: Painter::default(),
            fixations: 0,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pigment(&self) -> &Raster<Rgba8Premul> {
        &self.pigment
    }

    pub fn water(&self) -> &Raster<Gray8> {
        &self.water
    }

    pub fn dry_pigment(&self) -> &Raster<Rgba8Premul> {
        &self.dry
    }

    pub fn flow_map(&self) -> Option<&FlowMap> {
        self.flow.as_ref()
    }

    /// Number of completed [`PaintWater::dry`] calls.
    pub fn fixations(&self) -> u32 {
        self.fixations
    }

    /// Build the flow map for a new run or phase.
    pub fn init_flow_map(&mut self, config: &FlowMapConfig, source: &mut dyn Source) {
        self.flow = Some(FlowMap::generate(self.canvas, config, source));
    }

    /// Transform/pen state shared by both buffers.
    pub fn painter_mut(&mut self) -> &mut Painter {
        &mut self.painter
    }

    /// Start a dual-surface brush with the given pigment color and wetness.
    pub fn watercolor(&mut self, color: Rgba8, wetness: u8) -> Watercolor<'_> {
        Watercolor {
            pigment: &mut self.pigment,
            water: &mut self.water,
            painter: &mut self.painter,
            color,
            wetness,
        }
    }

    /// Draw every primitive of `stroke` into pigment and water.
    pub fn apply_stroke(&mut self, stroke: &Stroke) -> AquarelleResult<()> {
        if stroke.canvas != self.canvas {
            return Err(AquarelleError::validation(format!(
                "stroke authored for {}x{} cannot be applied to a {}x{} canvas",
                stroke.canvas.width, stroke.canvas.height, self.canvas.width, self.canvas.height
            )));
        }

        self.painter.push();
        {
            let pen = self.painter.pen_mut();
            pen.transform = pen.transform * stroke.transform;
            match stroke.style {
                PaintStyle::Fill => {
                    pen.fill = true;
                    pen.stroke = false;
                }
                PaintStyle::Outline { weight } => {
                    pen.fill = false;
                    pen.stroke = true;
                    pen.weight = weight;
                }
                PaintStyle::FillAndOutline { weight } => {
                    pen.fill = true;
                    pen.stroke = true;
                    pen.weight = weight;
                }
            }
        }
        let brush = self.watercolor(stroke.color, stroke.wetness);
        stroke.shapes.iter().fold(brush, |b, shape| b.shape(shape));
        self.painter.pop();
        Ok(())
    }

    /// One simulation step: water through the flow map, evaporation, pigment through water.
    pub fn tick(&mut self, frame: FrameIndex) -> AquarelleResult<()> {
        let flow = self.flow.as_ref().ok_or_else(|| {
            AquarelleError::precondition("flow map must be initialized before diffusion")
        })?;
        let d = self.config.diffusion;

        self.kernel
            .simulate(&mut self.water, flow.raster(), d.water_sigma, true)?;
        self.config.evaporation.apply(&mut self.water, frame);
        self.kernel
            .simulate(&mut self.pigment, &self.water, d.paint_sigma, true)?;
        Ok(())
    }

    /// Fix the wet pigment into the dry layer and reset the wet buffers.
    #[tracing::instrument(skip(self), fields(fixation = self.fixations + 1))]
    pub fn dry(&mut self) -> AquarelleResult<()> {
        let fixed = self
            .kernel
            .filter(&self.pigment, &self.water, self.config.diffusion.fixation_sigma)?;
        self.dry.draw_image(&fixed, BlendMode::Multiply)?;

        self.pigment.clear_to(Rgba8Premul::transparent());
        self.water.clear_to(Gray8(0));
        self.fixations = self.fixations.saturating_add(1);
        Ok(())
    }

    /// Paper, then the dry layer, then the live pigment.
    pub fn composite_for_display(&self, paper: Rgba8) -> Raster<Rgba8Premul> {
        let mut out = Raster::filled(self.canvas, paper.premultiply());
        // Both layers share the canvas size by construction.
        for layer in [&self.dry, &self.pigment] {
            if let Err(err) = out.draw_image(layer, BlendMode::Normal) {
                tracing::warn!(%err, "display composite skipped a layer");
            }
        }
        out
    }

    /// Water buffer as an opaque grayscale image.
    pub fn water_for_display(&self) -> Raster<Rgba8Premul> {
        let pixels = self
            .water
            .pixels()
            .iter()
            .map(|g| Rgba8Premul::from_array([g.0, g.0, g.0, 255]))
            .collect();
        Raster::from_pixels(self.canvas, pixels).unwrap_or_else(|_| Raster::new(self.canvas))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/paint_water.rs"]
mod tests;
