//! Generation stage trait and pipeline orchestration.

use thiserror::Error;

use crate::config::GenerationConfig;
use crate::hydrology::{classify_water_bodies, propagate_depth};
use crate::noise::ValueNoise;
use crate::terrain::{synthesize_planet, Planet};

/// Largest supported face size in pixels.
pub const MAX_FACE_SIZE: u32 = 1024;

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Per-face terrain from layered noise.
    Synthesis,
    /// Cross-face ocean depth.
    OceanDepth,
    /// Cross-face puddle removal and lake leveling.
    WaterBodies,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Synthesis => "synthesis",
            StageId::OceanDepth => "ocean-depth",
            StageId::WaterBodies => "water-bodies",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Face size {size} is out of range (1..={max})")]
    InvalidSize { size: u32, max: u32 },
    #[error("Seed must not be empty")]
    EmptySeed,
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// One step of planet generation.
///
/// Each stage transforms the planet in place, building on what earlier
/// stages produced.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the planet in place.
    fn execute(&self, planet: &mut Planet, config: &GenerationConfig) -> Result<(), PipelineError>;
}

/// Ordered list of stages sharing one configuration.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: GenerationConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Synthesis, ocean depth and water bodies, in that order.
    pub fn standard(config: GenerationConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline
            .add_stage(SynthesisStage)
            .add_stage(OceanDepthStage)
            .add_stage(WaterBodyStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Executes all stages in order on the given planet.
    pub fn run(&self, planet: &mut Planet) -> Result<(), PipelineError> {
        self.run_with_callbacks(planet, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `planet` - The planet to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        planet: &mut Planet,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        validate_request(&planet.seed, planet.size)?;

        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            log::debug!("Running stage '{}' ({}/{})", stage.name(), i + 1, total);
            stage.execute(planet, &self.config)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

fn validate_request(seed: &str, size: u32) -> Result<(), PipelineError> {
    if seed.is_empty() {
        return Err(PipelineError::EmptySeed);
    }
    if size == 0 || size > MAX_FACE_SIZE {
        return Err(PipelineError::InvalidSize {
            size,
            max: MAX_FACE_SIZE,
        });
    }
    Ok(())
}

/// Builds every face from layered noise seeded by the planet's seed text.
pub struct SynthesisStage;

impl GenerationStage for SynthesisStage {
    fn id(&self) -> StageId {
        StageId::Synthesis
    }

    fn name(&self) -> &str {
        "Terrain Synthesis"
    }

    fn execute(&self, planet: &mut Planet, config: &GenerationConfig) -> Result<(), PipelineError> {
        let noise = ValueNoise::new(&planet.seed);
        synthesize_planet(planet, &noise, &config.terrain);
        log::info!(
            "Synthesized {} faces at {}x{} (land {:.1}%)",
            planet.faces.len(),
            planet.size,
            planet.size,
            planet.land_fraction() * 100.0
        );
        Ok(())
    }
}

/// Rebands ocean depth by distance to land across seams.
pub struct OceanDepthStage;

impl GenerationStage for OceanDepthStage {
    fn id(&self) -> StageId {
        StageId::OceanDepth
    }

    fn name(&self) -> &str {
        "Ocean Depth"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Synthesis]
    }

    fn execute(&self, planet: &mut Planet, config: &GenerationConfig) -> Result<(), PipelineError> {
        propagate_depth(planet, &config.hydrology);
        Ok(())
    }
}

/// Removes puddles and levels lakes across seams.
pub struct WaterBodyStage;

impl GenerationStage for WaterBodyStage {
    fn id(&self) -> StageId {
        StageId::WaterBodies
    }

    fn name(&self) -> &str {
        "Water Bodies"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::OceanDepth]
    }

    fn execute(&self, planet: &mut Planet, config: &GenerationConfig) -> Result<(), PipelineError> {
        let summary = classify_water_bodies(planet, &config.hydrology);
        log::info!(
            "Classified water bodies: {} filled, {} lakes, {} seas",
            summary.removed,
            summary.lakes,
            summary.seas
        );
        Ok(())
    }
}

/// Generates a complete planet with the standard pipeline.
pub fn generate_planet(seed: &str, size: u32, config: &GenerationConfig) -> Result<Planet, PipelineError> {
    validate_request(seed, size)?;
    let mut planet = Planet::new(seed, size);
    Pipeline::standard(config.clone()).run(&mut planet)?;
    Ok(planet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrology::find_water_bodies;
    use crate::terrain::{MAX_LAND_LEVEL, MIN_LAND_LEVEL};

    #[test]
    fn test_standard_pipeline_stages() {
        let pipeline = Pipeline::standard(GenerationConfig::default());
        assert_eq!(pipeline.stage_count(), 3);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GenerationConfig::default();
        let a = generate_planet("12345", 24, &config).unwrap();
        let b = generate_planet("12345", 24, &config).unwrap();
        assert_eq!(a, b);

        let c = generate_planet("54321", 24, &config).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_generated_levels_are_exhaustive() {
        let planet = generate_planet("default", 32, &GenerationConfig::default()).unwrap();
        for grid in &planet.faces {
            for i in 0..grid.pixel_count() {
                if grid.is_water[i] {
                    assert_eq!(grid.land_level[i], 0);
                    let level = grid.water_level[i];
                    assert!(
                        (1.0..=3.0).contains(&level) || (4.0..=10.0).contains(&level),
                        "bad water level {}",
                        level
                    );
                    assert_eq!(level, level.round());
                } else {
                    assert_eq!(grid.water_level[i], 0.0);
                    assert!((MIN_LAND_LEVEL..=MAX_LAND_LEVEL).contains(&grid.land_level[i]));
                }
                assert!((grid.height_field[i] * 10.0 - grid.level_at(i)).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_rerunning_water_bodies_changes_nothing() {
        let config = GenerationConfig::default();
        let mut planet = generate_planet("idempotent", 24, &config).unwrap();
        let once = planet.clone();
        WaterBodyStage.execute(&mut planet, &config).unwrap();
        assert_eq!(planet, once);
    }

    #[test]
    fn test_no_small_bodies_survive_generation() {
        let config = GenerationConfig::default();
        for (seed, size) in [("default", 12), ("lakes", 24), ("rivers", 40), ("7", 33)] {
            let planet = generate_planet(seed, size, &config).unwrap();
            for body in find_water_bodies(&planet) {
                assert!(
                    body.len() > config.hydrology.min_body_cells,
                    "seed {} size {}: body of {} cells left",
                    seed,
                    size,
                    body.len()
                );
            }
        }
    }

    #[test]
    fn test_error_messages() {
        let err = PipelineError::InvalidSize { size: 0, max: MAX_FACE_SIZE };
        assert_eq!(err.to_string(), "Face size 0 is out of range (1..=1024)");
        assert_eq!(PipelineError::EmptySeed.to_string(), "Seed must not be empty");
        let err = PipelineError::MissingDependency("Water Bodies".into(), "ocean-depth".into());
        assert_eq!(err.to_string(), "Missing dependency: stage 'Water Bodies' requires 'ocean-depth'");
    }

    #[test]
    fn test_rejects_invalid_requests() {
        let config = GenerationConfig::default();
        assert!(matches!(
            generate_planet("seed", 0, &config),
            Err(PipelineError::InvalidSize { size: 0, max: MAX_FACE_SIZE })
        ));
        assert!(matches!(
            generate_planet("seed", MAX_FACE_SIZE + 1, &config),
            Err(PipelineError::InvalidSize { .. })
        ));
        assert!(matches!(generate_planet("", 8, &config), Err(PipelineError::EmptySeed)));
    }

    #[test]
    fn test_single_pixel_faces() {
        let planet = generate_planet("one", 1, &GenerationConfig::default()).unwrap();
        assert_eq!(planet.pixel_count(), 6);
    }

    #[test]
    fn test_missing_dependency_is_reported() {
        let mut pipeline = Pipeline::new(GenerationConfig::default());
        pipeline.add_stage(SynthesisStage).add_stage(WaterBodyStage);
        let mut planet = Planet::new("deps", 8);

        let err = pipeline.run(&mut planet).unwrap_err();
        match err {
            PipelineError::MissingDependency(stage, dep) => {
                assert_eq!(stage, "Water Bodies");
                assert_eq!(dep, "ocean-depth");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_pipeline_with_callbacks() {
        let pipeline = Pipeline::standard(GenerationConfig::default());
        let mut planet = Planet::new("callbacks", 8);
        let mut started = Vec::new();
        let mut finished = 0;

        pipeline
            .run_with_callbacks(
                &mut planet,
                |name, i, total| {
                    assert_eq!(total, 3);
                    started.push((name.to_string(), i));
                },
                |_, _, _| finished += 1,
            )
            .unwrap();

        assert_eq!(started[0], ("Terrain Synthesis".to_string(), 0));
        assert_eq!(started.len(), 3);
        assert_eq!(finished, 3);
    }
}
