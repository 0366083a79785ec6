//! Pipeline module for orchestrating planet generation stages.
//!
//! Stages run in order over one planet; each declares the stages it
//! depends on and the pipeline refuses to run it before they complete.

mod stage;

pub use stage::{
    generate_planet, GenerationStage, OceanDepthStage, Pipeline, PipelineError, StageId,
    SynthesisStage, WaterBodyStage, MAX_FACE_SIZE,
};
