//! Prediction engines: future health and the movement-prediction boundary

mod health;
mod movement;

pub use health::{
    CastArgs, Commitment, HealthPrediction, HealthPredictionMode, DEFAULT_PREDICTION_DELAY,
};
pub use movement::{HitChance, MotionDescriptor, MovementPredictor, PredictedPosition};
