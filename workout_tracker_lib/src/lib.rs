pub mod workout;
pub mod workout_log;
