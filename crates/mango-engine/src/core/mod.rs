pub mod error;
#[cfg(feature = "physics")]
pub mod physics;
pub mod rng;
pub mod scene;
pub mod time;
