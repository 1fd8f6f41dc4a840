//! modelfetch - zipped 3D model asset pipeline
//!
//! Downloads a zipped model archive, unpacks it into a per-asset cache
//! directory and hands back the path of the entry-point file (e.g. `.gltf`)
//! for a model loader to consume.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod materialize;
pub mod pipeline;
pub mod ui;

pub use error::{ModelFetchError, ModelFetchResult};
pub use pipeline::{ModelPipeline, ResolvedModel};
