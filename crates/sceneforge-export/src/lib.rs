//! Sceneforge Export Pipeline
//!
//! Serializes a scene-graph snapshot into the sceneforge text formats:
//! - `.scene` (scene descriptor, JSON)
//! - `.node` (per-node file with transform and cross-references, JSON)
//! - `.mat` (texture channel references, JSON)
//! - `.light` (light parameters, JSON)
//! - `.mesh` (modified-OBJ geometry, plain text)

pub mod document;
pub mod exporter;
pub mod fmt;
pub mod mesh;

pub use document::{LightDocument, MaterialDocument, NodeDocument, SceneDocument, TransformRows};
pub use exporter::{DuplicateNames, ExportOptions, ExportSummary, SceneExporter};
