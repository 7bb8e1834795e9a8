//! Kapok Engine - chart generation for the Kapok platform
//!
//! This crate turns a [`kapok_core::DeploymentConfig`] into a Helm umbrella
//! chart with one subchart per platform service:
//! - `catalog`: the fixed set of templates and the flags gating them
//! - `engine`: MiniJinja rendering that leaves Helm's `{{ }}` untouched
//! - `writer`: materializes the rendered tree on disk

pub mod catalog;
pub mod engine;
pub mod error;
pub mod filters;
pub mod writer;

pub use catalog::{CATALOG, Condition, Scope, TemplateSpec};
pub use engine::{CHART_VERSION, ChartInfo, Engine, RenderedFile};
pub use error::{EngineError, Result, TemplateError, TemplateErrorKind};
pub use writer::{ChartWriter, WriteSummary};
