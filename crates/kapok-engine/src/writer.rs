//! Chart tree writer
//!
//! Materializes the rendered catalog under `<dest>/kapok`. The chart root is
//! cleared first, so files from an earlier run with other feature flags never
//! linger. A failure part-way leaves whatever was already written on disk.

use kapok_core::{DeploymentConfig, UMBRELLA_CHART_NAME};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::Engine;
use crate::error::{EngineError, Result};

/// Files produced by one [`ChartWriter::write`] call
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Umbrella chart root (`<dest>/kapok`)
    pub root: PathBuf,

    /// Every file written, in write order
    pub files: Vec<PathBuf>,
}

/// Writes the umbrella chart and its subcharts to disk
pub struct ChartWriter {
    engine: Engine,
}

impl ChartWriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: Engine::new()?,
        })
    }

    /// Root directory the chart is written to inside `dest`
    pub fn chart_root(dest: &Path) -> PathBuf {
        dest.join(UMBRELLA_CHART_NAME)
    }

    /// Render the catalog for `config` and write it below `dest`
    pub fn write(&self, dest: &Path, config: &DeploymentConfig) -> Result<WriteSummary> {
        let root = Self::chart_root(dest);
        let rendered = self.engine.render_catalog(config)?;

        if root.is_dir() {
            fs::remove_dir_all(&root).map_err(|source| EngineError::CreateDir {
                path: root.clone(),
                source,
            })?;
            tracing::debug!(root = %root.display(), "cleared previous chart tree");
        }

        let mut files = Vec::with_capacity(rendered.len());

        for file in rendered {
            let path = root.join(&file.path);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| EngineError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            fs::write(&path, &file.content).map_err(|source| EngineError::Write {
                path: path.clone(),
                source,
            })?;

            tracing::debug!(path = %path.display(), template = file.template, "wrote chart file");
            files.push(path);
        }

        tracing::info!(
            root = %root.display(),
            files = files.len(),
            "chart tree written"
        );

        Ok(WriteSummary { root, files })
    }
}
