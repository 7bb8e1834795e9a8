//! Template engine based on MiniJinja
//!
//! Kapok templates go through two template languages: MiniJinja here, then
//! Helm's Go templates at install time. The MiniJinja stage uses `[[ ]]`,
//! `[% %]` and `[# #]` delimiters so every `{{ }}` survives untouched for Helm.

use kapok_core::{DeploymentConfig, Service, ServiceDescriptor, UMBRELLA_CHART_NAME};
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior, Value};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::catalog::{self, CATALOG, Scope, TemplateSpec};
use crate::error::{EngineError, Result, TemplateError};
use crate::filters;

/// Version stamped into every generated Chart.yaml
pub const CHART_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chart metadata exposed to templates as `chart`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl Default for ChartInfo {
    fn default() -> Self {
        Self {
            name: UMBRELLA_CHART_NAME,
            version: CHART_VERSION,
        }
    }
}

/// TLS settings exposed to templates as `tls`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsInfo {
    pub issuer: String,
}

/// A rendered template and where it belongs in the chart tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the umbrella chart root
    pub path: PathBuf,

    /// Catalog template that produced this file
    pub template: &'static str,

    pub content: String,
}

/// The template engine
pub struct Engine {
    env: Environment<'static>,
}

impl Engine {
    /// Create an engine with the whole catalog loaded
    pub fn new() -> Result<Self> {
        let mut env = Self::create_environment()?;

        for spec in CATALOG {
            env.add_template(spec.name, spec.source)
                .map_err(|e| TemplateError::from_minijinja(e, spec.name, spec.source))?;
        }

        Ok(Self { env })
    }

    /// Create a configured MiniJinja environment
    fn create_environment() -> Result<Environment<'static>> {
        let mut env = Environment::new();

        let syntax = SyntaxConfig::builder()
            .block_delimiters("[%", "%]")
            .variable_delimiters("[[", "]]")
            .comment_delimiters("[#", "#]")
            .build()
            .map_err(|e| EngineError::Syntax(e.to_string()))?;
        env.set_syntax(syntax);

        // Unresolved placeholders are defects in the catalog, never silent blanks
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_filter("toyaml", filters::toyaml);
        env.add_filter("quote", filters::quote);
        env.add_filter("nindent", filters::nindent);

        Ok(env)
    }

    /// Build the render context for one template
    fn context(config: &DeploymentConfig, service: Option<&ServiceDescriptor>) -> Value {
        let services: Vec<ServiceDescriptor> =
            Service::ALL.iter().map(Service::descriptor).collect();
        let tls = TlsInfo {
            issuer: config.issuer_name(),
        };

        match service {
            Some(service) => minijinja::context! {
                config => config,
                chart => ChartInfo::default(),
                services => services,
                tls => tls,
                service => service,
            },
            None => minijinja::context! {
                config => config,
                chart => ChartInfo::default(),
                services => services,
                tls => tls,
            },
        }
    }

    /// Render a single catalog template
    pub fn render(
        &self,
        spec: &TemplateSpec,
        config: &DeploymentConfig,
        service: Option<&ServiceDescriptor>,
    ) -> Result<String> {
        let tmpl = self
            .env
            .get_template(spec.name)
            .map_err(|e| TemplateError::from_minijinja(e, spec.name, spec.source))?;

        let rendered = tmpl
            .render(Self::context(config, service))
            .map_err(|e| TemplateError::from_minijinja(e, spec.name, spec.source))?;

        Ok(rendered)
    }

    /// Render an ad-hoc template string with the same syntax and context
    pub fn render_string(
        &self,
        template: &str,
        config: &DeploymentConfig,
        service: Option<Service>,
    ) -> Result<String> {
        let descriptor = service.map(|s| s.descriptor());
        self.env
            .render_str(template, Self::context(config, descriptor.as_ref()))
            .map_err(|e| {
                EngineError::Template(TemplateError::from_minijinja(e, "<string>", template))
            })
    }

    /// Render every catalog entry whose condition holds for `config`
    ///
    /// Umbrella files come first, then each service's files in catalog order.
    pub fn render_catalog(&self, config: &DeploymentConfig) -> Result<Vec<RenderedFile>> {
        let mut files = Vec::new();

        for spec in catalog::entries(Scope::Umbrella).filter(|s| s.condition.holds(config)) {
            files.push(RenderedFile {
                path: PathBuf::from(spec.path),
                template: spec.name,
                content: self.render(spec, config, None)?,
            });
        }

        for service in Service::ALL {
            let descriptor = service.descriptor();
            let root = Path::new("charts").join(service.name());

            for spec in catalog::entries(Scope::PerService).filter(|s| s.condition.holds(config)) {
                files.push(RenderedFile {
                    path: root.join(spec.path),
                    template: spec.name,
                    content: self.render(spec, config, Some(&descriptor))?,
                });
            }
        }

        tracing::debug!(
            files = files.len(),
            provider = %config.provider,
            "rendered chart catalog"
        );

        Ok(files)
    }
}
