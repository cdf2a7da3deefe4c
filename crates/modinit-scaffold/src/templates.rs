//! Project templates.
//!
//! Templates live under `templates/` and are compiled into the binary with
//! [`include_str!`], then rendered with [Handlebars](https://handlebarsjs.com/)
//! through [`TemplateRenderer`].
//!
//! The only variable is `{{module_name}}`. Rendering runs in strict mode, so a
//! misspelled variable is an error instead of silently rendering empty, and
//! HTML escaping is disabled so the name is substituted verbatim.

use handlebars::Handlebars;
use serde::Serialize;

use modinit_core::{InitError, Result};

/// Subdirectories created under the project root, in creation order.
pub const PROJECT_DIRECTORIES: [&str; 6] = ["cmd", "internal", "pkg", "api", "scripts", "configs"];

/// A file generated in the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTemplate {
    /// File name relative to the project root; also the registry key
    pub file_name: &'static str,
    /// Raw Handlebars source
    pub source: &'static str,
}

pub const MAIN_GO: ProjectTemplate = ProjectTemplate {
    file_name: "main.go",
    source: include_str!("../templates/main.go.tmpl"),
};

pub const GITIGNORE: ProjectTemplate = ProjectTemplate {
    file_name: ".gitignore",
    source: include_str!("../templates/gitignore.tmpl"),
};

pub const MAKEFILE: ProjectTemplate = ProjectTemplate {
    file_name: "Makefile",
    source: include_str!("../templates/Makefile.tmpl"),
};

pub const README: ProjectTemplate = ProjectTemplate {
    file_name: "README.md",
    source: include_str!("../templates/README.md.tmpl"),
};

/// Every generated file, in write order.
pub const PROJECT_TEMPLATES: [ProjectTemplate; 4] = [MAIN_GO, GITIGNORE, MAKEFILE, README];

/// Variables available to every template.
#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    module_name: &'a str,
}

/// Handlebars registry holding the project templates.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Registry with every template in [`PROJECT_TEMPLATES`].
    pub fn new() -> Result<Self> {
        Self::with_templates(&PROJECT_TEMPLATES)
    }

    /// Registry with the given templates, keyed by file name.
    pub fn with_templates(templates: &[ProjectTemplate]) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        for template in templates {
            registry
                .register_template_string(template.file_name, template.source)
                .map_err(|e| InitError::template_render(template.file_name, e.to_string()))?;
        }

        Ok(Self { registry })
    }

    /// Render `template` with the module name substituted verbatim.
    pub fn render(&self, template: &ProjectTemplate, module_name: &str) -> Result<String> {
        self.registry
            .render(template.file_name, &TemplateContext { module_name })
            .map_err(|e| InitError::template_render(template.file_name, e.to_string()))
    }
}
