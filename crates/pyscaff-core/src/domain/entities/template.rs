//! Project template aggregate and rendering context.
//!
//! ## Overview
//!
//! ```text
//! Template (aggregate root)
//!  ├── name, description
//!  └── Vec<TemplateNode>
//!       ├── FileSpec      (path, content, permissions, condition)
//!       └── DirectorySpec (path, permissions, condition)
//!
//! RenderContext
//!  └── {{VARIABLE}} substitution built from a ProjectConfig
//! ```
//!
//! Paths are parameterized as well as contents, so one node can produce
//! `src/acme/my_tool/__init__.py` or `src/my_tool/__init__.py`. Nodes carry
//! a [`NodeCondition`] evaluated against the context; a node whose condition
//! does not hold is skipped at render time.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Datelike, Local};

use crate::domain::{
    entities::{common::Permissions, project_config::ProjectConfig},
    error::DomainError,
};

/// Format of the `STAMP` variable.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

// ============================================================================
// Render Context
// ============================================================================

/// Variables available to templates.
///
/// ## Standard variables
///
/// - `PROJECT_NAME`, `PACKAGE_NAME`, `NAMESPACE`, `MODULE_PATH`, `PACKAGE_PATH`
/// - `PROJECT_DESCRIPTION`, `PROJECT_TYPE`
/// - `AUTHOR_FULL_NAME`, `AUTHOR_EMAIL`, `GITHUB_USER`, `GITHUB_EMAIL`,
///   `COPYRIGHT_HOLDER`, `TEAM_NAME`, `TEAM_EMAIL`
/// - `YEAR`, `STAMP`
/// - `CLASSIFIERS`, `PLATFORMS`, `REQUIREMENTS`, `TOX_DEPS` (indented blocks),
///   `KEYWORDS` (comma separated)
/// - `LEAST_PYTHON`, `TOX_ENVS`
/// - `ENTRY_POINT_*` and `ENTRY_POINTS` (the whole `setup.cfg` section) when
///   the project has an entry point
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for `config`, stamped with the current local time.
    pub fn for_project(config: &ProjectConfig) -> Self {
        Self::for_project_at(config, Local::now())
    }

    pub fn for_project_at(config: &ProjectConfig, now: DateTime<Local>) -> Self {
        let mut ctx = Self::new()
            .with_variable("PROJECT_NAME", &config.project_name)
            .with_variable("PACKAGE_NAME", &config.package_name)
            .with_variable("NAMESPACE", config.namespace.as_deref().unwrap_or_default())
            .with_variable("MODULE_PATH", config.module_path())
            .with_variable("PACKAGE_PATH", config.package_path())
            .with_variable("PROJECT_DESCRIPTION", &config.project_description)
            .with_variable("PROJECT_TYPE", project_type_tag(config))
            .with_variable("AUTHOR_FULL_NAME", &config.author_full_name)
            .with_variable("AUTHOR_EMAIL", &config.author_email)
            .with_variable("GITHUB_USER", &config.github_user)
            .with_variable("GITHUB_EMAIL", &config.github_email)
            .with_variable("COPYRIGHT_HOLDER", &config.copyright_holder)
            .with_variable("TEAM_NAME", &config.team_name)
            .with_variable("TEAM_EMAIL", &config.team_email)
            .with_variable("YEAR", now.year().to_string())
            .with_variable("STAMP", now.format(STAMP_FORMAT).to_string())
            .with_variable("CLASSIFIERS", indented_block(&config.classifiers, 4))
            .with_variable("KEYWORDS", config.keywords.join(", "))
            .with_variable("PLATFORMS", indented_block(&config.platforms, 4))
            .with_variable("REQUIREMENTS", indented_block(&config.requirements, 4))
            .with_variable("TOX_DEPS", indented_block(&config.requirements, 4))
            .with_variable("LEAST_PYTHON", config.least_python().unwrap_or_default())
            .with_variable("TOX_ENVS", config.tox_envs());

        if let (Some(ep), Some(target)) = (&config.entry_point, config.entry_point_target()) {
            let section = format!(
                "\n[options.entry_points]\n{} =\n    {} = {}\n",
                ep.group, ep.name, target
            );
            ctx = ctx
                .with_variable("ENTRY_POINT_GROUP", &ep.group)
                .with_variable("ENTRY_POINT_NAME", &ep.name)
                .with_variable("ENTRY_POINT_SOURCE", &ep.source)
                .with_variable("ENTRY_POINT_SOURCE_DESCRIPTION", &ep.source_description)
                .with_variable("ENTRY_POINT_FUNCTION", ep.function.as_deref().unwrap_or_default())
                .with_variable("ENTRY_POINT_TARGET", target)
                .with_variable("ENTRY_POINTS", section);
        } else {
            ctx = ctx.with_variable("ENTRY_POINTS", "");
        }

        ctx
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder.
    ///
    /// Unknown placeholders stay as written.
    /// Substituted values are never scanned again.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}").and_then(|end| Some((end, self.get(&after[..end])?))) {
                Some((end, value)) => {
                    result.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    result.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }
        result.push_str(rest);
        result
    }

    pub fn satisfies(&self, condition: &NodeCondition) -> bool {
        match condition {
            NodeCondition::Always => true,
            NodeCondition::Equals(key, expected) => self.get(key) == Some(*expected),
            NodeCondition::Present(key) => self.get(key).is_some_and(|v| !v.is_empty()),
        }
    }
}

fn project_type_tag(config: &ProjectConfig) -> &'static str {
    use crate::domain::project::ProjectType;
    match config.project_type {
        ProjectType::Package => "package",
        ProjectType::Plugin => "plugin",
        ProjectType::ConsoleApplication => "console_application",
    }
}

/// Each item on its own line, prefixed by a newline and `indent` spaces.
fn indented_block(items: &[String], indent: usize) -> String {
    let pad = " ".repeat(indent);
    items.iter().map(|i| format!("\n{pad}{i}")).collect()
}

// ============================================================================
// Template Aggregate
// ============================================================================

/// When a template node is materialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeCondition {
    #[default]
    Always,
    /// Variable holds exactly this value.
    Equals(&'static str, &'static str),
    /// Variable is defined and non-empty.
    Present(&'static str),
}

/// An ordered set of files and directories to generate.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub nodes: Vec<TemplateNode>,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.nodes.is_empty() {
            return Err(DomainError::EmptyTemplate {
                name: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            let path = node.path().as_str();
            if Path::new(path).is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
            }
            if !seen.insert((path, node.condition())) {
                return Err(DomainError::DuplicatePath { path: path.into() });
            }
        }

        Ok(())
    }

    /// Nodes whose condition holds in `context`.
    pub fn active_nodes<'a>(
        &'a self,
        context: &'a RenderContext,
    ) -> impl Iterator<Item = &'a TemplateNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| context.satisfies(n.condition()))
    }
}

#[derive(Debug, Default)]
pub struct TemplateBuilder {
    name: String,
    description: String,
    nodes: Vec<TemplateNode>,
}

impl TemplateBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn file(mut self, file: FileSpec) -> Self {
        self.nodes.push(TemplateNode::File(file));
        self
    }

    pub fn directory(mut self, dir: DirectorySpec) -> Self {
        self.nodes.push(TemplateNode::Directory(dir));
        self
    }

    pub fn build(self) -> Result<Template, DomainError> {
        let template = Template {
            name: self.name,
            description: self.description,
            nodes: self.nodes,
        };
        template.validate()?;
        Ok(template)
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    pub fn path(&self) -> &TemplateSource {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }

    pub fn condition(&self) -> &NodeCondition {
        match self {
            Self::File(f) => &f.condition,
            Self::Directory(d) => &d.condition,
        }
    }
}

/// A file to create. The path is always rendered.
#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: TemplateSource,
    pub content: TemplateContent,
    pub permissions: Permissions,
    pub condition: NodeCondition,
}

impl FileSpec {
    pub fn new(path: impl Into<TemplateSource>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
            permissions: Permissions::read_write(),
            condition: NodeCondition::Always,
        }
    }

    /// Mark this file as executable (`chmod a+x`).
    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }

    pub fn when(mut self, condition: NodeCondition) -> Self {
        self.condition = condition;
        self
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: TemplateSource,
    pub permissions: Permissions,
    pub condition: NodeCondition,
}

impl DirectorySpec {
    pub fn new(path: impl Into<TemplateSource>) -> Self {
        Self {
            path: path.into(),
            permissions: Permissions::read_write(),
            condition: NodeCondition::Always,
        }
    }

    pub fn when(mut self, condition: NodeCondition) -> Self {
        self.condition = condition;
        self
    }
}

#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Content used exactly as provided.
    Literal(TemplateSource),

    /// Content with `{{VARIABLE}}` placeholders to be substituted.
    Parameterized(TemplateSource),
}

/// Compile-time or runtime text.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{") && self.as_str().contains("}}")
    }
}
