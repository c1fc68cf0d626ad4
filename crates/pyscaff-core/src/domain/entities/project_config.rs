use serde::Serialize;

use crate::domain::{
    error::DomainError,
    project::ProjectType,
    value::{Document, Value},
};

/// Entry point declared by plugins and console applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPoint {
    /// Entry point group: the plugin name space or `console_scripts`.
    pub group: String,
    pub name: String,
    pub source: String,
    pub source_description: String,
    /// Only console applications name a function.
    pub function: Option<String>,
}

/// A validated document projected into typed fields for the scaffolding
/// stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub project_name: String,
    pub package_name: String,
    pub namespace: Option<String>,
    pub project_description: String,
    pub author_full_name: String,
    pub author_email: String,
    pub github_user: String,
    pub github_email: String,
    pub copyright_holder: String,
    pub team_name: String,
    pub team_email: String,
    pub classifiers: Vec<String>,
    pub keywords: Vec<String>,
    pub platforms: Vec<String>,
    pub requirements: Vec<String>,
    pub project_type: ProjectType,
    pub entry_point: Option<EntryPoint>,
    pub supported_pythons: Vec<String>,
    pub initialize_git: bool,
}

impl ProjectConfig {
    pub fn from_document(doc: &Document) -> Result<Self, DomainError> {
        let code = int(doc, "project_type")?;
        let project_type = ProjectType::from_code(code)
            .ok_or_else(|| DomainError::projection("project_type", format!("unknown code {code}")))?;

        let entry_point = if project_type.has_entry_points() {
            let (group, function) = match project_type {
                ProjectType::ConsoleApplication => (
                    "console_scripts".to_owned(),
                    Some(string(doc, "entry_point_function")?),
                ),
                _ => (string(doc, "plugin_namespace")?, None),
            };
            Some(EntryPoint {
                group,
                name: string(doc, "entry_point_name")?,
                source: string(doc, "entry_point_source")?,
                source_description: string(doc, "entry_point_source_description")?,
                function,
            })
        } else {
            None
        };

        Ok(Self {
            project_name: string(doc, "project_name")?,
            package_name: string(doc, "package_name")?,
            namespace: optional_string(doc, "namespace")?,
            project_description: string(doc, "project_description")?,
            author_full_name: string(doc, "author_full_name")?,
            author_email: string(doc, "author_email")?,
            github_user: string(doc, "github_user")?,
            github_email: string(doc, "github_email")?,
            copyright_holder: string(doc, "copyright_holder")?,
            team_name: string(doc, "team_name")?,
            team_email: string(doc, "team_email")?,
            classifiers: strings(doc, "classifiers")?,
            keywords: strings(doc, "keywords")?,
            platforms: strings(doc, "platforms")?,
            requirements: strings(doc, "requirements")?,
            project_type,
            entry_point,
            supported_pythons: strings(doc, "supported_pythons")?,
            initialize_git: doc
                .bool_value("initialize_git")
                .ok_or_else(|| DomainError::projection("initialize_git", "expected bool"))?,
        })
    }

    /// Dotted import path of the package, including the name space.
    pub fn module_path(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.package_name),
            None => self.package_name.clone(),
        }
    }

    /// Package directory below `src/`.
    pub fn package_path(&self) -> String {
        self.module_path().replace('.', "/")
    }

    /// `module:function` or `module` reference of the entry point.
    pub fn entry_point_target(&self) -> Option<String> {
        self.entry_point.as_ref().map(|ep| {
            let module = format!("{}.{}", self.module_path(), ep.source);
            match &ep.function {
                Some(func) => format!("{module}:{func}"),
                None => module,
            }
        })
    }

    /// Oldest supported interpreter.
    pub fn least_python(&self) -> Option<&str> {
        self.supported_pythons.first().map(String::as_str)
    }

    /// tox environment names: `py39,py310`.
    pub fn tox_envs(&self) -> String {
        self.supported_pythons
            .iter()
            .map(|v| format!("py{}", v.replace('.', "")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn present<'a>(doc: &'a Document, key: &str) -> Result<&'a Value, DomainError> {
    doc.present(key)
        .map(|v| v.value())
        .ok_or_else(|| DomainError::projection(key, "missing"))
}

fn string(doc: &Document, key: &str) -> Result<String, DomainError> {
    present(doc, key)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| DomainError::projection(key, "expected str"))
}

fn optional_string(doc: &Document, key: &str) -> Result<Option<String>, DomainError> {
    match doc.present(key) {
        None => Ok(None),
        Some(_) => string(doc, key).map(Some),
    }
}

fn strings(doc: &Document, key: &str) -> Result<Vec<String>, DomainError> {
    let items = present(doc, key)?
        .as_list()
        .ok_or_else(|| DomainError::projection(key, "expected list"))?;
    items
        .iter()
        .map(|i| {
            i.value()
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| DomainError::projection(key, "expected list of str"))
        })
        .collect()
}

fn int(doc: &Document, key: &str) -> Result<i64, DomainError> {
    present(doc, key)?
        .as_int()
        .ok_or_else(|| DomainError::projection(key, "expected int"))
}
