//! The field rules describing a Python project.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    checks::{self, Check, ListPolicy, SortKey},
    classifiers::ClassifierCatalog,
    editor::EditorCommand,
    error::SetupError,
    pattern::Pattern,
    rule::{Condition, FieldRule},
    schema::Schema,
    value::Value,
};

/// Interpreters a generated project may declare.
pub const KNOWN_PYTHONS: &[&str] = &["3.8", "3.9", "3.10", "3.11", "3.12", "3.13"];

/// License of every generated project.
pub const LICENSE_NAME: &str = "MIT";

/// Example classifiers shown under the empty `classifiers` list.
const CLASSIFIER_EXAMPLES: &[&str] = &[
    "Development Status :: 3 - Alpha",
    "Intended Audience :: Developers",
    "Programming Language :: Python :: 3",
];

/// What kind of distribution is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Package,
    Plugin,
    ConsoleApplication,
}

impl ProjectType {
    pub const ALL: [Self; 3] = [Self::Package, Self::Plugin, Self::ConsoleApplication];

    pub const fn code(self) -> i64 {
        match self {
            Self::Package => 0,
            Self::Plugin => 1,
            Self::ConsoleApplication => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Plugin => "plugin",
            Self::ConsoleApplication => "console application",
        }
    }

    pub const fn has_entry_points(self) -> bool {
        !matches!(self, Self::Package)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Initial values for the rendered document.
///
/// Identity fields left as `None` become hint fields the author must fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub project_name: String,
    pub package_name: Option<String>,
    pub project_description: Option<String>,
    pub author_full_name: Option<String>,
    pub author_email: Option<String>,
    pub github_user: Option<String>,
    pub keywords: Vec<String>,
    pub platforms: Vec<String>,
    pub supported_pythons: Vec<String>,
}

impl ProjectDefaults {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Explicit package name, else the project name with `-` mapped to `_`,
    /// lowercased.
    pub fn package_name(&self) -> String {
        self.package_name
            .clone()
            .unwrap_or_else(|| self.project_name.replace('-', "_").to_lowercase())
    }
}

fn scalar_default(rule: FieldRule, value: Option<&String>, example: &str) -> FieldRule {
    match value {
        Some(v) => rule.default_value(v.as_str()),
        None => rule.default_value(example).hint(),
    }
}

fn list_or(items: &[String], fallback: &[&str]) -> Value {
    if items.is_empty() {
        Value::strings(fallback.iter().copied(), 0)
    } else {
        Value::strings(items.iter().cloned(), 0)
    }
}

fn email_check(pattern: &Pattern) -> Check {
    checks::text()
        .and_then(checks::replace_at_token())
        .and_then(checks::matches(pattern.clone()))
}

fn non_empty_text() -> Check {
    checks::text().and_then(checks::non_empty())
}

/// Assemble the schema edited by `pyscaff new`.
pub fn project_schema(
    defaults: &ProjectDefaults,
    catalog: &ClassifierCatalog,
    editor: EditorCommand,
) -> Result<Schema, SetupError> {
    let word = Pattern::word()?;
    let keyword = Pattern::keyword()?;
    let identifier = Pattern::identifier()?;
    let email = Pattern::email()?;
    let requirement = Pattern::requirement()?;

    let license = catalog
        .find_license(LICENSE_NAME)
        .ok_or_else(|| SetupError::MissingLicense {
            license: LICENSE_NAME.into(),
        })?
        .to_owned();

    let is_plugin = || Condition::field_equals("project_type", ProjectType::Plugin.code());
    let has_entry_points = || Condition::field_at_least("project_type", ProjectType::Plugin.code());
    let is_console = || {
        Condition::field_equals("project_type", ProjectType::ConsoleApplication.code())
    };

    let rules = vec![
        FieldRule::new("project_name")
            .describe([
                "Name of the project as published on PyPI.",
                "A letter followed by at least two letters, digits, '-' or '_'.",
            ])
            .default_value(defaults.project_name.as_str())
            .check(checks::matches(word.clone())),
        FieldRule::new("package_name")
            .describe([
                "Name of the top-level Python package.",
                "Must be a valid identifier of at least three characters.",
            ])
            .default_value(defaults.package_name())
            .check(checks::matches(identifier.clone())),
        FieldRule::new("namespace")
            .describe([
                "Optional namespace package the package lives in.",
                "Leave null for a plain package.",
            ])
            .optional()
            .check(checks::matches(identifier.clone())),
        FieldRule::new("project_description")
            .describe(["One sentence describing the project."])
            .default_value(
                defaults
                    .project_description
                    .clone()
                    .unwrap_or_else(|| format!("The {} project.", defaults.project_name)),
            )
            .check(non_empty_text().map(checks::ensure_period)),
        scalar_default(
            FieldRule::new("author_full_name").describe(["Author's full name."]),
            defaults.author_full_name.as_ref(),
            "Jane Doe",
        )
        .check(non_empty_text()),
        scalar_default(
            FieldRule::new("author_email").describe([
                "Author's e-mail address.",
                "The 'name AT host' form is accepted.",
            ]),
            defaults.author_email.as_ref(),
            "jane.doe@example.com",
        )
        .check(email_check(&email)),
        scalar_default(
            FieldRule::new("github_user").describe(["GitHub user name hosting the repository."]),
            defaults.github_user.as_ref(),
            "janedoe",
        )
        .check(checks::matches(word.clone())),
        FieldRule::new("github_email")
            .describe([
                "E-mail used for git commits.",
                "Defaults to author_email when null.",
            ])
            .fallback_to("author_email")
            .check(email_check(&email)),
        FieldRule::new("copyright_holder")
            .describe(["Copyright holder.", "Defaults to author_full_name when null."])
            .fallback_to("author_full_name")
            .check(non_empty_text()),
        FieldRule::new("team_name")
            .describe(["Maintaining team.", "Defaults to author_full_name when null."])
            .fallback_to("author_full_name")
            .check(non_empty_text()),
        FieldRule::new("team_email")
            .describe(["Team e-mail address.", "Defaults to author_email when null."])
            .fallback_to("author_email")
            .check(email_check(&email)),
        FieldRule::new("classifiers")
            .describe([
                "PyPI classifiers, one per line (see `pyscaff classifiers`).",
                "License classifiers are not accepted; the MIT one is added for you.",
            ])
            .default_value(Value::strings(CLASSIFIER_EXAMPLES.iter().copied(), 0))
            .hint()
            .check(checks::string_list(
                ListPolicy::new("classifier")
                    .one_of(catalog.without_licenses())
                    .allow_empty()
                    .sorted(SortKey::Lexical)
                    .suffix([license]),
            )),
        FieldRule::new("keywords")
            .describe(["Project keywords; each may be a phrase of words."])
            .default_value(list_or(&defaults.keywords, &["python"]))
            .check(checks::string_list(
                ListPolicy::new("keyword")
                    .pattern(keyword)
                    .sorted(SortKey::Lexical),
            )),
        FieldRule::new("platforms")
            .describe([
                "Supported platforms.",
                "For example: any, linux, macos, posix, unix, windows.",
            ])
            .default_value(list_or(&defaults.platforms, &["any"]))
            .check(checks::string_list(
                ListPolicy::new("platform")
                    .pattern(word.clone())
                    .sorted(SortKey::Lexical),
            )),
        FieldRule::new("requirements")
            .describe(["Install requirements, e.g. 'requests>=2.31'."])
            .default_value(Value::List(Vec::new()))
            .check(checks::string_list(
                ListPolicy::new("requirement")
                    .pattern(requirement)
                    .allow_empty(),
            )),
        FieldRule::new("project_type")
            .describe([
                "Kind of project:",
                "  0 - package",
                "  1 - plugin (entry point in a plugin name space)",
                "  2 - console application (console_scripts entry point)",
            ])
            .default_value(ProjectType::Package.code())
            .check(checks::range(0, ProjectType::ConsoleApplication.code())),
        FieldRule::new("plugin_namespace")
            .describe(["Entry point group of the plugin (project_type 1 only)."])
            .applies_when(is_plugin())
            .check(checks::matches(identifier.clone())),
        FieldRule::new("entry_point_name")
            .describe(["Plugin or script name (project_type 1 and 2)."])
            .applies_when(has_entry_points())
            .check(checks::matches(word)),
        FieldRule::new("entry_point_source")
            .describe(["Module defining the entry point (project_type 1 and 2)."])
            .applies_when(has_entry_points())
            .check(checks::matches(identifier.clone())),
        FieldRule::new("entry_point_source_description")
            .describe(["One sentence describing that module (project_type 1 and 2)."])
            .applies_when(has_entry_points())
            .check(non_empty_text().map(checks::ensure_period)),
        FieldRule::new("entry_point_function")
            .describe(["Function called by the script (project_type 2 only)."])
            .default_value("main")
            .applies_when(is_console())
            .check(checks::matches(identifier)),
        FieldRule::new("supported_pythons")
            .describe([
                format!("Supported Python versions out of: {}.", KNOWN_PYTHONS.join(", ")),
                "An empty list means all of them.".to_owned(),
            ])
            .default_value(list_or(&defaults.supported_pythons, KNOWN_PYTHONS))
            .check(checks::string_list(
                ListPolicy::new("Python version")
                    .one_of(KNOWN_PYTHONS.iter().copied())
                    .fallback(KNOWN_PYTHONS.iter().copied())
                    .sorted(SortKey::Version),
            )),
        FieldRule::new("initialize_git")
            .describe(["Run 'git init' in the new project (yes/no)."])
            .default_value(false)
            .check(checks::boolean()),
    ];

    Schema::builder().rules(rules).editor(editor).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocatedKind;

    const MIT: &str = "License :: OSI Approved :: MIT License";

    fn catalog() -> ClassifierCatalog {
        ClassifierCatalog::new([
            "Development Status :: 3 - Alpha",
            "Intended Audience :: Developers",
            "Programming Language :: Python :: 3",
            "License :: OSI Approved :: Apache Software License",
            MIT,
            "Topic :: Utilities",
        ])
    }

    fn defaults() -> ProjectDefaults {
        ProjectDefaults {
            author_full_name: Some("Jane Doe".into()),
            author_email: Some("jane AT example.com".into()),
            github_user: Some("janedoe".into()),
            ..ProjectDefaults::new("my-tool")
        }
    }

    fn schema() -> Schema {
        project_schema(&defaults(), &catalog(), EditorCommand::parse("vi").unwrap()).unwrap()
    }

    fn line_of(text: &str, needle: &str) -> usize {
        text.lines().position(|l| l.starts_with(needle)).unwrap() + 1
    }

    #[test]
    fn missing_license_is_setup_error() {
        let err = project_schema(
            &defaults(),
            &ClassifierCatalog::new(["Topic :: Utilities"]),
            EditorCommand::parse("vi").unwrap(),
        )
        .unwrap_err();
        assert_eq!(err, SetupError::MissingLicense { license: "MIT".into() });
    }

    #[test]
    fn rendered_defaults_verify_and_normalize() {
        let schema = schema();
        let doc = schema.verify(&schema.render_text()).unwrap();

        assert_eq!(doc.str_value("package_name"), Some("my_tool"));
        assert_eq!(doc.str_value("author_email"), Some("jane@example.com"));
        assert_eq!(doc.str_value("github_email"), Some("jane@example.com"));
        assert_eq!(doc.str_value("team_name"), Some("Jane Doe"));
        assert_eq!(doc.str_value("project_description"), Some("The my-tool project."));
        assert_eq!(doc.get("classifiers").unwrap().value().string_items(), vec![MIT]);
        assert_eq!(
            doc.get("supported_pythons").unwrap().value().string_items(),
            KNOWN_PYTHONS.to_vec()
        );
        assert_eq!(doc.bool_value("initialize_git"), Some(false));
    }

    #[test]
    fn hint_identity_fails_at_first_hint_field() {
        let schema = project_schema(
            &ProjectDefaults::new("my-tool"),
            &catalog(),
            EditorCommand::parse("vi").unwrap(),
        )
        .unwrap();
        let text = schema.render_text();
        let err = schema.verify(&text).unwrap_err();
        assert_eq!(err.kind(), LocatedKind::Verification);
        assert_eq!(err.line(), Some(line_of(&text, "author_full_name:")));
    }

    #[test]
    fn folded_description_is_text() {
        let schema = schema();
        let text = schema.render_text().replace(
            "project_description: \"The my-tool project.\"",
            "project_description: >-\n  2024",
        );
        let doc = schema.verify(&text).unwrap();
        assert_eq!(doc.str_value("project_description"), Some("2024."));
    }

    #[test]
    fn requirement_element_line_fidelity() {
        let schema = schema();
        let text = schema.render_text().replace(
            "requirements: []",
            "requirements:\n  - click\n  - \"bad requirement!\"",
        );
        let req_line = line_of(&text, "requirements:");
        let err = schema.verify(&text).unwrap_err();
        assert_eq!(err.line(), Some(req_line + 2));
        assert!(err.detail().contains("Invalid requirement"));
    }

    #[test]
    fn plugin_namespace_only_checked_for_plugins() {
        let schema = schema();
        let text = schema
            .render_text()
            .replace("plugin_namespace: null", "plugin_namespace: \"not an identifier!\"");
        assert!(schema.verify(&text).is_ok());

        let text = schema
            .render_text()
            .replace("project_type: 0", "project_type: 1");
        let err = schema.verify(&text).unwrap_err();
        assert_eq!(err.line(), Some(line_of(&text, "plugin_namespace:")));
    }

    #[test]
    fn console_application_fields() {
        let schema = schema();
        let text = schema
            .render_text()
            .replace("project_type: 0", "project_type: 2")
            .replace("entry_point_name: null", "entry_point_name: \"my-tool\"")
            .replace("entry_point_source: null", "entry_point_source: \"cli\"")
            .replace(
                "entry_point_source_description: null",
                "entry_point_source_description: \"Command line interface\"",
            );
        let doc = schema.verify(&text).unwrap();
        assert_eq!(doc.str_value("entry_point_function"), Some("main"));
        assert_eq!(
            doc.str_value("entry_point_source_description"),
            Some("Command line interface.")
        );
    }

    #[test]
    fn classifiers_reject_licenses_and_unknowns() {
        let schema = schema();
        let text = schema.render_text().replace(
            "classifiers: []",
            "classifiers:\n  - \"License :: OSI Approved :: Apache Software License\"",
        );
        let err = schema.verify(&text).unwrap_err();
        assert_eq!(err.line(), Some(line_of(&text, "classifiers:") + 1));
    }

    #[test]
    fn pythons_sorted_numerically() {
        let schema = schema();
        let original = schema.render().join("\n");
        let start = line_of(&original, "supported_pythons:");
        let mut lines: Vec<String> = original.lines().map(str::to_owned).collect();
        let end = start + KNOWN_PYTHONS.len();
        lines.splice(start..end, ["  - \"3.10\"".to_owned(), "  - \"3.9\"".to_owned()]);
        let doc = schema.verify(&lines.join("\n")).unwrap();
        assert_eq!(
            doc.get("supported_pythons").unwrap().value().string_items(),
            vec!["3.9", "3.10"]
        );
    }

    #[test]
    fn project_type_codes() {
        assert_eq!(ProjectType::from_code(1), Some(ProjectType::Plugin));
        assert_eq!(ProjectType::from_code(3), None);
        assert!(ProjectType::ConsoleApplication.has_entry_points());
        assert!(!ProjectType::Package.has_entry_points());
    }
}
