//! Simple variable substitution renderer.

use std::path::Path;

use pyscaff_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{
        DomainValidator as validator, ProjectStructure, RelativePath, RenderContext, Template,
        TemplateContent, TemplateNode, TemplateSource,
    },
    error::PyscaffResult,
};
use tracing::{debug, instrument};

/// Simple renderer using `{{VARIABLE}}` substitution.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.name))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> PyscaffResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);

        for node in template.active_nodes(context) {
            let path = render_path(node.path(), context)?;
            match node {
                TemplateNode::File(spec) => {
                    let content = render_content(&spec.content, context);
                    structure.add_file(path.into_path_buf(), content, spec.permissions);
                }
                TemplateNode::Directory(spec) => {
                    structure.add_directory(path.into_path_buf(), spec.permissions);
                }
            }
        }

        debug!(entries = structure.entry_count(), "Rendered template");
        validator::validate_project_structure(&structure)?;

        Ok(structure)
    }
}

fn render_path(source: &TemplateSource, ctx: &RenderContext) -> PyscaffResult<RelativePath> {
    let rendered = ctx.render(source.as_str());
    if rendered.contains("{{") {
        return Err(ApplicationError::RenderingFailed {
            reason: format!("Unresolved placeholder in path '{}'", rendered),
        }
        .into());
    }
    Ok(RelativePath::try_new(rendered)?)
}

fn render_content(content: &TemplateContent, ctx: &RenderContext) -> String {
    match content {
        TemplateContent::Literal(source) => source.as_str().to_string(),
        TemplateContent::Parameterized(source) => ctx.render(source.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyscaff_core::domain::{DirectorySpec, FileSpec, NodeCondition};

    fn context() -> RenderContext {
        RenderContext::new()
            .with_variable("PROJECT_NAME", "demo")
            .with_variable("PACKAGE_PATH", "acme/demo")
            .with_variable("PROJECT_TYPE", "package")
    }

    #[test]
    fn renders_paths_and_contents() {
        let template = Template::builder()
            .name("t")
            .directory(DirectorySpec::new("tests/unit"))
            .file(FileSpec::new(
                "src/{{PACKAGE_PATH}}/__init__.py",
                TemplateContent::Parameterized("\"\"\"{{PROJECT_NAME}}.\"\"\"\n".into()),
            ))
            .file(FileSpec::new("setup.py", TemplateContent::Literal("{{KEPT}}".into())).executable())
            .build()
            .unwrap();

        let s = SimpleRenderer::new()
            .render(&template, &context(), Path::new("/out/demo"))
            .unwrap();

        assert_eq!(s.root(), Path::new("/out/demo"));
        assert_eq!(s.file("src/acme/demo/__init__.py").unwrap().content, "\"\"\"demo.\"\"\"\n");
        let setup = s.file("setup.py").unwrap();
        assert_eq!(setup.content, "{{KEPT}}");
        assert!(setup.permissions.executable_flag());
        assert_eq!(s.directories().count(), 1);
    }

    #[test]
    fn skips_nodes_whose_condition_fails() {
        let template = Template::builder()
            .name("t")
            .file(FileSpec::new("LICENSE", TemplateContent::Literal("MIT".into())))
            .file(
                FileSpec::new("src/plugin.py", TemplateContent::Literal("".into()))
                    .when(NodeCondition::Equals("PROJECT_TYPE", "plugin")),
            )
            .build()
            .unwrap();

        let s = SimpleRenderer::new()
            .render(&template, &context(), Path::new("out"))
            .unwrap();
        assert_eq!(s.entry_count(), 1);
    }

    #[test]
    fn unresolved_path_placeholder_fails() {
        let template = Template::builder()
            .name("t")
            .file(FileSpec::new("{{MISSING}}.py", TemplateContent::Literal("".into())))
            .build()
            .unwrap();

        assert!(
            SimpleRenderer::new()
                .render(&template, &context(), Path::new("out"))
                .is_err()
        );
    }

    #[test]
    fn rendered_parent_traversal_is_rejected() {
        let template = Template::builder()
            .name("t")
            .file(FileSpec::new("{{PROJECT_NAME}}/x", TemplateContent::Literal("".into())))
            .build()
            .unwrap();
        let ctx = RenderContext::new().with_variable("PROJECT_NAME", "..");

        assert!(
            SimpleRenderer::new()
                .render(&template, &ctx, Path::new("out"))
                .is_err()
        );
    }
}
