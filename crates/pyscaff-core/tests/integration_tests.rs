//! Integration tests for pyscaff-core: edit-verify through scaffolding,
//! using only the public API and in-test port implementations.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pyscaff_core::{
    application::{
        EditSession, ScaffoldOptions, ScaffoldService,
        ports::{
            EditorLauncher, Filesystem, Operator, ScratchFile, ScratchSpace, TemplateRenderer,
        },
    },
    domain::{
        ClassifierCatalog, EditorCommand, FileSpec, FsEntry, Invocation, LocatedError,
        NodeCondition, ProjectConfig, ProjectDefaults, ProjectStructure, RenderContext,
        Template, TemplateContent, TemplateNode, project_schema,
    },
    error::PyscaffResult,
};

const MIT: &str = "License :: OSI Approved :: MIT License";

fn schema() -> pyscaff_core::domain::Schema {
    let defaults = ProjectDefaults {
        author_full_name: Some("Jane Doe".into()),
        author_email: Some("jane@example.com".into()),
        github_user: Some("janedoe".into()),
        ..ProjectDefaults::new("demo-app")
    };
    let catalog = ClassifierCatalog::new(["Topic :: Utilities", MIT]);
    project_schema(&defaults, &catalog, EditorCommand::parse("vi").unwrap()).unwrap()
}

// -----------------------------------------------------------------------------
// In-test adapters
// -----------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Files(Arc<Mutex<BTreeMap<PathBuf, String>>>);

impl Filesystem for Files {
    fn create_dir_all(&self, _path: &Path) -> PyscaffResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PyscaffResult<()> {
        self.0.lock().unwrap().insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> PyscaffResult<String> {
        Ok(self.0.lock().unwrap().get(path).cloned().unwrap_or_default())
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> PyscaffResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.lock().unwrap().keys().any(|p| p.starts_with(path))
    }

    fn remove_dir_all(&self, path: &Path) -> PyscaffResult<()> {
        self.0.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

struct Substitute;

impl TemplateRenderer for Substitute {
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> PyscaffResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);
        for node in template.active_nodes(context) {
            if let TemplateNode::File(spec) = node {
                let body = match &spec.content {
                    TemplateContent::Literal(s) => s.as_str().to_owned(),
                    TemplateContent::Parameterized(s) => context.render(s.as_str()),
                };
                structure.add_file(context.render(spec.path.as_str()), body, spec.permissions);
            }
        }
        Ok(structure)
    }
}

/// Each launch "edits" the scratch file into the next scripted document.
struct ScriptedEditor {
    edits: Mutex<VecDeque<Box<dyn Fn(String) -> String + Send>>>,
    current: Arc<Mutex<String>>,
    launches: Arc<Mutex<Vec<Invocation>>>,
}

impl EditorLauncher for ScriptedEditor {
    fn launch(&self, invocation: &Invocation) -> PyscaffResult<Option<i32>> {
        self.launches.lock().unwrap().push(invocation.clone());
        if let Some(edit) = self.edits.lock().unwrap().pop_front() {
            let mut current = self.current.lock().unwrap();
            *current = edit(current.clone());
        }
        Ok(Some(0))
    }
}

struct SharedScratch(Arc<Mutex<String>>);

struct SharedFile(Arc<Mutex<String>>, PathBuf);

impl ScratchSpace for SharedScratch {
    fn create(&self, name: &str, contents: &str) -> PyscaffResult<Box<dyn ScratchFile>> {
        *self.0.lock().unwrap() = contents.to_owned();
        Ok(Box::new(SharedFile(self.0.clone(), PathBuf::from("/scratch").join(name))))
    }
}

impl ScratchFile for SharedFile {
    fn path(&self) -> &Path {
        &self.1
    }

    fn read(&self) -> PyscaffResult<String> {
        Ok(self.0.lock().unwrap().clone())
    }
}

struct Persistent(Arc<Mutex<Vec<Option<usize>>>>);

impl Operator for Persistent {
    fn report(&self, error: &LocatedError) {
        self.0.lock().unwrap().push(error.line());
    }

    fn confirm(&self, _question: &str, _default: bool) -> PyscaffResult<bool> {
        Ok(true)
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[test]
fn edit_loop_then_scaffold() {
    let current = Arc::new(Mutex::new(String::new()));
    let launches = Arc::new(Mutex::new(Vec::new()));
    let reported = Arc::new(Mutex::new(Vec::new()));

    let edits: Vec<Box<dyn Fn(String) -> String + Send>> = vec![
        Box::new(|text| text.replace("project_type: 0", "project_type: 2")),
        Box::new(|text| {
            text.replace("entry_point_name: null", "entry_point_name: \"demo\"")
                .replace("entry_point_source: null", "entry_point_source: \"cli\"")
                .replace(
                    "entry_point_source_description: null",
                    "entry_point_source_description: \"Command line\"",
                )
        }),
    ];

    let session = EditSession::new(
        schema(),
        Box::new(SharedScratch(current.clone())),
        Box::new(ScriptedEditor {
            edits: Mutex::new(edits.into()),
            current: current.clone(),
            launches: launches.clone(),
        }),
        Box::new(Persistent(reported.clone())),
    );

    let document = session.run().unwrap().expect("document accepted");
    assert_eq!(launches.lock().unwrap().len(), 2);
    assert_eq!(reported.lock().unwrap().len(), 1);

    let second = &launches.lock().unwrap()[1];
    let rendered = schema().render_text();
    let expected_line = rendered
        .lines()
        .position(|l| l.starts_with("entry_point_name:"))
        .unwrap()
        + 1;
    assert_eq!(second.args[0], format!("+{expected_line}"));

    let config = ProjectConfig::from_document(&document).unwrap();
    assert_eq!(
        config.entry_point_target().as_deref(),
        Some("demo_app.cli:main")
    );
    assert_eq!(
        config.entry_point.as_ref().unwrap().source_description,
        "Command line."
    );

    let template = Template::builder()
        .name("mini")
        .file(FileSpec::new(
            "setup.cfg",
            TemplateContent::Parameterized("[metadata]\nname = {{PROJECT_NAME}}\n{{ENTRY_POINTS}}".into()),
        ))
        .file(
            FileSpec::new(
                "src/{{PACKAGE_PATH}}/{{ENTRY_POINT_SOURCE}}.py",
                TemplateContent::Parameterized("def {{ENTRY_POINT_FUNCTION}}():\n    pass\n".into()),
            )
            .when(NodeCondition::Present("ENTRY_POINT_SOURCE")),
        )
        .build()
        .unwrap();

    let files = Files::default();
    let service = ScaffoldService::new(template, Box::new(Substitute), Box::new(files.clone()));
    let report = service
        .scaffold(&config, Path::new("/out"), ScaffoldOptions::default())
        .unwrap();

    assert_eq!(report.files, 2);
    let cli = files
        .read_to_string(Path::new("/out/demo-app/src/demo_app/cli.py"))
        .unwrap();
    assert!(cli.starts_with("def main():"));
    let cfg = files.read_to_string(Path::new("/out/demo-app/setup.cfg")).unwrap();
    assert!(cfg.contains("demo = demo_app.cli:main"));
}

#[test]
fn plan_lists_entries_without_writing() {
    let document = schema().verify(&schema().render_text()).unwrap();
    let config = ProjectConfig::from_document(&document).unwrap();

    let template = Template::builder()
        .name("mini")
        .file(FileSpec::new("LICENSE", TemplateContent::Literal("MIT".into())))
        .build()
        .unwrap();
    let files = Files::default();
    let service = ScaffoldService::new(template, Box::new(Substitute), Box::new(files.clone()));

    let structure = service.plan(&config, Path::new("/out")).unwrap();
    assert!(matches!(structure.entries(), [FsEntry::File(f)] if f.path == Path::new("LICENSE")));
    assert!(!files.exists(Path::new("/out")));
}
