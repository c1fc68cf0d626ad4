//! The built-in template rendered through the scaffold service into an
//! in-memory tree.

use std::path::Path;

use pyscaff_adapters::{BundledClassifiers, MemoryFilesystem, SimpleRenderer, builtin_templates};
use pyscaff_core::{
    application::{
        ApplicationError, ScaffoldOptions, ScaffoldService, load_catalog, ports::ClassifierSource,
        ports::Filesystem,
    },
    domain::{EditorCommand, ProjectConfig, ProjectDefaults, project_schema},
    error::PyscaffError,
};

fn project(edit: impl Fn(String) -> String) -> ProjectConfig {
    let sources: Vec<Box<dyn ClassifierSource>> = vec![Box::new(BundledClassifiers)];
    let catalog = load_catalog(&sources).unwrap();
    let defaults = ProjectDefaults {
        author_full_name: Some("Jane Doe".into()),
        author_email: Some("jane AT example.com".into()),
        github_user: Some("janedoe".into()),
        ..ProjectDefaults::new("demo-app")
    };
    let schema = project_schema(&defaults, &catalog, EditorCommand::parse("vi").unwrap()).unwrap();
    let document = schema.verify(&edit(schema.render_text())).unwrap();
    ProjectConfig::from_document(&document).unwrap()
}

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(
        builtin_templates::python_project().unwrap(),
        Box::new(SimpleRenderer::new()),
        Box::new(fs.clone()),
    )
}

#[test]
fn package_is_written_under_project_name() {
    let fs = MemoryFilesystem::new();
    let report = service(&fs)
        .scaffold(&project(|t| t), Path::new("/work"), ScaffoldOptions::default())
        .unwrap();

    assert_eq!(report.root, Path::new("/work/demo-app"));
    assert_eq!(report.files, fs.list_files().len());
    assert!(!report.git_initialized);

    let setup_py = Path::new("/work/demo-app/setup.py");
    assert!(fs.is_executable(setup_py));
    let setup_cfg = fs.read_file(Path::new("/work/demo-app/setup.cfg")).unwrap();
    assert!(setup_cfg.contains("author_email = jane@example.com"));
    assert!(fs.read_file(Path::new("/work/demo-app/src/demo_app/version.py")).is_some());
}

#[test]
fn console_application_gets_entry_point_module() {
    let fs = MemoryFilesystem::new();
    let config = project(|t| {
        t.replace("project_type: 0", "project_type: 2")
            .replace("entry_point_name: null", "entry_point_name: \"demo\"")
            .replace("entry_point_source: null", "entry_point_source: \"cli\"")
            .replace(
                "entry_point_source_description: null",
                "entry_point_source_description: \"Command line interface\"",
            )
    });
    service(&fs)
        .scaffold(&config, Path::new("/work"), ScaffoldOptions::default())
        .unwrap();

    let files = fs.list_files();
    assert!(files.contains(&"/work/demo-app/src/demo_app/cli.py".into()));
    assert!(files.contains(&"/work/demo-app/src/demo_app/__main__.py".into()));
}

#[test]
fn existing_project_is_kept_without_force() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/work/demo-app")).unwrap();
    fs.write_file(Path::new("/work/demo-app/notes.txt"), "keep").unwrap();

    let err = service(&fs)
        .scaffold(&project(|t| t), Path::new("/work"), ScaffoldOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        PyscaffError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert_eq!(fs.list_files(), vec![Path::new("/work/demo-app/notes.txt").to_path_buf()]);

    service(&fs)
        .scaffold(&project(|t| t), Path::new("/work"), ScaffoldOptions { force: true })
        .unwrap();
    assert!(fs.read_file(Path::new("/work/demo-app/notes.txt")).is_none());
}
