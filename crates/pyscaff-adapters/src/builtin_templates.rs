//! Built-in project templates.
//!
//! pyscaff ships a single template, `python`, producing a setuptools
//! project laid out under `src/`. Files specific to plugins and console
//! applications carry a [`NodeCondition`] on `PROJECT_TYPE`, so one
//! template covers all three project types.
//!
//! # Generated layout
//!
//! ```text
//! <project_name>/
//! ├── LICENSE                    MIT, copyright holder and year
//! ├── MANIFEST.in
//! ├── pyproject.toml
//! ├── setup.cfg                  metadata, options, entry points
//! ├── setup.py                   executable
//! ├── tox.ini
//! ├── src/<namespace>/<package>/
//! │   ├── __init__.py
//! │   ├── version.py
//! │   ├── __main__.py            console applications
//! │   └── <entry_point_source>.py  plugins and console applications
//! └── tests/unit/
//!     ├── __init__.py
//!     └── test_version.py
//! ```

use pyscaff_core::domain::{
    DomainError, FileSpec, NodeCondition, Template, TemplateContent, TemplateSource,
};
use tracing::instrument;

/// Name of the default template.
pub const PYTHON: &str = "python";

/// Names of all built-in templates.
pub fn names() -> &'static [&'static str] {
    &[PYTHON]
}

/// Look up a built-in template by name.
pub fn find(name: &str) -> Option<Result<Template, DomainError>> {
    match name {
        PYTHON => Some(python_project()),
        _ => None,
    }
}

/// The setuptools project template.
#[instrument]
pub fn python_project() -> Result<Template, DomainError> {
    let console = || NodeCondition::Equals("PROJECT_TYPE", "console_application");
    let plugin = || NodeCondition::Equals("PROJECT_TYPE", "plugin");

    Template::builder()
        .name(PYTHON)
        .description("setuptools project with src/ layout, tox and pytest")
        .file(text("LICENSE", LICENSE))
        .file(text("MANIFEST.in", MANIFEST_IN))
        .file(text("pyproject.toml", PYPROJECT_TOML))
        .file(text("setup.cfg", SETUP_CFG))
        .file(python("setup.py", SETUP_PY).executable())
        .file(text("tox.ini", TOX_INI))
        .file(python("src/{{PACKAGE_PATH}}/__init__.py", PACKAGE_INIT))
        .file(python("src/{{PACKAGE_PATH}}/version.py", VERSION_PY))
        .file(python("src/{{PACKAGE_PATH}}/__main__.py", MAIN_PY).when(console()))
        .file(python("src/{{PACKAGE_PATH}}/{{ENTRY_POINT_SOURCE}}.py", CONSOLE_PY).when(console()))
        .file(python("src/{{PACKAGE_PATH}}/{{ENTRY_POINT_SOURCE}}.py", PLUGIN_PY).when(plugin()))
        .file(python("tests/unit/__init__.py", TESTS_INIT))
        .file(python("tests/unit/test_version.py", TEST_VERSION_PY))
        .build()
}

fn text(path: &'static str, body: &'static str) -> FileSpec {
    FileSpec::new(path, TemplateContent::Parameterized(TemplateSource::Static(body)))
}

/// Python sources get the common file header.
fn python(path: &'static str, body: &'static str) -> FileSpec {
    let shebang = body.starts_with("#!");
    let (first, rest) = if shebang {
        body.split_once('\n').unwrap_or((body, ""))
    } else {
        ("", body)
    };
    let mut content = String::new();
    if shebang {
        content.push_str(first);
        content.push('\n');
    }
    content.push_str(&PYTHON_HEADER.replace("@FILE@", path));
    content.push_str(rest);
    FileSpec::new(path, TemplateContent::Parameterized(TemplateSource::Owned(content)))
}

const PYTHON_HEADER: &str = "\
#                                                         -*- coding: utf-8 -*-
# File:    ./@FILE@
# Author:  {{AUTHOR_FULL_NAME}} <{{AUTHOR_EMAIL}}>
# Date:    {{STAMP}}
# Project: {{PROJECT_NAME}}: {{PROJECT_DESCRIPTION}}
#
# SPDX-License-Identifier: MIT
#
";

const LICENSE: &str = "\
MIT License

Copyright (c) {{YEAR}} {{COPYRIGHT_HOLDER}}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

const MANIFEST_IN: &str = "\
include LICENSE
include tox.ini
graft src
graft tests
global-exclude __pycache__ *.py[cod]
";

const PYPROJECT_TOML: &str = "\
[build-system]
requires = [\"setuptools>=61\", \"wheel\"]
build-backend = \"setuptools.build_meta\"
";

const SETUP_CFG: &str = "\
[metadata]
name = {{PROJECT_NAME}}
version = attr: {{MODULE_PATH}}.version.__version__
description = {{PROJECT_DESCRIPTION}}
author = {{AUTHOR_FULL_NAME}}
author_email = {{AUTHOR_EMAIL}}
maintainer = {{TEAM_NAME}}
maintainer_email = {{TEAM_EMAIL}}
url = https://github.com/{{GITHUB_USER}}/{{PROJECT_NAME}}
license = MIT
license_files = LICENSE
classifiers ={{CLASSIFIERS}}
keywords = {{KEYWORDS}}
platforms ={{PLATFORMS}}

[options]
package_dir =
    = src
packages = find_namespace:
python_requires = >={{LEAST_PYTHON}}
install_requires ={{REQUIREMENTS}}

[options.packages.find]
where = src
{{ENTRY_POINTS}}";

const SETUP_PY: &str = "\
#!/usr/bin/env python3
\"\"\"Setuptools shim for tools that still call setup.py.\"\"\"

from setuptools import setup

if __name__ == \"__main__\":
    setup()
";

const TOX_INI: &str = "\
[tox]
envlist = {{TOX_ENVS}}
isolated_build = true

[testenv]
deps =
    pytest{{TOX_DEPS}}
commands =
    pytest tests
";

const PACKAGE_INIT: &str = "\
\"\"\"{{PROJECT_DESCRIPTION}}\"\"\"
";

const VERSION_PY: &str = "\
\"\"\"{{PROJECT_NAME}} version.\"\"\"

__version__ = \"0.0.0\"
";

const MAIN_PY: &str = "\
\"\"\"Run {{ENTRY_POINT_NAME}} with `python -m {{MODULE_PATH}}`.\"\"\"

import sys

from {{MODULE_PATH}}.{{ENTRY_POINT_SOURCE}} import {{ENTRY_POINT_FUNCTION}}

if __name__ == \"__main__\":
    sys.exit({{ENTRY_POINT_FUNCTION}}())
";

const CONSOLE_PY: &str = "\
\"\"\"{{ENTRY_POINT_SOURCE_DESCRIPTION}}\"\"\"


def {{ENTRY_POINT_FUNCTION}}():
    \"\"\"Entry point of {{ENTRY_POINT_NAME}}.\"\"\"
    print(\"Hello from {{ENTRY_POINT_NAME}}!\")
    return 0
";

const PLUGIN_PY: &str = "\
\"\"\"{{ENTRY_POINT_SOURCE_DESCRIPTION}}\"\"\"


def setup():
    \"\"\"Hook called when {{ENTRY_POINT_NAME}} is loaded from {{ENTRY_POINT_GROUP}}.\"\"\"
";

const TESTS_INIT: &str = "\
\"\"\"Unit tests for {{PROJECT_NAME}}.\"\"\"
";

const TEST_VERSION_PY: &str = "\
\"\"\"Test the package version.\"\"\"

from {{MODULE_PATH}}.version import __version__


def test_version():
    \"\"\"The version is a non-empty string.\"\"\"
    assert isinstance(__version__, str)
    assert __version__
";
