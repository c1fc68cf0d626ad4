//! Editor command templates.

use std::path::Path;

use crate::domain::error::SetupError;

/// Replaced by the path of the edited document.
pub const NAME_ARG: &str = "@NAME@";

/// Replaced by the target line; arguments holding it are dropped when no
/// line is known.
pub const LINE_ARG: &str = "@LINE@";

/// Used when nothing else names an editor.
pub const DEFAULT_EDITOR: &str = "vi";

/// Editors that understand `+N path`.
const LINE_JUMP_EDITORS: &[&str] = &["vi", "vim", "nvim", "nano", "emacs", "micro", "kak"];

/// Program plus argument template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Parse a whitespace-separated template such as `vim +@LINE@ @NAME@`.
    ///
    /// A bare program known to support line jumps gets `+@LINE@ @NAME@`;
    /// any template without `@NAME@` gets it appended.
    pub fn parse(template: &str) -> Result<Self, SetupError> {
        let mut words = template.split_whitespace().map(str::to_owned);
        let program = words.next().ok_or(SetupError::NoEditor)?;
        let mut args: Vec<String> = words.collect();

        if args.is_empty() && supports_line_jump(&program) {
            args.push(format!("+{LINE_ARG}"));
        }
        if !args.iter().any(|a| a.contains(NAME_ARG)) {
            args.push(NAME_ARG.to_owned());
        }

        Ok(Self { program, args })
    }

    /// Pick the first configured template: explicit flag, configuration
    /// file, `$VISUAL`, `$EDITOR`, then [`DEFAULT_EDITOR`].
    pub fn resolve<F>(
        explicit: Option<&str>,
        configured: Option<&str>,
        env: F,
    ) -> Result<Self, SetupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = || {
            ["VISUAL", "EDITOR"]
                .into_iter()
                .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
        };

        match explicit.or(configured).map(str::to_owned).or_else(from_env) {
            Some(template) => Self::parse(&template),
            None => Self::parse(DEFAULT_EDITOR),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Concrete command for editing `path`, jumping to `line` when known.
    pub fn invocation(&self, path: &Path, line: Option<usize>) -> Invocation {
        let name = path.to_string_lossy();
        let args = self
            .args
            .iter()
            .filter_map(|arg| match line {
                None if arg.contains(LINE_ARG) => None,
                None => Some(arg.replace(NAME_ARG, &name)),
                Some(l) => Some(arg.replace(LINE_ARG, &l.to_string()).replace(NAME_ARG, &name)),
            })
            .collect();

        Invocation {
            program: self.program.clone(),
            args,
        }
    }
}

fn supports_line_jump(program: &str) -> bool {
    Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| LINE_JUMP_EDITORS.contains(&n))
}

/// A ready-to-run editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_appended_when_missing() {
        let cmd = EditorCommand::parse("code --wait").unwrap();
        assert_eq!(cmd.program(), "code");
        assert_eq!(cmd.args(), &["--wait", NAME_ARG]);
    }

    #[test]
    fn known_editor_gets_line_jump() {
        let cmd = EditorCommand::parse("/usr/bin/vim").unwrap();
        assert_eq!(cmd.args(), &["+@LINE@", "@NAME@"]);
    }

    #[test]
    fn blank_template_is_setup_error() {
        assert_eq!(EditorCommand::parse("   "), Err(SetupError::NoEditor));
    }

    #[test]
    fn invocation_with_line() {
        let cmd = EditorCommand::parse("vim").unwrap();
        let inv = cmd.invocation(Path::new("/tmp/x/config.yaml"), Some(11));
        assert_eq!(inv.args, vec!["+11", "/tmp/x/config.yaml"]);
        assert_eq!(inv.to_string(), "vim +11 /tmp/x/config.yaml");
    }

    #[test]
    fn unknown_line_drops_jump_argument() {
        let cmd = EditorCommand::parse("vim +@LINE@ @NAME@").unwrap();
        let inv = cmd.invocation(Path::new("c.yaml"), None);
        assert_eq!(inv.args, vec!["c.yaml"]);
    }

    #[test]
    fn resolution_order() {
        let env = |name: &str| match name {
            "VISUAL" => Some("nano".to_owned()),
            "EDITOR" => Some("emacs".to_owned()),
            _ => None,
        };
        let cmd = EditorCommand::resolve(Some("micro"), Some("kak"), env).unwrap();
        assert_eq!(cmd.program(), "micro");
        let cmd = EditorCommand::resolve(None, Some("kak"), env).unwrap();
        assert_eq!(cmd.program(), "kak");
        let cmd = EditorCommand::resolve(None, None, env).unwrap();
        assert_eq!(cmd.program(), "nano");
        let cmd = EditorCommand::resolve(None, None, |_| None).unwrap();
        assert_eq!(cmd.program(), DEFAULT_EDITOR);
    }

    #[test]
    fn blank_env_editor_is_ignored() {
        let env = |name: &str| (name == "VISUAL").then(|| "  ".to_owned());
        let cmd = EditorCommand::resolve(None, None, env).unwrap();
        assert_eq!(cmd.program(), DEFAULT_EDITOR);
    }
}
