//! Schema registry: ordered field rules plus the editor command.
//!
//! The rule order is both the render order and the validation order. A rule
//! sees every earlier field already normalized, which is what conditional
//! rules and fallbacks rely on.

use std::{collections::HashSet, path::Path};

use tracing::{debug, instrument};

use crate::domain::{
    editor::{EditorCommand, Invocation},
    error::{LocatedError, SetupError},
    reader,
    rule::FieldRule,
    value::{Document, Value},
};

/// Immutable once built; stateless across calls.
#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<FieldRule>,
    editor: EditorCommand,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, key: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.key() == key)
    }

    pub fn editor(&self) -> &EditorCommand {
        &self.editor
    }

    /// Document template lines, one rule after another.
    pub fn render(&self) -> Vec<String> {
        self.rules.iter().flat_map(render_rule).collect()
    }

    /// [`render`](Self::render) joined into file contents.
    pub fn render_text(&self) -> String {
        let mut text = self.render().join("\n");
        text.push('\n');
        text
    }

    /// Parse and validate a document.
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn verify(&self, text: &str) -> Result<Document, LocatedError> {
        let document = reader::parse(text)?;
        self.verify_document(document)
    }

    /// Validate an already parsed document.
    pub fn verify_document(&self, mut document: Document) -> Result<Document, LocatedError> {
        for (key, entry) in document.iter() {
            if self.rule(key).is_none() {
                return Err(LocatedError::schema(
                    Some(entry.key_line),
                    format!("Invalid key ({key})"),
                ));
            }
        }

        for rule in &self.rules {
            rule.verify(&mut document).inspect_err(|e| {
                debug!(key = rule.key(), line = e.reported_line(), error = %e, "field rejected");
            })?;
        }

        Ok(document)
    }

    pub fn editor_invocation(&self, path: &Path, line: Option<usize>) -> Invocation {
        self.editor.invocation(path, line)
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    rules: Vec<FieldRule>,
    editor: Option<EditorCommand>,
}

impl SchemaBuilder {
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn editor(mut self, editor: EditorCommand) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn build(self) -> Result<Schema, SetupError> {
        if self.rules.is_empty() {
            return Err(SetupError::NoRules);
        }
        let editor = self.editor.ok_or(SetupError::NoEditor)?;

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.key()) {
                return Err(SetupError::DuplicateKey {
                    key: rule.key().to_owned(),
                });
            }
        }

        Ok(Schema {
            rules: self.rules,
            editor,
        })
    }
}

fn render_rule(rule: &FieldRule) -> Vec<String> {
    let mut lines: Vec<String> = rule
        .description()
        .iter()
        .map(|d| format!("# {}", d.trim()).trim_end().to_owned())
        .collect();

    let default = rule.default();
    match (default, rule.is_hint()) {
        (Value::List(items), true) => {
            lines.push(format!("{}: []", rule.key()));
            lines.extend(items.iter().map(|i| format!("  #- {}", to_yaml(i.value()))));
        }
        (Value::List(items), false) if !items.is_empty() => {
            lines.push(format!("{}:", rule.key()));
            lines.extend(items.iter().map(|i| format!("  - {}", to_yaml(i.value()))));
        }
        (Value::Null, true) => lines.push(format!("{}: null", rule.key())),
        (value, true) => {
            lines.push(format!("{}: null", rule.key()));
            lines.push(format!("  # {}", to_yaml(value)));
        }
        (value, false) => lines.push(format!("{}: {}", rule.key(), to_yaml(value))),
    }

    lines.push(String::new());
    lines
}

/// Inline YAML for a value.
fn to_yaml(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::List(items) => {
            let inner: Vec<_> = items.iter().map(|i| to_yaml(i.value())).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Map(map) => {
            let inner: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", to_yaml(&Value::from(k.as_str())), to_yaml(v.value())))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}
