//! Edit-verify controller.
//!
//! Renders the schema into a scratch file, hands it to the editor, verifies
//! the result and loops until the document is valid or the operator gives
//! up. Parse errors and validation errors share the same retry path; the
//! editor is reopened at the line the last error pointed to.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{EditorLauncher, Operator, ScratchSpace},
    domain::{Document, Schema},
    error::PyscaffResult,
};

/// Scratch file name used when none is configured.
pub const DEFAULT_FILE_NAME: &str = "config.yaml";

/// Question asked after every failed verification.
pub const CONTINUE_PROMPT: &str = "Continue editing?";

/// One interactive editing session over a schema.
pub struct EditSession {
    schema: Schema,
    scratch: Box<dyn ScratchSpace>,
    launcher: Box<dyn EditorLauncher>,
    operator: Box<dyn Operator>,
    file_name: String,
}

impl EditSession {
    pub fn new(
        schema: Schema,
        scratch: Box<dyn ScratchSpace>,
        launcher: Box<dyn EditorLauncher>,
        operator: Box<dyn Operator>,
    ) -> Self {
        Self {
            schema,
            scratch,
            launcher,
            operator,
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }

    /// Name of the scratch file; the extension picks editor syntax modes.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Run the loop.
    ///
    /// Returns the normalised document, or `None` when the operator
    /// declines to continue after an error. The scratch file is removed on
    /// every exit path.
    #[instrument(skip_all, fields(file = %self.file_name))]
    pub fn run(&self) -> PyscaffResult<Option<Document>> {
        let file = self
            .scratch
            .create(&self.file_name, &self.schema.render_text())?;
        let mut target_line = None;
        let mut iteration = 0usize;

        loop {
            iteration += 1;
            let invocation = self.schema.editor_invocation(file.path(), target_line);
            info!(iteration, %invocation, "Launching editor");

            match self.launcher.launch(&invocation)? {
                Some(0) => {}
                Some(code) => warn!(code, "Editor exited with non-zero status"),
                None => warn!("Editor terminated without an exit status"),
            }

            let text = file.read()?;
            match self.schema.verify(&text) {
                Ok(document) => {
                    info!(iteration, keys = document.len(), "Document accepted");
                    return Ok(Some(document));
                }
                Err(error) => {
                    debug!(iteration, %error, "Document rejected");
                    self.operator.report(&error);
                    if !self.operator.confirm(CONTINUE_PROMPT, true)? {
                        info!(iteration, "Editing aborted");
                        return Ok(None);
                    }
                    target_line = error.line();
                }
            }
        }
    }
}
