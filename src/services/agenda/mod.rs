//! Agenda drafting through an external text-generation service.
//!
//! The composer owns the notes field while a request is in flight: it shows a
//! pending placeholder, refuses a second request, and always leaves either the
//! generated text or a failure message behind.

use std::sync::Arc;

use crate::error::{CalendarError, CalendarResult};
use crate::models::settings::GenerationSettings;

mod client;

pub use client::HttpTextGenerator;

pub const GENERATING_TEXT: &str = "Generating...";
pub const GENERATION_FAILED_TEXT: &str = "Failed to generate agenda. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
}

/// Prompt in, text out. One attempt per call.
#[cfg_attr(test, mockall::automock)]
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> CalendarResult<String>;
}

pub fn agenda_prompt(title: &str) -> String {
    format!(
        "Generate a concise meeting agenda for the topic: \"{}\". Include key talking points and time allocations.",
        title
    )
}

pub struct AgendaComposer {
    model: String,
    notes: String,
    pending: bool,
}

impl AgendaComposer {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            notes: String::new(),
            pending: false,
        }
    }

    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(settings.model.clone())
    }

    /// Start from the notes already in the form.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn into_notes(self) -> String {
        self.notes
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the generate trigger should be enabled.
    pub fn can_generate(&self, title: &str) -> bool {
        !self.pending && !title.trim().is_empty()
    }

    /// Mark a request as in flight. Returns `None` when one is already
    /// pending or there is no title to generate from.
    pub fn begin(&mut self, title: &str) -> Option<GenerationRequest> {
        if !self.can_generate(title) {
            return None;
        }
        self.pending = true;
        self.notes = GENERATING_TEXT.to_string();
        Some(GenerationRequest {
            model: self.model.clone(),
            prompt: agenda_prompt(title.trim()),
        })
    }

    pub fn finish(&mut self, result: CalendarResult<String>) {
        self.pending = false;
        self.notes = match result {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Agenda generation failed: {}", err);
                GENERATION_FAILED_TEXT.to_string()
            }
        };
    }

    /// Generate an agenda for `title` on the blocking pool. Returns `false`
    /// when the request was refused.
    pub async fn compose(&mut self, generator: Arc<dyn TextGenerator>, title: &str) -> bool {
        let Some(request) = self.begin(title) else {
            return false;
        };

        let result = tokio::task::spawn_blocking(move || generator.generate(&request))
            .await
            .unwrap_or_else(|err| Err(CalendarError::Generation(err.to_string())));

        self.finish(result);
        true
    }
}
