use crate::domain::model::{Assessment, Outcome};
use crate::domain::ports::Renderer;
use crate::utils::error::{Result, ValidationError};
use serde::Serialize;

/// Envelope written for every outcome: `{"status": "ok", "assessment": ...}`
/// or `{"status": "invalid", "error": ..., "title": ..., "message": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonOutcome<'a> {
    Ok {
        assessment: &'a Assessment,
    },
    Invalid {
        error: &'a ValidationError,
        title: &'static str,
        message: String,
    },
}

impl<'a> From<&'a Outcome> for JsonOutcome<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        match outcome {
            Ok(assessment) => JsonOutcome::Ok { assessment },
            Err(e) => JsonOutcome::Invalid {
                error: e,
                title: e.title(),
                message: e.to_string(),
            },
        }
    }
}

/// Machine-readable output. Doses are whole milligrams and volumes one
/// decimal, the same figures the HTML and text outputs print.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonRenderer {
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, outcome: &Outcome) -> Result<String> {
        let view = JsonOutcome::from(outcome);
        let text = if self.pretty {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        Ok(text)
    }
}
