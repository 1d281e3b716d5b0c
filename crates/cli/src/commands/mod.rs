pub mod catalogs;
pub mod config;
pub mod doctor;
pub mod price;
pub mod render;

use std::path::Path;

use serde::Serialize;

use tripquote_core::QuotationDraft;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Reads and parses a quotation draft JSON file.
pub(crate) fn read_draft(command: &str, path: &Path) -> Result<QuotationDraft, CommandResult> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        CommandResult::failure(command, "draft_read", format!("could not read `{}`: {error}", path.display()), 2)
    })?;

    serde_json::from_str(&raw).map_err(|error| {
        CommandResult::failure(
            command,
            "draft_parse",
            format!("could not parse `{}`: {error}", path.display()),
            2,
        )
    })
}
