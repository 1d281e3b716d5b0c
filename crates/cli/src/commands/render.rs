use std::path::Path;

use tripquote_core::config::{AppConfig, LoadOptions};
use tripquote_core::{aggregate, validate, Conversion};
use tripquote_document::{download_filename, DocumentArtifact, DocumentGenerator};

use super::CommandResult;

pub fn run(draft_path: &Path, out: Option<&Path>, pdf: bool) -> CommandResult {
    let draft = match super::read_draft("render", draft_path) {
        Ok(draft) => draft,
        Err(failure) => return failure,
    };

    if let Err(errors) = validate(&draft) {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return CommandResult::failure("render", "validation", details.join("; "), 1);
    }

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("render", "config", error.to_string(), 1),
    };

    let generator = match DocumentGenerator::new(config.branding) {
        Ok(generator) => generator,
        Err(error) => return CommandResult::failure("render", "template", error.to_string(), 1),
    };
    let generator = if pdf { generator } else { generator.without_pdf_conversion() };

    let costs = aggregate(&draft);
    // CLI renders in base currency; display conversion is a server concern
    // driven by the fetched conversion table.
    let conversion = Conversion::identity();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("render", "runtime", error.to_string(), 1),
    };

    let artifact = match runtime.block_on(generator.generate(&draft, &costs, &conversion)) {
        Ok(artifact) => artifact,
        Err(error) => return CommandResult::failure("render", "render", error.to_string(), 1),
    };

    match out {
        Some(path) => {
            if let Err(error) = std::fs::write(path, artifact.into_bytes()) {
                return CommandResult::failure(
                    "render",
                    "write",
                    format!("could not write `{}`: {error}", path.display()),
                    2,
                );
            }
            CommandResult {
                exit_code: 0,
                output: format!(
                    "wrote {} to {}",
                    download_filename(draft.quotation_no.as_deref()),
                    path.display()
                ),
            }
        }
        None => match artifact {
            DocumentArtifact::Html(html) => CommandResult { exit_code: 0, output: html },
            DocumentArtifact::Pdf(_) => CommandResult::failure(
                "render",
                "usage",
                "PDF output requires --out <path>",
                2,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::run;

    #[test]
    fn renders_html_to_stdout_for_a_complete_draft() {
        let mut file =
            tempfile::Builder::new().suffix(".json").tempfile().expect("create draft file");
        file.write_all(
            br#"{
                "client": {"name": "R. Sharma"},
                "travel": {
                    "travel_date": "2026-12-04",
                    "group_size": 2,
                    "declared_total_nights": 1
                },
                "location": "Phuket",
                "accommodations": [{
                    "location": "Phuket",
                    "hotel_name": {"kind": "custom", "value": "Sea View"},
                    "room_type": "Deluxe",
                    "nights": 1,
                    "price_per_night": "1500"
                }],
                "status": "DRAFT"
            }"#,
        )
        .expect("write draft file");

        let result = run(file.path(), None, false);
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("Phuket"));
        assert!(result.output.contains("<html"));
    }
}
