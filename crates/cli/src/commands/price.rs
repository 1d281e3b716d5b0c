use std::path::Path;

use serde::Serialize;

use tripquote_core::{aggregate, check_warnings, validate, DerivedCosts, QuotationWarning};

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PriceReport {
    command: &'static str,
    status: &'static str,
    costs: DerivedCosts,
    warnings: Vec<QuotationWarning>,
}

pub fn run(draft_path: &Path) -> CommandResult {
    let draft = match super::read_draft("price", draft_path) {
        Ok(draft) => draft,
        Err(failure) => return failure,
    };

    if let Err(errors) = validate(&draft) {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return CommandResult::failure("price", "validation", details.join("; "), 1);
    }

    let costs = aggregate(&draft);
    let warnings = check_warnings(&draft);

    let report = PriceReport { command: "price", status: "ok", costs, warnings };
    match serde_json::to_string_pretty(&report) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure("price", "serialization", error.to_string(), 1),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::run;

    fn draft_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file =
            tempfile::Builder::new().suffix(".json").tempfile().expect("create draft file");
        file.write_all(contents.as_bytes()).expect("write draft file");
        file
    }

    #[test]
    fn prices_a_complete_draft() {
        let file = draft_file(
            r#"{
                "client": {"name": "R. Sharma"},
                "travel": {
                    "country_id": null,
                    "airport_id": null,
                    "travel_date": "2026-12-04",
                    "group_size": 2,
                    "declared_total_nights": 2
                },
                "location": "Phuket",
                "flight_cost_per_person": "5000",
                "accommodations": [{
                    "location": "Phuket",
                    "hotel_name": {"kind": "custom", "value": "Sea View"},
                    "room_type": "Deluxe",
                    "nights": 2,
                    "price_per_night": "1500"
                }],
                "status": "DRAFT"
            }"#,
        );

        let result = run(file.path());
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("total_per_head"));
    }

    #[test]
    fn incomplete_draft_exits_nonzero_with_field_details() {
        let file = draft_file(
            r#"{
                "client": {"name": ""},
                "travel": {
                    "country_id": null,
                    "airport_id": null,
                    "travel_date": null,
                    "group_size": 1,
                    "declared_total_nights": 0
                },
                "location": "",
                "status": "DRAFT"
            }"#,
        );

        let result = run(file.path());
        assert_eq!(result.exit_code, 1);
        assert!(result.output.contains("client name"));
    }

    #[test]
    fn unreadable_draft_is_a_distinct_failure_class() {
        let result = run(std::path::Path::new("no-such-draft.json"));
        assert_eq!(result.exit_code, 2);
        assert!(result.output.contains("draft_read"));
    }
}
