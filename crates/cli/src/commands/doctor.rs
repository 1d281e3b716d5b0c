use serde::Serialize;

use tripquote_catalog::{CatalogSource, RestCatalogClient};
use tripquote_core::config::{AppConfig, LoadOptions};

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                error.to_string().replace('"', "\\\"")
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_document_pipeline());
            checks.push(check_catalog_reachability(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "document_pipeline",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_reachability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_document_pipeline() -> DoctorCheck {
    if tripquote_document::is_wkhtmltopdf_available() {
        DoctorCheck {
            name: "document_pipeline",
            status: CheckStatus::Pass,
            details: "wkhtmltopdf found in PATH".to_string(),
        }
    } else {
        // HTML delivery still works, but operators usually want PDFs.
        DoctorCheck {
            name: "document_pipeline",
            status: CheckStatus::Fail,
            details: "wkhtmltopdf not found in PATH; documents will be delivered as HTML"
                .to_string(),
        }
    }
}

fn check_catalog_reachability(config: &AppConfig) -> DoctorCheck {
    let client = match RestCatalogClient::new(
        config.catalog_api.base_url.clone(),
        config.catalog_api.timeout_secs,
    ) {
        Ok(client) => client,
        Err(error) => {
            return DoctorCheck {
                name: "catalog_reachability",
                status: CheckStatus::Fail,
                details: error.to_string(),
            }
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "catalog_reachability",
                status: CheckStatus::Fail,
                details: error.to_string(),
            }
        }
    };

    match runtime.block_on(client.fetch_all()) {
        Ok(snapshot) => DoctorCheck {
            name: "catalog_reachability",
            status: CheckStatus::Pass,
            details: format!(
                "all catalogs fetched ({} hotels, {} transfers, {} activities, {} meal plans)",
                snapshot.hotels.len(),
                snapshot.transfers.len(),
                snapshot.activities.len(),
                snapshot.meal_plans.len()
            ),
        },
        Err(error) => DoctorCheck {
            name: "catalog_reachability",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{marker}] {}: {}", check.name, check.details));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn doctor_emits_every_check_in_json_mode() {
        let result = run(true);
        assert!(result.output.contains("config_validation"));
        assert!(result.output.contains("document_pipeline"));
        assert!(result.output.contains("catalog_reachability"));
    }
}
