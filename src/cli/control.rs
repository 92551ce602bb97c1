use serde_json::json;
use tabled::Tabled;

use crate::cli::output::print_output;
use crate::cli::{connect, Target};
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::models::command::Operation;

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEVICE ID")]
    device_id: String,
    #[tabled(rename = "RESULT")]
    result: String,
}

#[derive(Tabled)]
struct ResponseRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "OK")]
    ok: bool,
    #[tabled(rename = "CODE")]
    code: i32,
    #[tabled(rename = "MESSAGE")]
    message: String,
}

/// Send one control operation to the target devices.
pub async fn handle(
    op: Operation,
    target: &Target,
    keep_going: bool,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    // Range errors need neither credentials nor a registry.
    let command = op.validate()?;
    let dispatcher = connect(config)?;

    if keep_going {
        let report = dispatcher.dispatch_report(&target.devices, &op).await?;
        let rows: Vec<OutcomeRow> = report
            .outcomes
            .iter()
            .map(|o| OutcomeRow {
                name: o.device.device_name.clone(),
                device_id: o.device.device.clone(),
                result: match &o.result {
                    Ok(r) => format!("{} {}", r.code, r.message),
                    Err(e) => e.to_string(),
                },
            })
            .collect();
        let mut value = report.to_json();
        value["command"] = json!(command.name());
        print_output(&value, &rows, config.output_mode);

        let failed = report.failed();
        if failed > 0 {
            return Err(AppError::PartialFailure {
                failed,
                total: report.outcomes.len(),
            });
        }
        return Ok(());
    }

    let responses = dispatcher.dispatch(&target.devices, &op).await?;
    if responses.is_empty() {
        tracing::warn!(devices = ?target.devices, "No registry entry matched; nothing sent");
    }

    let rows: Vec<ResponseRow> = responses
        .iter()
        .enumerate()
        .map(|(i, r)| ResponseRow {
            index: i + 1,
            ok: r.successful(),
            code: r.code,
            message: r.message.clone(),
        })
        .collect();
    print_output(
        &json!({
            "command": command.name(),
            "sent": responses.len(),
            "accepted": responses.iter().filter(|r| r.successful()).count(),
            "responses": responses,
        }),
        &rows,
        config.output_mode,
    );
    Ok(())
}

