use serde::Serialize;
use serde_json::json;

use crate::models::command::Command;

/// The label the control endpoint expects alongside RGB channels.
const COLOR_LABEL: &str = "Color";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPayload<'a> {
    pub device: &'a str,
    pub model: &'a str,
    pub cmd: CommandBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandBody {
    pub name: &'static str,
    pub value: serde_json::Value,
}

/// Build the body of a control request. Values are not re-checked.
pub fn build_payload<'a>(device: &'a str, model: &'a str, command: &Command) -> ControlPayload<'a> {
    let value = match command {
        Command::Turn(state) => json!(state.as_str()),
        Command::Brightness(level) => json!(level),
        Command::Color(rgb) => json!({
            "name": COLOR_LABEL,
            "r": rgb.r,
            "g": rgb.g,
            "b": rgb.b,
        }),
        Command::ColorTem(kelvin) => json!(kelvin),
    };

    ControlPayload {
        device,
        model,
        cmd: CommandBody {
            name: command.name(),
            value,
        },
    }
}
