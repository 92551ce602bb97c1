use serde_json::json;
use tabled::Tabled;

use crate::cli::output::{or_dash, print_output};
use crate::cli::{connect, Target};
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::models::device_state::{DeviceState, LightChannel};

#[derive(Tabled)]
struct StateRow {
    #[tabled(rename = "DEVICE ID")]
    device_id: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "ONLINE")]
    online: String,
    #[tabled(rename = "POWER")]
    power: String,
    #[tabled(rename = "BRIGHTNESS")]
    brightness: String,
    #[tabled(rename = "LIGHT")]
    light: String,
}

fn state_row(state: &DeviceState) -> StateRow {
    StateRow {
        device_id: state.device.clone(),
        model: state.model.clone(),
        online: or_dash(state.online),
        power: or_dash(state.power_state),
        brightness: or_dash(state.brightness),
        light: match state.channel {
            Some(LightChannel::Color(rgb)) => format!("rgb({},{},{})", rgb.r, rgb.g, rgb.b),
            Some(LightChannel::ColorTemperature(k)) => format!("{}K", k),
            None => "-".into(),
        },
    }
}

pub async fn handle(target: &Target, config: &RuntimeConfig) -> Result<(), AppError> {
    let dispatcher = connect(config)?;
    let states = dispatcher.get_many_device_states(&target.devices).await?;

    let rows: Vec<StateRow> = states.iter().map(state_row).collect();
    print_output(&json!({ "states": states }), &rows, config.output_mode);
    Ok(())
}
