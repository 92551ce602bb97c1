use serde::Serialize;

use super::command::{PowerState, Rgb};

/// The light channel a device is currently driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightChannel {
    Color(Rgb),
    ColorTemperature(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceState {
    pub device: String,
    pub model: String,
    pub online: Option<bool>,
    pub power_state: Option<PowerState>,
    pub brightness: Option<u8>,
    pub channel: Option<LightChannel>,
}

impl DeviceState {
    /// Fold the vendor's list of single-key property objects into one state.
    ///
    /// Unknown keys are ignored. The first light channel reported wins.
    pub fn from_properties(device: &str, model: &str, properties: &[serde_json::Value]) -> Self {
        let mut state = Self {
            device: device.to_string(),
            model: model.to_string(),
            online: None,
            power_state: None,
            brightness: None,
            channel: None,
        };

        for prop in properties {
            if let Some(v) = prop.get("online") {
                // Some firmware reports the flag as a string.
                state.online = v
                    .as_bool()
                    .or_else(|| v.as_str().and_then(|s| s.parse::<bool>().ok()));
            }
            if let Some(v) = prop.get("powerState").and_then(|v| v.as_str()) {
                state.power_state = v.parse().ok();
            }
            if let Some(v) = prop.get("brightness").and_then(|v| v.as_u64()) {
                state.brightness = u8::try_from(v).ok();
            }
            if state.channel.is_none() {
                state.channel = channel_from_json(prop);
            }
        }

        state
    }
}

fn channel_from_json(prop: &serde_json::Value) -> Option<LightChannel> {
    if let Some(color) = prop.get("color") {
        let channel = |key: &str| {
            color
                .get(key)
                .and_then(|v| v.as_u64())
                .and_then(|v| u8::try_from(v).ok())
        };
        return Some(LightChannel::Color(Rgb {
            r: channel("r")?,
            g: channel("g")?,
            b: channel("b")?,
        }));
    }
    prop.get("colorTemInKelvin")
        .or_else(|| prop.get("colorTem"))
        .and_then(|v| v.as_u64())
        .and_then(|v| u16::try_from(v).ok())
        .map(LightChannel::ColorTemperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fold_color_state() {
        let props = vec![
            json!({"online": true}),
            json!({"powerState": "on"}),
            json!({"brightness": 82}),
            json!({"color": {"r": 255, "g": 10, "b": 0}}),
        ];
        let state = DeviceState::from_properties("AA:BB", "H6072", &props);
        assert_eq!(state.online, Some(true));
        assert_eq!(state.power_state, Some(PowerState::On));
        assert_eq!(state.brightness, Some(82));
        assert_eq!(
            state.channel,
            Some(LightChannel::Color(Rgb { r: 255, g: 10, b: 0 }))
        );
    }

    #[test]
    fn test_fold_color_temperature_state() {
        let props = vec![
            json!({"online": "false"}),
            json!({"powerState": "off"}),
            json!({"colorTemInKelvin": 7200}),
        ];
        let state = DeviceState::from_properties("AA:BB", "H6072", &props);
        assert_eq!(state.online, Some(false));
        assert_eq!(state.power_state, Some(PowerState::Off));
        assert_eq!(state.brightness, None);
        assert_eq!(state.channel, Some(LightChannel::ColorTemperature(7200)));
    }

    #[test]
    fn test_first_channel_wins() {
        let props = vec![
            json!({"colorTem": 3000}),
            json!({"color": {"r": 1, "g": 2, "b": 3}}),
        ];
        let state = DeviceState::from_properties("AA:BB", "H6072", &props);
        assert_eq!(state.channel, Some(LightChannel::ColorTemperature(3000)));
    }

    #[test]
    fn test_ignores_unknown_and_malformed() {
        let props = vec![
            json!({"humidity": 40}),
            json!({"brightness": 400}),
            json!({"color": {"r": 1}}),
        ];
        let state = DeviceState::from_properties("AA:BB", "H6072", &props);
        assert_eq!(state.brightness, None);
        assert_eq!(state.channel, None);
        assert_eq!(state.online, None);
    }
}
