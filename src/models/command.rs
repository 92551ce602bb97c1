use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const BRIGHTNESS_RANGE: RangeInclusive<i64> = 0..=100;
pub const CHANNEL_RANGE: RangeInclusive<i64> = 0..=255;
pub const COLOR_TEM_RANGE: RangeInclusive<i64> = 2000..=9000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(PowerState::On),
            "off" => Ok(PowerState::Off),
            other => Err(AppError::InvalidInput(format!(
                "power state must be 'on' or 'off', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A control command whose value is already known to be in range.
///
/// Only [`Operation::validate`] produces these outside of tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(PowerState),
    Brightness(u8),
    Color(Rgb),
    ColorTem(u16),
}

impl Command {
    /// The vendor's name for this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Turn(_) => "turn",
            Command::Brightness(_) => "brightness",
            Command::Color(_) => "color",
            Command::ColorTem(_) => "colorTem",
        }
    }
}

/// Raw control intent as supplied by the user, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Turn(PowerState),
    Brightness(i64),
    Color { r: i64, g: i64, b: i64 },
    ColorTem(i64),
}

impl Operation {
    /// Map a command name and value string onto an operation.
    ///
    /// Accepted names are `turn`, `brightness`, `color` (value `r,g,b`) and
    /// `color_temp` / `colorTem`. Only the shape is checked here.
    pub fn from_args(name: &str, value: &str) -> Result<Self, AppError> {
        match name {
            "turn" => Ok(Operation::Turn(value.parse()?)),
            "brightness" => Ok(Operation::Brightness(parse_int("brightness", value)?)),
            "color" => {
                let parts: Vec<&str> = value.split(',').map(str::trim).collect();
                if parts.len() != 3 {
                    return Err(AppError::InvalidInput(format!(
                        "color must be given as r,g,b, got '{}'",
                        value
                    )));
                }
                Ok(Operation::Color {
                    r: parse_int("r", parts[0])?,
                    g: parse_int("g", parts[1])?,
                    b: parse_int("b", parts[2])?,
                })
            }
            "color_temp" | "color-temp" | "colorTem" => {
                Ok(Operation::ColorTem(parse_int("color temperature", value)?))
            }
            other => Err(AppError::InvalidInput(format!("unknown command '{}'", other))),
        }
    }

    /// Range-check the parameters and produce the typed command.
    pub fn validate(&self) -> Result<Command, AppError> {
        match *self {
            Operation::Turn(state) => Ok(Command::Turn(state)),
            Operation::Brightness(level) => {
                if !BRIGHTNESS_RANGE.contains(&level) {
                    return Err(AppError::Validation(format!(
                        "brightness must be between 0 and 100, got {}",
                        level
                    )));
                }
                Ok(Command::Brightness(level as u8))
            }
            Operation::Color { r, g, b } => {
                if ![r, g, b].iter().all(|c| CHANNEL_RANGE.contains(c)) {
                    return Err(AppError::Validation(format!(
                        "r, g and b must be between 0 and 255, got {},{},{}",
                        r, g, b
                    )));
                }
                Ok(Command::Color(Rgb {
                    r: r as u8,
                    g: g as u8,
                    b: b as u8,
                }))
            }
            Operation::ColorTem(kelvin) => {
                if !COLOR_TEM_RANGE.contains(&kelvin) {
                    return Err(AppError::Validation(format!(
                        "color temperature must be between 2000 and 9000, got {}",
                        kelvin
                    )));
                }
                Ok(Command::ColorTem(kelvin as u16))
            }
        }
    }
}

fn parse_int(what: &str, value: &str) -> Result<i64, AppError> {
    value.trim().parse::<i64>().map_err(|_| {
        AppError::InvalidInput(format!("{} must be an integer, got '{}'", what, value))
    })
}
