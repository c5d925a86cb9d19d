use log::*;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    /// Number of most recent balls shown in the ball strip
    pub recent_balls: usize,
    /// Number of balls in each of the legacy "current"/"previous" over views
    pub over_len: usize,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            recent_balls: 12,
            over_len: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    /// Required rates above this are "challenging"
    pub challenging: f64,
    /// Required rates above this are "very difficult"
    pub very_difficult: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            challenging: 8.0,
            very_difficult: 12.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub display: Display,
    pub rates: Rates,
}

impl Config {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read config file: {}", e);
                return Err(Box::new(e));
            }
        };

        match toml::from_str(&config_file) {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                Err(Box::new(e))
            }
        }
    }
}
