/*
 * AgriSense, a crop prediction dashboard with simulated field sensors
 * Copyright (C) 2025 AgriSense Developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path, time::Duration};

use crate::error::ConfigError;
use crate::sensor::typedef::{ReadingRange, SensorReading};

pub const CONFIG_FILE_NAME: &'static str = "agrisense.toml";

#[derive(Default, PartialEq, Eq, Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
	/// Missing or unreadable fields silently fall back to their defaults.
	#[default]
	Lenient,
	/// Unreadable or out-of-domain fields are reported instead of defaulted.
	Strict,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PredictionConfig {
	pub latency_ms: u64,
	pub input_policy: InputPolicy,
	pub clamp_soil_floor: bool,
}

impl Default for PredictionConfig {
	fn default() -> Self {
		Self {
			latency_ms: 2000,
			input_policy: InputPolicy::Lenient,
			clamp_soil_floor: false,
		}
	}
}

impl PredictionConfig {
	pub fn latency(&self) -> Duration {
		Duration::from_millis(self.latency_ms)
	}
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
	pub period_ms: u64,
	pub temperature: ReadingRange,
	pub humidity: ReadingRange,
	pub ph: ReadingRange,
	pub nitrogen: ReadingRange,
	/// Shown until the first tick lands.
	pub initial: SensorReading,
}

impl Default for SimulatorConfig {
	fn default() -> Self {
		Self {
			period_ms: 3000,
			temperature: ReadingRange::new(25.0, 31.0),
			humidity: ReadingRange::new(60.0, 75.0),
			ph: ReadingRange::new(6.5, 7.3),
			nitrogen: ReadingRange::new(38.0, 48.0),
			initial: SensorReading::default(),
		}
	}
}

impl SimulatorConfig {
	pub fn period(&self) -> Duration {
		Duration::from_millis(self.period_ms)
	}
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
	pub prediction: PredictionConfig,
	pub simulator: SimulatorConfig,
}

impl DashboardConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: DashboardConfig = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Like [`DashboardConfig::load`], but a missing file means defaults.
	pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
		match Self::load(path) {
			Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
				log::info!("no config at {}, using defaults", path.display());
				Ok(Self::default())
			}
			other => other,
		}
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.simulator.period_ms == 0 {
			return Err(ConfigError::Invalid(String::from(
				"simulator.period_ms must be greater than zero",
			)));
		}

		let ranges = [
			("temperature", &self.simulator.temperature),
			("humidity", &self.simulator.humidity),
			("ph", &self.simulator.ph),
			("nitrogen", &self.simulator.nitrogen),
		];
		for (name, range) in ranges {
			if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
				return Err(ConfigError::Invalid(format!(
					"simulator.{name} needs finite bounds with min < max, got [{}, {})",
					range.min, range.max
				)));
			}
		}

		Ok(())
	}
}
