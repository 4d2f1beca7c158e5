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

use chrono::{DateTime, Local};
use rand::distr::{uniform, Uniform};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

#[derive(PartialEq, Eq, EnumIter, Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SensorMetric {
	Temperature,
	Humidity,
	Ph,
	Nitrogen,
}

impl SensorMetric {
	pub fn label(self) -> &'static str {
		match self {
			SensorMetric::Temperature => "Temperature",
			SensorMetric::Humidity => "Humidity",
			SensorMetric::Ph => "Soil pH",
			SensorMetric::Nitrogen => "Nitrogen",
		}
	}

	pub fn unit(self) -> &'static str {
		match self {
			SensorMetric::Temperature => "°C",
			SensorMetric::Humidity => "%",
			SensorMetric::Ph => "",
			SensorMetric::Nitrogen => "ppm",
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
	pub temperature: f64,
	pub humidity: f64,
	pub ph: f64,
	pub nitrogen: f64,
}

impl Default for SensorReading {
	fn default() -> Self {
		Self {
			temperature: 28.5,
			humidity: 65.0,
			ph: 6.8,
			nitrogen: 42.0,
		}
	}
}

impl SensorReading {
	pub fn get(&self, metric: SensorMetric) -> f64 {
		match metric {
			SensorMetric::Temperature => self.temperature,
			SensorMetric::Humidity => self.humidity,
			SensorMetric::Ph => self.ph,
			SensorMetric::Nitrogen => self.nitrogen,
		}
	}
}

/// Half-open interval `[min, max)` a simulated metric is drawn from.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct ReadingRange {
	pub min: f64,
	pub max: f64,
}

impl ReadingRange {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value < self.max
	}

	/// Fails on empty or non-finite bounds.
	pub fn distribution(&self) -> Result<Uniform<f64>, uniform::Error> {
		Uniform::new(self.min, self.max)
	}
}

/// What the front-end receives on every simulator tick.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SensorTick {
	pub sequence: u64,
	pub reading: SensorReading,
	pub recorded_at: DateTime<Local>,
}
