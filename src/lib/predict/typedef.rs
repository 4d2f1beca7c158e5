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
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

#[derive(PartialEq, Eq, Hash, EnumIter, Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum InputField {
	Nitrogen,
	Phosphorus,
	Potassium,
	Temperature,
	Humidity,
	Ph,
	Rainfall,
}

impl InputField {
	/// Value used when the field is left empty or cannot be read as a number.
	pub fn default_value(self) -> f64 {
		match self {
			InputField::Nitrogen => 40.0,
			InputField::Phosphorus => 50.0,
			InputField::Potassium => 45.0,
			InputField::Temperature => 28.0,
			InputField::Humidity => 65.0,
			InputField::Ph => 6.8,
			InputField::Rainfall => 150.0,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			InputField::Nitrogen => "Nitrogen (N)",
			InputField::Phosphorus => "Phosphorus (P)",
			InputField::Potassium => "Potassium (K)",
			InputField::Temperature => "Temperature",
			InputField::Humidity => "Humidity",
			InputField::Ph => "Soil pH",
			InputField::Rainfall => "Rainfall",
		}
	}

	pub fn unit(self) -> &'static str {
		match self {
			InputField::Nitrogen | InputField::Phosphorus | InputField::Potassium => "kg/ha",
			InputField::Temperature => "°C",
			InputField::Humidity => "%",
			InputField::Ph => "",
			InputField::Rainfall => "mm",
		}
	}

	pub fn placeholder(self) -> String {
		format!("e.g., {}", self.default_value())
	}
}

impl std::fmt::Display for InputField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			InputField::Nitrogen => write!(f, "nitrogen"),
			InputField::Phosphorus => write!(f, "phosphorus"),
			InputField::Potassium => write!(f, "potassium"),
			InputField::Temperature => write!(f, "temperature"),
			InputField::Humidity => write!(f, "humidity"),
			InputField::Ph => write!(f, "ph"),
			InputField::Rainfall => write!(f, "rainfall"),
		}
	}
}

/// Form metadata sent to the front-end so it can lay out the input fields.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InputFieldInfo {
	pub field: InputField,
	pub label: &'static str,
	pub unit: &'static str,
	pub placeholder: String,
	pub default_value: f64,
}

impl From<InputField> for InputFieldInfo {
	fn from(field: InputField) -> Self {
		Self {
			field,
			label: field.label(),
			unit: field.unit(),
			placeholder: field.placeholder(),
			default_value: field.default_value(),
		}
	}
}

/// The seven form fields exactly as typed. Empty means not entered.
#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInput {
	pub nitrogen: String,
	pub phosphorus: String,
	pub potassium: String,
	pub temperature: String,
	pub humidity: String,
	pub ph: String,
	pub rainfall: String,
}

impl RawInput {
	pub fn get(&self, field: InputField) -> &str {
		match field {
			InputField::Nitrogen => &self.nitrogen,
			InputField::Phosphorus => &self.phosphorus,
			InputField::Potassium => &self.potassium,
			InputField::Temperature => &self.temperature,
			InputField::Humidity => &self.humidity,
			InputField::Ph => &self.ph,
			InputField::Rainfall => &self.rainfall,
		}
	}

	pub fn set(&mut self, field: InputField, value: impl Into<String>) {
		let slot = match field {
			InputField::Nitrogen => &mut self.nitrogen,
			InputField::Phosphorus => &mut self.phosphorus,
			InputField::Potassium => &mut self.potassium,
			InputField::Temperature => &mut self.temperature,
			InputField::Humidity => &mut self.humidity,
			InputField::Ph => &mut self.ph,
			InputField::Rainfall => &mut self.rainfall,
		};
		*slot = value.into();
	}
}

/// Parsed form values. `None` stands for "use the default".
#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputParameters {
	pub nitrogen: Option<f64>,
	pub phosphorus: Option<f64>,
	pub potassium: Option<f64>,
	pub temperature: Option<f64>,
	pub humidity: Option<f64>,
	pub ph: Option<f64>,
	pub rainfall: Option<f64>,
}

impl InputParameters {
	pub fn get(&self, field: InputField) -> Option<f64> {
		match field {
			InputField::Nitrogen => self.nitrogen,
			InputField::Phosphorus => self.phosphorus,
			InputField::Potassium => self.potassium,
			InputField::Temperature => self.temperature,
			InputField::Humidity => self.humidity,
			InputField::Ph => self.ph,
			InputField::Rainfall => self.rainfall,
		}
	}

	pub(crate) fn set(&mut self, field: InputField, value: Option<f64>) {
		match field {
			InputField::Nitrogen => self.nitrogen = value,
			InputField::Phosphorus => self.phosphorus = value,
			InputField::Potassium => self.potassium = value,
			InputField::Temperature => self.temperature = value,
			InputField::Humidity => self.humidity = value,
			InputField::Ph => self.ph = value,
			InputField::Rainfall => self.rainfall = value,
		}
	}

	/// The effective value of a field after default substitution.
	pub fn value(&self, field: InputField) -> f64 {
		self.get(field).unwrap_or_else(|| field.default_value())
	}
}

#[derive(PartialEq, Eq, Hash, EnumIter, Deserialize, Serialize, Clone, Copy, Debug)]
pub enum Crop {
	Rice,
	Wheat,
	Cotton,
	Maize,
	Sugarcane,
	Jute,
	Pulses,
}

impl std::fmt::Display for Crop {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Crop::Rice => write!(f, "Rice"),
			Crop::Wheat => write!(f, "Wheat"),
			Crop::Cotton => write!(f, "Cotton"),
			Crop::Maize => write!(f, "Maize"),
			Crop::Sugarcane => write!(f, "Sugarcane"),
			Crop::Jute => write!(f, "Jute"),
			Crop::Pulses => write!(f, "Pulses"),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
	pub crop_health_index: f64,
	pub pest_risk_score: f64,
	pub soil_condition: f64,
	pub recommended_crop: Crop,
	pub computed_at: DateTime<Local>,
}

#[derive(PartialEq, Eq, EnumIter, Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
	Health,
	Soil,
	Pest,
}

#[derive(PartialEq, Eq, Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
	Optimal,
	Moderate,
	ActionRequired,
}

impl std::fmt::Display for Severity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Severity::Optimal => write!(f, "Optimal Range"),
			Severity::Moderate => write!(f, "Moderate"),
			Severity::ActionRequired => write!(f, "Action Required"),
		}
	}
}
