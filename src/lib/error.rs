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

use std::{io, path::PathBuf};

use crate::predict::typedef::InputField;

/// A field value refused by the strict input policy.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("invalid value {raw:?} for {field}: {reason}")]
pub struct InvalidInputError {
	pub field: InputField,
	pub raw: String,
	pub reason: &'static str,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
	#[error("a prediction is already being processed")]
	InFlight,
	#[error(transparent)]
	InvalidInput(#[from] InvalidInputError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
	#[error("cannot read config file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("malformed config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid config: {0}")]
	Invalid(String),
}
