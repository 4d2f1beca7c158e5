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

use serde::Serialize;

use crate::predict::typedef::{PredictionResult, RawInput};
use crate::sensor::typedef::SensorReading;

#[derive(Default, Clone, Debug)]
pub(crate) struct DashboardState {
	pub input: RawInput,
	pub prediction: Option<PredictionResult>,
	pub show_results: bool,
	pub reading: SensorReading,
	pub mounted: bool,
	/// Bumped on every unmount so late predictions can tell the view is gone.
	pub generation: u64,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
	pub input: RawInput,
	pub prediction: Option<PredictionResult>,
	pub is_processing: bool,
	pub show_results: bool,
	pub reading: SensorReading,
	pub is_live: bool,
}
