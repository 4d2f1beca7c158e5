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

use strum::IntoEnumIterator;

use super::helper::classify;
use super::typedef::*;

#[tauri::command]
pub(crate) fn get_input_fields() -> Vec<InputFieldInfo> {
	InputField::iter().map(InputFieldInfo::from).collect()
}

#[tauri::command]
pub(crate) fn classify_severity(value: f64, kind: ScoreKind) -> Severity {
	classify(value, kind)
}
