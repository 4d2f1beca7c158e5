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

use std::borrow::Cow;
use tauri::{AppHandle, Emitter, State};

use super::dashboard::DashboardSession;
use super::typedef::DashboardSnapshot;
use crate::error::PredictionError;
use crate::predict::typedef::{InputField, PredictionResult};
use crate::typedef::ErrorInfo;

#[tauri::command]
pub(crate) fn set_input(session: State<'_, DashboardSession>, field: InputField, value: String) {
	session.set_input(field, value);
}

#[tauri::command]
pub(crate) fn get_dashboard(session: State<'_, DashboardSession>) -> DashboardSnapshot {
	session.snapshot()
}

#[tauri::command]
pub(crate) fn reset_dashboard(session: State<'_, DashboardSession>) -> DashboardSnapshot {
	session.reset();
	session.snapshot()
}

/// Resolves to `None` when the request was ignored, either because another
/// prediction is still processing or because the view closed meanwhile.
#[tauri::command]
pub(crate) async fn run_prediction(
	app: AppHandle,
	session: State<'_, DashboardSession>,
) -> Result<Option<PredictionResult>, ()> {
	let announce = || {
		if let Err(err) = app.emit(super::event::PREDICTION_STARTED, ()) {
			log::warn!("cannot announce prediction start: {err}");
		}
	};

	match session.run_prediction_with(announce).await {
		Ok(Some(result)) => {
			if let Err(err) = app.emit(super::event::PREDICTION_FINISHED, result.clone()) {
				log::warn!("cannot announce prediction result: {err}");
			}
			Ok(Some(result))
		}
		Ok(None) => Ok(None),
		Err(PredictionError::InFlight) => {
			log::debug!("prediction requested while one is processing, ignored");
			Ok(None)
		}
		Err(err @ PredictionError::InvalidInput(_)) => {
			log::warn!("prediction refused: {err}");
			if let Err(emit_err) = app.emit::<ErrorInfo>(
				crate::event::DIALOG_ERROR,
				ErrorInfo {
					title: Cow::Borrowed("Invalid Input"),
					message: err.to_string(),
				},
			) {
				log::error!("cannot show input error dialog: {emit_err}");
			}
			Err(())
		}
	}
}
