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

use tauri::{AppHandle, Emitter, State};

use super::typedef::SensorReading;
use crate::session::dashboard::DashboardSession;

/// Starts pushing `sensor://tick` events and returns the reading to show
/// until the first one arrives.
#[tauri::command]
pub(crate) async fn mount_dashboard(
	app: AppHandle,
	session: State<'_, DashboardSession>,
) -> Result<SensorReading, ()> {
	let emitter = app.clone();
	session
		.mount(move |tick| {
			if let Err(err) = emitter.emit(super::event::TICK, tick) {
				log::warn!("cannot deliver sensor tick: {err}");
			}
		})
		.await;

	Ok(session.snapshot().reading)
}

#[tauri::command]
pub(crate) async fn unmount_dashboard(session: State<'_, DashboardSession>) -> Result<(), ()> {
	session.unmount().await;
	Ok(())
}
