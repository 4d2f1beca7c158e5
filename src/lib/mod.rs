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

//! Crop prediction dashboard backend.
//!
//! The core (prediction engine, sensor simulator and the session tying them
//! to a view) builds without any GUI. The Tauri shell lives behind the
//! `desktop` feature.

pub mod config;
pub mod error;
pub mod predict;
pub mod sensor;
pub mod session;

#[cfg(feature = "desktop")]
mod event;
#[cfg(feature = "desktop")]
mod typedef;

pub use config::{DashboardConfig, InputPolicy, PredictionConfig, SimulatorConfig};
pub use error::{ConfigError, InvalidInputError, PredictionError};
pub use predict::engine::PredictionEngine;
pub use predict::strategy::{PredictionStrategy, UniformCropStrategy};
pub use predict::typedef::{
	Crop, InputField, InputParameters, PredictionResult, RawInput, ScoreKind, Severity,
};
pub use sensor::simulator::MetricSimulator;
pub use sensor::task::PeriodicTask;
pub use sensor::typedef::{SensorReading, SensorTick};
pub use session::dashboard::DashboardSession;

#[cfg(feature = "desktop")]
use predict::command::*;
#[cfg(feature = "desktop")]
use sensor::command::*;
#[cfg(feature = "desktop")]
use session::command::*;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
	use tauri::{Manager, WindowEvent};

	tauri::Builder::default()
		.plugin(tauri_plugin_opener::init())
		.invoke_handler(tauri::generate_handler![
			get_input_fields,
			classify_severity,
			set_input,
			get_dashboard,
			reset_dashboard,
			run_prediction,
			mount_dashboard,
			unmount_dashboard
		])
		.setup(|app| {
			let config_path = app.path().app_config_dir()?.join(config::CONFIG_FILE_NAME);
			let config = DashboardConfig::load_or_default(&config_path)?;
			log::info!("dashboard config: {:?}", config);
			app.manage(DashboardSession::new(config));
			Ok(())
		})
		.on_window_event(|window, event| {
			// The page may never get to call unmount_dashboard itself
			if let WindowEvent::Destroyed = event {
				let app = window.app_handle().clone();
				tauri::async_runtime::spawn(async move {
					app.state::<DashboardSession>().unmount().await;
				});
			}
		})
		.run(tauri::generate_context!())
		.expect("error while running tauri application");
}
