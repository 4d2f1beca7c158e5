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

use chrono::Local;
use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc, Mutex,
};

use super::helper::ReadingSampler;
use super::task::PeriodicTask;
use super::typedef::*;
use crate::config::SimulatorConfig;

/// Live metric feed: replaces the whole reading every period while running.
pub struct MetricSimulator {
	config: SimulatorConfig,
	latest: Arc<Mutex<SensorReading>>,
	sequence: Arc<AtomicU64>,
	task: Option<PeriodicTask>,
}

impl MetricSimulator {
	pub fn new(config: SimulatorConfig) -> Self {
		let initial = config.initial;
		Self {
			config,
			latest: Arc::new(Mutex::new(initial)),
			sequence: Arc::new(AtomicU64::new(0)),
			task: None,
		}
	}

	pub fn config(&self) -> &SimulatorConfig {
		&self.config
	}

	pub fn latest(&self) -> SensorReading {
		match self.latest.lock() {
			Ok(guarded) => *guarded,
			Err(poisoned) => *poisoned.into_inner(),
		}
	}

	pub fn is_running(&self) -> bool {
		self.task.as_ref().is_some_and(|task| !task.is_finished())
	}

	/// Starts ticking. `on_tick` sees every new reading after it was stored.
	/// Calling this while already running keeps the existing timer.
	pub fn start<F>(&mut self, mut on_tick: F)
	where
		F: FnMut(SensorTick) + Send + 'static,
	{
		if self.is_running() {
			log::debug!("sensor simulator is already running");
			return;
		}

		let sampler = match ReadingSampler::new(&self.config) {
			Ok(sampler) => sampler,
			Err(err) => {
				log::error!("sensor simulator not started, unusable range: {err}");
				return;
			}
		};
		let latest = self.latest.clone();
		let sequence = self.sequence.clone();

		log::info!("sensor simulator started, period {:?}", self.config.period());
		self.task = Some(PeriodicTask::start(self.config.period(), move || {
			let reading = sampler.sample(&mut rand::rng());

			match latest.lock() {
				Ok(mut guarded) => *guarded = reading,
				Err(poisoned) => *poisoned.into_inner() = reading,
			}

			let tick = SensorTick {
				sequence: sequence.fetch_add(1, Ordering::SeqCst) + 1,
				reading,
				recorded_at: Local::now(),
			};
			log::trace!("sensor tick {}: {:?}", tick.sequence, tick.reading);
			on_tick(tick);
		}));
	}

	/// Cancels the timer. Once this resolves no more ticks are delivered.
	pub async fn stop(&mut self) {
		if let Some(task) = self.task.take() {
			task.stop().await;
			log::info!("sensor simulator stopped");
		}
	}
}
