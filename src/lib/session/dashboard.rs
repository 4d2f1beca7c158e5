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

use std::sync::{Arc, Mutex, MutexGuard};

use super::typedef::*;
use crate::config::DashboardConfig;
use crate::error::PredictionError;
use crate::predict::{
	engine::PredictionEngine,
	helper::classify,
	strategy::{PredictionStrategy, UniformCropStrategy},
	typedef::{InputField, PredictionResult, RawInput, ScoreKind, Severity},
};
use crate::sensor::{simulator::MetricSimulator, typedef::SensorTick};

fn lock(state: &Mutex<DashboardState>) -> MutexGuard<'_, DashboardState> {
	match state.lock() {
		Ok(ok) => ok,
		Err(poisoned) => poisoned.into_inner(),
	}
}

/// Owns everything one dashboard view shows: the form, the last prediction,
/// and the live sensor feed.
pub struct DashboardSession {
	engine: PredictionEngine,
	simulator: tokio::sync::Mutex<MetricSimulator>,
	state: Arc<Mutex<DashboardState>>,
}

impl DashboardSession {
	pub fn new(config: DashboardConfig) -> Self {
		Self::with_strategy(config, Box::new(UniformCropStrategy::new()))
	}

	pub fn with_strategy(config: DashboardConfig, strategy: Box<dyn PredictionStrategy>) -> Self {
		let state = DashboardState {
			reading: config.simulator.initial,
			..Default::default()
		};

		Self {
			engine: PredictionEngine::with_strategy(config.prediction, strategy),
			simulator: tokio::sync::Mutex::new(MetricSimulator::new(config.simulator)),
			state: Arc::new(Mutex::new(state)),
		}
	}

	pub fn set_input(&self, field: InputField, value: impl Into<String>) {
		lock(&self.state).input.set(field, value);
	}

	pub fn input(&self) -> RawInput {
		lock(&self.state).input.clone()
	}

	/// Empties the form and forgets the last prediction.
	pub fn reset(&self) {
		let mut state = lock(&self.state);
		state.input = RawInput::default();
		state.prediction = None;
		state.show_results = false;
	}

	pub fn prediction(&self) -> Option<PredictionResult> {
		lock(&self.state).prediction.clone()
	}

	pub fn is_processing(&self) -> bool {
		self.engine.is_processing()
	}

	pub fn classify(&self, value: f64, kind: ScoreKind) -> Severity {
		classify(value, kind)
	}

	pub fn snapshot(&self) -> DashboardSnapshot {
		let state = lock(&self.state);
		DashboardSnapshot {
			input: state.input.clone(),
			prediction: state.prediction.clone(),
			is_processing: self.engine.is_processing(),
			show_results: state.show_results,
			reading: state.reading,
			is_live: state.mounted,
		}
	}

	/// Runs the engine on the current form.
	///
	/// Returns `Ok(None)` when the view was unmounted while the prediction was
	/// pending; the result is dropped instead of written into a dead view.
	pub async fn run_prediction(&self) -> Result<Option<PredictionResult>, PredictionError> {
		self.run_prediction_with(|| {}).await
	}

	/// Like [`DashboardSession::run_prediction`]; `on_started` runs only when
	/// the engine takes the request, never for one refused as in flight.
	pub async fn run_prediction_with<F>(&self, on_started: F) -> Result<Option<PredictionResult>, PredictionError>
	where
		F: FnOnce(),
	{
		if self.engine.is_processing() {
			return Err(PredictionError::InFlight);
		}

		let (raw, generation) = {
			let state = lock(&self.state);
			(state.input.clone(), state.generation)
		};

		let result = self
			.engine
			.compute_prediction_with(&raw, || {
				lock(&self.state).show_results = false;
				on_started();
			})
			.await?;

		let mut state = lock(&self.state);
		if state.generation != generation {
			log::warn!("dashboard closed while predicting, result discarded");
			return Ok(None);
		}

		state.prediction = Some(result.clone());
		state.show_results = true;
		Ok(Some(result))
	}

	/// Starts the sensor feed. Every tick is stored before `on_tick` sees it.
	pub async fn mount<F>(&self, mut on_tick: F)
	where
		F: FnMut(SensorTick) + Send + 'static,
	{
		let state = self.state.clone();
		let mut simulator = self.simulator.lock().await;

		simulator.start(move |tick| {
			lock(&state).reading = tick.reading;
			on_tick(tick);
		});
		lock(&self.state).mounted = true;
	}

	/// Stops the sensor feed; no tick is delivered once this returns.
	pub async fn unmount(&self) {
		self.simulator.lock().await.stop().await;

		let mut state = lock(&self.state);
		state.mounted = false;
		state.generation += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::predict::typedef::{Crop, InputParameters};
	use std::time::Duration;
	use tokio::time;

	struct AlwaysRice;

	impl PredictionStrategy for AlwaysRice {
		fn recommend_crop(&self, _input: &InputParameters) -> Crop {
			Crop::Rice
		}
	}

	fn session() -> Arc<DashboardSession> {
		Arc::new(DashboardSession::with_strategy(
			DashboardConfig::default(),
			Box::new(AlwaysRice),
		))
	}

	#[tokio::test(start_paused = true)]
	async fn prediction_uses_current_form() {
		let session = session();
		session.set_input(InputField::Rainfall, "10000");

		let result = session.run_prediction().await.unwrap().unwrap();

		assert_eq!(result.pest_risk_score, 0.0);
		assert_eq!(result.recommended_crop, Crop::Rice);
		let snapshot = session.snapshot();
		assert!(snapshot.show_results);
		assert!(!snapshot.is_processing);
		assert_eq!(snapshot.prediction, Some(result));
	}

	#[tokio::test(start_paused = true)]
	async fn results_hidden_while_processing() {
		let session = session();
		session.run_prediction().await.unwrap();
		assert!(session.snapshot().show_results);

		let cloned_session = session.clone();
		let pending = tokio::spawn(async move { cloned_session.run_prediction().await });
		time::sleep(Duration::from_millis(10)).await;

		let snapshot = session.snapshot();
		assert!(snapshot.is_processing);
		assert!(!snapshot.show_results);
		assert_eq!(session.run_prediction().await, Err(PredictionError::InFlight));

		assert!(pending.await.unwrap().unwrap().is_some());
		assert!(session.snapshot().show_results);
	}

	#[tokio::test(start_paused = true)]
	async fn refused_request_is_not_announced_and_keeps_results() {
		let session = session();
		let started = Arc::new(Mutex::new(0));

		let cloned_session = session.clone();
		let cloned_started = started.clone();
		let pending = tokio::spawn(async move {
			cloned_session
				.run_prediction_with(move || *cloned_started.lock().unwrap() += 1)
				.await
		});
		time::sleep(Duration::from_millis(10)).await;
		assert_eq!(*started.lock().unwrap(), 1);

		let cloned_started = started.clone();
		let refused = session
			.run_prediction_with(move || *cloned_started.lock().unwrap() += 1)
			.await;
		assert_eq!(refused, Err(PredictionError::InFlight));
		assert_eq!(*started.lock().unwrap(), 1);

		assert!(pending.await.unwrap().unwrap().is_some());
		assert!(session.snapshot().show_results);
	}

	#[tokio::test(start_paused = true)]
	async fn late_prediction_is_discarded_after_unmount() {
		let session = session();
		session.mount(|_| {}).await;

		let cloned_session = session.clone();
		let pending = tokio::spawn(async move { cloned_session.run_prediction().await });
		time::sleep(Duration::from_millis(500)).await;
		session.unmount().await;

		assert_eq!(pending.await.unwrap(), Ok(None));
		assert_eq!(session.prediction(), None);
		assert!(!session.snapshot().is_processing);
	}

	#[tokio::test(start_paused = true)]
	async fn mounted_session_tracks_latest_reading() {
		let session = session();
		let initial = session.snapshot().reading;

		session.mount(|_| {}).await;
		assert!(session.snapshot().is_live);

		time::sleep(Duration::from_millis(3010)).await;
		let ticked = session.snapshot().reading;
		assert_ne!(ticked, initial);

		session.unmount().await;
		assert!(!session.snapshot().is_live);
		time::sleep(Duration::from_secs(10)).await;
		assert_eq!(session.snapshot().reading, ticked);
	}

	#[tokio::test(start_paused = true)]
	async fn reset_clears_form_and_results() {
		let session = session();
		session.set_input(InputField::Ph, "7.1");
		session.set_input(InputField::Nitrogen, "55");
		assert_eq!(session.input().ph, "7.1");
		assert_eq!(session.input().nitrogen, "55");
		session.run_prediction().await.unwrap();

		session.reset();
		let snapshot = session.snapshot();
		assert_eq!(snapshot.input, RawInput::default());
		assert_eq!(snapshot.prediction, None);
		assert!(!snapshot.show_results);
	}
}
