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
use std::sync::atomic::{AtomicBool, Ordering};

use super::helper::*;
use super::strategy::{PredictionStrategy, UniformCropStrategy};
use super::typedef::*;
use crate::config::PredictionConfig;
use crate::error::PredictionError;

/// Clears the in-flight flag however the prediction ends, including when the
/// awaiting future is dropped halfway.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
	fn acquire(flag: &'a AtomicBool) -> Option<Self> {
		flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.ok()
			.map(|_| Self(flag))
	}
}

impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

pub struct PredictionEngine {
	config: PredictionConfig,
	strategy: Box<dyn PredictionStrategy>,
	in_flight: AtomicBool,
}

impl PredictionEngine {
	pub fn new(config: PredictionConfig) -> Self {
		Self::with_strategy(config, Box::new(UniformCropStrategy::new()))
	}

	pub fn with_strategy(config: PredictionConfig, strategy: Box<dyn PredictionStrategy>) -> Self {
		Self {
			config,
			strategy,
			in_flight: AtomicBool::new(false),
		}
	}

	pub fn config(&self) -> &PredictionConfig {
		&self.config
	}

	pub fn is_processing(&self) -> bool {
		self.in_flight.load(Ordering::Acquire)
	}

	/// Scores already-parsed inputs right away, without the processing delay.
	pub fn evaluate(&self, input: &InputParameters) -> PredictionResult {
		PredictionResult {
			crop_health_index: round_one_decimal(crop_health_index(input)),
			pest_risk_score: round_one_decimal(pest_risk_score(input)),
			soil_condition: round_one_decimal(soil_condition(input, self.config.clamp_soil_floor)),
			recommended_crop: self.strategy.recommend_crop(input),
			computed_at: Local::now(),
		}
	}

	/// Parses the form, waits out the simulated processing time, then scores.
	///
	/// Only one prediction runs at a time; a call made while another is
	/// pending returns [`PredictionError::InFlight`] immediately.
	pub async fn compute_prediction(&self, raw: &RawInput) -> Result<PredictionResult, PredictionError> {
		self.compute_prediction_with(raw, || {}).await
	}

	/// Same as [`PredictionEngine::compute_prediction`]; `on_accepted` runs
	/// once the request holds the processing slot and its input parsed, right
	/// before the delay starts. Refused requests never call it.
	pub async fn compute_prediction_with<F>(
		&self,
		raw: &RawInput,
		on_accepted: F,
	) -> Result<PredictionResult, PredictionError>
	where
		F: FnOnce(),
	{
		let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(PredictionError::InFlight)?;

		// Rejected input should not make the user sit through the delay
		let input = parse_input(raw, self.config.input_policy)?;

		log::debug!("processing prediction for {:?}", input);
		on_accepted();
		tokio::time::sleep(self.config.latency()).await;

		let result = self.evaluate(&input);
		log::info!(
			"prediction ready: health {}, pest {}, soil {}, crop {}",
			result.crop_health_index,
			result.pest_risk_score,
			result.soil_condition,
			result.recommended_crop
		);
		Ok(result)
	}
}
