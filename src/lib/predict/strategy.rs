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

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};
use std::sync::Mutex;
use strum::IntoEnumIterator;

use super::typedef::{Crop, InputParameters};

/// Picks the crop to recommend. A trained model can stand in here later
/// without touching the engine around it.
pub trait PredictionStrategy: Send + Sync {
	fn recommend_crop(&self, input: &InputParameters) -> Crop;
}

/// Placeholder recommender: a uniform draw that ignores the inputs entirely.
pub struct UniformCropStrategy {
	crops: Vec<Crop>,
	rng: Mutex<StdRng>,
}

impl UniformCropStrategy {
	pub fn new() -> Self {
		Self::with_rng(StdRng::from_os_rng())
	}

	pub fn seeded(seed: u64) -> Self {
		Self::with_rng(StdRng::seed_from_u64(seed))
	}

	fn with_rng(rng: StdRng) -> Self {
		Self {
			crops: Crop::iter().collect(),
			rng: Mutex::new(rng),
		}
	}
}

impl Default for UniformCropStrategy {
	fn default() -> Self {
		Self::new()
	}
}

impl PredictionStrategy for UniformCropStrategy {
	fn recommend_crop(&self, _input: &InputParameters) -> Crop {
		let mut rng = match self.rng.lock() {
			Ok(ok) => ok,
			Err(poisoned) => poisoned.into_inner(),
		};

		// The list is built from every variant, so it is never empty
		*self.crops.choose(&mut *rng).unwrap_or(&Crop::Rice)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn uniform_pick_is_roughly_even() {
		const DRAWS: usize = 7000;

		let strategy = UniformCropStrategy::seeded(42);
		let input = InputParameters::default();
		let mut counts = HashMap::<Crop, usize>::new();
		for _ in 0..DRAWS {
			*counts.entry(strategy.recommend_crop(&input)).or_default() += 1;
		}

		let expected = DRAWS as f64 / 7.0;
		assert_eq!(counts.len(), 7);
		for crop in Crop::iter() {
			let seen = counts.get(&crop).copied().unwrap_or_default() as f64;
			assert!(
				(seen - expected).abs() <= expected * 0.15,
				"{crop} drawn {seen} times, expected about {expected}"
			);
		}
	}

	#[test]
	fn same_seed_same_sequence() {
		let first = UniformCropStrategy::seeded(9);
		let second = UniformCropStrategy::seeded(9);
		let input = InputParameters::default();

		for _ in 0..50 {
			assert_eq!(first.recommend_crop(&input), second.recommend_crop(&input));
		}
	}
}
