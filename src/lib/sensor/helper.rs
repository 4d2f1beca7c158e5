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

use rand::{
	distr::{uniform, Distribution, Uniform},
	Rng,
};

use super::typedef::*;
use crate::config::SimulatorConfig;

/// Per-metric distributions, built once when the feed starts.
#[derive(Clone, Debug)]
pub struct ReadingSampler {
	temperature: Uniform<f64>,
	humidity: Uniform<f64>,
	ph: Uniform<f64>,
	nitrogen: Uniform<f64>,
}

impl ReadingSampler {
	pub fn new(config: &SimulatorConfig) -> Result<Self, uniform::Error> {
		Ok(Self {
			temperature: config.temperature.distribution()?,
			humidity: config.humidity.distribution()?,
			ph: config.ph.distribution()?,
			nitrogen: config.nitrogen.distribution()?,
		})
	}

	/// Draws a whole new reading. Every metric is independent of the others
	/// and of whatever was shown before.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> SensorReading {
		SensorReading {
			temperature: self.temperature.sample(rng),
			humidity: self.humidity.sample(rng),
			ph: self.ph.sample(rng),
			nitrogen: self.nitrogen.sample(rng),
		}
	}
}

pub fn range_of(config: &SimulatorConfig, metric: SensorMetric) -> ReadingRange {
	match metric {
		SensorMetric::Temperature => config.temperature,
		SensorMetric::Humidity => config.humidity,
		SensorMetric::Ph => config.ph,
		SensorMetric::Nitrogen => config.nitrogen,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};
	use strum::IntoEnumIterator;

	#[test]
	fn generated_readings_stay_in_range() {
		let config = SimulatorConfig::default();
		let sampler = ReadingSampler::new(&config).unwrap();
		let mut rng = StdRng::seed_from_u64(7);

		for _ in 0..10_000 {
			let reading = sampler.sample(&mut rng);
			for metric in SensorMetric::iter() {
				let range = range_of(&config, metric);
				assert!(
					range.contains(reading.get(metric)),
					"{metric:?} = {} outside [{}, {})",
					reading.get(metric),
					range.min,
					range.max
				);
			}
		}
	}

	#[test]
	fn consecutive_readings_are_redrawn() {
		let sampler = ReadingSampler::new(&SimulatorConfig::default()).unwrap();
		let mut rng = StdRng::seed_from_u64(11);

		let first = sampler.sample(&mut rng);
		let second = sampler.sample(&mut rng);
		assert_ne!(first, second);
	}

	#[test]
	fn custom_ranges_are_honoured() {
		let config = SimulatorConfig {
			temperature: ReadingRange::new(-5.0, -4.0),
			..Default::default()
		};
		let sampler = ReadingSampler::new(&config).unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		for _ in 0..100 {
			let reading = sampler.sample(&mut rng);
			assert!(reading.temperature >= -5.0 && reading.temperature < -4.0);
		}
	}

	#[test]
	fn empty_range_cannot_build_a_sampler() {
		let config = SimulatorConfig {
			humidity: ReadingRange::new(60.0, 60.0),
			..Default::default()
		};
		assert!(ReadingSampler::new(&config).is_err());
	}
}
