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

use super::typedef::*;
use crate::config::InputPolicy;
use crate::error::InvalidInputError;

fn count_digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|each| each.is_ascii_digit()).count()
}

/// Reads the longest numeric prefix of `text`, the way a browser's
/// `parseFloat` does: leading whitespace is skipped, trailing garbage is
/// ignored, and `Infinity` is accepted.
pub fn parse_leading_float(text: &str) -> Option<f64> {
	let text = text.trim_start();
	let bytes = text.as_bytes();

	let mut end = match bytes.first() {
		Some(b'+' | b'-') => 1,
		_ => 0,
	};

	if text[end..].starts_with("Infinity") {
		return Some(match bytes.first() {
			Some(b'-') => f64::NEG_INFINITY,
			_ => f64::INFINITY,
		});
	}

	let int_digits = count_digits(&bytes[end..]);
	end += int_digits;

	if bytes.get(end) == Some(&b'.') {
		let frac_digits = count_digits(&bytes[end + 1..]);
		if int_digits == 0 && frac_digits == 0 {
			return None;
		}
		end += 1 + frac_digits;
	} else if int_digits == 0 {
		return None;
	}

	// An exponent only counts when at least one digit follows it
	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits = count_digits(&bytes[exp_end..]);
		if exp_digits > 0 {
			end = exp_end + exp_digits;
		}
	}

	text[..end].parse::<f64>().ok()
}

/// Lenient reading: anything unreadable, and a plain zero, is left to the
/// field's default.
fn parse_lenient(raw: &str) -> Option<f64> {
	parse_leading_float(raw).filter(|value| *value != 0.0)
}

fn parse_strict(field: InputField, raw: &str) -> Result<Option<f64>, InvalidInputError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Ok(None);
	}

	let invalid = |reason: &'static str| InvalidInputError {
		field,
		raw: raw.to_string(),
		reason,
	};

	let value = trimmed
		.parse::<f64>()
		.map_err(|_| invalid("not a number"))?;

	if !value.is_finite() {
		return Err(invalid("must be a finite number"));
	}

	match field {
		InputField::Ph if !(0.0..=14.0).contains(&value) => {
			Err(invalid("must lie between 0 and 14"))
		}
		InputField::Humidity if !(0.0..=100.0).contains(&value) => {
			Err(invalid("must lie between 0 and 100"))
		}
		InputField::Temperature => Ok(Some(value)),
		_ if value < 0.0 => Err(invalid("must not be negative")),
		_ => Ok(Some(value)),
	}
}

pub fn parse_field(
	field: InputField,
	raw: &str,
	policy: InputPolicy,
) -> Result<Option<f64>, InvalidInputError> {
	match policy {
		InputPolicy::Lenient => Ok(parse_lenient(raw)),
		InputPolicy::Strict => parse_strict(field, raw),
	}
}

/// Never fails under [`InputPolicy::Lenient`].
pub fn parse_input(raw: &RawInput, policy: InputPolicy) -> Result<InputParameters, InvalidInputError> {
	let mut params = InputParameters::default();
	for field in InputField::iter() {
		params.set(field, parse_field(field, raw.get(field), policy)?);
	}
	Ok(params)
}

/// Rounds to one decimal place the way `toFixed(1)` does: on the exact binary
/// value, with ties going away from zero. `25.65` is stored just below the
/// tie, so it becomes `25.6`.
pub fn round_one_decimal(value: f64) -> f64 {
	// Quarters are the only doubles sitting exactly on a tie
	if (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0 {
		return (value * 10.0).round() / 10.0;
	}
	// Precision formatting is exact and correctly rounded
	format!("{value:.1}").parse().unwrap_or(value)
}

fn npk_average(input: &InputParameters) -> f64 {
	(input.value(InputField::Nitrogen)
		+ input.value(InputField::Phosphorus)
		+ input.value(InputField::Potassium))
		/ 3.0
}

pub fn crop_health_index(input: &InputParameters) -> f64 {
	let humidity = input.value(InputField::Humidity);
	let ph = input.value(InputField::Ph);

	(100f64).min((npk_average(input) + humidity / 2.0 + ph * 10.0) / 2.0)
}

pub fn pest_risk_score(input: &InputParameters) -> f64 {
	let temperature = input.value(InputField::Temperature);
	let humidity = input.value(InputField::Humidity);
	let rainfall = input.value(InputField::Rainfall);

	(temperature * 2.5 + humidity * 0.5 - rainfall * 0.1).clamp(0.0, 100.0)
}

/// Only the upper bound is enforced unless `clamp_floor` is set, so
/// pathological inputs can drive this below zero.
pub fn soil_condition(input: &InputParameters, clamp_floor: bool) -> f64 {
	let ph = input.value(InputField::Ph);
	let score = (100f64).min(npk_average(input) + ph * 10.0);

	match clamp_floor {
		true => score.max(0.0),
		false => score,
	}
}

pub fn classify(value: f64, kind: ScoreKind) -> Severity {
	match kind {
		ScoreKind::Health | ScoreKind::Soil => match value {
			v if v >= 75.0 => Severity::Optimal,
			v if v >= 50.0 => Severity::Moderate,
			_ => Severity::ActionRequired,
		},
		ScoreKind::Pest => match value {
			v if v <= 30.0 => Severity::Optimal,
			v if v <= 60.0 => Severity::Moderate,
			_ => Severity::ActionRequired,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	fn lenient(raw: &RawInput) -> InputParameters {
		parse_input(raw, InputPolicy::Lenient).unwrap()
	}

	#[test]
	fn leading_float_follows_browser_rules() {
		assert_eq!(parse_leading_float("42"), Some(42.0));
		assert_eq!(parse_leading_float("  6.8"), Some(6.8));
		assert_eq!(parse_leading_float("12abc"), Some(12.0));
		assert_eq!(parse_leading_float("-3.5e2x"), Some(-350.0));
		assert_eq!(parse_leading_float("7e"), Some(7.0));
		assert_eq!(parse_leading_float(".5"), Some(0.5));
		assert_eq!(parse_leading_float("5."), Some(5.0));
		assert_eq!(parse_leading_float("Infinity"), Some(f64::INFINITY));
		assert_eq!(parse_leading_float("-Infinity"), Some(f64::NEG_INFINITY));
		assert_eq!(parse_leading_float(""), None);
		assert_eq!(parse_leading_float("abc"), None);
		assert_eq!(parse_leading_float("."), None);
		assert_eq!(parse_leading_float("-"), None);
		assert_eq!(parse_leading_float("NaN"), None);
	}

	#[test]
	fn every_field_defaults_independently() {
		for field in InputField::iter() {
			for bad in ["", "   ", "n/a", "--1"] {
				let mut raw = RawInput::default();
				for other in InputField::iter().filter(|other| *other != field) {
					raw.set(other, "1");
				}
				raw.set(field, bad);

				let params = lenient(&raw);
				assert_eq!(params.get(field), None, "{field} from {bad:?}");
				assert_eq!(params.value(field), field.default_value());
				for other in InputField::iter().filter(|other| *other != field) {
					assert_eq!(params.get(other), Some(1.0));
				}
			}
		}
	}

	#[test]
	fn documented_defaults() {
		let params = InputParameters::default();
		assert_eq!(params.value(InputField::Nitrogen), 40.0);
		assert_eq!(params.value(InputField::Phosphorus), 50.0);
		assert_eq!(params.value(InputField::Potassium), 45.0);
		assert_eq!(params.value(InputField::Temperature), 28.0);
		assert_eq!(params.value(InputField::Humidity), 65.0);
		assert_eq!(params.value(InputField::Ph), 6.8);
		assert_eq!(params.value(InputField::Rainfall), 150.0);
	}

	#[test]
	fn zero_is_treated_as_missing_when_lenient() {
		let mut raw = RawInput::default();
		raw.set(InputField::Rainfall, "0");
		raw.set(InputField::Humidity, "-0.0");
		let params = lenient(&raw);
		assert_eq!(params.value(InputField::Rainfall), 150.0);
		assert_eq!(params.value(InputField::Humidity), 65.0);
	}

	#[test]
	fn default_scenario_scores() {
		let params = InputParameters::default();
		assert_relative_eq!(crop_health_index(&params), 72.75, epsilon = 1e-9);
		assert_eq!(round_one_decimal(crop_health_index(&params)), 72.8);
		assert_eq!(round_one_decimal(pest_risk_score(&params)), 87.5);
		assert_eq!(round_one_decimal(soil_condition(&params, false)), 100.0);
	}

	#[test]
	fn heavy_rain_floors_pest_risk() {
		let params = InputParameters {
			rainfall: Some(10_000.0),
			..Default::default()
		};
		assert_eq!(pest_risk_score(&params), 0.0);
	}

	#[test]
	fn scores_stay_bounded_over_wide_inputs() {
		let samples = [-1e6, -500.0, -1.0, 0.5, 7.0, 55.0, 140.0, 900.0, 1e6];
		for n in samples {
			for humidity in samples {
				for temperature in samples {
					let params = InputParameters {
						nitrogen: Some(n),
						phosphorus: Some(n / 2.0),
						potassium: Some(n * 3.0),
						temperature: Some(temperature),
						humidity: Some(humidity),
						ph: Some(humidity / 10.0),
						rainfall: Some(n),
					};
					assert!(crop_health_index(&params) <= 100.0);
					assert!(soil_condition(&params, false) <= 100.0);
					let pest = pest_risk_score(&params);
					assert!((0.0..=100.0).contains(&pest));
					let soil = soil_condition(&params, true);
					assert!((0.0..=100.0).contains(&soil));
				}
			}
		}
	}

	#[test]
	fn soil_condition_can_go_negative_without_floor() {
		let params = InputParameters {
			nitrogen: Some(-300.0),
			..Default::default()
		};
		// (-300 + 50 + 45) / 3 + 68 = -0.333...
		assert!(soil_condition(&params, false) < 0.0);
		assert_eq!(soil_condition(&params, true), 0.0);
	}

	#[test]
	fn rounding_is_half_away_from_zero() {
		assert_eq!(round_one_decimal(72.75), 72.8);
		assert_eq!(round_one_decimal(-2.25), -2.3);
		assert_eq!(round_one_decimal(33.333), 33.3);
		assert_eq!(round_one_decimal(2.25), 2.3);
		assert_eq!(round_one_decimal(0.75), 0.8);
		assert_eq!(round_one_decimal(-0.25), -0.3);
		assert_eq!(round_one_decimal(100.0), 100.0);
	}

	#[test]
	fn rounding_uses_the_stored_value_not_the_literal() {
		assert_eq!(round_one_decimal(25.65), 25.6);
		assert_eq!(round_one_decimal(0.15), 0.1);
		assert_eq!(round_one_decimal(-25.65), -25.6);
		assert_eq!(round_one_decimal(0.35), 0.3);

		let mut raw = RawInput::default();
		raw.set(InputField::Temperature, "10.1");
		raw.set(InputField::Humidity, "1");
		raw.set(InputField::Rainfall, "1");
		let pest = pest_risk_score(&lenient(&raw));
		assert_eq!(round_one_decimal(pest), 25.6);
	}

	#[test]
	fn classification_thresholds() {
		assert_eq!(classify(75.0, ScoreKind::Health), Severity::Optimal);
		assert_eq!(classify(74.9, ScoreKind::Health), Severity::Moderate);
		assert_eq!(classify(50.0, ScoreKind::Soil), Severity::Moderate);
		assert_eq!(classify(49.9, ScoreKind::Soil), Severity::ActionRequired);
		assert_eq!(classify(-10.0, ScoreKind::Soil), Severity::ActionRequired);

		assert_eq!(classify(30.0, ScoreKind::Pest), Severity::Optimal);
		assert_eq!(classify(30.1, ScoreKind::Pest), Severity::Moderate);
		assert_eq!(classify(60.0, ScoreKind::Pest), Severity::Moderate);
		assert_eq!(classify(87.5, ScoreKind::Pest), Severity::ActionRequired);
	}

	#[test]
	fn classification_is_repeatable() {
		for kind in ScoreKind::iter() {
			for value in [0.0, 29.9, 50.0, 60.0, 74.99, 75.0, 100.0] {
				assert_eq!(classify(value, kind), classify(value, kind));
			}
		}
	}

	#[test]
	fn strict_policy_reports_offending_field() {
		let mut raw = RawInput::default();
		raw.set(InputField::Nitrogen, "40");
		raw.set(InputField::Rainfall, "-5");
		let err = parse_input(&raw, InputPolicy::Strict).unwrap_err();
		assert_eq!(err.field, InputField::Rainfall);
		assert_eq!(err.raw, "-5");

		raw.set(InputField::Rainfall, "12abc");
		let err = parse_input(&raw, InputPolicy::Strict).unwrap_err();
		assert_eq!(err.field, InputField::Rainfall);
		assert_eq!(err.reason, "not a number");

		raw.set(InputField::Rainfall, "");
		raw.set(InputField::Ph, "15");
		assert_eq!(
			parse_input(&raw, InputPolicy::Strict).unwrap_err().field,
			InputField::Ph
		);

		raw.set(InputField::Ph, "inf");
		assert_eq!(
			parse_input(&raw, InputPolicy::Strict).unwrap_err().reason,
			"must be a finite number"
		);
	}

	#[test]
	fn strict_policy_keeps_real_zero_and_defaults_empty() {
		let mut raw = RawInput::default();
		raw.set(InputField::Rainfall, "0");
		raw.set(InputField::Temperature, "-4");
		let params = parse_input(&raw, InputPolicy::Strict).unwrap();
		assert_eq!(params.get(InputField::Rainfall), Some(0.0));
		assert_eq!(params.get(InputField::Temperature), Some(-4.0));
		assert_eq!(params.value(InputField::Nitrogen), 40.0);
	}
}
