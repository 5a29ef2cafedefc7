use serde::{Deserialize, Serialize};

use super::input::StressInput;

/// Map `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
///
/// The position is clamped to the source range, so values outside it hold at
/// the nearest endpoint. Descending source ranges (`from_lo > from_hi`) work.
pub fn lerp(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> f64 {
    let t = ((value - from_lo) / (from_hi - from_lo)).clamp(0.0, 1.0);
    to_lo + t * (to_hi - to_lo)
}

/// Piecewise-linear interpolation through `(x, y)` anchors sorted by `x`.
///
/// Values before the first anchor take its `y`; values at or beyond the last
/// anchor take the last `y`.
pub fn piecewise(value: f64, anchors: &[(f64, f64)]) -> f64 {
    let Some(&(first_x, first_y)) = anchors.first() else {
        return 0.0;
    };
    if value <= first_x {
        return first_y;
    }
    for pair in anchors.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if value < x1 {
            return lerp(value, x0, x1, y0, y1);
        }
    }
    anchors[anchors.len() - 1].1
}

/// One of the six additive terms of the stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Temperature,
    TimeOfDay,
    DayOfWeek,
    Wind,
    Solar,
    EvCharging,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Temperature,
        Factor::TimeOfDay,
        Factor::DayOfWeek,
        Factor::Wind,
        Factor::Solar,
        Factor::EvCharging,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Factor::Temperature => "Temperature",
            Factor::TimeOfDay => "Time of day",
            Factor::DayOfWeek => "Day of week",
            Factor::Wind => "Wind",
            Factor::Solar => "Solar depletion",
            Factor::EvCharging => "EV charging",
        }
    }

    /// Inclusive bounds of the unweighted sub-score.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Factor::Temperature => (0.0, 35.0),
            Factor::TimeOfDay => (0.0, 30.0),
            Factor::DayOfWeek => (2.0, 8.0),
            Factor::Wind => (-10.0, 0.0),
            Factor::Solar => (0.0, 12.0),
            Factor::EvCharging => (0.0, 15.0),
        }
    }

    /// Evaluate this factor's sub-score for `input`.
    pub fn evaluate(self, input: &StressInput) -> f64 {
        match self {
            Factor::Temperature => temperature_score(input.temperature, input.humidity),
            Factor::TimeOfDay => time_of_day_score(input.hour),
            Factor::DayOfWeek => day_of_week_score(input.day_of_week),
            Factor::Wind => wind_score(input.wind_speed),
            Factor::Solar => solar_score(input.hour, input.cloud_cover),
            Factor::EvCharging => ev_charging_score(input),
        }
    }
}

/// Heating and cooling load. Cold side peaks below 10°F, comfort zone sits
/// between 40 and 75°F, heat side climbs through 75/85/95/105°F breakpoints.
pub fn temperature_score(temperature: f64, humidity: f64) -> f64 {
    let t = temperature;
    let score = if t < 40.0 {
        if t <= 10.0 {
            30.0 + lerp(t, 10.0, -10.0, 0.0, 5.0)
        } else {
            lerp(t, 10.0, 40.0, 30.0, 8.0)
        }
    } else if t < 75.0 {
        lerp(t, 40.0, 75.0, 5.0, 1.0)
    } else {
        let heat = if t < 85.0 {
            lerp(t, 75.0, 85.0, 1.0, 12.0)
        } else if t < 95.0 {
            lerp(t, 85.0, 95.0, 12.0, 22.0)
        } else if t < 105.0 {
            lerp(t, 95.0, 105.0, 22.0, 30.0)
        } else {
            // Keeps climbing past the last breakpoint; the cap below holds it.
            30.0 + (t - 105.0) * 0.2
        };
        // Humidity only clamps its own amplifier range.
        let amplifier = if t > 80.0 {
            lerp(humidity, 30.0, 90.0, 0.0, 5.0)
        } else {
            0.0
        };
        heat + amplifier
    };
    score.clamp(0.0, 35.0)
}

/// Hour anchors of the daily demand shape. 17:00 is the evening duck-curve peak.
const TIME_OF_DAY_ANCHORS: [(f64, f64); 10] = [
    (0.0, 3.0),
    (4.0, 2.0),
    (6.0, 8.0),
    (9.0, 14.0),
    (12.0, 16.0),
    (15.0, 20.0),
    (17.0, 30.0),
    (19.0, 22.0),
    (21.0, 12.0),
    (23.0, 5.0),
];

pub fn time_of_day_score(hour: u32) -> f64 {
    piecewise(hour as f64, &TIME_OF_DAY_ANCHORS).clamp(0.0, 30.0)
}

pub fn day_of_week_score(day_of_week: u32) -> f64 {
    match day_of_week {
        0 => 2.0,
        6 => 4.0,
        _ => 8.0,
    }
}

/// Wind generation relief. Never positive.
pub fn wind_score(wind_speed: f64) -> f64 {
    let score = if wind_speed < 5.0 {
        0.0
    } else if wind_speed < 15.0 {
        lerp(wind_speed, 5.0, 15.0, 0.0, -5.0)
    } else if wind_speed <= 25.0 {
        lerp(wind_speed, 15.0, 25.0, -5.0, -8.0)
    } else {
        -10.0
    };
    score.clamp(-10.0, 0.0)
}

/// Solar output lost to cloud cover, weighted by how much sun the hour
/// normally contributes. Zero outside the 08:00-18:00 window.
pub fn solar_score(hour: u32, cloud_cover: f64) -> f64 {
    if !(8..18).contains(&hour) {
        return 0.0;
    }
    let depletion = lerp(cloud_cover, 0.0, 100.0, 0.0, 12.0);
    let distance_from_noon = (hour as f64 - 13.0).abs();
    let potential = lerp(distance_from_noon, 0.0, 5.0, 1.0, 0.2);
    (depletion * potential).clamp(0.0, 12.0)
}

/// Charging pressure before multipliers: an evening arrival window and a
/// smaller morning preconditioning pulse.
pub fn ev_base_pressure(hour: u32) -> f64 {
    let h = hour as f64;
    if (17..20).contains(&hour) {
        lerp(h, 17.0, 20.0, 8.0, 2.0)
    } else if (7..9).contains(&hour) {
        lerp(h, 7.0, 9.0, 3.0, 1.0)
    } else {
        0.0
    }
}

/// Range anxiety: drivers top up more when it is cold.
pub fn cold_charging_multiplier(temperature: f64) -> f64 {
    if temperature >= 40.0 {
        1.0
    } else {
        1.0 + lerp(temperature, -10.0, 40.0, 0.6, 0.0)
    }
}

pub fn monday_multiplier(day_of_week: u32) -> f64 {
    if day_of_week == 1 {
        1.15
    } else {
        1.0
    }
}

pub fn ev_charging_score(input: &StressInput) -> f64 {
    let score = ev_base_pressure(input.hour)
        * input.ev_adoption.multiplier()
        * cold_charging_multiplier(input.temperature)
        * monday_multiplier(input.day_of_week);
    score.clamp(0.0, 15.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::EvAdoption;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_lerp_inside_range() {
        assert!(approx(lerp(5.0, 0.0, 10.0, 0.0, 100.0), 50.0));
        assert!(approx(lerp(2.5, 0.0, 10.0, 10.0, 0.0), 7.5));
    }

    #[test]
    fn test_lerp_holds_flat_outside_range() {
        assert!(approx(lerp(-5.0, 0.0, 10.0, 0.0, 100.0), 0.0));
        assert!(approx(lerp(50.0, 0.0, 10.0, 0.0, 100.0), 100.0));
    }

    #[test]
    fn test_lerp_descending_source() {
        // 30 + lerp(t, 10, -10, 0, 5) shape used by the cold side
        assert!(approx(lerp(0.0, 10.0, -10.0, 0.0, 5.0), 2.5));
        assert!(approx(lerp(-40.0, 10.0, -10.0, 0.0, 5.0), 5.0));
    }

    #[test]
    fn test_piecewise_anchor_values() {
        for &(hour, expected) in TIME_OF_DAY_ANCHORS.iter() {
            assert!(approx(piecewise(hour, &TIME_OF_DAY_ANCHORS), expected));
        }
    }

    #[test]
    fn test_piecewise_between_anchors() {
        // 6 -> 8, 9 -> 14
        assert!(approx(time_of_day_score(7), 10.0));
        // 17 -> 30, 19 -> 22
        assert!(approx(time_of_day_score(18), 26.0));
    }

    #[test]
    fn test_piecewise_beyond_last_anchor() {
        assert!(approx(time_of_day_score(23), 5.0));
        assert!(approx(time_of_day_score(30), 5.0));
    }

    #[test]
    fn test_piecewise_empty() {
        assert_eq!(piecewise(3.0, &[]), 0.0);
    }

    #[test]
    fn test_temperature_cold_side() {
        assert!(approx(temperature_score(10.0, 50.0), 30.0));
        assert!(approx(temperature_score(-10.0, 50.0), 35.0));
        assert!(approx(temperature_score(-30.0, 50.0), 35.0));
        assert!(approx(temperature_score(25.0, 50.0), 19.0));
    }

    #[test]
    fn test_temperature_comfort_zone() {
        assert!(approx(temperature_score(40.0, 50.0), 5.0));
        assert!(approx(temperature_score(74.999, 50.0), 1.0 + 4.0 * 0.001 / 35.0));
        assert!(approx(temperature_score(75.0, 50.0), 1.0));
    }

    #[test]
    fn test_temperature_heat_segments() {
        assert!(approx(temperature_score(85.0, 30.0), 12.0));
        assert!(approx(temperature_score(95.0, 30.0), 22.0));
        assert!(approx(temperature_score(105.0, 30.0), 30.0));
        assert!(approx(temperature_score(110.0, 30.0), 31.0));
    }

    #[test]
    fn test_humidity_amplifier_only_above_80() {
        assert!(approx(temperature_score(80.0, 90.0), temperature_score(80.0, 10.0)));
        let dry = temperature_score(90.0, 30.0);
        let humid = temperature_score(90.0, 90.0);
        assert!(approx(humid - dry, 5.0));
    }

    #[test]
    fn test_temperature_capped() {
        assert!(approx(temperature_score(150.0, 100.0), 35.0));
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(day_of_week_score(0), 2.0);
        assert_eq!(day_of_week_score(6), 4.0);
        for day in 1..=5 {
            assert_eq!(day_of_week_score(day), 8.0);
        }
    }

    #[test]
    fn test_wind_bands() {
        assert_eq!(wind_score(0.0), 0.0);
        assert_eq!(wind_score(4.9), 0.0);
        assert!(approx(wind_score(10.0), -2.5));
        assert!(approx(wind_score(15.0), -5.0));
        assert!(approx(wind_score(25.0), -8.0));
        assert_eq!(wind_score(26.0), -10.0);
    }

    #[test]
    fn test_solar_window() {
        assert_eq!(solar_score(7, 100.0), 0.0);
        assert_eq!(solar_score(18, 100.0), 0.0);
        assert!(approx(solar_score(13, 100.0), 12.0));
        assert!(approx(solar_score(8, 100.0), 12.0 * 0.2));
        assert!(approx(solar_score(13, 50.0), 6.0));
    }

    #[test]
    fn test_ev_base_windows() {
        assert!(approx(ev_base_pressure(17), 8.0));
        assert!(approx(ev_base_pressure(18), 6.0));
        assert!(approx(ev_base_pressure(19), 4.0));
        assert_eq!(ev_base_pressure(20), 0.0);
        assert!(approx(ev_base_pressure(7), 3.0));
        assert!(approx(ev_base_pressure(8), 2.0));
        assert_eq!(ev_base_pressure(9), 0.0);
        assert_eq!(ev_base_pressure(12), 0.0);
    }

    #[test]
    fn test_cold_multiplier() {
        assert_eq!(cold_charging_multiplier(40.0), 1.0);
        assert!(approx(cold_charging_multiplier(-10.0), 1.6));
        assert!(approx(cold_charging_multiplier(15.0), 1.3));
    }

    #[test]
    fn test_ev_charging_capped() {
        let input = StressInput {
            temperature: -10.0,
            hour: 17,
            day_of_week: 1,
            ev_adoption: EvAdoption::High,
            ..StressInput::default()
        };
        assert_eq!(ev_charging_score(&input), 15.0);
    }

    #[test]
    fn test_ev_unrecognized_is_neutral() {
        let medium = StressInput {
            hour: 18,
            ev_adoption: EvAdoption::Medium,
            ..StressInput::default()
        };
        let unknown = StressInput {
            ev_adoption: EvAdoption::Unrecognized,
            ..medium
        };
        assert_eq!(ev_charging_score(&medium), ev_charging_score(&unknown));
    }

    #[test]
    fn test_factor_values_within_bounds() {
        let input = StressInput {
            temperature: 115.0,
            humidity: 95.0,
            hour: 17,
            day_of_week: 1,
            wind_speed: 40.0,
            cloud_cover: 100.0,
            ev_adoption: EvAdoption::High,
        };
        for factor in Factor::ALL {
            let (lo, hi) = factor.bounds();
            let value = factor.evaluate(&input);
            assert!(value >= lo && value <= hi, "{:?} = {}", factor, value);
        }
    }
}
