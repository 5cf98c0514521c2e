use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::params::EventParameters;
use crate::error::ScoreError;

/// Which side of the threshold counts as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Timed events, lower is better: `base = b - time`
    Track,
    /// Jumps and throws, higher is better: `base = distance - b`
    Field,
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "track" => Ok(EventKind::Track),
            "field" => Ok(EventKind::Field),
            other => Err(format!("expected 'track' or 'field', got '{}'", other)),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Track => write!(f, "track"),
            EventKind::Field => write!(f, "field"),
        }
    }
}

/// What to do when a performance falls beyond the table's zero point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeBasePolicy {
    /// Fail with `InvalidPerformance`
    #[default]
    Reject,
    /// Score zero points
    Zero,
}

/// Points for one canonical measurement: `trunc(a * base^c)`.
pub fn score(
    kind: EventKind,
    measurement: f64,
    params: &EventParameters,
    policy: NegativeBasePolicy,
) -> Result<u32, ScoreError> {
    let base = match kind {
        EventKind::Track => params.b - measurement,
        EventKind::Field => measurement - params.b,
    };

    if base < 0.0 {
        match policy {
            NegativeBasePolicy::Reject => return Err(ScoreError::InvalidPerformance { base }),
            NegativeBasePolicy::Zero => {
                warn!(event = %params.event, measurement, base, "performance below zero point, scoring 0");
                return Ok(0);
            }
        }
    }

    let points = params.a * base.powf(params.c);

    // Unreachable for a non-negative base unless the coefficients are NaN or huge.
    if !points.is_finite() {
        return Err(ScoreError::ComplexResult {
            base,
            exponent: params.c,
        });
    }
    if points < 0.0 {
        return Err(ScoreError::NegativePoints { points });
    }
    if points.trunc() > u32::MAX as f64 {
        return Err(ScoreError::PointsOverflow { points });
    }

    Ok(points.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(event: &str, a: f64, b: f64, c: f64) -> EventParameters {
        EventParameters {
            event: event.to_string(),
            a,
            b,
            c,
            kind: None,
        }
    }

    fn hundred_metres() -> EventParameters {
        params("100m", 25.4347, 18.0, 1.81)
    }

    #[test]
    fn test_track_points_are_truncated() {
        // 25.4347 * 7.17^1.81 = 899.32...
        let points = score(EventKind::Track, 10.83, &hundred_metres(), NegativeBasePolicy::Reject);
        assert_eq!(points, Ok(899));
    }

    #[test]
    fn test_field_points() {
        // Long jump in centimetres: 0.14354 * 560^1.4 = 1010.27...
        let lj = params("long jump", 0.14354, 220.0, 1.4);
        assert_eq!(score(EventKind::Field, 780.0, &lj, NegativeBasePolicy::Reject), Ok(1010));

        // Shot put in metres: 51.39 * 13.5^1.05 = 790.19...
        let sp = params("shot put", 51.39, 1.5, 1.05);
        assert_eq!(score(EventKind::Field, 15.0, &sp, NegativeBasePolicy::Reject), Ok(790));
    }

    #[test]
    fn test_negative_base_rejected() {
        let err = score(EventKind::Track, 20.0, &hundred_metres(), NegativeBasePolicy::Reject)
            .unwrap_err();
        assert_eq!(err, ScoreError::InvalidPerformance { base: -2.0 });
    }

    #[test]
    fn test_negative_base_scores_zero_when_lenient() {
        let points = score(EventKind::Track, 20.0, &hundred_metres(), NegativeBasePolicy::Zero);
        assert_eq!(points, Ok(0));
    }

    #[test]
    fn test_zero_base_scores_zero() {
        let points = score(EventKind::Track, 18.0, &hundred_metres(), NegativeBasePolicy::Reject);
        assert_eq!(points, Ok(0));
    }

    #[test]
    fn test_nan_coefficient_is_complex_result() {
        let broken = params("100m", 25.4347, f64::NAN, 1.81);
        let err = score(EventKind::Track, 10.83, &broken, NegativeBasePolicy::Reject).unwrap_err();
        assert!(matches!(err, ScoreError::ComplexResult { .. }));
    }

    #[test]
    fn test_negative_coefficient_is_negative_points() {
        let broken = params("100m", -25.4347, 18.0, 1.81);
        let err = score(EventKind::Track, 10.83, &broken, NegativeBasePolicy::Reject).unwrap_err();
        assert!(matches!(err, ScoreError::NegativePoints { .. }));
    }

    #[test]
    fn test_oversized_coefficient_is_overflow() {
        // 1e7 * 990 = 9.9e9, past u32::MAX
        let broken = params("100m", 1e7, 1000.0, 1.0);
        let err = score(EventKind::Track, 10.0, &broken, NegativeBasePolicy::Reject).unwrap_err();
        assert_eq!(err, ScoreError::PointsOverflow { points: 9.9e9 });
    }

    #[test]
    fn test_largest_score_still_fits() {
        let p = params("100m", u32::MAX as f64, 1.0, 1.0);
        let points = score(EventKind::Field, 2.0, &p, NegativeBasePolicy::Reject);
        assert_eq!(points, Ok(u32::MAX));
    }

    #[test]
    fn test_better_performance_never_scores_less() {
        let p = hundred_metres();
        let mut last = 0;
        for hundredths in (1000..=1800).rev() {
            let time = hundredths as f64 / 100.0;
            let points = score(EventKind::Track, time, &p, NegativeBasePolicy::Reject).unwrap();
            assert!(points >= last, "{} scored {} < {}", time, points, last);
            last = points;
        }
    }

    #[test]
    fn test_event_kind_from_str() {
        assert_eq!("Track".parse::<EventKind>(), Ok(EventKind::Track));
        assert_eq!(" field ".parse::<EventKind>(), Ok(EventKind::Field));
        assert!("jump".parse::<EventKind>().is_err());
    }
}
