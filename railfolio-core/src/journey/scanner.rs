/// Detects forward crossings of station thresholds.
///
/// Crossing is interval based: a station is reached when its threshold lies in
/// `(previous, current]`. A jump across several stations reports only the
/// first unresolved one; the arrival snap brings the train back to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationScanner;

impl StationScanner {
    /// First station crossed between `previous` and `current`, if any.
    ///
    /// Stations at or before `last_resolved` are skipped, as are stations
    /// without a threshold strictly inside `(0, 1)`. Nothing is reported unless
    /// the journey is en route and moving forward.
    #[must_use]
    pub fn scan(
        thresholds: &[Option<f64>],
        previous: f64,
        current: f64,
        last_resolved: Option<usize>,
        en_route: bool,
    ) -> Option<usize> {
        if !en_route || !previous.is_finite() || !current.is_finite() || current <= previous {
            return None;
        }
        let first = last_resolved.map_or(0, |index| index + 1);
        thresholds
            .iter()
            .enumerate()
            .skip(first)
            .find_map(|(index, &threshold)| {
                threshold
                    .filter(|t| *t > 0.0 && *t < 1.0)
                    .filter(|t| previous < *t && *t <= current)
                    .map(|_| index)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: [Option<f64>; 3] = [Some(0.2), Some(0.5), Some(0.8)];

    #[test]
    fn reports_the_first_crossed_station() {
        assert_eq!(StationScanner::scan(&TRACK, 0.19, 0.2, None, true), Some(0));
        assert_eq!(StationScanner::scan(&TRACK, 0.19, 0.21, None, true), Some(0));
        assert_eq!(StationScanner::scan(&TRACK, 0.1, 0.9, None, true), Some(0));
        assert_eq!(StationScanner::scan(&TRACK, 0.2, 0.21, None, true), None);
    }

    #[test]
    fn resolved_stations_are_never_reported_again() {
        assert_eq!(StationScanner::scan(&TRACK, 0.1, 0.9, Some(0), true), Some(1));
        assert_eq!(StationScanner::scan(&TRACK, 0.1, 0.3, Some(0), true), None);
        assert_eq!(StationScanner::scan(&TRACK, 0.1, 0.9, Some(2), true), None);
    }

    #[test]
    fn backward_motion_and_locked_states_report_nothing() {
        assert_eq!(StationScanner::scan(&TRACK, 0.21, 0.19, None, true), None);
        assert_eq!(StationScanner::scan(&TRACK, 0.19, 0.21, None, false), None);
        assert_eq!(StationScanner::scan(&TRACK, 0.19, f64::NAN, None, true), None);
    }

    #[test]
    fn thresholds_outside_the_unit_interval_are_skipped() {
        let track = [None, Some(0.0), Some(1.0), Some(0.6)];
        assert_eq!(StationScanner::scan(&track, -0.5, 1.5, None, true), Some(3));
        assert_eq!(StationScanner::scan(&[], 0.0, 1.0, None, true), None);
    }
}
