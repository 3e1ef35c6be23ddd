use std::collections::HashMap;
use serde::Serialize;
use crate::manager_owm::models::ForecastSample;

/// One calendar day reduced from a run of forecast samples
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub date: String,
    pub min_temp: i64,
    pub max_temp: i64,
    pub icon: String,
}

/// Groups forecast samples by calendar day and reduces each day to its min/max temperature
/// and the icon of the first sample seen for that day.
///
/// Days are returned in the order they first appear in `samples`, not sorted by date, so
/// the first entry is whatever day the forecast starts on.
///
/// # Arguments
///
/// * 'samples' - forecast samples in chronological order
pub fn daily_forecast(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut result: Vec<DailySummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sample in samples {
        let date = day_key(&sample.dt_txt);
        let min_temp = round_temp(sample.temp_min);
        let max_temp = round_temp(sample.temp_max);

        match index.get(date) {
            Some(&i) => {
                let day = &mut result[i];
                day.min_temp = day.min_temp.min(min_temp);
                day.max_temp = day.max_temp.max(max_temp);
            }
            None => {
                index.insert(date, result.len());
                result.push(DailySummary {
                    date: date.to_string(),
                    min_temp,
                    max_temp,
                    icon: sample.icon.clone(),
                });
            }
        }
    }

    result
}

/// Returns the date part of a `YYYY-MM-DD HH:MM:SS` timestamp, or the whole string if
/// there is no space in it
///
/// # Arguments
///
/// * 'dt_txt' - textual timestamp of a sample
pub fn day_key(dt_txt: &str) -> &str {
    dt_txt.split(' ').next().unwrap_or(dt_txt)
}

/// Rounds to the nearest whole degree with halves going up, i.e. -2.5 becomes -2
///
/// # Arguments
///
/// * 'temp' - temperature in whatever unit the samples were fetched in
pub fn round_temp(temp: f64) -> i64 {
    let floor = temp.floor();
    // adding 0.5 before flooring rounds the largest double below 0.5 up
    if temp - floor >= 0.5 { floor as i64 + 1 } else { floor as i64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dt_txt: &str, temp_min: f64, temp_max: f64, icon: &str) -> ForecastSample {
        ForecastSample {
            timestamp: 0,
            dt_txt: dt_txt.to_string(),
            temp: (temp_min + temp_max) / 2.0,
            temp_min,
            temp_max,
            icon: icon.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(daily_forecast(&[]).is_empty());
    }

    #[test]
    fn single_sample_is_its_own_day() {
        let days = daily_forecast(&[sample("2024-03-02 12:00:00", 3.4, 5.5, "10d")]);

        assert_eq!(days, vec![DailySummary {
            date: "2024-03-02".to_string(),
            min_temp: 3,
            max_temp: 6,
            icon: "10d".to_string(),
        }]);
    }

    #[test]
    fn reduces_one_day_and_keeps_first_icon() {
        let days = daily_forecast(&[
            sample("2024-01-01 09:00:00", 10.4, 15.6, "01d"),
            sample("2024-01-01 18:00:00", 8.2, 17.1, "01n"),
        ]);

        assert_eq!(days, vec![DailySummary {
            date: "2024-01-01".to_string(),
            min_temp: 8,
            max_temp: 17,
            icon: "01d".to_string(),
        }]);
    }

    #[test]
    fn min_and_max_over_whole_day() {
        let days = daily_forecast(&[
            sample("2024-01-01 00:00:00", 10.0, 15.0, "02d"),
            sample("2024-01-01 03:00:00", 7.0, 18.0, "03d"),
            sample("2024-01-01 06:00:00", 9.0, 12.0, "04d"),
        ]);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].min_temp, 7);
        assert_eq!(days[0].max_temp, 18);
        assert_eq!(days[0].icon, "02d");
    }

    #[test]
    fn days_keep_first_seen_order() {
        let days = daily_forecast(&[
            sample("2024-01-02 21:00:00", 1.0, 2.0, "b"),
            sample("2024-01-01 00:00:00", 3.0, 4.0, "a"),
            sample("2024-01-02 23:00:00", 0.0, 5.0, "b2"),
        ]);

        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-02", "2024-01-01"]);
        assert_eq!(days[0].min_temp, 0);
        assert_eq!(days[0].max_temp, 5);
        assert_eq!(days[0].icon, "b");
    }

    #[test]
    fn one_summary_per_distinct_day() {
        let mut samples = Vec::new();
        for day in 1..=5 {
            for hour in (0..24).step_by(3) {
                samples.push(sample(&format!("2024-05-0{} {:02}:00:00", day, hour), 1.0, 2.0, "01d"));
            }
        }

        assert_eq!(daily_forecast(&samples).len(), 5);
    }

    #[test]
    fn rounds_before_reducing() {
        // 7.4 and 7.6 would both be the min before rounding; after rounding 7 wins
        let days = daily_forecast(&[
            sample("2024-01-01 00:00:00", 7.6, 9.4, "x"),
            sample("2024-01-01 03:00:00", 7.4, 9.6, "y"),
        ]);

        assert_eq!(days[0].min_temp, 7);
        assert_eq!(days[0].max_temp, 10);
    }

    #[test]
    fn timestamp_without_space_is_its_own_key() {
        let days = daily_forecast(&[
            sample("garbage", 1.0, 2.0, "01d"),
            sample("2024-01-01 00:00:00", 1.0, 2.0, "01d"),
        ]);

        assert_eq!(days[0].date, "garbage");
        assert_eq!(days[1].date, "2024-01-01");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_temp(2.5), 3);
        assert_eq!(round_temp(-2.5), -2);
        assert_eq!(round_temp(-2.6), -3);
        assert_eq!(round_temp(0.49), 0);
    }

    #[test]
    fn just_below_half_rounds_down() {
        assert_eq!(round_temp(0.49999999999999994), 0);
        assert_eq!(round_temp(-0.5000000000000001), -1);
    }
}
