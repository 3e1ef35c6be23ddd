use chrono::{DateTime, Local, Utc};

/// Converts meters to kilometers
///
/// # Arguments
///
/// * 'meters' - distance in meters
pub fn meters_to_kilometers(meters: f64) -> f64 {
    meters / 1000.0
}

/// Converts a wind bearing into one of the eight compass points.
/// Each point covers 45 degrees centered on it, so N is 337.5 up to but not including 22.5.
///
/// # Arguments
///
/// * 'deg' - bearing in degrees, any value is normalized into 0..360 first
pub fn degree_to_direction(deg: f64) -> &'static str {
    let deg = deg.rem_euclid(360.0);

    match deg {
        d if d >= 337.5 || d < 22.5 => "N",
        d if d < 67.5 => "NE",
        d if d < 112.5 => "E",
        d if d < 157.5 => "SE",
        d if d < 202.5 => "S",
        d if d < 247.5 => "SW",
        d if d < 292.5 => "W",
        _ => "NW",
    }
}

/// Formats a point in time as local wall clock `HH:MM`
///
/// # Arguments
///
/// * 'time' - point in time
pub fn local_clock(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M").to_string()
}
