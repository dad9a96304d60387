//! Per-factor desirability signals.
//!
//! Each signal maps one raw attribute of a candidate onto a bucketed value in
//! roughly [0, 1].

/// Proximity value used when either side has no usable coordinates
pub const NEUTRAL_PROXIMITY: f64 = 0.5;

/// Lowest proximity value a surviving candidate can receive
pub const PROXIMITY_FLOOR: f64 = 0.1;

const HOURS_PER_WEEK: f64 = 168.0;

/// Bucketed stock desirability.
pub fn stock_signal(quantity: i64) -> f64 {
    match quantity {
        q if q <= 0 => 0.1,
        1..=10 => 0.3,
        11..=50 => 0.6,
        51..=100 => 0.8,
        _ => 1.0,
    }
}

/// Linear decay of desirability with distance, neutral when distance is unknown.
pub fn proximity_signal(distance_km: Option<f64>, max_radius_km: f64) -> f64 {
    let Some(distance) = distance_km else {
        return NEUTRAL_PROXIMITY;
    };

    if distance <= 0.0 {
        return 1.0;
    }
    if distance >= max_radius_km {
        return PROXIMITY_FLOOR;
    }

    ((max_radius_km - distance) / max_radius_km).max(PROXIMITY_FLOOR)
}

/// Bucketed desirability of how recently inventory was updated.
pub fn freshness_signal(elapsed_hours: f64) -> f64 {
    // Clock skew can put updates in the future; count those as brand new
    let hours = elapsed_hours.max(0.0);

    if hours <= 1.0 {
        1.0
    } else if hours <= 6.0 {
        0.8
    } else if hours <= 24.0 {
        0.6
    } else if hours <= HOURS_PER_WEEK {
        0.4
    } else {
        0.2
    }
}

/// Human-readable stock bucket.
pub fn stock_label(quantity: i64) -> &'static str {
    if quantity > 50 {
        "High stock"
    } else if quantity > 10 {
        "Moderate stock"
    } else {
        "Limited stock"
    }
}

/// Human-readable distance bucket.
pub fn distance_label(distance_km: f64) -> &'static str {
    if distance_km < 5.0 {
        "Very close"
    } else if distance_km < 20.0 {
        "Nearby"
    } else {
        "Distant location"
    }
}

/// Human-readable freshness bucket.
pub fn freshness_label(elapsed_hours: f64) -> &'static str {
    if elapsed_hours <= 6.0 {
        "Recently updated"
    } else if elapsed_hours <= 24.0 {
        "Moderately fresh"
    } else {
        "Older inventory data"
    }
}
