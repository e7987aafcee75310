use crate::domain::model::PostCount;
use crate::utils::error::{ImpactError, Result};

/// Two shared leftovers are assumed to save one plate.
pub const PLATES_PER_POST: f64 = 0.5;

/// Maps a post count to plates saved: `floor(number_of_posts * 0.5)`.
///
/// Fractional counts are accepted and truncated after the multiplication,
/// so `3.0` gives `1` and `2.9` gives `1`. Negative, NaN and infinite
/// counts are rejected rather than clamped, as are counts whose estimate
/// does not fit in a `u64`.
pub fn calculate_plates_saved(number_of_posts: f64) -> Result<u64> {
    if !number_of_posts.is_finite() {
        return Err(ImpactError::invalid_input(
            "number_of_posts",
            number_of_posts,
            "must be a finite number",
        ));
    }
    if number_of_posts < 0.0 {
        return Err(ImpactError::invalid_input(
            "number_of_posts",
            number_of_posts,
            "must not be negative",
        ));
    }

    let plates = (number_of_posts * PLATES_PER_POST).floor();
    if plates >= u64::MAX as f64 {
        return Err(ImpactError::invalid_input(
            "number_of_posts",
            number_of_posts,
            "is too large to estimate",
        ));
    }

    Ok(plates as u64)
}

/// Integer form for counts read from a post store.
pub fn plates_for_count(count: PostCount) -> u64 {
    count.value() / 2
}
