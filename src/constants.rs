pub const API_NAME: &str = "[Rental API]";

/// Surfaced for every date-range conflict, whether the blocking day came
/// from another booking or a manual blackout. The cause is not leaked.
pub const CONFLICT_MESSAGE: &str =
    "One or more dates in this range are already booked or unavailable for this car. Please choose different dates.";

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_UPLOAD_FILES: usize = 10;
