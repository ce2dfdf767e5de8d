use crate::instant::Instant;
use crate::ValueError;
use crate::ValueResult;

use num_traits::ToPrimitive;
use web_time::{SystemTime, UNIX_EPOCH};

/// Returns the system time as an `Instant`.
pub(crate) fn get_system_instant() -> ValueResult<Instant> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| ValueError::general("Error fetching system time"))?;
    let ticks = (since_epoch.as_nanos() / 100)
        .to_i64()
        .ok_or_else(|| ValueError::general("System time is out of range"))?;
    Instant::from_unix_ticks(ticks)
}
