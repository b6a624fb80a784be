//! Urgency-tier timing tables for incentive presentation.

use std::time::Duration;

use crate::models::incentive::Urgency;

/// Countdown cards tick at 1-second granularity.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Delay between selection and the "shown" event. More urgent offers reveal
/// sooner.
pub fn reveal_delay(urgency: Urgency) -> Duration {
    match urgency {
        Urgency::Low => Duration::from_millis(5_000),
        Urgency::Medium => Duration::from_millis(3_000),
        Urgency::High => Duration::from_millis(2_000),
        Urgency::Critical => Duration::from_millis(1_000),
    }
}

/// How long an incentive stays up before hiding itself. More urgent offers
/// linger longer. Independent of the reveal delay.
pub fn auto_hide_after(urgency: Urgency) -> Duration {
    match urgency {
        Urgency::Low => Duration::from_millis(30_000),
        Urgency::Medium => Duration::from_millis(45_000),
        Urgency::High => Duration::from_millis(60_000),
        Urgency::Critical => Duration::from_millis(90_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_delay_shrinks_with_urgency() {
        assert_eq!(reveal_delay(Urgency::Low), Duration::from_millis(5_000));
        assert_eq!(reveal_delay(Urgency::Medium), Duration::from_millis(3_000));
        assert_eq!(reveal_delay(Urgency::High), Duration::from_millis(2_000));
        assert_eq!(reveal_delay(Urgency::Critical), Duration::from_millis(1_000));
    }

    #[test]
    fn test_auto_hide_grows_with_urgency() {
        assert_eq!(auto_hide_after(Urgency::Low), Duration::from_millis(30_000));
        assert_eq!(auto_hide_after(Urgency::Medium), Duration::from_millis(45_000));
        assert_eq!(auto_hide_after(Urgency::High), Duration::from_millis(60_000));
        assert_eq!(
            auto_hide_after(Urgency::Critical),
            Duration::from_millis(90_000)
        );
    }
}
