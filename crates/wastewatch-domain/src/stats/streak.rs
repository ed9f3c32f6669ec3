use chrono::{Duration, NaiveDate};

/// Length of the run of consecutive days ending today or yesterday.
///
/// A run whose latest day is older than yesterday is broken and yields 0.
/// Input order and duplicates do not matter.
pub fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut sorted: Vec<NaiveDate> = days.iter().copied().filter(|d| *d <= today).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let Some(&latest) = sorted.first() else {
        return 0;
    };

    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1u32;
    let mut expected = latest - Duration::days(1);
    for day in sorted.into_iter().skip(1) {
        if day != expected {
            break;
        }
        streak += 1;
        expected = day - Duration::days(1);
    }

    streak
}
