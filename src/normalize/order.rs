use std::cmp::Ordering;

use super::record::CanonicalRecord;

fn compare(a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    a.match_date
        .cmp(&b.match_date)
        .then_with(|| a.match_time.cmp(&b.match_time))
        .then_with(|| a.league_name.cmp(&b.league_name))
}

/// Sorts by (date, time, league) ascending. `sort_by` is stable, so equal
/// keys keep discovery order. `"TBD"` sorts after every digit-led date.
pub fn order_records(records: &mut [CanonicalRecord]) {
    records.sort_by(compare);
}
