use crate::common::ResourceCategory;
use crate::domains::scheduling::TimeWindow;

/// Site-level rules layered on top of plain overlap checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailabilityPolicy {
    /// When true, rooms only accept windows contained in a single UTC day;
    /// off by default. Vehicles and parking always allow multi-day windows.
    pub same_day_rooms: bool,
}

/// Whether `requested` can be booked given the windows already held on the
/// same resource. Purely advisory: the bookings store re-checks under a lock
/// before anything is written.
///
/// `category` is None when the stored category text is unrecognized; such
/// resources get plain overlap checking with no category rules.
pub fn is_available(
    category: Option<ResourceCategory>,
    existing: &[TimeWindow],
    requested: &TimeWindow,
    policy: &AvailabilityPolicy,
) -> bool {
    if policy.same_day_rooms
        && category == Some(ResourceCategory::Room)
        && !requested.same_day_utc()
    {
        return false;
    }
    existing.iter().all(|held| !held.overlaps(requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::from_iso(start, end).unwrap()
    }

    #[test]
    fn free_resource_is_available() {
        let requested = window("2025-06-01T10:00:00Z", "2025-06-01T12:00:00Z");
        assert!(is_available(
            Some(ResourceCategory::Room),
            &[],
            &requested,
            &AvailabilityPolicy::default(),
        ));
    }

    #[test]
    fn overlap_with_any_held_window_blocks() {
        let held = vec![
            window("2025-06-01T08:00:00Z", "2025-06-01T09:00:00Z"),
            window("2025-06-01T11:00:00Z", "2025-06-01T13:00:00Z"),
        ];
        let requested = window("2025-06-01T10:00:00Z", "2025-06-01T12:00:00Z");
        assert!(!is_available(
            Some(ResourceCategory::Vehicle),
            &held,
            &requested,
            &AvailabilityPolicy::default(),
        ));
    }

    #[test]
    fn adjacent_held_windows_do_not_block() {
        let held = vec![window("2025-06-01T08:00:00Z", "2025-06-01T10:00:00Z")];
        let requested = window("2025-06-01T10:00:00Z", "2025-06-01T12:00:00Z");
        assert!(is_available(
            Some(ResourceCategory::Room),
            &held,
            &requested,
            &AvailabilityPolicy::default(),
        ));
    }

    #[test]
    fn next_hour_is_free_but_straddling_is_not() {
        let held = vec![window("2025-06-01T10:00:00Z", "2025-06-01T11:00:00Z")];
        let policy = AvailabilityPolicy::default();

        let next_hour = window("2025-06-01T11:00:00Z", "2025-06-01T12:00:00Z");
        assert!(is_available(
            Some(ResourceCategory::Room),
            &held,
            &next_hour,
            &policy
        ));

        let straddling = window("2025-06-01T10:30:00Z", "2025-06-01T11:30:00Z");
        assert!(!is_available(
            Some(ResourceCategory::Room),
            &held,
            &straddling,
            &policy
        ));
    }

    #[test]
    fn same_day_policy_blocks_overnight_rooms_only() {
        let policy = AvailabilityPolicy {
            same_day_rooms: true,
        };
        let overnight = window("2025-06-01T22:00:00Z", "2025-06-02T02:00:00Z");

        assert!(!is_available(
            Some(ResourceCategory::Room),
            &[],
            &overnight,
            &policy
        ));
        // Vehicles, parking, and uncategorized resources are exempt
        assert!(is_available(
            Some(ResourceCategory::Vehicle),
            &[],
            &overnight,
            &policy
        ));
        assert!(is_available(
            Some(ResourceCategory::Parking),
            &[],
            &overnight,
            &policy
        ));
        assert!(is_available(None, &[], &overnight, &policy));
    }

    #[test]
    fn same_day_policy_off_allows_overnight_rooms() {
        let overnight = window("2025-06-01T22:00:00Z", "2025-06-02T02:00:00Z");
        assert!(is_available(
            Some(ResourceCategory::Room),
            &[],
            &overnight,
            &AvailabilityPolicy::default(),
        ));
    }
}
