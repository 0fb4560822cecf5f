//! Integration tests for the layout pipeline.

use chrono::{TimeZone, Utc};
use eventgrid_core::{
    detect_clusters, layout_cluster, layout_day, CalendarEvent, ColumnAssigner, ColumnExpander,
    Config, DayBucketer, IntervalModel, LayoutEngine, LayoutError,
};

fn ev(start: i64, end: i64, id: &'static str) -> IntervalModel<&'static str> {
    IntervalModel::new(start, end, id)
}

fn cluster_ids(events: &[IntervalModel<&'static str>]) -> Vec<Vec<&'static str>> {
    detect_clusters(events)
        .unwrap()
        .iter()
        .map(|c| c.refs().copied().collect())
        .collect()
}

#[test]
fn test_clustering_splits_disjoint_groups() {
    let events = [ev(0, 10, "A"), ev(5, 15, "B"), ev(20, 30, "C")];
    assert_eq!(cluster_ids(&events), vec![vec!["A", "B"], vec!["C"]]);
}

#[test]
fn test_touching_events_are_not_overlapping() {
    let events = [ev(0, 10, "A"), ev(10, 20, "B")];
    assert_eq!(cluster_ids(&events), vec![vec!["A"], vec!["B"]]);
}

#[test]
fn test_equal_start_forces_overlap_and_second_column() {
    let events = [ev(0, 20, "A"), ev(0, 10, "B")];
    assert_eq!(cluster_ids(&events), vec![vec!["A", "B"]]);

    let layout = layout_cluster(&events).unwrap();
    assert_eq!(layout.divisor, 2);
    assert_eq!(layout.placement_of(&"A").unwrap().start_column, 0);
    assert_eq!(layout.placement_of(&"B").unwrap().start_column, 1);
}

#[test]
fn test_expansion_widens_into_free_column() {
    let events = [ev(0, 10, "A"), ev(5, 15, "B"), ev(20, 30, "C")];

    let assignment = ColumnAssigner::new().assign(&events).unwrap();
    let before: Vec<_> = assignment
        .placements()
        .iter()
        .map(|p| (p.reference, p.start_column))
        .collect();
    assert_eq!(before, vec![("A", 0), ("B", 1), ("C", 0)]);

    let layout = ColumnExpander::new().expand(assignment);
    assert_eq!(layout.divisor, 2);
    let spans: Vec<_> = layout
        .placements
        .iter()
        .map(|p| (p.reference, p.start_column, p.end_column))
        .collect();
    assert_eq!(spans, vec![("A", 0, 0), ("B", 1, 1), ("C", 0, 1)]);
}

#[test]
fn test_full_day_workflow_from_calendar_events() {
    let at = |h: u32, m: u32| Utc.with_ymd_and_hms(2024, 6, 3, h, m, 0).unwrap();
    let events = vec![
        CalendarEvent::new("standup", "Standup", at(9, 0), at(9, 5)),
        CalendarEvent::new("design", "Design review", at(9, 0), at(10, 30)),
        CalendarEvent::new("1on1", "1:1", at(10, 0), at(10, 30)),
        CalendarEvent::new("lunch", "Lunch", at(12, 0), at(13, 0)),
    ];

    let days = DayBucketer::new().bucket(&events).unwrap();
    assert_eq!(days.len(), 1);
    let (_, day_events) = days.into_iter().next().unwrap();

    let day = LayoutEngine::new().layout_day(&day_events).unwrap();
    assert_eq!(day.clusters().len(), 2);

    // The standup is widened to 15 minutes and still ends before the 1:1, so
    // the two share column 0 while the design review takes column 1.
    let standup = day.placement_of(&"standup".to_string()).unwrap();
    let design = day.placement_of(&"design".to_string()).unwrap();
    let one_on_one = day.placement_of(&"1on1".to_string()).unwrap();
    assert_eq!(design.divisor, 2);
    assert_eq!((standup.start_column, standup.end_column), (0, 0));
    assert_eq!((design.start_column, design.end_column), (1, 1));
    assert_eq!((one_on_one.start_column, one_on_one.end_column), (0, 0));

    let lunch = day.placement_of(&"lunch".to_string()).unwrap();
    assert_eq!((lunch.start_column, lunch.end_column, lunch.divisor), (0, 0, 1));
}

#[test]
fn test_config_drives_overflow_and_bucketing() {
    let mut config = Config::default();
    config.set("overflow.max_columns", "2").unwrap();
    config.set("layout.min_event_minutes", "30").unwrap();

    let at = |h: u32| Utc.with_ymd_and_hms(2024, 6, 3, h, 0, 0).unwrap();
    let events: Vec<_> = (0..4)
        .map(|i| CalendarEvent::new(format!("e{i}"), "", at(9), at(10)))
        .collect();

    let days = config.bucketer().bucket(&events).unwrap();
    let day_events = days.values().next().unwrap();

    let engine = LayoutEngine::new().with_overflow(config.overflow_policy().unwrap());
    let day = engine.layout_day(day_events).unwrap();
    assert_eq!(day.max_divisor(), 2);
    assert_eq!(day.clusters()[0].hidden, vec!["e2".to_string(), "e3".to_string()]);
}

#[test]
fn test_invalid_interval_surfaces_from_every_entry_point() {
    let events = [ev(0, 10, "A"), ev(30, 20, "B")];
    let expected = LayoutError::InvalidInterval { start: 30, end: 20 };
    assert_eq!(detect_clusters(&events).unwrap_err(), expected);
    assert_eq!(layout_day(&events).unwrap_err(), expected);
    assert_eq!(layout_cluster(&events).unwrap_err(), expected);
}
