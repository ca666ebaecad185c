use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use crm_calendar::calendar::dates::local_date;
use crm_calendar::calendar::views::{DayLayout, MONTH_CELL_LIMIT};
use crm_calendar::calendar::{
    by_day, by_month, by_week, group_by_hour, month_view, normalize, normalize_snapshot, render, select_event,
    Granularity, NavigationController, ViewLayout,
};
use crm_calendar::sources::{fetch_snapshot, Scope};
use crm_calendar::{Client, Directory, Event, FollowUp, InMemoryStore, Note, Task, TaskStatus, User};
use std::collections::HashSet;

const UTC: Tz = chrono_tz::UTC;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A spread of records over March and April 2025 with overlapping source ids.
fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.clients.insert(Client::new(0, "Acme"));
    store.users.insert(User::new(0, "Lucía"));

    let base = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let mut seed: u64 = 42;
    let mut next = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) % (61 * 24)
    };

    for i in 0..40 {
        let at = (base + Duration::hours(next() as i64)).to_rfc3339();
        match i % 4 {
            0 => {
                let mut task = Task::new(0, format!("Tarea {}", i), at);
                task.cliente_id = Some(1);
                task.usuario_id = Some(1);
                task.estado = TaskStatus::InProgress;
                store.tasks.insert(task);
            }
            1 => {
                let mut followup = FollowUp::new(0, "Llamada", at);
                followup.cliente_id = Some(1);
                store.followups.insert(followup);
            }
            2 => {
                store.notes.insert(Note::new(0, format!("Nota número {} con bastante texto de relleno", i), at));
            }
            _ => {
                store.events.insert(Event::new(0, format!("Evento {}", i), at));
            }
        }
    }
    store
}

async fn timeline(store: &InMemoryStore) -> Vec<crm_calendar::CalendarEvent> {
    let snapshot = fetch_snapshot(store, Scope::All).await.unwrap();
    normalize_snapshot(&snapshot, UTC)
}

#[tokio::test]
async fn test_normalization_is_idempotent_and_sorted() {
    let store = seeded_store();
    let first = timeline(&store).await;
    let second = timeline(&store).await;

    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
}

#[tokio::test]
async fn test_ids_are_unique_across_kinds() {
    let events = timeline(&seeded_store()).await;
    let ids: HashSet<String> = events.iter().map(|e| e.id()).collect();
    assert_eq!(ids.len(), events.len());
    // Every kind starts numbering at 1, so the prefix is what keeps them apart
    assert!(ids.contains("task-1"));
    assert!(ids.contains("event-1"));
}

#[tokio::test]
async fn test_day_within_week_within_month() {
    let events = timeline(&seeded_store()).await;

    for offset in 0..61 {
        let day = ymd(2025, 3, 1) + Duration::days(offset);
        let week: HashSet<String> = by_week(&events, day, UTC).iter().map(|e| e.id()).collect();
        let month: HashSet<String> = by_month(&events, day, UTC).iter().map(|e| e.id()).collect();

        for event in by_day(&events, day, UTC) {
            assert!(week.contains(&event.id()), "{} missing from week of {}", event.id(), day);
            assert!(month.contains(&event.id()), "{} missing from month of {}", event.id(), day);
        }
    }
}

#[tokio::test]
async fn test_hour_grouping_loses_nothing() {
    let events = timeline(&seeded_store()).await;
    let groups = group_by_hour(&events, UTC);
    assert_eq!(groups.values().map(Vec::len).sum::<usize>(), events.len());

    for (label, bucket) in &groups {
        for event in bucket {
            assert_eq!(&event.timestamp.format("%H:00").to_string(), label);
        }
    }
}

#[test]
fn test_task_and_event_scenario() {
    let events = normalize(
        &[Task::new(2, "Llamada", "2025-03-25T10:00:00Z")],
        &[],
        &[],
        &[Event::new(1, "Reunión", "2025-03-26T09:00:00Z")],
        &Directory::default(),
        UTC,
    );

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id(), "task-2");
    assert_eq!(events[0].timestamp, Utc.with_ymd_and_hms(2025, 3, 25, 10, 0, 0).unwrap());
    assert_eq!(events[1].id(), "event-1");
    assert_eq!(events[1].timestamp, Utc.with_ymd_and_hms(2025, 3, 26, 9, 0, 0).unwrap());
}

#[test]
fn test_week_window_scenario() {
    let events: Vec<Event> = (20..=31)
        .map(|d| Event::new(i64::from(d), "Día", format!("2025-03-{:02}T12:00:00Z", d)))
        .collect();
    let timeline = normalize(&[], &[], &[], &events, &Directory::default(), UTC);

    let week = by_week(&timeline, ymd(2025, 3, 26), UTC);
    let days: Vec<NaiveDate> = week.iter().map(|e| local_date(&e.timestamp, UTC)).collect();
    assert_eq!(days.first(), Some(&ymd(2025, 3, 23)));
    assert_eq!(days.last(), Some(&ymd(2025, 3, 29)));
    assert_eq!(days.len(), 7);
}

#[test]
fn test_month_navigation_scenario() {
    let mut nav = NavigationController::new(ymd(2025, 1, 31), Granularity::Month, UTC);
    assert_eq!(nav.next(), ymd(2025, 2, 28));
    assert_eq!(nav.label(), "febrero de 2025");
}

#[test]
fn test_month_grid_scenario_and_cell_click() {
    let timeline = normalize(
        &[],
        &[],
        &[],
        &[
            Event::new(1, "a", "2025-03-30T09:00:00Z"),
            Event::new(2, "b", "2025-03-30T10:00:00Z"),
            Event::new(3, "c", "2025-03-30T11:00:00Z"),
            Event::new(4, "d", "2025-03-30T12:00:00Z"),
        ],
        &Directory::default(),
        UTC,
    );

    let mut nav = NavigationController::new(ymd(2025, 4, 15), Granularity::Month, UTC);
    let layout = month_view(&timeline, nav.anchor(), UTC);
    let first = &layout.weeks[0][0];
    let last = layout.weeks.last().and_then(|w| w.last()).unwrap();
    assert_eq!(first.date, ymd(2025, 3, 30));
    assert_eq!(last.date, ymd(2025, 5, 3));
    assert!(!first.in_current_month);
    assert_eq!(first.visible.len(), MONTH_CELL_LIMIT);
    assert_eq!(first.overflow_label().as_deref(), Some("+1 más"));

    // Clicking an adjacent-month cell lands on that day in the day view
    nav.open_day(first.date);
    assert_eq!(nav.granularity(), Granularity::Day);
    let ViewLayout::Day(DayLayout::Hours(rows)) = render(&timeline, nav.state(), UTC) else {
        panic!("expected an hourly day layout");
    };
    assert_eq!(rows[9].events.len(), 1);
    assert_eq!(select_event(rows[12].events[0]).path(), "/events/4");
}

#[tokio::test]
async fn test_client_scope_limits_timeline() {
    let store = seeded_store();
    let snapshot = fetch_snapshot(&store, Scope::Client(1)).await.unwrap();
    let events = normalize_snapshot(&snapshot, UTC);

    assert_eq!(events.len(), 20);
    assert!(events.iter().all(|e| e.client.as_ref().map(|c| c.name.as_str()) == Some("Acme")));
}
