use std::time::Duration;

use tally_engine::{RefreshEvent, RefreshHandle};

#[test]
fn burst_of_schedules_yields_latest_generation_only() {
    let handle = RefreshHandle::new();
    for generation in 1..=5 {
        handle.schedule(generation, Duration::from_millis(30));
    }

    let event = handle.recv_timeout(Duration::from_secs(5));
    assert_eq!(event, Some(RefreshEvent::Due { generation: 5 }));
    assert_eq!(handle.recv_timeout(Duration::from_millis(100)), None);
}

#[test]
fn cancelled_refresh_never_fires() {
    let handle = RefreshHandle::new();
    handle.schedule(1, Duration::from_millis(50));
    handle.cancel();

    assert_eq!(handle.recv_timeout(Duration::from_millis(200)), None);
    assert_eq!(handle.try_recv(), None);
}
