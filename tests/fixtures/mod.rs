// Test fixtures - reusable test data
// Provides consistent meetings and stores across the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone};
use meeting_scheduler::models::meeting::NewMeeting;
use meeting_scheduler::services::database::MemoryMedium;
use meeting_scheduler::services::event::{EventStore, SharedMedium};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// July `day`, 2024 at `hour:minute` local time
    pub fn july_2024(day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 7, day, hour, minute, 0)
            .unwrap()
    }

    /// Monday July 15, 2024 at 10:00
    pub fn demo_anchor() -> DateTime<Local> {
        july_2024(15, 10, 0)
    }
}

/// Sample meetings for testing
pub mod meetings {
    use super::*;

    pub fn strategy_review() -> NewMeeting {
        NewMeeting::builder()
            .title("Q3 Strategy with Innovatech")
            .start(dates::july_2024(15, 10, 0))
            .end(dates::july_2024(15, 11, 30))
            .attendee("John Doe")
            .notes("Discuss Q3 goals and renewal terms.")
            .link("https://meet.google.com/xyz-abc-def")
            .build()
            .unwrap()
    }

    pub fn product_demo() -> NewMeeting {
        NewMeeting::builder()
            .title("Demo for Solutions Inc.")
            .start(dates::july_2024(15, 14, 0))
            .end(dates::july_2024(15, 15, 0))
            .attendee("Jane Smith")
            .notes("Focus on AI features and integrations.")
            .build()
            .unwrap()
    }

    pub fn follow_up() -> NewMeeting {
        NewMeeting::builder()
            .title("Follow-up with DataCorp")
            .start(dates::july_2024(15, 16, 0))
            .end(dates::july_2024(15, 16, 30))
            .attendee("Sam Wilson")
            .build()
            .unwrap()
    }

    pub fn starting_at(title: &str, start: DateTime<Local>, minutes: i64) -> NewMeeting {
        NewMeeting::new(title, start, start + Duration::minutes(minutes))
    }
}

/// Store backed by an in-memory medium with the default 15 minute minimum.
pub fn memory_store() -> Arc<EventStore> {
    let shared = SharedMedium::new(Arc::new(MemoryMedium::new()));
    Arc::new(EventStore::new(shared, Duration::minutes(15)))
}
