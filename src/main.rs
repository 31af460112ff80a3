// Meeting Scheduler
// Watches the stored meetings and raises desktop alerts before they start

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

use meeting_scheduler::models::meeting::NewMeeting;
use meeting_scheduler::models::settings::Settings;
use meeting_scheduler::services::database::SqliteMedium;
use meeting_scheduler::services::event::{EventStore, SharedMedium};
use meeting_scheduler::services::notification::{
    spawn_scheduler, DesktopAlertSink, NotificationScheduler, NotificationService,
};
use meeting_scheduler::services::settings::SettingsService;
use meeting_scheduler::utils::date::local_datetime;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Meeting Scheduler");

    let settings = load_settings_or_default();
    let store = Arc::new(open_store(&settings)?);

    let seeded = store.seed_if_empty(demo_meetings(Local::now()));
    if seeded > 0 {
        log::info!("Seeded {} demo meetings", seeded);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run_alerts(store, settings))
}

fn load_settings_or_default() -> Settings {
    let Some(service) = SettingsService::from_project_dirs() else {
        log::warn!("No config directory available, using default settings");
        return Settings::default();
    };

    match service.load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    }
}

fn open_store(settings: &Settings) -> Result<EventStore> {
    let db_path = SettingsService::resolve_database_path(settings);
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let medium = SqliteMedium::open(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to open meeting database {}", db_path.display()))?;
    log::info!("Using meeting database {}", db_path.display());

    Ok(EventStore::open(SharedMedium::new(Arc::new(medium)), settings))
}

async fn run_alerts(store: Arc<EventStore>, settings: Settings) -> Result<()> {
    let notifications = &settings.notifications;
    let scheduler = NotificationScheduler::new(store, notifications);

    let mut service = NotificationService::new().with_timeout(notifications.alert_timeout());
    service.set_enabled(notifications.use_system_notifications);

    let handle = spawn_scheduler(
        scheduler,
        DesktopAlertSink::new(service),
        notifications.scan_interval(),
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    log::info!("Shutting down");
    handle.shutdown().await;
    Ok(())
}

/// Sample calendar for a first run, including one meeting that starts in two
/// minutes so the alert path is visible straight away.
fn demo_meetings(now: DateTime<Local>) -> Vec<NewMeeting> {
    let at = |day: u32, hour: u32, minute: u32| -> Option<DateTime<Local>> {
        let date = NaiveDate::from_ymd_opt(2024, 7, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(local_datetime(date, time))
    };

    let mut meetings = Vec::new();

    if let (Some(start), Some(end)) = (at(15, 10, 0), at(15, 11, 30)) {
        let mut meeting = NewMeeting::new("Q3 Strategy with Innovatech", start, end);
        meeting.attendees = vec!["John Doe".to_string()];
        meeting.notes = Some("Discuss Q3 goals and renewal terms.".to_string());
        meeting.link = Some("https://meet.google.com/xyz-abc-def".to_string());
        meetings.push(meeting);
    }

    if let (Some(start), Some(end)) = (at(15, 14, 0), at(15, 15, 0)) {
        let mut meeting = NewMeeting::new("Demo for Solutions Inc.", start, end);
        meeting.attendees = vec!["Jane Smith".to_string()];
        meeting.notes = Some("Focus on AI features and integrations.".to_string());
        meetings.push(meeting);
    }

    let sync_start = now + Duration::minutes(2);
    let mut sync = NewMeeting::new("Team Sync", sync_start, sync_start + Duration::minutes(30));
    sync.attendees = vec!["Sales Team".to_string()];
    sync.notes = Some("This meeting will trigger a notification.".to_string());
    sync.link = Some("https://meet.google.com/ghi-jkl-mno".to_string());
    meetings.push(sync);

    if let (Some(start), Some(end)) = (at(25, 11, 0), at(25, 11, 30)) {
        let mut meeting = NewMeeting::new("Follow-up with DataCorp", start, end);
        meeting.attendees = vec!["Sam Wilson".to_string()];
        meeting.notes = Some("Follow up on proposal and answer any final questions.".to_string());
        meetings.push(meeting);
    }

    meetings
}
