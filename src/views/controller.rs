//! Calendar view controller.
//!
//! One `CalendarView` per open calendar. It keeps the granularity and anchor
//! date, a read-only snapshot of the store, and the in-flight drag. Every
//! change goes through the shared [`EventStore`]; the snapshot is re-read on
//! each render and whenever another view signals a mutation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate};

use super::drag::{DragContext, DragState};
use super::geometry::{pointer_to_start, reschedule_on_drop, MonthGrid, SnapMode};
use super::month_view::{build_month_layout, month_title, MonthLayout};
use super::navigation::{self, get_week_start, week_dates};
use super::time_grid::{build_day_columns, DayColumn};
use super::types::{ClickTarget, DropOutcome, DropTarget, ViewAction, ViewType};
use crate::models::meeting::{Meeting, MeetingDraft, MeetingId};
use crate::models::settings::Settings;
use crate::services::event::{ChangeSubscription, EventStore};
use crate::utils::date::start_of_day;

pub struct CalendarView {
    store: Arc<EventStore>,
    changes: ChangeSubscription,
    view_type: ViewType,
    anchor: NaiveDate,
    first_day_of_week: u8,
    month_visible_per_day: usize,
    meetings: Vec<Meeting>,
    drag: DragState,
}

impl CalendarView {
    pub fn new(store: Arc<EventStore>, settings: &Settings, view_type: ViewType, anchor: NaiveDate) -> Self {
        let changes = store.subscribe();
        let meetings = store.get_all();
        Self {
            store,
            changes,
            view_type,
            anchor,
            first_day_of_week: settings.first_day_of_week % 7,
            month_visible_per_day: settings.month_visible_per_day,
            meetings,
            drag: DragState::default(),
        }
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.view_type = view_type;
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.anchor = date;
    }

    /// Step the anchor by `delta` units of the current granularity.
    pub fn change_date(&mut self, delta: i32) {
        self.anchor = navigation::step(self.view_type, self.anchor, delta);
    }

    pub fn go_to_today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    pub fn header_title(&self) -> String {
        match self.view_type {
            ViewType::Month => month_title(self.anchor),
            ViewType::Week => {
                let start = get_week_start(self.anchor, self.first_day_of_week);
                let end = start + Duration::days(6);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            ViewType::Day => self.anchor.format("%A, %B %-d, %Y").to_string(),
        }
    }

    /// Days shown at the current granularity.
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        match self.view_type {
            ViewType::Month => MonthGrid::containing(self.anchor, self.first_day_of_week)
                .dates()
                .collect(),
            ViewType::Week => week_dates(self.anchor, self.first_day_of_week),
            ViewType::Day => vec![self.anchor],
        }
    }

    /// `[start, end)` covering the visible days.
    pub fn visible_range(&self) -> (DateTime<Local>, DateTime<Local>) {
        let dates = self.visible_dates();
        let first = dates.first().copied().unwrap_or(self.anchor);
        let last = dates.last().copied().unwrap_or(self.anchor);
        (start_of_day(first), start_of_day(last + Duration::days(1)))
    }

    /// Last snapshot read from the store.
    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Meetings overlapping the visible range, ordered by start.
    pub fn visible_meetings(&self) -> Vec<Meeting> {
        let (start, end) = self.visible_range();
        self.store.find_by_date_range(start, end)
    }

    pub fn refresh(&mut self) {
        self.meetings = self.store.get_all();
    }

    /// Re-read the store if any view reported a mutation since the last call.
    pub fn sync_changes(&mut self) -> bool {
        let changed = self.changes.drain();
        if changed {
            self.refresh();
        }
        changed
    }

    /// Resolve a click at `fraction` of a week/day track `track_height` pixels
    /// tall into a meeting block or empty grid space.
    pub fn hit_test(&self, date: NaiveDate, fraction: f64, track_height: f32) -> ClickTarget {
        let columns = build_day_columns(&[date], &self.meetings, Local::now());
        match columns
            .first()
            .and_then(|column| column.event_at(fraction, track_height))
        {
            Some(event) => ClickTarget::Meeting(event.meeting.id.clone()),
            None => ClickTarget::TimeGrid { date, fraction },
        }
    }

    pub fn handle_click(&mut self, target: ClickTarget) -> ViewAction {
        match target {
            ClickTarget::Meeting(id) => match self.store.get(&id) {
                Ok(meeting) => ViewAction::OpenDetail(meeting),
                Err(err) => {
                    log::warn!("Click on stale meeting block: {}", err);
                    self.refresh();
                    ViewAction::None
                }
            },
            ClickTarget::TimeGrid { date, fraction } => ViewAction::OpenCreate {
                start: pointer_to_start(date, fraction, SnapMode::Hour),
            },
            ClickTarget::MonthDay(date) => {
                self.anchor = date;
                self.view_type = ViewType::Day;
                ViewAction::SwitchToDay(date)
            }
        }
    }

    /// Draft for the "new meeting" button, starting at `now`.
    pub fn new_draft_at(&self, now: DateTime<Local>) -> MeetingDraft {
        MeetingDraft::for_new(now)
    }

    pub fn begin_drag(&mut self, id: &MeetingId) -> bool {
        match self.meetings.iter().find(|m| &m.id == id) {
            Some(meeting) => {
                self.drag.begin(DragContext::from_meeting(meeting));
                true
            }
            None => {
                log::warn!("Cannot drag unknown meeting {}", id);
                false
            }
        }
    }

    pub fn active_drag(&self) -> Option<&DragContext> {
        self.drag.active()
    }

    /// Every day track accepts a drop while a drag is active.
    pub fn drag_over(&self, target: &DropTarget) -> bool {
        self.drag.is_active() && matches!(target, DropTarget::TimeGrid { .. })
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Finish the active drag. The meeting keeps every field except its
    /// interval, which moves to the drop point with the original duration.
    pub fn drop_on(&mut self, target: DropTarget) -> DropOutcome {
        let Some(context) = self.drag.finish() else {
            return DropOutcome::NoDrag;
        };

        let (date, fraction) = match target {
            DropTarget::TimeGrid { date, fraction } => (date, fraction),
            DropTarget::Outside => return DropOutcome::Cancelled,
        };

        let current = match self.store.get(&context.meeting_id) {
            Ok(meeting) => meeting,
            Err(err) => {
                log::warn!("Dropped meeting is gone: {}", err);
                self.refresh();
                return DropOutcome::Missing(context.meeting_id);
            }
        };

        let (start, end) =
            reschedule_on_drop(date, fraction, context.original_start, context.original_end);
        let moved = current.with_interval(start, end);
        self.store.update(&moved);
        self.refresh();

        log::info!("Rescheduled meeting {} to {}", moved.id, start);
        DropOutcome::Moved(self.store.get(&moved.id).unwrap_or(moved))
    }

    /// Create or update a meeting from the editor form.
    ///
    /// Edits keep the stored `notified` flag; the scheduler alone owns it.
    pub fn save_draft(&mut self, draft: MeetingDraft) -> Option<Meeting> {
        let saved = match draft.editing.clone() {
            Some(id) => {
                let existing = match self.store.get(&id) {
                    Ok(meeting) => meeting,
                    Err(err) => {
                        log::warn!("Cannot save edit: {}", err);
                        self.refresh();
                        return None;
                    }
                };
                let mut updated = Meeting::from_new(id, draft.into_new_meeting());
                updated.notified = existing.notified;
                self.store.update(&updated);
                self.store.get(&updated.id).ok()
            }
            None => Some(self.store.add(draft.into_new_meeting())),
        };
        self.refresh();
        saved
    }

    pub fn delete_meeting(&mut self, id: &MeetingId) -> bool {
        let removed = self.store.delete(id);
        self.refresh();
        removed
    }

    pub fn render_month_at(&mut self, now: DateTime<Local>) -> MonthLayout {
        self.refresh();
        let grid = MonthGrid::containing(self.anchor, self.first_day_of_week);
        build_month_layout(&grid, &self.meetings, now, self.month_visible_per_day)
    }

    /// Day columns for Week or Day granularity. Month granularity renders
    /// the anchor's week.
    pub fn render_timeline_at(&mut self, now: DateTime<Local>) -> Vec<DayColumn> {
        self.refresh();
        let dates = match self.view_type {
            ViewType::Day => vec![self.anchor],
            ViewType::Week | ViewType::Month => week_dates(self.anchor, self.first_day_of_week),
        };
        build_day_columns(&dates, &self.meetings, now)
    }
}
