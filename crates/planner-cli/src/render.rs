//! Plain-text rendering of planning results.

use availability_engine::planner::{AvailabilityOverview, SessionPlan, TrainerAssignment};
use availability_engine::{AvailabilityResult, ScheduleEntry};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render ranked results as an aligned table.
pub fn availability_table(title: &str, results: &[AvailabilityResult]) -> String {
    let mut out = format!("## {}\n", title);

    if results.is_empty() {
        out.push_str("(none)\n");
        return out;
    }

    let name_width = results
        .iter()
        .map(|r| r.resource_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    out.push_str(&format!(
        "{:<name_width$}  {:>12}  {:<12}  OVERLAPPING SESSIONS\n",
        "NAME", "AVAILABILITY", "LAST SESSION",
    ));
    for r in results {
        let last = r
            .last_session_end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let overlapping = if r.conflicting_session_names.is_empty() {
            "-".to_string()
        } else {
            r.conflicting_session_names.join(", ")
        };
        out.push_str(&format!(
            "{:<name_width$}  {:>11}%  {:<12}  {}\n",
            r.resource_name, r.availability_percent, last, overlapping,
        ));
    }
    out
}

pub fn overview(overview: &AvailabilityOverview, show_trainers: bool, show_rooms: bool) -> String {
    let mut out = format!(
        "Availabilities between {} and {} ({} weekdays)\n\n",
        overview.target.start().format("%a %b %d %Y"),
        overview.target.end().format("%a %b %d %Y"),
        overview.weekday_length,
    );
    if show_trainers {
        out.push_str(&availability_table("Trainers", &overview.trainers));
    }
    if show_trainers && show_rooms {
        out.push('\n');
    }
    if show_rooms {
        out.push_str(&availability_table("Rooms", &overview.rooms));
    }
    out
}

pub fn plan(plan: &SessionPlan, tz: Tz) -> String {
    let mut out = format!(
        "Request:          {}\nTraining:         {}\nStart date:       {}\nEnd date:         {}\n",
        plan.request_id,
        plan.training_id,
        plan.range.start(),
        plan.range.end(),
    );
    if plan.proposed_end != plan.range.end() {
        out.push_str(&format!("Proposed end:     {}\n", plan.proposed_end));
    }
    out.push_str(&format!("Days of training: {}\n\n", plan.weekday_length));
    out.push_str(&availability_table("Trainers availabilities", &plan.trainers));
    out.push('\n');
    out.push_str(&availability_table("Room availabilities", &plan.rooms));
    out.push('\n');
    out.push_str(&format!(
        "## Session draft\nStart: {}\nEnd:   {}\nStatus: New\n",
        local(plan.draft.start, tz),
        local(plan.draft.end, tz),
    ));
    out
}

pub fn schedule(entries: &[ScheduleEntry], tz: Tz) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}  {}  {}  {}\n",
                e.id,
                local(e.range.start(), tz),
                local(e.range.end(), tz),
                e.event_type,
            )
        })
        .collect()
}

pub fn trainers(session_id: &str, assignment: &TrainerAssignment) -> String {
    let mut out = format!("Trainers for {}: ", session_id);
    if assignment.trainers.is_empty() {
        out.push('-');
    } else {
        out.push_str(&assignment.trainers.join(", "));
    }
    out.push('\n');
    if assignment.clear_second_trainer {
        out.push_str("Second trainer duplicates the main trainer and should be cleared.\n");
    }
    out
}

fn local(ts: DateTime<FixedOffset>, tz: Tz) -> String {
    ts.with_timezone(&tz).format(DISPLAY_FORMAT).to_string()
}
