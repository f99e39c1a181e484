//! Presentation helpers shared by the page composers.

use chrono::NaiveDate;

use reform_contracts::{
    directive::{Directive, ProgressTier, Tone},
    overview::percent_of,
    planning::TimelineEvent,
    status::{AlertPriority, MilestoneStatus, Status},
};

/// Traffic-light marker for a status.
pub fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Success => "🟢",
        Status::Warning => "🟡",
        Status::Critical => "🔴",
        Status::Pending => "⚪",
    }
}

pub fn priority_marker(priority: AlertPriority) -> &'static str {
    match priority {
        AlertPriority::Critical => "🔴",
        AlertPriority::Warning => "🟡",
    }
}

/// A progress bar directive. The percentage is truncated and zero for an
/// empty total; the tier follows from the percentage.
pub fn progress(label: impl Into<String>, current: u32, total: u32) -> Directive {
    let percent = percent_of(current, total);
    Directive::Progress {
        label: label.into(),
        current,
        total,
        percent,
        tier: ProgressTier::from_percent(percent),
    }
}

pub fn milestone_icon(status: MilestoneStatus) -> &'static str {
    match status {
        MilestoneStatus::Completed => "✅",
        MilestoneStatus::InProgress => "🕐",
        MilestoneStatus::Upcoming => "⏳",
        MilestoneStatus::Planned => "📅",
        MilestoneStatus::Goal => "🎯",
    }
}

pub fn milestone_tone(status: MilestoneStatus) -> Tone {
    match status {
        MilestoneStatus::Completed => Tone::Success,
        MilestoneStatus::InProgress => Tone::Info,
        MilestoneStatus::Upcoming => Tone::Warning,
        MilestoneStatus::Goal => Tone::Error,
        MilestoneStatus::Planned => Tone::Plain,
    }
}

/// Success or error callout for a pass/fail criterion.
pub fn check_callout(ok: bool, pass: &str, fail: &str) -> Directive {
    if ok {
        Directive::callout(Tone::Success, format!("✓ {pass}"))
    } else {
        Directive::callout(Tone::Error, format!("✗ {fail}"))
    }
}

/// German short date, e.g. "31.12.2025".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Integer with a comma every three digits, e.g. "245,000".
pub fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Group events by quarter label, keeping first-appearance order.
///
/// Input sorted by date yields quarters in chronological order.
pub fn group_by_quarter(events: &[TimelineEvent]) -> Vec<(String, Vec<&TimelineEvent>)> {
    let mut groups: Vec<(String, Vec<&TimelineEvent>)> = Vec::new();
    for event in events {
        let quarter = event.quarter();
        match groups.iter_mut().find(|(q, _)| *q == quarter) {
            Some((_, members)) => members.push(event),
            None => groups.push((quarter, vec![event])),
        }
    }
    groups
}
