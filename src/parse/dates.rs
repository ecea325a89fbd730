use std::sync::LazyLock;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use regex::Regex;

use crate::model::config::Settings;

/// How the resolver decides notify flags and display strings. Derived
/// from [`Settings`] so the resolver stays a pure function of
/// (body, today, config).
#[derive(Debug, Clone, Copy)]
pub struct DateConfig {
    pub due_date_in_the_future: bool,
    pub threshold_date_in_the_future: bool,
    /// Look-ahead window in days, boundary inclusive.
    pub future_window_days: i64,
    pub convert_relative_to_absolute: bool,
}

impl DateConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        DateConfig {
            due_date_in_the_future: settings.due_date_in_the_future,
            threshold_date_in_the_future: settings.threshold_date_in_the_future,
            future_window_days: settings.future_window_days,
            convert_relative_to_absolute: settings.convert_relative_to_absolute_dates,
        }
    }
}

/// One resolved date token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    /// What the presentation layer shows for the token: the original
    /// phrasing, or the absolute date when conversion is enabled.
    pub string: String,
    /// Date requires attention: today or overdue, or inside the future
    /// window when the matching config flag is on.
    pub notify: bool,
}

/// The `due:` and `t:` entries found in one task body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakingDates {
    pub due: Option<ResolvedDate>,
    pub t: Option<ResolvedDate>,
}

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(due|t):(\S+)").unwrap());

static RELATIVE_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+(\d{1,3})([dwm])$").unwrap());

/// Scan a task body for `due:` and `t:` tokens and resolve their values
/// against the local calendar day. Unrecognized values produce no entry
/// and stay in the body untouched. First occurrence per prefix wins.
pub fn extract_speaking_dates(body: &str, today: NaiveDate, config: &DateConfig) -> SpeakingDates {
    let mut dates = SpeakingDates::default();

    for caps in DATE_TOKEN.captures_iter(body) {
        let prefix = &caps[1];
        let token = &caps[2];
        let Some((date, relative)) = resolve_token(token, today) else {
            continue;
        };

        let string = if relative && config.convert_relative_to_absolute {
            date.to_string()
        } else {
            token.to_string()
        };

        match prefix {
            "due" if dates.due.is_none() => {
                let notify = must_notify(date, today, config.due_date_in_the_future, config);
                dates.due = Some(ResolvedDate { date, string, notify });
            }
            "t" if dates.t.is_none() => {
                let notify = must_notify(date, today, config.threshold_date_in_the_future, config);
                dates.t = Some(ResolvedDate { date, string, notify });
            }
            _ => {}
        }
    }

    dates
}

/// Whole-day comparison only; instants never enter the picture, so the
/// result is stable across the day regardless of timezone.
fn must_notify(date: NaiveDate, today: NaiveDate, future_allowed: bool, config: &DateConfig) -> bool {
    if date <= today {
        return true;
    }
    future_allowed && (date - today).num_days() <= config.future_window_days
}

/// Resolve one date token. Returns the date and whether the token was a
/// relative expression (as opposed to an absolute `YYYY-MM-DD`).
fn resolve_token(token: &str, today: NaiveDate) -> Option<(NaiveDate, bool)> {
    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return Some((date, false));
    }

    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "today" | "everyday" => return Some((today, true)),
        "tomorrow" => return today.succ_opt().map(|d| (d, true)),
        _ => {}
    }

    if let Ok(weekday) = lower.parse::<Weekday>() {
        return Some((next_weekday(today, weekday), true));
    }

    if let Some(caps) = RELATIVE_OFFSET.captures(&lower) {
        let n: u32 = caps[1].parse().ok()?;
        let date = match &caps[2] {
            "d" => today.checked_add_days(Days::new(n as u64)),
            "w" => today.checked_add_days(Days::new(n as u64 * 7)),
            "m" => today.checked_add_months(Months::new(n)),
            _ => None,
        };
        return date.map(|d| (d, true));
    }

    None
}

/// The next occurrence of `weekday` strictly after `today`, so that
/// `due:monday` on a Monday means next week, not an already-elapsed day.
fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    today + Days::new(ahead as u64)
}
