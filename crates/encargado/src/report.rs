//! Share and print formatting.
//!
//! Everything here is read-only: it turns events and log entries into text
//! for messaging apps, e-mail bodies, printable HTML, or the admin log view.

use std::fmt::{Display, Write as _};

use chrono::{Local, TimeZone};

use crate::model::{AdminLog, Event, LogType, Millis};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";
const DAY_FORMAT: &str = "%d/%m/%Y";

/// Render a timestamp as `dd/mm/yyyy HH:MM` in local time.
#[must_use]
pub fn format_timestamp(millis: Millis) -> String {
    format_in(millis, &Local, DATE_FORMAT)
}

/// Render a timestamp as `dd/mm/yyyy` in local time.
#[must_use]
pub fn format_day(millis: Millis) -> String {
    format_in(millis, &Local, DAY_FORMAT)
}

fn format_in<Tz>(millis: Millis, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map_or_else(|| "-".to_string(), |dt| dt.format(pattern).to_string())
}

fn status_label(event: &Event) -> &'static str {
    if event.is_completed {
        "Completed"
    } else {
        "Pending"
    }
}

/// Message describing a single incident.
///
/// Headings are wrapped in `*` for messaging apps; see [`plain`].
#[must_use]
pub fn event_text(event: &Event, zone_name: &str) -> String {
    format!(
        "*Incident*\n\nZone: {}\nDescription: {}\nDate: {}\nStatus: {}",
        zone_name,
        event.description,
        format_timestamp(event.created_at),
        status_label(event)
    )
}

/// Summary of every incident in a zone.
///
/// A totals line is followed by a numbered pending list (with creation day)
/// and a numbered completed list. Empty sections are omitted.
#[must_use]
pub fn zone_summary_text(events: &[&Event], zone_name: &str) -> String {
    let (pending, completed): (Vec<&Event>, Vec<&Event>) =
        events.iter().copied().partition(|e| e.is_pending());

    let mut text = format!("*Incident Summary*\n\nZone: {zone_name}\n");
    let _ = writeln!(
        text,
        "Total: {} | Pending: {} | Completed: {}\n",
        events.len(),
        pending.len(),
        completed.len()
    );

    if !pending.is_empty() {
        text.push_str("*Pending:*\n");
        for (i, event) in pending.iter().enumerate() {
            let _ = writeln!(
                text,
                "{}. {} ({})",
                i + 1,
                event.description,
                format_day(event.created_at)
            );
        }
        text.push('\n');
    }

    if !completed.is_empty() {
        text.push_str("*Completed:*\n");
        for (i, event) in completed.iter().enumerate() {
            let _ = writeln!(text, "{}. {}", i + 1, event.description);
        }
    }

    text
}

/// Strip `*` emphasis markers, for e-mail bodies.
#[must_use]
pub fn plain(text: &str) -> String {
    text.replace('*', "")
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PAGE_STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 20px; max-width: 800px; margin: 0 auto; }
h1 { color: #333; border-bottom: 2px solid #333; padding-bottom: 10px; }
h2 { color: #666; margin-top: 20px; }
.summary { background: #f5f5f5; padding: 15px; border-radius: 8px; margin-bottom: 20px; }
.event { padding: 10px; border-left: 3px solid #ddd; margin: 10px 0; }
.event.pending { border-color: #f59e0b; }
.event.completed { border-color: #10b981; }
.date { color: #888; font-size: 12px; }
.label { font-weight: bold; }
.photos img { max-width: 200px; border-radius: 8px; margin-right: 10px; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{PAGE_STYLE}\n</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Printable HTML page for a single incident, photos included.
#[must_use]
pub fn event_html(event: &Event, zone_name: &str) -> String {
    let zone = escape_html(zone_name);
    let status_class = if event.is_completed {
        "completed"
    } else {
        "pending"
    };

    let mut body = String::from("<h1>Incident</h1>\n");
    let _ = writeln!(body, "<div><span class=\"label\">Zone:</span> {zone}</div>");
    let _ = writeln!(
        body,
        "<div><span class=\"label\">Description:</span> {}</div>",
        escape_html(&event.description)
    );
    let _ = writeln!(
        body,
        "<div><span class=\"label\">Created:</span> {}</div>",
        format_timestamp(event.created_at)
    );
    let _ = writeln!(
        body,
        "<div class=\"event {status_class}\">{}</div>",
        status_label(event)
    );

    if !event.photos.is_empty() {
        body.push_str("<div class=\"photos\">\n");
        for photo in &event.photos {
            let _ = writeln!(
                body,
                "<img src=\"{}\" alt=\"Photo\">",
                escape_html(&photo.data_url)
            );
        }
        body.push_str("</div>\n");
    }

    page(&format!("Incident - {zone}"), &body)
}

/// Printable HTML page summarizing a zone.
#[must_use]
pub fn zone_summary_html(events: &[&Event], zone_name: &str) -> String {
    let zone = escape_html(zone_name);
    let (pending, completed): (Vec<&Event>, Vec<&Event>) =
        events.iter().copied().partition(|e| e.is_pending());

    let mut body = format!("<h1>Incidents - {zone}</h1>\n");
    let _ = writeln!(
        body,
        "<div class=\"summary\"><strong>Summary:</strong> {} total | {} pending | {} completed</div>",
        events.len(),
        pending.len(),
        completed.len()
    );

    if !pending.is_empty() {
        body.push_str("<h2>Pending</h2>\n");
        for event in &pending {
            let _ = writeln!(
                body,
                "<div class=\"event pending\"><div>{}</div><div class=\"date\">Created: {}</div></div>",
                escape_html(&event.description),
                format_timestamp(event.created_at)
            );
        }
    }

    if !completed.is_empty() {
        body.push_str("<h2>Completed</h2>\n");
        for event in &completed {
            let completed_at = event
                .completed_at
                .map(format_timestamp)
                .unwrap_or_default();
            let _ = writeln!(
                body,
                "<div class=\"event completed\"><div>{}</div><div class=\"date\">Completed: {}</div></div>",
                escape_html(&event.description),
                completed_at
            );
        }
    }

    page(&format!("Incidents - {zone}"), &body)
}

/// One human-readable line describing an admin log entry.
#[must_use]
pub fn log_line(log: &AdminLog) -> String {
    let zone = log.zone_name.as_deref().unwrap_or("");
    let description = log.event_description.as_deref().unwrap_or("");
    let message = match log.kind {
        LogType::EventCreated => format!("New incident in \"{zone}\": {description}"),
        LogType::EventDeleted => format!("Incident deleted from \"{zone}\": {description}"),
        LogType::EventCompleted => format!("Incident completed in \"{zone}\": {description}"),
        LogType::ZoneCreated => format!("New zone created: {zone}"),
        LogType::ZoneDeleted => format!("Zone deleted: {zone}"),
    };
    format!("{}  {}", format_timestamp(log.timestamp), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Photo;
    use chrono::Utc;

    fn event(id: &str, description: &str, completed_at: Option<Millis>) -> Event {
        Event {
            id: id.to_string(),
            zone_id: "z1".to_string(),
            description: description.to_string(),
            created_at: 1_700_000_000_000,
            completed_at,
            is_completed: completed_at.is_some(),
            photos: Vec::new(),
        }
    }

    fn log(kind: LogType, zone_name: Option<&str>, description: Option<&str>) -> AdminLog {
        AdminLog {
            id: "l1".to_string(),
            kind,
            zone_id: Some("z1".to_string()),
            zone_name: zone_name.map(str::to_string),
            event_id: None,
            event_description: description.map(str::to_string),
            timestamp: 0,
        }
    }

    #[test]
    fn test_format_in_utc() {
        // 2023-11-14T22:13:20Z
        assert_eq!(
            format_in(1_700_000_000_000, &Utc, DATE_FORMAT),
            "14/11/2023 22:13"
        );
        assert_eq!(format_in(1_700_000_000_000, &Utc, DAY_FORMAT), "14/11/2023");
    }

    #[test]
    fn test_format_out_of_range() {
        assert_eq!(format_in(Millis::MAX, &Utc, DATE_FORMAT), "-");
    }

    #[test]
    fn test_event_text_pending() {
        let text = event_text(&event("e1", "Leak", None), "Warehouse");
        assert!(text.starts_with("*Incident*"));
        assert!(text.contains("Zone: Warehouse"));
        assert!(text.contains("Description: Leak"));
        assert!(text.contains(&format!("Date: {}", format_timestamp(1_700_000_000_000))));
        assert!(text.ends_with("Status: Pending"));
    }

    #[test]
    fn test_event_text_completed() {
        let text = event_text(&event("e1", "Leak", Some(1)), "Warehouse");
        assert!(text.ends_with("Status: Completed"));
    }

    #[test]
    fn test_zone_summary_text() {
        let a = event("e1", "Leak", None);
        let b = event("e2", "Broken lamp", Some(5));
        let c = event("e3", "Loose cable", None);
        let text = zone_summary_text(&[&a, &b, &c], "Warehouse");

        assert!(text.contains("Zone: Warehouse"));
        assert!(text.contains("Total: 3 | Pending: 2 | Completed: 1"));
        assert!(text.contains("*Pending:*\n1. Leak ("));
        assert!(text.contains("2. Loose cable ("));
        assert!(text.contains("*Completed:*\n1. Broken lamp\n"));
    }

    #[test]
    fn test_zone_summary_text_omits_empty_sections() {
        let a = event("e1", "Leak", None);
        let text = zone_summary_text(&[&a], "Warehouse");
        assert!(!text.contains("*Completed:*"));

        let text = zone_summary_text(&[], "Warehouse");
        assert!(text.contains("Total: 0 | Pending: 0 | Completed: 0"));
        assert!(!text.contains("*Pending:*"));
    }

    #[test]
    fn test_plain_strips_emphasis() {
        let text = plain(&event_text(&event("e1", "Leak", None), "Warehouse"));
        assert!(!text.contains('*'));
        assert!(text.starts_with("Incident"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_zone_summary_html_escapes() {
        let a = event("e1", "<script>alert(1)</script>", None);
        let html = zone_summary_html(&[&a], "A & B");

        assert!(html.contains("<title>Incidents - A &amp; B</title>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("1 total | 1 pending | 0 completed"));
        assert!(html.contains("<h2>Pending</h2>"));
        assert!(!html.contains("<h2>Completed</h2>"));
    }

    #[test]
    fn test_zone_summary_html_completed_section() {
        let b = event("e2", "Broken lamp", Some(1_700_000_000_000));
        let html = zone_summary_html(&[&b], "Warehouse");
        assert!(html.contains("<h2>Completed</h2>"));
        assert!(html.contains(&format!(
            "Completed: {}",
            format_timestamp(1_700_000_000_000)
        )));
    }

    #[test]
    fn test_event_html_includes_photos() {
        let mut e = event("e1", "Leak", None);
        e.photos.push(Photo {
            id: "p1".to_string(),
            data_url: "data:image/jpeg;base64,AAAA".to_string(),
            timestamp: 1,
        });
        let html = event_html(&e, "Warehouse");

        assert!(html.contains("<img src=\"data:image/jpeg;base64,AAAA\""));
        assert!(html.contains("class=\"event pending\""));
    }

    #[test]
    fn test_event_html_without_photos() {
        let html = event_html(&event("e1", "Leak", Some(1)), "Warehouse");
        assert!(!html.contains("<img"));
        assert!(html.contains("class=\"event completed\""));
    }

    #[test]
    fn test_log_line_per_type() {
        let line = log_line(&log(LogType::EventCreated, Some("Warehouse"), Some("Leak")));
        assert!(line.ends_with("New incident in \"Warehouse\": Leak"));

        let line = log_line(&log(LogType::EventDeleted, Some("Warehouse"), Some("Leak")));
        assert!(line.ends_with("Incident deleted from \"Warehouse\": Leak"));

        let line = log_line(&log(LogType::EventCompleted, Some("Warehouse"), Some("Leak")));
        assert!(line.ends_with("Incident completed in \"Warehouse\": Leak"));

        let line = log_line(&log(LogType::ZoneCreated, Some("Warehouse"), None));
        assert!(line.ends_with("New zone created: Warehouse"));

        let line = log_line(&log(LogType::ZoneDeleted, None, None));
        assert!(line.ends_with("Zone deleted: "));
    }
}
