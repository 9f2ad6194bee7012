use chrono::{DateTime, FixedOffset, Utc};

/// Format used for every timestamp returned by the API
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a stored UTC timestamp, optionally shifted to a fixed offset.
pub fn render_timestamp(at: &DateTime<Utc>, offset: Option<FixedOffset>) -> String {
    match offset {
        Some(offset) => at.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
        None => at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_utc() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 22, 15, 0).unwrap();
        assert_eq!(render_timestamp(&at, None), "2024-01-31 22:15:00");
    }

    #[test]
    fn test_render_with_offset_crosses_midnight() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 22, 15, 0).unwrap();
        let ist = FixedOffset::east_opt(19_800).unwrap();
        assert_eq!(render_timestamp(&at, Some(ist)), "2024-02-01 03:45:00");
    }
}
