//! Current date and time.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use jarvis_core::error::ToolError;
use jarvis_core::tool::Tool;

pub struct GetTimeTool;

/// Render a timestamp the way the tool reports it.
pub fn describe<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Current date and time: {} ({})",
        now.format("%Y-%m-%d %H:%M:%S %:z"),
        now.format("%A, %B %-d, %Y")
    )
}

#[async_trait]
impl Tool for GetTimeTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "Get current date and time."
    }

    async fn execute(&self, _input: &str) -> Result<String, ToolError> {
        Ok(describe(&Local::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn describe_formats_date_and_weekday() {
        let t = Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            describe(&t),
            "Current date and time: 2026-03-05 14:07:09 +00:00 (Thursday, March 5, 2026)"
        );
    }

    #[tokio::test]
    async fn input_is_ignored() {
        let out = GetTimeTool.execute("whatever").await.unwrap();
        assert!(out.starts_with("Current date and time: "));
    }
}
