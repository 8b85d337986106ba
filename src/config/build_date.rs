// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
struct BuildDate {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

/// Serialize a UTC instant as the `buildDate` input object.
///
/// ```
/// use time::OffsetDateTime;
/// use typst_bridge::config::build_timestamp;
///
/// let epoch = OffsetDateTime::from_unix_timestamp(0).unwrap();
/// assert_eq!(
///     build_timestamp(epoch),
///     r#"{"year":1970,"month":1,"day":1,"hour":0,"minute":0,"second":0}"#
/// );
/// ```
pub fn build_timestamp(at: OffsetDateTime) -> String {
    let at = at.to_offset(time::UtcOffset::UTC);
    let date = BuildDate {
        year: at.year(),
        month: u8::from(at.month()),
        day: at.day(),
        hour: at.hour(),
        minute: at.minute(),
        second: at.second(),
    };
    // A struct of integers always serializes.
    serde_json::to_string(&date).unwrap_or_default()
}

/// The build timestamp for the current process start.
pub fn build_timestamp_now() -> String {
    build_timestamp(OffsetDateTime::now_utc())
}
