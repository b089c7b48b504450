use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Formats a view timestamp the way dashboards display it: `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn format_view_date(value: PrimitiveDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    value.format(&format).unwrap_or_else(|_| value.to_string())
}
