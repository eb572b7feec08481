//! JSON rendering of the result record.
//!
//! The record is pretty-printed with a 4-space indent. Non-ASCII text is
//! written as-is (serde_json never escapes it), so titles such as
//! `Les chats expliqués` stay readable.

use crate::models::ResultRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use tracing::instrument;

/// Serialize `record` into its pretty-printed JSON form.
pub fn render_result(record: &ResultRecord) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `record` followed by a newline to `out` and flush it.
#[instrument(level = "debug", skip_all, fields(ok = record.is_ok()))]
pub fn write_result<W: Write>(record: &ResultRecord, out: &mut W) -> std::io::Result<()> {
    let json = render_result(record)?;
    writeln!(out, "{json}")?;
    out.flush()
}
