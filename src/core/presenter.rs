use crate::domain::model::PassWindow;
use chrono::{Local, TimeZone, Utc};
use std::fmt::Display;
use std::io::{self, Write};

const RISE_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

pub fn format_rise_time<Tz>(risetime: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_opt(risetime, 0).single() {
        Some(datetime) => datetime.format(RISE_TIME_FORMAT).to_string(),
        // outside chrono's range: show the raw epoch rather than fail
        None => format!("epoch {}", risetime),
    }
}

pub fn format_pass<Tz>(pass: &PassWindow, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "Next pass at {} for {} seconds!",
        format_rise_time(pass.risetime, tz),
        pass.duration
    )
}

pub fn format_passes(passes: &[PassWindow], zone: DisplayZone) -> Vec<String> {
    match zone {
        DisplayZone::Local => passes.iter().map(|p| format_pass(p, &Local)).collect(),
        DisplayZone::Utc => passes.iter().map(|p| format_pass(p, &Utc)).collect(),
    }
}

pub fn write_pass_times<W: Write>(
    out: &mut W,
    passes: &[PassWindow],
    zone: DisplayZone,
) -> io::Result<()> {
    for line in format_passes(passes, zone) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
