//! Video duration codec.
//!
//! Durations travel in two shapes: a clock object (`{hours, minutes,
//! seconds}`, produced by the video host relay and by authoring forms) and a
//! colon-delimited string. The persisted form is always the canonical
//! zero-padded `"HH:MM:SS"` string; parsing is permissive and accepts one
//! (seconds), two (minutes:seconds) or three components.

use serde::{Deserialize, Serialize};

/// A duration broken into clock components. Serialized as the
/// `durationObject` shape of the video host relay responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Clock {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Clock {
    /// Split a raw second count into clock components.
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: (total / 3600) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    /// Canonical `"HH:MM:SS"` rendering, every component zero-padded to two
    /// digits.
    pub fn format(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    pub fn total_secs(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

/// A duration as submitted by a caller: either a colon string or a clock
/// object whose fields may themselves be numbers or digit strings (HTML form
/// inputs produce strings).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Text(String),
    Parts(ClockFields),
}

/// Loosely-typed clock object. Missing fields default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClockFields {
    #[serde(default)]
    pub hours: ComponentValue,
    #[serde(default)]
    pub minutes: ComponentValue,
    #[serde(default)]
    pub seconds: ComponentValue,
}

/// One clock component, tolerant of both `3` and `"3"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Number(u32),
    Text(String),
}

impl Default for ComponentValue {
    fn default() -> Self {
        ComponentValue::Number(0)
    }
}

impl ComponentValue {
    fn as_u32(&self) -> u32 {
        match self {
            ComponentValue::Number(n) => *n,
            ComponentValue::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// Duration components as editable strings, the shape authoring forms edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationParts {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Reduce any accepted duration shape to the canonical `"HH:MM:SS"` string
/// persisted on video documents.
pub fn canonicalize(value: &DurationValue) -> String {
    match value {
        DurationValue::Parts(fields) => Clock {
            hours: fields.hours.as_u32(),
            minutes: fields.minutes.as_u32(),
            seconds: fields.seconds.as_u32(),
        }
        .format(),
        DurationValue::Text(s) => Clock::from_secs(seconds_of(s)).format(),
    }
}

/// Parse a colon string into editable components.
///
/// A full three-component string is read numerically (leading zeros drop
/// out); shorter strings keep their component text verbatim, with missing
/// components filled with `"0"`. Two components mean minutes:seconds, one
/// means seconds.
pub fn parse_duration(raw: &str) -> DurationParts {
    if raw.is_empty() {
        return DurationParts {
            hours: "0".into(),
            minutes: "0".into(),
            seconds: "0".into(),
        };
    }

    let parts: Vec<&str> = raw.split(':').collect();
    match parts.as_slice() {
        [h, m, s] => DurationParts {
            hours: numeric_component(h),
            minutes: numeric_component(m),
            seconds: numeric_component(s),
        },
        [m, s] => DurationParts {
            hours: "0".into(),
            minutes: (*m).into(),
            seconds: (*s).into(),
        },
        [s] => DurationParts {
            hours: "0".into(),
            minutes: "0".into(),
            seconds: if s.is_empty() { "0".into() } else { (*s).into() },
        },
        _ => DurationParts {
            hours: "0".into(),
            minutes: "0".into(),
            seconds: "0".into(),
        },
    }
}

/// Render a component numerically, keeping the raw text when it is not a
/// number.
fn numeric_component(raw: &str) -> String {
    match raw.trim().parse::<u32>() {
        Ok(n) => n.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Total seconds in a colon string. Unparseable components count as zero.
pub fn seconds_of(raw: &str) -> u64 {
    let nums: Vec<u64> = raw
        .split(':')
        .map(|p| p.trim().parse::<u64>().unwrap_or(0))
        .collect();
    match nums.as_slice() {
        [h, m, s] => h * 3600 + m * 60 + s,
        [m, s] => m * 60 + s,
        [s] => *s,
        _ => 0,
    }
}

/// Sum a sequence of colon-string durations into one canonical string.
pub fn total_duration<I, S>(durations: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let total: u64 = durations.into_iter().map(|d| seconds_of(d.as_ref())).sum();
    Clock::from_secs(total).format()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_components() {
        let clock = Clock {
            hours: 1,
            minutes: 2,
            seconds: 3,
        };
        assert_eq!(clock.format(), "01:02:03");
    }

    #[test]
    fn format_zero() {
        assert_eq!(Clock::from_secs(0).format(), "00:00:00");
    }

    #[test]
    fn from_secs_carries() {
        assert_eq!(Clock::from_secs(3723).format(), "01:02:03");
        assert_eq!(Clock::from_secs(59).format(), "00:00:59");
        assert_eq!(Clock::from_secs(60).format(), "00:01:00");
    }

    #[test]
    fn parse_full_string() {
        let parts = parse_duration("01:02:03");
        assert_eq!(parts.hours, "1");
        assert_eq!(parts.minutes, "2");
        assert_eq!(parts.seconds, "3");
    }

    #[test]
    fn parse_minutes_seconds() {
        let parts = parse_duration("5:09");
        assert_eq!(parts.hours, "0");
        assert_eq!(parts.minutes, "5");
        assert_eq!(parts.seconds, "09");
    }

    #[test]
    fn parse_bare_seconds() {
        let parts = parse_duration("45");
        assert_eq!(parts.hours, "0");
        assert_eq!(parts.minutes, "0");
        assert_eq!(parts.seconds, "45");
    }

    #[test]
    fn parse_empty() {
        let parts = parse_duration("");
        assert_eq!(parts.hours, "0");
        assert_eq!(parts.minutes, "0");
        assert_eq!(parts.seconds, "0");
    }

    #[test]
    fn canonicalize_clock_object() {
        let value = DurationValue::Parts(ClockFields {
            hours: ComponentValue::Number(1),
            minutes: ComponentValue::Number(2),
            seconds: ComponentValue::Number(3),
        });
        assert_eq!(canonicalize(&value), "01:02:03");
    }

    #[test]
    fn canonicalize_form_strings() {
        let value = DurationValue::Parts(ClockFields {
            hours: ComponentValue::Text("0".into()),
            minutes: ComponentValue::Text("5".into()),
            seconds: ComponentValue::Text("09".into()),
        });
        assert_eq!(canonicalize(&value), "00:05:09");
    }

    #[test]
    fn canonicalize_short_string() {
        assert_eq!(canonicalize(&DurationValue::Text("5:09".into())), "00:05:09");
        assert_eq!(canonicalize(&DurationValue::Text("45".into())), "00:00:45");
    }

    #[test]
    fn canonicalize_garbage_component_counts_zero() {
        assert_eq!(canonicalize(&DurationValue::Text("x:30".into())), "00:00:30");
    }

    #[test]
    fn duration_value_deserializes_both_shapes() {
        let text: DurationValue = serde_json::from_str("\"01:02:03\"").unwrap();
        assert_eq!(canonicalize(&text), "01:02:03");

        let object: DurationValue =
            serde_json::from_str(r#"{"hours": "1", "minutes": 2, "seconds": "03"}"#).unwrap();
        assert_eq!(canonicalize(&object), "01:02:03");
    }

    #[test]
    fn seconds_of_variants() {
        assert_eq!(seconds_of("00:10:00"), 600);
        assert_eq!(seconds_of("00:05:30"), 330);
        assert_eq!(seconds_of("5:09"), 309);
        assert_eq!(seconds_of("45"), 45);
    }

    #[test]
    fn total_of_two_lessons() {
        assert_eq!(total_duration(["00:10:00", "00:05:30"]), "00:15:30");
    }

    #[test]
    fn total_rolls_minutes_into_hours() {
        assert_eq!(total_duration(["00:40:00", "00:30:00"]), "01:10:00");
    }

    #[test]
    fn total_of_nothing() {
        assert_eq!(total_duration(Vec::<String>::new()), "00:00:00");
    }
}
