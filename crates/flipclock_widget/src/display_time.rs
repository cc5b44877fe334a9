//! Display fields derived from a wall-clock reading

use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// Time-of-day greeting bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    /// Bucket an hour of day: [0,12) morning, [12,17) afternoon,
    /// [17,21) evening, [21,24) night
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Greeting::Morning,
            12..=16 => Greeting::Afternoon,
            17..=20 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Greeting::Morning => "morning",
            Greeting::Afternoon => "afternoon",
            Greeting::Evening => "evening",
            Greeting::Night => "night",
        }
    }

    /// Text shown on the date line
    pub fn label(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
            Greeting::Night => "Good night",
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sample of everything the clock face displays
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayTime {
    /// 1..=12
    pub hour12: u32,
    /// Zero-padded, "00".."59"
    pub minute: String,
    /// Long form, e.g. "Monday, January 1"
    pub date_label: String,
    pub greeting: Greeting,
}

impl DisplayTime {
    pub fn from_datetime(at: &NaiveDateTime) -> Self {
        let hour = at.hour();
        Self {
            hour12: to_hour12(hour),
            minute: format!("{:02}", at.minute()),
            date_label: at.format("%A, %B %-d").to_string(),
            greeting: Greeting::from_hour(hour),
        }
    }

    /// Hour cell text, unpadded
    pub fn hour_text(&self) -> String {
        self.hour12.to_string()
    }
}

fn to_hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}
