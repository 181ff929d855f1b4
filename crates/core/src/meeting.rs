use std::str::FromStr;

use chrono::NaiveTime;

use crate::{weekday::Weekday, Error, Result};

/// A weekly meeting pattern. Times are wall-clock times in the institution's
/// timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingTime {
	pub start: NaiveTime,
	pub end: NaiveTime,
	/// Empty for sections without a scheduled meeting.
	pub weekdays: Vec<Weekday>,
}

impl MeetingTime {
	#[must_use]
	pub fn unscheduled() -> Self {
		Self {
			start: NaiveTime::default(),
			end: NaiveTime::default(),
			weekdays: Vec::new(),
		}
	}

	#[must_use]
	pub fn is_recurring(&self) -> bool {
		!self.weekdays.is_empty()
	}

	#[must_use]
	pub fn meets_on(&self, day: chrono::Weekday) -> bool {
		self.weekdays.iter().any(|&d| chrono::Weekday::from(d) == day)
	}
}

/// Parses `H[H]:MM` followed by `AM` or `PM` into a 24-hour time.
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
	let err = || Error::Clock(s.to_string());

	let (time, pm) = if let Some(time) = s.strip_suffix("AM") {
		(time, false)
	} else if let Some(time) = s.strip_suffix("PM") {
		(time, true)
	} else {
		return Err(err());
	};

	let (hour, minute) = time.split_once(':').ok_or_else(err)?;
	let hour: u32 = hour.parse().map_err(|_| err())?;
	let minute: u32 = minute.parse().map_err(|_| err())?;

	if !(1..=12).contains(&hour) {
		return Err(err());
	}

	let hour = match (hour, pm) {
		(12, false) => 0,
		(12, true) => 12,
		(hour, true) => hour + 12,
		(hour, false) => hour,
	};

	NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}

// MoWeFr 11:40AM - 1:15PM
impl FromStr for MeetingTime {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let s = s.trim();

		if s.is_empty() || s == "TBA" {
			return Ok(Self::unscheduled());
		}

		let (days, times) = s
			.split_once(' ')
			.ok_or_else(|| Error::MeetingTime(s.to_string()))?;
		let (start, end) = times
			.split_once(" - ")
			.ok_or_else(|| Error::MeetingTime(s.to_string()))?;

		Ok(Self {
			start: parse_clock(start.trim())?,
			end: parse_clock(end.trim())?,
			weekdays: Weekday::parse_run(days)?,
		})
	}
}
