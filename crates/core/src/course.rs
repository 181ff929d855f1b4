use std::fmt;

use chrono::NaiveDate;

use crate::{meeting::MeetingTime, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
	Enrolled,
	Waiting,
	Dropped,
	Other(String),
}

impl From<&str> for Status {
	fn from(s: &str) -> Self {
		match s.trim() {
			"Enrolled" => Self::Enrolled,
			"Waiting" => Self::Waiting,
			"Dropped" => Self::Dropped,
			other => Self::Other(other.to_string()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
	Discussion,
	Laboratory,
	Lecture,
	Seminar,
	Studio,
	Other(String),
}

impl fmt::Display for Component {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Discussion => "DIS",
			Self::Laboratory => "LAB",
			Self::Lecture => "LEC",
			Self::Seminar => "SEM",
			Self::Studio => "STU",
			Self::Other(s) => s,
		})
	}
}

impl From<&str> for Component {
	fn from(s: &str) -> Self {
		match s {
			"Discussion" => Self::Discussion,
			"Laboratory" | "Lab" => Self::Laboratory,
			"Lecture" => Self::Lecture,
			"Seminar" => Self::Seminar,
			"Studio" => Self::Studio,
			other => Self::Other(other.to_string()),
		}
	}
}

/// One section row of the schedule, e.g. the lecture or the discussion of a
/// class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
	/// e.g. `CSE 101M`
	pub code: String,
	pub title: String,
	/// e.g. `01` or `01B`
	pub section: String,
	pub component: Component,
	pub waitlisted: bool,
	pub instructor: String,
	/// First day of the quarter, not necessarily the first meeting.
	pub start_date: NaiveDate,
	/// Last day of the quarter.
	pub end_date: NaiveDate,
	pub room: String,
	pub meeting: MeetingTime,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
	NaiveDate::parse_from_str(s, "%m/%d/%Y").map_err(|source| Error::Date {
		input: s.to_string(),
		source,
	})
}

/// Parses `MM/DD/YYYY - MM/DD/YYYY`.
pub fn parse_date_range(s: &str) -> Result<(NaiveDate, NaiveDate)> {
	let (start, end) = s
		.trim()
		.split_once(" - ")
		.ok_or_else(|| Error::DateRange(s.to_string()))?;

	Ok((parse_date(start.trim())?, parse_date(end.trim())?))
}
