use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("unknown weekday code {0:?}")]
	Weekday(String),
	#[error("weekday run {0:?} is not a sequence of two-letter codes")]
	WeekdayRun(String),
	#[error("meeting time {0:?} is not of the form `MoWeFr 11:40AM - 1:15PM`")]
	MeetingTime(String),
	#[error("invalid clock time {0:?}")]
	Clock(String),
	#[error("date range {0:?} is not of the form `MM/DD/YYYY - MM/DD/YYYY`")]
	DateRange(String),
	#[error("invalid date {input:?}: {source}")]
	Date {
		input: String,
		source: chrono::ParseError,
	},
	/// A malformed field inside one section row.
	#[error("{code} section {section}: {source}")]
	Section {
		code: String,
		section: String,
		source: Box<Error>,
	},
	#[error("invalid row schema: {0}")]
	Schema(String),
	#[error("{0} does not exist in {1}")]
	LocalTime(NaiveDateTime, &'static str),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
