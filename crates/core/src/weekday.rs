use std::{fmt, str::FromStr};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
	Monday,
	Tuesday,
	Wednesday,
	Thursday,
	Friday,
	Saturday,
	Sunday,
}

impl Weekday {
	pub const ALL: [Self; 7] = [
		Self::Monday,
		Self::Tuesday,
		Self::Wednesday,
		Self::Thursday,
		Self::Friday,
		Self::Saturday,
		Self::Sunday,
	];

	/// Two-letter code used by the schedule page, e.g. `Mo`.
	#[must_use]
	pub fn code(self) -> &'static str {
		match self {
			Self::Monday => "Mo",
			Self::Tuesday => "Tu",
			Self::Wednesday => "We",
			Self::Thursday => "Th",
			Self::Friday => "Fr",
			Self::Saturday => "Sa",
			Self::Sunday => "Su",
		}
	}

	/// Day of the week counted from Monday (0) to Sunday (6).
	#[must_use]
	pub fn ordinal(self) -> u32 {
		chrono::Weekday::from(self).num_days_from_monday()
	}

	#[must_use]
	pub fn to_rrule(self) -> rrule::NWeekday {
		rrule::NWeekday::Every(self.into())
	}

	/// Splits a run of codes such as `MoWeFr` into its days, preserving order.
	pub fn parse_run(s: &str) -> Result<Vec<Self>> {
		if s.len() % 2 != 0 || !s.is_ascii() {
			return Err(Error::WeekdayRun(s.to_string()));
		}

		s.as_bytes()
			.chunks(2)
			.map(|chunk| {
				std::str::from_utf8(chunk)
					.map_err(|_| Error::WeekdayRun(s.to_string()))?
					.parse::<Self>()
			})
			.collect()
	}
}

impl From<Weekday> for chrono::Weekday {
	fn from(day: Weekday) -> Self {
		match day {
			Weekday::Monday => Self::Mon,
			Weekday::Tuesday => Self::Tue,
			Weekday::Wednesday => Self::Wed,
			Weekday::Thursday => Self::Thu,
			Weekday::Friday => Self::Fri,
			Weekday::Saturday => Self::Sat,
			Weekday::Sunday => Self::Sun,
		}
	}
}

impl From<chrono::Weekday> for Weekday {
	fn from(day: chrono::Weekday) -> Self {
		match day {
			chrono::Weekday::Mon => Self::Monday,
			chrono::Weekday::Tue => Self::Tuesday,
			chrono::Weekday::Wed => Self::Wednesday,
			chrono::Weekday::Thu => Self::Thursday,
			chrono::Weekday::Fri => Self::Friday,
			chrono::Weekday::Sat => Self::Saturday,
			chrono::Weekday::Sun => Self::Sunday,
		}
	}
}

impl fmt::Display for Weekday {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for Weekday {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|day| day.code() == s)
			.ok_or_else(|| Error::Weekday(s.to_string()))
	}
}
