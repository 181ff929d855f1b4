use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use icalendar::{CalendarDateTime, Component, EventLike, Property};

use crate::{course::Course, meeting::MeetingTime, weekday::Weekday, Error, Result};

/// A weekly recurrence ending at local midnight of the last day of the quarter.
#[derive(Debug, Clone)]
pub struct Recurrence {
	pub frequency: rrule::Frequency,
	pub interval: u16,
	pub weekdays: Vec<Weekday>,
	pub until: DateTime<Tz>,
}

impl Recurrence {
	pub fn weekly(weekdays: &[Weekday], until: DateTime<Tz>) -> Self {
		Self {
			frequency: rrule::Frequency::Weekly,
			interval: 1,
			weekdays: weekdays.to_vec(),
			until,
		}
	}

	fn to_rrule(&self) -> impl fmt::Display {
		rrule::RRule::new(self.frequency)
			.interval(self.interval)
			.by_weekday(self.weekdays.iter().map(|d| d.to_rrule()).collect())
			// DTSTART carries a TZID, so UNTIL has to be in UTC
			.until(self.until.with_timezone(&rrule::Tz::Tz(chrono_tz::UTC)))
	}
}

impl fmt::Display for Recurrence {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.to_rrule())
	}
}

#[derive(Debug, Clone)]
pub struct Event {
	pub uid: String,
	/// First occurrence.
	pub start: DateTime<Tz>,
	pub end: DateTime<Tz>,
	pub rule: Recurrence,
	pub summary: String,
	pub location: String,
	pub description: String,
}

fn localize(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>> {
	let naive = date.and_time(time);

	tz.from_local_datetime(&naive)
		.earliest()
		.ok_or(Error::LocalTime(naive, tz.name()))
}

/// First day on or after `from` that the meeting takes place on.
fn first_meeting(from: NaiveDate, meeting: &MeetingTime) -> Option<NaiveDate> {
	(0..7)
		.filter_map(|n| from.checked_add_days(Days::new(n)))
		.find(|day| meeting.meets_on(day.weekday()))
}

impl Event {
	/// Builds the recurring event for a course, or `None` if it has no
	/// weekly meeting.
	///
	/// Meetings are assumed not to cross midnight.
	pub fn from_course(course: &Course, identity: &str, tz: Tz) -> Result<Option<Self>> {
		let meeting = &course.meeting;

		let Some(first) = first_meeting(course.start_date, meeting) else {
			return Ok(None);
		};

		let start = localize(tz, first, meeting.start)?;
		let end = localize(tz, first, meeting.end)?;
		let until = localize(tz, course.end_date, NaiveTime::default())?;

		let waitlisted = if course.waitlisted {
			"[Waitlisted] "
		} else {
			""
		};

		Ok(Some(Self {
			uid: format!(
				"{}/{}/{}@{identity}",
				course.code,
				course.section,
				start.to_rfc3339()
			),
			start,
			end,
			rule: Recurrence::weekly(&meeting.weekdays, until),
			summary: format!(
				"{waitlisted}{} ({}) {}",
				course.code, course.component, course.title
			),
			location: course.room.clone(),
			description: format!(
				"Section: {} | Instructor: {}",
				course.section, course.instructor
			),
		}))
	}

	#[must_use]
	pub fn to_ical(&self) -> icalendar::Event {
		let tzid = self.start.timezone().name().to_string();

		icalendar::Event::new()
			.uid(&self.uid)
			.summary(&self.summary)
			.starts(CalendarDateTime::WithTimezone {
				date_time: self.start.naive_local(),
				tzid: tzid.clone(),
			})
			.ends(CalendarDateTime::WithTimezone {
				date_time: self.end.naive_local(),
				tzid,
			})
			.location(&self.location)
			.description(&self.description)
			// repeat weekly
			.add_property("RRULE", self.rule.to_string())
			.done()
	}
}

pub const PRODID: &str = concat!("-//ucsc2ics//", env!("CARGO_PKG_VERSION"), "//EN");

/// The generated schedule, along with the span of all quarters it covers.
#[derive(Debug, Clone)]
pub struct Calendar {
	pub name: String,
	pub timezone: Tz,
	pub events: Vec<Event>,
	/// Earliest quarter start, `None` if there are no events.
	pub start: Option<NaiveDate>,
	/// Latest quarter end, `None` if there are no events.
	pub end: Option<NaiveDate>,
}

impl Calendar {
	#[must_use]
	pub fn new(name: &str, timezone: Tz) -> Self {
		Self {
			name: name.to_string(),
			timezone,
			events: Vec::new(),
			start: None,
			end: None,
		}
	}

	/// Adds the event of `course`, widening the bounds to its quarter.
	pub fn push(&mut self, course: &Course, event: Event) {
		self.start = Some(
			self.start
				.map_or(course.start_date, |start| start.min(course.start_date)),
		);
		self.end = Some(
			self.end
				.map_or(course.end_date, |end| end.max(course.end_date)),
		);
		self.events.push(event);
	}

	#[must_use]
	pub fn to_ical(&self) -> icalendar::Calendar {
		let mut calendar = icalendar::Calendar::empty();

		calendar
			.append_property(Property::new("VERSION", "2.0"))
			.append_property(Property::new("PRODID", PRODID))
			.append_property(Property::new("CALSCALE", "GREGORIAN"));

		calendar.name(&self.name);
		calendar.timezone(self.timezone.name());

		for event in &self.events {
			calendar.push(event.to_ical());
		}

		calendar
	}
}

impl fmt::Display for Calendar {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.to_ical())
	}
}
