#![warn(clippy::pedantic)]

use tracing::debug;

pub mod calendar;
pub mod config;
pub mod course;
pub mod error;
pub mod extract;
pub mod meeting;
pub mod schema;
pub mod weekday;

pub use calendar::{Calendar, Event};
pub use config::Config;
pub use course::Course;
pub use error::{Error, Result};
pub use extract::{parse_from_buf, parse_schedule};

pub const TZ: chrono_tz::Tz = chrono_tz::America::Los_Angeles;

/// Builds one weekly event per course that has a meeting pattern.
///
/// `identity` only salts the event UIDs, so that calendars generated for
/// different students don't collide.
///
/// # Errors
///
/// Fails if a first meeting or the end of a quarter falls in a
/// daylight-saving gap of `config.timezone`.
pub fn create_calendar(courses: &[Course], identity: &str, config: &Config) -> Result<Calendar> {
	courses.iter().try_fold(
		Calendar::new(&config.name, config.timezone),
		|mut calendar, course| {
			match Event::from_course(course, identity, config.timezone)? {
				Some(event) => calendar.push(course, event),
				None => debug!(
					code = %course.code,
					section = %course.section,
					"no meeting pattern, leaving out of calendar"
				),
			}

			Ok(calendar)
		},
	)
}

/// Parses a schedule page and builds its calendar.
pub fn from_html(html: &str, identity: &str, config: &Config) -> Result<Calendar> {
	let courses = parse_schedule(html, config)?;

	create_calendar(&courses, identity, config)
}
