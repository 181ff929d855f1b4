use std::io::Read;

use select::{
	document::Document,
	node::Node,
	predicate::{And, Class, Name},
};
use tracing::{debug, info, trace, warn};

use crate::{
	config::{Config, Layout},
	course::{parse_date_range, Course, Status},
	schema::SectionRow,
	Error, Result,
};

/// Direct rows of a table, looking through the `tbody` inserted by the parser.
fn rows(table: Node<'_>) -> Vec<Node<'_>> {
	table
		.children()
		.flat_map(|child| match child.name() {
			Some("tr") => vec![child],
			Some("thead" | "tbody" | "tfoot") => child
				.children()
				.filter(|n| n.name() == Some("tr"))
				.collect(),
			_ => Vec::new(),
		})
		.collect()
}

/// Rows anywhere below `node`, not including `node` itself.
fn nested_rows<'a>(node: Node<'a>) -> impl Iterator<Item = Node<'a>> + 'a {
	node.find(Name("tr"))
		.filter(move |n| n.index() != node.index())
}

fn cells(row: Node<'_>) -> Vec<String> {
	row.children()
		.filter(|n| n.name() == Some("td"))
		.map(|n| n.text().trim().to_string())
		.collect()
}

fn parse_section(code: &str, title: &str, waitlisted: bool, row: &SectionRow) -> Result<Course> {
	let (start_date, end_date) = parse_date_range(row.dates)?;

	Ok(Course {
		code: code.to_string(),
		title: title.to_string(),
		section: row.section.to_string(),
		component: row.component.into(),
		waitlisted,
		instructor: row.instructor.to_string(),
		start_date,
		end_date,
		room: row.room.to_string(),
		meeting: row.meeting.parse()?,
	})
}

/// Parses one course group. Groups that don't look like a course, or that
/// were dropped, produce no courses.
fn parse_group(group: Node<'_>, layout: &Layout) -> Result<Vec<Course>> {
	let Some(title) = group.find(Class(layout.title_class)).next() else {
		debug!("skipping course group without a title");
		return Ok(Vec::new());
	};

	let title = title.text();
	let title = title.trim();
	let (code, title) = title.split_once(" - ").unwrap_or((title, ""));

	let Some(info) = group
		.find(And(Name("table"), Class(layout.info_class)))
		.next()
	else {
		debug!(code, "skipping course group without an info table");
		return Ok(Vec::new());
	};

	let groups = rows(info);
	let status = groups
		.get(layout.status.group)
		.and_then(|&g| nested_rows(g).nth(layout.status.row))
		.and_then(|row| row.find(Name("td")).nth(layout.status.cell));

	let Some(status) = status else {
		debug!(code, "skipping course group without an enrollment status");
		return Ok(Vec::new());
	};

	let status = Status::from(status.text().as_str());

	if status == Status::Dropped {
		info!(code, title, "skipping dropped course");
		return Ok(Vec::new());
	}

	let waitlisted = status == Status::Waiting;

	let Some(&sections) = groups.get(layout.sections) else {
		debug!(code, "skipping course group without sections");
		return Ok(Vec::new());
	};

	let mut courses = Vec::new();

	for row in nested_rows(sections).skip(layout.header_rows) {
		let values = cells(row);

		let Some(row) = layout.columns.extract(&values) else {
			warn!(code, cells = values.len(), "skipping short section row");
			continue;
		};

		let course =
			parse_section(code, title, waitlisted, &row).map_err(|source| Error::Section {
				code: code.to_string(),
				section: row.section.to_string(),
				source: Box::new(source),
			})?;

		trace!(code, section = %course.section, "parsed section");
		courses.push(course);
	}

	Ok(courses)
}

/// Extracts every course on the schedule page, in page order.
pub fn parse_document(document: &Document, config: &Config) -> Result<Vec<Course>> {
	let layout = &config.layout;
	let mut courses = Vec::new();

	for group in document.find(And(Name("table"), Class(layout.group_class))) {
		match parse_group(group, layout) {
			Ok(group) => courses.extend(group),
			Err(error) if config.skip_malformed => {
				warn!(%error, "skipping course group with a malformed section");
			}
			Err(error) => return Err(error),
		}
	}

	Ok(courses)
}

pub fn parse_schedule(html: &str, config: &Config) -> Result<Vec<Course>> {
	parse_document(&Document::from(html), config)
}

pub fn parse_from_buf<R: Read>(reader: R, config: &Config) -> Result<Vec<Course>> {
	let document = Document::from_read(reader)?;

	parse_document(&document, config)
}

#[cfg(test)]
mod tests {
	use chrono::{NaiveDate, NaiveTime};

	use super::*;
	use crate::{course::Component, weekday::Weekday};

	fn row(cells: &[&str]) -> String {
		let cells: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
		format!("<tr>{cells}</tr>")
	}

	fn group(title: &str, status: &str, sections: &[[&str; 7]]) -> String {
		let sections: String = sections.iter().map(|cells| row(cells)).collect();

		group_with_rows(title, status, &sections)
	}

	fn group_with_rows(title: &str, status: &str, sections: &str) -> String {
		format!(
			r#"<table class="PSGROUPBOXWBO">
				<tr><td class="PAGROUPDIVIDER">{title}</td></tr>
				<tr><td><table class="PSGROUPBOX">
					<tr><td>Collapse section</td></tr>
					<tr><td><table>
						<tr><th>Status</th><th>Units</th></tr>
						<tr><td>&nbsp;</td></tr>
						<tr><td>{status}</td><td>5.00</td></tr>
					</table></td></tr>
					<tr><td><table>
						<tr><td>Class Nbr</td><td>Section</td><td>Component</td></tr>
						<tr><td>&nbsp;</td></tr>
						{sections}
					</table></td></tr>
				</table></td></tr>
			</table>"#
		)
	}

	const LECTURE: [&str; 7] = [
		"50123",
		"01",
		"Lecture",
		"MoWeFr 11:40AM - 1:15PM",
		"Classroom Unit 002",
		"Daniel Fremont",
		"01/08/2024 - 03/15/2024",
	];

	const DISCUSSION: [&str; 7] = [
		"50124",
		"01B",
		"Discussion",
		"Tu 9:00AM - 10:05AM",
		"Engineering 2 192",
		"Staff",
		"01/08/2024 - 03/15/2024",
	];

	fn html(groups: &[String]) -> String {
		format!("<html><body>{}</body></html>", groups.concat())
	}

	#[test]
	fn extracts_sections_in_order() {
		let html = html(&[group(
			"CSE 101M - Math Thinking for CS",
			"Enrolled",
			&[LECTURE, DISCUSSION],
		)]);
		let courses = parse_schedule(&html, &Config::default()).unwrap();

		assert_eq!(courses.len(), 2);

		let lecture = &courses[0];
		assert_eq!(lecture.code, "CSE 101M");
		assert_eq!(lecture.title, "Math Thinking for CS");
		assert_eq!(lecture.section, "01");
		assert_eq!(lecture.component, Component::Lecture);
		assert!(!lecture.waitlisted);
		assert_eq!(lecture.instructor, "Daniel Fremont");
		assert_eq!(lecture.room, "Classroom Unit 002");
		assert_eq!(lecture.start_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
		assert_eq!(lecture.end_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
		assert_eq!(
			lecture.meeting.weekdays,
			vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
		);

		let discussion = &courses[1];
		assert_eq!(discussion.code, "CSE 101M");
		assert_eq!(discussion.section, "01B");
		assert_eq!(discussion.component, Component::Discussion);
		assert_eq!(discussion.meeting.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
	}

	#[test_log::test]
	fn skips_dropped_groups() {
		let html = html(&[
			group("CSE 30 - Programming Abstractions", "Dropped", &[LECTURE]),
			group("MATH 19A - Calculus", "Enrolled", &[LECTURE]),
		]);
		let courses = parse_schedule(&html, &Config::default()).unwrap();

		assert_eq!(courses.len(), 1);
		assert_eq!(courses[0].code, "MATH 19A");
	}

	#[test]
	fn waitlisted_groups() {
		let html = html(&[
			group("CSE 130 - Principles of Computer Systems", "Waiting", &[
				LECTURE, DISCUSSION,
			]),
			group("CSE 101 - Algorithms", "Pending", &[LECTURE]),
		]);
		let courses = parse_schedule(&html, &Config::default()).unwrap();

		assert_eq!(courses.len(), 3);
		assert!(courses[0].waitlisted);
		assert!(courses[1].waitlisted);
		assert!(!courses[2].waitlisted);
	}

	#[test_log::test]
	fn skips_groups_without_structure() {
		let html = html(&[
			r#"<table class="PSGROUPBOXWBO"><tr><td>Legend</td></tr></table>"#.to_string(),
			r#"<table class="PSGROUPBOXWBO"><tr><td class="PAGROUPDIVIDER">CSE 12 - Computer Systems</td></tr></table>"#.to_string(),
			group("CSE 16 - Applied Discrete Math", "Enrolled", &[LECTURE]),
		]);
		let courses = parse_schedule(&html, &Config::default()).unwrap();

		assert_eq!(courses.len(), 1);
		assert_eq!(courses[0].code, "CSE 16");
	}

	#[test]
	fn malformed_section_is_fatal() {
		let mut bad = LECTURE;
		bad[3] = "MoXx 11:40AM - 1:15PM";

		let html = html(&[group("CSE 101M - Math Thinking for CS", "Enrolled", &[bad])]);
		let error = parse_schedule(&html, &Config::default()).unwrap_err();

		assert!(matches!(
			error,
			Error::Section { ref code, ref section, .. } if code == "CSE 101M" && section == "01"
		));
	}

	#[test_log::test]
	fn malformed_section_can_be_skipped() {
		let mut bad = LECTURE;
		bad[6] = "01/08/2024";

		let html = html(&[
			group("CSE 101M - Math Thinking for CS", "Enrolled", &[bad]),
			group("CSE 16 - Applied Discrete Math", "Enrolled", &[LECTURE]),
		]);
		let config = Config {
			skip_malformed: true,
			..Config::default()
		};
		let courses = parse_schedule(&html, &config).unwrap();

		assert_eq!(courses.len(), 1);
		assert_eq!(courses[0].code, "CSE 16");
	}

	#[test]
	fn unscheduled_sections_are_kept() {
		let mut online = LECTURE;
		online[3] = "TBA";

		let html = html(&[group("CSE 20 - Beginning Programming", "Enrolled", &[online])]);
		let courses = parse_schedule(&html, &Config::default()).unwrap();

		assert_eq!(courses.len(), 1);
		assert!(!courses[0].meeting.is_recurring());
	}

	#[test_log::test]
	fn short_rows_do_not_drop_the_group() {
		let spacer = "<tr><td>&nbsp;</td></tr>";
		let rows = format!("{}{spacer}{}{spacer}", row(&LECTURE), row(&DISCUSSION));
		let html = html(&[group_with_rows("CSE 16 - Applied Discrete Math", "Enrolled", &rows)]);
		let courses = parse_schedule(&html, &Config::default()).unwrap();
		let sections: Vec<_> = courses.iter().map(|c| c.section.as_str()).collect();

		assert_eq!(sections, ["01", "01B"]);
	}

	#[test]
	fn reads_from_buffer() {
		let html = html(&[group("CSE 16 - Applied Discrete Math", "Enrolled", &[LECTURE])]);
		let courses = parse_from_buf(html.as_bytes(), &Config::default()).unwrap();

		assert_eq!(courses.len(), 1);
	}
}
