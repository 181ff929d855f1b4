use chrono_tz::Tz;

use crate::{schema::RowSchema, TZ};

/// Address of a single cell inside the info table of a course group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPath {
	/// Direct row of the info table.
	pub group: usize,
	/// Row nested anywhere under `group`.
	pub row: usize,
	pub cell: usize,
}

/// Where things live on the schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	/// Class of the table wrapping one course group.
	pub group_class: &'static str,
	/// Class of the cell holding `CODE - TITLE`.
	pub title_class: &'static str,
	/// Class of the nested table with status and section rows.
	pub info_class: &'static str,
	pub status: CellPath,
	/// Direct row of the info table holding the section rows.
	pub sections: usize,
	/// Leading rows of the section table that are headers.
	pub header_rows: usize,
	pub columns: RowSchema,
}

impl Default for Layout {
	fn default() -> Self {
		Self {
			group_class: "PSGROUPBOXWBO",
			title_class: "PAGROUPDIVIDER",
			info_class: "PSGROUPBOX",
			status: CellPath {
				group: 1,
				row: 2,
				cell: 0,
			},
			sections: 2,
			header_rows: 2,
			columns: RowSchema::default(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Config {
	/// Timezone that meeting times and quarter dates are expressed in.
	pub timezone: Tz,
	/// Shown as the calendar name by most clients.
	pub name: String,
	pub layout: Layout,
	/// Skip a course group with a malformed section row instead of failing.
	pub skip_malformed: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			timezone: TZ,
			name: String::from("UC Santa Cruz"),
			layout: Layout::default(),
			skip_malformed: false,
		}
	}
}
