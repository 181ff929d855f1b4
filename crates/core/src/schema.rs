//! Positions of the fields inside a section row.
//!
//! The schedule page lays out section rows positionally, so the mapping from
//! field to cell index lives here instead of being spread across the parser.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
	Section,
	Component,
	Meeting,
	Room,
	Instructor,
	Dates,
}

impl Field {
	pub const ALL: [Self; 6] = [
		Self::Section,
		Self::Component,
		Self::Meeting,
		Self::Room,
		Self::Instructor,
		Self::Dates,
	];
}

/// The cells of one section row, borrowed from the parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRow<'a> {
	pub section: &'a str,
	pub component: &'a str,
	pub meeting: &'a str,
	pub room: &'a str,
	pub instructor: &'a str,
	pub dates: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
	// indexed by `Field as usize`
	positions: [usize; 6],
}

impl RowSchema {
	/// Builds a schema, checking that every field is placed exactly once and
	/// that no two fields share a cell.
	pub fn new(columns: &[(Field, usize)]) -> Result<Self> {
		let mut positions = [None; 6];

		for &(field, index) in columns {
			let slot = &mut positions[field as usize];

			if slot.is_some() {
				return Err(Error::Schema(format!("{field:?} is placed twice")));
			}

			if let Some((other, _)) = columns
				.iter()
				.find(|&&(other, i)| i == index && other != field)
			{
				return Err(Error::Schema(format!(
					"{field:?} and {other:?} share cell {index}"
				)));
			}

			*slot = Some(index);
		}

		let mut resolved = [0; 6];

		for field in Field::ALL {
			resolved[field as usize] = positions[field as usize]
				.ok_or_else(|| Error::Schema(format!("{field:?} is missing")))?;
		}

		Ok(Self {
			positions: resolved,
		})
	}

	#[must_use]
	pub fn position(&self, field: Field) -> usize {
		self.positions[field as usize]
	}

	/// Minimum number of cells a row needs.
	#[must_use]
	pub fn width(&self) -> usize {
		self.positions.iter().max().map_or(0, |&max| max + 1)
	}

	/// Returns `None` if the row is too short to hold every field.
	#[must_use]
	pub fn extract<'a, S: AsRef<str>>(&self, cells: &'a [S]) -> Option<SectionRow<'a>> {
		if cells.len() < self.width() {
			return None;
		}

		let cell = |field| cells[self.position(field)].as_ref();

		Some(SectionRow {
			section: cell(Field::Section),
			component: cell(Field::Component),
			meeting: cell(Field::Meeting),
			room: cell(Field::Room),
			instructor: cell(Field::Instructor),
			dates: cell(Field::Dates),
		})
	}
}

impl Default for RowSchema {
	/// The first cell holds the class number, which is unused.
	fn default() -> Self {
		Self {
			positions: [1, 2, 3, 4, 5, 6],
		}
	}
}
