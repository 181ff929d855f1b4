#![warn(clippy::pedantic)]

use std::{
	fs::File,
	io::{BufReader, Write},
	path::{Path, PathBuf},
};

use anyhow::Context;
use chrono_tz::Tz;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ucsc2ics_core::{Config, Course};

#[derive(Parser)]
#[clap(about = "Convert a saved UCSC class schedule page into an iCalendar file")]
struct Args {
	/// Saved schedule page. Read from stdin when omitted.
	#[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
	path: Option<PathBuf>,
	#[clap(short, long, value_hint = clap::ValueHint::FilePath)]
	output: Option<PathBuf>,
	/// Added to every event UID, e.g. your CruzID.
	#[clap(short, long)]
	user: String,
	/// IANA timezone the schedule is written in.
	#[clap(short, long, default_value = "America/Los_Angeles")]
	timezone: Tz,
	/// Leave out classes with unreadable meeting times or dates instead of failing.
	#[clap(long)]
	skip_malformed: bool,
}

fn parse_from_file(path: Option<&Path>, config: &Config) -> anyhow::Result<Vec<Course>> {
	let courses = if let Some(path) = path {
		let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
		ucsc2ics_core::parse_from_buf(BufReader::new(file), config)?
	} else {
		ucsc2ics_core::parse_from_buf(std::io::stdin().lock(), config)?
	};

	Ok(courses)
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let config = Config {
		timezone: args.timezone,
		skip_malformed: args.skip_malformed,
		..Config::default()
	};

	let courses = parse_from_file(args.path.as_deref(), &config)?;
	let calendar = ucsc2ics_core::create_calendar(&courses, &args.user, &config)?;

	info!(
		courses = courses.len(),
		events = calendar.events.len(),
		"generated calendar"
	);

	if let Some(output) = args.output {
		let mut file =
			File::create(&output).with_context(|| format!("creating {}", output.display()))?;
		write!(&mut file, "{calendar}")?;
	} else {
		write!(&mut std::io::stdout(), "{calendar}")?;
	}

	Ok(())
}
