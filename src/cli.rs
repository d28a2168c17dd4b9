// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ArgAction;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::REFERENCE_TZ;
use crate::config::options::{ExportFormat, ScrapeOptions, ViewOptions};
use crate::data::DocumentView;
use crate::model::DeadlineCategory;
use crate::progress::Progress;
use crate::query::{deadline_note, FilterState, SortMode, StatusMessage};
use crate::{csv, dates, runner};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Fetch the notice page and publish a fresh snapshot
    Scrape(ScrapeArgs),

    /// Show the snapshot, filtered and sorted (default)
    List(ListArgs),
}

#[derive(Debug, clap::Args)]
pub struct ScrapeArgs {
    /// Notice page to scrape
    #[arg(long)]
    url: Option<String>,

    /// Where to write the snapshot JSON
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Default, clap::Args)]
pub struct ListArgs {
    /// Snapshot to read: a local path or an http(s) URL
    #[arg(long)]
    source: Option<String>,

    /// Case-insensitive text to look for in subjects, links, attachments and dates
    #[arg(short, long)]
    search: Option<String>,

    /// deadline-asc | deadline-desc | date-asc | date-desc
    #[arg(long)]
    sort: Option<SortMode>,

    /// Deadline statuses to show (repeatable): due-soon, active, expired, no-deadline
    #[arg(long = "status")]
    statuses: Vec<DeadlineCategory>,

    /// Show every status, including expired and no-deadline
    #[arg(long, conflicts_with = "statuses")]
    all_statuses: bool,

    /// text | csv | tsv | json
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Categorize against this date instead of today (YYYY-MM-DD or ROC 113/05/01)
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    dates::parse_date(s, REFERENCE_TZ).ok_or_else(|| format!("not a date: {s}"))
}

impl Cli {
    pub fn run(self) -> Result<()> {
        crate::log::init(self.verbose);

        match self.command.unwrap_or_else(|| Command::List(ListArgs::default())) {
            Command::Scrape(args) => args.run(),
            Command::List(args) => args.run(),
        }
    }
}

/// Stage lines on stderr.
struct StderrProgress;

impl Progress for StderrProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

impl ScrapeArgs {
    fn options(self) -> ScrapeOptions {
        let mut opts = ScrapeOptions::default();
        if let Some(url) = self.url { opts.url = url; }
        if let Some(out) = self.out { opts.out_path = out; }
        opts
    }

    fn run(self) -> Result<()> {
        let opts = self.options();
        let mut progress = StderrProgress;
        let summary = runner::scrape(&opts, Some(&mut progress as &mut dyn Progress))
            .wrap_err_with(|| format!("scraping {}", opts.url))?;
        println!("Saved {} documents to {}", summary.documents, summary.path.display());
        Ok(())
    }
}

impl ListArgs {
    fn options(self) -> ViewOptions {
        let mut opts = ViewOptions::default();
        if let Some(source) = self.source { opts.source = source; }

        let statuses = if self.all_statuses { DeadlineCategory::ALL.to_vec() } else { self.statuses };
        opts.filters = FilterState::new(
            self.search.as_deref().unwrap_or(""),
            self.sort.unwrap_or_default(),
            statuses,
        );
        opts.format = self.format.unwrap_or_default();
        opts.today = self.today;
        opts
    }

    fn run(self) -> Result<()> {
        let opts = self.options();
        let state = match runner::load_state(&opts) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("{}", StatusMessage::LoadFailed);
                return Err::<(), _>(e).wrap_err_with(|| format!("loading {}", opts.source));
            }
        };

        let view = state.render();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match opts.format {
            ExportFormat::Text => write_listing(&mut out, &view)?,
            ExportFormat::Json => write_json(&mut out, &view)?,
            fmt => {
                let sep = fmt.delim().unwrap_or(',');
                out.write_all(csv::to_export_string(view.iter(), sep).as_bytes())?;
            }
        }
        Ok(())
    }
}

fn write_listing<W: Write>(mut w: W, view: &DocumentView<'_>) -> io::Result<()> {
    writeln!(w, "{}", view.status_message())?;

    for doc in view.iter() {
        let raw = &doc.raw;
        writeln!(w)?;
        writeln!(
            w,
            "[{}] {}",
            doc.deadline_category.badge_text(),
            deadline_note(doc.days_until_deadline)
        )?;
        let subject = if raw.subject.trim().is_empty() { "未提供主旨" } else { raw.subject.as_str() };
        writeln!(w, "  {subject}")?;
        if let Some(url) = &raw.subject_url {
            writeln!(w, "  {url}")?;
        }
        if !raw.date.is_empty() {
            writeln!(w, "  行文日期 {}", raw.date)?;
        }
        if !raw.deadline.is_empty() {
            writeln!(w, "  截止日期 {}", raw.deadline)?;
        }
        if raw.attachments.is_empty() {
            writeln!(w, "  無附件")?;
        }
        for (i, a) in raw.attachments.iter().enumerate() {
            writeln!(w, "  {} {}", a.display_label(i), a.url)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", view.collection().updated_at_label())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonView<'a> {
    status: String,
    filtered_count: usize,
    total_count: usize,
    updated_at: Option<&'a str>,
    documents: Vec<&'a crate::model::EnrichedDocument>,
}

fn write_json<W: Write>(mut w: W, view: &DocumentView<'_>) -> Result<()> {
    let body = JsonView {
        status: view.status_message().to_string(),
        filtered_count: view.filtered_count(),
        total_count: view.total_count(),
        updated_at: view.collection().updated_at(),
        documents: view.iter().collect(),
    };
    serde_json::to_writer_pretty(&mut w, &body)?;
    writeln!(w)?;
    Ok(())
}
