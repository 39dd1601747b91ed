//! Line-driven result browser.
//!
//! Reads one command per line and redraws after each change. Search text is
//! debounced so a burst of edits filters once.

use std::io::Write;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use verimail_model::{Reachability, ResultSet};
use verimail_present::{Column, Debouncer, SortState, TableView};
use verimail_store::{SessionStore, StoragePort};

use crate::commands::{restore_view, window_for};
use crate::summary::{Styling, render_view, terminal_size};

const HELP: &str = "/TEXT search  status STATUS|all  sort COLUMN  j k pgdn pgup scroll  chart  q quit";
const PROMPT: &str = "> ";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// `/text`; an empty text clears the search.
    Search(String),
    /// `status safe`, `status all`.
    Status(Option<Reachability>),
    Sort(Column),
    Down,
    Up,
    PageDown,
    PageUp,
    ToggleChart,
    /// A blank line.
    Redraw,
    Help,
    Quit,
    Unknown(String),
}

impl FromStr for BrowseCommand {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(text) = line.strip_prefix('/') {
            return Ok(BrowseCommand::Search(text.to_string()));
        }
        let trimmed = line.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "status" if rest.eq_ignore_ascii_case("all") || rest.is_empty() => {
                BrowseCommand::Status(None)
            }
            "status" => match rest.parse::<Reachability>() {
                Ok(status) => BrowseCommand::Status(Some(status)),
                Err(_) => BrowseCommand::Unknown(trimmed.to_string()),
            },
            "sort" => match rest.parse::<Column>() {
                Ok(column) => BrowseCommand::Sort(column),
                Err(_) => BrowseCommand::Unknown(trimmed.to_string()),
            },
            "j" | "down" => BrowseCommand::Down,
            "k" | "up" => BrowseCommand::Up,
            "pgdn" => BrowseCommand::PageDown,
            "pgup" => BrowseCommand::PageUp,
            "chart" => BrowseCommand::ToggleChart,
            "" => BrowseCommand::Redraw,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            _ => BrowseCommand::Unknown(trimmed.to_string()),
        };
        Ok(command)
    }
}

/// Interactive view over stored verdicts.
pub struct Browser<'a, S: StoragePort> {
    session: &'a mut SessionStore<S>,
    results: ResultSet,
    view: TableView,
    offset: usize,
    show_chart: bool,
    search: Debouncer<String>,
    styling: Styling,
    measure_rows: fn() -> u16,
}

impl<'a, S: StoragePort> Browser<'a, S> {
    /// Opens the browser on the stored verdicts, or `None` when there are none.
    pub fn open(session: &'a mut SessionStore<S>, styling: Styling) -> Option<Self> {
        let results = session.results()?;
        let view = restore_view(session, &results);
        let show_chart = session.show_chart();
        Some(Self {
            session,
            results,
            view,
            offset: 0,
            show_chart,
            search: Debouncer::default(),
            styling,
            measure_rows: || terminal_size().1,
        })
    }

    /// Replaces the terminal height probe.
    #[must_use]
    pub fn with_measure(mut self, measure_rows: fn() -> u16) -> Self {
        self.measure_rows = measure_rows;
        self
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Runs until `q` or end of input. A search still waiting on its
    /// debounce window is applied before returning.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.draw(out)?;
        let mut lines = input.lines();

        loop {
            let deadline = self.search.deadline();
            let wake_at = deadline.unwrap_or_else(Instant::now);
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("read input")? else {
                        break;
                    };
                    match line.parse::<BrowseCommand>() {
                        Ok(BrowseCommand::Quit) => break,
                        Ok(command) => self.handle(command, out)?,
                        Err(never) => match never {},
                    }
                }
                () = tokio::time::sleep_until(wake_at.into()), if deadline.is_some() => {
                    if let Some(text) = self.search.poll(Instant::now()) {
                        self.apply_search(&text);
                        self.draw(out)?;
                    }
                }
            }
        }

        if let Some(text) = self.search.flush() {
            self.apply_search(&text);
            self.draw(out)?;
        }
        Ok(())
    }

    fn handle<W: Write>(&mut self, command: BrowseCommand, out: &mut W) -> Result<()> {
        let page = self.page_rows();
        match command {
            BrowseCommand::Search(text) => {
                self.search.input(text, Instant::now());
                return Ok(());
            }
            BrowseCommand::Status(status) => {
                if let Err(e) = self.view.set_status_filter(status) {
                    writeln!(out, "{e}")?;
                    write!(out, "{PROMPT}")?;
                    out.flush()?;
                    return Ok(());
                }
                self.offset = 0;
            }
            BrowseCommand::Sort(column) => {
                self.view.toggle_sort(column);
                self.persist_sort(out)?;
            }
            BrowseCommand::Down => self.offset = self.offset.saturating_add(1),
            BrowseCommand::Up => self.offset = self.offset.saturating_sub(1),
            BrowseCommand::PageDown => self.offset = self.offset.saturating_add(page),
            BrowseCommand::PageUp => self.offset = self.offset.saturating_sub(page),
            BrowseCommand::ToggleChart => {
                self.show_chart = !self.show_chart;
                if let Err(e) = self.session.set_show_chart(self.show_chart) {
                    warn!(error = %e, "Failed to persist chart preference");
                    writeln!(out, "warning: {}", e.user_message())?;
                }
            }
            BrowseCommand::Redraw => {}
            BrowseCommand::Help => {
                writeln!(out, "{HELP}")?;
                write!(out, "{PROMPT}")?;
                out.flush()?;
                return Ok(());
            }
            BrowseCommand::Unknown(line) => {
                writeln!(out, "unknown command: {line}")?;
                writeln!(out, "{HELP}")?;
                write!(out, "{PROMPT}")?;
                out.flush()?;
                return Ok(());
            }
            BrowseCommand::Quit => return Ok(()),
        }
        self.draw(out)
    }

    fn apply_search(&mut self, text: &str) {
        debug!(len = text.len(), "Applying search");
        self.view.set_global_filter(text);
        self.offset = 0;
    }

    fn persist_sort<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let sort: Option<SortState> = self.view.sort();
        if let Err(e) = self.session.save_view(&sort) {
            warn!(error = %e, "Failed to persist sort order");
            writeln!(out, "warning: {}", e.user_message())?;
        }
        Ok(())
    }

    fn page_rows(&self) -> usize {
        window_for(
            &self.view,
            &self.results,
            self.show_chart,
            (self.measure_rows)(),
            0,
        )
        .len()
        .max(1)
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let window = window_for(
            &self.view,
            &self.results,
            self.show_chart,
            (self.measure_rows)(),
            self.offset,
        );
        self.offset = window.start;
        let rendered = render_view(
            &self.view,
            &self.results,
            window,
            self.show_chart,
            self.styling,
        );
        writeln!(out, "{rendered}")?;
        write!(out, "{PROMPT}")?;
        out.flush()?;
        Ok(())
    }
}
