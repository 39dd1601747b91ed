use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, trace, warn};

use verimail_client::VerificationApi;
use verimail_ingest::{
    Delimiter, ExtractOptions, IngestSession, read_text_file_async, split_address_input,
};
use verimail_model::{Reachability, ResultSet};
use verimail_present::{
    Column, PendingIndicator, SortState, Submission, TableView, VirtualWindow, build_summary,
};
use verimail_store::{SessionStore, StoragePort};

use crate::logging::redact_value;
use crate::progress::Spinner;
use crate::summary::{RESULT_ROW_HEIGHT, Styling, chart_lines, render_view, viewport_rows};

/// Input for [`run_extract`].
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub path: PathBuf,
    pub delimiter: Delimiter,
    pub column: Option<String>,
    pub trim: bool,
    /// Append the extracted addresses to the stored list.
    pub insert: bool,
}

/// What an extraction found.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    pub headers: Vec<String>,
    pub selected: Option<String>,
    /// `false` when an explicit column matched no header.
    pub column_known: bool,
    pub addresses: Vec<String>,
    pub summary: Option<String>,
    /// Length of the stored list after an insert.
    pub stored: Option<usize>,
}

#[tracing::instrument(skip_all, fields(path = %request.path.display()))]
pub async fn run_extract<S: StoragePort>(
    session: &mut SessionStore<S>,
    request: &ExtractRequest,
) -> Result<ExtractOutcome> {
    let text = read_text_file_async(request.path.clone())
        .await
        .with_context(|| format!("read {}", request.path.display()))?;

    let options = if request.trim {
        ExtractOptions::strict()
    } else {
        ExtractOptions::default()
    };
    let mut ingest = IngestSession::new(request.delimiter).with_options(options);
    ingest.load_text(text);

    let column_known = match &request.column {
        Some(column) => ingest.select_column(column.clone()),
        None => true,
    };
    if !column_known {
        warn!(column = ?request.column, "Selected column is not among the headers");
    }

    let outcome_summary = ingest.summary();
    let headers = ingest.headers().to_vec();
    let selected = ingest.selected_column().map(str::to_string);
    let addresses = ingest.take_addresses();
    for address in &addresses {
        trace!(address = redact_value(address), "Extracted address");
    }
    info!(
        headers = headers.len(),
        addresses = addresses.len(),
        "Extraction finished"
    );

    let stored = if request.insert && !addresses.is_empty() {
        let list = session
            .append_addresses(addresses.iter().cloned())
            .context("store extracted addresses")?;
        Some(list.len())
    } else {
        None
    };

    Ok(ExtractOutcome {
        headers,
        selected,
        column_known,
        addresses,
        summary: outcome_summary,
        stored,
    })
}

/// Appends typed addresses to the stored list and returns the new list.
pub fn run_add<S: StoragePort>(
    session: &mut SessionStore<S>,
    inputs: &[String],
) -> Result<Vec<String>> {
    let addresses: Vec<String> = inputs
        .iter()
        .flat_map(|text| split_address_input(text))
        .collect();
    if addresses.is_empty() {
        bail!("no addresses given");
    }
    for address in &addresses {
        trace!(address = redact_value(address), "Adding address");
    }
    session
        .append_addresses(addresses)
        .context("store addresses")
}

/// Result of a successful check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub results: ResultSet,
    /// Set when the verdicts could not be persisted.
    pub storage_warning: Option<String>,
}

/// Submits the stored list (or `replace`, which becomes the stored list).
///
/// The spinner is driven by a [`PendingIndicator`], so fast responses never
/// flash it.
pub async fn run_check<S, A>(
    session: &mut SessionStore<S>,
    api: &A,
    replace: &[String],
    spinner: &mut Spinner,
) -> Result<CheckOutcome>
where
    S: StoragePort,
    A: VerificationApi,
{
    if !replace.is_empty() {
        let addresses: Vec<String> = replace
            .iter()
            .flat_map(|text| split_address_input(text))
            .collect();
        session
            .save_addresses(&addresses)
            .context("store addresses")?;
    }

    let addresses = session.addresses();
    if addresses.is_empty() {
        bail!("no addresses to check; add some with `verimail add` or `verimail extract --insert`");
    }

    let mut submission = Submission::default();
    submission.begin(addresses.len())?;
    info!(count = addresses.len(), "Checking addresses");

    match await_with_indicator(api.check(&addresses), spinner).await {
        Ok(results) => {
            for message in results.consistency_warnings() {
                warn!("{message}");
            }
            let storage_warning = match session.save_results(&results) {
                Ok(()) => None,
                Err(e) => {
                    warn!(error = %e, "Failed to persist verdicts");
                    Some(e.user_message())
                }
            };
            submission.succeed(results.clone())?;
            Ok(CheckOutcome {
                results,
                storage_warning,
            })
        }
        Err(e) => {
            submission.fail(e.user_message())?;
            let message = submission.error_message().unwrap_or_default();
            warn!(retryable = e.is_retryable(), "{message}");
            Err(anyhow!(message.to_string()))
        }
    }
}

/// Awaits `future` while a pending indicator decides when to draw.
///
/// Timing reads the tokio clock, so a paused runtime drives it too.
pub async fn await_with_indicator<F: Future>(future: F, spinner: &mut Spinner) -> F::Output {
    let now = || tokio::time::Instant::now().into_std();
    let mut indicator = PendingIndicator::new();
    indicator.start(now());
    tokio::pin!(future);

    let output = loop {
        let Some(deadline) = indicator.next_deadline() else {
            break future.as_mut().await;
        };
        tokio::select! {
            output = future.as_mut() => break output,
            () = tokio::time::sleep_until(deadline.into()) => {
                spinner.set_visible(indicator.tick(now()));
            }
        }
    };

    indicator.finish(now());
    let remaining = indicator.remaining_visible(now());
    if !remaining.is_zero() {
        debug!(?remaining, "Holding indicator for its minimum time");
        tokio::time::sleep(remaining).await;
    }
    indicator.tick(now());
    spinner.set_visible(false);
    output
}

/// Input for [`run_show`].
#[derive(Debug, Clone, Default)]
pub struct ShowRequest {
    pub search: Option<String>,
    pub status: Option<Reachability>,
    /// Columns clicked in order; each advances that column's sort cycle.
    pub sort: Vec<Column>,
    pub offset: usize,
}

/// Builds the table view from stored verdicts and the persisted sort.
pub fn restore_view<S: StoragePort>(
    session: &SessionStore<S>,
    results: &ResultSet,
) -> TableView {
    let mut view = TableView::from_results(results);
    view.set_sort(session.view::<SortState>());
    view
}

/// Renders stored verdicts, or `None` when nothing was checked yet.
pub fn run_show<S: StoragePort>(
    session: &mut SessionStore<S>,
    request: &ShowRequest,
    terminal_rows: u16,
    styling: Styling,
) -> Result<Option<String>> {
    let Some(results) = session.results() else {
        return Ok(None);
    };

    let mut view = restore_view(session, &results);
    view.set_status_filter(request.status)?;
    if !request.sort.is_empty() {
        for column in &request.sort {
            view.toggle_sort(*column);
        }
        session.save_view(&view.sort()).context("store sort order")?;
    }
    if let Some(search) = &request.search {
        view.set_global_filter(search);
    }

    let show_chart = session.show_chart();
    let window = window_for(&view, &results, show_chart, terminal_rows, request.offset);
    Ok(Some(render_view(&view, &results, window, show_chart, styling)))
}

/// The visible window for `offset`, clamped to the last full page.
pub fn window_for(
    view: &TableView,
    results: &ResultSet,
    show_chart: bool,
    terminal_rows: u16,
    offset: usize,
) -> VirtualWindow {
    let chart = if show_chart {
        chart_lines(&build_summary(&results.stats))
    } else {
        0
    };
    let viewport = viewport_rows(terminal_rows, chart);
    let row_count = view.row_count();
    let max = VirtualWindow::max_scroll_offset(viewport, RESULT_ROW_HEIGHT, row_count);
    VirtualWindow::compute(offset.min(max), viewport, RESULT_ROW_HEIGHT, row_count, 0)
}

/// Chart visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartAction {
    Show,
    Hide,
    Toggle,
}

/// Applies `action` and returns the resulting visibility.
pub fn run_chart<S: StoragePort>(
    session: &mut SessionStore<S>,
    action: Option<ChartAction>,
) -> Result<bool> {
    let current = session.show_chart();
    let next = match action {
        None => return Ok(current),
        Some(ChartAction::Show) => true,
        Some(ChartAction::Hide) => false,
        Some(ChartAction::Toggle) => !current,
    };
    session
        .set_show_chart(next)
        .context("store chart preference")?;
    Ok(next)
}

/// Clears the stored list and verdicts.
pub fn run_reset<S: StoragePort>(session: &mut SessionStore<S>) -> Result<()> {
    session.reset().context("clear stored session")?;
    info!("Session cleared");
    Ok(())
}
