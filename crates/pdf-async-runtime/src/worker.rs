use crate::{QuoteCommand, QuoteUpdate, handlers};
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// Async worker task that processes quote commands one at a time and sends
/// updates.
///
/// Commands run in arrival order and exports never overlap. An export is
/// skipped when a later export to the same file is already queued, so only
/// the newest request for a file is written, at its own place in the queue.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<QuoteCommand>,
    update_tx: mpsc::UnboundedSender<QuoteUpdate>,
) {
    let mut pending: VecDeque<QuoteCommand> = VecDeque::new();

    loop {
        let cmd = match pending.pop_front() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        process_command(cmd, &mut command_rx, &mut pending, &update_tx).await;
    }

    log::debug!("Worker stopped: command channel closed");
}

async fn process_command(
    cmd: QuoteCommand,
    command_rx: &mut mpsc::UnboundedReceiver<QuoteCommand>,
    pending: &mut VecDeque<QuoteCommand>,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    if let Some(target) = cmd.export_target() {
        // Pull in everything queued so far, keeping arrival order
        while let Ok(next_cmd) = command_rx.try_recv() {
            pending.push_back(next_cmd);
        }
        if pending.iter().any(|queued| queued.export_target() == Some(target)) {
            log::debug!(
                "Skipping export to {}, a newer request is queued",
                target.display()
            );
            return;
        }
    }

    match cmd {
        QuoteCommand::CatalogLoad { path } => {
            handlers::handle_catalog_load(path, update_tx).await;
        }
        QuoteCommand::QuoteCalculate {
            header,
            catalog,
            selection,
            tax_rate,
        } => {
            handlers::handle_quote_calculate(header, &catalog, &selection, tax_rate, update_tx);
        }
        QuoteCommand::PlanPages {
            raster_width,
            raster_height,
            options,
        } => {
            handlers::handle_plan_pages(raster_width, raster_height, &options, update_tx);
        }
        QuoteCommand::Export {
            sheet_path,
            options,
        } => {
            handlers::handle_export(sheet_path, options, update_tx).await;
        }
        QuoteCommand::ExportQuote { sheet, options } => {
            handlers::handle_export_quote(&sheet, options, update_tx).await;
        }
    }
}
