use std::sync::mpsc;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{io, services};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("subtext-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

/// Commands are handled one at a time in arrival order. Results carry their
/// ticket, so the UI never depends on that order.
fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Open { image } => {
                io::handle_open(image, &tx, &ctx);
            }
            WorkerCommand::Recognize {
                ticket,
                pixels,
                ocr,
                translation,
            } => {
                services::handle_recognize(ticket, &pixels, &ocr, translation.as_ref(), &tx, &ctx);
            }
            WorkerCommand::Translate {
                ticket,
                text,
                translation,
            } => {
                services::handle_translate(ticket, &text, &translation, &tx, &ctx);
            }
            WorkerCommand::TranslateFile { path, translation } => {
                io::handle_translate_file(&path, &translation, &tx, &ctx);
            }
        }
    }
}
