// src/gui/app.rs
use std::{error::Error, sync::Arc, thread, time::Duration};

use eframe::egui;

use crate::{
    config::{options::AppOptions, state::AppState},
    core::net::{Fetch, HttpFetcher},
    file::normalize_dir_path,
    scrape,
};

use super::progress::{board, GuiProgress, SharedStatus, Stage, StatusBoard};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "docskel",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // status/progress (workers write here)
    pub status: SharedStatus,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let status = StatusBoard::shared(state.gui.max_log_lines);
        logf!("Init: destination={:?}", state.gui.destination_text);
        Self { state, status }
    }

    #[inline]
    pub fn running(&self) -> bool {
        board(&self.status).running
    }

    /// Mirror the text fields → options.
    pub fn sync_fields_into_options(&mut self) {
        let gui = &self.state.gui;
        let mut opts = AppOptions::with_destination(normalize_dir_path(&gui.destination_text));
        opts.fetch.parse_only = self.state.options.fetch.parse_only;
        opts.fetch.only = gui
            .only_text
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        self.state.options = opts;
    }

    /// Start a run on a worker thread. The UI only polls the status board.
    pub fn generate(&mut self) {
        if self.state.gui.destination_text.trim().is_empty() {
            board(&self.status).push_log("Pick a destination folder first");
            return;
        }
        self.sync_fields_into_options();
        let opts = self.state.options.clone();

        {
            let mut b = board(&self.status);
            b.running = true;
            b.log.clear();
            b.push_log(format!("Generating into {}", opts.output.out_root().display()));
        }
        logf!("Generate: begin out={} only={:?}", opts.output.out_root().display(), opts.fetch.only);

        let status = self.status.clone();
        let spawned = thread::Builder::new().name(s!("run")).spawn(move || {
            let result = HttpFetcher::new().and_then(|f| {
                let fetcher: Arc<dyn Fetch> = Arc::new(f);
                scrape::run(
                    &opts,
                    fetcher,
                    GuiProgress::boxed(&status, Stage::Fetch),
                    GuiProgress::boxed(&status, Stage::Parse),
                )
            });

            let mut b = board(&status);
            match result {
                Ok(summary) => {
                    let p = &summary.parse;
                    b.push_log(format!(
                        "Done: {} written, {} not implemented, {} failed, {} never fetched",
                        p.written.len(),
                        p.not_implemented.len(),
                        p.failed.len(),
                        p.pending.len()
                    ));
                }
                Err(e) => {
                    loge!("Generate: {e}");
                    b.push_log(format!("Error: {e}"));
                }
            }
            b.running = false;
        });

        if let Err(e) = spawned {
            loge!("Generate: could not start worker: {e}");
            let mut b = board(&self.status);
            b.running = false;
            b.push_log(format!("Error: {e}"));
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let running = self.running();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Destination:");
                ui.add_enabled(
                    !running,
                    egui::TextEdit::singleline(&mut self.state.gui.destination_text)
                        .desired_width(360.0)
                        .hint_text("folder for pages and skeletons"),
                );
                if ui.add_enabled(!running, egui::Button::new("Generate")).clicked() {
                    self.generate();
                }
                if running {
                    ui.spinner();
                }
            });
            ui.horizontal(|ui| {
                ui.label("Only:");
                ui.add_enabled(
                    !running,
                    egui::TextEdit::singleline(&mut self.state.gui.only_text)
                        .desired_width(360.0)
                        .hint_text("java.lang., java.util."),
                );
                ui.add_enabled(
                    !running,
                    egui::Checkbox::new(&mut self.state.options.fetch.parse_only, "Cached pages only"),
                );
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let b = board(&self.status);
            ui.label(&b.fetch);
            ui.label(&b.parse);
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &b.log {
                        ui.monospace(line);
                    }
                });
        });

        if running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
