mod state;
mod ui;
mod worker;

use crate::error::{ValidationError, FALLBACK_ERROR_MESSAGE};
use crate::upload::{BackendHealth, ExtractionClient, SelectedFile, UploadEvent};
use crate::utils::video_types::{VideoTypes, SUPPORTED_EXTENSIONS};
use eframe::{egui, App};
use state::{ClientState, Submission};
use std::sync::mpsc as std_mpsc;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use worker::{probe_health, run_extraction};

enum AppEvent {
    Upload { id: u64, event: UploadEvent },
    Health(BackendHealth),
}

pub struct FrameExtractorApp {
    client: ExtractionClient,
    state: ClientState,
    event_sender: std_mpsc::Sender<AppEvent>,
    event_receiver: std_mpsc::Receiver<AppEvent>,
    cancel_sender: Option<oneshot::Sender<()>>,
}

impl FrameExtractorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, client: ExtractionClient) -> Self {
        info!(
            "Initializing Frame Extractor against {}",
            client.config().base_url()
        );
        let (event_sender, event_receiver) = std_mpsc::channel();
        let mut app = Self {
            client,
            state: ClientState::default(),
            event_sender,
            event_receiver,
            cancel_sender: None,
        };
        app.check_health(&cc.egui_ctx);
        app
    }

    pub fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Video", &SUPPORTED_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        if !VideoTypes::is_supported(&path) {
            warn!("{} does not look like a supported video", path.display());
        }

        match SelectedFile::from_path(path.clone()) {
            Ok(file) => self.state.select_file(file),
            Err(e) => {
                error!("Could not read {}: {}", path.display(), e);
                self.state.reject_selection(ValidationError::UnreadableFile);
            }
        }
    }

    pub fn start_upload(&mut self, ctx: &egui::Context) {
        let Some(Submission { id, file }) = self.state.begin_submit() else {
            return;
        };
        info!("Starting submission {} for '{}'", id, file.name);

        let (cancel_sender, cancel_receiver) = oneshot::channel();
        self.cancel_sender = Some(cancel_sender);

        let client = self.client.clone();
        let sender = self.event_sender.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let send = |event: UploadEvent| {
                sender.send(AppEvent::Upload { id, event }).unwrap_or_default();
                ctx.request_repaint();
            };

            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to start upload runtime: {}", e);
                    send(UploadEvent::Failed(FALLBACK_ERROR_MESSAGE.to_string()));
                    return;
                }
            };

            let progress_sender = sender.clone();
            let progress_ctx = ctx.clone();
            let on_progress = move |update| {
                progress_sender
                    .send(AppEvent::Upload {
                        id,
                        event: UploadEvent::Progress(update),
                    })
                    .unwrap_or_default();
                progress_ctx.request_repaint();
            };

            let event = rt.block_on(run_extraction(
                &client,
                id,
                &file,
                cancel_receiver,
                on_progress,
            ));
            send(event);
        });
    }

    pub fn cancel_upload(&mut self) {
        if let Some(cancel_sender) = self.cancel_sender.take() {
            info!("Cancelling in-flight upload");
            cancel_sender.send(()).unwrap_or_default();
        }
    }

    pub fn download(&self) {
        let Some(url) = self.state.download_url(self.client.config()) else {
            return;
        };
        info!("Opening {}", url);
        if let Err(e) = open::that(&url) {
            error!("Failed to open download link: {}", e);
        }
    }

    pub fn reset(&mut self) {
        info!("Resetting application state");
        self.cancel_upload();
        self.state.reset();
    }

    pub fn check_health(&mut self, ctx: &egui::Context) {
        self.state.backend_health = BackendHealth::Checking;

        let client = self.client.clone();
        let sender = self.event_sender.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let health = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(probe_health(&client)),
                Err(e) => BackendHealth::Offline(e.to_string()),
            };
            info!("Backend health: {:?}", health);
            sender.send(AppEvent::Health(health)).unwrap_or_default();
            ctx.request_repaint();
        });
    }

    pub fn update_state(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                AppEvent::Upload { id, event } => {
                    self.state.apply(id, event);
                    if !self.state.upload.is_uploading {
                        self.cancel_sender = None;
                    }
                }
                AppEvent::Health(health) => self.state.backend_health = health,
            }
        }
    }
}

impl App for FrameExtractorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.render(ctx);
    }
}
