mod backend;
mod update;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use reva_core::screens::{DecorationTypesView, GalleryView};
use reva_core::{Config, Event, ScreenLoader, Session, SubscriptionId, filtered_indices};

use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Ticks (100 ms each) the banner stays up before the event list opens.
const BANNER_TICKS: usize = 15;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Banner,
    Events,
    DecorationTypes(i64), // event id
    Gallery(i64),         // decoration type id
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// A blocking message popup, dismissed with Enter or Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_error: false,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_error: true,
        }
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub theme: Theme,
    pub config: Config,
    pub session: Session,
    /// Kept current by a selection subscriber; read by the header badge.
    pub selected_count: Arc<AtomicUsize>,
    subscription: Option<SubscriptionId>,

    pub events: ScreenLoader<(), Vec<Event>>,
    pub decoration_types: ScreenLoader<i64, DecorationTypesView>,
    pub gallery: ScreenLoader<i64, GalleryView>,
    /// Event whose decoration types were last opened (for Esc from the gallery).
    pub last_event_id: Option<i64>,

    /// Row within the filtered list.
    pub cursor: usize,
    pub input_mode: InputMode,
    pub search_query: String,

    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    pub notice: Option<Notice>,
    /// A PDF export is in flight.
    pub exporting: bool,
    /// Rows of the last rendered table, used for page up/down.
    pub visible_rows: usize,

    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme, config: Config) -> Self {
        let mut session = Session::started();
        let selected_count = Arc::new(AtomicUsize::new(0));
        let subscription = session.selection_mut().ok().map(|store| {
            let count = Arc::clone(&selected_count);
            store.subscribe(move |images| count.store(images.len(), Ordering::Relaxed))
        });

        Self {
            screen: Screen::Banner,
            theme,
            config,
            session,
            selected_count,
            subscription,
            events: ScreenLoader::new(),
            decoration_types: ScreenLoader::new(),
            gallery: ScreenLoader::new(),
            last_event_id: None,
            cursor: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            notice: None,
            exporting: false,
            visible_rows: 20,
            backend_cmd_tx: None,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count.load(Ordering::Relaxed)
    }

    pub fn is_image_selected(&self, image_id: i64) -> bool {
        self.session
            .selection()
            .map(|s| s.is_selected(image_id))
            .unwrap_or(false)
    }

    /// Queue `cmd` for the backend task. Returns false when it was dropped.
    pub(crate) fn send(&self, cmd: BackendCommand) -> bool {
        match &self.backend_cmd_tx {
            Some(tx) => {
                let queued = tx.send(cmd).is_ok();
                if !queued {
                    tracing::warn!("backend task is gone, command dropped");
                }
                queued
            }
            None => {
                tracing::debug!(?cmd, "no backend attached");
                false
            }
        }
    }

    /// Switch to `screen`, cancelling the load of the screen being left and
    /// starting the new screen's load.
    pub fn navigate(&mut self, screen: Screen) {
        self.cancel_current_load();
        self.cursor = 0;
        self.search_query.clear();
        self.input_mode = InputMode::Normal;
        tracing::debug!(?screen, "navigate");

        match screen {
            Screen::Banner => {}
            Screen::Events => {
                let ticket = self.events.begin(());
                self.send(BackendCommand::LoadEvents { ticket });
            }
            Screen::DecorationTypes(event_id) => {
                self.last_event_id = Some(event_id);
                let ticket = self.decoration_types.begin(event_id);
                self.send(BackendCommand::LoadDecorationTypes { ticket });
            }
            Screen::Gallery(decoration_type_id) => {
                let ticket = self.gallery.begin(decoration_type_id);
                self.send(BackendCommand::LoadGallery { ticket });
            }
        }
        self.screen = screen;
    }

    fn cancel_current_load(&mut self) {
        match self.screen {
            Screen::Banner => {}
            Screen::Events => self.events.cancel(),
            Screen::DecorationTypes(_) => self.decoration_types.cancel(),
            Screen::Gallery(_) => self.gallery.cancel(),
        }
    }

    /// Reissue the current screen's load after a failure. Returns whether a
    /// load was started.
    pub fn retry(&mut self) -> bool {
        match self.screen {
            Screen::Banner => false,
            Screen::Events => match self.events.retry() {
                Some(ticket) => {
                    self.send(BackendCommand::LoadEvents { ticket });
                    true
                }
                None => false,
            },
            Screen::DecorationTypes(_) => match self.decoration_types.retry() {
                Some(ticket) => {
                    self.send(BackendCommand::LoadDecorationTypes { ticket });
                    true
                }
                None => false,
            },
            Screen::Gallery(_) => match self.gallery.retry() {
                Some(ticket) => {
                    self.send(BackendCommand::LoadGallery { ticket });
                    true
                }
                None => false,
            },
        }
    }

    /// Indices of the rows shown on the current screen after filtering.
    pub fn visible_indices(&self) -> Vec<usize> {
        let query = self.search_query.as_str();
        match self.screen {
            Screen::Banner => Vec::new(),
            Screen::Events => self
                .events
                .state()
                .ready()
                .map(|events| filtered_indices(events, query))
                .unwrap_or_default(),
            Screen::DecorationTypes(_) => self
                .decoration_types
                .state()
                .ready()
                .map(|view| filtered_indices(&view.decoration_types, query))
                .unwrap_or_default(),
            Screen::Gallery(_) => self
                .gallery
                .state()
                .ready()
                .map(|view| filtered_indices(&view.images, query))
                .unwrap_or_default(),
        }
    }

    /// Index into the loaded list of the row under the cursor.
    pub fn cursor_item(&self) -> Option<usize> {
        self.visible_indices().get(self.cursor).copied()
    }

    pub(crate) fn clamp_cursor(&mut self) {
        let len = self.visible_indices().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub(crate) fn banner_done(&self) -> bool {
        self.tick >= BANNER_TICKS
    }

    /// Drop the selection subscriber and end the session.
    pub fn shutdown(&mut self) {
        if let (Some(id), Ok(store)) = (self.subscription.take(), self.session.selection_mut()) {
            store.unsubscribe(id);
        }
        if let Some(store) = self.session.end() {
            tracing::info!(discarded = store.len(), "session ended");
        }
    }

    pub fn view(&mut self, f: &mut ratatui::Frame) {
        if self.screen == Screen::Banner {
            crate::view::banner::render(f, &self.theme, self.tick);
            return;
        }

        let area = f.area();
        let footer_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1.min(area.height),
        };
        let main_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        let screen = self.screen.clone();
        match screen {
            Screen::Events => crate::view::events::render_in(f, self, main_area, footer_area),
            Screen::DecorationTypes(_) => {
                crate::view::decoration_types::render_in(f, self, main_area, footer_area)
            }
            Screen::Gallery(_) => crate::view::gallery::render_in(f, self, main_area, footer_area),
            Screen::Banner => unreachable!(),
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
        if let Some(notice) = &self.notice {
            crate::view::notice::render(f, &self.theme, notice);
        }
        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme, self.selected_count());
        }
    }
}
