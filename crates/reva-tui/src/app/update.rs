use reva_core::{CoreError, PdfGenerationRequest, pdf};

use super::{App, InputMode, Notice, Screen};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if let Action::Tick = action {
            self.tick = self.tick.wrapping_add(1);
            if self.screen == Screen::Banner && self.banner_done() {
                self.navigate(Screen::Events);
            }
            return false;
        }
        if let Action::Resize(_w, h) = action {
            self.visible_rows = (h as usize).saturating_sub(6);
            return false;
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => self.confirm_quit = false,
                _ => {}
            }
            return false;
        }

        if self.notice.is_some() {
            if matches!(action, Action::DrillIn | Action::NavigateBack) {
                self.notice = None;
            }
            return false;
        }

        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        if self.screen == Screen::Banner {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::None => {}
                _ => self.navigate(Screen::Events),
            }
            return false;
        }

        if self.input_mode == InputMode::Search {
            return self.update_search(action);
        }

        match action {
            Action::Quit => return self.request_quit(),
            Action::MoveDown => {
                let len = self.visible_indices().len();
                if len > 0 {
                    self.cursor = (self.cursor + 1).min(len - 1);
                }
            }
            Action::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            Action::PageDown => {
                let len = self.visible_indices().len();
                self.cursor = (self.cursor + self.visible_rows.max(1)).min(len.saturating_sub(1));
            }
            Action::PageUp => self.cursor = self.cursor.saturating_sub(self.visible_rows.max(1)),
            Action::GoTop => self.cursor = 0,
            Action::GoBottom => self.cursor = self.visible_indices().len().saturating_sub(1),
            Action::DrillIn => self.drill_in(),
            Action::NavigateBack => self.navigate_back(),
            Action::StartSearch => {
                if self.screen_is_ready() {
                    self.input_mode = InputMode::Search;
                }
            }
            Action::ToggleSelect => self.toggle_selected(),
            Action::ClearSelection => {
                if let Ok(store) = self.session.selection_mut() {
                    store.clear();
                }
            }
            Action::Export => self.request_export(),
            Action::Retry => {
                self.retry();
            }
            Action::ToggleHelp => self.show_help = true,
            Action::SearchInput(_)
            | Action::SearchConfirm
            | Action::SearchCancel
            | Action::Tick
            | Action::Resize(..)
            | Action::None => {}
        }
        false
    }

    /// Quit now, or ask first when a selection would be discarded.
    fn request_quit(&mut self) -> bool {
        if self.selected_count() > 0 {
            self.confirm_quit = true;
            false
        } else {
            self.should_quit = true;
            true
        }
    }

    fn update_search(&mut self, action: Action) -> bool {
        match action {
            Action::SearchInput('\x08') => {
                self.search_query.pop();
                self.cursor = 0;
            }
            Action::SearchInput(c) => {
                self.search_query.push(c);
                self.cursor = 0;
            }
            Action::SearchConfirm => self.input_mode = InputMode::Normal,
            Action::SearchCancel => {
                self.search_query.clear();
                self.input_mode = InputMode::Normal;
                self.cursor = 0;
            }
            Action::Quit => return self.request_quit(),
            _ => {}
        }
        false
    }

    fn screen_is_ready(&self) -> bool {
        match self.screen {
            Screen::Banner => false,
            Screen::Events => self.events.state().ready().is_some(),
            Screen::DecorationTypes(_) => self.decoration_types.state().ready().is_some(),
            Screen::Gallery(_) => self.gallery.state().ready().is_some(),
        }
    }

    fn drill_in(&mut self) {
        let Some(idx) = self.cursor_item() else {
            return;
        };
        match self.screen {
            Screen::Events => {
                if let Some(event) = self.events.state().ready().and_then(|e| e.get(idx)) {
                    let id = event.id;
                    self.navigate(Screen::DecorationTypes(id));
                }
            }
            Screen::DecorationTypes(_) => {
                if let Some(t) = self
                    .decoration_types
                    .state()
                    .ready()
                    .and_then(|v| v.decoration_types.get(idx))
                {
                    let id = t.id;
                    self.navigate(Screen::Gallery(id));
                }
            }
            Screen::Gallery(_) => self.toggle_selected(),
            Screen::Banner => {}
        }
    }

    fn navigate_back(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.cursor = 0;
            return;
        }
        match self.screen {
            Screen::DecorationTypes(_) => self.navigate(Screen::Events),
            Screen::Gallery(_) => {
                let from_view = self
                    .gallery
                    .state()
                    .ready()
                    .map(|v| v.event_ref().0)
                    .filter(|id| *id > 0);
                match from_view.or(self.last_event_id) {
                    Some(event_id) => self.navigate(Screen::DecorationTypes(event_id)),
                    None => self.navigate(Screen::Events),
                }
            }
            Screen::Events | Screen::Banner => {}
        }
    }

    /// Toggle the gallery image under the cursor.
    fn toggle_selected(&mut self) {
        if !matches!(self.screen, Screen::Gallery(_)) {
            return;
        }
        let Some(idx) = self.cursor_item() else {
            return;
        };
        let Some(view) = self.gallery.state().ready() else {
            return;
        };
        let Some(image) = view.images.get(idx) else {
            return;
        };
        let type_name = view.decoration_type_name().to_string();
        let image = image.clone();
        match self.session.selection_mut() {
            Ok(store) => {
                store.toggle(&image, &type_name);
            }
            Err(e) => tracing::error!(error = %e, "selection unavailable"),
        }
    }

    /// Build the PDF request for the current gallery and hand it to the backend.
    fn request_export(&mut self) {
        if self.exporting {
            return;
        }
        let Screen::Gallery(_) = self.screen else {
            return;
        };
        let Some(view) = self.gallery.state().ready() else {
            return;
        };
        let (event_id, event_name) = view.event_ref();
        let event_name = event_name.to_string();
        let file_name = pdf::export_file_name(view.decoration_type_name(), &event_name);

        let request = match self
            .session
            .selection()
            .and_then(|store| PdfGenerationRequest::from_selection(event_id, &event_name, store))
        {
            Ok(request) => request,
            Err(CoreError::EmptySelection) => {
                self.notice = Some(Notice::info(
                    "Nothing selected",
                    CoreError::EmptySelection.to_string(),
                ));
                return;
            }
            Err(e) => {
                self.notice = Some(Notice::error("Export failed", e.to_string()));
                return;
            }
        };

        tracing::info!(
            event = %request.event_name,
            images = request.selected_images.len(),
            %file_name,
            "export requested"
        );
        let queued = self.send(BackendCommand::ExportPdf {
            request,
            dir: self.config.output_dir.clone(),
            file_name,
            base64: self.config.use_base64,
        });
        if queued {
            self.exporting = true;
        } else {
            self.notice = Some(Notice::error(
                "Export failed",
                "Failed to generate PDF. Please try again.",
            ));
        }
    }
}
