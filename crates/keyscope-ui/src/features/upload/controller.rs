//! Upload form state machine.
//!
//! # Design
//! - Holds at most one selected file; a rejected file clears the selection.
//! - Files from the picker and from drag-and-drop go through the same path.
//! - The redirect after a successful upload waits on the timer port.

use crate::context::AppContext;
use crate::core::view::{Display, ids};
use crate::features::keywords::logic::{UploadError, format_file_size, validate_upload};
use crate::features::keywords::model::{KeywordsService, UploadFailure};
use crate::services::api::ApiError;
use crate::services::http::UploadFile;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const SUCCESS_MESSAGE: &str = "Keywords uploaded successfully! Processing has started.";
const FALLBACK_ERROR: &str = "Upload failed. Please try again.";
const IDLE_LABEL: &str = "Upload Keywords";
const BUSY_LABEL: &str = "Uploading...";
const DRAG_OVER_CLASS: &str = "drag-over";

/// Drives the CSV upload screen.
pub struct UploadController {
    ctx: Rc<AppContext>,
    service: KeywordsService,
    selected: RefCell<Option<UploadFile>>,
}

impl UploadController {
    /// Controller bound to `ctx`.
    #[must_use]
    pub fn new(ctx: Rc<AppContext>) -> Self {
        let service = KeywordsService::new(ctx.api.clone(), ctx.config.max_upload_bytes);
        Self {
            ctx,
            service,
            selected: RefCell::new(None),
        }
    }

    /// Currently selected file name, if any.
    #[must_use]
    pub fn selected_name(&self) -> Option<String> {
        self.selected.borrow().as_ref().map(|file| file.name.clone())
    }

    /// Accept a file from the picker or a drop. `None` (cancelled picker) is ignored.
    pub fn select_file(&self, file: Option<UploadFile>) {
        self.ctx.view.set_display(ids::UPLOAD_ERROR, Display::None);
        let Some(file) = file else {
            return;
        };
        if let Err(err) = validate_upload(Some(&file), self.ctx.config.max_upload_bytes) {
            tracing::debug!(name = %file.name, error = %err, "upload file rejected");
            self.reset();
            self.show_error(&err.to_string());
            return;
        }
        self.show_file_info(&file);
        self.ctx.view.set_disabled(ids::UPLOAD_BUTTON, false);
        *self.selected.borrow_mut() = Some(file);
    }

    /// Highlight the drop zone while a drag hovers over it.
    pub fn set_drag_over(&self, on: bool) {
        self.ctx.view.toggle_class(ids::UPLOAD_AREA, DRAG_OVER_CLASS, on);
    }

    fn show_file_info(&self, file: &UploadFile) {
        let view = &self.ctx.view;
        view.set_text(ids::FILE_NAME, &file.name);
        view.set_text(ids::FILE_SIZE, &format_file_size(file.size));
        view.set_display(ids::FILE_INFO, Display::Flex);
    }

    /// Drop the selection.
    pub fn clear(&self) {
        self.reset();
    }

    /// Return the form to its empty state.
    pub fn reset(&self) {
        self.selected.borrow_mut().take();
        let view = &self.ctx.view;
        view.set_value(ids::FILE_INPUT, "");
        view.set_display(ids::FILE_INFO, Display::None);
        view.set_disabled(ids::UPLOAD_BUTTON, true);
        view.set_display(ids::UPLOAD_ERROR, Display::None);
        view.set_display(ids::UPLOAD_SUCCESS, Display::None);
        view.set_text(ids::UPLOAD_BUTTON, IDLE_LABEL);
        view.toggle_class(ids::UPLOAD_AREA, DRAG_OVER_CLASS, false);
    }

    /// Upload the selected file, then redirect to the list after the configured delay.
    pub async fn handle_upload(&self) {
        let view = &self.ctx.view;
        view.set_display(ids::UPLOAD_ERROR, Display::None);
        view.set_disabled(ids::UPLOAD_BUTTON, true);
        view.set_text(ids::UPLOAD_BUTTON, BUSY_LABEL);

        let selected = self.selected.borrow().clone();
        let result = match selected {
            Some(file) => self.service.upload(file).await,
            None => Err(UploadFailure::Invalid(UploadError::Missing)),
        };

        match result {
            Ok(_) => {
                view.set_text(ids::UPLOAD_SUCCESS, SUCCESS_MESSAGE);
                view.set_display(ids::UPLOAD_SUCCESS, Display::Block);
                let delay = u64::from(self.ctx.config.upload_redirect_delay_ms);
                self.ctx.timer.sleep(Duration::from_millis(delay)).await;
                self.reset();
                self.ctx.navigation.request("/keywords");
            }
            Err(UploadFailure::Api(ApiError::SessionExpired)) => {}
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                let message = err.to_string();
                self.show_error(if message.is_empty() {
                    FALLBACK_ERROR
                } else {
                    message.as_str()
                });
                view.set_disabled(ids::UPLOAD_BUTTON, false);
                view.set_text(ids::UPLOAD_BUTTON, IDLE_LABEL);
            }
        }
    }

    fn show_error(&self, message: &str) {
        self.ctx.view.set_text(ids::UPLOAD_ERROR, message);
        self.ctx.view.set_display(ids::UPLOAD_ERROR, Display::Block);
    }
}
