//! Keyword list and detail screens.
//!
//! # Design
//! - The last loaded list is cached so filter changes re-render without a
//!   round trip.
//! - Keyword text is escaped before it is interpolated into row markup.
//! - A forced logout (`SessionExpired`) renders nothing; the router is already
//!   heading to `/login`.

use crate::context::AppContext;
use crate::core::view::{Display, ids};
use crate::features::keywords::logic::{
    FormattedKeyword, escape_text, filter_keywords, format_keyword, sanitize_preview,
    status_class,
};
use crate::features::keywords::model::KeywordsService;
use crate::services::api::ApiError;
use keyscope_api_models::KeywordDto;
use std::cell::RefCell;
use std::rc::Rc;

const LIST_ERROR: &str = r#"<div class="error">Failed to load keywords</div>"#;
const EMPTY_LIST: &str = r#"<div class="empty">No keywords found. <a href="/upload" data-nav="/upload">Upload some keywords</a> to get started.</div>"#;
const DETAIL_ERROR: &str = r#"<p class="error">Failed to load keyword details</p>"#;
const NO_CONTENT: &str = "<p>No content available</p>";

/// Tabs on the keyword detail screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailTab {
    /// Sanitised HTML preview.
    Preview,
    /// Pretty-printed JSON.
    Raw,
}

impl DetailTab {
    /// Parse a `data-tab` value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "preview" => Some(Self::Preview),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Raw => "raw",
        }
    }
}

/// Drives the keyword list and detail screens.
pub struct KeywordsController {
    ctx: Rc<AppContext>,
    service: KeywordsService,
    cache: RefCell<Vec<KeywordDto>>,
}

impl KeywordsController {
    /// Controller bound to `ctx`.
    #[must_use]
    pub fn new(ctx: Rc<AppContext>) -> Self {
        let service = KeywordsService::new(ctx.api.clone(), ctx.config.max_upload_bytes);
        Self {
            ctx,
            service,
            cache: RefCell::new(Vec::new()),
        }
    }

    /// Fetch and render the full list.
    pub async fn load(&self) {
        match self.service.list().await {
            Ok(keywords) => {
                self.display(&keywords);
                *self.cache.borrow_mut() = keywords;
            }
            Err(ApiError::SessionExpired) => {}
            Err(err) => {
                tracing::warn!(error = %err, "keyword list failed to load");
                self.ctx.view.set_html(ids::KEYWORDS_LIST, LIST_ERROR);
            }
        }
    }

    /// Re-render the cached list through the status and search filters.
    pub fn apply_filters(&self, status: &str, search: &str) {
        let filtered = filter_keywords(&self.cache.borrow(), status, search);
        self.display(&filtered);
    }

    /// Render `keywords` as table rows.
    pub fn display(&self, keywords: &[KeywordDto]) {
        if keywords.is_empty() {
            self.ctx.view.set_html(ids::KEYWORDS_LIST, EMPTY_LIST);
            return;
        }
        let rows: String = keywords
            .iter()
            .map(|keyword| render_row(&format_keyword(keyword)))
            .collect();
        self.ctx.view.set_html(ids::KEYWORDS_LIST, &rows);
    }

    /// Open the detail screen for `id`.
    pub fn view_details(&self, id: &str) {
        self.ctx.navigation.request(format!("/keywords/{id}"));
    }

    /// Return to the list.
    pub fn back(&self) {
        self.ctx.navigation.request("/keywords");
    }

    /// Fetch one keyword and fill the detail screen.
    pub async fn load_detail(&self, id: &str) {
        let view = &self.ctx.view;
        let keyword = match self.service.get(id).await {
            Ok(keyword) => keyword,
            Err(ApiError::SessionExpired) => return,
            Err(err) => {
                tracing::warn!(error = %err, %id, "keyword detail failed to load");
                view.set_html(ids::HTML_PREVIEW, DETAIL_ERROR);
                return;
            }
        };
        let formatted = format_keyword(&keyword);

        view.set_text(ids::KEYWORD_TITLE, &format!("\"{}\"", formatted.keyword));
        view.set_text(ids::STATUS_BADGE, &formatted.status);
        view.set_class(
            ids::STATUS_BADGE,
            &format!(
                "status-badge {}",
                status_class(Some(&formatted.status)).as_str()
            ),
        );
        view.set_text(ids::LINK_COUNT, &formatted.link_count.to_string());
        view.set_text(ids::AD_COUNT, &formatted.ad_count.to_string());

        if formatted.has_error {
            view.set_display(ids::ERROR_SECTION, Display::Block);
            view.set_text(
                ids::ERROR_MESSAGE,
                formatted.error_message.as_deref().unwrap_or_default(),
            );
        } else {
            view.set_display(ids::ERROR_SECTION, Display::None);
        }

        match formatted.html_content.as_deref().filter(|html| !html.is_empty()) {
            Some(html) => view.set_html(ids::HTML_PREVIEW, &sanitize_preview(html)),
            None => view.set_html(ids::HTML_PREVIEW, NO_CONTENT),
        }

        let raw = serde_json::to_string_pretty(&keyword).unwrap_or_default();
        view.set_text(ids::RAW_DATA, &raw);
    }

    /// Activate `tab` and its panel, deactivating the other.
    pub fn show_tab(&self, tab: DetailTab) {
        for candidate in [DetailTab::Preview, DetailTab::Raw] {
            let on = candidate == tab;
            let name = candidate.name();
            self.ctx
                .view
                .toggle_class(&format!("{name}-tab-button"), "active", on);
            self.ctx.view.toggle_class(&format!("{name}-tab"), "active", on);
        }
    }
}

fn render_row(keyword: &FormattedKeyword) -> String {
    let indicator = if keyword.has_error {
        format!(
            r#"<span class="error-indicator" title="{}">!</span>"#,
            escape_text(keyword.error_message.as_deref().unwrap_or_default())
        )
    } else {
        String::new()
    };
    let status = escape_text(&keyword.status);
    format!(
        r#"<div class="table-row"><div class="table-cell"><span class="keyword-text">{text}</span>{indicator}</div><div class="table-cell"><span class="status-badge {class}">{status}</span></div><div class="table-cell">{links}</div><div class="table-cell">{ads}</div><div class="table-cell"><button type="button" class="btn btn-sm btn-secondary" data-keyword-id="{id}">View Details</button></div></div>"#,
        text = escape_text(&keyword.keyword),
        class = status_class(Some(&keyword.status)).as_str(),
        links = keyword.link_count,
        ads = keyword.ad_count,
        id = keyword.id,
    )
}
