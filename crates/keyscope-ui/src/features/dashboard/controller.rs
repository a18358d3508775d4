//! Dashboard statistics.

use crate::context::AppContext;
use crate::core::view::ids;
use crate::features::keywords::logic::{
    count_with_status, escape_text, format_keyword, status_class,
};
use crate::features::keywords::model::KeywordsService;
use crate::services::api::ApiError;
use keyscope_api_models::{KeywordDto, KeywordStatus};
use std::rc::Rc;

const EMPTY_RECENT: &str = r#"<p>No keywords uploaded yet. <a href="/upload" data-nav="/upload">Upload some keywords</a> to get started.</p>"#;
const LOAD_ERROR: &str = r#"<p class="error">Failed to load keywords</p>"#;

/// Fills the dashboard counters and recent list.
pub struct DashboardController {
    ctx: Rc<AppContext>,
    service: KeywordsService,
}

impl DashboardController {
    /// Controller bound to `ctx`.
    #[must_use]
    pub fn new(ctx: Rc<AppContext>) -> Self {
        let service = KeywordsService::new(ctx.api.clone(), ctx.config.max_upload_bytes);
        Self { ctx, service }
    }

    /// Load keywords and render the overview.
    pub async fn load(&self) {
        match self.service.list().await {
            Ok(keywords) => self.render(&keywords),
            Err(ApiError::SessionExpired) => {}
            Err(err) => {
                tracing::warn!(error = %err, "dashboard failed to load");
                self.ctx.view.set_html(ids::RECENT_KEYWORDS_LIST, LOAD_ERROR);
            }
        }
    }

    fn render(&self, keywords: &[KeywordDto]) {
        let view = &self.ctx.view;
        view.set_text(ids::TOTAL_KEYWORDS, &keywords.len().to_string());
        for (id, status) in [
            (ids::COMPLETED_KEYWORDS, KeywordStatus::Completed),
            (ids::PROCESSING_KEYWORDS, KeywordStatus::Processing),
            (ids::FAILED_KEYWORDS, KeywordStatus::Failed),
        ] {
            view.set_text(id, &count_with_status(keywords, status).to_string());
        }

        if keywords.is_empty() {
            view.set_html(ids::RECENT_KEYWORDS_LIST, EMPTY_RECENT);
            return;
        }
        let items: String = keywords
            .iter()
            .take(self.ctx.config.recent_keywords)
            .map(render_recent)
            .collect();
        view.set_html(ids::RECENT_KEYWORDS_LIST, &items);
    }
}

fn render_recent(keyword: &KeywordDto) -> String {
    let formatted = format_keyword(keyword);
    format!(
        r#"<div class="keyword-item"><div class="keyword-info"><span class="keyword-text">{text}</span><span class="keyword-status {class}">{status}</span></div><div class="keyword-stats"><span>Links: {links}</span><span>Ads: {ads}</span></div></div>"#,
        text = escape_text(&formatted.keyword),
        class = status_class(Some(&formatted.status)).as_str(),
        status = escape_text(&formatted.status),
        links = formatted.link_count,
        ads = formatted.ad_count,
    )
}
