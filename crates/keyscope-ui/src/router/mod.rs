//! Single-page router: URL path to screen, fragments, and controller setup.
//!
//! # Design
//! - Every entry point funnels into one visit loop that follows fragment
//!   fallbacks and queued navigations, capped at `max_redirect_hops`.
//! - A screen is live once its fragment is mounted; the render hook fires
//!   before the controller setup runs, so the browser layer can bind listeners.
//! - Screen fallbacks never retry a failed fragment.

pub mod routes;

use crate::context::AppContext;
use crate::core::fragments::Fragment;
use crate::core::navigation::route_path;
use crate::core::view::{Display, ViewError, ids};
use crate::features::auth::controller::AuthController;
use crate::features::dashboard::controller::DashboardController;
use crate::features::keywords::controller::KeywordsController;
use crate::features::upload::controller::UploadController;
use routes::{ACTIVATION_LINK_PATH, RouteTarget, Screen, resolve};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback fired after a screen's fragment is mounted.
pub type RenderHook = Rc<dyn Fn(Screen)>;

const PUBLIC_PATHS: [&str; 3] = ["/login", "/signup", "/activate"];

/// Owns the controllers and decides which screen is live.
pub struct Router {
    ctx: Rc<AppContext>,
    current: RefCell<String>,
    render_hook: RefCell<Option<RenderHook>>,
    auth: AuthController,
    dashboard: DashboardController,
    keywords: KeywordsController,
    upload: UploadController,
}

impl Router {
    /// Router over `ctx` with one controller per screen family.
    #[must_use]
    pub fn new(ctx: Rc<AppContext>) -> Rc<Self> {
        Rc::new(Self {
            current: RefCell::new(ctx.history.location()),
            render_hook: RefCell::new(None),
            auth: AuthController::new(ctx.clone()),
            dashboard: DashboardController::new(ctx.clone()),
            keywords: KeywordsController::new(ctx.clone()),
            upload: UploadController::new(ctx.clone()),
            ctx,
        })
    }

    /// Install the hook fired after each successful mount.
    pub fn set_render_hook(&self, hook: RenderHook) {
        *self.render_hook.borrow_mut() = Some(hook);
    }

    /// Path currently shown.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    /// Auth form handlers.
    #[must_use]
    pub const fn auth(&self) -> &AuthController {
        &self.auth
    }

    /// Keyword list and detail handlers.
    #[must_use]
    pub const fn keywords(&self) -> &KeywordsController {
        &self.keywords
    }

    /// Upload form handlers.
    #[must_use]
    pub const fn upload(&self) -> &UploadController {
        &self.upload
    }

    /// Push `path` onto history and show it.
    pub async fn navigate(&self, path: &str) {
        self.ctx.history.push(path);
        self.visit(path.to_string()).await;
    }

    /// Show `path` after a back/forward move; history is already there.
    pub async fn on_history_change(&self, path: &str) {
        self.visit(path.to_string()).await;
    }

    /// Follow a navigation a controller queued, if any.
    pub async fn follow_pending(&self) {
        if let Some(path) = self.ctx.navigation.take() {
            self.navigate(&path).await;
        }
    }

    /// First render after boot: applies the auth redirects before routing.
    pub async fn initial_load(&self) {
        let location = self.ctx.history.location();
        let path = route_path(&location);
        let authenticated = self.ctx.session.is_authenticated();
        self.ctx.view.set_display(ids::LOADING, Display::None);

        if path == ACTIVATION_LINK_PATH {
            self.visit(location).await;
        } else if authenticated && matches!(path, "/login" | "/signup") {
            self.navigate("/dashboard").await;
        } else if !authenticated && !PUBLIC_PATHS.contains(&path) {
            tracing::debug!(%path, "unauthenticated; showing login");
            self.ctx.history.replace("/login");
            self.visit("/login".to_string()).await;
        } else {
            self.visit(location).await;
        }
    }

    async fn visit(&self, path: String) {
        let max_hops = self.ctx.config.max_redirect_hops;
        let mut hops = 0u8;
        let mut next = Some(path);
        while let Some(path) = next.take() {
            *self.current.borrow_mut() = path.clone();
            tracing::debug!(%path, hops, "routing");
            let redirect = self
                .show(&path)
                .await
                .or_else(|| self.ctx.navigation.take());
            let Some(redirect) = redirect else {
                break;
            };
            hops += 1;
            if hops > max_hops {
                tracing::warn!(%redirect, max_hops, "redirect limit reached; staying put");
                break;
            }
            self.ctx.history.push(&redirect);
            next = Some(redirect);
        }
    }

    /// Render the destination for `path`; returns a redirect when a fragment fails.
    async fn show(&self, path: &str) -> Option<String> {
        match resolve(path) {
            RouteTarget::ActivationLink { email, token } => {
                if let Err(redirect) = self.mount_screen(Screen::Activate).await {
                    return Some(redirect);
                }
                self.fire_render_hook(Screen::Activate);
                if let (Some(email), Some(token)) = (email, token) {
                    self.auth.auto_activate(&email, &token).await;
                } else {
                    self.auth.populate_activation();
                }
                None
            }
            RouteTarget::KeywordDetail { id } => {
                if let Err(redirect) = self.mount_screen(Screen::KeywordDetail).await {
                    return Some(redirect);
                }
                self.fire_render_hook(Screen::KeywordDetail);
                self.keywords.load_detail(&id).await;
                None
            }
            RouteTarget::Screen(screen) => {
                if let Err(redirect) = self.mount_screen(screen).await {
                    return Some(redirect);
                }
                self.fire_render_hook(screen);
                self.setup(screen).await;
                None
            }
        }
    }

    async fn setup(&self, screen: Screen) {
        match screen {
            Screen::Dashboard => self.dashboard.load().await,
            Screen::Keywords => self.keywords.load().await,
            Screen::Upload => self.upload.reset(),
            Screen::Activate => self.auth.populate_activation(),
            Screen::Login | Screen::Signup | Screen::KeywordDetail => {}
        }
    }

    fn fire_render_hook(&self, screen: Screen) {
        let hook = self.render_hook.borrow().clone();
        if let Some(hook) = hook {
            hook(screen);
        }
    }

    /// Mount `screen`; on failure, returns the fallback path after any notice.
    async fn mount_screen(&self, screen: Screen) -> Result<(), String> {
        let mounted = if screen.is_protected() {
            self.mount_shell().await;
            self.mount(screen.fragment(), ids::SCREEN_CONTAINER).await
        } else {
            self.mount(screen.fragment(), ids::APP_CONTAINER).await
        };
        if let Err(err) = mounted {
            let fallback = screen.fallback();
            tracing::warn!(error = %err, redirect = fallback.path, "screen failed to load");
            if let Some(notice) = fallback.alert {
                self.ctx.view.alert(notice);
            }
            return Err(fallback.path.to_string());
        }
        self.ctx.view.set_display(ids::LOADING, Display::None);
        self.ctx.view.set_display(ids::APP_CONTAINER, Display::Flex);
        Ok(())
    }

    async fn mount_shell(&self) {
        if let Err(err) = self.mount(Fragment::AppShell, ids::APP_CONTAINER).await {
            tracing::warn!(error = %err, "app shell failed to load");
            return;
        }
        let email = self.ctx.session.user_email().unwrap_or_default();
        self.ctx.view.set_text(ids::SHELL_USER_EMAIL, &email);
    }

    async fn mount(&self, fragment: Fragment, container: &str) -> Result<(), ViewError> {
        let markup = self.ctx.fragments.load(fragment).await?;
        self.ctx.view.mount(container, &markup)
    }
}
