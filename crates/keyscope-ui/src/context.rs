//! Application context shared by the router and controllers.
//!
//! # Design
//! - Created exactly once per boot and shared through `Rc`.
//! - Holds every port, so components never reach for browser globals.

use crate::core::config::UiConfig;
use crate::core::fragments::FragmentSource;
use crate::core::navigation::{History, NavigationQueue};
use crate::core::session::{KeyValueStore, Session};
use crate::core::timer::Timer;
use crate::core::view::ViewPort;
use crate::services::api::ApiClient;
use crate::services::http::HttpTransport;
use std::rc::Rc;

/// Platform implementations the context is assembled from.
pub struct Ports {
    /// Persistent key/value storage.
    pub store: Rc<dyn KeyValueStore>,
    /// Network transport.
    pub transport: Rc<dyn HttpTransport>,
    /// Rendering surface.
    pub view: Rc<dyn ViewPort>,
    /// Fragment loader.
    pub fragments: Rc<dyn FragmentSource>,
    /// Browser history.
    pub history: Rc<dyn History>,
    /// Delay source.
    pub timer: Rc<dyn Timer>,
}

/// Shared state and ports for one running dashboard.
pub struct AppContext {
    /// Effective configuration.
    pub config: UiConfig,
    /// Persisted session.
    pub session: Session,
    /// API client.
    pub api: ApiClient,
    /// Rendering surface.
    pub view: Rc<dyn ViewPort>,
    /// Fragment loader.
    pub fragments: Rc<dyn FragmentSource>,
    /// Browser history.
    pub history: Rc<dyn History>,
    /// Delay source.
    pub timer: Rc<dyn Timer>,
    /// Navigation requests raised outside the router.
    pub navigation: NavigationQueue,
}

impl AppContext {
    /// Wire `ports` together under `config`.
    #[must_use]
    pub fn new(config: UiConfig, ports: Ports) -> Rc<Self> {
        let session = Session::new(ports.store);
        let navigation = NavigationQueue::default();
        let api = ApiClient::new(
            config.api_base(),
            ports.transport,
            session.clone(),
            navigation.clone(),
        );
        Rc::new(Self {
            config,
            session,
            api,
            view: ports.view,
            fragments: ports.fragments,
            history: ports.history,
            timer: ports.timer,
            navigation,
        })
    }
}
