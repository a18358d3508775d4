//! In-memory fakes for the ports, shared by unit tests.

use crate::context::{AppContext, Ports};
use crate::core::config::UiConfig;
use crate::core::fragments::{EmbeddedFragments, Fragment, FragmentSource};
use crate::core::navigation::History;
use crate::core::session::{ACCESS_TOKEN_KEY, KeyValueStore, USER_EMAIL_KEY};
use crate::core::timer::Timer;
use crate::core::view::{Display, ViewError, ViewPort, ids};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Replays queued responses in order; an empty queue behaves like a dead network.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

pub(crate) fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: String::new(),
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

pub(crate) fn text_response(status: u16, status_text: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        content_type: Some("text/plain".to_string()),
        body: body.to_string(),
    }
}

/// Records every write; mounting registers the ids found in the markup.
pub(crate) struct RecordingView {
    elements: RefCell<HashSet<String>>,
    pub(crate) mounts: RefCell<Vec<(String, String)>>,
    pub(crate) text: RefCell<HashMap<String, String>>,
    pub(crate) html: RefCell<HashMap<String, String>>,
    pub(crate) values: RefCell<HashMap<String, String>>,
    pub(crate) display: RefCell<HashMap<String, Display>>,
    pub(crate) disabled: RefCell<HashMap<String, bool>>,
    pub(crate) classes: RefCell<HashMap<String, String>>,
    toggled: RefCell<HashMap<String, HashSet<String>>>,
    pub(crate) alerts: RefCell<Vec<String>>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            elements: RefCell::new(HashSet::from([ids::APP_CONTAINER.to_string()])),
            mounts: RefCell::default(),
            text: RefCell::default(),
            html: RefCell::default(),
            values: RefCell::default(),
            display: RefCell::default(),
            disabled: RefCell::default(),
            classes: RefCell::default(),
            toggled: RefCell::default(),
            alerts: RefCell::default(),
        }
    }
}

impl RecordingView {
    pub(crate) fn text_of(&self, id: &str) -> Option<String> {
        self.text.borrow().get(id).cloned()
    }

    pub(crate) fn html_of(&self, id: &str) -> Option<String> {
        self.html.borrow().get(id).cloned()
    }

    pub(crate) fn value_of(&self, id: &str) -> Option<String> {
        self.values.borrow().get(id).cloned()
    }

    pub(crate) fn display_of(&self, id: &str) -> Option<Display> {
        self.display.borrow().get(id).copied()
    }

    pub(crate) fn is_disabled(&self, id: &str) -> Option<bool> {
        self.disabled.borrow().get(id).copied()
    }

    pub(crate) fn class_of(&self, id: &str) -> Option<String> {
        self.classes.borrow().get(id).cloned()
    }

    pub(crate) fn has_class(&self, id: &str, class: &str) -> bool {
        self.toggled
            .borrow()
            .get(id)
            .is_some_and(|classes| classes.contains(class))
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub(crate) fn mounted_containers(&self) -> Vec<String> {
        self.mounts
            .borrow()
            .iter()
            .map(|(container, _)| container.clone())
            .collect()
    }

    fn register_ids(&self, html: &str) {
        let mut elements = self.elements.borrow_mut();
        for chunk in html.split("id=\"").skip(1) {
            if let Some((id, _)) = chunk.split_once('"') {
                elements.insert(id.to_string());
            }
        }
    }
}

impl ViewPort for RecordingView {
    fn mount(&self, container: &str, html: &str) -> Result<(), ViewError> {
        if !self.elements.borrow().contains(container) {
            return Err(ViewError::MissingContainer(container.to_string()));
        }
        self.register_ids(html);
        self.mounts
            .borrow_mut()
            .push((container.to_string(), html.to_string()));
        Ok(())
    }

    fn set_text(&self, id: &str, text: &str) {
        self.text.borrow_mut().insert(id.to_string(), text.to_string());
    }

    fn set_html(&self, id: &str, html: &str) {
        self.html.borrow_mut().insert(id.to_string(), html.to_string());
    }

    fn set_value(&self, id: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(id.to_string(), value.to_string());
    }

    fn set_display(&self, id: &str, display: Display) {
        self.display.borrow_mut().insert(id.to_string(), display);
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        self.disabled.borrow_mut().insert(id.to_string(), disabled);
    }

    fn set_class(&self, id: &str, class: &str) {
        self.classes
            .borrow_mut()
            .insert(id.to_string(), class.to_string());
    }

    fn toggle_class(&self, id: &str, class: &str, on: bool) {
        let mut toggled = self.toggled.borrow_mut();
        let entry = toggled.entry(id.to_string()).or_default();
        if on {
            entry.insert(class.to_string());
        } else {
            entry.remove(class);
        }
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Embedded fragments, except the ones marked as failing.
#[derive(Default)]
pub(crate) struct FlakyFragments {
    failing: RefCell<HashSet<Fragment>>,
}

impl FlakyFragments {
    pub(crate) fn fail(&self, fragment: Fragment) {
        self.failing.borrow_mut().insert(fragment);
    }
}

#[async_trait(?Send)]
impl FragmentSource for FlakyFragments {
    async fn load(&self, fragment: Fragment) -> Result<String, ViewError> {
        if self.failing.borrow().contains(&fragment) {
            return Err(ViewError::FragmentUnavailable {
                name: fragment.name().to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        EmbeddedFragments.load(fragment).await
    }
}

pub(crate) struct RecordingHistory {
    location: RefCell<String>,
    pub(crate) pushes: RefCell<Vec<String>>,
    pub(crate) replaces: RefCell<Vec<String>>,
}

impl RecordingHistory {
    pub(crate) fn at(path: &str) -> Self {
        Self {
            location: RefCell::new(path.to_string()),
            pushes: RefCell::default(),
            replaces: RefCell::default(),
        }
    }

    pub(crate) fn pushes(&self) -> Vec<String> {
        self.pushes.borrow().clone()
    }

    pub(crate) fn replaces(&self) -> Vec<String> {
        self.replaces.borrow().clone()
    }
}

impl History for RecordingHistory {
    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn push(&self, path: &str) {
        self.pushes.borrow_mut().push(path.to_string());
        *self.location.borrow_mut() = path.to_string();
    }

    fn replace(&self, path: &str) {
        self.replaces.borrow_mut().push(path.to_string());
        *self.location.borrow_mut() = path.to_string();
    }
}

/// Returns immediately and remembers what it was asked to wait for.
#[derive(Default)]
pub(crate) struct InstantTimer {
    pub(crate) sleeps: RefCell<Vec<Duration>>,
}

#[async_trait(?Send)]
impl Timer for InstantTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Fully faked context plus handles to every fake.
pub(crate) struct TestApp {
    pub(crate) store: Rc<MemoryStore>,
    pub(crate) transport: Rc<ScriptedTransport>,
    pub(crate) view: Rc<RecordingView>,
    pub(crate) fragments: Rc<FlakyFragments>,
    pub(crate) history: Rc<RecordingHistory>,
    pub(crate) timer: Rc<InstantTimer>,
    pub(crate) ctx: Rc<AppContext>,
}

impl TestApp {
    pub(crate) fn at(path: &str) -> Self {
        let store = Rc::new(MemoryStore::default());
        let transport = Rc::new(ScriptedTransport::default());
        let view = Rc::new(RecordingView::default());
        let fragments = Rc::new(FlakyFragments::default());
        let history = Rc::new(RecordingHistory::at(path));
        let timer = Rc::new(InstantTimer::default());
        let ctx = AppContext::new(
            UiConfig::default(),
            Ports {
                store: store.clone(),
                transport: transport.clone(),
                view: view.clone(),
                fragments: fragments.clone(),
                history: history.clone(),
                timer: timer.clone(),
            },
        );
        Self {
            store,
            transport,
            view,
            fragments,
            history,
            timer,
            ctx,
        }
    }

    pub(crate) fn signed_in(self) -> Self {
        self.store.set(ACCESS_TOKEN_KEY, "tok");
        self.store.set(USER_EMAIL_KEY, "me@example.com");
        self
    }

    /// Mount `fragment` so its ids exist in the recording view.
    pub(crate) fn mount(&self, fragment: Fragment) {
        let markup = EmbeddedFragments::markup(fragment);
        assert!(self.view.mount(ids::APP_CONTAINER, markup).is_ok());
    }
}
