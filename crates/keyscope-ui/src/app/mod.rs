//! Browser bootstrap: platform ports, DOM listeners and the first route.
//!
//! # Design
//! - Clicks, submits and form changes are delegated from `document`, so
//!   swapping fragments never orphans a handler.
//! - Listeners that need a specific element (the upload drop zone, the
//!   keyword filters) are rebound from the router's render hook and dropped
//!   on the next render.
//! - Every handler runs on `spawn_local` and finishes by following any
//!   navigation a controller queued.

mod dom;
mod fragments;
mod history;
mod logging;
mod preferences;
mod storage;
mod timer;

use crate::context::{AppContext, Ports};
use crate::core::fragments::{EmbeddedFragments, FragmentSource};
use crate::core::navigation::History;
use crate::core::view::ids;
use crate::features::keywords::controller::DetailTab;
use crate::router::Router;
use crate::router::routes::Screen;
use crate::services::fetch::GlooTransport;
use crate::services::http::{FileHandle, UploadFile};
use anyhow::anyhow;
use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{document, window};
use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

const LOGIN_EMAIL: &str = "login-email";
const LOGIN_PASSWORD: &str = "login-password";
const SIGNUP_EMAIL: &str = "signup-email";
const SIGNUP_PASSWORD: &str = "signup-password";
const SIGNUP_CONFIRM_PASSWORD: &str = "signup-confirm-password";
const ACTIVATION_TOKEN: &str = "activation-token";

/// Boot the dashboard into `#app-container`.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = boot() {
        console::error!("keyscope failed to start", err.to_string());
    }
}

fn boot() -> anyhow::Result<()> {
    let config = preferences::load_config();
    if let Err(err) = logging::init_logging(&config.log_level) {
        console::warn!(err.to_string());
    }
    document()
        .get_element_by_id(ids::APP_CONTAINER)
        .ok_or_else(|| anyhow!("#{} is missing from the host page", ids::APP_CONTAINER))?;

    let fragments: Rc<dyn FragmentSource> = match config.fragment_base_url.as_deref() {
        Some(base) => Rc::new(fragments::RemoteFragments::new(base)),
        None => Rc::new(EmbeddedFragments),
    };
    let ctx = AppContext::new(
        config,
        Ports {
            store: Rc::new(storage::BrowserStore),
            transport: Rc::new(GlooTransport),
            view: Rc::new(dom::DomView),
            fragments,
            history: Rc::new(history::BrowserHistory),
            timer: Rc::new(timer::BrowserTimer),
        },
    );
    let router = Router::new(ctx);
    install_render_hook(&router);

    for listener in document_listeners(&router) {
        listener.forget();
    }

    tracing::info!("keyscope dashboard starting");
    dispatch(&router, |router| async move { router.initial_load().await });
    Ok(())
}

/// Run `task` against the router, then follow whatever navigation it queued.
fn dispatch<Fut>(router: &Rc<Router>, task: impl FnOnce(Rc<Router>) -> Fut + 'static)
where
    Fut: Future<Output = ()> + 'static,
{
    let router = Rc::clone(router);
    spawn_local(async move {
        task(Rc::clone(&router)).await;
        router.follow_pending().await;
    });
}

fn install_render_hook(router: &Rc<Router>) {
    let bound: Rc<RefCell<Vec<EventListener>>> = Rc::default();
    let weak = Rc::downgrade(router);
    router.set_render_hook(Rc::new(move |screen| {
        bound.borrow_mut().clear();
        let listeners = match screen {
            Screen::Upload => upload_area_listeners(&weak),
            Screen::Keywords => filter_listeners(&weak),
            _ => Vec::new(),
        };
        bound.borrow_mut().extend(listeners);
        tracing::debug!(?screen, "screen rendered");
    }));
}

fn document_listeners(router: &Rc<Router>) -> Vec<EventListener> {
    let doc = document();
    let prevent = EventListenerOptions::enable_prevent_default();

    let on_click = {
        let router = Rc::clone(router);
        EventListener::new_with_options(&doc, "click", prevent, move |event| {
            if let Some(target) = target_element(event) {
                handle_click(&router, event, &target);
            }
        })
    };

    let on_submit = {
        let router = Rc::clone(router);
        EventListener::new_with_options(&doc, "submit", prevent, move |event| {
            if let Some(form) = target_element(event) {
                event.prevent_default();
                handle_submit(&router, &form.id());
            }
        })
    };

    let on_change = {
        let router = Rc::clone(router);
        EventListener::new(&doc, "change", move |event| {
            let Some(target) = target_element(event) else {
                return;
            };
            if target.id() == ids::FILE_INPUT {
                let file = target
                    .dyn_ref::<HtmlInputElement>()
                    .and_then(HtmlInputElement::files)
                    .and_then(|files| files.get(0))
                    .map(upload_file);
                router.upload().select_file(file);
            }
        })
    };

    let on_popstate = {
        let router = Rc::clone(router);
        EventListener::new(&window(), "popstate", move |_event| {
            let path = history::BrowserHistory.location();
            dispatch(&router, move |router| async move {
                router.on_history_change(&path).await;
            });
        })
    };

    vec![on_click, on_submit, on_change, on_popstate]
}

fn handle_click(router: &Rc<Router>, event: &Event, target: &Element) {
    if let Some(id) = closest_attribute(target, "data-keyword-id") {
        dispatch(router, move |router| async move {
            router.keywords().view_details(&id);
        });
    } else if let Some(tab) = closest_attribute(target, "data-tab") {
        if let Some(tab) = DetailTab::from_name(&tab) {
            router.keywords().show_tab(tab);
        }
    } else if let Some(action) = closest_attribute(target, "data-action") {
        event.prevent_default();
        handle_action(router, &action);
    } else if let Some(path) = closest_attribute(target, "data-nav") {
        event.prevent_default();
        dispatch(router, move |router| async move {
            router.navigate(&path).await;
        });
    }
}

fn handle_action(router: &Rc<Router>, action: &str) {
    match action {
        "logout" => dispatch(router, |router| async move { router.auth().logout() }),
        "resend-code" => dispatch(router, |router| async move {
            router.auth().resend_code().await;
        }),
        "clear-file" => router.upload().clear(),
        "back" => dispatch(router, |router| async move { router.keywords().back() }),
        other => tracing::debug!(action = other, "unhandled action"),
    }
}

fn handle_submit(router: &Rc<Router>, form_id: &str) {
    match form_id {
        ids::LOGIN_FORM => {
            let email = input_value(LOGIN_EMAIL);
            let password = input_value(LOGIN_PASSWORD);
            dispatch(router, move |router| async move {
                router.auth().sign_in(&email, &password).await;
            });
        }
        ids::SIGNUP_FORM => {
            let email = input_value(SIGNUP_EMAIL);
            let password = input_value(SIGNUP_PASSWORD);
            let confirm = input_value(SIGNUP_CONFIRM_PASSWORD);
            dispatch(router, move |router| async move {
                router.auth().sign_up(&email, &password, &confirm).await;
            });
        }
        ids::ACTIVATE_FORM => {
            let token = input_value(ACTIVATION_TOKEN);
            dispatch(router, move |router| async move {
                router.auth().activate(&token).await;
            });
        }
        ids::UPLOAD_FORM => dispatch(router, |router| async move {
            router.upload().handle_upload().await;
        }),
        other => tracing::debug!(form = other, "unhandled submit"),
    }
}

fn upload_area_listeners(router: &Weak<Router>) -> Vec<EventListener> {
    let Some(area) = document().get_element_by_id(ids::UPLOAD_AREA) else {
        return Vec::new();
    };
    let prevent = EventListenerOptions::enable_prevent_default();
    let drag_listener = |kind: &'static str, over: bool| {
        let router = router.clone();
        EventListener::new_with_options(&area, kind, prevent, move |event| {
            event.prevent_default();
            event.stop_propagation();
            if let Some(router) = router.upgrade() {
                router.upload().set_drag_over(over);
            }
        })
    };
    let on_drop = {
        let router = router.clone();
        EventListener::new_with_options(&area, "drop", prevent, move |event| {
            event.prevent_default();
            event.stop_propagation();
            let Some(router) = router.upgrade() else {
                return;
            };
            router.upload().set_drag_over(false);
            let file = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                router.upload().select_file(Some(upload_file(file)));
            }
        })
    };
    let on_browse = EventListener::new(&area, "click", |event| {
        let from_input = target_element(event).is_some_and(|el| el.id() == ids::FILE_INPUT);
        if from_input {
            return;
        }
        if let Some(input) = document()
            .get_element_by_id(ids::FILE_INPUT)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            input.click();
        }
    });
    vec![
        drag_listener("dragover", true),
        drag_listener("dragleave", false),
        on_drop,
        on_browse,
    ]
}

fn filter_listeners(router: &Weak<Router>) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    for (id, kind) in [(ids::STATUS_FILTER, "change"), (ids::SEARCH_FILTER, "input")] {
        let Some(element) = document().get_element_by_id(id) else {
            continue;
        };
        let router = router.clone();
        listeners.push(EventListener::new(&element, kind, move |_event| {
            if let Some(router) = router.upgrade() {
                router
                    .keywords()
                    .apply_filters(&select_value(ids::STATUS_FILTER), &input_value(ids::SEARCH_FILTER));
            }
        }));
    }
    listeners
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest_attribute(element: &Element, name: &str) -> Option<String> {
    element
        .closest(&format!("[{name}]"))
        .ok()
        .flatten()?
        .get_attribute(name)
}

fn input_value(id: &str) -> String {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn select_value(id: &str) -> String {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn upload_file(file: web_sys::File) -> UploadFile {
    UploadFile {
        name: file.name(),
        mime: file.type_(),
        size: file.size() as u64,
        handle: FileHandle::Browser(file),
    }
}
