//! DOM rendering port.

use crate::core::view::{Display, ViewError, ViewPort};
use gloo::console;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

/// Writes straight into `document`, addressing elements by id.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DomView;

fn element(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

impl ViewPort for DomView {
    fn mount(&self, container: &str, html: &str) -> Result<(), ViewError> {
        let target =
            element(container).ok_or_else(|| ViewError::MissingContainer(container.to_string()))?;
        target.set_inner_html(html);
        Ok(())
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(target) = element(id) {
            target.set_text_content(Some(text));
        }
    }

    fn set_html(&self, id: &str, html: &str) {
        if let Some(target) = element(id) {
            target.set_inner_html(html);
        }
    }

    fn set_value(&self, id: &str, value: &str) {
        if let Some(input) = element(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            input.set_value(value);
        }
    }

    fn set_display(&self, id: &str, display: Display) {
        let Some(target) = element(id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        if let Err(err) = target.style().set_property("display", display.as_css()) {
            console::error!("failed to set display", id, err);
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        if let Some(target) = element(id) {
            if let Err(err) = target.toggle_attribute_with_force("disabled", disabled) {
                console::error!("failed to toggle disabled", id, err);
            }
        }
    }

    fn set_class(&self, id: &str, class: &str) {
        if let Some(target) = element(id) {
            target.set_class_name(class);
        }
    }

    fn toggle_class(&self, id: &str, class: &str, on: bool) {
        if let Some(target) = element(id) {
            if let Err(err) = target.class_list().toggle_with_force(class, on) {
                console::error!("failed to toggle class", id, class, err);
            }
        }
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}
