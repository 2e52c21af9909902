//! Browser entry point for the auth link toggle.
//!
//! `hydrate()` is called by the loader `HydrationScripts` emits into the page
//! shell. It installs console logging, then runs [`AuthNavToggle`] against
//! the live document once the DOM is ready; the link set is mounted into the
//! container as a Leptos view. Requires a browser environment.

use std::sync::LazyLock;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DocumentReadyState, HtmlElement};

use crate::app::AuthLinks;
use crate::nav::NavLink;
use crate::toggle::{AuthNavToggle, PageDom};

static TOGGLE: LazyLock<AuthNavToggle> = LazyLock::new(AuthNavToggle::new);

/// `PageDom` over a real `web_sys::Document`.
pub struct WebPage {
    document: Document,
}

impl WebPage {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn container(&self, selector: &str) -> Option<HtmlElement> {
        match self.document.query_selector(selector) {
            Ok(Some(el)) => el.dyn_into::<HtmlElement>().ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = ?e, %selector, "invalid auth container selector");
                None
            }
        }
    }
}

impl PageDom for WebPage {
    fn text_by_id(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
    }

    fn mount_links(&self, selector: &str, links: Vec<NavLink>) -> bool {
        let Some(container) = self.container(selector) else {
            return false;
        };
        container.set_text_content(None);
        // Mounted for the lifetime of the page.
        leptos::mount::mount_to(container, move || view! { <AuthLinks links/> }).forget();
        true
    }
}

#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() != DocumentReadyState::Loading {
        let _ = TOGGLE.run(&WebPage::new(document));
        return;
    }

    let page = WebPage::new(document.clone());
    let on_ready = Closure::once(move || {
        let _ = TOGGLE.run(&page);
    });
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        tracing::warn!(error = ?e, "failed to register DOMContentLoaded listener");
        return;
    }
    // Listener outlives this call; the page owns it from here.
    on_ready.forget();
}
