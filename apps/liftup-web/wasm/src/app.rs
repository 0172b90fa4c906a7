//! Mounting the controller on the page
//!
//! `LiftUpApp` owns the controller and every event listener. Dropping it
//! (or calling `free()` from JavaScript) detaches the listeners.

use std::rc::Rc;

use liftup_core::{ControllerConfig, FileCandidate, FormController, SelectionSource};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Event, EventTarget, File, FileList};

use crate::backend::FetchBackend;
use crate::dom::{self, Elements, DRAG_OVER};
use crate::timer;
use crate::ui::DomUi;

type Controller = FormController<FetchBackend, DomUi>;

/// An event listener removed again on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// The mounted upload page
#[wasm_bindgen]
pub struct LiftUpApp {
    controller: Rc<Controller>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl LiftUpApp {
    /// Look up the page elements and wire every handler.
    ///
    /// `config` is an optional plain object, e.g. `{ baseUrl: "/api", locale: "en" }`.
    #[wasm_bindgen(constructor)]
    pub fn mount(config: JsValue) -> Result<LiftUpApp, JsValue> {
        let config: ControllerConfig = if config.is_undefined() || config.is_null() {
            ControllerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?
        };

        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let elements = Elements::lookup(&document)?;

        let backend = FetchBackend::new(
            window.clone(),
            liftup_core::Endpoints::new(&config.base_url),
        );
        let ui = DomUi::new(
            window.clone(),
            document,
            elements.clone(),
            config.notification_duration(),
        );
        let controller = Rc::new(
            FormController::new(backend, ui, config)
                .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?,
        );

        let listeners = wire(&controller, &elements, &window)?;
        controller.refresh();
        tracing::info!("LIFT UP extraction page ready");

        Ok(LiftUpApp {
            controller,
            _listeners: listeners,
        })
    }

    /// Current view state as a plain object, for debugging from the console
    #[wasm_bindgen(js_name = viewState)]
    pub fn view_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.view())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = hasSession)]
    pub fn has_session(&self) -> bool {
        self.controller.session().is_some()
    }
}

fn wire(
    controller: &Rc<Controller>,
    el: &Elements,
    window: &web_sys::Window,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    let input = el.file_input.clone();
    listeners.push(Listener::attach(&el.upload_area, "click", move |_| {
        input.click();
    })?);

    let ctrl = controller.clone();
    let input = el.file_input.clone();
    listeners.push(Listener::attach(&el.file_input, "change", move |_| {
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            if ctrl
                .select_file(candidate(file), SelectionSource::Browse)
                .is_err()
            {
                input.set_value("");
            }
        }
    })?);

    let area = el.upload_area.clone();
    listeners.push(Listener::attach(&el.upload_area, "dragover", move |event| {
        event.prevent_default();
        let _ = area.class_list().add_1(DRAG_OVER);
    })?);

    let area = el.upload_area.clone();
    listeners.push(Listener::attach(&el.upload_area, "dragleave", move |_| {
        let _ = area.class_list().remove_1(DRAG_OVER);
    })?);

    let ctrl = controller.clone();
    let area = el.upload_area.clone();
    let input = el.file_input.clone();
    listeners.push(Listener::attach(&el.upload_area, "drop", move |event| {
        event.prevent_default();
        let _ = area.class_list().remove_1(DRAG_OVER);

        let Some(files) = dropped_files(&event) else {
            return;
        };
        if let Some(file) = files.get(0) {
            if ctrl
                .select_file(candidate(file), SelectionSource::Drop)
                .is_ok()
            {
                input.set_files(Some(&files));
            }
        }
    })?);

    let ctrl = controller.clone();
    listeners.push(Listener::attach(&el.remove_file, "click", move |event| {
        // The button sits inside the upload area
        event.stop_propagation();
        ctrl.reset_selection();
    })?);

    let ctrl = controller.clone();
    let year = el.year.clone();
    listeners.push(Listener::attach(&el.year, "change", move |_| {
        ctrl.set_year(&year.value());
    })?);

    let ctrl = controller.clone();
    let year = el.year.clone();
    listeners.push(Listener::attach(&el.form, "submit", move |event| {
        event.prevent_default();
        let ctrl = ctrl.clone();
        let year = year.value();
        spawn_local(async move {
            // Failures are already on screen
            let _ = ctrl.submit(&year).await;
        });
    })?);

    for button in [&el.download, &el.download_from_analysis] {
        let ctrl = controller.clone();
        let window = window.clone();
        listeners.push(Listener::attach(button, "click", move |_| {
            download(&ctrl, &window);
        })?);
    }

    let ctrl = controller.clone();
    listeners.push(Listener::attach(&el.analyze, "click", move |_| {
        let ctrl = ctrl.clone();
        spawn_local(async move {
            let _ = ctrl.analyze().await;
        });
    })?);

    let ctrl = controller.clone();
    listeners.push(Listener::attach(&el.close_analysis, "click", move |_| {
        ctrl.close_analysis();
    })?);

    let ctrl = controller.clone();
    listeners.push(Listener::attach(&el.reset, "click", move |_| {
        ctrl.start_over();
    })?);

    let ctrl = controller.clone();
    listeners.push(Listener::attach(&el.retry, "click", move |_| {
        ctrl.retry();
    })?);

    Ok(listeners)
}

/// Start the download and queue the temporary-file cleanup
fn download(controller: &Rc<Controller>, window: &web_sys::Window) {
    let Ok(delay) = controller.download() else {
        return;
    };

    let ctrl = controller.clone();
    let scheduled = timer::schedule_once(window, delay, move || {
        spawn_local(async move { ctrl.cleanup().await });
    });
    if let Err(err) = scheduled {
        tracing::warn!("could not schedule cleanup: {}", dom::js_error_message(&err));
    }
}

fn dropped_files(event: &Event) -> Option<FileList> {
    event
        .dyn_ref::<DragEvent>()?
        .data_transfer()?
        .files()
        .filter(|files| files.length() > 0)
}

fn candidate(file: File) -> FileCandidate<File> {
    FileCandidate {
        name: file.name(),
        size: file.size() as u64,
        mime: file.type_(),
        handle: file,
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use crate::dom::fixture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_year_choice_survives_file_removal() {
        let (_, el) = fixture::install();
        let app = LiftUpApp::mount(JsValue::UNDEFINED).unwrap();

        el.year.set_value("2023-2024");
        el.year
            .dispatch_event(&Event::new("change").unwrap())
            .unwrap();
        el.remove_file.click();

        assert_eq!(el.year.value(), "2023-2024");
        assert_eq!(app.controller.view().year, "2023-2024");

        el.reset.click();
        assert_eq!(el.year.value(), "2021-2022");
    }

    #[wasm_bindgen_test]
    fn test_download_without_session_then_retry() {
        let (_, el) = fixture::install();
        let app = LiftUpApp::mount(JsValue::UNDEFINED).unwrap();

        el.download.click();
        assert_eq!(app.controller.view().panel, liftup_core::Panel::Error);
        assert!(!el.error_section.class_list().contains(dom::HIDDEN));

        el.retry.click();
        assert_eq!(app.controller.view().panel, liftup_core::Panel::Idle);
        assert!(el.error_section.class_list().contains(dom::HIDDEN));
        assert!(!app.has_session());
    }
}
