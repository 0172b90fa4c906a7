//! DOM rendering of the controller's view state

use std::cell::{Cell, RefCell};
use std::time::Duration;

use liftup_core::report::{AnalysisView, PreviewRow};
use liftup_core::{Completeness, Notice, Panel, ProgressTicker, Ui, ViewState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlAnchorElement, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::dom::{self, Elements};
use crate::timer::{self, Interval};

pub struct DomUi {
    window: Window,
    document: Document,
    elements: Elements,
    notification_duration: Duration,
    progress: RefCell<Option<Interval>>,
    last_panel: Cell<Panel>,
}

impl DomUi {
    pub fn new(
        window: Window,
        document: Document,
        elements: Elements,
        notification_duration: Duration,
    ) -> Self {
        Self {
            window,
            document,
            elements,
            notification_duration,
            progress: RefCell::new(None),
            last_panel: Cell::new(Panel::Idle),
        }
    }

    fn try_render(&self, view: &ViewState) -> Result<(), JsValue> {
        let el = &self.elements;

        for (panel, section) in [
            (Panel::Progress, &el.progress_section),
            (Panel::Result, &el.result_section),
            (Panel::Error, &el.error_section),
            (Panel::Analysis, &el.analysis_section),
        ] {
            dom::set_visible(section, view.is_visible(panel))?;
        }
        dom::set_visible(&el.submit, view.submit_visible)?;

        match &view.file {
            Some(file) => {
                dom::set_text(&el.file_name, &file.name);
                dom::set_text(&el.file_size, &file.size_label);
                dom::set_visible(&el.upload_content, false)?;
                dom::set_visible(&el.file_info, true)?;
            }
            None => {
                el.file_input.set_value("");
                dom::set_visible(&el.upload_content, true)?;
                dom::set_visible(&el.file_info, false)?;
            }
        }

        if el.year.value() != view.year {
            el.year.set_value(&view.year);
        }

        if let Some(result) = &view.result {
            self.render_result(&result.headline, &result.filename)?;
        }
        if let Some(message) = &view.error {
            dom::set_text(&el.error_message, message);
        }

        let entering = self.last_panel.replace(view.panel) != view.panel;
        if entering && view.panel == Panel::Analysis {
            if let Some(analysis) = &view.analysis {
                self.render_analysis(analysis)?;
            }
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            el.analysis_section
                .scroll_into_view_with_scroll_into_view_options(&options);
        }
        Ok(())
    }

    fn render_result(&self, headline: &str, filename: &str) -> Result<(), JsValue> {
        let target = &self.elements.result_message;
        dom::clear(target);
        target.append_child(&dom::create(&self.document, "strong", None, Some(headline))?.into())?;
        target.append_child(&self.document.create_element("br")?.into())?;
        target.append_child(&dom::create(
            &self.document,
            "small",
            Some("text-muted mt-1"),
            Some(filename),
        )?.into())?;
        Ok(())
    }

    fn render_analysis(&self, analysis: &AnalysisView) -> Result<(), JsValue> {
        let stats = &self.elements.stats;
        dom::set_text(&stats.total_articles, &analysis.total_articles);
        dom::set_text(&stats.total_columns, &analysis.total_columns);
        stats
            .total_columns
            .set_attribute("title", &analysis.column_names)?;
        dom::set_text(&stats.file_size, &analysis.file_size);
        dom::set_text(&stats.missing_values, &analysis.total_missing);

        dom::clear(&stats.missing_list);
        if analysis.has_missing_details() {
            let list = dom::create(&self.document, "ul", Some("mb-0"), None)?;
            for row in &analysis.missing_details {
                let item = self.document.create_element("li")?;
                item.append_child(&dom::create(
                    &self.document,
                    "strong",
                    None,
                    Some(&format!("{}:", row.column)),
                )?.into())?;
                item.append_child(&self.document.create_text_node(&format!(" {}", row.text)))?;
                list.append_child(&item)?;
            }
            stats.missing_list.append_child(&list)?;
        }
        dom::set_visible(&stats.missing_section, analysis.has_missing_details())?;

        // A report without language stats resets the bars left by the last one
        let (tr_label, en_label, tr_width, en_width) = match &analysis.language {
            Some(language) => (
                language.tr_label.as_str(),
                language.en_label.as_str(),
                language.tr_width,
                language.en_width,
            ),
            None => ("0%", "0%", 0.0, 0.0),
        };
        dom::set_text(&stats.tr_percentage, tr_label);
        dom::set_text(&stats.en_percentage, en_label);
        stats
            .tr_bar
            .style()
            .set_property("width", &format!("{}%", tr_width))?;
        stats
            .en_bar
            .style()
            .set_property("width", &format!("{}%", en_width))?;

        dom::clear(&stats.preview_body);
        for row in &analysis.preview {
            stats.preview_body.append_child(&self.preview_row(row)?.into())?;
        }

        if let Some(list) = &stats.year_distribution {
            dom::clear(list);
            for (year, count) in &analysis.year_distribution {
                let item = dom::create(&self.document, "li", None, Some(&format!("{}: {}", year, count)))?;
                list.append_child(&item)?;
            }
        }

        if let Some(list) = &stats.text_lengths {
            dom::clear(list);
            for row in &analysis.text_lengths {
                let item = self.document.create_element("li")?;
                item.append_child(&dom::create(
                    &self.document,
                    "strong",
                    None,
                    Some(&format!("{}:", row.column)),
                )?.into())?;
                item.append_child(&self.document.create_text_node(&format!(" {}", row.text)))?;
                list.append_child(&item)?;
            }
        }
        Ok(())
    }

    fn preview_row(&self, row: &PreviewRow) -> Result<web_sys::Element, JsValue> {
        let tr = self.document.create_element("tr")?;
        tr.append_child(&dom::create(&self.document, "td", None, Some(&row.page))?.into())?;
        tr.append_child(&dom::create(&self.document, "td", None, Some(&row.year))?.into())?;
        for cell in [&row.title_tr, &row.title_en] {
            let td = dom::create(&self.document, "td", None, Some(&cell.display))?;
            td.set_attribute("title", &cell.full)?;
            tr.append_child(&td)?;
        }

        let badge_class = match row.status {
            Completeness::Complete => "badge bg-success",
            Completeness::Incomplete => "badge bg-warning",
        };
        let td = self.document.create_element("td")?;
        td.append_child(&dom::create(
            &self.document,
            "span",
            Some(badge_class),
            Some(&row.status_label),
        )?.into())?;
        tr.append_child(&td)?;
        Ok(tr)
    }

    fn try_notify(&self, notice: &Notice) -> Result<(), JsValue> {
        let body = self.document.body().ok_or("No document body")?;
        let toast = dom::create(
            &self.document,
            "div",
            Some(&format!(
                "alert {} position-fixed top-0 start-50 translate-middle-x mt-3",
                notice.level.css_class()
            )),
            Some(&notice.message),
        )?;
        toast.set_attribute("role", "alert")?;
        if let Some(html) = toast.dyn_ref::<HtmlElement>() {
            let style = html.style();
            style.set_property("z-index", "9999")?;
            style.set_property("min-width", "300px")?;
        }
        body.append_child(&toast)?;

        timer::schedule_once(&self.window, self.notification_duration, move || {
            toast.remove();
        })?;
        Ok(())
    }

    fn try_start_progress(
        &self,
        messages: &'static [&'static str],
        interval: Duration,
    ) -> Result<(), JsValue> {
        let mut ticker = ProgressTicker::new(messages);
        let text = self.elements.progress_text.clone();
        if let Some(first) = ticker.advance() {
            dom::set_text(&text, first);
        }

        let timer = Interval::new(&self.window, interval, move || {
            if let Some(message) = ticker.advance() {
                dom::set_text(&text, message);
            }
        })?;
        // Replacing a running timer drops (and clears) the old one
        *self.progress.borrow_mut() = Some(timer);
        Ok(())
    }

    fn try_trigger_download(&self, url: &str, filename: &str) -> Result<(), JsValue> {
        let body = self.document.body().ok_or("No document body")?;
        let link: HtmlAnchorElement = self.document.create_element("a")?.dyn_into()?;
        link.set_href(url);
        link.set_download(filename);
        body.append_child(&link)?;
        link.click();
        link.remove();
        Ok(())
    }
}

impl Ui for DomUi {
    fn render(&self, view: &ViewState) {
        if let Err(err) = self.try_render(view) {
            tracing::error!("render failed: {}", dom::js_error_message(&err));
        }
    }

    fn notify(&self, notice: &Notice) {
        if let Err(err) = self.try_notify(notice) {
            tracing::error!("notification failed: {}", dom::js_error_message(&err));
        }
    }

    fn start_progress(&self, messages: &'static [&'static str], interval: Duration) {
        if let Err(err) = self.try_start_progress(messages, interval) {
            tracing::error!("progress timer failed: {}", dom::js_error_message(&err));
        }
    }

    fn stop_progress(&self) {
        self.progress.borrow_mut().take();
    }

    fn trigger_download(&self, url: &str, filename: &str) {
        if let Err(err) = self.try_trigger_download(url, filename) {
            tracing::error!("download failed: {}", dom::js_error_message(&err));
        }
    }
}
