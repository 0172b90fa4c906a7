//! Page element lookup and small DOM helpers

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

/// Class that hides an element (Bootstrap display utility)
pub const HIDDEN: &str = "d-none";
/// Class on the upload area while a file is dragged over it
pub const DRAG_OVER: &str = "dragover";

/// Every element the controller touches, looked up once at mount
#[derive(Clone)]
pub struct Elements {
    pub upload_area: HtmlElement,
    pub file_input: HtmlInputElement,
    pub upload_content: HtmlElement,
    pub file_info: HtmlElement,
    pub file_name: HtmlElement,
    pub file_size: HtmlElement,
    pub remove_file: HtmlElement,
    pub form: HtmlFormElement,
    pub year: HtmlSelectElement,
    pub submit: HtmlElement,
    pub progress_section: HtmlElement,
    pub progress_text: HtmlElement,
    pub result_section: HtmlElement,
    pub result_message: HtmlElement,
    pub download: HtmlElement,
    pub analyze: HtmlElement,
    pub reset: HtmlElement,
    pub error_section: HtmlElement,
    pub error_message: HtmlElement,
    pub retry: HtmlElement,
    pub analysis_section: HtmlElement,
    pub download_from_analysis: HtmlElement,
    pub close_analysis: HtmlElement,
    pub stats: StatElements,
}

/// Analysis panel contents
#[derive(Clone)]
pub struct StatElements {
    pub total_articles: HtmlElement,
    pub total_columns: HtmlElement,
    pub file_size: HtmlElement,
    pub missing_values: HtmlElement,
    pub missing_section: HtmlElement,
    pub missing_list: HtmlElement,
    pub tr_percentage: HtmlElement,
    pub en_percentage: HtmlElement,
    pub tr_bar: HtmlElement,
    pub en_bar: HtmlElement,
    pub preview_body: HtmlElement,
    /// Optional lists, not present on every page revision
    pub year_distribution: Option<HtmlElement>,
    pub text_lengths: Option<HtmlElement>,
}

impl Elements {
    pub fn lookup(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            upload_area: by_id(document, "uploadArea")?,
            file_input: by_id(document, "pdfFile")?,
            upload_content: by_id(document, "uploadContent")?,
            file_info: by_id(document, "fileInfo")?,
            file_name: by_id(document, "fileName")?,
            file_size: by_id(document, "fileSize")?,
            remove_file: by_id(document, "removeFile")?,
            form: by_id(document, "uploadForm")?,
            year: by_id(document, "year")?,
            submit: by_id(document, "submitBtn")?,
            progress_section: by_id(document, "progressSection")?,
            progress_text: by_id(document, "progressText")?,
            result_section: by_id(document, "resultSection")?,
            result_message: by_id(document, "resultMessage")?,
            download: by_id(document, "downloadBtn")?,
            analyze: by_id(document, "analyzeBtn")?,
            reset: by_id(document, "resetBtn")?,
            error_section: by_id(document, "errorSection")?,
            error_message: by_id(document, "errorMessage")?,
            retry: by_id(document, "retryBtn")?,
            analysis_section: by_id(document, "analysisSection")?,
            download_from_analysis: by_id(document, "downloadBtnFromAnalysis")?,
            close_analysis: by_id(document, "closeAnalysisBtn")?,
            stats: StatElements {
                total_articles: by_id(document, "statTotalArticles")?,
                total_columns: by_id(document, "statTotalColumns")?,
                file_size: by_id(document, "statFileSize")?,
                missing_values: by_id(document, "statMissingValues")?,
                missing_section: by_id(document, "missingDetailsSection")?,
                missing_list: by_id(document, "missingDetailsList")?,
                tr_percentage: by_id(document, "trPercentage")?,
                en_percentage: by_id(document, "enPercentage")?,
                tr_bar: by_id(document, "trProgressBar")?,
                en_bar: by_id(document, "enProgressBar")?,
                preview_body: by_id(document, "dataPreviewBody")?,
                year_distribution: by_id(document, "yearDistributionList").ok(),
                text_lengths: by_id(document, "textLengthList").ok(),
            },
        })
    }
}

/// Find an element by id and cast it to the expected type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

/// Add or remove the hiding class
pub fn set_visible(element: &Element, visible: bool) -> Result<(), JsValue> {
    if visible {
        element.class_list().remove_1(HIDDEN)
    } else {
        element.class_list().add_1(HIDDEN)
    }
}

pub fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Create an element with optional class and text
pub fn create(
    document: &Document,
    tag: &str,
    class: Option<&str>,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    if let Some(text) = text {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

/// Remove all children of `element`
pub fn clear(element: &Element) {
    element.set_inner_html("");
}

/// Best-effort string from a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
