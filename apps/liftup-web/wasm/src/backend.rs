//! `fetch`-based extraction backend

use liftup_core::{
    AnalyzeResponse, Endpoints, ExtractionBackend, ExtractionSession, ProcessResponse,
    TransportError,
};
use liftup_core::api::{FILE_FIELD, YEAR_FIELD};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response, Window};

use crate::dom::js_error_message;

pub struct FetchBackend {
    window: Window,
    endpoints: Endpoints,
}

impl FetchBackend {
    pub fn new(window: Window, endpoints: Endpoints) -> Self {
        Self { window, endpoints }
    }

    async fn send(&self, request: &Request) -> Result<Response, TransportError> {
        let response = JsFuture::from(self.window.fetch_with_request(request))
            .await
            .map_err(network_error)?;
        response.dyn_into::<Response>().map_err(network_error)
    }

    /// Send a request and decode the JSON body.
    ///
    /// The server answers failures with `success: false` and a 4xx/5xx
    /// status, so the body is decoded regardless of status and the status
    /// only matters when the body is not the expected JSON.
    async fn fetch_json<T: DeserializeOwned>(&self, request: &Request) -> Result<T, TransportError> {
        let response = self.send(request).await?;
        let text = response.text().map_err(network_error)?;
        let text = JsFuture::from(text).await.map_err(network_error)?;
        let text = text.as_string().unwrap_or_default();

        match serde_json::from_str(&text) {
            Ok(body) => Ok(body),
            Err(_) if !response.ok() => Err(TransportError::Status(response.status())),
            Err(err) => Err(err.into()),
        }
    }
}

impl ExtractionBackend for FetchBackend {
    type File = File;

    async fn process(&self, file: &File, year: &str) -> Result<ProcessResponse, TransportError> {
        let form = FormData::new().map_err(network_error)?;
        form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
            .map_err(network_error)?;
        form.append_with_str(YEAR_FIELD, year)
            .map_err(network_error)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);
        let request =
            Request::new_with_str_and_init(&self.endpoints.process(), &opts).map_err(network_error)?;

        self.fetch_json(&request).await
    }

    async fn analyze(&self, session: &ExtractionSession) -> Result<AnalyzeResponse, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        let request = Request::new_with_str_and_init(&self.endpoints.analyze(session), &opts)
            .map_err(network_error)?;

        self.fetch_json(&request).await
    }

    async fn cleanup(&self, temp_id: &str) -> Result<(), TransportError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        let request = Request::new_with_str_and_init(&self.endpoints.cleanup(temp_id), &opts)
            .map_err(network_error)?;

        let response = self.send(&request).await?;
        if !response.ok() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(())
    }
}

fn network_error(value: JsValue) -> TransportError {
    TransportError::Network(js_error_message(&value))
}
