use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use references_core::api::form::FORM_CONTENT_TYPE;
use references_core::{ClientError, ErrorPayload, FormBody};

use crate::dom::js_message;

fn network(value: JsValue) -> ClientError {
    ClientError::Network(js_message(&value))
}

/// `POST` a form body and decode the JSON reply.
///
/// Non-2xx replies become [`ClientError::Http`], carrying the `error` field of
/// the body when the server sent one.
pub(crate) async fn post_form<T: DeserializeOwned>(
    url: &str,
    body: &FormBody,
) -> Result<T, ClientError> {
    let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".to_string()))?;

    let headers = Headers::new().map_err(network)?;
    headers
        .set("Content-Type", FORM_CONTENT_TYPE)
        .map_err(network)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body.as_str()));

    let request = Request::new_with_str_and_init(url, &init).map_err(network)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        return Err(ClientError::Http {
            status: response.status(),
            message: ErrorPayload::from_json(&text).error,
        });
    }

    serde_json::from_str(&text).map_err(|err| ClientError::Malformed(err.to_string()))
}
