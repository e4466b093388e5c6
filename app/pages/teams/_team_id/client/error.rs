use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid chart payload: {0}")]
	Payload(#[from] serde_json::Error),
	#[error("dom error: {0:?}")]
	Dom(JsValue),
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Error {
		Error::Dom(value)
	}
}

impl From<Error> for JsValue {
	fn from(error: Error) -> JsValue {
		match error {
			Error::Dom(value) => value,
			error => js_sys::Error::new(&error.to_string()).into(),
		}
	}
}
