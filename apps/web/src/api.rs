use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Dropdown values; the server always lists `All` first.
#[derive(serde::Deserialize)]
pub struct FilterOptions {
    pub options: Vec<String>,
}

#[derive(serde::Deserialize)]
pub struct DashboardViews {
    pub filter: String,
    pub map: MapSpec,
    pub bar: BarSpec,
    pub table: TableSpec,
}

#[derive(serde::Deserialize)]
pub struct MapSpec {
    pub title: String,
    pub domain: Option<[f64; 2]>,
    pub regions: Vec<MapRegion>,
}

/// The slice of a map region the canvas draws. Indicator fields in the
/// payload are ignored; the server has already turned them into `fill`.
#[derive(serde::Deserialize)]
pub struct MapRegion {
    pub geometry: Option<serde_json::Value>,
    pub fill: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct BarSpec {
    pub title: String,
    pub bars: Vec<CategoryCount>,
}

#[derive(serde::Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(serde::Deserialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub const OPTIONS_URL: &str = "/api/options";

pub fn search_url(query: &str) -> String {
    format!("/api/options/search?q={}", encode(query))
}

pub fn views_url(filter: &str) -> String {
    format!("/api/views?country={}", encode(filter))
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

/// GETs `url` from the dashboard server and decodes the JSON body.
/// Failures are logged to the console and yield `None`.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Option<T> {
    let window = web_sys::window()?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let Ok(request) = Request::new_with_str_and_init(url, &opts) else {
        return None;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        web_sys::console::error_1(&format!("Request to {url} failed").into());
        return None;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        return None;
    };

    let Ok(body) = response.json() else {
        web_sys::console::error_1(&format!("Response from {url} is not JSON").into());
        return None;
    };

    let Ok(json) = wasm_bindgen_futures::JsFuture::from(body).await else {
        web_sys::console::error_1(&format!("Failed to read {url} body").into());
        return None;
    };

    match serde_wasm_bindgen::from_value::<T>(json) {
        Ok(data) => Some(data),
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to parse {url}: {error}").into());
            None
        }
    }
}
