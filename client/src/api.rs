use admin_shared::{
    account::Permissions,
    api::{ApiError, Endpoints, Verb},
    config::{Config, LocaleConfig, CONFIG_PATH},
    enterprise::{Enterprise, EnterpriseAdmin},
    form::MutationRequest,
    i18n::{catalog_path, Catalog},
};
use seed::browser::fetch::{FetchError, Method, Request, Response};
use serde_json::{json, Value};
use web_sys::{File, FormData, RequestCredentials};

fn fetch_error(error: FetchError) -> ApiError {
    match error {
        FetchError::JsonError(err) => ApiError::Decode(format!("{:?}", err)),
        FetchError::StatusError(status) => ApiError::from_status(status.code, &status.text, ""),
        other => ApiError::Network(format!("{:?}", other)),
    }
}

fn js_error(value: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", value))
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::Get,
        Verb::Post => Method::Post,
        Verb::Put => Method::Put,
        Verb::Delete => Method::Delete,
    }
}

/// Sends an API request with the session cookie; anything but 2xx is an error.
async fn send(request: Request<'_>) -> Result<Response, ApiError> {
    let response = request
        .credentials(RequestCredentials::Include)
        .fetch()
        .await
        .map_err(fetch_error)?;

    let status = response.status();
    if status.is_ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.code, &status.text, &body))
}

// ---- Shell ----

pub async fn fetch_config() -> Result<Config, ApiError> {
    let response = Request::new(CONFIG_PATH)
        .fetch()
        .await
        .and_then(Response::check_status)
        .map_err(fetch_error)?;
    let text = response.text().await.map_err(fetch_error)?;
    Config::from_json(&text).map_err(|err| ApiError::Decode(err.to_string()))
}

pub async fn fetch_catalog(locale: String) -> Result<Catalog, ApiError> {
    let response = Request::new(catalog_path(&locale))
        .fetch()
        .await
        .and_then(Response::check_status)
        .map_err(fetch_error)?;
    let document: Value = response.json().await.map_err(fetch_error)?;
    Ok(Catalog::from_json(&locale, &document))
}

// ---- Directory API ----

pub async fn get_permissions(api_root: String) -> Result<Permissions, ApiError> {
    let url = Endpoints::new(&api_root).permissions();
    send(Request::new(url))
        .await?
        .json()
        .await
        .map_err(fetch_error)
}

pub async fn get_enterprise(
    api_root: String,
    id: u64,
    locales: Vec<LocaleConfig>,
) -> Result<Enterprise, ApiError> {
    let url = Endpoints::new(&api_root).enterprise(id);
    let value: Value = send(Request::new(url))
        .await?
        .json()
        .await
        .map_err(fetch_error)?;
    Enterprise::from_json(value, &locales).map_err(|err| ApiError::Decode(err.to_string()))
}

pub async fn mutate(api_root: String, request: MutationRequest) -> Result<(), ApiError> {
    let (verb, url) =
        Endpoints::new(&api_root).mutation(request.mutation, request.id, request.status);
    let mut http = Request::new(url).method(method(verb));
    if let Some(payload) = &request.payload {
        http = http.json(payload).map_err(fetch_error)?;
    }
    send(http).await.map(drop)
}

pub async fn upload_logo(api_root: String, id: u64, file: File) -> Result<(), ApiError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob("logo", &file).map_err(js_error)?;

    let url = Endpoints::new(&api_root).logo(id);
    send(Request::new(url).method(Method::Post).body(form.into()))
        .await
        .map(drop)
}

pub async fn list_admins(api_root: String, id: u64) -> Result<Vec<EnterpriseAdmin>, ApiError> {
    let url = Endpoints::new(&api_root).admins(id);
    send(Request::new(url))
        .await?
        .json()
        .await
        .map_err(fetch_error)
}

pub async fn add_admin(api_root: String, id: u64, email: String) -> Result<(), ApiError> {
    let url = Endpoints::new(&api_root).admins(id);
    let request = Request::new(url)
        .method(Method::Post)
        .json(&json!({ "email": email }))
        .map_err(fetch_error)?;
    send(request).await.map(drop)
}

pub async fn remove_admin(api_root: String, id: u64, admin_id: u64) -> Result<(), ApiError> {
    let url = Endpoints::new(&api_root).admin(id, admin_id);
    send(Request::new(url).method(Method::Delete))
        .await
        .map(drop)
}
