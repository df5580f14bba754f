use actix_files::{Files, NamedFile};
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use admin_shared::config::{Config, ConfigError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_STATIC_ROOT: &str = "./client";

#[derive(Debug, Error)]
enum HostError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not a usable admin configuration: {source}", path.display())]
    Config { path: PathBuf, source: ConfigError },
}

/// Host settings, taken from `ADMIN_BIND`, `ADMIN_STATIC_ROOT` and `ADMIN_CONFIG`.
struct Settings {
    bind: String,
    static_root: PathBuf,
    config_path: PathBuf,
}

impl Settings {
    fn from_env() -> Self {
        let static_root = PathBuf::from(
            env::var("ADMIN_STATIC_ROOT").unwrap_or_else(|_| DEFAULT_STATIC_ROOT.to_string()),
        );
        let config_path = env::var("ADMIN_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| static_root.join("config.json"));

        Settings {
            bind: env::var("ADMIN_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            static_root,
            config_path,
        }
    }
}

fn load_config(path: &Path) -> Result<Config, HostError> {
    let text = fs::read_to_string(path).map_err(|source| HostError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_json(&text).map_err(|source| HostError::Config {
        path: path.to_path_buf(),
        source,
    })
}

struct AppData {
    config: Config,
    static_root: PathBuf,
}

// ---- Client assets ----

/// The validated configuration, normalised.
#[get("/admin/config.json")]
async fn config_json(data: web::Data<AppData>) -> impl Responder {
    HttpResponse::Ok().json(&data.config)
}

async fn index(data: web::Data<AppData>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open(data.static_root.join("index.html"))?)
}

fn routes(data: web::Data<AppData>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let root = data.static_root.clone();
        cfg.app_data(data)
            .service(config_json)
            .service(Files::new("/admin/locales", root.join("public/locales")))
            .service(Files::new("/public", root.join("public")))
            .service(Files::new("/pkg", root.join("pkg")))
            // every other path belongs to the client router
            .service(web::resource("/{tail:.*}").route(web::get().to(index)));
    }
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    let config = match load_config(&settings.config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "refusing to start");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    tracing::info!(
        bind = %settings.bind,
        api_root = %config.api_root,
        locales = config.locales.len(),
        "serving admin client from {}",
        settings.static_root.display()
    );

    let data = web::Data::new(AppData {
        config,
        static_root: settings.static_root,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(routes(data.clone()))
    })
    .bind(settings.bind.as_str())?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{
        call_and_read_body, call_and_read_body_json, call_service, init_service, TestRequest,
    };
    use tempfile::TempDir;

    const INDEX: &str = "<section id=\"app\"></section>";

    fn static_root(config: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), INDEX).unwrap();
        fs::create_dir_all(dir.path().join("public/locales")).unwrap();
        fs::write(
            dir.path().join("public/locales/fr.json"),
            r#"{"common": {"close": "Fermer"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("config.json"), config).unwrap();
        dir
    }

    fn app_data(dir: &TempDir) -> web::Data<AppData> {
        web::Data::new(AppData {
            config: load_config(&dir.path().join("config.json")).unwrap(),
            static_root: dir.path().to_path_buf(),
        })
    }

    const CONFIG: &str = r#"{
        "locales": [{"locale": "fr", "name": "french", "prefix": "/fr"}],
        "defaultLocale": "fr",
        "api_root": "https://api.example.org/"
    }"#;

    #[actix_web::test]
    async fn serves_normalized_config() {
        let dir = static_root(CONFIG);
        let app = init_service(App::new().configure(routes(app_data(&dir)))).await;

        let req = TestRequest::get().uri("/admin/config.json").to_request();
        let body: serde_json::Value = call_and_read_body_json(&app, req).await;
        assert_eq!(body["api_root"], "https://api.example.org");
        assert_eq!(body["defaultLocale"], "fr");
        assert_eq!(body["locales"][0]["prefix"], "/fr");
    }

    #[actix_web::test]
    async fn client_routes_fall_back_to_index() {
        let dir = static_root(CONFIG);
        let app = init_service(App::new().configure(routes(app_data(&dir)))).await;

        for path in ["/", "/admin", "/fr/admin/enterprise/4"] {
            let req = TestRequest::get().uri(path).to_request();
            let body = call_and_read_body(&app, req).await;
            assert_eq!(&body[..], INDEX.as_bytes(), "path {}", path);
        }
    }

    #[actix_web::test]
    async fn serves_locale_catalogs() {
        let dir = static_root(CONFIG);
        let app = init_service(App::new().configure(routes(app_data(&dir)))).await;

        let req = TestRequest::get().uri("/admin/locales/fr.json").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn refuses_unusable_config() {
        let dir = static_root(r#"{"api_root": ""}"#);
        let err = load_config(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(
            err,
            HostError::Config {
                source: ConfigError::MissingApiRoot,
                ..
            }
        ));

        let err = load_config(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, HostError::Read { .. }));
    }
}
