use admin_shared::{
    account::Permissions, api::ApiError, config::Config, i18n::Catalog, locale::resolve_locale,
    reporter::ErrorLogger, route::Route,
};
use seed::{prelude::*, *};

mod account_page;
mod api;
mod edit_form;
mod edit_page;
mod enterprise_admins;
mod form_fields;
mod reporter;
mod upload_logo;
mod widgets;

/// Everything a page needs from the shell. Handed down explicitly.
pub struct Context {
    pub config: Config,
    pub locale: String,
    pub catalog: Catalog,
    pub logger: ErrorLogger,
}

impl Context {
    pub fn t(&self, key: &str) -> String {
        self.catalog.t(key)
    }

    pub fn api_root(&self) -> &str {
        &self.config.api_root
    }

    pub fn locale_count(&self) -> usize {
        self.config.locales.len()
    }
}

/// Sent by pages when they learn whether the session is alive.
#[derive(Clone, Copy)]
pub struct LoginChanged(pub bool);

/// Sent after an enterprise was deleted so listings get refreshed.
#[derive(Clone, Copy)]
pub struct EnterpriseRemoved(pub u64);

pub fn admin_url() -> Url {
    Url::new().add_path_part("admin")
}

// ------ ------
//     Init
// ------ ------

fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders
        .subscribe(Msg::UrlChanged)
        .subscribe(|LoginChanged(logged_in)| Msg::LoginChanged(logged_in))
        .subscribe(|EnterpriseRemoved(_)| Msg::Refresh)
        .perform_cmd(async { Msg::ConfigFetched(api::fetch_config().await) });

    Model {
        url,
        context: None,
        page: None,
        is_logged_in: false,
        user_is_directory_admin: false,
        logger: ErrorLogger::Console,
    }
}

// ------ ------
//     Model
// ------ ------

struct Model {
    url: Url,
    context: Option<Context>,
    page: Option<Page>,
    is_logged_in: bool,
    user_is_directory_admin: bool,
    logger: ErrorLogger,
}

enum Page {
    Account(account_page::Model),
    EditEnterprise(edit_page::Model),
    NotFound,
}

fn route_of(url: &Url, ctx: &Context) -> Route {
    Route::from_path(url.path(), &ctx.config.locales)
}

fn page_for(route: Route, ctx: &Context, orders: &mut impl Orders<Msg>) -> Page {
    match route {
        Route::Account => Page::Account(account_page::init(ctx, &mut orders.proxy(Msg::Account))),
        Route::EditEnterprise(id) => Page::EditEnterprise(edit_page::init(
            id,
            ctx,
            &mut orders.proxy(Msg::EditEnterprise),
        )),
        Route::NotFound => Page::NotFound,
    }
}

fn fetch_permission_flag(ctx: &Context, orders: &mut impl Orders<Msg>) {
    let api_root = ctx.api_root().to_owned();
    orders.perform_cmd(async move {
        Msg::PermissionFlagFetched(api::get_permissions(api_root).await)
    });
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    UrlChanged(subs::UrlChanged),
    ConfigFetched(Result<Config, ApiError>),
    CatalogFetched(Result<Catalog, ApiError>),
    PermissionFlagFetched(Result<Permissions, ApiError>),
    LoginChanged(bool),
    Refresh,
    Account(account_page::Msg),
    EditEnterprise(edit_page::Msg),
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::ConfigFetched(Ok(config)) => {
            let href = window().location().href().unwrap_or_default();
            let locale = resolve_locale(&config, &href);
            model.logger = ErrorLogger::from_config(config.logger.as_ref());

            let catalog_locale = locale.clone();
            orders.perform_cmd(async move {
                Msg::CatalogFetched(api::fetch_catalog(catalog_locale).await)
            });

            let ctx = Context {
                catalog: Catalog::empty(&locale),
                config,
                locale,
                logger: model.logger.clone(),
            };
            fetch_permission_flag(&ctx, orders);
            model.page = Some(page_for(route_of(&model.url, &ctx), &ctx, orders));
            model.context = Some(ctx);
        }

        Msg::ConfigFetched(Err(err)) => {
            reporter::notify(
                &model.logger,
                &format!("could not load configuration: {}", err),
                orders,
            );
        }

        Msg::CatalogFetched(result) => {
            if let Some(ctx) = &mut model.context {
                match result {
                    Ok(catalog) => ctx.catalog = catalog,
                    Err(err) => reporter::notify(
                        &ctx.logger,
                        &format!("could not load translations for {}: {}", ctx.locale, err),
                        orders,
                    ),
                }
            }
        }

        Msg::PermissionFlagFetched(Ok(permissions)) => {
            if permissions.directory_admin {
                model.user_is_directory_admin = true;
            }
        }

        Msg::PermissionFlagFetched(Err(err)) => {
            reporter::notify(
                &model.logger,
                &format!("could not fetch permissions: {}", err),
                orders,
            );
        }

        Msg::UrlChanged(subs::UrlChanged(url)) => {
            model.url = url;
            let ctx = match &model.context {
                Some(ctx) => ctx,
                None => return,
            };
            let route = route_of(&model.url, ctx);
            let reused = match (route, &mut model.page) {
                (Route::Account, Some(Page::Account(page))) => {
                    account_page::sync_api_root(page, ctx, &mut orders.proxy(Msg::Account));
                    true
                }
                (Route::EditEnterprise(id), Some(Page::EditEnterprise(page))) => {
                    edit_page::open(id, page, ctx, &mut orders.proxy(Msg::EditEnterprise));
                    true
                }
                _ => false,
            };
            if !reused {
                model.page = Some(page_for(route, ctx, orders));
            }
        }

        Msg::LoginChanged(logged_in) => {
            model.is_logged_in = logged_in;
        }

        Msg::Refresh => {
            if let Some(ctx) = &model.context {
                fetch_permission_flag(ctx, orders);
                if let Some(Page::Account(page)) = &mut model.page {
                    account_page::refresh(page, &mut orders.proxy(Msg::Account));
                }
            }
        }

        Msg::Account(msg) => {
            if let (Some(ctx), Some(Page::Account(page))) = (&model.context, &mut model.page) {
                account_page::update(msg, page, ctx, &mut orders.proxy(Msg::Account));
            }
        }

        Msg::EditEnterprise(msg) => {
            if let (Some(ctx), Some(Page::EditEnterprise(page))) = (&model.context, &mut model.page)
            {
                edit_page::update(msg, page, ctx, &mut orders.proxy(Msg::EditEnterprise));
            }
        }
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> Node<Msg> {
    match (&model.context, &model.page) {
        (Some(ctx), Some(page)) => div![
            attrs! {At::Class => if model.user_is_directory_admin {
                "template-component template user-is-admin"
            } else {
                "template-component template"
            }},
            widgets::top_bar(model.is_logged_in, ctx),
            main![attrs! {At::Class => "template__main"}, view_page(page, ctx)],
        ],
        _ => widgets::loading(),
    }
}

fn view_page(page: &Page, ctx: &Context) -> Node<Msg> {
    match page {
        Page::Account(model) => account_page::view(model, ctx).map_msg(Msg::Account),
        Page::EditEnterprise(model) => edit_page::view(model, ctx).map_msg(Msg::EditEnterprise),
        Page::NotFound => widgets::not_found(ctx),
    }
}

// ------ ------
//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
