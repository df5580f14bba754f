use crate::{admin_url, api, edit_form, reporter, widgets, Context, LoginChanged};
use admin_shared::{
    api::ApiError,
    enterprise::Enterprise,
    form::{Arrival, EditPage},
};
use seed::{prelude::*, *};

pub struct Model {
    page: EditPage,
    form: Option<edit_form::Model>,
    request: Option<CmdHandle>,
}

pub enum Msg {
    Fetched(u64, Result<Enterprise, ApiError>),
    Form(edit_form::Msg),
}

pub fn init(id: u64, ctx: &Context, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        page: EditPage::new(id),
        form: None,
        request: None,
    };
    fetch(&mut model, ctx, orders);
    model
}

/// Switches to another enterprise while staying on the page.
pub fn open(id: u64, model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    if model.page.open(id) {
        model.form = None;
        fetch(model, ctx, orders);
    }
}

fn fetch(model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    let api_root = ctx.api_root().to_owned();
    let locales = ctx.config.locales.clone();
    let id = model.page.id();
    model.request = Some(orders.perform_cmd_with_handle(async move {
        Msg::Fetched(id, api::get_enterprise(api_root, id, locales).await)
    }));
}

pub fn update(msg: Msg, model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Fetched(id, result) => match model.page.accept(id, result) {
            Arrival::Stale => {
                orders.skip();
            }
            Arrival::Show(enterprise) => {
                model.request = None;
                model.form = Some(edit_form::init(enterprise));
            }
            Arrival::LoggedOut => {
                model.request = None;
                orders.notify(LoginChanged(false)).request_url(admin_url());
            }
            Arrival::Missing(err) => {
                model.request = None;
                reporter::notify(
                    &ctx.logger,
                    &format!("could not load enterprise {}: {}", id, err),
                    orders,
                );
            }
        },

        Msg::Form(msg) => {
            if let Some(form) = &mut model.form {
                edit_form::update(msg, form, ctx, &mut orders.proxy(Msg::Form));
            }
        }
    }
}

pub fn view(model: &Model, ctx: &Context) -> Node<Msg> {
    if model.page.missing() {
        return widgets::not_found(ctx);
    }
    match &model.form {
        Some(form) if edit_form::enterprise_id(form) == model.page.id() => {
            edit_form::view(form, ctx).map_msg(Msg::Form)
        }
        _ => widgets::loading(),
    }
}
