use crate::{api, Context};
use admin_shared::{
    admins::AdminList,
    api::ApiError,
    enterprise::{is_plausible_email, EnterpriseAdmin},
};
use seed::{prelude::*, *};

#[derive(Default)]
pub struct Model {
    list: AdminList,
    new_email: String,
    request: Option<CmdHandle>,
}

pub enum Msg {
    Fetched(Result<Vec<EnterpriseAdmin>, ApiError>),
    EmailChanged(String),
    Add,
    Remove(u64),
    Changed(Result<(), ApiError>),
}

/// Loads the admin list the first time the settings tab shows it.
pub fn load(model: &mut Model, enterprise_id: u64, ctx: &Context, orders: &mut impl Orders<Msg>) {
    let id = model.list.show(enterprise_id);
    fetch(id, model, ctx, orders);
}

fn fetch(id: Option<u64>, model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    if let Some(id) = id {
        let api_root = ctx.api_root().to_owned();
        model.request = Some(orders.perform_cmd_with_handle(async move {
            Msg::Fetched(api::list_admins(api_root, id).await)
        }));
    }
}

pub fn update(msg: Msg, model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    let id = match model.list.enterprise_id() {
        Some(id) => id,
        None => return,
    };
    match msg {
        Msg::Fetched(result) => {
            model.request = None;
            model.list.fetched(result);
        }

        Msg::EmailChanged(email) => model.new_email = email,

        Msg::Add => {
            let email = model.new_email.trim().to_string();
            if !is_plausible_email(&email) {
                model.list.fail(ctx.t("enterpriseAdmins:invalidEmail"));
                return;
            }
            model.list.clear_error();
            let api_root = ctx.api_root().to_owned();
            orders.perform_cmd(async move {
                Msg::Changed(api::add_admin(api_root, id, email).await)
            });
        }

        Msg::Remove(admin_id) => {
            model.list.clear_error();
            let api_root = ctx.api_root().to_owned();
            orders.perform_cmd(async move {
                Msg::Changed(api::remove_admin(api_root, id, admin_id).await)
            });
        }

        Msg::Changed(Ok(())) => {
            model.new_email.clear();
            let id = model.list.reload();
            fetch(id, model, ctx, orders);
        }

        Msg::Changed(Err(err)) => model.list.fail(err.to_string()),
    }
}

pub fn view(model: &Model, ctx: &Context) -> Node<Msg> {
    div![
        attrs! {At::Class => "enterpriseadmins-component"},
        h2![ctx.t("enterpriseAdmins:admins")],
        model
            .list
            .error()
            .map(|error| p![attrs! {At::Class => "enterpriseadmins__error"}, error]),
        if model.list.loaded() {
            ul![
                attrs! {At::Class => "enterpriseadmins__list"},
                model.list.admins().iter().map(|admin| {
                    let admin_id = admin.id;
                    li![
                        admin.label(),
                        button![
                            attrs! {At::Class => "button button--destructive", At::Type => "button"},
                            ev(Ev::Click, move |_| Msg::Remove(admin_id)),
                            ctx.t("enterpriseAdmins:remove")
                        ],
                    ]
                })
            ]
        } else {
            p![ctx.t("enterpriseAdmins:loading")]
        },
        div![
            attrs! {At::Class => "enterpriseadmins__add"},
            input![
                attrs! {
                    At::Type => "email",
                    At::Value => model.new_email,
                    At::Placeholder => ctx.t("enterpriseAdmins:email"),
                },
                input_ev(Ev::Input, Msg::EmailChanged),
            ],
            button![
                attrs! {At::Class => "button button--default", At::Type => "button"},
                ev(Ev::Click, |_| Msg::Add),
                ctx.t("enterpriseAdmins:add")
            ],
        ],
    ]
}
