use crate::{admin_url, api, Context, LoginChanged};
use admin_shared::{
    account::{AccountEffect, AccountState, EnterpriseRef, Permissions, PermissionsView},
    api::ApiError,
};
use seed::{prelude::*, *};

#[derive(Default)]
pub struct Model {
    state: AccountState,
    api_root: String,
    request: Option<CmdHandle>,
}

pub enum Msg {
    Fetched(Result<Permissions, ApiError>),
}

pub fn init(ctx: &Context, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        api_root: ctx.api_root().to_owned(),
        ..Model::default()
    };
    model.state.begin();
    fetch_permissions(&mut model, orders);
    model
}

/// Fetches again if the shell now points at another API.
pub fn sync_api_root(model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    if model.api_root != ctx.api_root() {
        model.api_root = ctx.api_root().to_owned();
        fetch_permissions(model, orders);
    }
}

pub fn refresh(model: &mut Model, orders: &mut impl Orders<Msg>) {
    fetch_permissions(model, orders);
}

fn fetch_permissions(model: &mut Model, orders: &mut impl Orders<Msg>) {
    if model.api_root.is_empty() {
        return;
    }
    let api_root = model.api_root.clone();
    // replacing the handle aborts a request still in flight
    model.request = Some(orders.perform_cmd_with_handle(async move {
        Msg::Fetched(api::get_permissions(api_root).await)
    }));
}

pub fn update(msg: Msg, model: &mut Model, _ctx: &Context, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Fetched(result) => {
            model.request = None;
            match model.state.apply(result) {
                AccountEffect::LoggedIn => {
                    orders.notify(LoginChanged(true));
                }
                AccountEffect::LoggedOut { .. } => {
                    orders.notify(LoginChanged(false)).request_url(admin_url());
                }
                AccountEffect::Log(message) => {
                    log!(message);
                    orders.skip();
                }
            }
        }
    }
}

pub fn view(model: &Model, ctx: &Context) -> Node<Msg> {
    div![
        attrs! {At::Class => "accountpage-component page"},
        h1![ctx.t("accountPage:account")],
        match model.state.view() {
            PermissionsView::Loading => nodes![li![ctx.t("accountPage:loading")]],
            PermissionsView::NoPermissions => nodes![p![ctx.t("accountPage:noPermissions")]],
            PermissionsView::DirectoryAdmin => nodes![p![ctx.t("accountPage:editPermissions")]],
            PermissionsView::Enterprises(enterprises) => enterprise_list(enterprises, ctx),
        }
    ]
}

fn enterprise_list(enterprises: &[EnterpriseRef], ctx: &Context) -> Vec<Node<Msg>> {
    nodes![
        p![ctx.t("accountPage:editEnterprises")],
        ul![
            attrs! {At::Class => "permissions__list"},
            enterprises.iter().map(|enterprise| li![
                attrs! {At::Class => "permission-item"},
                enterprise.label(),
                a![
                    attrs! {At::Class => "edit-enterprise", At::Href => enterprise.edit_path()},
                    ctx.t("accountPage:edit")
                ],
            ])
        ],
    ]
}
