use crate::Context;
use admin_shared::api::Endpoints;
use admin_shared::route::ADMIN_PATH;
use seed::{prelude::*, *};

pub fn loading<Ms: 'static>() -> Node<Ms> {
    div![
        attrs! {At::Class => "loading-component"},
        div![
            attrs![At::Class => "spinner-border text-secondary"],
            span![attrs![At::Class => "sr-only"], "Loading..."],
        ]
    ]
}

pub fn flash_message<Ms: 'static>(kind: &str, message: &str, on_dismiss: fn() -> Ms) -> Node<Ms> {
    div![
        attrs! {At::Class => format!("flash-message flash-message--{}", kind)},
        span![message],
        button![
            attrs! {At::Class => "flash-message__close", At::Type => "button"},
            ev(Ev::Click, move |_| on_dismiss()),
            "×"
        ],
    ]
}

pub fn modal_error<Ms: 'static>(message: &str, ctx: &Context, on_clear: fn() -> Ms) -> Node<Ms> {
    div![
        attrs! {At::Class => "modal-overlay"},
        div![
            attrs! {At::Class => "modal modal--error"},
            p![message],
            input![
                attrs! {
                    At::Class => "button button--default",
                    At::Type => "button",
                    At::Value => ctx.t("common:close"),
                },
                ev(Ev::Click, move |_| on_clear()),
            ],
        ]
    ]
}

pub fn not_found<Ms: 'static>(ctx: &Context) -> Node<Ms> {
    div![
        attrs! {At::Class => "page notfound-component"},
        p![ctx.t("notFound:pageNotFound")],
    ]
}

pub fn top_bar<Ms: 'static>(logged_in: bool, ctx: &Context) -> Node<Ms> {
    let api = Endpoints::new(ctx.api_root());
    nav![
        attrs! {At::Class => "topbar-component"},
        a![
            attrs! {At::Class => "topbar__brand", At::Href => ADMIN_PATH},
            ctx.t("topBar:directory")
        ],
        if logged_in {
            a![
                attrs! {At::Class => "topbar__session", At::Href => api.logout()},
                ctx.t("topBar:logout")
            ]
        } else {
            a![
                attrs! {At::Class => "topbar__session", At::Href => api.login()},
                ctx.t("topBar:login")
            ]
        },
    ]
}
