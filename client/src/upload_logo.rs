use crate::{api, Context};
use admin_shared::api::ApiError;
use seed::{prelude::*, *};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

#[derive(Default)]
pub struct Model {
    file: Option<File>,
    uploading: bool,
    outcome: Option<Result<(), String>>,
}

pub enum Msg {
    FileChosen(Option<File>),
    Upload,
    Uploaded(Result<(), ApiError>),
}

pub fn update(
    msg: Msg,
    model: &mut Model,
    enterprise_id: u64,
    ctx: &Context,
    orders: &mut impl Orders<Msg>,
) {
    match msg {
        Msg::FileChosen(file) => {
            model.file = file;
            model.outcome = None;
        }

        Msg::Upload => {
            let file = match (&model.file, model.uploading) {
                (Some(file), false) => file.clone(),
                _ => return,
            };
            model.uploading = true;
            let api_root = ctx.api_root().to_owned();
            orders.perform_cmd(async move {
                Msg::Uploaded(api::upload_logo(api_root, enterprise_id, file).await)
            });
        }

        Msg::Uploaded(result) => {
            model.uploading = false;
            model.outcome = Some(match result {
                Ok(()) => {
                    model.file = None;
                    Ok(())
                }
                Err(err) => Err(err.to_string()),
            });
        }
    }
}

fn chosen_file(event: &web_sys::Event) -> Option<File> {
    event
        .target()?
        .dyn_into::<HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

pub fn view(model: &Model, ctx: &Context) -> Node<Msg> {
    div![
        attrs! {At::Class => "uploadlogo-component"},
        h2![ctx.t("uploadLogo:logo")],
        input![
            attrs! {At::Type => "file", At::Accept => "image/*", At::Name => "logo"},
            ev(Ev::Change, |event| Msg::FileChosen(chosen_file(&event))),
        ],
        button![
            attrs! {
                At::Class => "button button--default",
                At::Type => "button",
                At::Disabled => (model.file.is_none() || model.uploading).as_at_value(),
            },
            ev(Ev::Click, |_| Msg::Upload),
            if model.uploading {
                ctx.t("uploadLogo:uploading")
            } else {
                ctx.t("uploadLogo:upload")
            }
        ],
        match &model.outcome {
            Some(Ok(())) => p![
                attrs! {At::Class => "uploadlogo__result"},
                ctx.t("uploadLogo:uploaded")
            ],
            Some(Err(message)) => p![
                attrs! {At::Class => "uploadlogo__result uploadlogo__result--error"},
                format!("{} \"{}\"", ctx.t("uploadLogo:uploadError"), message)
            ],
            None => empty![],
        },
    ]
}
