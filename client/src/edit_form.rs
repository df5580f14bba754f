use crate::{
    admin_url, api, enterprise_admins, form_fields, upload_logo, widgets, Context,
    EnterpriseRemoved,
};
use admin_shared::{
    api::ApiError,
    enterprise::Enterprise,
    form::{
        ApprovalLabel, Completion, EditForm, FormButtons, FormText, Mutation, StatusAction, Tab,
    },
};
use seed::{prelude::*, *};

const FLASH_TIMEOUT_MS: u32 = 4000;

pub struct Model {
    form: EditForm,
    upload_logo: upload_logo::Model,
    admins: enterprise_admins::Model,
    flash_timer: Option<CmdHandle>,
}

pub enum Msg {
    TabSelected(usize),
    Fields(String, form_fields::Msg),
    Submit,
    Run(Mutation),
    RequestDelete,
    CancelDelete,
    ConfirmDelete,
    Completed(Mutation, Result<(), ApiError>),
    ClearError,
    DismissFlash,
    UploadLogo(upload_logo::Msg),
    Admins(enterprise_admins::Msg),
}

pub fn init(enterprise: Enterprise) -> Model {
    Model {
        form: EditForm::new(enterprise),
        upload_logo: upload_logo::Model::default(),
        admins: enterprise_admins::Model::default(),
        flash_timer: None,
    }
}

pub fn enterprise_id(model: &Model) -> u64 {
    model.form.enterprise().id
}

fn run(mutation: Mutation, model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    match model.form.request(mutation, &ctx.config.locales) {
        Ok(request) => {
            let api_root = ctx.api_root().to_owned();
            orders.perform_cmd(async move {
                Msg::Completed(mutation, api::mutate(api_root, request).await)
            });
        }
        Err(err) => model.form.fail(ApiError::Encode(err.to_string()).to_string()),
    }
}

pub fn update(msg: Msg, model: &mut Model, ctx: &Context, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::TabSelected(index) => {
            model.form.select_tab(index, ctx.locale_count());
            if model.form.active_tab(ctx.locale_count()) == Some(Tab::Settings) {
                let id = enterprise_id(model);
                enterprise_admins::load(
                    &mut model.admins,
                    id,
                    ctx,
                    &mut orders.proxy(Msg::Admins),
                );
            }
        }

        Msg::Fields(locale, form_fields::Msg::Changed(field, value)) => {
            model.form.update_field(&locale, field, value);
        }

        Msg::Submit => run(Mutation::Save, model, ctx, orders),

        Msg::Run(mutation) => run(mutation, model, ctx, orders),

        Msg::RequestDelete => model.form.open_delete_modal(),

        Msg::CancelDelete => model.form.close_delete_modal(),

        Msg::ConfirmDelete => run(Mutation::Delete, model, ctx, orders),

        Msg::Completed(mutation, result) => {
            let saved = ctx.t("common:enterpriseEditSuccess");
            let edit_error = ctx.t("common:enterpriseEditError");
            let text = FormText {
                saved: &saved,
                edit_error: &edit_error,
            };
            match model.form.complete(mutation, result, &text) {
                Completion::Stay => {}
                Completion::Saved => {
                    model.flash_timer = Some(orders.perform_cmd_with_handle(cmds::timeout(
                        FLASH_TIMEOUT_MS,
                        || Msg::DismissFlash,
                    )));
                }
                Completion::LeaveForAdmin { refresh } => {
                    if refresh {
                        orders.notify(EnterpriseRemoved(enterprise_id(model)));
                    }
                    orders.request_url(admin_url());
                }
            }
        }

        Msg::ClearError => model.form.clear_error(),

        Msg::DismissFlash => {
            model.form.clear_flash();
            model.flash_timer = None;
        }

        Msg::UploadLogo(msg) => {
            let id = enterprise_id(model);
            upload_logo::update(
                msg,
                &mut model.upload_logo,
                id,
                ctx,
                &mut orders.proxy(Msg::UploadLogo),
            );
        }

        Msg::Admins(msg) => {
            enterprise_admins::update(msg, &mut model.admins, ctx, &mut orders.proxy(Msg::Admins));
        }
    }
}

pub fn view(model: &Model, ctx: &Context) -> Node<Msg> {
    let form = &model.form;
    div![
        attrs! {At::Class => "editenterpriseform-component edit-enterprise-form"},
        form.error()
            .map(|message| widgets::modal_error(message, ctx, || Msg::ClearError)),
        form.flash()
            .map(|message| widgets::flash_message("success", message, || Msg::DismissFlash)),
        IF!(form.delete_modal_open() => delete_modal(form, ctx)),
        form![
            ev(Ev::Submit, |event| {
                event.prevent_default();
                Msg::Submit
            }),
            tab_list(form, ctx),
            tab_panel(model, ctx),
            form.buttons(ctx.locale_count())
                .map(|buttons| form_buttons(buttons, ctx)),
        ],
    ]
}

fn tab_list(form: &EditForm, ctx: &Context) -> Node<Msg> {
    let locales = &ctx.config.locales;
    let selected = form.selected_tab();
    ul![
        attrs! {At::Class => "react-tabs__tab-list"},
        form.tabs(locales.len())
            .into_iter()
            .enumerate()
            .map(|(index, tab)| {
                let label = match tab {
                    Tab::Locale(i) => locales
                        .get(i)
                        .map(|locale| ctx.t(&format!("enterpriseDetailsPanel:{}", locale.name)))
                        .unwrap_or_default(),
                    Tab::Settings => ctx.t("editEnterpriseForm:settings"),
                };
                li![
                    attrs! {At::Class => if index == selected {
                        "react-tabs__tab react-tabs__tab--selected"
                    } else {
                        "react-tabs__tab"
                    }},
                    ev(Ev::Click, move |_| Msg::TabSelected(index)),
                    label
                ]
            })
    ]
}

fn tab_panel(model: &Model, ctx: &Context) -> Node<Msg> {
    let form = &model.form;
    match form.active_tab(ctx.locale_count()) {
        Some(Tab::Locale(i)) => {
            let locale = match ctx.config.locales.get(i) {
                Some(locale) => locale,
                None => return empty![],
            };
            let record = match form.enterprise().record(&locale.locale) {
                Some(record) => record,
                None => return empty![],
            };
            let code = locale.locale.clone();
            div![
                attrs! {At::Class => "react-tabs__tab-panel"},
                h1![record.name.as_str()],
                form_fields::view(record, &locale.locale, ctx)
                    .map_msg(move |msg| Msg::Fields(code.clone(), msg)),
            ]
        }
        Some(Tab::Settings) => div![
            attrs! {At::Class => "react-tabs__tab-panel"},
            div![
                attrs! {At::Class => "admin-feature"},
                h1![ctx.t("editEnterpriseForm:settings")],
                upload_logo::view(&model.upload_logo, ctx).map_msg(Msg::UploadLogo),
            ],
            enterprise_admins::view(&model.admins, ctx).map_msg(Msg::Admins),
        ],
        None => empty![],
    }
}

fn form_buttons(buttons: FormButtons, ctx: &Context) -> Node<Msg> {
    let status_button = match buttons.status_action {
        StatusAction::Publish => input![
            attrs! {
                At::Class => "button button--default admin-feature admin-feature--inline-block",
                At::Name => "publish",
                At::Type => "button",
                At::Value => ctx.t("editEnterpriseForm:publish"),
            },
            ev(Ev::Click, |_| Msg::Run(Mutation::Publish)),
        ],
        StatusAction::Unpublish => input![
            attrs! {
                At::Class => "button button--default",
                At::Name => "unpublish",
                At::Type => "button",
                At::Value => ctx.t("editEnterpriseForm:unpublish"),
            },
            ev(Ev::Click, |_| Msg::Run(Mutation::Unpublish)),
        ],
    };

    let approval_label = match buttons.approval {
        ApprovalLabel::SubmitForApproval => ctx.t("editEnterpriseForm:submitForApproval"),
        ApprovalLabel::Save => ctx.t("editEnterpriseForm:save"),
    };

    div![
        div![
            attrs! {At::Class => "admin-feature"},
            status_button,
            input![attrs! {
                At::Class => "button button--primary",
                At::Type => "submit",
                At::Value => ctx.t("editEnterpriseForm:save"),
            }],
            input![
                attrs! {
                    At::Class => "button button--destructive",
                    At::Name => "delete",
                    At::Type => "button",
                    At::Value => ctx.t("editEnterpriseForm:delete"),
                },
                ev(Ev::Click, |_| Msg::RequestDelete),
            ],
        ],
        div![
            attrs! {At::Class => "non-admin-buttons"},
            input![
                attrs! {
                    At::Class => "button button--primary",
                    At::Name => "pending",
                    At::Type => "button",
                    At::Value => approval_label,
                },
                ev(Ev::Click, |_| Msg::Run(Mutation::SubmitForApproval)),
            ],
        ],
    ]
}

fn delete_modal(form: &EditForm, ctx: &Context) -> Node<Msg> {
    let name = form.enterprise().display_name(&ctx.locale);
    div![
        attrs! {At::Class => "modal-overlay"},
        div![
            attrs! {At::Class => "modal"},
            h2![
                attrs! {At::Class => "modal__title"},
                format!("{} \"{}\"?", ctx.t("editEnterpriseForm:areYouSureDelete"), name),
            ],
            p![format!(
                "{} \"{}\". {}",
                ctx.t("editEnterpriseForm:youAreAboutToDelete"),
                name,
                ctx.t("editEnterpriseForm:thisCannotBeUndone")
            )],
            p![ctx.t("editEnterpriseForm:areYouSureProceed")],
            input![
                attrs! {
                    At::Class => "button button--destructive",
                    At::Name => "delete",
                    At::Type => "button",
                    At::Value => ctx.t("editEnterpriseForm:delete"),
                },
                ev(Ev::Click, |_| Msg::ConfirmDelete),
            ],
            input![
                attrs! {
                    At::Class => "button button--default",
                    At::Name => "cancel",
                    At::Type => "button",
                    At::Value => ctx.t("editEnterpriseForm:cancel"),
                },
                ev(Ev::Click, |_| Msg::CancelDelete),
            ],
        ]
    ]
}
