use crate::Context;
use admin_shared::enterprise::{Field, LocaleRecord};
use seed::{prelude::*, *};

pub enum Msg {
    Changed(Field, String),
}

pub fn view(record: &LocaleRecord, locale: &str, ctx: &Context) -> Node<Msg> {
    div![
        attrs! {At::Class => "enterpriseformfields-component"},
        Field::ALL
            .iter()
            .map(|&field| field_row(field, record.get(field), locale, ctx)),
    ]
}

fn field_row(field: Field, value: &str, locale: &str, ctx: &Context) -> Node<Msg> {
    let id = format!("{}-{}", locale, field.key());
    let control = if field.multiline() {
        textarea![
            attrs! {At::Id => id, At::Name => field.key(), At::Value => value},
            input_ev(Ev::Input, move |text| Msg::Changed(field, text)),
        ]
    } else {
        input![
            attrs! {
                At::Id => id,
                At::Name => field.key(),
                At::Type => field.input_type(),
                At::Value => value,
            },
            input_ev(Ev::Input, move |text| Msg::Changed(field, text)),
        ]
    };

    div![
        attrs! {At::Class => "form-field"},
        label![
            attrs! {At::For => id},
            ctx.t(&format!("enterpriseFormFields:{}", field.key()))
        ],
        control,
    ]
}
