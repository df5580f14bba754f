use admin_shared::reporter::{notice, ErrorLogger};
use seed::browser::fetch::{Method, Request};
use seed::{prelude::*, *};

/// Logs to the console and, when configured, ships a notice to Airbrake.
/// Delivery failures are only logged.
pub fn notify<Ms: 'static>(logger: &ErrorLogger, message: &str, orders: &mut impl Orders<Ms>) {
    error!(message);

    if let ErrorLogger::Airbrake {
        host,
        project_id,
        project_key,
    } = logger
    {
        let url = format!(
            "{}/api/v3/projects/{}/notices?key={}",
            host,
            String::from(js_sys::encode_uri_component(project_id)),
            String::from(js_sys::encode_uri_component(project_key)),
        );
        let body = notice(message, &window().location().href().unwrap_or_default());

        orders.perform_cmd(async move {
            let request = match Request::new(url).method(Method::Post).json(&body) {
                Ok(request) => request,
                Err(err) => {
                    log!("could not encode error notice:", err);
                    return;
                }
            };
            if let Err(err) = request.fetch().await {
                log!("error notice not delivered:", err);
            }
        });
    }
}
