use gloo::net::http::Request;
use shared::LogRequest;
use wasm_bindgen_futures::spawn_local;

/// Forwards browser-side log lines to the server's `/api/logs` endpoint
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log("warn", message, Some(component.to_string()));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let request = LogRequest {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };

        // Fire and forget; a lost log line is not worth surfacing
        spawn_local(async move {
            if let Ok(builder) = Request::post("/api/logs").json(&request) {
                let _ = builder.send().await;
            }
        });
    }
}
