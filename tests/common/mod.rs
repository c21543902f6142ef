//! Shared test fixtures: a scripted transport and canned dashboard payloads.

#![allow(dead_code)]

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;
use smartoilgauge_exporter::error::{ExporterError, Result};
use smartoilgauge_exporter::smartoil::{
    Credentials, Endpoints, HttpResponse, RequestStyle, SmartOilClient, Transport,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://dashboard.test";

/// A request the transport saw
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub form: Vec<(String, String)>,
    pub style: Option<RequestStyle>,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<HttpResponse>>,
    calls: Vec<RecordedCall>,
    cookie_clears: usize,
}

/// Transport that answers from a queue and records every request.
///
/// Clones share the same queue, so a test can keep one clone for inspection
/// after handing another to the client.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Err(ExporterError::Transport(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| c.url == url).count()
    }

    pub fn login_posts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == "POST" && c.url == login_url())
            .count()
    }

    pub fn cookie_clears(&self) -> usize {
        self.script.lock().unwrap().cookie_clears
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().replies.len()
    }

    fn next(&self, call: RecordedCall) -> Result<HttpResponse> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(call);
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(ExporterError::Transport("no scripted reply".to_string())))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.next(RecordedCall {
            method: "GET",
            url: url.to_string(),
            form: Vec::new(),
            style: None,
        })
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        style: RequestStyle,
    ) -> Result<HttpResponse> {
        self.next(RecordedCall {
            method: "POST",
            url: url.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            style: Some(style),
        })
    }

    fn clear_cookies(&mut self) -> Result<()> {
        self.script.lock().unwrap().cookie_clears += 1;
        Ok(())
    }
}

pub fn login_url() -> String {
    Endpoints::new(BASE_URL).login_url
}

pub fn ajax_url() -> String {
    Endpoints::new(BASE_URL).ajax_url
}

pub fn credentials() -> Credentials {
    Credentials::new("owner@example.com", SecretString::from("hunter2".to_string()))
}

pub fn client(transport: ScriptedTransport) -> SmartOilClient<ScriptedTransport> {
    SmartOilClient::new(transport, credentials(), Endpoints::new(BASE_URL))
}

pub fn login_page(nonce: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Smart Oil Gauge</title></head>
<body>
<form id="loginform" action="login.php" method="post">
  <input type="text" name="username" id="user_login">
  <input type="password" name="user_pass" id="user_pass">
  <input type="hidden" name="ccf_nonce" value="{}">
  <input type="submit" value="Log In">
</form>
</body></html>"#,
        nonce
    )
}

pub fn garage_tank() -> serde_json::Value {
    json!({
        "tank_id": "7",
        "tank_name": "Garage",
        "zip_code": "02101",
        "sensor_gallons": "123.4",
        "nominal": "275",
        "fillable": "250"
    })
}

pub fn ok_body(tanks: Vec<serde_json::Value>) -> String {
    json!({"result": "ok", "message": "", "tanks": tanks}).to_string()
}

pub fn access_denied_body() -> String {
    json!({"result": "error", "message": "Access Denied", "tanks": null}).to_string()
}

pub fn unauthorized_body() -> String {
    json!({"result": "error", "message": "Unauthorized", "tanks": []}).to_string()
}
