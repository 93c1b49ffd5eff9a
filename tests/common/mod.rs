#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use baas_http::{Credentials, CredentialsConfig, Session};

pub struct TestServer {
    pub base_url: String,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn spawn_server(app: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        task,
    }
}

pub fn config(base_url: &str) -> CredentialsConfig {
    CredentialsConfig {
        endpoint_url: base_url.to_owned(),
        application_id: "test-app".to_owned(),
        api_key: Some("test-rest-key".to_owned()),
        master_key: Some("test-master-key".to_owned()),
        timeout_ms: 2_000,
        revocable_session: false,
    }
}

pub fn credentials(base_url: &str) -> Arc<Credentials> {
    Arc::new(Credentials::new(config(base_url)).expect("test credentials must validate"))
}

pub fn session(base_url: &str) -> Session {
    Session::new(credentials(base_url))
}
