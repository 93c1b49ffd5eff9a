use serde::Serialize;

pub const HEADER_APP_ID: &str = "X-App-Id";
pub const HEADER_API_KEY: &str = "X-Api-Key";
pub const HEADER_MASTER_KEY: &str = "X-Master-Key";
pub const HEADER_SESSION_TOKEN: &str = "X-Session-Token";
pub const HEADER_REVOCABLE_SESSION: &str = "X-Revocable-Session";

pub const PATH_CLASSES: &str = "/classes";
pub const PATH_USERS: &str = "/users";
pub const PATH_ME: &str = "/users/me";
pub const PATH_LOGIN: &str = "/login";
pub const PATH_LOGOUT: &str = "/logout";
pub const PATH_INSTALLATIONS: &str = "/installations";
pub const PATH_PUSH: &str = "/push";

#[derive(Debug, Serialize)]
pub struct LoginQuery<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct WhereQuery {
    #[serde(rename = "where")]
    pub condition: String,
}
