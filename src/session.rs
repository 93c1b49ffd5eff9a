use std::fmt;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    credentials::header_value,
    dispatch::{execute, execute_discard, with_json},
    wire::{self, LoginQuery},
    BaasError, Class, Credentials, Installation, PushNotification, Result, Signup, UpdateResponse,
    User,
};

/// Which credential pair authorizes a request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum AuthMode {
    /// Application id + REST API key; per-object access rules apply.
    #[default]
    Session,
    /// Application id + master key; bypasses per-object access rules.
    Master,
}

/// Authenticated request context: shared [`Credentials`] plus the current
/// user's session token, if any.
///
/// The token is only changed by [`Session::login`] and [`Session::logout`],
/// which take `&mut self`. Give each concurrent actor its own `Session`
/// (cloning is cheap) rather than sharing one behind a lock.
#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    session_token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Session {
    /// Creates a session without a user token.
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            session_token: None,
        }
    }

    /// Creates a session that reuses an existing session token.
    ///
    /// An empty token is treated as no token.
    pub fn with_token(credentials: Arc<Credentials>, token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            session_token: (!token.is_empty()).then_some(token),
            ..Self::new(credentials)
        }
    }

    /// Builds a session from `BAAS_*` environment variables.
    ///
    /// See [`Credentials::from_env`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(Credentials::from_env()?)))
    }

    /// Replaces the underlying HTTP client, e.g. to share a connection pool.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn credentials(&self) -> &Arc<Credentials> {
        &self.credentials
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Attaches authorization headers for `mode` and the configured timeout.
    ///
    /// Session mode sends `X-App-Id` + `X-Api-Key`, master mode sends
    /// `X-App-Id` + `X-Master-Key`; never both keys. `X-Session-Token` is
    /// added in either mode when a token is set, and
    /// `X-Revocable-Session: 1` whenever revocable sessions are configured.
    ///
    /// Fails with [`BaasError::Config`] when the key for `mode` is not
    /// configured or the session token cannot be sent as a header value;
    /// the request is then dropped untouched.
    pub fn decorate(&self, request: RequestBuilder, mode: AuthMode) -> Result<RequestBuilder> {
        let (key_header, key) = match mode {
            AuthMode::Session => (wire::HEADER_API_KEY, self.credentials.api_key()),
            AuthMode::Master => (wire::HEADER_MASTER_KEY, self.credentials.master_key()),
        };
        let key = key.ok_or_else(|| {
            BaasError::Config(match mode {
                AuthMode::Session => "session mode requires an api key".to_owned(),
                AuthMode::Master => "master mode requires a master key".to_owned(),
            })
        })?;

        let app_id = header_value("application id", self.credentials.application_id())?;
        let mut key = header_value("key", key)?;
        key.set_sensitive(true);
        let token = match &self.session_token {
            Some(token) => {
                let mut token = header_value("session token", token)?;
                token.set_sensitive(true);
                Some(token)
            }
            None => None,
        };

        let mut request = request
            .timeout(self.credentials.timeout())
            .header(wire::HEADER_APP_ID, app_id)
            .header(key_header, key);

        if self.credentials.revocable_session() {
            request = request.header(wire::HEADER_REVOCABLE_SESSION, "1");
        }
        if let Some(token) = token {
            request = request.header(wire::HEADER_SESSION_TOKEN, token);
        }
        Ok(request)
    }

    /// Builds a decorated request for `path`, relative to the endpoint URL.
    ///
    /// Pair with [`execute`](crate::execute) or
    /// [`execute_discard`](crate::execute_discard) to reach endpoints this
    /// crate has no wrapper for.
    pub fn request(&self, method: Method, path: &str, mode: AuthMode) -> Result<RequestBuilder> {
        #[cfg(feature = "tracing")]
        tracing::debug!(%method, path, ?mode, "dispatching request");

        let url = self.credentials.url_for(path);
        self.decorate(self.http.request(method, url), mode)
    }

    /// Returns a handle for the class `name` authorized in session mode.
    pub fn class(&self, name: impl Into<String>) -> Class<'_> {
        Class::new(self, name.into(), AuthMode::Session)
    }

    /// Returns a handle for the class `name` authorized in `mode`.
    pub fn class_with(&self, name: impl Into<String>, mode: AuthMode) -> Class<'_> {
        Class::new(self, name.into(), mode)
    }

    /// Registers a new user. The session token is left unchanged.
    pub async fn signup(&self, data: &Signup) -> Result<User> {
        let request = self.request(Method::POST, wire::PATH_USERS, AuthMode::Session)?;
        execute(with_json(request, data)?).await
    }

    /// Exchanges username and password for a user and a session token.
    ///
    /// On success the returned token replaces the one held by this session.
    /// A token that cannot be sent back as a header value is rejected with
    /// [`BaasError::Config`] and the previous token is kept.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let request = self
            .request(Method::GET, wire::PATH_LOGIN, AuthMode::Session)?
            .query(&LoginQuery { username, password });
        let user: User = execute(request).await?;

        if let Some(token) = user.session_token.as_deref().filter(|token| !token.is_empty()) {
            header_value("session token", token)?;
            self.session_token = Some(token.to_owned());
        }
        Ok(user)
    }

    /// Invalidates the current session token server-side and forgets it.
    pub async fn logout(&mut self) -> Result<()> {
        self.require_token()?;
        let request = self.request(Method::POST, wire::PATH_LOGOUT, AuthMode::Session)?;
        execute_discard(request).await?;
        self.session_token = None;
        Ok(())
    }

    /// Fetches the user owning the current session token.
    pub async fn me<T: DeserializeOwned>(&self) -> Result<T> {
        self.require_token()?;
        execute(self.request(Method::GET, wire::PATH_ME, AuthMode::Session)?).await
    }

    /// Fetches the user `user_id`.
    pub async fn get_user<T: DeserializeOwned>(&self, user_id: &str, mode: AuthMode) -> Result<T> {
        let path = user_path(user_id)?;
        execute(self.request(Method::GET, &path, mode)?).await
    }

    /// Updates the fields present in `data` on the user `user_id`.
    pub async fn update_user<D>(
        &self,
        user_id: &str,
        data: &D,
        mode: AuthMode,
    ) -> Result<UpdateResponse>
    where
        D: Serialize + ?Sized,
    {
        let path = user_path(user_id)?;
        let request = self.request(Method::PUT, &path, mode)?;
        execute(with_json(request, data)?).await
    }

    /// Deletes the user `user_id`. Usually needs master mode or the
    /// user's own session token.
    pub async fn delete_user(&self, user_id: &str, mode: AuthMode) -> Result<()> {
        let path = user_path(user_id)?;
        execute_discard(self.request(Method::DELETE, &path, mode)?).await
    }

    /// Stores device subscription data for push delivery.
    pub async fn upload_installation<T: DeserializeOwned>(
        &self,
        installation: &Installation,
    ) -> Result<T> {
        let request = self.request(Method::POST, wire::PATH_INSTALLATIONS, AuthMode::Session)?;
        execute(with_json(request, installation)?).await
    }

    /// Sends a push notification to every installation matching its query.
    pub async fn push_notification(&self, push: &PushNotification, mode: AuthMode) -> Result<()> {
        let request = self.request(Method::POST, wire::PATH_PUSH, mode)?;
        execute_discard(with_json(request, push)?).await
    }

    fn require_token(&self) -> Result<&str> {
        self.session_token
            .as_deref()
            .ok_or_else(|| BaasError::Validation("session token must not be empty".to_owned()))
    }
}

fn user_path(user_id: &str) -> Result<String> {
    if user_id.is_empty() {
        return Err(BaasError::Validation("user id must not be empty".to_owned()));
    }
    Ok(format!("{}/{}", wire::PATH_USERS, urlencoding::encode(user_id)))
}
