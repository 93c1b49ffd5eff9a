use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    dispatch::{execute, execute_discard, with_json},
    wire::{self, WhereQuery},
    AuthMode, BaasError, Result, Session,
};

/// Generic CRUD handle for one schema-less class.
///
/// The handle keeps the [`AuthMode`] it was created with; use
/// [`Session::class_with`] to get a master-mode handle.
///
/// # Example
///
/// ```no_run
/// use baas_http::{Object, ObjectMeta, Session};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Game {
///     score: i64,
/// }
///
/// # async fn run(session: &Session) -> baas_http::Result<()> {
/// let games = session.class("Game");
/// let created: ObjectMeta = games.create(&Game { score: 1337 }).await?;
/// let id = created.object_id.unwrap_or_default();
/// let game: Object<Game> = games.select(&id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Class<'a> {
    session: &'a Session,
    name: String,
    mode: AuthMode,
}

impl<'a> Class<'a> {
    pub(crate) fn new(session: &'a Session, name: String, mode: AuthMode) -> Self {
        Self { session, name, mode }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Fetches one object, or the whole class when `object_id` is empty.
    ///
    /// With an id the body is the object itself; without one it is a
    /// [`Results`](crate::Results) envelope. An unknown id fails with a
    /// server error for which [`BaasError::is_object_not_found`] holds.
    pub async fn select<T: DeserializeOwned>(&self, object_id: &str) -> Result<T> {
        let path = if object_id.is_empty() {
            self.base_path()
        } else {
            self.object_path(object_id)
        };
        execute(self.session.request(Method::GET, &path, self.mode)?).await
    }

    /// Lists objects matching `condition`, sent verbatim as the JSON
    /// `where` query parameter.
    pub async fn select_query<W, T>(&self, condition: &W) -> Result<T>
    where
        W: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let condition = serde_json::to_string(condition).map_err(BaasError::Encode)?;
        let request = self
            .session
            .request(Method::GET, &self.base_path(), self.mode)?
            .query(&WhereQuery { condition });
        execute(request).await
    }

    /// Stores a new object. The body is typically an
    /// [`ObjectMeta`](crate::ObjectMeta) with the assigned id and creation time.
    pub async fn create<D, T>(&self, data: &D) -> Result<T>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.session.request(Method::POST, &self.base_path(), self.mode)?;
        execute(with_json(request, data)?).await
    }

    /// Updates the fields present in `data` on an existing object.
    pub async fn update<D, T>(&self, object_id: &str, data: &D) -> Result<T>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = self.required_object_path(object_id)?;
        let request = self.session.request(Method::PUT, &path, self.mode)?;
        execute(with_json(request, data)?).await
    }

    pub async fn delete(&self, object_id: &str) -> Result<()> {
        let path = self.required_object_path(object_id)?;
        execute_discard(self.session.request(Method::DELETE, &path, self.mode)?).await
    }

    // Class names and ids are single path segments.
    fn base_path(&self) -> String {
        format!("{}/{}", wire::PATH_CLASSES, urlencoding::encode(&self.name))
    }

    fn object_path(&self, object_id: &str) -> String {
        format!("{}/{}", self.base_path(), urlencoding::encode(object_id))
    }

    fn required_object_path(&self, object_id: &str) -> Result<String> {
        if object_id.is_empty() {
            return Err(BaasError::Validation(
                "object id must not be empty".to_owned(),
            ));
        }
        Ok(self.object_path(object_id))
    }
}
