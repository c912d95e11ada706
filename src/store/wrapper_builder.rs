use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::constants::MY_USER_AGENT;
use crate::store::StoreWrapper;

/// A builder for the `StoreWrapper`. This should be used to construct a new wrapper.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use classboard::store::wrapper_builder::StoreWrapperBuilder;
///
/// let wrapper = StoreWrapperBuilder::new()
///     .with_database_url("https://my-app.firebaseio.com")
///     .with_auth_token("abc")
///     .with_default_timeout(Duration::from_secs(10))
///     .try_build_wrapper();
///
/// assert!(wrapper.is_some());
/// ```
pub struct StoreWrapperBuilder {
    database_url: Option<String>,
    auth_token: Option<String>,
    client: Client,
    user_agent: String,
    default_timeout: Duration,
}

impl StoreWrapperBuilder {
    /// Constructs a `StoreWrapperBuilder` with the default client, user agent, and default
    /// timeout. You are responsible for providing the database URL and auth token.
    ///
    /// # Returns
    /// A `StoreWrapperBuilder`.
    pub fn new() -> Self {
        Self {
            database_url: None,
            auth_token: None,
            client: Client::new(),
            user_agent: MY_USER_AGENT.to_owned(),
            default_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the root URL of the database.
    ///
    /// # Parameters
    /// - `url`: The URL, e.g. `https://my-app.firebaseio.com`.
    ///
    /// # Returns
    /// The builder.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Sets the auth token.
    ///
    /// # Parameters
    /// - `token`: The ID token of the signed-in user.
    ///
    /// # Returns
    /// The builder.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the client to the specified client.
    ///
    /// # Parameters
    /// - `client`: The client to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the user agent to the specified user agent.
    ///
    /// # Parameters
    /// - `user_agent`: The user agent to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the timeout to the specified timeout.
    ///
    /// # Parameters
    /// - `timeout`: The timeout to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Attempts to build the wrapper. To successfully build the wrapper, the database URL
    /// and auth token must be provided, and the URL must be a valid `http` or `https` URL.
    ///
    /// # Returns
    /// The `StoreWrapper` if both the `database_url` and `auth_token` are specified and
    /// valid. Otherwise, `None` will be returned.
    pub fn try_build_wrapper(self) -> Option<StoreWrapper> {
        let (Some(database_url), Some(auth_token)) = (self.database_url, self.auth_token) else {
            return None;
        };

        let url = Url::parse(&database_url).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }

        Some(StoreWrapper::from_parts(
            self.client,
            url,
            auth_token,
            self.user_agent,
            self.default_timeout,
        ))
    }
}

impl Default for StoreWrapperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
