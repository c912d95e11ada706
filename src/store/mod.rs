use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use url::Url;

use crate::constants::MY_USER_AGENT;
use crate::store::request_builder::UserRequestBuilder;
use crate::store::request_data::StoreWrapperData;
use crate::store::wrapper_builder::StoreWrapperBuilder;

pub mod feed;
pub mod input_types;
pub mod request_builder;
mod request_data;
pub mod requester_user;
mod st_helper;
pub mod wrapper_builder;

/// A wrapper for the realtime database that holds each user's schedule and quizzes.
///
/// Data is laid out per user:
/// - `users/{uid}/schedule/{course_id}` holds a course, and
/// - `users/{uid}/quizzes/{course_id}/{quiz_id}` holds a quiz for that course.
pub struct StoreWrapper {
    data: StoreWrapperData,
}

impl<'a> StoreWrapper {
    /// Creates a new instance of the `StoreWrapper` with the specified `Client`, database
    /// URL, and auth token. A default timeout and user agent will be provided. To override
    /// these, use [`StoreWrapperBuilder`].
    ///
    /// The auth token is an ID token issued by whatever signed the user in; this wrapper
    /// does not sign anyone in.
    ///
    /// # Parameters
    /// - `client`: The `reqwest` client. You are able to override this on a per-request basis.
    /// - `database_url`: The root URL of the database, e.g. `https://my-app.firebaseio.com`.
    /// - `auth_token`: The auth token. You are able to override this on a per-request basis.
    ///
    /// # Returns
    /// The new instance of the `StoreWrapper`.
    ///
    /// # Example
    /// ```rust,no_run
    /// use reqwest::Client;
    /// use url::Url;
    /// use classboard::store::StoreWrapper;
    ///
    /// let url = Url::parse("https://my-app.firebaseio.com").unwrap();
    /// let wrapper = StoreWrapper::new(Client::new(), url, "my token");
    /// ```
    pub fn new(client: Client, database_url: Url, auth_token: impl Into<String>) -> Self {
        Self::from_parts(
            client,
            database_url,
            auth_token.into(),
            MY_USER_AGENT.to_owned(),
            Duration::from_secs(30),
        )
    }

    pub(crate) fn from_parts(
        client: Client,
        mut database_url: Url,
        auth_token: String,
        user_agent: String,
        timeout: Duration,
    ) -> Self {
        // Paths are appended to the URL, so it must not carry a query or fragment.
        database_url.set_query(None);
        database_url.set_fragment(None);
        Self {
            data: StoreWrapperData {
                auth_token: Mutex::new(auth_token),
                client,
                database_url,
                user_agent,
                timeout,
            },
        }
    }

    /// Creates a new builder that can be used to construct a `StoreWrapper`. This is the
    /// preferred method for creating a wrapper.
    ///
    /// # Returns
    /// The builder.
    pub fn builder() -> StoreWrapperBuilder {
        StoreWrapperBuilder::new()
    }

    /// Sets the auth token to the new, specified token. ID tokens expire, so this should
    /// be called whenever a fresh one is issued.
    ///
    /// Note that a mutex is internally used to store the token, so this can be called
    /// while the wrapper is shared.
    ///
    /// # Parameters
    /// - `new_token`: The new token.
    pub fn set_auth_token(&self, new_token: impl Into<String>) {
        let mut token = self.data.auth_token.lock();
        *token = new_token.into();
    }

    /// The root URL of the database.
    pub fn database_url(&self) -> &Url {
        &self.data.database_url
    }

    /// Returns a request builder that can be used to customize any settings for a specific
    /// request only.
    ///
    /// # Parameters
    /// - `uid`: The ID of the user whose data is being accessed.
    ///
    /// # Returns
    /// A builder allowing you to customize any settings for your request, like the auth
    /// token, client, user agent, and timeout.
    pub fn req(&'a self, uid: &'a str) -> UserRequestBuilder<'a> {
        UserRequestBuilder::new_request(&self.data, uid)
    }
}
