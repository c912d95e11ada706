use std::time::Duration;

use reqwest::Client;

use crate::store::request_data::{StoreRequestData, StoreWrapperData};
use crate::store::requester_user::{UserRawRequest, UserRequest};

/// A structure that represents a request to be "built." This allows you to
/// override any settings set by the original wrapper for any requests made
/// under the soon-to-be-built requester.
///
/// Using this builder, you can either build
/// - the general requester, which parses everything for you and can also write to the
///   store.
/// - the raw requester, which gives you the store's responses as-is.
pub struct UserRequestBuilder<'a> {
    pub(crate) data: StoreRequestData<'a>,
    pub(crate) uid: &'a str,
}

impl<'a> UserRequestBuilder<'a> {
    /// Initializes a new builder with the settings derived from the wrapper.
    ///
    /// # Parameters
    /// - `wrapper_data`: The wrapper's data.
    /// - `uid`: The ID of the user whose data is being accessed.
    ///
    /// # Returns
    /// The builder.
    pub(crate) fn new_request(wrapper_data: &'a StoreWrapperData, uid: &'a str) -> Self {
        Self {
            data: StoreRequestData {
                auth_token: wrapper_data.auth_token.lock().to_owned(),
                client: &wrapper_data.client,
                database_url: &wrapper_data.database_url,
                user_agent: wrapper_data.user_agent.as_str(),
                timeout: wrapper_data.timeout,
            },
            uid,
        }
    }

    /// Overrides the auth token for any requests made under this soon-to-be requester.
    ///
    /// # Parameters
    /// - `auth_token`: The token to use. This will _not_ override the token for the
    ///                 wrapper, just this request.
    ///
    /// # Returns
    /// The builder.
    pub fn override_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.data.auth_token = auth_token.into();
        self
    }

    /// Overrides the client for any requests made under this soon-to-be requester.
    ///
    /// # Parameters
    /// - `client`: The client to use. This will _not_ override the client for the
    ///             wrapper, just this request.
    ///
    /// # Returns
    /// The builder.
    pub fn override_client(mut self, client: &'a Client) -> Self {
        self.data.client = client;
        self
    }

    /// Overrides the user agent for any requests made under this soon-to-be requester.
    ///
    /// # Parameters
    /// - `user_agent`: The user agent to use.
    ///
    /// # Returns
    /// The builder.
    pub fn override_user_agent(mut self, user_agent: &'a str) -> Self {
        self.data.user_agent = user_agent;
        self
    }

    /// Overrides the timeout for any requests made under this soon-to-be requester. This
    /// does not apply to change feeds, which stay open.
    ///
    /// # Parameters
    /// - `duration`: The timeout to use. This will _not_ override the timeout
    ///               for the wrapper, just this request.
    ///
    /// # Returns
    /// The builder.
    pub fn override_timeout(mut self, duration: Duration) -> Self {
        self.data.timeout = duration;
        self
    }

    /// Builds the requester that can be used to obtain raw responses from the store.
    ///
    /// # Returns
    /// The raw requester.
    pub fn raw(self) -> UserRawRequest<'a> {
        UserRawRequest {
            uid: self.uid,
            info: self.data,
        }
    }

    /// Builds the requester that can be used to read, add, edit, and delete courses and
    /// quizzes.
    ///
    /// # Returns
    /// The parsed requester.
    pub fn parsed(self) -> UserRequest<'a> {
        UserRequest { raw: self.raw() }
    }
}
