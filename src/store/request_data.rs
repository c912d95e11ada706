use std::time::Duration;

use parking_lot::Mutex;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, IntoUrl, RequestBuilder};
use url::Url;

use crate::constants::EVENT_STREAM;
use crate::types::{self, BoardError};

pub enum ReqType<U: IntoUrl> {
    Get(U),
    Post(U),
    Patch(U),
    Delete(U),
    /// A long-lived request for the event stream of a path. No timeout is applied.
    Listen(U),
}

pub(crate) struct StoreWrapperData {
    pub auth_token: Mutex<String>,
    pub client: Client,
    pub database_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

pub(crate) struct StoreRequestData<'a> {
    pub auth_token: String,
    pub client: &'a Client,
    pub database_url: &'a Url,
    pub user_agent: &'a str,
    pub timeout: Duration,
}

impl<'a> ReqwestStoreClientData for StoreRequestData<'a> {
    fn get_auth_token(&self) -> &str {
        self.auth_token.as_str()
    }

    fn get_client(&self) -> &Client {
        self.client
    }

    fn get_database_url(&self) -> &Url {
        self.database_url
    }

    fn get_user_agent(&self) -> &str {
        self.user_agent
    }

    fn get_timeout(&self) -> Duration {
        self.timeout
    }
}

pub(crate) trait ReqwestStoreClientData {
    /// The auth token for this request.
    fn get_auth_token(&self) -> &str;

    /// The client to be used for this request.
    fn get_client(&self) -> &Client;

    /// The root URL of the database.
    fn get_database_url(&self) -> &Url;

    /// The user agent to be used for this request.
    fn get_user_agent(&self) -> &str;

    /// The timeout to be used for this request.
    fn get_timeout(&self) -> Duration;

    /// Builds the REST URL of a path in the database. Each segment is percent-encoded, and
    /// the last one gets the `.json` suffix that the REST API expects.
    ///
    /// # Parameters
    /// - `segments`: The path segments, e.g. `["users", "abc", "schedule"]`.
    ///
    /// # Returns
    /// The URL, with the auth token attached.
    fn url_for(&self, segments: &[&str]) -> types::Result<Url> {
        let mut url = self.get_database_url().clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                BoardError::InputError("database_url", "database URL cannot be a base.")
            })?;
            path.pop_if_empty();
            if let Some((last, rest)) = segments.split_last() {
                path.extend(rest);
                path.push(&format!("{last}.json"));
            }
        }

        url.query_pairs_mut().append_pair("auth", self.get_auth_token());
        Ok(url)
    }

    /// Makes a request with the desired request type.
    ///
    /// # Parameters
    /// - `req_type`: The request type.
    ///
    /// # Returns
    /// A request builder that can further be built on top of, if needed.
    fn req<U>(&self, req_type: ReqType<U>) -> RequestBuilder
    where
        U: IntoUrl,
    {
        let client = self.get_client();
        let req = match req_type {
            ReqType::Get(u) => client.get(u),
            ReqType::Post(u) => client.post(u),
            ReqType::Patch(u) => client.patch(u),
            ReqType::Delete(u) => client.delete(u),
            ReqType::Listen(u) => {
                return client
                    .get(u)
                    .header(ACCEPT, EVENT_STREAM)
                    .header(USER_AGENT, self.get_user_agent());
            }
        };

        req.header(USER_AGENT, self.get_user_agent())
            .timeout(self.get_timeout())
    }
}

#[cfg(test)]
mod url_tests {
    use std::time::Duration;

    use reqwest::Client;
    use url::Url;

    use super::{ReqwestStoreClientData, StoreRequestData};

    fn url_for(base: &str, token: &str, segments: &[&str]) -> String {
        let client = Client::new();
        let database_url = Url::parse(base).unwrap();
        let data = StoreRequestData {
            auth_token: token.to_owned(),
            client: &client,
            database_url: &database_url,
            user_agent: "test",
            timeout: Duration::from_secs(1),
        };

        data.url_for(segments).unwrap().to_string()
    }

    #[test]
    fn test_quiz_path() {
        assert_eq!(
            "https://my-app.firebaseio.com/users/u1/quizzes/bio/q1.json?auth=tok",
            url_for(
                "https://my-app.firebaseio.com",
                "tok",
                &["users", "u1", "quizzes", "bio", "q1"]
            )
        );
    }

    #[test]
    fn test_trailing_slash_and_prefix() {
        assert_eq!(
            "https://my-app.firebaseio.com/root/users/u1/schedule.json?auth=tok",
            url_for(
                "https://my-app.firebaseio.com/root/",
                "tok",
                &["users", "u1", "schedule"]
            )
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(
            "http://127.0.0.1:9000/users/a%20b%2Fc/schedule.json?auth=x%2By",
            url_for("http://127.0.0.1:9000", "x+y", &["users", "a b/c", "schedule"])
        );
    }
}
