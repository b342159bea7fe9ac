use std::time::Duration;

use parentcheck_config::Endpoints;
use parentcheck_core::{EmailAddress, HttpReply, ParentId};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

use crate::api::ParentApi;
use crate::{ClientError, Result};

pub const PARENT_ID_HEADER: &str = "parent-id";

const USER_AGENT: &str = concat!("parentcheck/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct LookupBody<'a> {
    email: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpParentApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpParentApi {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;
        Ok(Self { client, endpoints })
    }
}

impl ParentApi for HttpParentApi {
    fn lookup(&self, email: &EmailAddress) -> Result<HttpReply> {
        let body = serde_json::to_vec(&LookupBody {
            email: email.as_str(),
        })?;
        debug!(url = %self.endpoints.lookup, "POST lookup");
        let response = self
            .client
            .post(self.endpoints.lookup.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        read_reply(response)
    }

    fn clear(&self, parent_id: &ParentId) -> Result<HttpReply> {
        let value = HeaderValue::from_str(parent_id.as_str())
            .map_err(|_| ClientError::Header(PARENT_ID_HEADER))?;
        debug!(url = %self.endpoints.clear, "DELETE clear");
        let response = self
            .client
            .delete(self.endpoints.clear.clone())
            .header(PARENT_ID_HEADER, value)
            .send()?;
        read_reply(response)
    }
}

/// Any transport status is a reply; only failing to read the body is an error.
fn read_reply(response: Response) -> Result<HttpReply> {
    let status = response.status().as_u16();
    let bytes = response.bytes()?;
    debug!(status, len = bytes.len(), "reply received");
    Ok(HttpReply::from_bytes(status, &bytes))
}
