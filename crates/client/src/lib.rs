//! Typed client for the employee directory REST API.
//!
//! Every response record is mapped into an [`EmployeeView`], keeping only `employeeId`,
//! `firstName` and `lastName`. `employeeId` picks the URL a save is sent to.

pub mod errors;

use models::EmployeeView;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

pub use errors::ClientError;

#[derive(Clone, Debug)]
pub struct EmployeeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EmployeeClient {
    /// `base_url` names the collection, e.g. `http://127.0.0.1:4567/employees`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// `GET {base}`
    pub async fn fetch_all(&self) -> Result<Vec<EmployeeView>, ClientError> {
        let res = self.http.get(self.base_url.clone()).send().await?;
        decode(res).await
    }

    /// `GET {base}/{id}`; a 404 is `Ok(None)`.
    pub async fn fetch_one(&self, id: &str) -> Result<Option<EmployeeView>, ClientError> {
        let url = self.item_url(id)?;
        let res = self.http.get(url).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            debug!(%id, "employee not found");
            return Ok(None);
        }
        decode(res).await.map(Some)
    }

    /// `PUT {base}/{employeeId}` with the view as body; returns the server's echo.
    pub async fn save(&self, view: &EmployeeView) -> Result<EmployeeView, ClientError> {
        let url = self.item_url(&view.employee_id.key())?;
        let res = self.http.put(url).json(view).send().await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if !status.is_success() {
        return Err(ClientError::Status { status, url: res.url().to_string() });
    }
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_url_appends_encoded_segment() {
        let c = EmployeeClient::new("http://127.0.0.1:4567/rest/employees").unwrap();
        assert_eq!(c.item_url("100").unwrap().as_str(), "http://127.0.0.1:4567/rest/employees/100");
        assert_eq!(c.item_url("a b").unwrap().as_str(), "http://127.0.0.1:4567/rest/employees/a%20b");
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let c = EmployeeClient::new("http://127.0.0.1:4567/employees/").unwrap();
        assert_eq!(c.item_url("7").unwrap().as_str(), "http://127.0.0.1:4567/employees/7");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(EmployeeClient::new("not a url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(EmployeeClient::new("mailto:hr@example.com"), Err(ClientError::InvalidUrl(_))));
    }
}
