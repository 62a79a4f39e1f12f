//! Path-only requests against a resource collection.
use crate::params::{DeleteParams, ListParams, WriteParams};
use http::header::CONTENT_TYPE;
use thiserror::Error;

const JSON_MIME: &str = "application/json";

/// Possible errors when building a request
#[derive(Debug, Error)]
pub enum Error {
    /// The http request could not be assembled
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    /// The body could not be serialized
    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),
    /// The parameters are unusable
    #[error("invalid request parameters: {0}")]
    Validation(String),
}

/// Builds requests for one collection path, e.g. `/apis/apps/v1/namespaces/ns/deployments`
///
/// The requests carry only a path and query.
/// The client they are sent with supplies the cluster url and credentials.
#[derive(Debug, Clone)]
pub struct Request {
    /// The collection path
    pub url_path: String,
}

impl Request {
    /// Requests against the collection at `url_path`
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }

    /// List the collection
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        lp.validate()?;
        let uri = with_query(self.url_path.clone(), |qp| lp.populate_qp(qp));
        http::Request::get(uri).body(vec![]).map_err(Error::BuildRequest)
    }

    /// Read the object called `name`
    pub fn get(&self, name: &str) -> Result<http::Request<Vec<u8>>, Error> {
        let uri = self.item_path(name)?;
        http::Request::get(uri).body(vec![]).map_err(Error::BuildRequest)
    }

    /// Add an object to the collection
    pub fn create(&self, wp: &WriteParams, body: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        wp.validate()?;
        let uri = with_query(self.url_path.clone(), |qp| wp.populate_qp(qp));
        http::Request::post(uri)
            .header(CONTENT_TYPE, JSON_MIME)
            .body(body)
            .map_err(Error::BuildRequest)
    }

    /// Overwrite the object called `name`
    pub fn replace(&self, name: &str, wp: &WriteParams, body: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        wp.validate()?;
        let uri = with_query(self.item_path(name)?, |qp| wp.populate_qp(qp));
        http::Request::put(uri)
            .header(CONTENT_TYPE, JSON_MIME)
            .body(body)
            .map_err(Error::BuildRequest)
    }

    /// Delete the object called `name`
    pub fn delete(&self, name: &str, dp: &DeleteParams) -> Result<http::Request<Vec<u8>>, Error> {
        let uri = with_query(self.item_path(name)?, |qp| dp.populate_qp(qp));
        let body = serde_json::to_vec(dp).map_err(Error::SerializeBody)?;
        http::Request::delete(uri)
            .header(CONTENT_TYPE, JSON_MIME)
            .body(body)
            .map_err(Error::BuildRequest)
    }

    fn item_path(&self, name: &str) -> Result<String, Error> {
        if name.is_empty() {
            return Err(Error::Validation("object name must not be empty".into()));
        }
        Ok(format!("{}/{name}", self.url_path))
    }
}

fn with_query(path: String, populate: impl FnOnce(&mut form_urlencoded::Serializer<String>)) -> String {
    let mut qp = form_urlencoded::Serializer::new(path + "?");
    populate(&mut qp);
    qp.finish()
}
