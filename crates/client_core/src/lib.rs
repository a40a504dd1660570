use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::domain::{Employee, PersonId};
use tracing::{debug, error};

pub mod config;
pub mod error;

pub use config::{load_service_config, ServiceConfig};
pub use error::TransportError;

const CUSTOMER_ID_HEADER: &str = "CustomerID";
const API_KEY_HEADER: &str = "APIKey";

/// CRUD contract for the remote employee collection. Every call is one round trip.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Employee>, TransportError>;
    async fn get_by_key(&self, id: &PersonId) -> Result<Employee, TransportError>;
    async fn create(&self, employee: &Employee) -> Result<Employee, TransportError>;
    async fn update(&self, employee: &Employee) -> Result<Employee, TransportError>;
    async fn delete(&self, id: &PersonId) -> Result<(), TransportError>;
}

pub struct HttpEmployeeService {
    http: Client,
    base_url: String,
}

impl HttpEmployeeService {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .default_headers(request_headers(config)?)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn keyed_url(&self, id: &PersonId) -> String {
        format!("{}({})", self.base_url, id)
    }
}

fn request_headers(config: &ServiceConfig) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("customerid"),
        credential_value(CUSTOMER_ID_HEADER, &config.customer_id)?,
    );
    headers.insert(
        HeaderName::from_static("apikey"),
        credential_value(API_KEY_HEADER, &config.api_key)?,
    );
    Ok(headers)
}

fn credential_value(name: &'static str, raw: &str) -> Result<HeaderValue, TransportError> {
    let mut value = HeaderValue::from_str(raw).map_err(|err| TransportError::InvalidHeader {
        name,
        reason: err.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            status: status.as_u16(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    Ok(ensure_success(response)?.json::<T>().await?)
}

#[async_trait]
impl EmployeeService for HttpEmployeeService {
    async fn get_all(&self) -> Result<Vec<Employee>, TransportError> {
        let result = async {
            let res = self.http.get(&self.base_url).send().await?;
            decode::<Vec<Employee>>(res).await
        }
        .await;

        match result {
            Ok(employees) => {
                debug!(count = employees.len(), "fetched employees");
                Ok(employees)
            }
            Err(err) => {
                error!(operation = "get_all", error = %err, "error fetching employees");
                Err(err)
            }
        }
    }

    async fn get_by_key(&self, id: &PersonId) -> Result<Employee, TransportError> {
        let result = async {
            let res = self.http.get(self.keyed_url(id)).send().await?;
            decode::<Employee>(res).await
        }
        .await;

        result.map_err(|err| {
            error!(operation = "get_by_key", person_id = %id, error = %err, "error fetching employee");
            err
        })
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, TransportError> {
        let result = async {
            let res = self.http.post(&self.base_url).json(employee).send().await?;
            decode::<Employee>(res).await
        }
        .await;

        result.map_err(|err| {
            error!(
                operation = "create",
                person_id = %employee.person_id,
                error = %err,
                "error creating employee"
            );
            err
        })
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, TransportError> {
        let result = async {
            let res = self.http.put(&self.base_url).json(employee).send().await?;
            decode::<Employee>(res).await
        }
        .await;

        result.map_err(|err| {
            error!(
                operation = "update",
                person_id = %employee.person_id,
                error = %err,
                "error updating employee"
            );
            err
        })
    }

    async fn delete(&self, id: &PersonId) -> Result<(), TransportError> {
        let result = async {
            let res = self
                .http
                .delete(self.keyed_url(id))
                .body(id.to_string())
                .send()
                .await?;
            ensure_success(res).map(|_| ())
        }
        .await;

        result.map_err(|err| {
            error!(operation = "delete", person_id = %id, error = %err, "error deleting employee");
            err
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
