//! GraphQL transport for the Bazaar marketplace API.
//!
//! Implements the `bazaar-market` collaborator traits over HTTP: each call
//! posts one GraphQL operation, attaches the bearer credential read from the
//! [`TokenProvider`] at call time, and unwraps the response envelope.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_data::GraphQlClient;
//! use bazaar_auth::TokenStore;
//! use bazaar_market::prelude::*;
//! use std::sync::Arc;
//!
//! let tokens = Arc::new(TokenStore::new());
//! let client = GraphQlClient::new("https://api.example.com/graphql", tokens.clone())?;
//!
//! let session = client.login("user@example.com", "hunter2").await?;
//! tokens.set(session.token.clone());
//!
//! let page = client.fetch_page(FeedQuery::All, 0, 10).await?;
//! ```

mod error;
pub mod operations;
mod request;
mod response;

pub use error::FetchError;
pub use request::GraphQlRequest;
pub use response::{GraphQlError, GraphQlResponse};

use bazaar_auth::{AuthSession, TokenProvider};
use bazaar_market::api::{
    ApiStatus, BookingMutations, CatalogQuery, FeedQuery, ProductMutations, ProductPage,
};
use bazaar_market::catalog::ProductDraft;
use bazaar_market::rental::BookingRequest;
use bazaar_market::{MarketError, ProductId};

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// GraphQL client for the marketplace API.
pub struct GraphQlClient {
    endpoint: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl GraphQlClient {
    /// Create a client for an endpoint. The provider is consulted on every
    /// request, so sign-in and sign-out take effect without rebuilding the
    /// client.
    pub fn new(
        endpoint: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
            tokens,
        })
    }

    /// Post one operation and parse the envelope.
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, FetchError> {
        debug!(
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            "executing GraphQL operation"
        );
        let mut builder = self.http.post(&self.endpoint).json(request);
        // Read at call time: a token refreshed mid-session reaches this
        // request, and sign-out stops authenticating immediately.
        if let Some(token) = self.tokens.current_token() {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        GraphQlResponse::from_slice(&bytes)
    }

    /// Execute a mutation that answers with the status envelope.
    async fn mutate(
        &self,
        request: GraphQlRequest,
        field: &str,
    ) -> Result<ApiStatus, MarketError> {
        let response = self.execute(&request).await?;
        Ok(response.take::<ApiStatus>(field)?)
    }

    /// Sign in and build the session record from the issued token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, FetchError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct LoginPayload {
            jwt_token: String,
            #[serde(default)]
            #[allow(dead_code)]
            message: Option<String>,
        }

        let request = GraphQlRequest::new(operations::LOGIN)
            .operation("Login")
            .variable("email", email)
            .variable("password", password);
        let response = self.execute(&request).await?;
        let payload: LoginPayload = response.take("login")?;
        AuthSession::new(payload.jwt_token, email)
            .map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl CatalogQuery for GraphQlClient {
    async fn fetch_page(
        &self,
        query: FeedQuery,
        page: u32,
        size: u32,
    ) -> Result<ProductPage, MarketError> {
        let (document, name, field) = operations::feed_operation(query);
        let mut request = GraphQlRequest::new(document)
            .operation(name)
            .variable("page", page)
            .variable("size", size);
        if let FeedQuery::Activity(kind) = query {
            request = request.variable("kind", kind.as_str());
        }
        let response = self.execute(&request).await?;
        Ok(response.take::<ProductPage>(field)?)
    }
}

#[async_trait]
impl BookingMutations for GraphQlClient {
    async fn book_for_rent(&self, booking: &BookingRequest) -> Result<ApiStatus, MarketError> {
        let request = GraphQlRequest::new(operations::BOOK_FOR_RENT)
            .operation("BookForRent")
            .variable("productId", booking.product_id.get())
            .variable("rentStart", booking.rent_start.as_str())
            .variable("rentEnd", booking.rent_end.as_str())
            .variable("noOfHours", booking.hours);
        self.mutate(request, "bookForRent").await
    }

    async fn buy_product(&self, product_id: ProductId) -> Result<ApiStatus, MarketError> {
        let request = GraphQlRequest::new(operations::BUY_PRODUCT)
            .operation("BuyProduct")
            .variable("productId", product_id.get())
            .variable("status", "SOLD");
        self.mutate(request, "buyProduct").await
    }
}

#[async_trait]
impl ProductMutations for GraphQlClient {
    async fn create_product(&self, draft: &ProductDraft) -> Result<ApiStatus, MarketError> {
        draft.validate()?;
        let request = GraphQlRequest::new(operations::ADD_PRODUCT)
            .operation("AddProduct")
            .variable(
                "addProductRequest",
                serde_json::to_value(draft).map_err(FetchError::from)?,
            );
        self.mutate(request, "addProduct").await
    }

    async fn edit_product(
        &self,
        product_id: ProductId,
        draft: &ProductDraft,
    ) -> Result<ApiStatus, MarketError> {
        draft.validate()?;
        let request = GraphQlRequest::new(operations::EDIT_PRODUCT)
            .operation("EditProduct")
            .variable("productId", product_id.get())
            .variable(
                "editRequest",
                serde_json::to_value(draft).map_err(FetchError::from)?,
            );
        self.mutate(request, "editProduct").await
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<ApiStatus, MarketError> {
        let request = GraphQlRequest::new(operations::DELETE_PRODUCT)
            .operation("DeleteProduct")
            .variable("productId", product_id.get());
        self.mutate(request, "deleteProduct").await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchError, GraphQlClient, GraphQlRequest, GraphQlResponse};
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_auth::TokenStore;

    #[test]
    fn test_client_construction() {
        let tokens = Arc::new(TokenStore::new());
        let client = GraphQlClient::new("http://localhost:8080/graphql", tokens).unwrap();
        assert_eq!(client.endpoint, "http://localhost:8080/graphql");
    }
}
