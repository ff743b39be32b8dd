//! GraphQL operation documents for the marketplace API.

use bazaar_market::api::FeedQuery;

/// Paginated feed of every open listing.
pub const ALL_PRODUCTS_PAGINATED: &str = "\
query GetAllProductsPaginated($page: Int!, $size: Int!) {
  allProductsPaginated(page: $page, size: $size) {
    totalPages
    totalElements
    currentPage
    products {
      id
      title
      description
      categories
      sellingPrice
      rent
      typeOfRent
      availabilityStatus
      createdAt
      rentStartTime
      rentEndTime
    }
  }
}";

/// Paginated feed of the signed-in user's own listings.
pub const PRODUCTS_BY_USER_PAGINATED: &str = "\
query GetProductsByUserPaginated($page: Int!, $size: Int!) {
  productsByUserPaginated(page: $page, size: $size) {
    totalPages
    totalElements
    currentPage
    products {
      id
      title
      description
      categories
      sellingPrice
      rent
      typeOfRent
      availabilityStatus
      createdAt
      rentStartTime
      rentEndTime
    }
  }
}";

/// Paginated feed of one of the user's activity buckets.
pub const ACTIVITY_PAGINATED: &str = "\
query GetActivityPaginated($kind: String!, $page: Int!, $size: Int!) {
  activityPaginated(kind: $kind, page: $page, size: $size) {
    totalPages
    totalElements
    currentPage
    products {
      id
      title
      description
      categories
      sellingPrice
      rent
      typeOfRent
      availabilityStatus
      createdAt
      rentStartTime
      rentEndTime
    }
  }
}";

/// Create a listing.
pub const ADD_PRODUCT: &str = "\
mutation AddProduct($addProductRequest: AddProductInput!) {
  addProduct(addProductRequest: $addProductRequest) {
    statusCode
    statusMessage
  }
}";

/// Edit a listing.
pub const EDIT_PRODUCT: &str = "\
mutation EditProduct($productId: ID!, $editRequest: AddProductInput!) {
  editProduct(productId: $productId, editRequest: $editRequest) {
    statusCode
    statusMessage
  }
}";

/// Delete a listing.
pub const DELETE_PRODUCT: &str = "\
mutation DeleteProduct($productId: ID!) {
  deleteProduct(productId: $productId) {
    statusCode
    statusMessage
  }
}";

/// Book a rental window.
pub const BOOK_FOR_RENT: &str = "\
mutation BookForRent($productId: ID!, $rentStart: String!, $rentEnd: String!, $noOfHours: Int!) {
  bookForRent(productId: $productId, rentStart: $rentStart, rentEnd: $rentEnd, noOfHours: $noOfHours) {
    statusCode
    statusMessage
  }
}";

/// Buy a product outright.
pub const BUY_PRODUCT: &str = "\
mutation BuyProduct($productId: ID!, $status: String!) {
  buyProduct(productId: $productId, status: $status) {
    statusCode
    statusMessage
  }
}";

/// Sign in; returns the bearer token.
pub const LOGIN: &str = "\
mutation Login($email: String!, $password: String!) {
  login(jwtRequest: { email: $email, password: $password }) {
    jwtToken
    message
  }
}";

/// The document, operation name, and data field for a feed query.
pub fn feed_operation(query: FeedQuery) -> (&'static str, &'static str, &'static str) {
    match query {
        FeedQuery::All => (
            ALL_PRODUCTS_PAGINATED,
            "GetAllProductsPaginated",
            "allProductsPaginated",
        ),
        FeedQuery::Mine => (
            PRODUCTS_BY_USER_PAGINATED,
            "GetProductsByUserPaginated",
            "productsByUserPaginated",
        ),
        FeedQuery::Activity(_) => (ACTIVITY_PAGINATED, "GetActivityPaginated", "activityPaginated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_market::api::ActivityKind;

    #[test]
    fn test_feed_operation_mapping() {
        let (document, name, field) = feed_operation(FeedQuery::All);
        assert!(document.contains("allProductsPaginated"));
        assert_eq!(name, "GetAllProductsPaginated");
        assert_eq!(field, "allProductsPaginated");

        let (document, _, field) = feed_operation(FeedQuery::Mine);
        assert!(document.contains("productsByUserPaginated"));
        assert_eq!(field, "productsByUserPaginated");

        let (document, _, field) = feed_operation(FeedQuery::Activity(ActivityKind::Borrowed));
        assert!(document.contains("activityPaginated"));
        assert_eq!(field, "activityPaginated");
    }

    #[test]
    fn test_documents_select_the_status_envelope() {
        for document in [ADD_PRODUCT, EDIT_PRODUCT, DELETE_PRODUCT, BOOK_FOR_RENT, BUY_PRODUCT] {
            assert!(document.contains("statusCode"));
            assert!(document.contains("statusMessage"));
        }
    }
}
