//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, ResponseError,
};
use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use cc_api::routes::reservations::AppState;
use cc_core::domain::entities::token::Claims;
use cc_core::domain::entities::{Product, Reservation, ReservationStatus};
use cc_core::domain::value_objects::ReservationPeriod;
use cc_core::repositories::{MockProductRepository, MockReservationRepository};
use cc_core::services::ReservationService;
use cc_shared::{JwtConfig, ReservationPolicy};

pub const TEST_SECRET: &str = "integration-test-secret";

pub type TestState = AppState<MockReservationRepository, MockProductRepository>;

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

/// `Authorization` header value for `user_id`
pub fn bearer(user_id: Uuid) -> String {
    let config = jwt_config();
    let claims = Claims::for_user(user_id, &config.issuer, Duration::minutes(15));
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

/// Day `offset` days from today
pub fn day(offset: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(offset)
}

/// Mock stores plus the state built on top of them
pub struct Fixture {
    pub reservations: MockReservationRepository,
    pub products: MockProductRepository,
    pub product: Product,
    pub state: web::Data<TestState>,
}

impl Fixture {
    /// One product with `capacity` units and the default booking policy
    pub fn with_capacity(capacity: u32) -> Self {
        Self::with_policy(capacity, ReservationPolicy::default())
    }

    pub fn with_policy(capacity: u32, policy: ReservationPolicy) -> Self {
        let product = Product::new("Guitarra española", capacity).with_image("/img/guitarra.png");
        let reservations = MockReservationRepository::new();
        let products = MockProductRepository::with_products(vec![product.clone()]);
        let service = ReservationService::new(
            Arc::new(reservations.clone()),
            Arc::new(products.clone()),
            policy,
        );

        Self {
            reservations,
            products,
            product,
            state: web::Data::new(AppState::new(Arc::new(service))),
        }
    }

    /// Stores a reservation directly, bypassing the capacity check
    pub async fn seed(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        quantity: u32,
        status: ReservationStatus,
    ) -> Reservation {
        let period = ReservationPeriod::new(start, end).unwrap();
        let reservation =
            Reservation::new(self.product.id, user_id, period, quantity).with_status(status);
        self.reservations.seed(reservation.clone()).await;
        reservation
    }
}

/// Calls the service and returns the status, whether the middleware
/// answered with a response or an error
pub async fn status_of<S, R, B>(app: &S, req: R) -> StatusCode
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(response) => response.status(),
        Err(error) => error.as_response_error().status_code(),
    }
}

/// Reads an `ApiResponse` body and returns its `data` field
pub async fn data_of<B>(response: ServiceResponse<B>) -> serde_json::Value
where
    B: MessageBody,
{
    let body: serde_json::Value = test::read_body_json(response).await;
    body["data"].clone()
}
