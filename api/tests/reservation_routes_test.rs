//! Integration tests for the reservation routes, run against the real
//! application factory wired to in-memory repositories

mod common;

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::json;
    use uuid::Uuid;

    use cc_api::app::create_app;
    use cc_core::domain::entities::ReservationStatus;
    use cc_shared::{Environment, ReservationPolicy};

    use crate::common::{bearer, data_of, day, jwt_config, status_of, Fixture};

    macro_rules! init_app {
        ($fixture:expr) => {
            test::init_service(create_app(
                $fixture.state.clone(),
                &jwt_config(),
                Environment::Development,
            ))
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_and_unknown_route() {
        let fixture = Fixture::with_capacity(1);
        let app = init_app!(fixture);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not_found");
    }

    #[actix_web::test]
    async fn test_create_reservation_for_authenticated_user() {
        let fixture = Fixture::with_capacity(5);
        let app = init_app!(fixture);
        let user_id = Uuid::new_v4();

        let req = test::TestRequest::post()
            .uri("/api/v1/reservations")
            .insert_header(("Authorization", bearer(user_id)))
            .set_json(json!({
                "product_id": fixture.product.id,
                "user_id": Uuid::new_v4(),
                "start_date": day(3),
                "end_date": day(5),
                "quantity": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let data = data_of(resp).await;
        assert_eq!(data["status"], "PENDING");
        assert_eq!(data["quantity"], 2);
        assert_eq!(data["user_id"], user_id.to_string());
        assert_eq!(data["start_date"], day(3).to_string());
        assert_eq!(fixture.reservations.len().await, 1);
    }

    #[actix_web::test]
    async fn test_create_requires_token() {
        let fixture = Fixture::with_capacity(5);
        let app = init_app!(fixture);

        let req = test::TestRequest::post()
            .uri("/api/v1/reservations")
            .set_json(json!({
                "product_id": fixture.product.id,
                "start_date": day(3),
                "end_date": day(5),
                "quantity": 1
            }))
            .to_request();
        assert_eq!(status_of(&app, req).await, StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/reservations")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .set_json(json!({
                "product_id": fixture.product.id,
                "start_date": day(3),
                "end_date": day(5),
                "quantity": 1
            }))
            .to_request();
        assert_eq!(status_of(&app, req).await, StatusCode::UNAUTHORIZED);
        assert!(fixture.reservations.is_empty().await);
    }

    #[actix_web::test]
    async fn test_create_rejections() {
        let fixture = Fixture::with_capacity(5);
        let app = init_app!(fixture);
        let auth = bearer(Uuid::new_v4());

        let cases = [
            // inverted dates
            (
                json!({"product_id": fixture.product.id, "start_date": day(5), "end_date": day(3), "quantity": 1}),
                StatusCode::BAD_REQUEST,
            ),
            // zero quantity
            (
                json!({"product_id": fixture.product.id, "start_date": day(3), "end_date": day(5), "quantity": 0}),
                StatusCode::BAD_REQUEST,
            ),
            // malformed body
            (
                json!({"product_id": fixture.product.id, "start_date": "tomorrow"}),
                StatusCode::BAD_REQUEST,
            ),
            // unknown product
            (
                json!({"product_id": Uuid::new_v4(), "start_date": day(3), "end_date": day(5), "quantity": 1}),
                StatusCode::NOT_FOUND,
            ),
            // more than capacity
            (
                json!({"product_id": fixture.product.id, "start_date": day(3), "end_date": day(5), "quantity": 6}),
                StatusCode::CONFLICT,
            ),
        ];

        for (body, expected) in cases {
            let req = test::TestRequest::post()
                .uri("/api/v1/reservations")
                .insert_header(("Authorization", auth.clone()))
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "body: {}", body);
        }

        assert!(fixture.reservations.is_empty().await);
    }

    #[actix_web::test]
    async fn test_booking_limits_are_opt_in() {
        let create = |fixture: &Fixture| {
            test::TestRequest::post()
                .uri("/api/v1/reservations")
                .insert_header(("Authorization", bearer(Uuid::new_v4())))
                .set_json(json!({
                    "product_id": fixture.product.id,
                    "start_date": day(-2),
                    "end_date": day(400),
                    "quantity": 150
                }))
                .to_request()
        };

        let open = Fixture::with_capacity(200);
        let app = init_app!(open);
        let resp = test::call_service(&app, create(&open)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let limited = Fixture::with_policy(
            200,
            ReservationPolicy {
                reject_past_start_dates: true,
                ..ReservationPolicy::default()
            },
        );
        let app = init_app!(limited);
        let resp = test::call_service(&app, create(&limited)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert!(limited.reservations.is_empty().await);
    }

    #[actix_web::test]
    async fn test_availability_breakdown() {
        let fixture = Fixture::with_capacity(5);
        fixture
            .seed(Uuid::new_v4(), day(10), day(15), 3, ReservationStatus::Confirmed)
            .await;
        let app = init_app!(fixture);

        let uri = format!(
            "/api/v1/reservations/availability?product_id={}&start_date={}&end_date={}&quantity=3",
            fixture.product.id,
            day(14),
            day(20)
        );
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let data = data_of(resp).await;
        assert_eq!(data["available"], false);
        assert_eq!(data["capacity"], 5);
        assert_eq!(data["reserved"], 3);
        assert_eq!(data["remaining"], 2);
        assert_eq!(data["product_id"], fixture.product.id.to_string());

        let uri = format!(
            "/api/v1/reservations/availability?product_id={}&start_date={}&end_date={}&quantity=3",
            fixture.product.id,
            day(16),
            day(20)
        );
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let data = data_of(resp).await;
        assert_eq!(data["available"], true);
        assert_eq!(data["remaining"], 5);
    }

    #[actix_web::test]
    async fn test_availability_defaults_quantity_and_rejects_bad_query() {
        let fixture = Fixture::with_capacity(1);
        let app = init_app!(fixture);

        let uri = format!(
            "/api/v1/reservations/availability?product_id={}&start_date={}&end_date={}",
            fixture.product.id,
            day(1),
            day(2)
        );
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let data = data_of(resp).await;
        assert_eq!(data["requested"], 1);
        assert_eq!(data["available"], true);

        let uri = "/api/v1/reservations/availability?product_id=abc&start_date=x";
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_cancel_ownership_and_double_cancel() {
        let fixture = Fixture::with_capacity(5);
        let owner = Uuid::new_v4();
        let reservation = fixture
            .seed(owner, day(3), day(4), 1, ReservationStatus::Pending)
            .await;
        let app = init_app!(fixture);
        let uri = format!("/api/v1/reservations/{}/cancel", reservation.id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", bearer(Uuid::new_v4())))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(data_of(resp).await["status"], "CANCELLED");

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_transition");
        assert_eq!(body["details"]["from"], "CANCELLED");
    }

    #[actix_web::test]
    async fn test_status_update() {
        let fixture = Fixture::with_capacity(5);
        let owner = Uuid::new_v4();
        let reservation = fixture
            .seed(owner, day(3), day(4), 1, ReservationStatus::Pending)
            .await;
        let app = init_app!(fixture);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/reservations/{}/status?status=confirmed", reservation.id))
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(data_of(resp).await["status"], "CONFIRMED");

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/reservations/{}/status?status=PENDING", reservation.id))
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/reservations/{}/status?status=ARCHIVED", reservation.id))
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/reservations/{}/status?status=COMPLETED", Uuid::new_v4()))
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/v1/reservations/not-a-uuid/cancel")
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_user_listings() {
        let fixture = Fixture::with_capacity(5);
        let owner = Uuid::new_v4();
        fixture
            .seed(owner, day(1), day(2), 1, ReservationStatus::Pending)
            .await;
        let completed = fixture
            .seed(owner, day(5), day(6), 1, ReservationStatus::Completed)
            .await;
        fixture
            .seed(Uuid::new_v4(), day(1), day(2), 1, ReservationStatus::Pending)
            .await;
        let app = init_app!(fixture);

        let req = test::TestRequest::get()
            .uri("/api/v1/reservations/user")
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let data = data_of(test::call_service(&app, req).await).await;
        let items = data.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items
            .iter()
            .all(|item| item["product_name"] == "Guitarra española"
                && item["product_image"] == "/img/guitarra.png"));

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/reservations/user/completed?product_id={}",
                fixture.product.id
            ))
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let data = data_of(test::call_service(&app, req).await).await;
        assert_eq!(data.as_array().unwrap().len(), 1);
        assert_eq!(data[0]["id"], completed.id.to_string());

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/reservations/user/completed?product_id={}",
                Uuid::new_v4()
            ))
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let data = data_of(test::call_service(&app, req).await).await;
        assert!(data.as_array().unwrap().is_empty());

        let req = test::TestRequest::get()
            .uri("/api/v1/reservations/user")
            .to_request();
        assert_eq!(status_of(&app, req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_reservations_by_status() {
        let fixture = Fixture::with_capacity(5);
        let owner = Uuid::new_v4();
        let pending = fixture
            .seed(owner, day(1), day(2), 1, ReservationStatus::Pending)
            .await;
        fixture
            .seed(owner, day(3), day(4), 1, ReservationStatus::Cancelled)
            .await;
        let app = init_app!(fixture);

        let req = test::TestRequest::get()
            .uri("/api/v1/reservations/by-status/pending")
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let data = data_of(resp).await;
        assert_eq!(data.as_array().unwrap().len(), 1);
        assert_eq!(data[0]["id"], pending.id.to_string());

        let req = test::TestRequest::get()
            .uri("/api/v1/reservations/by-status/unknown")
            .insert_header(("Authorization", bearer(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_product_reservations_are_public_and_active_only() {
        let fixture = Fixture::with_capacity(5);
        let late = fixture
            .seed(Uuid::new_v4(), day(8), day(9), 1, ReservationStatus::Confirmed)
            .await;
        let early = fixture
            .seed(Uuid::new_v4(), day(2), day(3), 1, ReservationStatus::Pending)
            .await;
        fixture
            .seed(Uuid::new_v4(), day(4), day(5), 1, ReservationStatus::Cancelled)
            .await;
        let app = init_app!(fixture);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/reservations/product/{}", fixture.product.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let data = data_of(resp).await;
        let ids: Vec<&str> = data
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![early.id.to_string(), late.id.to_string()]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/reservations/product/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
