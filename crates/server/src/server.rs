use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{Notifier, days, export, month, payments, settings, suppliers, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    pub notifier: Notifier,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let found = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(found) = found else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(found);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/cashflow/settings",
            get(settings::get).put(settings::update),
        )
        .route("/cashflow/month/{month}", get(month::get))
        .route("/cashflow/opening-cash", post(days::opening_cash_new))
        .route("/cashflow/sales", post(days::sales_new))
        .route("/cashflow/day/{date}", put(days::update_day))
        .route("/cashflow/payment", post(payments::payment_new))
        .route("/cashflow/payment/{id}", delete(payments::payment_delete))
        .route("/cashflow/payments", get(payments::list))
        .route("/cashflow/reset/{month}", delete(days::reset_month))
        .route("/cashflow/export/{month}", get(export::get))
        .route(
            "/suppliers",
            get(suppliers::list).post(suppliers::supplier_new),
        )
        .route("/suppliers/{id}/notes", get(suppliers::notes))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection, notifier: Notifier) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, notifier, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    notifier: Notifier,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
        notifier,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    notifier: Notifier,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, notifier, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, ActiveValue, Database};
    use tower::ServiceExt;

    use super::*;

    async fn test_state() -> ServerState {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        let admin = user::ActiveModel {
            username: ActiveValue::Set("admin".to_string()),
            password: ActiveValue::Set("secret".to_string()),
        };
        admin.insert(&db).await.unwrap();

        let engine = Engine::builder().database(db.clone()).build().await.unwrap();

        ServerState {
            engine: Arc::new(engine),
            db,
            notifier: Notifier::disabled(),
        }
    }

    fn credentials() -> String {
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode("admin:secret")
        )
    }

    fn get_request(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, credentials())
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, credentials())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn requests_without_credentials_are_rejected() {
        let app = router(test_state().await);

        let res = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/cashflow/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(res.status().is_client_error());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = router(test_state().await);

        let res = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/cashflow/settings")
                    .header(
                        header::AUTHORIZATION,
                        format!(
                            "Basic {}",
                            base64::engine::general_purpose::STANDARD.encode("admin:wrong")
                        ),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn settings_roundtrip() {
        let state = test_state().await;

        let res = router(state.clone())
            .oneshot(get_request("/cashflow/settings"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["default_daily_sales_minor"], 600_000);
        assert_eq!(body["safety_threshold_minor"], 200_000);

        let res = router(state)
            .oneshot(json_request(
                "PUT",
                "/cashflow/settings",
                serde_json::json!({ "safety_threshold_minor": 100_000 }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["default_daily_sales_minor"], 600_000);
        assert_eq!(body["safety_threshold_minor"], 100_000);
    }

    #[tokio::test]
    async fn month_endpoint_returns_full_ledger() {
        let app = router(test_state().await);

        let res = app
            .oneshot(get_request("/cashflow/month/2026-03"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 31);
        assert_eq!(entries[0]["date"], "2026-03-01");
        assert_eq!(entries[0]["opening_cash_minor"], 0);
        assert_eq!(entries[0]["status"], "Safe");
    }

    #[tokio::test]
    async fn malformed_month_token_is_unprocessable() {
        let app = router(test_state().await);

        let res = app
            .oneshot(get_request("/cashflow/month/2026-13"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn payment_flow_over_http() {
        let state = test_state().await;

        let res = router(state.clone())
            .oneshot(json_request(
                "POST",
                "/cashflow/payment",
                serde_json::json!({
                    "date": "2026-03-02",
                    "amount_minor": 45_000,
                    "recipient_name": "Macelleria Russo",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = body_json(res).await;

        let res = router(state.clone())
            .oneshot(get_request("/cashflow/month/2026-03"))
            .await
            .unwrap();
        let body = body_json(res).await;
        assert_eq!(body[1]["total_payments_minor"], 45_000);

        let id = created["id"].as_str().unwrap();
        let res = router(state)
            .oneshot(json_request(
                "DELETE",
                &format!("/cashflow/payment/{id}"),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn export_is_csv_attachment() {
        let app = router(test_state().await);

        let res = app
            .oneshot(get_request("/cashflow/export/2026-03"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );

        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Date,Day,Sales,Opening,Payments,Ending,Status,Details"));
        // Header plus one row per day.
        assert_eq!(text.lines().count(), 32);
    }
}
