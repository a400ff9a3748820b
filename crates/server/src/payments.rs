//! Payment API endpoints

use api_types::cashflow::{PaymentNew, PaymentView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::NewPayment;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

pub(crate) fn payment_view(model: engine::payments::Model) -> PaymentView {
    PaymentView {
        id: model.id,
        date: model.date,
        amount_minor: model.amount_minor,
        recipient_name: model.recipient_name,
        description: model.description,
    }
}

/// Records a payment and queues the best-effort alert.
pub async fn payment_new(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PaymentNew>,
) -> Result<(StatusCode, Json<PaymentView>), ServerError> {
    let payment = state
        .engine
        .add_payment(NewPayment {
            date: payload.date,
            amount_minor: payload.amount_minor,
            recipient_name: payload.recipient_name,
            description: payload.description,
        })
        .await?;

    // Fire-and-forget: the response never waits on the webhook.
    state.notifier.payment_recorded(&payment);

    Ok((StatusCode::CREATED, Json(payment_view(payment))))
}

/// Hard-deletes a payment.
pub async fn payment_delete(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists every recorded payment, newest first.
pub async fn list(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<PaymentView>>, ServerError> {
    let payments = state.engine.list_payments().await?;
    Ok(Json(payments.into_iter().map(payment_view).collect()))
}
