//! Supplier API endpoints

use api_types::supplier::{CashflowNoteView, SupplierNew, SupplierView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn supplier_view(model: engine::suppliers::Model) -> SupplierView {
    SupplierView {
        id: model.id,
        name: model.name,
        phone: model.phone,
    }
}

fn note_view(model: engine::supplier_notes::Model) -> CashflowNoteView {
    CashflowNoteView {
        id: model.id,
        payment_id: model.payment_id,
        amount_minor: model.amount_minor,
        recipient_name: model.recipient_name,
        date: model.date,
        description: model.description,
    }
}

/// Registers a supplier.
pub async fn supplier_new(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SupplierNew>,
) -> Result<(StatusCode, Json<SupplierView>), ServerError> {
    let supplier = state
        .engine
        .new_supplier(&payload.name, &payload.phone)
        .await?;

    Ok((StatusCode::CREATED, Json(supplier_view(supplier))))
}

/// Lists all suppliers.
pub async fn list(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<SupplierView>>, ServerError> {
    let suppliers = state.engine.suppliers().await?;
    Ok(Json(suppliers.into_iter().map(supplier_view).collect()))
}

/// Lists the audit notes mirrored onto one supplier.
pub async fn notes(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CashflowNoteView>>, ServerError> {
    let notes = state.engine.supplier_notes(id).await?;
    Ok(Json(notes.into_iter().map(note_view).collect()))
}
