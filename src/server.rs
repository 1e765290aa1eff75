use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::balance::compute_balances;
use crate::error::ServiceError;
use crate::exchange::compute_settlement;
use crate::report::{settle_strict, settle_with_report};
use crate::schemas::{Expense, MemberName};
use crate::store::GroupStore;

#[derive(Deserialize)]
struct SettlementRequest {
    #[serde(default)]
    expenses: Option<Vec<Expense>>,
    #[serde(default)]
    members: Option<Vec<MemberName>>,
}

impl SettlementRequest {
    fn into_parts(self) -> (Vec<Expense>, Vec<MemberName>) {
        (
            self.expenses.unwrap_or_default(),
            self.members.unwrap_or_default(),
        )
    }
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

#[post("/settlements")]
async fn settle(json: web::Json<SettlementRequest>) -> HttpResponse {
    let (expenses, members) = json.into_inner().into_parts();
    HttpResponse::Ok().json(compute_settlement(&expenses, &members))
}

#[post("/settlements/report")]
async fn settle_report(json: web::Json<SettlementRequest>) -> HttpResponse {
    let (expenses, members) = json.into_inner().into_parts();
    HttpResponse::Ok().json(settle_with_report(&expenses, &members))
}

#[post("/settlements/strict")]
async fn settle_strictly(
    json: web::Json<SettlementRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (expenses, members) = json.into_inner().into_parts();
    let transactions = settle_strict(&expenses, &members)?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[get("/groups/{id}/balance")]
async fn get_balance(
    store: web::Data<GroupStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let (members, expenses) = load_group(&store, &id).await?;
    Ok(HttpResponse::Ok().json(compute_balances(&expenses, &members)))
}

#[get("/groups/{id}/settlement")]
async fn get_settlement(
    store: web::Data<GroupStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let (members, expenses) = load_group(&store, &id).await?;
    Ok(HttpResponse::Ok().json(compute_settlement(&expenses, &members)))
}

async fn load_group(
    store: &GroupStore,
    id: &str,
) -> Result<(Vec<MemberName>, Vec<Expense>), ServiceError> {
    let group = store
        .find_group(id)
        .await?
        .ok_or_else(|| ServiceError::GroupNotFound(id.to_string()))?;
    let expenses = store.find_expenses(&group.id).await?;
    tracing::debug!(group = %group.id, expenses = expenses.len(), "group loaded");
    Ok((group.members, expenses))
}

/// Routes that only need the request body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(settle)
        .service(settle_report)
        .service(settle_strictly);
}

/// Routes backed by the group store; expects `web::Data<GroupStore>`.
pub fn configure_groups(cfg: &mut web::ServiceConfig) {
    cfg.service(get_balance).service(get_settlement);
}
