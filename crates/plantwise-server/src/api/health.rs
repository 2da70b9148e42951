use actix_web::{HttpResponse, Responder, get, web};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;

use crate::model::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
            database: None,
        }
    }

    pub fn down(message: String) -> Self {
        Self {
            status: "DOWN".to_string(),
            database: Some(message),
        }
    }
}

async fn check_database(db: &DatabaseConnection) -> HealthStatus {
    match db.execute_unprepared("SELECT 1").await {
        Ok(_) => HealthStatus::up(),
        Err(e) => HealthStatus::down(e.to_string()),
    }
}

#[get("/health")]
pub async fn health(data: web::Data<AppState>) -> impl Responder {
    let status = check_database(data.db()).await;

    if status.database.is_none() {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}
