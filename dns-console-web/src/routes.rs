//! REST surface consumed by the browser UI.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Serialize;

use dns_console_core::{CoreError, CreateRecordRequest, RecordService, UpdateRecordRequest};
use dns_console_provider::DnsRecord;

use crate::error::ApiError;

#[derive(Serialize)]
struct RecordListResponse {
    zone: String,
    records: Vec<DnsRecord>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    zone: String,
}

#[derive(Serialize)]
struct DeleteResponse {
    status: &'static str,
}

/// Register all API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(list_records)
        .service(create_record)
        .service(update_record)
        .service(delete_record);
}

/// Malformed JSON bodies get the same `{"error": ...}` shape as every other
/// failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError(CoreError::Validation(err.to_string())).into()
}

#[get("/api/health")]
async fn health(service: web::Data<RecordService>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        zone: service.zone().to_string(),
    })
}

#[get("/api/records")]
async fn list_records(service: web::Data<RecordService>) -> Result<HttpResponse, ApiError> {
    let records = service.list_records().await?;
    Ok(HttpResponse::Ok().json(RecordListResponse {
        zone: service.zone().to_string(),
        records,
    }))
}

#[post("/api/records")]
async fn create_record(
    service: web::Data<RecordService>,
    body: web::Json<CreateRecordRequest>,
) -> Result<HttpResponse, ApiError> {
    let record = service.create_record(&body).await?;
    Ok(HttpResponse::Created().json(record))
}

#[put("/api/records/{record_type}/{name}")]
async fn update_record(
    service: web::Data<RecordService>,
    path: web::Path<(String, String)>,
    body: web::Json<UpdateRecordRequest>,
) -> Result<HttpResponse, ApiError> {
    let (record_type, name) = path.into_inner();
    let record = service.update_record(&name, &record_type, &body).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[delete("/api/records/{record_type}/{name}")]
async fn delete_record(
    service: web::Data<RecordService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (record_type, name) = path.into_inner();
    service.delete_record(&name, &record_type).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse { status: "deleted" }))
}
