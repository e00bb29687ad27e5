//! Generic CRUD handlers shared by every record scope.
//!
//! Each entity module builds its own `web::scope` (so it can add routes such
//! as `/preview` ahead of `/{id}`) and hands it to [`crud_routes`].

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse, Scope};
use serde_json::Value;

use crate::core::error::AppError;
use crate::core::{record_from_json, ListQuery, Record, RecordPatch, SortDirection, SortOrder};
use crate::modules::records::services::{DerivedFields, RecordService};

/// Query parameters that are not field filters
const ORDER_BY_PARAM: &str = "order_by";
const DIRECTION_PARAM: &str = "direction";

/// Build a list query from raw query-string parameters.
///
/// `order_by` and `direction` select the sort; every other parameter is an
/// equality filter. Unknown fields are rejected later by the whitelist check.
pub fn list_query_from_params<R: Record>(
    params: &BTreeMap<String, String>,
) -> Result<ListQuery, AppError> {
    let default_order = R::default_order();

    let direction = params
        .get(DIRECTION_PARAM)
        .map(|d| d.parse::<SortDirection>())
        .transpose()?;

    let order = match params.get(ORDER_BY_PARAM) {
        Some(field) => SortOrder {
            field: field.clone(),
            direction: direction.unwrap_or(SortDirection::Asc),
        },
        None => SortOrder {
            direction: direction.unwrap_or(default_order.direction),
            ..default_order
        },
    };

    let query = params
        .iter()
        .filter(|(key, _)| key.as_str() != ORDER_BY_PARAM && key.as_str() != DIRECTION_PARAM)
        .fold(ListQuery::for_kind::<R>().ordered_by(order), |query, (field, value)| {
            query.filter(field.as_str(), value.as_str())
        });

    Ok(query)
}

/// POST {scope}
pub async fn create_record<R: Record + DerivedFields>(
    service: web::Data<Arc<RecordService<R>>>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let record = record_from_json::<R>(body.into_inner())?;
    let stored = service.create(record).await?;

    Ok(HttpResponse::Created().json(stored))
}

/// GET {scope}?order_by=&direction=&field=value
pub async fn list_records<R: Record + DerivedFields>(
    service: web::Data<Arc<RecordService<R>>>,
    params: web::Query<BTreeMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let query = list_query_from_params::<R>(&params)?;
    let records = service.list(query).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// GET {scope}/{id}
pub async fn get_record<R: Record + DerivedFields>(
    service: web::Data<Arc<RecordService<R>>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let stored = service.get(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(stored))
}

/// PATCH {scope}/{id}
pub async fn update_record<R: Record + DerivedFields>(
    service: web::Data<Arc<RecordService<R>>>,
    path: web::Path<String>,
    patch: web::Json<RecordPatch>,
) -> Result<HttpResponse, AppError> {
    let stored = service.update(&path.into_inner(), patch.into_inner()).await?;

    Ok(HttpResponse::Ok().json(stored))
}

/// DELETE {scope}/{id}
pub async fn delete_record<R: Record + DerivedFields>(
    service: web::Data<Arc<RecordService<R>>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Append the five CRUD routes for `R` to a scope
pub fn crud_routes<R: Record + DerivedFields>(scope: Scope) -> Scope {
    scope
        .route("", web::post().to(create_record::<R>))
        .route("", web::get().to(list_records::<R>))
        .route("/{id}", web::get().to(get_record::<R>))
        .route("/{id}", web::patch().to(update_record::<R>))
        .route("/{id}", web::delete().to(delete_record::<R>))
}

/// Mount a plain CRUD scope for `R` at its kind's path
pub fn configure_crud<R: Record + DerivedFields>(cfg: &mut web::ServiceConfig) {
    cfg.service(crud_routes::<R>(web::scope(R::KIND.path())));
}
