use actix_web::{
    delete, get, post,
    web::{self, ServiceConfig},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::DashboardError,
    fetcher::SessionStore,
    models::{
        dashboard_view::DashboardView,
        pagination::{Pagination, Sort},
    },
    render::dashboard::render_text,
};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionBody {
    page_size: Option<u32>,
}

#[derive(Serialize, Debug)]
pub struct SessionCreated {
    id: String,
    view: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[post("/sessions")]
pub async fn create_session(
    store: web::Data<SessionStore>,
    body: Option<web::Json<CreateSessionBody>>,
) -> Result<HttpResponse, DashboardError> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let session = store.create(body.page_size).await?;

    // A failed first load keeps the session around; the client can refresh.
    let error = match session.mount().await {
        Ok(()) => None,
        Err(err) => {
            error!(session = %session.id(), error = %err, "initial dashboard load failed");
            Some(err.to_string())
        }
    };

    Ok(HttpResponse::Created().json(SessionCreated {
        id: session.id().to_string(),
        view: session.view().await,
        error,
    }))
}

#[get("/sessions/{id}")]
pub async fn get_view(
    store: web::Data<SessionStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, DashboardError> {
    let session = store.get(&id).await?;
    Ok(HttpResponse::Ok().json(session.view().await))
}

#[get("/sessions/{id}/table")]
pub async fn get_table(
    store: web::Data<SessionStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, DashboardError> {
    let session = store.get(&id).await?;
    let view = session.view().await;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_text(&view)))
}

#[post("/sessions/{id}/pagination")]
pub async fn change_page(
    store: web::Data<SessionStore>,
    id: web::Path<String>,
    pagination: web::Json<Pagination>,
) -> Result<HttpResponse, DashboardError> {
    let session = store.get(&id).await?;
    session.change_page(pagination.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session.view().await))
}

#[post("/sessions/{id}/sort")]
pub async fn change_sort(
    store: web::Data<SessionStore>,
    id: web::Path<String>,
    sort: web::Json<Sort>,
) -> Result<HttpResponse, DashboardError> {
    let session = store.get(&id).await?;
    session.change_sort(sort.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session.view().await))
}

#[post("/sessions/{id}/refresh")]
pub async fn refresh(
    store: web::Data<SessionStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, DashboardError> {
    let session = store.get(&id).await?;
    session.mount().await?;
    Ok(HttpResponse::Ok().json(session.view().await))
}

#[delete("/sessions/{id}")]
pub async fn delete_session(
    store: web::Data<SessionStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, DashboardError> {
    store.remove(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn init(config: &mut ServiceConfig) {
    config
        .service(create_session)
        .service(get_view)
        .service(get_table)
        .service(change_page)
        .service(change_sort)
        .service(refresh)
        .service(delete_session);
}
