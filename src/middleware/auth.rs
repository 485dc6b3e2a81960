use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::auth_service;

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        // Missing header, malformed header, bad signature and expired token
        // all collapse into the same 401
        let claims = token.and_then(|token| auth_service::verify_session_token(&token).ok());

        match claims {
            Some(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            None => Box::pin(async move { Err(unauthorized()) }),
        }
    }
}

fn unauthorized() -> Error {
    let body = serde_json::json!({
        "error": true,
        "message": "unauthorized access"
    });
    InternalError::from_response(
        "unauthorized access",
        HttpResponse::Unauthorized().json(body),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::SessionClaims;
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{Map, Value};

    async fn whoami(claims: web::ReqData<SessionClaims>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "email": claims.email.as_deref().unwrap_or("unknown")
        }))
    }

    macro_rules! gated_app {
        () => {
            test::init_service(App::new().service(
                web::scope("/userclasses")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ))
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_header_returns_401() {
        std::env::set_var("TOKEN_SECRET", "test-secret");
        let app = gated_app!();

        let req = test::TestRequest::get().uri("/userclasses").to_request();
        match test::try_call_service(&app, req).await {
            Ok(res) => assert_eq!(res.status(), StatusCode::UNAUTHORIZED),
            Err(e) => assert_eq!(
                e.as_response_error().status_code(),
                StatusCode::UNAUTHORIZED
            ),
        }
    }

    #[actix_web::test]
    async fn test_invalid_token_returns_401() {
        std::env::set_var("TOKEN_SECRET", "test-secret");
        let app = gated_app!();

        let req = test::TestRequest::get()
            .uri("/userclasses")
            .insert_header(("Authorization", "Bearer not-a-real-token"))
            .to_request();
        match test::try_call_service(&app, req).await {
            Ok(res) => assert_eq!(res.status(), StatusCode::UNAUTHORIZED),
            Err(e) => assert_eq!(
                e.as_response_error().status_code(),
                StatusCode::UNAUTHORIZED
            ),
        }
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_the_handler_with_claims() {
        std::env::set_var("TOKEN_SECRET", "test-secret");

        let mut payload = Map::new();
        payload.insert(
            "email".to_string(),
            Value::from("student@music.school"),
        );
        let token = auth_service::issue_session_token(payload).unwrap();

        let app = gated_app!();
        let req = test::TestRequest::get()
            .uri("/userclasses")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["email"], "student@music.school");
    }
}
