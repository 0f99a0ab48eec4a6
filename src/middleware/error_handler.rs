use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{JsonPayloadError, QueryPayloadError},
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
    Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::core::AppError;
use crate::middleware::request_id::RequestIdValue;

/// Logs every failed request together with its request id, and stamps that
/// id into `AppError` bodies as `traceId`.
///
/// Headers set further in (version headers, for example) are carried over to
/// the re-rendered response.
pub struct ErrorHandler;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandler
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorHandlerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let request_id = req
            .extensions()
            .get::<RequestIdValue>()
            .map(|id| id.0.clone());

        Box::pin(async move {
            let log_id = request_id.as_deref().unwrap_or("-");
            let res = service.call(req).await.inspect_err(|err| log_error(log_id, err))?;

            let Some(err) = res.response().error() else {
                return Ok(res.map_into_left_body());
            };
            log_error(log_id, err);

            let Some(mut rendered) = err
                .as_error::<AppError>()
                .map(|app_err| app_err.to_response(request_id.as_deref()))
            else {
                return Ok(res.map_into_left_body());
            };

            let (http_req, original) = res.into_parts();
            for (name, value) in original.headers() {
                if name != CONTENT_TYPE && name != CONTENT_LENGTH {
                    rendered.headers_mut().append(name.clone(), value.clone());
                }
            }

            Ok(ServiceResponse::new(http_req, rendered).map_into_right_body())
        })
    }
}

/// Record a request failure at the level matching its status
pub fn log_error(request_id: &str, err: &Error) {
    let status = err.as_response_error().status_code();
    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            status = %status,
            "An error occurred while processing your request: {}",
            err
        );
    } else {
        tracing::warn!(request_id = %request_id, status = %status, "Request rejected: {}", err);
    }
}

/// Render malformed JSON bodies through `AppError`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::validation(err.to_string()).into()
}

/// Render malformed query strings through `AppError`
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    AppError::validation(err.to_string()).into()
}
