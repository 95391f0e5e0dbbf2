use crate::core::config::SecureHeadersConfiguration;
use crate::middleware::engine::HeaderPlan;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web::Data,
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::{rc::Rc, sync::Arc};

#[derive(Clone)]
pub struct SecureHeadersMiddleware {
    config: Option<Arc<SecureHeadersConfiguration>>,
}

impl SecureHeadersMiddleware {
    #[inline]
    pub fn new(config: SecureHeadersConfiguration) -> Self {
        Self::from_arc(Arc::new(config))
    }

    #[inline]
    pub fn from_arc(config: Arc<SecureHeadersConfiguration>) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Looks the configuration up in app data on every request; see
    /// [`configure_secure_headers`].
    #[inline]
    pub fn from_app_data() -> Self {
        Self { config: None }
    }

    #[inline]
    pub fn config(&self) -> Option<Arc<SecureHeadersConfiguration>> {
        self.config.clone()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecureHeadersMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SecureHeadersMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecureHeadersMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct SecureHeadersMiddlewareService<S> {
    service: Rc<S>,
    config: Option<Arc<SecureHeadersConfiguration>>,
}

impl<S, B> Service<ServiceRequest> for SecureHeadersMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone().or_else(|| {
            req.app_data::<Data<SecureHeadersConfiguration>>()
                .map(|data| data.clone().into_inner())
        });

        let plan = match HeaderPlan::for_request(config.as_deref(), req.path()) {
            Ok(plan) => plan,
            Err(err) => {
                if err.is_request_fatal() {
                    log::error!("rejecting {} {}: {}", req.method(), req.path(), err);
                } else {
                    log::warn!("{} {}: {}", req.method(), req.path(), err);
                }
                return Box::pin(ready(Err(err.into())));
            }
        };

        let service = self.service.clone();

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if let Some(plan) = plan {
                plan.apply_to(res.headers_mut());
            }

            Ok(res)
        })
    }
}

#[inline]
pub fn secure_headers(config: SecureHeadersConfiguration) -> SecureHeadersMiddleware {
    SecureHeadersMiddleware::new(config)
}

/// Registers the configuration as app data for [`SecureHeadersMiddleware::from_app_data`].
pub fn configure_secure_headers(
    config: SecureHeadersConfiguration,
) -> impl FnOnce(&mut actix_web::web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(Data::new(config));
    }
}
