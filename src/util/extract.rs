use axum::{
    extract::{FromRequest, Request},
    Json,
};
use std::marker::PhantomData;

use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::util::error::{HandlerError, ServiceError};

/// `Json<T>` that also runs `validator` rules and reports every problem as a
/// 400 envelope instead of axum's plain-text rejections.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HandlerError::bad_request(rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| HandlerError::bad_request(format!("Validation error: {}", e)))?;
        Ok(ValidatedJson(value))
    }
}

/// Body of an update whose target must be located and authorized first.
/// Only JSON syntax is checked while extracting; decoding into `T` and the
/// `validator` rules run when the service calls [`DeferredJson::decode`].
pub struct DeferredJson<T> {
    value: Value,
    _payload: PhantomData<T>,
}

impl<T> DeferredJson<T>
where
    T: DeserializeOwned + Validate,
{
    pub fn new(value: Value) -> Self {
        DeferredJson { value, _payload: PhantomData }
    }

    pub fn decode(self) -> Result<T, ServiceError> {
        let payload: T = serde_json::from_value(self.value)
            .map_err(|e| ServiceError::InvalidInput(format!("Invalid request body: {}", e)))?;
        payload.validate()?;
        Ok(payload)
    }
}

impl<S, T> FromRequest<S> for DeferredJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| HandlerError::bad_request(rejection.body_text()))?;
        Ok(DeferredJson::new(value))
    }
}

pub fn parse_object_id(raw: &str, resource: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw)
        .map_err(|e| HandlerError::bad_request(format!("Invalid {} id '{}': {}", resource, raw, e)))
}
