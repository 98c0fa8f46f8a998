use bytes::Bytes;
use serde_json::Value;
use url::form_urlencoded;

use crate::Error;

/// The `Content-Type` of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// The `Content-Type` of form request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// A request body, encoded as UTF-8 on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// A JSON document.
    Json(Value),
    /// Form fields, in order. Repeated names are allowed.
    UrlEncoded(Vec<(String, String)>),
}

impl MessageBody {
    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnparsableDocument`](crate::ErrorKind::UnparsableDocument)
    /// if the value can't be represented as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, Error> {
        Ok(MessageBody::Json(serde_json::to_value(value)?))
    }

    /// Creates a form body from name/value pairs.
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MessageBody::UrlEncoded(
            pairs.into_iter().map(|(name, value)| (name.into(), value.into())).collect(),
        )
    }

    /// The `Content-Type` header value for this body.
    pub fn content_type(&self) -> &'static str {
        match self {
            MessageBody::Json(_) => JSON_CONTENT_TYPE,
            MessageBody::UrlEncoded(_) => FORM_CONTENT_TYPE,
        }
    }

    /// Serializes the body.
    pub fn encode(&self) -> Result<Bytes, Error> {
        match self {
            MessageBody::Json(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
            MessageBody::UrlEncoded(pairs) => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs.iter())
                    .finish();
                Ok(Bytes::from(encoded))
            },
        }
    }
}
