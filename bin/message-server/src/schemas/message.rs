use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::entities::Message;
use crate::schemas::{STATUS_ERROR, STATUS_SUCCESS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub content: String,
}

/// Body of `POST /api/message`.
///
/// `content` is kept as a raw JSON value so that a wrong type is reported as
/// "Content is required" rather than as a deserialization failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    #[serde(default)]
    #[schema(value_type = String, min_length = 1, max_length = 200, example = "Hello, world!")]
    pub content: Option<Value>,
}

impl CreateMessageRequest {
    /// The message text, if `content` is a non-empty string.
    pub fn into_content(self) -> Option<String> {
        match self.content {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageListResponse {
    #[schema(example = "success")]
    pub status: String,
    pub messages: Vec<MessageResponse>,
}

impl MessageListResponse {
    pub fn success(messages: Vec<MessageResponse>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_owned(),
            messages,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateMessageResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Message created successfully")]
    pub message: String,
    pub data: MessageResponse,
}

impl CreateMessageResponse {
    pub fn created(data: MessageResponse) -> Self {
        Self {
            status: STATUS_SUCCESS.to_owned(),
            message: "Message created successfully".to_owned(),
            data,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "error")]
    pub status: String,
    #[schema(example = "Content is required")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_owned(),
            message: message.into(),
        }
    }
}

impl Message {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id,
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateMessageRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn non_empty_string_content_is_accepted() {
        assert_eq!(
            request(json!({ "content": "Hello, world!" })).into_content().as_deref(),
            Some("Hello, world!")
        );
        assert_eq!(request(json!({ "content": " " })).into_content().as_deref(), Some(" "));
    }

    #[test]
    fn missing_or_falsy_content_is_rejected() {
        assert!(request(json!({})).into_content().is_none());
        assert!(request(json!({ "content": null })).into_content().is_none());
        assert!(request(json!({ "content": "" })).into_content().is_none());
    }

    #[test]
    fn non_string_content_is_rejected() {
        assert!(request(json!({ "content": 42 })).into_content().is_none());
        assert!(request(json!({ "content": true })).into_content().is_none());
        assert!(request(json!({ "content": ["a"] })).into_content().is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req = request(json!({ "content": "hi", "author": "someone" }));
        assert_eq!(req.into_content().as_deref(), Some("hi"));
    }

    #[test]
    fn message_projects_to_id_and_content() {
        let msg = Message { id: 7, content: "seven".into() };
        let value = serde_json::to_value(msg.to_response()).unwrap();
        assert_eq!(value, json!({ "id": 7, "content": "seven" }));
    }

    #[test]
    fn response_envelopes() {
        let list = serde_json::to_value(MessageListResponse::success(vec![])).unwrap();
        assert_eq!(list, json!({ "status": "success", "messages": [] }));

        let created = serde_json::to_value(CreateMessageResponse::created(MessageResponse {
            id: 1,
            content: "x".into(),
        }))
        .unwrap();
        assert_eq!(created["message"], "Message created successfully");
        assert_eq!(created["data"]["id"], 1);

        let err = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(err, json!({ "status": "error", "message": "boom" }));
    }
}
