use bytes::Bytes;
use serde::Deserialize;

/// Form body for POST /update/:id.
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub name: String,
    pub email: String,
}

/// Fields collected from the POST /add multipart body before validation.
#[derive(Debug, Default)]
pub struct AddUserFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<(String, Bytes)>,
}
