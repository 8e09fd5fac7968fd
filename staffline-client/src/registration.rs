//! Employee registration form
//!
//! Collects the fixed registration field set and submits it as a multipart
//! payload. Business validation is delegated entirely to the backend; the
//! form only mirrors the original input constraints in its defaults.

use shared::client::UserEnvelope;
use shared::models::Gender;

use crate::api::BackendApi;
use crate::error::ClientResult;
use crate::transport::{MultipartBody, Transport};

/// A photo selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Registration form state. `Default` is the initial state every field
/// returns to after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub address: String,
    pub profile_photo: Option<PhotoAttachment>,
    pub email: String,
    pub gender: Option<Gender>,
    pub mobile_number: String,
    pub username: String,
    pub password: String,
    pub is_active_permission: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            profile_photo: None,
            email: String::new(),
            gender: None,
            mobile_number: String::new(),
            username: String::new(),
            password: String::new(),
            // New employees start with the permission granted.
            is_active_permission: true,
        }
    }
}

impl RegistrationForm {
    /// Builds the multipart payload. Blank optional fields are omitted
    /// entirely; the boolean flag is always sent.
    pub(crate) fn to_multipart(&self) -> MultipartBody {
        let mut form = MultipartBody::default();

        let text_fields = [
            ("name", &self.name),
            ("address", &self.address),
            ("email", &self.email),
            ("mobile_number", &self.mobile_number),
            ("username", &self.username),
            ("password", &self.password),
        ];
        for (field, value) in text_fields {
            if !value.is_empty() {
                form = form.text(field, value.clone());
            }
        }
        if let Some(gender) = self.gender {
            form = form.text("gender", gender.as_str());
        }
        form = form.text(
            "is_active_permission",
            if self.is_active_permission { "true" } else { "false" },
        );
        if let Some(photo) = &self.profile_photo {
            form = form.file(
                "profile_photo",
                photo.file_name.clone(),
                photo.content_type.clone(),
                photo.data.clone(),
            );
        }
        form
    }

    /// Submit the form.
    ///
    /// On success every field resets to its default, including the selected
    /// photo, and the backend confirmation is returned. On failure the form
    /// is left intact for retry; render the error with
    /// [`crate::ClientError::registration_failure_message`].
    pub async fn submit<T: Transport>(
        &mut self,
        api: &BackendApi<T>,
    ) -> ClientResult<UserEnvelope> {
        let envelope = api.register_employee(self).await?;
        *self = Self::default();
        Ok(envelope)
    }
}
