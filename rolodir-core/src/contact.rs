//! Contact types.
//!
//! A [`Contact`] pairs a store-assigned id with the record fields. Drafts and
//! patches carry the field subsets used by create and update: a [`ContactDraft`]
//! is what the form submits (no id, no favorite flag), a [`ContactPatch`] is a
//! partial update where absent fields are left untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RolodirError, RolodirResult};

/// Loose `local@domain.tld` shape check, deliberately unanchored.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

/// A contact with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub favorite: bool,
}

impl Contact {
    /// Decode a stored record, attaching the collection key as the id.
    /// Returns None if the record value does not have the contact shape.
    pub fn from_record(id: &str, value: &Value) -> Option<Contact> {
        let record: ContactRecord = serde_json::from_value(value.clone()).ok()?;
        Some(Contact {
            id: id.to_string(),
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            avatar: record.avatar,
            favorite: record.favorite,
        })
    }

    /// Display name as rendered in listings and search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The record shape persisted in the store (everything except the id, which
/// is the record's collection key).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

/// Fields the contact form submits on creation.
///
/// The store assigns the id and the initial `favorite = false`; validation of
/// the field contents is the form layer's job via [`ContactDraft::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ContactDraft {
    /// Form-layer field checks: non-empty names and phone, email shape.
    ///
    /// The store itself accepts whatever it is given; callers that front a
    /// user-facing form run this before submitting.
    pub fn validate(&self) -> RolodirResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(validation("firstName", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            return Err(validation("lastName", "Last name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(validation("email", "Email is required"));
        }
        if !EMAIL_SHAPE.is_match(&self.email) {
            return Err(validation("email", "Invalid email format"));
        }
        if self.phone.trim().is_empty() {
            return Err(validation("phone", "Phone is required"));
        }
        Ok(())
    }

    pub(crate) fn into_record(self) -> ContactRecord {
        ContactRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            avatar: self.avatar,
            favorite: false,
        }
    }
}

fn validation(field: &'static str, reason: &str) -> RolodirError {
    RolodirError::Validation {
        field,
        reason: reason.to_string(),
    }
}

/// A partial contact update. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.avatar.is_none()
            && self.favorite.is_none()
    }

    /// The merge map sent to the record store.
    pub(crate) fn to_fields(&self) -> RolodirResult<serde_json::Map<String, Value>> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Ok(serde_json::Map::new()),
            Err(e) => Err(RolodirError::Serialization(e.to_string())),
        }
    }
}
