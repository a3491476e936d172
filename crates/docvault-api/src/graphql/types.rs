//! GraphQL output types.

use async_graphql::{Enum, ID, SimpleObject};
use chrono::{DateTime, Utc};

use docvault_entity::document::Document;
use docvault_entity::user::{User, UserRole};
use docvault_service::AuthPayload;

/// Account role as exposed over GraphQL.
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "Role")]
pub enum RoleType {
    Admin,
    User,
}

impl From<UserRole> for RoleType {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::User => Self::User,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "User")]
pub struct UserType {
    pub id: ID,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserType {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.into(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A document; file fields are null for plain text documents.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Document")]
pub struct DocumentType {
    pub id: ID,
    pub title: String,
    pub content: String,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub user_id: ID,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentType {
    fn from(doc: Document) -> Self {
        let (file_name, file_path, file_size, mime_type) = match doc.file {
            Some(f) => (
                Some(f.file_name),
                Some(f.file_path),
                Some(f.file_size),
                Some(f.mime_type),
            ),
            None => (None, None, None, None),
        };
        Self {
            id: ID(doc.id.to_string()),
            title: doc.title,
            content: doc.content,
            file_name,
            file_path,
            file_size,
            mime_type,
            user_id: ID(doc.user_id.to_string()),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "AuthResponse")]
pub struct AuthResponseType {
    pub access_token: String,
    pub user: UserType,
}

impl From<AuthPayload> for AuthResponseType {
    fn from(payload: AuthPayload) -> Self {
        Self {
            access_token: payload.access_token,
            user: payload.user.into(),
        }
    }
}
