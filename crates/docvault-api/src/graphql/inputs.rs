//! GraphQL input objects and their conversion into service inputs.

use async_graphql::{ID, InputObject};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_entity::document::{DocumentPatch, FileAttachment};
use docvault_service::{CreateDocumentInput, LoginInput, RegisterInput};

/// Parses a GraphQL `ID` into a document/user UUID.
pub fn parse_id(id: &ID) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| AppError::validation(format!("Invalid ID: {}", id.as_str())))
}

#[derive(InputObject, Debug, Clone)]
#[graphql(name = "RegisterInput")]
pub struct RegisterInputType {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<RegisterInputType> for RegisterInput {
    fn from(input: RegisterInputType) -> Self {
        Self {
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }
}

#[derive(InputObject, Debug, Clone)]
#[graphql(name = "LoginInput")]
pub struct LoginInputType {
    pub email: String,
    pub password: String,
}

impl From<LoginInputType> for LoginInput {
    fn from(input: LoginInputType) -> Self {
        Self {
            email: input.email,
            password: input.password,
        }
    }
}

/// Document creation input. `userId` is accepted for compatibility and
/// ignored; the owner is always the caller.
#[derive(InputObject, Debug, Clone, Default)]
#[graphql(name = "CreateDocumentInput")]
pub struct CreateDocumentInputType {
    pub title: String,
    pub content: String,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub user_id: Option<ID>,
}

impl TryFrom<CreateDocumentInputType> for CreateDocumentInput {
    type Error = AppError;

    fn try_from(input: CreateDocumentInputType) -> Result<Self, Self::Error> {
        let file = match (input.file_name, input.file_path, input.file_size, input.mime_type) {
            (None, None, None, None) => None,
            (Some(file_name), Some(file_path), Some(file_size), Some(mime_type)) => {
                if file_size < 0 {
                    return Err(AppError::validation("fileSize must not be negative"));
                }
                Some(FileAttachment {
                    file_name,
                    file_path,
                    file_size,
                    mime_type,
                })
            }
            _ => {
                return Err(AppError::validation(
                    "fileName, filePath, fileSize and mimeType must be provided together",
                ));
            }
        };

        Ok(Self {
            title: input.title,
            content: input.content,
            file,
            user_id: input.user_id.and_then(|id| Uuid::parse_str(id.as_str()).ok()),
        })
    }
}

#[derive(InputObject, Debug, Clone)]
#[graphql(name = "UpdateDocumentInput")]
pub struct UpdateDocumentInputType {
    pub id: ID,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateDocumentInputType {
    /// Splits the input into the target id and the patch to apply.
    pub fn into_parts(self) -> Result<(Uuid, DocumentPatch), AppError> {
        let id = parse_id(&self.id)?;
        Ok((
            id,
            DocumentPatch {
                title: self.title,
                content: self.content,
            },
        ))
    }
}
