//! Animal, story, content block and media constraint violation handlers.

use paws_postgres::types::{
    AnimalConstraints, ContentBlockConstraints, MediaConstraints, VolunteerStoryConstraints,
};

use crate::handler::{Error, ErrorKind};

impl From<AnimalConstraints> for Error<'static> {
    fn from(c: AnimalConstraints) -> Self {
        let error = match c {
            AnimalConstraints::NameNotEmpty => {
                ErrorKind::BadRequest.with_message("Animal name cannot be empty")
            }
            AnimalConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("animal")
    }
}

impl From<VolunteerStoryConstraints> for Error<'static> {
    fn from(c: VolunteerStoryConstraints) -> Self {
        let error = match c {
            VolunteerStoryConstraints::SlugFormat => ErrorKind::BadRequest
                .with_message("Slug may only contain lowercase letters, digits and hyphens"),
            VolunteerStoryConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
            VolunteerStoryConstraints::SlugUnique => {
                ErrorKind::Conflict.with_message("A story with this slug already exists")
            }
        };

        error.with_resource("volunteer_story")
    }
}

impl From<ContentBlockConstraints> for Error<'static> {
    fn from(c: ContentBlockConstraints) -> Self {
        let error = match c {
            ContentBlockConstraints::BlockTypeNotEmpty => {
                ErrorKind::BadRequest.with_message("Block type cannot be empty")
            }
            ContentBlockConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("content_block")
    }
}

impl From<MediaConstraints> for Error<'static> {
    fn from(c: MediaConstraints) -> Self {
        let error = match c {
            MediaConstraints::SizeBytesNonNegative => {
                ErrorKind::BadRequest.with_message("File size cannot be negative")
            }
            MediaConstraints::DeletedAfterCreated => ErrorKind::InternalServerError.into_error(),
            MediaConstraints::FileKeyUnique => {
                ErrorKind::Conflict.with_message("A file with this key already exists")
            }
        };

        error.with_resource("media")
    }
}
