use std::ops::Deref;

use serde::Serialize;

use super::entities::StudentArchive;

#[derive(Debug, Clone, Serialize)]
pub struct StudentArchiveWithRelations {
    #[serde(flatten)]
    pub archive: StudentArchive,
}

impl From<StudentArchive> for StudentArchiveWithRelations {
    fn from(archive: StudentArchive) -> Self {
        Self { archive }
    }
}

impl Deref for StudentArchiveWithRelations {
    type Target = StudentArchive;

    fn deref(&self) -> &Self::Target {
        &self.archive
    }
}
