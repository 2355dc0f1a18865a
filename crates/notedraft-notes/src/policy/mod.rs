//! Commit bucketing policies

mod tag_line;

pub use tag_line::TagLinePolicy;

use notedraft_git::Commit;

/// Where a commit lands in the notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Bucket title
    pub bucket: String,
    /// Bullet text
    pub text: String,
}

impl Placement {
    pub fn new(bucket: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            text: text.into(),
        }
    }
}

/// Trait for commit bucketing conventions
pub trait BucketPolicy: Send + Sync {
    /// Place a commit into zero or more buckets
    fn classify(&self, commit: &Commit) -> Vec<Placement>;

    /// Bucket titles in rendering order
    fn bucket_order(&self) -> Vec<String>;
}
