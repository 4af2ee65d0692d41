use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tempfile::TempDir;
use waypoint_core::{Planner, PlannerBuilder, PlannerError, Result, TextGenerator};

/// Text generator answering with canned replies, in order.
pub struct CannedGenerator {
    replies: Mutex<VecDeque<String>>,
}

impl CannedGenerator {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PlannerError::collaborator("canned generator", "out of replies"))
    }
}

/// Helper function to create a test planner
#[allow(dead_code)]
pub async fn create_test_planner(replies: &[&str]) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = open_planner(&temp_dir, replies).await;
    (temp_dir, planner)
}

/// Opens a planner over the database in `temp_dir`.
pub async fn open_planner(temp_dir: &TempDir, replies: &[&str]) -> Planner {
    PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_generator(Arc::new(CannedGenerator::new(replies)))
        .build()
        .await
        .expect("Failed to create planner")
}
