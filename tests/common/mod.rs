//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use diffscribe::LlmClient;
use diffscribe::LlmError;

type Responder = Box<dyn Fn(&str, usize) -> String + Send + Sync>;

/// Deterministic LLM double: one token per character, answers from a closure.
///
/// The responder receives the prompt and the zero-based index of the call.
pub struct FakeLlm {
    responder: Responder,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn new(responder: impl Fn(&str, usize) -> String + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt sent so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        let mut prompts = self.prompts.lock().unwrap();
        let answer = (self.responder)(prompt, prompts.len());
        prompts.push(prompt.to_string());
        Ok(answer)
    }

    fn get_num_tokens(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// One unified-diff file section of exactly `len` characters.
pub fn file_section(name: &str, len: usize) -> String {
    let header = format!("diff --git a/{name} b/{name}\n");
    let body_len = len
        .checked_sub(header.len() + 2)
        .expect("section too short for its header");
    format!("{header}+{}\n", "x".repeat(body_len))
}

/// A diff with one section of `len` characters per file `f0..f{count-1}`.
pub fn diff_of(count: usize, len: usize) -> String {
    (0..count).map(|i| file_section(&format!("f{i}"), len)).collect()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file into the working tree without staging it.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Write a file and add it to the index.
    pub fn stage(&self, name: &str, content: &str) {
        self.write(name, content);
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }
}
