use crate::error::{GraderError, Result};
use crate::evaluate::Evaluator;
use crate::export::RowSink;
use crate::types::row::ResultRow;
use async_trait::async_trait;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub struct TestKeyPair {
    pub private_pem: String,
    pub public_pem: String,
}

/// One RSA key pair per test binary; generation is slow in debug builds.
pub fn key_pair() -> &'static TestKeyPair {
    static KEYS: OnceLock<TestKeyPair> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("key should generate");
        let public_key = private_key.to_public_key();
        TestKeyPair {
            private_pem: private_key
                .to_pkcs8_pem(LineEnding::LF)
                .expect("private key should encode")
                .to_string(),
            public_pem: public_key
                .to_public_key_pem(LineEnding::LF)
                .expect("public key should encode"),
        }
    })
}

/// Service-account credentials JSON pointing its token exchange at `token_uri`.
pub fn service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "grader-test",
        "client_email": "grader@grader-test.iam.gserviceaccount.com",
        "private_key": key_pair().private_pem,
        "token_uri": token_uri,
    })
    .to_string()
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should write");
}

/// Evaluator that replays canned answers in order and records every prompt.
/// Running out of answers behaves like a response without choices.
pub struct ScriptedEvaluator {
    answers: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedEvaluator {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|answer| answer.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn evaluate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().expect("prompts lock").push(prompt.to_string());
        let mut answers = self.answers.lock().expect("answers lock");
        if answers.is_empty() {
            return Err(GraderError::MalformedResponse(
                "completion response has no choices".to_string(),
            ));
        }
        Ok(answers.remove(0))
    }
}

/// Sink that keeps appended rows in memory, or rejects them when `failing`.
#[derive(Default)]
pub struct RecordingSink {
    pub failing: bool,
    rows: Mutex<Vec<ResultRow>>,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        self.rows.lock().expect("rows lock").clone()
    }
}

#[async_trait]
impl RowSink for RecordingSink {
    async fn append(&self, row: &ResultRow) -> Result<()> {
        if self.failing {
            return Err(GraderError::Export {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }
        self.rows.lock().expect("rows lock").push(row.clone());
        Ok(())
    }
}
