use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::application::{
    ChatClient, ExpireIdleSessionsUseCase, SessionRepository, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_SYSTEM_PROMPT,
};
use crate::connector::adapter::{
    ApiCredential, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, SECRETS_FILE_NAME,
};
use crate::domain::{SegmentMode, DEFAULT_GREETING};
use crate::{
    EndSessionUseCase, GetTranscriptUseCase, InMemorySessionRepository, MockChatClient,
    OpenAiChatClient, ResetSessionUseCase, SendMessageUseCase, StartSessionUseCase,
};

pub const BASE_URL_ENV: &str = "THINKCHAT_BASE_URL";
pub const MODEL_ENV: &str = "THINKCHAT_MODEL";

pub struct ContainerConfig {
    pub data_dir: String,
    pub mock_llm: bool,
    /// Completion endpoint base; falls back to `THINKCHAT_BASE_URL`, then Groq.
    pub base_url: Option<String>,
    /// Model identifier; falls back to `THINKCHAT_MODEL`, then the DeepSeek distill.
    pub model: Option<String>,
    /// Key taken from `THINKCHAT_API_KEY`; wins over the secrets file.
    pub api_key: Option<String>,
    /// JSON file holding `api_key`; defaults to `<data_dir>/secrets.json`.
    pub secrets_file: Option<String>,
    /// Show replies with inverted think markers unsplit instead of splitting them as found.
    pub strict_markers: bool,
    pub timeout_secs: u64,
    /// Web sessions idle this long are dropped.
    pub session_ttl_secs: u64,
    pub system_prompt: String,
    pub greeting: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.thinkchat".to_string(),
            mock_llm: false,
            base_url: None,
            model: None,
            api_key: None,
            secrets_file: None,
            strict_markers: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl ContainerConfig {
    pub fn secrets_path(&self) -> PathBuf {
        match &self.secrets_file {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.data_dir).join(SECRETS_FILE_NAME),
        }
    }

    pub fn segment_mode(&self) -> SegmentMode {
        if self.strict_markers {
            SegmentMode::Strict
        } else {
            SegmentMode::Lenient
        }
    }
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    session_repo: Arc<dyn SessionRepository>,
    config: ContainerConfig,
}

impl Container {
    /// Wires the real or mock chat client. A missing credential is fatal here,
    /// before any session can be started.
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let chat_client: Arc<dyn ChatClient> = if config.mock_llm {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            let credential =
                ApiCredential::resolve(config.api_key.clone(), &config.secrets_path())?;
            let base_url = config
                .base_url
                .clone()
                .or_else(|| std::env::var(BASE_URL_ENV).ok())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
            let model = config
                .model
                .clone()
                .or_else(|| std::env::var(MODEL_ENV).ok())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string());
            info!("Using model {} at {}", model, base_url);
            Arc::new(OpenAiChatClient::with_timeout(
                credential.expose(),
                model,
                base_url,
                Duration::from_secs(config.timeout_secs),
            ))
        };

        Ok(Self::with_chat_client(config, chat_client))
    }

    pub fn with_chat_client(config: ContainerConfig, chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            session_repo: Arc::new(InMemorySessionRepository::new()),
            config,
        }
    }

    pub fn start_session_use_case(&self) -> StartSessionUseCase {
        StartSessionUseCase::new(self.session_repo.clone()).with_greeting(&self.config.greeting)
    }

    pub fn send_message_use_case(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(self.session_repo.clone(), self.chat_client.clone())
            .with_system_prompt(&self.config.system_prompt)
            .with_segment_mode(self.segment_mode())
    }

    pub fn reset_session_use_case(&self) -> ResetSessionUseCase {
        ResetSessionUseCase::new(self.session_repo.clone())
    }

    pub fn transcript_use_case(&self) -> GetTranscriptUseCase {
        GetTranscriptUseCase::new(self.session_repo.clone())
    }

    pub fn end_session_use_case(&self) -> EndSessionUseCase {
        EndSessionUseCase::new(self.session_repo.clone())
    }

    pub fn expire_sessions_use_case(&self) -> ExpireIdleSessionsUseCase {
        ExpireIdleSessionsUseCase::new(self.session_repo.clone())
            .with_ttl_secs(self.config.session_ttl_secs)
    }

    pub fn session_repo(&self) -> Arc<dyn SessionRepository> {
        self.session_repo.clone()
    }

    pub fn segment_mode(&self) -> SegmentMode {
        self.config.segment_mode()
    }

    pub fn model_name(&self) -> &str {
        self.chat_client.model_name()
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }
}
