//! Shared test doubles: a recording chat session and a store that can fail

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;

use guild_router::application::errors::{BotError, StorageError};
use guild_router::domain::entities::{Member, Message, Role};
use guild_router::domain::traits::{BotInfo, ChatClient, KeyValueStore, Record};
use guild_router::infrastructure::storage::MemoryStore;

pub const BOT_ID: &str = "bot";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn message(author: &str, group: &str, content: &str) -> Message {
    Message::new(author, "chan", group, content).with_platform("test")
}

/// Chat session that records every outgoing message
#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<(String, String)>>,
    cached_members: HashMap<(String, String), Member>,
    remote_members: HashMap<(String, String), Member>,
    cached_roles: HashMap<(String, String), Role>,
    remote_roles: HashMap<(String, String), Role>,
    pub member_fetches: AtomicUsize,
    pub role_fetches: AtomicUsize,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cached_member(mut self, member: Member) -> Self {
        self.cached_members
            .insert((member.group_id.clone(), member.user_id.clone()), member);
        self
    }

    pub fn with_remote_member(mut self, member: Member) -> Self {
        self.remote_members
            .insert((member.group_id.clone(), member.user_id.clone()), member);
        self
    }

    pub fn with_cached_role(mut self, group: &str, role: Role) -> Self {
        self.cached_roles.insert((group.to_string(), role.id.clone()), role);
        self
    }

    pub fn with_remote_role(mut self, group: &str, role: Role) -> Self {
        self.remote_roles.insert((group.to_string(), role.id.clone()), role);
        self
    }

    /// Texts sent so far, in order
    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl ChatClient for RecordingClient {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }

    fn cached_member(&self, group_id: &str, user_id: &str) -> Option<Member> {
        self.cached_members
            .get(&(group_id.to_string(), user_id.to_string()))
            .cloned()
    }

    async fn fetch_member(&self, group_id: &str, user_id: &str) -> Result<Member, BotError> {
        self.member_fetches.fetch_add(1, Ordering::SeqCst);
        self.remote_members
            .get(&(group_id.to_string(), user_id.to_string()))
            .cloned()
            .ok_or_else(|| BotError::Network("HTTP 404 Not Found".to_string()))
    }

    fn cached_role(&self, group_id: &str, role_id: &str) -> Option<Role> {
        self.cached_roles
            .get(&(group_id.to_string(), role_id.to_string()))
            .cloned()
    }

    async fn fetch_role(&self, group_id: &str, role_id: &str) -> Result<Role, BotError> {
        self.role_fetches.fetch_add(1, Ordering::SeqCst);
        self.remote_roles
            .get(&(group_id.to_string(), role_id.to_string()))
            .cloned()
            .ok_or_else(|| BotError::Network("HTTP 404 Not Found".to_string()))
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo::new(BOT_ID, "test-bot")
    }
}

/// Memory store whose reads or writes can be switched off
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn read_all(&self, collection: &str) -> Result<Vec<Record>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read refused".to_string()));
        }
        self.inner.read_all(collection).await
    }

    async fn read(&self, collection: &str, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(collection, key).await
    }

    async fn write(&self, collection: &str, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("write refused".to_string()));
        }
        self.inner.write(collection, key, value).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StorageError> {
        self.inner.delete(collection, key).await
    }
}
