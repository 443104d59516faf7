//! Hand-written mock services and fixtures shared by the unit tests.
//!
//! The mocks are scripted queues: tests push the responses they expect the
//! backend to give, and an exhausted queue reports a transport failure,
//! which doubles as the failure path in error-handling tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use taskpilot_core::action::{ActionKind, ProposedAction};
use taskpilot_core::error::{Result, TaskpilotError};
use taskpilot_core::guided::GuidedSnapshot;
use taskpilot_core::task::{Task, TaskDraft};
use taskpilot_core::thread::{Message, ThreadSummary};
use taskpilot_interaction::{
    ChatExchange, ChatService, ChatStatus, DEFAULT_REJECT_REASON, GuidedService, TaskService,
    ThreadState,
};
use tokio::sync::Semaphore;

// ============================================================================
// Fixtures
// ============================================================================

pub(crate) fn action(id: &str, kind: ActionKind) -> ProposedAction {
    ProposedAction::new(id, kind)
}

pub(crate) fn task(id: &str, content: &str) -> Task {
    Task::new(id, content)
}

pub(crate) fn message_pair(user: &str, assistant: &str) -> Vec<Message> {
    vec![Message::user(user), Message::assistant(assistant)]
}

pub(crate) fn exchange(
    thread_id: &str,
    messages: Vec<Message>,
    actions: Vec<ProposedAction>,
) -> ChatExchange {
    let status = if actions.is_empty() {
        ChatStatus::Ready
    } else {
        ChatStatus::WaitingForApproval
    };
    ChatExchange {
        thread_id: thread_id.to_string(),
        messages,
        actions,
        status,
    }
}

pub(crate) fn snapshot(
    session_id: &str,
    current_task: Option<&str>,
    remaining_tasks: u32,
    completed_tasks: u32,
) -> GuidedSnapshot {
    GuidedSnapshot {
        session_id: session_id.to_string(),
        current_task: current_task.map(|id| task(id, "focus task")),
        remaining_tasks,
        completed_tasks,
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(TaskpilotError::transport("no scripted response")))
}

// ============================================================================
// MockChatService
// ============================================================================

#[derive(Default)]
pub(crate) struct MockChatService {
    send_responses: Mutex<VecDeque<Result<ChatExchange>>>,
    approve_responses: Mutex<VecDeque<Result<ChatExchange>>>,
    reject_responses: Mutex<VecDeque<Result<ChatExchange>>>,
    thread_states: Mutex<HashMap<String, ThreadState>>,
    threads: Mutex<Vec<ThreadSummary>>,
    listing_fails: AtomicBool,
    send_count: AtomicUsize,
    fetch_count: AtomicUsize,
    approve_count: AtomicUsize,
    reject_count: AtomicUsize,
    list_count: AtomicUsize,
    approved_ids: Mutex<Vec<Vec<String>>>,
    reject_reasons: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockChatService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes `send_message` block until the gate receives a permit.
    pub(crate) fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn push_send(&self, response: Result<ChatExchange>) {
        self.send_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_approve(&self, response: Result<ChatExchange>) {
        self.approve_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_reject(&self, response: Result<ChatExchange>) {
        self.reject_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn insert_thread(&self, thread_id: &str, state: ThreadState) {
        self.thread_states
            .lock()
            .unwrap()
            .insert(thread_id.to_string(), state);
    }

    pub(crate) fn set_threads(&self, threads: Vec<ThreadSummary>) {
        *self.threads.lock().unwrap() = threads;
    }

    pub(crate) fn set_listing_failure(&self, fails: bool) {
        self.listing_fails.store(fails, Ordering::SeqCst);
    }

    pub(crate) fn send_calls(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub(crate) fn approve_calls(&self) -> usize {
        self.approve_count.load(Ordering::SeqCst)
    }

    pub(crate) fn reject_calls(&self) -> usize {
        self.reject_count.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    pub(crate) fn last_approved_ids(&self) -> Option<Vec<String>> {
        self.approved_ids.lock().unwrap().last().cloned()
    }

    #[allow(dead_code)]
    pub(crate) fn last_reject_reason(&self) -> Option<String> {
        self.reject_reasons.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn send_message(&self, _text: &str, _thread_id: Option<&str>) -> Result<ChatExchange> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        next(&self.send_responses)
    }

    async fn fetch_thread(&self, thread_id: &str) -> Result<ThreadState> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.thread_states
            .lock()
            .unwrap()
            .get(thread_id)
            .cloned()
            .ok_or_else(|| TaskpilotError::api(404, format!("thread {thread_id} not found")))
    }

    async fn approve(
        &self,
        _thread_id: &str,
        approved_tool_call_ids: &[String],
    ) -> Result<ChatExchange> {
        self.approve_count.fetch_add(1, Ordering::SeqCst);
        self.approved_ids
            .lock()
            .unwrap()
            .push(approved_tool_call_ids.to_vec());
        next(&self.approve_responses)
    }

    async fn reject(&self, _thread_id: &str, reason: Option<&str>) -> Result<ChatExchange> {
        self.reject_count.fetch_add(1, Ordering::SeqCst);
        self.reject_reasons
            .lock()
            .unwrap()
            .push(reason.unwrap_or(DEFAULT_REJECT_REASON).to_string());
        next(&self.reject_responses)
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        if self.listing_fails.load(Ordering::SeqCst) {
            return Err(TaskpilotError::transport("history endpoint unreachable"));
        }
        Ok(self.threads.lock().unwrap().clone())
    }
}

// ============================================================================
// MockGuidedService
// ============================================================================

#[derive(Default)]
pub(crate) struct MockGuidedService {
    start_responses: Mutex<VecDeque<Result<GuidedSnapshot>>>,
    complete_responses: Mutex<VecDeque<Result<GuidedSnapshot>>>,
    skip_responses: Mutex<VecDeque<Result<GuidedSnapshot>>>,
    start_count: AtomicUsize,
    complete_count: AtomicUsize,
    skip_count: AtomicUsize,
}

impl MockGuidedService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_start(&self, response: Result<GuidedSnapshot>) {
        self.start_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_complete(&self, response: Result<GuidedSnapshot>) {
        self.complete_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_skip(&self, response: Result<GuidedSnapshot>) {
        self.skip_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn start_calls(&self) -> usize {
        self.start_count.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.start_count.load(Ordering::SeqCst)
            + self.complete_count.load(Ordering::SeqCst)
            + self.skip_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuidedService for MockGuidedService {
    async fn start(&self, _duration_minutes: u32, _labels: &[String]) -> Result<GuidedSnapshot> {
        self.start_count.fetch_add(1, Ordering::SeqCst);
        next(&self.start_responses)
    }

    async fn complete(&self, _session_id: &str) -> Result<GuidedSnapshot> {
        self.complete_count.fetch_add(1, Ordering::SeqCst);
        next(&self.complete_responses)
    }

    async fn skip(&self, _session_id: &str) -> Result<GuidedSnapshot> {
        self.skip_count.fetch_add(1, Ordering::SeqCst);
        next(&self.skip_responses)
    }
}

// ============================================================================
// MockTaskService
// ============================================================================

#[derive(Default)]
pub(crate) struct MockTaskService {
    list_responses: Mutex<VecDeque<Result<Vec<Task>>>>,
    close_responses: Mutex<VecDeque<Result<()>>>,
    delete_responses: Mutex<VecDeque<Result<()>>>,
    create_count: AtomicUsize,
    update_count: AtomicUsize,
}

impl MockTaskService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_list(&self, response: Result<Vec<Task>>) {
        self.list_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_close(&self, response: Result<()>) {
        self.close_responses.lock().unwrap().push_back(response);
    }

    #[allow(dead_code)]
    pub(crate) fn push_delete(&self, response: Result<()>) {
        self.delete_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub(crate) fn update_calls(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskService for MockTaskService {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        next(&self.list_responses)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        self.create_count.fetch_add(1, Ordering::SeqCst);
        Ok(Task::new("created", draft.content.clone()))
    }

    async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> Result<Task> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        Ok(Task::new(task_id, draft.content.clone()))
    }

    async fn close_task(&self, _task_id: &str) -> Result<()> {
        next(&self.close_responses)
    }

    async fn delete_task(&self, _task_id: &str) -> Result<()> {
        next(&self.delete_responses)
    }
}
