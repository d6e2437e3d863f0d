use crate::source::VisitorDirectory;
use frontdesk_core::{
    email_query, find_match, matches_email, matches_phone, phone_query, MatchKind, Visitor,
    VisitorId, DEFAULT_EMAIL_DEBOUNCE_MS, DEFAULT_PHONE_DEBOUNCE_MS,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

pub const DEFAULT_EMAIL_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_EMAIL_DEBOUNCE_MS);
pub const DEFAULT_PHONE_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_PHONE_DEBOUNCE_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerSettings {
    pub email_debounce: Duration,
    pub phone_debounce: Duration,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            email_debounce: DEFAULT_EMAIL_DEBOUNCE,
            phone_debounce: DEFAULT_PHONE_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExistenceSnapshot {
    pub email_exists: bool,
    pub phone_exists: bool,
    pub found_visitor: Option<Visitor>,
    pub email_checking: bool,
    pub phone_checking: bool,
}

impl ExistenceSnapshot {
    pub fn match_kind(&self) -> MatchKind {
        MatchKind::from_flags(self.email_exists, self.phone_exists)
    }

    pub fn is_checking(&self) -> bool {
        self.email_checking || self.phone_checking
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Phone,
}

impl Field {
    const fn as_str(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    fn query(self, raw: &str) -> Option<String> {
        match self {
            Field::Email => email_query(raw),
            Field::Phone => phone_query(raw),
        }
    }

    fn matches(self, candidate: &Visitor, query: &str) -> bool {
        match self {
            Field::Email => matches_email(candidate, query),
            Field::Phone => matches_phone(candidate, query),
        }
    }
}

#[derive(Debug, Default)]
struct SearchSlot {
    generation: u64,
    searchable: bool,
    task: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct State {
    snapshot: ExistenceSnapshot,
    email: SearchSlot,
    phone: SearchSlot,
}

impl State {
    fn slot_mut(&mut self, field: Field) -> &mut SearchSlot {
        match field {
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    fn set_exists(&mut self, field: Field, exists: bool) {
        match field {
            Field::Email => self.snapshot.email_exists = exists,
            Field::Phone => self.snapshot.phone_exists = exists,
        }
    }

    fn set_checking(&mut self, field: Field, checking: bool) {
        match field {
            Field::Email => self.snapshot.email_checking = checking,
            Field::Phone => self.snapshot.phone_checking = checking,
        }
    }
}

#[derive(Debug)]
struct Shared {
    state: Mutex<State>,
    updates: watch::Sender<ExistenceSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        let next = state.snapshot.clone();
        self.updates.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    fn begin(&self, field: Field, generation: u64) -> bool {
        let mut state = self.lock();
        if state.slot_mut(field).generation != generation {
            return false;
        }
        state.set_checking(field, true);
        self.publish(&state);
        true
    }

    fn finish(&self, field: Field, generation: u64, found: Option<Visitor>) -> bool {
        let mut state = self.lock();
        let slot = state.slot_mut(field);
        if slot.generation != generation {
            debug!(field = field.as_str(), generation, "discarding stale search result");
            return false;
        }
        slot.task = None;

        state.set_checking(field, false);
        state.set_exists(field, found.is_some());
        if let Some(visitor) = found {
            debug!(field = field.as_str(), visitor = %visitor.id, "existing visitor found");
            state.snapshot.found_visitor = Some(visitor);
        }
        self.publish(&state);
        true
    }
}

/// Input methods spawn tasks and must be called from within a tokio runtime.
pub struct ExistenceChecker {
    directory: Arc<dyn VisitorDirectory>,
    settings: CheckerSettings,
    editing: Option<VisitorId>,
    shared: Arc<Shared>,
}

impl ExistenceChecker {
    pub fn new(directory: Arc<dyn VisitorDirectory>, settings: CheckerSettings) -> Self {
        let (updates, _) = watch::channel(ExistenceSnapshot::default());
        Self {
            directory,
            settings,
            editing: None,
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                updates,
            }),
        }
    }

    pub fn editing(mut self, visitor_id: Option<VisitorId>) -> Self {
        self.editing = visitor_id;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ExistenceSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn snapshot(&self) -> ExistenceSnapshot {
        self.shared.lock().snapshot.clone()
    }

    pub fn set_email(&self, raw: &str) {
        self.on_input(Field::Email, raw);
    }

    pub fn set_phone(&self, raw: &str) {
        self.on_input(Field::Phone, raw);
    }

    pub async fn settle(&self) {
        loop {
            let tasks: Vec<JoinHandle<()>> = {
                let mut state = self.shared.lock();
                [state.email.task.take(), state.phone.task.take()]
                    .into_iter()
                    .flatten()
                    .collect()
            };
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                // Aborted tasks are expected when newer input superseded them.
                let _ = task.await;
            }
        }
    }

    fn on_input(&self, field: Field, raw: &str) {
        let query = field.query(raw);
        let mut state = self.shared.lock();

        let slot = state.slot_mut(field);
        slot.generation += 1;
        let generation = slot.generation;
        if let Some(task) = slot.task.take() {
            task.abort();
        }
        slot.searchable = query.is_some();

        let Some(query) = query else {
            state.set_exists(field, false);
            state.set_checking(field, false);
            if !state.email.searchable && !state.phone.searchable {
                debug!("identity fields cleared, resetting existence state");
                state.snapshot = ExistenceSnapshot::default();
            }
            self.shared.publish(&state);
            return;
        };

        let cached = state
            .snapshot
            .found_visitor
            .as_ref()
            .filter(|found| field.matches(found, &query))
            .map(|found| found.id.clone());
        if let Some(found_id) = cached {
            debug!(field = field.as_str(), visitor = %found_id, "reusing cached match");
            state.set_exists(field, true);
            state.set_checking(field, false);
            self.shared.publish(&state);
            return;
        }

        let search = PendingSearch {
            shared: Arc::clone(&self.shared),
            directory: Arc::clone(&self.directory),
            editing: self.editing.clone(),
            field,
            query,
            generation,
            delay: match field {
                Field::Email => self.settings.email_debounce,
                Field::Phone => self.settings.phone_debounce,
            },
        };
        state.slot_mut(field).task = Some(tokio::spawn(search.run()));
    }
}

impl Drop for ExistenceChecker {
    fn drop(&mut self) {
        let mut guard = self.shared.lock();
        let state = &mut *guard;
        for slot in [&mut state.email, &mut state.phone] {
            if let Some(task) = slot.task.take() {
                task.abort();
            }
        }
    }
}

struct PendingSearch {
    shared: Arc<Shared>,
    directory: Arc<dyn VisitorDirectory>,
    editing: Option<VisitorId>,
    field: Field,
    query: String,
    generation: u64,
    delay: Duration,
}

impl PendingSearch {
    async fn run(self) {
        time::sleep(self.delay).await;
        if !self.shared.begin(self.field, self.generation) {
            return;
        }

        debug!(
            field = self.field.as_str(),
            source = self.directory.source_name(),
            query = %self.query,
            "searching visitor directory"
        );
        let found = match self.directory.search(&self.query).await {
            Ok(candidates) => find_match(
                &candidates,
                |candidate| self.field.matches(candidate, &self.query),
                self.editing.as_ref(),
            )
            .cloned(),
            Err(err) => {
                warn!(field = self.field.as_str(), error = %err, "visitor search failed");
                None
            }
        };

        self.shared.finish(self.field, self.generation, found);
    }
}
