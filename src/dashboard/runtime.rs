use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::dashboard::{Dashboard, DashboardConfig};
use crate::store::feed::ChangeFeed;
use crate::store::StoreWrapper;
use crate::types::{self, DashboardView, QuizKey};
use crate::util;

/// The two collections that are watched.
#[derive(Debug, Clone, Copy)]
enum Collection {
    Schedule,
    Quizzes,
}

struct Shared {
    store: Arc<StoreWrapper>,
    uid: String,
    state: Mutex<Dashboard>,
    view_tx: watch::Sender<DashboardView>,
    handle: Handle,
}

/// The background work behind a live dashboard: the clock, the once-a-minute re-check,
/// and the change feeds for the schedule and quizzes.
///
/// All work stops when [`stop`] is called or the runtime is dropped. Quiz deletions that
/// are already in flight are left to finish.
///
/// [`stop`]: DashboardRuntime::stop
pub struct DashboardRuntime {
    shared: Arc<Shared>,
    clock_rx: watch::Receiver<String>,
    view_rx: watch::Receiver<DashboardView>,
    tasks: Vec<JoinHandle<()>>,
    stopped: bool,
}

impl DashboardRuntime {
    /// Starts the dashboard for a user.
    ///
    /// # Parameters
    /// - `store`: The store wrapper.
    /// - `uid`: The ID of the signed-in user.
    /// - `config`: The settings.
    ///
    /// # Returns
    /// The running dashboard.
    ///
    /// # Panics
    /// If called outside of a tokio runtime. Later calls, like [`refresh_now`], can be
    /// made from anywhere.
    ///
    /// [`refresh_now`]: DashboardRuntime::refresh_now
    pub fn start(store: Arc<StoreWrapper>, uid: impl Into<String>, config: DashboardConfig) -> Self {
        let (clock_tx, clock_rx) = watch::channel(String::new());
        let (view_tx, view_rx) = watch::channel(DashboardView::default());
        let shared = Arc::new(Shared {
            store,
            uid: uid.into(),
            state: Mutex::new(Dashboard::new()),
            view_tx,
            handle: Handle::current(),
        });

        info!("Starting dashboard for {}", shared.uid);
        let handle = &shared.handle;
        let tasks = vec![
            handle.spawn(run_clock(clock_tx, config.clone())),
            handle.spawn(run_logic(shared.clone(), config.clone())),
            handle.spawn(run_feed(shared.clone(), Collection::Schedule, config.clone())),
            handle.spawn(run_feed(shared.clone(), Collection::Quizzes, config)),
        ];

        Self {
            shared,
            clock_rx,
            view_rx,
            tasks,
            stopped: false,
        }
    }

    /// A receiver for the clock text, which changes every clock tick.
    pub fn clock(&self) -> watch::Receiver<String> {
        self.clock_rx.clone()
    }

    /// A receiver for the dashboard view, which changes whenever the courses or quizzes
    /// change and every logic tick.
    pub fn view(&self) -> watch::Receiver<DashboardView> {
        self.view_rx.clone()
    }

    /// The latest view.
    pub fn current_view(&self) -> DashboardView {
        self.view_rx.borrow().clone()
    }

    /// Recomputes the view right away, e.g. after the user added or removed something.
    pub fn refresh_now(&self) {
        recompute(&self.shared);
    }

    /// Whether any background task is still alive. After [`stop`], this turns `false`
    /// once the tasks have actually been cancelled, which may take a moment.
    ///
    /// [`stop`]: DashboardRuntime::stop
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_finished())
    }

    /// Stops all background work. Calling this more than once does nothing.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }

        self.stopped = true;
        for task in &self.tasks {
            task.abort();
        }

        info!("Stopped dashboard for {}", self.shared.uid);
    }
}

impl Drop for DashboardRuntime {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Derives the view from the latest snapshots, publishes it, and sends off any quiz
/// deletions.
fn recompute(shared: &Arc<Shared>) {
    let now = Local::now().naive_local();
    let refresh = shared.state.lock().refresh(&now);
    for key in refresh.to_delete {
        spawn_delete(shared.clone(), key);
    }

    shared.view_tx.send_replace(refresh.view);
}

fn spawn_delete(shared: Arc<Shared>, key: QuizKey) {
    let handle = shared.handle.clone();
    handle.spawn(async move {
        debug!("Removing expired quiz {}", key.quiz_id);
        let res = shared
            .store
            .req(&shared.uid)
            .parsed()
            .delete_quiz(&key.subject_id, &key.quiz_id)
            .await;

        if let Err(e) = res {
            warn!("Couldn't remove expired quiz {}: {e}", key.quiz_id);
            shared.state.lock().deletion_failed(&key);
        }
    });
}

async fn run_clock(clock_tx: watch::Sender<String>, config: DashboardConfig) {
    let mut interval = time::interval(config.clock_tick());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let now = Local::now().time();
        clock_tx.send_replace(util::format_clock(&now, config.use_24_hour_clock));
    }
}

async fn run_logic(shared: Arc<Shared>, config: DashboardConfig) {
    let mut interval = time::interval(config.logic_tick());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        recompute(&shared);
    }
}

/// Keeps a change feed open for a collection, re-fetching the collection after each
/// change. If the feed can't be opened or ends, it is reopened after a delay.
async fn run_feed(shared: Arc<Shared>, collection: Collection, config: DashboardConfig) {
    loop {
        match open_feed(&shared, collection).await {
            Ok(mut feed) => loop {
                match feed.next_change().await {
                    Ok(Some(change)) => {
                        debug!("{collection:?} changed at {}", change.path);
                        if let Err(e) = reload(&shared, collection).await {
                            warn!("Couldn't reload {collection:?}: {e}");
                        }
                    }
                    Ok(None) => {
                        debug!("{collection:?} change feed ended");
                        break;
                    }
                    Err(e) => {
                        warn!("{collection:?} change feed failed: {e}");
                        break;
                    }
                }
            },
            Err(e) => warn!("Couldn't subscribe to {collection:?}: {e}"),
        }

        time::sleep(config.feed_retry_delay()).await;
    }
}

async fn open_feed(shared: &Shared, collection: Collection) -> types::Result<ChangeFeed> {
    let req = shared.store.req(&shared.uid).parsed();
    match collection {
        Collection::Schedule => req.listen_schedule().await,
        Collection::Quizzes => req.listen_quizzes().await,
    }
}

/// Fetches the full collection and recomputes the view.
async fn reload(shared: &Arc<Shared>, collection: Collection) -> types::Result<()> {
    let req = shared.store.req(&shared.uid).parsed();
    match collection {
        Collection::Schedule => {
            let courses = req.get_courses().await?;
            shared.state.lock().set_courses(courses);
        }
        Collection::Quizzes => {
            let quizzes = req.get_quizzes().await?;
            shared.state.lock().set_quizzes(quizzes);
        }
    }

    recompute(shared);
    Ok(())
}
