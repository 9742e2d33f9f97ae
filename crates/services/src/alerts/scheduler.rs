use std::sync::Arc;
use std::time::Duration;

use bson::{oid::ObjectId, DateTime};
use dashmap::DashMap;
use fluxo_db::models::NotificationKind;
use mongodb::Database;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dao::{ActivityDao, DaoResult, NotificationDao, SettingsDao};

use super::sink::AlertSink;

/// Whether an activity scheduled at `scheduled` falls inside the forward
/// alert window `[0, window_minutes]` relative to `now`. The boundary is
/// inclusive; anything already in the past never fires.
pub fn is_due(scheduled: DateTime, now: DateTime, window_minutes: i64) -> bool {
    let diff_ms = scheduled.timestamp_millis() - now.timestamp_millis();
    let minutes = diff_ms.div_euclid(60_000);
    minutes >= 0 && minutes <= window_minutes
}

/// Per-session polling scheduler for activity reminders.
///
/// One timer per active user session: `start` cancels any previous timer
/// for that user before spawning, `stop` aborts it. Each session task
/// scans sequentially, so a slow scan never overlaps the next tick.
pub struct AlertScheduler {
    activities: ActivityDao,
    notifications: NotificationDao,
    settings: SettingsDao,
    sink: Arc<dyn AlertSink>,
    poll_interval: Duration,
    sessions: DashMap<ObjectId, JoinHandle<()>>,
}

impl AlertScheduler {
    pub fn new(db: &Database, sink: Arc<dyn AlertSink>, poll_interval: Duration) -> Self {
        Self {
            activities: ActivityDao::new(db),
            notifications: NotificationDao::new(db),
            settings: SettingsDao::new(db),
            sink,
            poll_interval,
            sessions: DashMap::new(),
        }
    }

    /// Starts a session timer: one scan immediately, then one per tick.
    pub fn start(self: &Arc<Self>, user_id: ObjectId) {
        self.stop(user_id);

        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(this.poll_interval);
            loop {
                // First tick completes immediately.
                ticker.tick().await;
                match this.scan(user_id).await {
                    Ok(fired) if fired > 0 => {
                        debug!(%user_id, fired, "Activity scan fired alerts")
                    }
                    Ok(_) => {}
                    Err(error) => warn!(%user_id, %error, "Activity scan failed"),
                }
            }
        });

        self.sessions.insert(user_id, handle);
        info!(%user_id, "Alert scheduler session started");
    }

    /// Aborts the session task; a scan already in flight is cancelled at
    /// its next await point, so an activity whose notification was stored
    /// but not yet marked may alert once more on the next session.
    pub fn stop(&self, user_id: ObjectId) {
        if let Some((_, handle)) = self.sessions.remove(&user_id) {
            handle.abort();
            info!(%user_id, "Alert scheduler session stopped");
        }
    }

    pub fn is_running(&self, user_id: ObjectId) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// A single pass over the user's open activities. Returns how many
    /// alerts fired. Exposed so the scan is testable without the timer.
    pub async fn scan(&self, user_id: ObjectId) -> DaoResult<usize> {
        let settings = self.settings.get(user_id).await?;
        if !settings.notifications_enabled {
            return Ok(0);
        }

        let pending = self.activities.pending_alerts(user_id).await?;
        let now = DateTime::now();
        let mut fired = 0;

        for activity in pending {
            if !is_due(activity.date, now, settings.activity_alert_minutes) {
                continue;
            }

            let when = activity.date.to_chrono().format("%H:%M").to_string();
            self.sink
                .alert(
                    user_id,
                    &format!("Atividade Próxima: {}", activity.title),
                    &format!("Sua atividade está agendada para {when}."),
                )
                .await;
            self.notifications
                .create(
                    user_id,
                    format!("Lembrete: {}", activity.title),
                    format!("Atividade agendada para {when}"),
                    NotificationKind::Activity,
                )
                .await?;
            if let Some(id) = activity.id {
                self.activities.mark_notified(id).await?;
            }
            fired += 1;
        }

        Ok(fired)
    }
}
