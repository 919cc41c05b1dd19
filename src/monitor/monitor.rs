use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::error::MonitorError;
use crate::catalog::Catalog;
use crate::config::{Config, ScreeningConfig};
use crate::conjunction::{
    detect_immediate_threats, next_close_approaches, predict_future_collisions, AlertKind,
    ConjunctionAlert,
};
use crate::object::{NextCloseApproach, RiskLevel};

const MIN_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PassKind {
    Immediate,
    Prediction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MonitorMode {
    Idle,
    Running { start: DateTime<Utc> },
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatus {
    pub mode: MonitorMode,
    pub immediate_passes: u64,
    pub prediction_passes: u64,
    pub last_pass: Option<DateTime<Utc>>,
    /// Retained alerts, oldest first.
    pub alerts: Vec<ConjunctionAlert>,
    pub next_approaches: HashMap<String, NextCloseApproach>,
}

#[derive(Debug)]
struct Shared {
    status: MonitorStatus,
    seen: HashSet<String>,
    order: VecDeque<String>,
}

impl Shared {
    fn new() -> Self {
        Self {
            status: MonitorStatus {
                mode: MonitorMode::Idle,
                immediate_passes: 0,
                prediction_passes: 0,
                last_pass: None,
                alerts: Vec::new(),
                next_approaches: HashMap::new(),
            },
            seen: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    /// Adds alerts not reported yet and returns them.
    ///
    /// Predicted alerts are keyed by id. Immediate alert ids carry the pass
    /// time, so they are keyed by (target, debris) instead: a pair already
    /// retained has its alert replaced with the latest one and is not
    /// reported again. At most `max_alerts` are retained; evicted keys may
    /// be reported again.
    fn merge(&mut self, alerts: Vec<ConjunctionAlert>, max_alerts: usize) -> Vec<ConjunctionAlert> {
        let mut fresh = Vec::new();
        for alert in alerts {
            let key = dedup_key(&alert);
            if self.seen.contains(&key) {
                if alert.kind == AlertKind::Immediate {
                    if let Some(index) = self.order.iter().position(|k| *k == key) {
                        self.status.alerts[index] = alert;
                    }
                }
                continue;
            }
            self.seen.insert(key.clone());
            self.order.push_back(key);
            self.status.alerts.push(alert.clone());
            fresh.push(alert);
        }

        let excess = self.status.alerts.len().saturating_sub(max_alerts);
        if excess > 0 {
            self.status.alerts.drain(..excess);
            for key in self.order.drain(..excess) {
                self.seen.remove(&key);
            }
        }
        fresh
    }
}

fn dedup_key(alert: &ConjunctionAlert) -> String {
    match alert.kind {
        AlertKind::Immediate => format!("{}/{}", alert.target_id, alert.debris_id),
        AlertKind::Predicted => alert.id.clone(),
    }
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<Result<(), MonitorError>>,
}

/// Periodically screens a catalog in the background.
pub struct Monitor {
    config: Config,
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl Monitor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            shared: Arc::new(StdMutex::new(Shared::new())),
            worker: None,
        }
    }

    pub fn status(&self) -> MonitorStatus {
        self.shared.lock().unwrap().status.clone()
    }

    pub async fn stop(&mut self) -> Result<(), MonitorError> {
        let result = match self.worker.take() {
            Some(worker) => {
                let _ = worker.stop_tx.send(());
                worker.join.await?
            }
            None => Ok(()),
        };
        let mut locked = self.shared.lock().unwrap();
        locked.status.mode = MonitorMode::Idle;
        result
    }

    pub async fn run(&mut self, catalog: Catalog) -> Result<(), MonitorError> {
        if self.worker.is_some() {
            return Err(MonitorError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let config = self.config.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        {
            let mut locked = self.shared.lock().unwrap();
            locked.status.mode = MonitorMode::Running { start: Utc::now() };
        }

        let join = tokio::spawn(async move {
            let result = run_monitor_loop(shared.clone(), config, catalog, stop_rx).await;
            let mut locked = shared.lock().unwrap();
            locked.status.mode = MonitorMode::Idle;
            result
        });

        self.worker = Some(WorkerHandle { stop_tx, join });
        log::info!("Monitor started");
        Ok(())
    }
}

async fn run_monitor_loop(
    shared: Arc<StdMutex<Shared>>,
    config: Config,
    mut catalog: Catalog,
    mut stop_rx: oneshot::Receiver<()>,
) -> Result<(), MonitorError> {
    let mut immediate = interval(config.monitor.immediate_interval.max(MIN_INTERVAL));
    let mut prediction = interval(config.monitor.prediction_interval.max(MIN_INTERVAL));
    immediate.set_missed_tick_behavior(MissedTickBehavior::Delay);
    prediction.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let kind = tokio::select! {
            _ = immediate.tick() => PassKind::Immediate,
            _ = prediction.tick() => PassKind::Prediction,
            _ = &mut stop_rx => break,
        };

        if let Err(e) = catalog.reload() {
            log::warn!("Catalog reload failed, keeping previous objects: {}", e);
        }

        let snapshot = catalog.clone();
        let screening = config.screening.clone();
        let now = Utc::now();
        let alerts =
            match tokio::task::spawn_blocking(move || screen(kind, &snapshot, &screening, now))
                .await
            {
                Ok(alerts) => alerts,
                Err(e) => {
                    log::error!("{} pass failed: {}", kind, e);
                    continue;
                }
            };

        let next = (kind == PassKind::Prediction).then(|| next_close_approaches(&alerts));
        let fresh = {
            let mut locked = shared.lock().unwrap();
            match kind {
                PassKind::Immediate => locked.status.immediate_passes += 1,
                PassKind::Prediction => locked.status.prediction_passes += 1,
            }
            locked.status.last_pass = Some(now);
            if let Some(next) = next {
                locked.status.next_approaches = next;
            }
            locked.merge(alerts, config.monitor.max_alerts)
        };

        for alert in &fresh {
            report(alert);
        }
        log::debug!("{} pass done, {} new alerts", kind, fresh.len());
    }

    log::info!("Monitor stopped");
    Ok(())
}

fn screen(
    kind: PassKind,
    catalog: &Catalog,
    screening: &ScreeningConfig,
    now: DateTime<Utc>,
) -> Vec<ConjunctionAlert> {
    match kind {
        PassKind::Immediate => detect_immediate_threats(
            catalog.debris(),
            catalog.targets(),
            screening.alert_threshold_km,
            now,
        ),
        PassKind::Prediction => predict_future_collisions(
            catalog.debris(),
            catalog.targets(),
            screening.prediction_hours(),
            now,
        ),
    }
}

fn report(alert: &ConjunctionAlert) {
    let level = match alert.risk_level {
        RiskLevel::High | RiskLevel::Critical => log::Level::Warn,
        RiskLevel::Medium | RiskLevel::Low => log::Level::Info,
    };
    log::log!(
        level,
        "{} {} alert: {} near {} at {:.2} km (p = {:.3e})",
        alert.risk_level,
        alert.kind,
        alert.debris_id,
        alert.target_id,
        alert.estimated_distance_km,
        alert.probability
    );
}
