// libs/mail-queue-cell/src/services/queue.rs
use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::error::MailQueueError;
use crate::models::CancellationMailJob;

/// Jobs live for 7 days before Redis drops them.
const JOB_TTL_SECONDS: i64 = 604_800;

/// Producer-side handle on the cancellation mail queue. The worker that
/// drains it and talks to the mail transport is a separate process.
#[async_trait]
pub trait MailQueue: Send + Sync {
    async fn submit(&self, job: CancellationMailJob) -> Result<(), MailQueueError>;
}

pub struct RedisMailQueue {
    pool: Pool,
}

impl RedisMailQueue {
    /// Build the pool up front. Connections are created lazily, so no
    /// live server is needed until the first submit.
    pub fn new(config: &AppConfig) -> Result<Self, MailQueueError> {
        let redis_url = config
            .redis_url
            .clone()
            .unwrap_or_else(|| "redis://localhost:6379".to_string());

        let cfg = Config::from_url(redis_url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| MailQueueError::Pool(e.to_string()))?;

        info!("Cancellation mail queue initialized");
        Ok(Self { pool })
    }

    async fn get_connection(&self) -> Result<Connection, MailQueueError> {
        self.pool
            .get()
            .await
            .map_err(|e| MailQueueError::Pool(e.to_string()))
    }
}

#[async_trait]
impl MailQueue for RedisMailQueue {
    async fn submit(&self, job: CancellationMailJob) -> Result<(), MailQueueError> {
        let mut conn = self.get_connection().await?;

        let job_data = serde_json::to_string(&job)?;

        // Store job details in a hash the worker reads back
        let job_key = format!("{}:{}", CancellationMailJob::KEY, job.job_id);
        let _: () = conn
            .hset_multiple(
                &job_key,
                &[
                    ("data", job_data.as_str()),
                    ("created_at", &job.created_at.to_rfc3339()),
                ],
            )
            .await?;

        let _: () = conn.expire(&job_key, JOB_TTL_SECONDS).await?;

        // Hand the id to the pending list
        let queue_key = format!("{}:pending", CancellationMailJob::KEY);
        let _: () = conn.lpush(&queue_key, job.job_id.to_string()).await?;

        debug!("Job {} enqueued successfully", job.job_id);
        Ok(())
    }
}

/// Test double that records submissions instead of touching Redis.
#[derive(Default)]
pub struct MemoryMailQueue {
    jobs: Mutex<Vec<CancellationMailJob>>,
}

impl MemoryMailQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submitted(&self) -> Vec<CancellationMailJob> {
        self.jobs.lock().await.clone()
    }
}

#[async_trait]
impl MailQueue for MemoryMailQueue {
    async fn submit(&self, job: CancellationMailJob) -> Result<(), MailQueueError> {
        self.jobs.lock().await.push(job);
        Ok(())
    }
}
