//! TrainModelHandler - upload training data, stream the artifact to disk,
//! record model metadata.
//!
//! The engine streams the trained model back in the training response
//! body. That body is duplexed: chunks go to an artifact file under the
//! bot's directory while the response status decides the caller's
//! acknowledgement. The acknowledgement is emitted as soon as the status
//! is known; it never waits on the disk stream or the metadata insert,
//! which resolve independently on a spawned task.

use chrono::Utc;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{artifact_file_name, ModelRecord};
use crate::ports::{ByteStream, DialogueEngine, EngineError, ModelStore};

/// Command to train a model for one bot.
#[derive(Debug, Clone)]
pub struct TrainModelCommand {
    pub bot_name: String,
    pub comment: Option<String>,
    pub bot_id: Option<String>,
    /// Training data forwarded opaquely to the engine.
    pub payload: String,
}

/// Acknowledgement returned once the engine reports training success.
///
/// The artifact may still be streaming to disk when this is produced.
#[derive(Debug, Clone)]
pub struct TrainModelAck {
    pub model_name: String,
    pub local_path: PathBuf,
}

/// Error type for training attempts.
#[derive(Debug, Error)]
pub enum TrainModelError {
    #[error("artifact directory could not be created: {0}")]
    Filesystem(String),

    #[error("training call failed: {0}")]
    Engine(#[from] EngineError),

    #[error("training rejected by engine ({status}): {body}")]
    TrainingFailed { status: u16, body: String },
}

/// Orchestrates one training attempt.
///
/// Independent bots train fully independently, and concurrent trainings
/// for the same bot are permitted: each attempt gets its own
/// timestamp-keyed artifact and, on success, its own model row. No mutual
/// exclusion is enforced.
pub struct TrainModelHandler {
    engine: Arc<dyn DialogueEngine>,
    models: Arc<dyn ModelStore>,
    /// Root of the artifact tree; one subdirectory per bot, created lazily.
    data_dir: PathBuf,
}

impl TrainModelHandler {
    pub fn new(
        engine: Arc<dyn DialogueEngine>,
        models: Arc<dyn ModelStore>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            models,
            data_dir: data_dir.into(),
        }
    }

    pub async fn handle(&self, cmd: TrainModelCommand) -> Result<TrainModelAck, TrainModelError> {
        let bot_dir = self.data_dir.join(&cmd.bot_name);
        fs::create_dir_all(&bot_dir)
            .await
            .map_err(|e| TrainModelError::Filesystem(format!("{}: {}", bot_dir.display(), e)))?;

        let model_name = artifact_file_name(Utc::now());
        let artifact_path = bot_dir.join(&model_name);

        tracing::info!(bot = %cmd.bot_name, artifact = %artifact_path.display(), "training request");

        let reply = self.engine.train(cmd.payload).await?;
        let status = reply.status;

        if !reply.is_success() {
            // The engine streams its error body too; keep feeding the
            // artifact path (the partial file is not cleaned up) while
            // collecting the body to echo back.
            let body = drain_to_file(reply.body, &artifact_path).await;
            tracing::error!(bot = %cmd.bot_name, status, "training rejected by engine");
            return Err(TrainModelError::TrainingFailed { status, body });
        }

        // Status is known good: acknowledge now, finish the artifact and
        // the metadata insert in the background.
        let server_filename = reply.server_filename;
        let models = self.models.clone();
        let record_path = artifact_path.clone();
        let record_name = model_name.clone();
        let comment = cmd.comment.clone();
        let bot_id = cmd.bot_id.clone();
        let body = reply.body;

        tokio::spawn(async move {
            if !stream_to_file(body, &record_path).await {
                return;
            }

            let server_path = match server_filename {
                Some(name) => name,
                None => {
                    // Stream finished but the engine assigned no filename;
                    // the attempt leaves no metadata behind.
                    tracing::warn!(
                        artifact = %record_path.display(),
                        "training response carried no filename header, skipping model record"
                    );
                    return;
                }
            };

            let record = ModelRecord {
                model_name: record_name,
                comment,
                bot_id,
                local_path: record_path.display().to_string(),
                server_path,
                server_response: status.to_string(),
            };

            match models.insert(&record).await {
                Ok(()) => {
                    tracing::info!(model = %record.model_name, "model record saved")
                }
                Err(e) => tracing::error!(model = %record.model_name, error = %e, "model record insert failed"),
            }
        });

        Ok(TrainModelAck {
            model_name,
            local_path: artifact_path,
        })
    }
}

/// Write the stream to `path`, returning whether it finished cleanly.
/// Failures are logged; the partially written file is left in place.
async fn stream_to_file(mut body: ByteStream, path: &Path) -> bool {
    let mut file = match fs::File::create(path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(artifact = %path.display(), error = %e, "artifact file create failed");
            return false;
        }
    };

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::error!(artifact = %path.display(), error = %e, "artifact stream aborted");
                return false;
            }
        };
        if let Err(e) = file.write_all(&chunk).await {
            tracing::error!(artifact = %path.display(), error = %e, "artifact write failed");
            return false;
        }
    }

    if let Err(e) = file.flush().await {
        tracing::error!(artifact = %path.display(), error = %e, "artifact flush failed");
        return false;
    }
    true
}

/// Drain an error body, teeing it to `path` best-effort, and return it as
/// text for the caller's failure response.
async fn drain_to_file(mut body: ByteStream, path: &Path) -> String {
    let mut collected = Vec::new();
    let mut file = fs::File::create(path).await.ok();

    while let Some(Ok(chunk)) = body.next().await {
        if let Some(file) = file.as_mut() {
            // Best-effort mirror of the original's always-attached pipe.
            let _ = file.write_all(&chunk).await;
        }
        collected.extend_from_slice(&chunk);
    }

    String::from_utf8_lossy(&collected).into_owned()
}
