// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray),
//     with dropout disabled
//   - Validation only MONITORS: its loss is reported, never
//     back-propagated
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::WindowBatcher, dataset::WindowDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::LstmForecaster;
use crate::ml::{InferBackend, TrainBackend};

/// The trained model (ready for inference) and its loss history.
pub struct TrainingOutcome {
    pub model:   LstmForecaster<InferBackend>,
    pub history: Vec<EpochMetrics>,
}

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: WindowDataset,
    val_dataset:   WindowDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
) -> Result<TrainingOutcome> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);
    TrainBackend::seed(cfg.seed);
    train_loop(cfg, train_dataset, val_dataset, ckpt_manager, metrics, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: WindowDataset,
    val_dataset:   WindowDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
    device:        burn::backend::ndarray::NdArrayDevice,
) -> Result<TrainingOutcome> {

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: LstmForecaster<TrainBackend> = cfg.model_config().init(&device);
    tracing::info!(
        "Model ready: LSTM {:?} → dense {} → 1, dropout={}",
        cfg.lstm_hidden, cfg.dense_size, cfg.dropout
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = WindowBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    // An empty validation segment just means no monitoring this run.
    let val_loader = if val_dataset.sample_count() > 0 {
        let val_batcher = WindowBatcher::<InferBackend>::new(device.clone());
        Some(
            DataLoaderBuilder::new(val_batcher)
                .batch_size(cfg.batch_size)
                .build(val_dataset),
        )
    } else {
        tracing::warn!("Validation segment produced no windows; val_loss will be NaN");
        None
    };

    let mut history = Vec::with_capacity(cfg.epochs);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.inputs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;

        if let Some(loader) = &val_loader {
            let model_valid = model.valid();
            for batch in loader.iter() {
                let (loss, _) = model_valid.forward_loss(batch.inputs, batch.targets);
                val_loss_sum += loss.into_scalar().elem::<f64>();
                val_batches  += 1;
            }
        }

        let avg_val_loss = if val_batches > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };

        println!(
            "Epoch {:>3}/{} | train_loss={:.6} | val_loss={:.6}",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss,
        );

        let m = EpochMetrics::new(epoch, avg_train_loss, avg_val_loss);
        metrics.log(&m)?;
        history.push(m);

        ckpt_manager.save_model(&model, epoch)?;
        tracing::debug!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(TrainingOutcome { model: model.valid(), history })
}
