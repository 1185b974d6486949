// ============================================================
// Layer 5 — One Training Pass
// ============================================================
// A single sweep over the window dataset using Burn's
// DataLoader and whichever optimizer the predictor owns.
//
// Per batch:
//   forward → cross-entropy → backward → optimizer step
//
// The DataLoader is built without shuffling, so batches come
// out in corpus order and the final partial batch is kept.
//
// The returned loss is the sample-weighted mean over the pass,
// so a small final batch counts for no more than its size.
//
// Reference: Burn Book §5 (Custom Training Loop)
//            Kingma & Ba (2015) Adam, Hinton (2012) RMSprop

use burn::{
    backend::ndarray::NdArrayDevice,
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer},
    prelude::*,
};

use crate::data::batcher::WindowBatcher;
use crate::domain::window::WindowDataset;
use crate::domain::error::{ensure_finite, CharModelError, Result};
use crate::ml::model::NextSymbolModel;
use crate::ml::TrainBackend;

/// Train `model` for one pass over `dataset`.
/// Returns the updated model and the mean loss of the pass.
pub fn train_pass<M, O>(
    mut model:  M,
    optim:      &mut O,
    dataset:    &WindowDataset,
    batch_size: usize,
    lr:         f64,
    device:     &NdArrayDevice,
) -> Result<(M, f64)>
where
    M: AutodiffModule<TrainBackend> + NextSymbolModel<TrainBackend>,
    O: Optimizer<M, TrainBackend>,
{
    let batcher = WindowBatcher::<TrainBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .build(dataset.clone());

    let mut loss_sum = 0.0f64;
    let mut seen     = 0usize;
    let mut batches  = 0usize;

    for batch in loader.iter() {
        let batch_len = batch.labels.dims()[0];
        let loss      = model.forward_loss(batch.windows, batch.labels);

        let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
        ensure_finite([loss_val], "training")?;
        loss_sum += loss_val * batch_len as f64;
        seen     += batch_len;
        batches  += 1;

        // Backward pass + optimizer update
        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(lr, model, grads);
    }

    if seen == 0 {
        return Err(CharModelError::EmptyDataset);
    }

    let avg_loss = loss_sum / seen as f64;
    tracing::debug!("Pass done: {} batches, {} samples, loss={:.4}", batches, seen, avg_loss);
    Ok((model, avg_loss))
}
