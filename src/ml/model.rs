use burn::{
    nn::{
        loss::{MseLoss, Reduction},
        lstm::{Lstm, LstmConfig},
        Dropout, DropoutConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally; adding them again gives conflicting impls.
#[derive(Config, Debug)]
pub struct LstmForecasterConfig {
    /// Hidden size of each stacked LSTM layer, input side first.
    pub lstm_hidden: Vec<usize>,
    /// Width of the dense layer before the output unit.
    pub dense_size:  usize,
    #[config(default = 0.1)]
    pub dropout:     f64,
}

impl LstmForecasterConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LstmForecaster<B> {
        // One input feature per time step; each layer feeds the next.
        let mut d_input = 1;
        let mut lstm_layers = Vec::with_capacity(self.lstm_hidden.len());
        for &d_hidden in &self.lstm_hidden {
            lstm_layers.push(LstmConfig::new(d_input, d_hidden, true).init(device));
            d_input = d_hidden;
        }

        let dropout = DropoutConfig::new(self.dropout).init();
        let dense   = LinearConfig::new(d_input, self.dense_size).init(device);
        let output  = LinearConfig::new(self.dense_size, 1).init(device);

        LstmForecaster { lstm_layers, dropout, dense, output }
    }
}

#[derive(Module, Debug)]
pub struct LstmForecaster<B: Backend> {
    pub lstm_layers: Vec<Lstm<B>>,
    pub dropout:     Dropout,
    pub dense:       Linear<B>,
    pub output:      Linear<B>,
}

impl<B: Backend> LstmForecaster<B> {
    /// inputs: [batch, time_step, 1] → predictions: [batch, 1]
    pub fn forward(&self, inputs: Tensor<B, 3>) -> Tensor<B, 2> {
        let mut x = inputs;
        for layer in &self.lstm_layers {
            let (hidden_seq, _state) = layer.forward(x, None);
            x = hidden_seq; // [batch, time_step, d_hidden]
        }

        // Only the last time step's hidden state feeds the head.
        let [batch_size, time_step, d_hidden] = x.dims();
        let last = x
            .slice([0..batch_size, time_step - 1..time_step, 0..d_hidden])
            .reshape([batch_size, d_hidden]);

        let x = self.dropout.forward(last);
        let x = self.dense.forward(x);
        self.output.forward(x)
    }

    /// Mean squared error between predictions and targets [batch, 1].
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 3>,
        targets: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let predictions = self.forward(inputs);
        let loss = MseLoss::new().forward(predictions.clone(), targets, Reduction::Mean);
        (loss, predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_output_shape() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model: LstmForecaster<TestBackend> =
            LstmForecasterConfig::new(vec![8, 4], 3).init(&device);

        let inputs = Tensor::<TestBackend, 3>::zeros([5, 7, 1], &device);
        let out    = model.forward(inputs);
        assert_eq!(out.dims(), [5, 1]);
    }

    #[test]
    fn test_loss_is_scalar() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model: LstmForecaster<TestBackend> =
            LstmForecasterConfig::new(vec![4], 2).init(&device);

        let inputs  = Tensor::<TestBackend, 3>::ones([3, 4, 1], &device);
        let targets = Tensor::<TestBackend, 2>::zeros([3, 1], &device);
        let (loss, preds) = model.forward_loss(inputs, targets);
        assert_eq!(loss.dims(), [1]);
        assert_eq!(preds.dims(), [3, 1]);
        assert!(loss.into_scalar() >= 0.0);
    }
}
