use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;

use crate::activation::{sigmoid, sigmoid_prime};
use crate::error::NnError;
use crate::loss::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::annotation::Annotation;
use crate::network::layer::Layer;

/// The cached state of one forward pass: per layer the pre-activation
/// sum `z = W·a_prev + b` and the sigmoid activation, plus the input as
/// `activations[0]`.
///
/// Returned by [`Network::forward_prop`] and consumed by
/// [`Network::back_prop`], so the forward/backward pairing is explicit
/// in the signatures instead of hidden in instance state; the network
/// itself stays reentrant.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    zs: Vec<Matrix>,
    activations: Vec<Matrix>,
}

impl ForwardPass {
    /// The final activation — the network's output column vector.
    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }
}

/// One layer's contribution to the gradient: the derivatives of the
/// cost w.r.t. that layer's weights and bias.
#[derive(Debug, Clone)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub bias: Matrix,
}

/// A prediction outcome for a single example: the true class index and
/// the class the network picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub label: usize,
    pub predicted: usize,
}

/// Feedforward classifier: an ordered stack of dense sigmoid layers.
///
/// The input layer is implicit (it carries no parameters), so a network
/// built from `n` layer sizes reports a layer number of `n + 1`.
pub struct Network {
    layers: Vec<Layer>,
    input_nodes: usize,
    output_nodes: usize,
}

impl Network {
    /// Builds a network with `inputs` input nodes and one dense layer
    /// per entry of `layer_sizes`. Every size, including `inputs`, must
    /// be at least one.
    pub fn new<R: Rng>(
        inputs: usize,
        layer_sizes: &[usize],
        rng: &mut R,
    ) -> Result<Network, NnError> {
        if layer_sizes.is_empty() {
            return Err(NnError::EmptyTopology);
        }
        if inputs < 1 {
            return Err(NnError::InvalidTopology {
                layer: 0,
                size: inputs,
            });
        }
        for (i, &size) in layer_sizes.iter().enumerate() {
            if size < 1 {
                return Err(NnError::InvalidTopology {
                    layer: i + 1,
                    size,
                });
            }
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = inputs;
        for &size in layer_sizes {
            layers.push(Layer::new(fan_in, size, rng));
            fan_in = size;
        }

        Ok(Network {
            input_nodes: inputs,
            output_nodes: fan_in,
            layers,
        })
    }

    /// Rebuilds a network from pre-trained layers, deriving the
    /// topology purely from the parameter shapes. Fails if the shape
    /// chain is inconsistent.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network, NnError> {
        if layers.is_empty() {
            return Err(NnError::InvalidModel("no layers in model".into()));
        }
        for (i, layer) in layers.iter().enumerate() {
            if !layer.weights().has_valid_backing() || !layer.bias().has_valid_backing() {
                return Err(NnError::InvalidModel(format!(
                    "layer {i} has truncated parameter data"
                )));
            }
            if layer.bias().cols() != 1 || layer.bias().rows() != layer.outputs() {
                return Err(NnError::InvalidModel(format!(
                    "layer {i} bias is {}x{}, expected {}x1",
                    layer.bias().rows(),
                    layer.bias().cols(),
                    layer.outputs()
                )));
            }
            if layer.inputs() < 1 || layer.outputs() < 1 {
                return Err(NnError::InvalidModel(format!("layer {i} has a zero dimension")));
            }
            if i > 0 && layer.inputs() != layers[i - 1].outputs() {
                return Err(NnError::InvalidModel(format!(
                    "layer {i} expects {} inputs but layer {} has {} outputs",
                    layer.inputs(),
                    i - 1,
                    layers[i - 1].outputs()
                )));
            }
        }

        Ok(Network {
            input_nodes: layers[0].inputs(),
            output_nodes: layers[layers.len() - 1].outputs(),
            layers,
        })
    }

    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    /// Total layer count, counting the implicit input layer.
    pub fn layer_number(&self) -> usize {
        self.layers.len() + 1
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Feeds one feature column vector through the network, recording
    /// each layer's pre-activation and activation.
    pub fn forward_prop(&self, input: &Matrix) -> Result<ForwardPass, NnError> {
        let mut zs = Vec::with_capacity(self.layers.len());
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.clone());

        let mut activation = input.clone();
        for layer in &self.layers {
            let z = layer.weights().dot(&activation)?.add(layer.bias())?;
            activation = z.map(sigmoid);
            zs.push(z);
            activations.push(activation.clone());
        }

        Ok(ForwardPass { zs, activations })
    }

    /// Backpropagates the error for one example through the pass that
    /// `forward_prop` produced for it, yielding per-layer gradients in
    /// layer order.
    ///
    /// The output-layer delta is `ŷ - y`, the combined derivative of
    /// the sigmoid output with the cross-entropy cost reported by
    /// [`evaluate_cost`](Network::evaluate_cost); hidden layers apply
    /// `δ_l = (Wᵀ_{l+1}·δ_{l+1}) ⊙ σ'(z_l)`.
    pub fn back_prop(
        &self,
        pass: &ForwardPass,
        label: &Matrix,
    ) -> Result<Vec<LayerGradients>, NnError> {
        let count = self.layers.len();
        if pass.zs.len() != count || pass.activations.len() != count + 1 {
            return Err(NnError::MismatchedForwardPass {
                expected: count,
                found: pass.zs.len(),
            });
        }

        let mut grads: Vec<LayerGradients> = Vec::with_capacity(count);

        let mut delta = CrossEntropyLoss::output_delta(pass.output(), label)?;
        let weights = delta.dot(&pass.activations[count - 1].transpose())?;
        grads.push(LayerGradients {
            weights,
            bias: delta.clone(),
        });

        for l in (0..count.saturating_sub(1)).rev() {
            let error = self.layers[l + 1].weights().transpose().dot(&delta)?;
            delta = error.hadamard(&pass.zs[l].map(sigmoid_prime))?;
            let weights = delta.dot(&pass.activations[l].transpose())?;
            grads.push(LayerGradients {
                weights,
                bias: delta.clone(),
            });
        }

        grads.reverse();
        Ok(grads)
    }

    /// Runs forward+backward for every example in the batch, sums the
    /// gradients, and takes one regularized gradient-descent step:
    ///
    ///   W ← W·(1 - αλ/n) - α·ΣΔW
    ///   b ← b - α·ΣΔb
    ///
    /// `n` is the full training-set size; the `(1 - αλ/n)` factor is L2
    /// weight decay applied once per batch.
    pub fn update_with_batch<'a, I>(
        &mut self,
        batch: I,
        alpha: f64,
        lambda: f64,
        n: usize,
    ) -> Result<(), NnError>
    where
        I: IntoIterator<Item = &'a Annotation>,
    {
        if n == 0 {
            return Err(NnError::EmptyDataset);
        }

        let mut weight_acc: Vec<Matrix> = self
            .layers
            .iter()
            .map(|l| Matrix::zeros(l.outputs(), l.inputs()))
            .collect();
        let mut bias_acc: Vec<Matrix> = self
            .layers
            .iter()
            .map(|l| Matrix::zeros(l.outputs(), 1))
            .collect();

        for annotation in batch {
            let pass = self.forward_prop(&annotation.features)?;
            let grads = self.back_prop(&pass, &annotation.label)?;
            for (i, g) in grads.into_iter().enumerate() {
                weight_acc[i] = weight_acc[i].add(&g.weights)?;
                bias_acc[i] = bias_acc[i].add(&g.bias)?;
            }
        }

        let decay = 1.0 - (alpha * lambda) / n as f64;
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let weights = layer.weights().scale(decay).sub(&weight_acc[i].scale(alpha))?;
            let bias = layer.bias().sub(&bias_acc[i].scale(alpha))?;
            layer.apply_update(weights, bias);
        }
        Ok(())
    }

    /// Mean cross-entropy cost over the dataset plus the L2 penalty
    /// `(λ/2n)·Σ w²` summed over all layers.
    pub fn evaluate_cost(&self, dataset: &[Annotation], lambda: f64) -> Result<f64, NnError> {
        if dataset.is_empty() {
            return Err(NnError::EmptyDataset);
        }
        let n = dataset.len() as f64;

        let mut cost = 0.0;
        for annotation in dataset {
            let pass = self.forward_prop(&annotation.features)?;
            cost += CrossEntropyLoss::loss(pass.output(), &annotation.label)? / n;
        }

        let mut w_squared_sum = 0.0;
        for layer in &self.layers {
            w_squared_sum += layer.weights().hadamard(layer.weights())?.sum();
        }
        cost += 0.5 * (lambda / n) * w_squared_sum;
        Ok(cost)
    }

    /// Fraction of examples whose predicted class index matches the
    /// label's, in [0, 1].
    pub fn evaluate_accuracy(&self, dataset: &[Annotation]) -> Result<f64, NnError> {
        if dataset.is_empty() {
            return Err(NnError::EmptyDataset);
        }
        let mut correct = 0usize;
        for annotation in dataset {
            let pass = self.forward_prop(&annotation.features)?;
            if pass.output().arg_max_row() == annotation.label.arg_max_row() {
                correct += 1;
            }
        }
        Ok(correct as f64 / dataset.len() as f64)
    }

    /// Classifies every example, in input order.
    pub fn predict(&self, dataset: &[Annotation]) -> Result<Vec<Prediction>, NnError> {
        let mut results = Vec::with_capacity(dataset.len());
        for annotation in dataset {
            let pass = self.forward_prop(&annotation.features)?;
            results.push(Prediction {
                label: annotation.label.arg_max_row(),
                predicted: pass.output().arg_max_row(),
            });
        }
        Ok(results)
    }

    /// Persists the ordered per-layer (weights, bias) pairs as a single
    /// binary blob. Round-trips through [`Network::load`] with the same
    /// engine; no cross-version compatibility is promised.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NnError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &self.layers)
            .map_err(|e| NnError::InvalidModel(e.to_string()))?;
        log::info!("saved {} layers to {}", self.layers.len(), path.display());
        Ok(())
    }

    /// Restores a network from a blob written by [`Network::save`],
    /// reconstructing the topology from the persisted shapes. A missing
    /// or unreadable blob is a hard error; no partially-initialized
    /// network is ever returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network, NnError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let layers: Vec<Layer> = bincode::deserialize_from(reader)
            .map_err(|e| NnError::InvalidModel(e.to_string()))?;
        let network = Network::from_layers(layers)?;
        log::info!(
            "loaded {} layers ({} -> {} nodes) from {}",
            network.layers.len(),
            network.input_nodes,
            network.output_nodes,
            path.display()
        );
        Ok(network)
    }
}
