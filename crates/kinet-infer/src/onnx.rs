use crate::{InferError, Keypoint, PoseModel};
use kinet_base::Tensor;
use ndarray::IxDyn;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use std::path::PathBuf;

pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Pose model backed by ONNX Runtime.
///
/// Binds one named float input of a fixed `[batch, height, width, channels]`
/// shape and decodes the first output as flat `(y, x, confidence)` triples.
/// Coordinates pass through exactly as the model emits them.
pub struct OnnxPoseModel {
    session: OrtSession,
    input_name: String,
    input_shape: [usize; 4],
    output_name: String,
}

impl OnnxPoseModel {
    pub fn new(
        source: ModelSource,
        input_name: impl Into<String>,
        input_shape: [usize; 4],
    ) -> Result<Self, InferError> {
        let builder = OrtSession::builder().map_err(|e| {
            InferError::ModelLoad(format!("failed to create session builder: {e}"))
        })?;

        let session = match source {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from file: {e}"))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        // Verify the configured input exists before the first frame arrives
        let input_name = input_name.into();
        let available: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        if !available.contains(&input_name) {
            return Err(InferError::InvalidInput {
                name: input_name,
                available,
            });
        }

        let output_name = session
            .outputs()
            .first()
            .map(|output| output.name().to_string())
            .ok_or_else(|| InferError::BadOutput("model declares no outputs".to_string()))?;

        log::info!(
            "loaded ONNX pose model (input '{}' {:?}, output '{}')",
            input_name,
            input_shape,
            output_name
        );

        Ok(Self {
            session,
            input_name,
            input_shape,
            output_name,
        })
    }
}

impl PoseModel for OnnxPoseModel {
    fn input_name(&self) -> &str {
        &self.input_name
    }

    fn input_shape(&self) -> [usize; 4] {
        self.input_shape
    }

    fn infer(&mut self, input: &Tensor<f32>) -> Result<Vec<Keypoint>, InferError> {
        match input.dims4() {
            Some(dims) if dims == self.input_shape => {}
            _ => {
                return Err(InferError::ShapeMismatch {
                    expected: self.input_shape,
                    got: input.shape.clone(),
                });
            }
        }

        let view = ndarray::ArrayViewD::from_shape(IxDyn(&input.shape), input.data.as_slice())
            .map_err(|e| InferError::Evaluation(format!("failed to view input as array: {e}")))?;
        let tensor_ref = TensorRef::from_array_view(view)
            .map_err(|e| InferError::Evaluation(format!("failed to create tensor ref: {e}")))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => tensor_ref])
            .map_err(|e| InferError::Evaluation(format!("inference failed: {e}")))?;

        let value = &outputs[self.output_name.as_str()];
        let array = value.try_extract_array::<f32>().map_err(|e| {
            InferError::BadOutput(format!("output '{}' is not f32: {e}", self.output_name))
        })?;
        let flat: Vec<f32> = array.iter().copied().collect();

        Keypoint::from_flat(&flat)
    }
}
