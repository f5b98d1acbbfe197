use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape element count overflows usize"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape wants {expected} elements but buffer has {got}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Dense tensor: a flat data buffer plus its shape, row-major unless the
/// producer documents otherwise.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Frame-sized tensors would flood logs, so print the element count
        // instead of the data.
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Product of the shape dimensions, with overflow detection.
fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    shape
        .iter()
        .try_fold(1usize, |product, &dim| {
            product.checked_mul(dim).ok_or(TensorError::ShapeOverflow)
        })
}

impl<T> Tensor<T> {
    /// Create a tensor from a shape and a data buffer.
    ///
    /// Fails if the shape product overflows `usize` or does not match the
    /// buffer length.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The shape as a fixed 4-element array, or `None` if the tensor is not
    /// 4-dimensional. Convenient for `[batch, height, width, channels]`
    /// model inputs.
    pub fn dims4(&self) -> Option<[usize; 4]> {
        match self.shape.as_slice() {
            &[n, h, w, c] => Some([n, h, w, c]),
            _ => None,
        }
    }
}

impl<T: Default + Clone> Tensor<T> {
    /// Create a tensor of the given shape filled with `T::default()`.
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let count = element_count(&shape)?;
        Ok(Self {
            shape,
            data: vec![T::default(); count],
        })
    }
}
